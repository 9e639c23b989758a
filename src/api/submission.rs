use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use axum::Json;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::storage::ProductFields;
use crate::uploads::{IntakeError, UploadDir, IMAGES_FIELD};
use crate::AppState;

/// Fields and stored image paths read from a create or update request body.
#[derive(Debug, Default)]
pub struct ProductSubmission {
    /// Scalar fields. `images` is left empty; see [`ProductSubmission::images`].
    pub fields: ProductFields,
    /// Paths of the files written during intake, in upload order. `None` when
    /// the body was not multipart and so carried no file list at all.
    pub images: Option<Vec<String>>,
}

impl ProductSubmission {
    /// Fields for a new product. Creating requires a multipart body.
    pub fn into_create_fields(self) -> Result<ProductFields, IntakeError> {
        let images = self.images.ok_or(IntakeError::NotMultipart)?;
        Ok(ProductFields {
            images,
            ..self.fields
        })
    }

    /// Fields for a full overwrite. Without attached files the image list
    /// becomes empty.
    pub fn into_update_fields(self) -> ProductFields {
        ProductFields {
            images: self.images.unwrap_or_default(),
            ..self.fields
        }
    }

    fn from_json(body: Value) -> Self {
        let mut fields = ProductFields::default();
        if let Value::Object(mut map) = body {
            fields.sku = map.remove("sku");
            fields.quantity = map.remove("quantity");
            fields.name = map.remove("name");
            fields.description = map.remove("description");
        }
        Self {
            fields,
            images: None,
        }
    }
}

#[axum::async_trait]
impl FromRequest<Arc<AppState>> for ProductSubmission {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, ApiError> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| IntakeError::Multipart(e.body_text()))?;
            read_multipart(multipart, &state.uploads).await
        } else if content_type.starts_with("application/json") {
            let Json(body) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| IntakeError::InvalidJson(e.body_text()))?;
            Ok(Self::from_json(body))
        } else {
            Ok(Self::default())
        }
    }
}

async fn read_multipart(
    mut multipart: Multipart,
    uploads: &UploadDir,
) -> Result<ProductSubmission, ApiError> {
    let submitted_at = Utc::now();
    let mut fields = ProductFields::default();
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IntakeError::Multipart(e.body_text()))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field.file_name().is_some() {
            if field_name != IMAGES_FIELD {
                return Err(IntakeError::UnexpectedField(field_name).into());
            }
            let original_name = field.file_name().map(|s| s.to_string());
            let path = uploads
                .store(original_name.as_deref(), submitted_at, field)
                .await?;
            images.push(path);
            continue;
        }

        let slot = match field_name.as_str() {
            "sku" => &mut fields.sku,
            "quantity" => &mut fields.quantity,
            "name" => &mut fields.name,
            "description" => &mut fields.description,
            _ => continue,
        };
        let text = field
            .text()
            .await
            .map_err(|e| IntakeError::Multipart(e.body_text()))?;
        *slot = Some(Value::String(text));
    }

    Ok(ProductSubmission {
        fields,
        images: Some(images),
    })
}
