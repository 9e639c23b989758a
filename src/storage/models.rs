use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::db::StoreError;

/// A product document stored in redb.
///
/// Fields cleared by an update are `None` and are left out of the JSON
/// representation entirely, the same way an unset document field is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The five mutable product fields as submitted by a client, before casting.
///
/// Scalar fields keep the raw submitted value: multipart text parts arrive as
/// `Value::String`, JSON bodies keep whatever JSON type the client sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
    pub sku: Option<Value>,
    pub quantity: Option<Value>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub images: Vec<String>,
}

impl ProductFields {
    /// Cast and validate the fields into a brand new document.
    ///
    /// All of `sku`, `quantity`, `name` and `description` are required; an
    /// empty string counts as missing.
    pub(crate) fn into_new_product(self, id: String) -> Result<Product, StoreError> {
        let sku = cast_string("sku", self.sku)?.filter(|s| !s.is_empty());
        let quantity = cast_quantity(self.quantity)?;
        let name = cast_string("name", self.name)?.filter(|s| !s.is_empty());
        let description = cast_string("description", self.description)?.filter(|s| !s.is_empty());

        let missing: Vec<&str> = [
            ("sku", sku.is_none()),
            ("quantity", quantity.is_none()),
            ("name", name.is_none()),
            ("description", description.is_none()),
        ]
        .into_iter()
        .filter_map(|(path, absent)| absent.then_some(path))
        .collect();

        if !missing.is_empty() {
            return Err(StoreError::Validation(format!(
                "product validation failed: missing required field(s) {}",
                missing.join(", ")
            )));
        }

        Ok(Product {
            id,
            sku,
            quantity,
            name,
            images: self.images,
            description,
        })
    }

    /// Overwrite every mutable field of `product`. Absent fields are cleared
    /// and `images` is replaced wholesale, never merged.
    pub(crate) fn overwrite(self, product: &mut Product) -> Result<(), StoreError> {
        product.sku = cast_string("sku", self.sku)?;
        product.quantity = cast_quantity(self.quantity)?;
        product.name = cast_string("name", self.name)?;
        product.description = cast_string("description", self.description)?;
        product.images = self.images;
        Ok(())
    }
}

fn cast_string(path: &str, value: Option<Value>) -> Result<Option<String>, StoreError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(StoreError::Validation(format!(
            "cast to string failed for value {other} at path {path}"
        ))),
    }
}

fn cast_quantity(value: Option<Value>) -> Result<Option<Number>, StoreError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => normalize_number(f).map(Some).ok_or_else(|| cast_failed(&n)),
            _ => Ok(Some(n)),
        },
        Some(Value::Bool(b)) => Ok(Some(Number::from(u8::from(b)))),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(Some(Number::from(i)));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(normalize_number)
                .map(Some)
                .ok_or_else(|| cast_failed(&format!("\"{s}\"")))
        }
        Some(other) => Err(cast_failed(&other)),
    }
}

fn cast_failed(shown: impl std::fmt::Display) -> StoreError {
    StoreError::Validation(format!(
        "cast to number failed for value {shown} at path quantity"
    ))
}

/// Whole floats are stored as integers so `5.0` reads back as `5`.
fn normalize_number(f: f64) -> Option<Number> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        return Some(Number::from(f as i64));
    }
    Number::from_f64(f)
}

/// Generate a new product identifier. Identifiers are time-ordered, so
/// iterating the products table yields creation order.
pub fn new_product_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}

/// Normalize a client-supplied identifier to its storage key.
pub fn parse_product_id(raw: &str) -> Result<String, StoreError> {
    uuid::Uuid::parse_str(raw)
        .map(|id| id.simple().to_string())
        .map_err(|_| StoreError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> Option<Value> {
        Some(Value::String(s.to_string()))
    }

    fn complete() -> ProductFields {
        ProductFields {
            sku: text("SKU-1"),
            quantity: text("12"),
            name: text("Lamp"),
            description: text("A desk lamp"),
            images: vec!["uploads/a.png".to_string()],
        }
    }

    #[test]
    fn test_new_product_casts_fields() {
        let product = complete().into_new_product("abc".to_string()).unwrap();
        assert_eq!(product.id, "abc");
        assert_eq!(product.sku.as_deref(), Some("SKU-1"));
        assert_eq!(product.quantity, Some(Number::from(12)));
        assert_eq!(product.images, vec!["uploads/a.png".to_string()]);
    }

    #[test]
    fn test_new_product_reports_missing_fields() {
        let mut fields = complete();
        fields.sku = None;
        fields.name = text("");
        let err = fields.into_new_product("abc".to_string()).unwrap_err();
        match err {
            StoreError::Validation(msg) => {
                assert!(msg.contains("sku"));
                assert!(msg.contains("name"));
                assert!(!msg.contains("quantity"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_quantity_casting() {
        assert_eq!(cast_quantity(text(" 7 ")).unwrap(), Some(Number::from(7)));
        assert_eq!(cast_quantity(text("2.5")).unwrap(), Number::from_f64(2.5));
        assert_eq!(cast_quantity(Some(json!(3.0))).unwrap(), Some(Number::from(3)));
        assert_eq!(cast_quantity(text("")).unwrap(), None);
        assert!(cast_quantity(text("lots")).is_err());
        assert!(cast_quantity(text("NaN")).is_err());
        assert!(cast_quantity(Some(json!([1]))).is_err());
    }

    #[test]
    fn test_string_casting() {
        assert_eq!(
            cast_string("sku", Some(json!(42))).unwrap().as_deref(),
            Some("42")
        );
        assert!(cast_string("sku", Some(json!({"a": 1}))).is_err());
    }

    #[test]
    fn test_overwrite_clears_absent_fields() {
        let mut product = complete().into_new_product("abc".to_string()).unwrap();
        ProductFields {
            name: text("Lamp v2"),
            ..Default::default()
        }
        .overwrite(&mut product)
        .unwrap();

        assert_eq!(product.id, "abc");
        assert_eq!(product.name.as_deref(), Some("Lamp v2"));
        assert_eq!(product.sku, None);
        assert_eq!(product.quantity, None);
        assert_eq!(product.description, None);
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_json_shape_omits_cleared_fields() {
        let product = Product {
            id: "abc".to_string(),
            sku: None,
            quantity: Some(Number::from(1)),
            name: Some("Lamp".to_string()),
            images: vec![],
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"_id": "abc", "quantity": 1, "name": "Lamp", "images": []})
        );
    }

    #[test]
    fn test_parse_product_id() {
        let id = new_product_id();
        assert_eq!(id.len(), 32);
        assert_eq!(parse_product_id(&id).unwrap(), id);

        let hyphenated = uuid::Uuid::parse_str(&id).unwrap().hyphenated().to_string();
        assert_eq!(parse_product_id(&hyphenated).unwrap(), id);

        assert!(matches!(
            parse_product_id("not-an-id"),
            Err(StoreError::InvalidId(_))
        ));
    }
}
