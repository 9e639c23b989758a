use redb::ReadableTable;

use super::db::{Database, StoreError};
use super::models::{new_product_id, parse_product_id, Product, ProductFields};
use super::tables::*;

impl Database {
    // ========================================================================
    // Product operations
    // ========================================================================

    /// Validate the submitted fields, assign a fresh id and persist the document
    pub fn create_product(&self, fields: ProductFields) -> Result<Product, StoreError> {
        let product = fields.into_new_product(new_product_id())?;

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(PRODUCTS)?;
            let data = rmp_serde::to_vec_named(&product)?;
            table.insert(product.id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(product)
    }

    /// Get a product by id. Unknown ids yield `None`; malformed ids are an error.
    pub fn get_product(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let key = parse_product_id(id)?;
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PRODUCTS)?;

        match table.get(key.as_str())? {
            Some(data) => {
                let product: Product = rmp_serde::from_slice(data.value())?;
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    /// List every product in id order, which is also creation order
    pub fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PRODUCTS)?;

        let mut products = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let product: Product = rmp_serde::from_slice(value.value())?;
            products.push(product);
        }

        Ok(products)
    }

    /// Overwrite all mutable fields of a product and return the new document.
    ///
    /// This is a full replacement, not a merge: fields missing from `fields`
    /// are cleared and `images` is replaced. Returns `None` for unknown ids.
    pub fn update_product(
        &self,
        id: &str,
        fields: ProductFields,
    ) -> Result<Option<Product>, StoreError> {
        let key = parse_product_id(id)?;
        let write_txn = self.begin_write()?;

        let existing = {
            let table = write_txn.open_table(PRODUCTS)?;
            let result = match table.get(key.as_str())? {
                Some(data) => {
                    let product: Product = rmp_serde::from_slice(data.value())?;
                    Some(product)
                }
                None => None,
            };
            result
        };

        let updated = match existing {
            Some(mut product) => {
                fields.overwrite(&mut product)?;
                let serialized = rmp_serde::to_vec_named(&product)?;
                let mut table = write_txn.open_table(PRODUCTS)?;
                table.insert(key.as_str(), serialized.as_slice())?;
                Some(product)
            }
            None => None,
        };

        write_txn.commit()?;
        Ok(updated)
    }

    /// Delete a product. Deleting an unknown id is a no-op; the return value
    /// only reports whether a document was removed.
    pub fn delete_product(&self, id: &str) -> Result<bool, StoreError> {
        let key = parse_product_id(id)?;
        let write_txn = self.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(PRODUCTS)?;
            let removed = table.remove(key.as_str())?;
            removed.is_some()
        };
        write_txn.commit()?;
        Ok(deleted)
    }
}
