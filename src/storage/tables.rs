use redb::TableDefinition;

/// Product documents: id (32 hex digits) -> Product (msgpack)
pub const PRODUCTS: TableDefinition<&str, &[u8]> = TableDefinition::new("products");
