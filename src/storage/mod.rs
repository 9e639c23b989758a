pub mod db;
pub mod models;
mod products;
mod tables;

pub use db::{Database, StoreError};
pub use models::{Product, ProductFields};
pub use tables::*;
