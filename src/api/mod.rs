pub mod handlers;
pub mod response;
mod routes;
pub mod submission;

pub use routes::{create_router, PRODUCTS_PATH};
