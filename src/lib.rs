//! product-catalog - A small REST API for product records with image uploads
//!
//! This crate provides:
//! - CRUD handlers for a single product resource mounted under `/api/products`
//! - redb embedded database for product documents
//! - Multipart image intake written to a local upload directory

pub mod api;
pub mod config;
pub mod storage;
#[cfg(test)]
pub mod testutil;
pub mod uploads;

use config::Config;
use storage::Database;
use uploads::UploadDir;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub uploads: UploadDir,
}
