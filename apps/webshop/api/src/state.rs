//! Application state management

use domain_products::ProductSubject;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    /// Process-wide registry of product-created observers
    pub products_subject: Arc<ProductSubject>,
}
