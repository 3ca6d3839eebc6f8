//! Products Domain
//!
//! Product catalog CRUD on sea-orm, with observers notified on creation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌───────────────┐
//! │   Service   │ ──▶ │ProductSubject │ ──▶ observers (email, broadcast)
//! └──────┬──────┘     └───────────────┘
//!        │
//! ┌──────▼──────┐
//! │ UnitOfWork  │  ← one transaction per operation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← GenericRepository + name search
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← `products` table
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers, EmailNotification, ProductService, ProductSubject,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = sea_orm::Database::connect("postgres://localhost/webshop").await?;
//!
//! let subject = Arc::new(ProductSubject::new());
//! subject.attach(Arc::new(EmailNotification));
//!
//! let service = ProductService::new(db, subject);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{Product, ProductInput};
pub use notifications::{
    BroadcastNotification, EmailNotification, NotificationError, NotifyReport, ObserverId,
    ProductCreatedEvent, ProductObserver, ProductSubject,
};
pub use repository::{ProductRepository, ProductRepositoryExt, ProductUnitOfWork};
pub use service::ProductService;
