//! Products API routes

use axum::Router;
use domain_products::{BroadcastNotification, EmailNotification, ProductService, ProductSubject, handlers};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let service = ProductService::new(state.db.clone(), state.products_subject.clone());
    handlers::router(service)
}

/// Subject with the email stub and an event channel attached.
///
/// Must be called inside a tokio runtime: the channel's subscriber is spawned
/// here and logs every event until the subject is dropped.
pub fn subject(events_capacity: usize) -> Arc<ProductSubject> {
    let subject = Arc::new(ProductSubject::new());
    subject.attach(Arc::new(EmailNotification));

    let events = BroadcastNotification::new(events_capacity);
    let mut rx = events.subscribe();
    subject.attach(Arc::new(events));

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => info!(
                    product_id = event.product.id,
                    created_at = %event.created_at,
                    "Product created event"
                ),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Product event subscriber lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    subject
}
