//! Product-created notifications.
//!
//! [`ProductSubject`] keeps a synchronized registry of [`ProductObserver`]s and
//! pushes every newly created product to each of them in attachment order.
//! A failing observer is logged and skipped; it never fails the create.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::models::Product;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Receives every product created through the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductObserver: Send + Sync {
    /// Channel name used in logs
    fn name(&self) -> &'static str;

    async fn on_product_created(&self, product: &Product) -> Result<(), NotificationError>;
}

/// Email stub: logs the product instead of sending mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailNotification;

#[async_trait]
impl ProductObserver for EmailNotification {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn on_product_created(&self, product: &Product) -> Result<(), NotificationError> {
        info!(
            product_id = product.id,
            "Email Notification: New product added - {} {}", product.id, product.name
        );
        Ok(())
    }
}

/// Payload published by [`BroadcastNotification`].
#[derive(Debug, Clone, Serialize)]
pub struct ProductCreatedEvent {
    pub product: Product,
    pub created_at: DateTime<Utc>,
}

/// Publishes [`ProductCreatedEvent`]s on a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastNotification {
    tx: broadcast::Sender<ProductCreatedEvent>,
}

impl BroadcastNotification {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProductCreatedEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl ProductObserver for BroadcastNotification {
    fn name(&self) -> &'static str {
        "broadcast"
    }

    async fn on_product_created(&self, product: &Product) -> Result<(), NotificationError> {
        let event = ProductCreatedEvent {
            product: product.clone(),
            created_at: Utc::now(),
        };

        match self.tx.send(event) {
            Ok(receivers) => debug!(product_id = product.id, receivers, "Published product event"),
            // nobody listening is not a delivery failure
            Err(_) => debug!(product_id = product.id, "No subscribers for product event"),
        }
        Ok(())
    }
}

/// Handle returned by [`ProductSubject::attach`], used to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Outcome of one [`ProductSubject::notify`] round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Default)]
pub struct ProductSubject {
    observers: RwLock<Vec<(ObserverId, Arc<dyn ProductObserver>)>>,
    next_id: AtomicU64,
}

impl ProductSubject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, observer: Arc<dyn ProductObserver>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(observer = observer.name(), "Attaching observer");
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    /// Returns `false` when `id` was not attached.
    pub fn detach(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(attached, _)| *attached != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Notify every observer attached at call time, in attachment order.
    ///
    /// Runs on a snapshot, so observers may attach or detach concurrently.
    pub async fn notify(&self, product: &Product) -> NotifyReport {
        let snapshot: Vec<Arc<dyn ProductObserver>> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        let mut report = NotifyReport::default();
        for observer in snapshot {
            match observer.on_product_created(product).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(
                        observer = observer.name(),
                        product_id = product.id,
                        error = %e,
                        "Product notification failed"
                    );
                    report.failed += 1;
                }
            }
        }
        report
    }
}

impl std::fmt::Debug for ProductSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductSubject")
            .field("observers", &self.observer_count())
            .finish()
    }
}
