//! Integration tests for Products domain
//!
//! These tests run against a migrated database to ensure:
//! - Repository queries work on the real schema
//! - Unit of work commits and rolls back as expected
//! - Observers see exactly the committed products
//!
//! SQLite in memory by default; the `postgres` tests need Docker.

use async_trait::async_trait;
use database::UnitOfWork;
use domain_products::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

/// Records the ids it was notified about.
struct RecordingObserver {
    label: &'static str,
    log: Arc<Mutex<Vec<(&'static str, i32)>>>,
}

#[async_trait]
impl ProductObserver for RecordingObserver {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn on_product_created(&self, product: &Product) -> Result<(), NotificationError> {
        self.log.lock().unwrap().push((self.label, product.id));
        Ok(())
    }
}

fn input(name: &str, price: &str) -> ProductInput {
    ProductInput::new(name, Decimal::from_str(price).unwrap())
}

// ============================================================================
// Repository / Unit of Work Tests
// ============================================================================

#[tokio::test]
async fn test_complete_returns_affected_rows() {
    let db = TestDatabase::in_memory().await;
    let uow = UnitOfWork::begin(&db.connection).await.unwrap();
    let products = uow.products();

    let a = products.add(input("A", "1").into_active_model()).await.unwrap();
    let b = products.add(input("B", "2").into_active_model()).await.unwrap();
    products.update(input("B2", "3").into_model(b.id)).await.unwrap();
    products.delete(a.id).await.unwrap();

    assert_eq!(uow.complete().await.unwrap(), 4);

    let uow = UnitOfWork::begin(&db.connection).await.unwrap();
    let remaining = uow.products().get_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "B2");
}

#[tokio::test]
async fn test_dropped_unit_of_work_discards_changes() {
    let db = TestDatabase::in_memory().await;

    {
        let uow = UnitOfWork::begin(&db.connection).await.unwrap();
        uow.products()
            .add(input("Never", "1").into_active_model())
            .await
            .unwrap();
        assert_eq!(uow.pending_changes(), 1);
    }

    let uow = UnitOfWork::begin(&db.connection).await.unwrap();
    assert!(uow.products().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_absent_row_stages_nothing() {
    let db = TestDatabase::in_memory().await;
    let uow = UnitOfWork::begin(&db.connection).await.unwrap();

    assert_eq!(uow.products().delete(12345).await.unwrap(), 0);
    assert_eq!(uow.complete().await.unwrap(), 0);
}

#[tokio::test]
async fn test_search_matches_exact_subset() {
    let db = TestDatabase::in_memory().await;
    let service = ProductService::new(db.connection(), Arc::new(ProductSubject::new()));
    let builder = TestDataBuilder::from_test_name("search_subset");

    let names = [
        builder.product_name("lamp-red"),
        builder.product_name("lamp-blue"),
        builder.product_name("chair"),
    ];
    for name in &names {
        service.add(input(name, "10")).await.unwrap();
    }

    let found: Vec<String> = service
        .get_products_by_name("lamp")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(found.len(), 2);
    assert_contains_all(&found, &[names[0].as_str(), names[1].as_str()], "lamp search");
}

// ============================================================================
// Service + Notification Tests
// ============================================================================

#[tokio::test]
async fn test_observers_notified_in_attachment_order() {
    let db = TestDatabase::in_memory().await;
    let log = Arc::new(Mutex::new(Vec::new()));
    let subject = Arc::new(ProductSubject::new());

    subject.attach(Arc::new(RecordingObserver { label: "first", log: log.clone() }));
    let second = subject.attach(Arc::new(RecordingObserver { label: "second", log: log.clone() }));

    let service = ProductService::new(db.connection(), subject.clone());
    let one = service.add(input("One", "1")).await.unwrap();

    subject.detach(second);
    let two = service.add(input("Two", "2")).await.unwrap();

    let log = log.lock().unwrap().clone();
    assert_eq!(log, vec![("first", one.id), ("second", one.id), ("first", two.id)]);
}

#[tokio::test]
async fn test_broadcast_observer_receives_created_product() {
    let db = TestDatabase::in_memory().await;
    let broadcast = BroadcastNotification::new(16);
    let mut events = broadcast.subscribe();

    let subject = Arc::new(ProductSubject::new());
    subject.attach(Arc::new(EmailNotification));
    subject.attach(Arc::new(broadcast));

    let service = ProductService::new(db.connection(), subject);
    let created = service.add(input("Headphones", "59.90")).await.unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.product, created);
}

#[tokio::test]
async fn test_add_get_round_trip_preserves_fields() {
    let db = TestDatabase::in_memory().await;
    let service = ProductService::new(db.connection(), Arc::new(ProductSubject::new()));

    let created = service
        .add(input("Notebook", "3.50").with_description("A5, dotted"))
        .await
        .unwrap();
    let fetched = assert_some(service.get_by_id(created.id).await.unwrap(), "product should exist");

    assert_eq!(fetched.name, "Notebook");
    assert_eq!(fetched.description.as_deref(), Some("A5, dotted"));
    assert_eq!(fetched.price, Decimal::from_str("3.50").unwrap());
}

// ============================================================================
// PostgreSQL
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_postgres_crud_and_case_sensitive_search() {
    let db = TestDatabase::postgres().await;
    let service = ProductService::new(db.connection(), Arc::new(ProductSubject::new()));

    let created = service.add(input("Desk Lamp", "24.99")).await.unwrap();
    assert_eq!(
        service.get_by_id(created.id).await.unwrap().map(|p| p.price),
        Some(Decimal::from_str("24.99").unwrap())
    );

    assert_eq!(service.get_products_by_name("Lamp").await.unwrap().len(), 1);
    assert!(service.get_products_by_name("lamp").await.unwrap().is_empty());

    assert!(service.delete(created.id).await.unwrap());
    assert!(!service.delete(created.id).await.unwrap());
}
