pub use sea_orm_migration::prelude::*;

mod m20241129_000001_create_products;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241129_000001_create_products::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    async fn sqlite() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        Database::connect(opt).await.unwrap()
    }

    #[tokio::test]
    async fn test_up_creates_products_table() {
        let db = sqlite().await;
        Migrator::up(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("products").await.unwrap());
        assert!(manager.has_column("products", "price").await.unwrap());
        assert!(manager.has_index("products", "idx_products_name").await.unwrap());
    }

    #[tokio::test]
    async fn test_up_is_idempotent_and_down_drops_table() {
        let db = sqlite().await;
        Migrator::up(&db, None).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        Migrator::down(&db, None).await.unwrap();
        let manager = SchemaManager::new(&db);
        assert!(!manager.has_table("products").await.unwrap());
    }
}
