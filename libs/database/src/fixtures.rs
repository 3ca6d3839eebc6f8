//! Throwaway entity and SQLite pool for exercising the generic layer.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};

pub mod widget {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "widgets")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub quantity: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub async fn setup() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();

    let backend = db.get_database_backend();
    let create = Schema::new(backend).create_table_from_entity(widget::Entity);
    db.execute_raw(backend.build(&create)).await.unwrap();
    db
}

pub fn new_widget(name: &str, quantity: i32) -> widget::ActiveModel {
    use sea_orm::ActiveValue::Set;

    widget::ActiveModel {
        name: Set(name.to_string()),
        quantity: Set(quantity),
        ..Default::default()
    }
}
