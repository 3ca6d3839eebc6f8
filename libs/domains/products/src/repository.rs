//! Product data access over the generic repository.

use database::{GenericRepository, UnitOfWork};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::{self, Column};

/// Repository handle for the products table.
pub type ProductRepository<'uow> = GenericRepository<'uow, entity::Entity>;

/// Queries only the product repository offers.
pub trait ProductRepositoryExt {
    /// Products whose name contains `name`, ordered by id.
    ///
    /// Matching is a `LIKE '%name%'` with `%`, `_` and `\` in `name` taken
    /// literally. Case sensitivity follows the backend (case-sensitive on
    /// PostgreSQL, ASCII-insensitive on SQLite).
    fn get_products_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<entity::Model>, DbErr>> + Send;
}

impl ProductRepositoryExt for ProductRepository<'_> {
    async fn get_products_by_name(&self, name: &str) -> Result<Vec<entity::Model>, DbErr> {
        entity::Entity::find()
            .filter(Column::Name.like(substring_pattern(name)))
            .order_by_asc(Column::Id)
            .all(self.connection())
            .await
    }
}

const LIKE_ESCAPE: char = '\\';

fn substring_pattern(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

/// Product accessor on a [`UnitOfWork`].
pub trait ProductUnitOfWork {
    fn products(&self) -> ProductRepository<'_>;
}

impl ProductUnitOfWork for UnitOfWork {
    fn products(&self) -> ProductRepository<'_> {
        self.repository::<entity::Entity>()
    }
}
