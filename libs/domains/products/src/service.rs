//! Product Service - Business logic layer

use database::{CrudService, UnitOfWork};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::entity;
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::notifications::ProductSubject;
use crate::repository::{ProductRepositoryExt, ProductUnitOfWork};

/// Product operations on top of the generic [`CrudService`].
///
/// Every write commits through its own unit of work. Creation additionally
/// notifies the attached observers once the row is committed.
#[derive(Clone)]
pub struct ProductService {
    crud: CrudService<entity::Entity>,
    subject: Arc<ProductSubject>,
}

impl ProductService {
    pub fn new(db: DatabaseConnection, subject: Arc<ProductSubject>) -> Self {
        Self {
            crud: CrudService::new(db),
            subject,
        }
    }

    pub fn subject(&self) -> &Arc<ProductSubject> {
        &self.subject
    }

    /// Create a product and notify observers. Any `id` in `input` is ignored.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn add(&self, input: ProductInput) -> ProductResult<Product> {
        input.validate()?;

        let product = Product::from(self.crud.add(input.into_active_model()).await?);
        info!(product_id = product.id, "Product created");

        let report = self.subject.notify(&product).await;
        debug!(
            product_id = product.id,
            delivered = report.delivered,
            failed = report.failed,
            "Observers notified"
        );

        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ProductResult<Vec<Product>> {
        let models = self.crud.get_all().await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.crud.get_by_id(id).await?.map(Product::from))
    }

    /// Replace product `id` with `input`.
    ///
    /// `input.id` must equal `id`. Returns `Ok(false)` when the product does
    /// not exist.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: ProductInput) -> ProductResult<bool> {
        if input.id != Some(id) {
            return Err(ProductError::IdMismatch {
                path: id,
                body: input.id,
            });
        }
        input.validate()?;

        let updated = self.crud.update(id, input.into_model(id)).await?;
        if updated {
            info!(product_id = id, "Product updated");
        }
        Ok(updated)
    }

    /// Returns `Ok(false)` when the product does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ProductResult<bool> {
        let deleted = self.crud.delete(id).await?;
        if deleted {
            info!(product_id = id, "Product deleted");
        }
        Ok(deleted)
    }

    /// Products whose name contains `name`. Blank queries are rejected.
    #[instrument(skip(self))]
    pub async fn get_products_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        if name.trim().is_empty() {
            return Err(ProductError::EmptySearch);
        }

        let uow = UnitOfWork::begin(self.crud.db()).await?;
        let models = uow.products().get_products_by_name(name).await?;
        uow.complete().await?;

        Ok(models.into_iter().map(Product::from).collect())
    }
}
