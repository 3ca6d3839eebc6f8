use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityName, EntityTrait,
    IntoActiveModel,
};
use std::marker::PhantomData;
use tracing::debug;

use crate::repository::PrimaryKeyOf;
use crate::unit_of_work::UnitOfWork;

/// Add/get/update/delete for any entity. Each call runs in its own
/// [`UnitOfWork`] and writes are committed before returning.
pub struct CrudService<E> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> CrudService<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn add(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let saved = uow.repository::<E>().add(model).await?;
        uow.complete().await?;
        Ok(saved)
    }

    pub async fn get_all(&self) -> Result<Vec<E::Model>, DbErr> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let all = uow.repository::<E>().get_all().await?;
        uow.complete().await?;
        Ok(all)
    }

    pub async fn get_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        let uow = UnitOfWork::begin(&self.db).await?;
        let found = uow.repository::<E>().get_by_id(id).await?;
        uow.complete().await?;
        Ok(found)
    }

    /// Replace the row `id` with `model`. Returns `false` without writing
    /// when the row does not exist, including when it is deleted between the
    /// lookup and the update.
    pub async fn update<K>(&self, id: K, model: E::Model) -> Result<bool, DbErr>
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        let uow = UnitOfWork::begin(&self.db).await?;
        let repo = uow.repository::<E>();

        if repo.get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        match repo.update(model).await {
            Ok(_) => {}
            Err(DbErr::RecordNotUpdated) => {
                debug!(table = %E::default().table_name(), "Row vanished before update");
                return Ok(false);
            }
            Err(e) => return Err(e),
        }
        let affected = uow.complete().await?;
        debug!(affected, table = %E::default().table_name(), "Updated row");
        Ok(true)
    }

    /// Remove the row `id`. Returns `false` without issuing a delete when the
    /// row does not exist.
    pub async fn delete<K>(&self, id: K) -> Result<bool, DbErr>
    where
        K: Into<PrimaryKeyOf<E>> + Clone,
    {
        let uow = UnitOfWork::begin(&self.db).await?;
        let repo = uow.repository::<E>();

        if repo.get_by_id(id.clone()).await?.is_none() {
            return Ok(false);
        }

        repo.delete(id).await?;
        let affected = uow.complete().await?;
        debug!(affected, table = %E::default().table_name(), "Deleted row");
        Ok(affected > 0)
    }
}
