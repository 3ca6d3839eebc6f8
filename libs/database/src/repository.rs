//! Entity-generic data access bound to a [`UnitOfWork`].
//!
//! Domain crates add entity-specific queries as extension traits over
//! `GenericRepository<'_, their::Entity>`, reaching the open transaction
//! through [`GenericRepository::connection`].

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel,
    Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder,
};
use std::marker::PhantomData;

use crate::unit_of_work::UnitOfWork;

/// Primary-key value type of an entity.
pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

pub struct GenericRepository<'uow, E> {
    uow: &'uow UnitOfWork,
    _entity: PhantomData<E>,
}

impl<'uow, E: EntityTrait> GenericRepository<'uow, E> {
    pub(crate) fn new(uow: &'uow UnitOfWork) -> Self {
        Self {
            uow,
            _entity: PhantomData,
        }
    }

    pub fn connection(&self) -> &'uow DatabaseTransaction {
        self.uow.connection()
    }
}

impl<'uow, E> GenericRepository<'uow, E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    /// Stage an insert. The returned model carries the store-assigned id.
    pub async fn add(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        let saved = model.insert(self.connection()).await?;
        self.uow.record_changes(1);
        Ok(saved)
    }

    /// Every row, ordered by primary key.
    pub async fn get_all(&self) -> Result<Vec<E::Model>, DbErr> {
        let mut query = E::find();
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }
        query.all(self.connection()).await
    }

    pub async fn get_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        E::find_by_id(id).one(self.connection()).await
    }

    /// Stage a full replace of the row identified by the model's primary key.
    ///
    /// Fails with [`DbErr::RecordNotUpdated`] when no such row exists.
    pub async fn update(&self, model: E::Model) -> Result<E::Model, DbErr> {
        let updated = model
            .into_active_model()
            .reset_all()
            .update(self.connection())
            .await?;
        self.uow.record_changes(1);
        Ok(updated)
    }

    /// Stage a delete and return the number of rows removed.
    pub async fn delete<K>(&self, id: K) -> Result<u64, DbErr>
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        let rows = E::delete_by_id(id).exec(self.connection()).await?.rows_affected;
        self.uow.record_changes(rows);
        Ok(rows)
    }
}
