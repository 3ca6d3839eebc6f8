use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, TransactionTrait};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::repository::GenericRepository;

/// One store transaction shared by every repository it hands out.
///
/// Repositories stage their writes inside the transaction and record how many
/// rows they touched. [`complete`](Self::complete) commits and returns that
/// count. Dropping a unit of work without completing it rolls back.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
    pending: AtomicU64,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let txn = db.begin().await?;
        Ok(Self {
            txn,
            pending: AtomicU64::new(0),
        })
    }

    /// A repository for `E` bound to this transaction.
    pub fn repository<E: EntityTrait>(&self) -> GenericRepository<'_, E> {
        GenericRepository::new(self)
    }

    /// Rows staged so far.
    pub fn pending_changes(&self) -> u64 {
        self.pending.load(Ordering::Relaxed)
    }

    /// The open transaction, for queries the generic repository does not cover.
    pub fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub(crate) fn record_changes(&self, rows: u64) {
        self.pending.fetch_add(rows, Ordering::Relaxed);
    }

    /// Commit every staged change and return the affected-row count.
    pub async fn complete(self) -> Result<u64, DbErr> {
        let Self { txn, pending } = self;
        let affected = pending.into_inner();
        txn.commit().await?;
        debug!(affected, "Unit of work committed");
        Ok(affected)
    }

    /// Discard every staged change.
    pub async fn rollback(self) -> Result<(), DbErr> {
        let discarded = self.pending_changes();
        self.txn.rollback().await?;
        debug!(discarded, "Unit of work rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, widget};
    use sea_orm::ActiveValue::Set;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_complete_commits_and_counts_rows() {
        let db = fixtures::setup().await;

        let uow = UnitOfWork::begin(&db).await.unwrap();
        let repo = uow.repository::<widget::Entity>();
        repo.add(fixtures::new_widget("bolt", 3)).await.unwrap();
        repo.add(fixtures::new_widget("nut", 7)).await.unwrap();
        assert_eq!(uow.pending_changes(), 2);

        assert_eq!(uow.complete().await.unwrap(), 2);
        assert_eq!(widget::Entity::find().count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_complete_without_changes_returns_zero() {
        let db = fixtures::setup().await;
        let uow = UnitOfWork::begin(&db).await.unwrap();
        assert_eq!(uow.complete().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_drop_discards_staged_changes() {
        let db = fixtures::setup().await;

        {
            let uow = UnitOfWork::begin(&db).await.unwrap();
            uow.repository::<widget::Entity>()
                .add(fixtures::new_widget("washer", 1))
                .await
                .unwrap();
        }

        assert_eq!(widget::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let db = fixtures::setup().await;

        let uow = UnitOfWork::begin(&db).await.unwrap();
        uow.repository::<widget::Entity>()
            .add(widget::ActiveModel {
                name: Set("spring".to_string()),
                quantity: Set(2),
                ..Default::default()
            })
            .await
            .unwrap();
        uow.rollback().await.unwrap();

        assert_eq!(widget::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_repositories_share_the_transaction() {
        let db = fixtures::setup().await;

        let uow = UnitOfWork::begin(&db).await.unwrap();
        let saved = uow
            .repository::<widget::Entity>()
            .add(fixtures::new_widget("gear", 9))
            .await
            .unwrap();

        let seen = uow.repository::<widget::Entity>().get_by_id(saved.id).await.unwrap();
        assert_eq!(seen, Some(saved));
        assert_eq!(uow.complete().await.unwrap(), 1);
    }
}
