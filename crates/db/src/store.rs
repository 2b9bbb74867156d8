//! Postgres implementations of the workflow engine's collaborators.

use async_trait::async_trait;
use reelflow_core::assignment::Candidate;
use reelflow_core::content::ContentItem;
use reelflow_core::error::CoreError;
use reelflow_core::person::Person;
use reelflow_core::queue::QueueFilter;
use reelflow_core::roles::Role;
use reelflow_core::store::{AssignmentDecision, ContentStore, PersonDirectory};
use reelflow_core::types::DbId;

use crate::models::content_item::ContentItemWrite;
use crate::repositories::{ContentItemRepo, PersonRepo};
use crate::DbPool;

/// Advisory lock key serializing assignment writes across connections.
const ASSIGNMENT_LOCK_ID: i64 = 604_117_233;

/// Map a sqlx failure onto the domain error type. Details are logged here
/// and kept out of the returned message.
fn db_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error in workflow store");
    CoreError::Internal("Database error".to_string())
}

/// [`ContentStore`] backed by the `content_items` table.
#[derive(Clone)]
pub struct PgContentStore {
    pool: DbPool,
}

impl PgContentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn load_item(&self, id: DbId) -> Result<ContentItem, CoreError> {
        ContentItemRepo::find_by_id(&self.pool, id)
            .await
            .map_err(db_error)?
            .ok_or(CoreError::NotFound {
                entity: "ContentItem",
                id,
            })?
            .try_into()
    }

    async fn insert_item(&self, item: &ContentItem) -> Result<ContentItem, CoreError> {
        ContentItemRepo::create(&self.pool, &ContentItemWrite::from(item))
            .await
            .map_err(db_error)?
            .try_into()
    }

    async fn save_item(&self, item: &ContentItem) -> Result<ContentItem, CoreError> {
        let write = ContentItemWrite::from(item);
        let updated = ContentItemRepo::update_versioned(&self.pool, item.id, item.version, &write)
            .await
            .map_err(db_error)?;

        match updated {
            Some(row) => row.try_into(),
            None => {
                let exists = ContentItemRepo::exists(&self.pool, item.id)
                    .await
                    .map_err(db_error)?;
                if !exists {
                    return Err(CoreError::NotFound {
                        entity: "ContentItem",
                        id: item.id,
                    });
                }
                tracing::debug!(
                    content_id = item.id,
                    expected_version = item.version,
                    "Versioned update matched no row"
                );
                Err(CoreError::Conflict(format!(
                    "Content item {} was modified concurrently (expected version {})",
                    item.id, item.version
                )))
            }
        }
    }

    async fn list_items(&self, filter: &QueueFilter) -> Result<Vec<ContentItem>, CoreError> {
        ContentItemRepo::list(&self.pool, filter)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(ContentItem::try_from)
            .collect()
    }

    /// Runs in one transaction holding a transaction-scoped advisory lock,
    /// so the workload counts read here cannot go stale before the write.
    async fn save_assignment(
        &self,
        id: DbId,
        auto_roles: &[Role],
        decide: &AssignmentDecision<'_>,
    ) -> Result<(ContentItem, ContentItem), CoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(ASSIGNMENT_LOCK_ID)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let current: ContentItem = ContentItemRepo::find_for_update(&mut *tx, id)
            .await
            .map_err(db_error)?
            .ok_or(CoreError::NotFound {
                entity: "ContentItem",
                id,
            })?
            .try_into()?;

        let mut candidates = Vec::new();
        for role in auto_roles {
            let rows = PersonRepo::list_with_workload(&mut *tx, Some(*role))
                .await
                .map_err(db_error)?;
            for row in rows.into_iter().filter(|r| r.is_active) {
                candidates.push(Candidate::try_from(row)?);
            }
        }

        let next = decide(&current, &candidates)?;
        let saved: ContentItem = ContentItemRepo::update_versioned(
            &mut *tx,
            id,
            current.version,
            &ContentItemWrite::from(&next),
        )
        .await
        .map_err(db_error)?
        .ok_or_else(|| {
            CoreError::Conflict(format!(
                "Content item {id} was modified concurrently (expected version {})",
                current.version
            ))
        })?
        .try_into()?;

        tx.commit().await.map_err(db_error)?;

        tracing::debug!(
            content_id = id,
            version = saved.version,
            candidates = candidates.len(),
            "Assignment saved"
        );
        Ok((current, saved))
    }
}

/// [`PersonDirectory`] backed by the `people` table.
#[derive(Clone)]
pub struct PgPersonDirectory {
    pool: DbPool,
}

impl PgPersonDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonDirectory for PgPersonDirectory {
    async fn get_person(&self, id: DbId) -> Result<Person, CoreError> {
        PersonRepo::find_by_id(&self.pool, id)
            .await
            .map_err(db_error)?
            .ok_or(CoreError::NotFound {
                entity: "Person",
                id,
            })?
            .try_into()
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<Person>, CoreError> {
        PersonRepo::list_by_role(&self.pool, role)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(Person::try_from)
            .collect()
    }

    async fn count_active_assignments(&self, person_id: DbId) -> Result<i64, CoreError> {
        ContentItemRepo::count_active_for_person(&self.pool, person_id)
            .await
            .map_err(db_error)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn db_error_keeps_driver_detail_out_of_the_message() {
        let err = db_error(sqlx::Error::Protocol("password authentication failed".into()));
        assert_matches!(err, CoreError::Internal(msg) if msg == "Database error");
    }
}
