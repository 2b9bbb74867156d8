//! Repository for the `workflow_events` table.

use reelflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateWorkflowEvent, WorkflowEventRow};

/// Column list for `workflow_events` queries.
const COLUMNS: &str =
    "id, event_type, source_entity_type, source_entity_id, recipient_ids, payload, created_at";

/// Provides append and read operations for the workflow event log.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event row, returning the generated ID.
    pub async fn insert(pool: &PgPool, input: &CreateWorkflowEvent<'_>) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO workflow_events \
                (event_type, source_entity_type, source_entity_id, recipient_ids, payload) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(input.event_type)
        .bind(input.source_entity_type)
        .bind(input.source_entity_id)
        .bind(input.recipient_ids)
        .bind(input.payload)
        .fetch_one(pool)
        .await
    }

    /// List events for one source entity, oldest first.
    pub async fn list_for_source(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<WorkflowEventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow_events
             WHERE source_entity_type = $1 AND source_entity_id = $2
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, WorkflowEventRow>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }
}
