//! Workflow event log model.

use reelflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `workflow_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowEventRow {
    pub id: DbId,
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    pub recipient_ids: Vec<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending an event.
#[derive(Debug, Clone)]
pub struct CreateWorkflowEvent<'a> {
    pub event_type: &'a str,
    pub source_entity_type: Option<&'a str>,
    pub source_entity_id: Option<DbId>,
    pub recipient_ids: &'a [DbId],
    pub payload: &'a serde_json::Value,
}
