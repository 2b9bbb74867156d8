//! Content item row model and write DTO.

use reelflow_core::content::{Assignees, ContentItem, Scores};
use reelflow_core::error::CoreError;
use reelflow_core::stage::{ProductionStage, ReviewStatus};
use reelflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `content_items` table.
///
/// Enum columns are stored as TEXT; convert with [`ContentItem::try_from`]
/// before handing the row to the engine.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentItemRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub reference_url: Option<String>,
    pub author_id: DbId,
    pub status: String,
    pub production_stage: Option<String>,
    pub rejection_count: i32,
    pub is_dissolved: bool,
    pub videographer_id: Option<DbId>,
    pub editor_id: Option<DbId>,
    pub posting_manager_id: Option<DbId>,
    pub admin_remarks: String,
    pub hook_strength: Option<i16>,
    pub content_quality: Option<i16>,
    pub viral_potential: Option<i16>,
    pub replication_clarity: Option<i16>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ContentItemRow> for ContentItem {
    type Error = CoreError;

    fn try_from(row: ContentItemRow) -> Result<Self, Self::Error> {
        let status: ReviewStatus = row.status.parse().map_err(|e| corrupt(row.id, e))?;
        let production_stage = row
            .production_stage
            .as_deref()
            .map(str::parse::<ProductionStage>)
            .transpose()
            .map_err(|e| corrupt(row.id, e))?;

        let scores = match (
            row.hook_strength,
            row.content_quality,
            row.viral_potential,
            row.replication_clarity,
        ) {
            (Some(h), Some(c), Some(v), Some(r)) => Some(Scores {
                hook_strength: h,
                content_quality: c,
                viral_potential: v,
                replication_clarity: r,
            }),
            _ => None,
        };

        Ok(ContentItem {
            id: row.id,
            title: row.title,
            description: row.description,
            reference_url: row.reference_url,
            author_id: row.author_id,
            status,
            production_stage,
            rejection_count: row.rejection_count,
            is_dissolved: row.is_dissolved,
            assignees: Assignees {
                videographer_id: row.videographer_id,
                editor_id: row.editor_id,
                posting_manager_id: row.posting_manager_id,
            },
            admin_remarks: row.admin_remarks,
            scores,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn corrupt(id: DbId, err: CoreError) -> CoreError {
    CoreError::Internal(format!("Stored content item {id} is malformed: {err}"))
}

/// Column values written on insert and on versioned update.
#[derive(Debug, Clone)]
pub struct ContentItemWrite {
    pub title: String,
    pub description: Option<String>,
    pub reference_url: Option<String>,
    pub author_id: DbId,
    pub status: &'static str,
    pub production_stage: Option<&'static str>,
    pub rejection_count: i32,
    pub is_dissolved: bool,
    pub videographer_id: Option<DbId>,
    pub editor_id: Option<DbId>,
    pub posting_manager_id: Option<DbId>,
    pub admin_remarks: String,
    pub hook_strength: Option<i16>,
    pub content_quality: Option<i16>,
    pub viral_potential: Option<i16>,
    pub replication_clarity: Option<i16>,
}

impl From<&ContentItem> for ContentItemWrite {
    fn from(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            reference_url: item.reference_url.clone(),
            author_id: item.author_id,
            status: item.status.as_str(),
            production_stage: item.production_stage.map(ProductionStage::as_str),
            rejection_count: item.rejection_count,
            is_dissolved: item.is_dissolved,
            videographer_id: item.assignees.videographer_id,
            editor_id: item.assignees.editor_id,
            posting_manager_id: item.assignees.posting_manager_id,
            admin_remarks: item.admin_remarks.clone(),
            hook_strength: item.scores.map(|s| s.hook_strength),
            content_quality: item.scores.map(|s| s.content_quality),
            viral_potential: item.scores.map(|s| s.viral_potential),
            replication_clarity: item.scores.map(|s| s.replication_clarity),
        }
    }
}
