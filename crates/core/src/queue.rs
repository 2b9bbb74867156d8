//! Work queue selection.

use serde::Deserialize;

use crate::content::ContentItem;
use crate::stage::{ProductionStage, ReviewStatus};
use crate::types::DbId;

/// Default page size for queue listings.
pub const DEFAULT_QUEUE_LIMIT: i64 = 50;

/// Maximum page size for queue listings.
pub const MAX_QUEUE_LIMIT: i64 = 200;

/// An item is active until it is posted or dissolved. Active items count
/// toward their assignees' workload.
pub fn is_active(item: &ContentItem) -> bool {
    !item.is_dissolved && item.production_stage != Some(ProductionStage::Posted)
}

/// Criteria for listing content items, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QueueFilter {
    pub status: Option<ReviewStatus>,
    pub stage: Option<ProductionStage>,
    /// Only items where this person holds any assignment slot.
    pub assignee_id: Option<DbId>,
    /// Include posted and dissolved items.
    #[serde(default)]
    pub include_inactive: bool,
    pub limit: Option<i64>,
}

impl QueueFilter {
    /// Page size clamped to `1..=MAX_QUEUE_LIMIT`.
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_QUEUE_LIMIT)
            .clamp(1, MAX_QUEUE_LIMIT)
    }

    /// In-memory form of the filter, used by non-SQL stores.
    pub fn matches(&self, item: &ContentItem) -> bool {
        if !self.include_inactive && !is_active(item) {
            return false;
        }
        if self.status.is_some_and(|s| s != item.status) {
            return false;
        }
        if self.stage.is_some() && self.stage != item.production_stage {
            return false;
        }
        if self
            .assignee_id
            .is_some_and(|id| !item.assignees.contains(id))
        {
            return false;
        }
        true
    }
}
