//! Collaborator interfaces the workflow engine depends on.
//!
//! The engine never touches a database or a message channel directly; the
//! host supplies implementations of these traits.

use async_trait::async_trait;
use serde::Serialize;

use crate::assignment::Candidate;
use crate::content::ContentItem;
use crate::error::CoreError;
use crate::person::Person;
use crate::queue::QueueFilter;
use crate::roles::Role;
use crate::stage::ProductionStage;
use crate::types::DbId;

/// Builds the assigned item from the locked item and the candidates for the
/// auto-assigned roles.
pub type AssignmentDecision<'a> =
    dyn Fn(&ContentItem, &[Candidate]) -> Result<ContentItem, CoreError> + Send + Sync + 'a;

/// Durable storage of content items.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Load an item, or [`CoreError::NotFound`].
    async fn load_item(&self, id: DbId) -> Result<ContentItem, CoreError>;

    /// Insert a new item and return it with its assigned id and version.
    async fn insert_item(&self, item: &ContentItem) -> Result<ContentItem, CoreError>;

    /// Write `item` if the stored version still equals `item.version`.
    ///
    /// Returns the stored item with its bumped version, or
    /// [`CoreError::Conflict`] when another writer got there first.
    async fn save_item(&self, item: &ContentItem) -> Result<ContentItem, CoreError>;

    /// List items matching `filter`, oldest first.
    async fn list_items(&self, filter: &QueueFilter) -> Result<Vec<ContentItem>, CoreError>;

    /// Load `id` and the active members of `auto_roles` with their current
    /// workload, let `decide` build the new item, and save it, all as one
    /// atomic step. Concurrent assignments are serialized, so no two of them
    /// decide from the same workload counts.
    ///
    /// Returns the item as loaded and as saved.
    async fn save_assignment(
        &self,
        id: DbId,
        auto_roles: &[Role],
        decide: &AssignmentDecision<'_>,
    ) -> Result<(ContentItem, ContentItem), CoreError>;
}

/// Read access to the person registry.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Look up a person, or [`CoreError::NotFound`].
    async fn get_person(&self, id: DbId) -> Result<Person, CoreError>;

    /// Every person holding `role`, including inactive ones.
    async fn list_by_role(&self, role: Role) -> Result<Vec<Person>, CoreError>;

    /// Number of active (not posted, not dissolved) items assigned to the
    /// person in any slot.
    async fn count_active_assignments(&self, person_id: DbId) -> Result<i64, CoreError>;
}

/// Best-effort notification sink. Failures are the sink's to log.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &WorkflowEvent, item: &ContentItem, recipients: &[DbId]);
}

/// Something that happened to a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkflowEvent {
    Submitted,
    AutoApproved,
    Approved,
    Rejected,
    Resubmitted,
    StageChanged {
        from: Option<ProductionStage>,
        to: ProductionStage,
    },
    Posted,
    Disapproved { rejection_count: i32 },
    Dissolved { rejection_count: i32 },
    Assigned { role: Role, person_id: DbId },
}

impl WorkflowEvent {
    /// Dot-separated event name, e.g. `"content.posted"`.
    pub fn event_type(&self) -> &'static str {
        match self {
            WorkflowEvent::Submitted => "content.submitted",
            WorkflowEvent::AutoApproved => "content.auto_approved",
            WorkflowEvent::Approved => "content.approved",
            WorkflowEvent::Rejected => "content.rejected",
            WorkflowEvent::Resubmitted => "content.resubmitted",
            WorkflowEvent::StageChanged { .. } => "content.stage_changed",
            WorkflowEvent::Posted => "content.posted",
            WorkflowEvent::Disapproved { .. } => "content.disapproved",
            WorkflowEvent::Dissolved { .. } => "content.dissolved",
            WorkflowEvent::Assigned { .. } => "content.assigned",
        }
    }
}
