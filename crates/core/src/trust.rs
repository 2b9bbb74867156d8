//! Auto-approval gate for trusted submitters.

use serde::Serialize;

use crate::content::ContentItem;
use crate::person::Person;
use crate::policy::WorkflowPolicy;
use crate::roles::Role;
use crate::stage::{ProductionStage, ReviewStatus};
use crate::types::Timestamp;

/// Result of passing a new submission through the trust gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateOutcome {
    pub auto_approved: bool,
    pub item: ContentItem,
}

/// Decide whether a fresh submission skips manual review.
///
/// Trusted submitters get `APPROVED` / `NOT_STARTED` immediately; everyone
/// else lands in the review queue as `PENDING` with no stage. Only the trust
/// flag at the time of submission matters. Pickup by a trusted videographer
/// is handled by [`approve_on_pickup`].
pub fn gate_submission(
    item: &ContentItem,
    author: &Person,
    policy: &WorkflowPolicy,
    at: Timestamp,
) -> GateOutcome {
    let mut next = item.clone();

    if policy.auto_approve_trusted && author.is_trusted_writer {
        next.status = ReviewStatus::Approved;
        next.production_stage = Some(ProductionStage::NotStarted);
        let next = next.with_remark(
            &format!(
                "Auto-approved: trusted {} #{}",
                author.role, author.id
            ),
            at,
        );
        return GateOutcome {
            auto_approved: true,
            item: next,
        };
    }

    next.status = ReviewStatus::Pending;
    next.production_stage = None;
    GateOutcome {
        auto_approved: false,
        item: next,
    }
}

/// Approve a pending item as a trusted videographer picks it up.
///
/// Returns `None` when the bypass does not apply; the item then stays in
/// the review queue.
pub fn approve_on_pickup(
    item: &ContentItem,
    picker: &Person,
    policy: &WorkflowPolicy,
    at: Timestamp,
) -> Option<ContentItem> {
    let applies = policy.auto_approve_trusted
        && picker.is_trusted_writer
        && picker.is_active
        && picker.role == Role::Videographer
        && item.status == ReviewStatus::Pending
        && !item.is_dissolved;
    if !applies {
        return None;
    }

    let mut next = item.clone();
    next.status = ReviewStatus::Approved;
    next.production_stage = Some(ProductionStage::NotStarted);
    Some(next.with_remark(
        &format!(
            "Auto-approved: picked up by trusted {} #{}",
            picker.role, picker.id
        ),
        at,
    ))
}
