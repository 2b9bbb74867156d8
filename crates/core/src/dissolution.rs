//! Disapproval of approved content and dissolution after repeated rejection.
//!
//! Disapproving sends an approved item back to the review queue and bumps
//! its `rejection_count`. Once the count reaches the policy threshold the
//! item is dissolved: it leaves every active queue and accepts no further
//! changes. There is no path back from dissolution.

use crate::content::ContentItem;
use crate::error::CoreError;
use crate::policy::WorkflowPolicy;
use crate::roles::Actor;
use crate::stage::{ProductionStage, ReviewStatus};
use crate::types::Timestamp;

/// Whether `item` is in a state that permits disapproval.
pub fn can_disapprove(item: &ContentItem) -> bool {
    !item.is_dissolved
        && item
            .effective_stage()
            .is_some_and(|s| ProductionStage::DISAPPROVABLE.contains(&s))
}

/// Disapprove an approved item, dissolving it when the rejection count
/// reaches `policy.dissolution_threshold`.
pub fn disapprove(
    item: &ContentItem,
    reason: &str,
    actor: &Actor,
    policy: &WorkflowPolicy,
    at: Timestamp,
) -> Result<ContentItem, CoreError> {
    item.ensure_not_dissolved()?;

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(CoreError::Validation(
            "A reason is required to disapprove content".to_string(),
        ));
    }

    if !actor.is_admin() {
        return Err(CoreError::Forbidden(
            "Only admins can disapprove content".to_string(),
        ));
    }

    let stage = item.effective_stage().ok_or_else(|| {
        CoreError::InvalidTransition(format!(
            "Content item {} is {}; only approved content can be disapproved",
            item.id, item.status
        ))
    })?;

    if !ProductionStage::DISAPPROVABLE.contains(&stage) {
        return Err(CoreError::InvalidTransition(format!(
            "Content item {} is in {stage}; disapproval is only allowed up to {}",
            item.id,
            ProductionStage::ShootReview
        )));
    }

    let mut next = item.clone();
    next.rejection_count += 1;
    next.production_stage = None;
    let count = next.rejection_count;

    if count >= policy.dissolution_threshold {
        next.is_dissolved = true;
        next.status = ReviewStatus::Rejected;
        tracing::info!(
            content_id = item.id,
            rejection_count = count,
            "Content dissolved"
        );
        return Ok(next.with_remark(
            &format!(
                "Dissolved after {count} rejections by {} #{}: {reason}",
                actor.role, actor.id
            ),
            at,
        ));
    }

    next.status = ReviewStatus::Pending;
    Ok(next.with_remark(
        &format!(
            "Disapproved at {stage} ({count}/{}) by {} #{}: {reason}",
            policy.dissolution_threshold, actor.role, actor.id
        ),
        at,
    ))
}
