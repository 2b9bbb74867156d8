//! Admin script review and writer resubmission.

use serde::Deserialize;

use crate::content::{ContentItem, Scores};
use crate::error::CoreError;
use crate::roles::Actor;
use crate::stage::{ProductionStage, ReviewStatus};
use crate::types::Timestamp;

/// Maximum length for review feedback.
pub const MAX_FEEDBACK_LENGTH: usize = 2_000;

/// An admin's decision on a pending script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "decision", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewDecision {
    Approve { scores: Scores },
    Reject { feedback: String },
}

/// Apply a review decision to a pending item.
pub fn review_script(
    item: &ContentItem,
    decision: &ReviewDecision,
    actor: &Actor,
    at: Timestamp,
) -> Result<ContentItem, CoreError> {
    item.ensure_not_dissolved()?;

    if !actor.is_admin() {
        return Err(CoreError::Forbidden(
            "Only admins can review scripts".to_string(),
        ));
    }

    if item.status != ReviewStatus::Pending {
        return Err(CoreError::InvalidTransition(format!(
            "Content item {} is {}; only PENDING scripts can be reviewed",
            item.id, item.status
        )));
    }

    let mut next = item.clone();
    let remark = match decision {
        ReviewDecision::Approve { scores } => {
            scores.validate()?;
            next.status = ReviewStatus::Approved;
            next.production_stage = Some(ProductionStage::NotStarted);
            next.scores = Some(*scores);
            format!(
                "Script approved by {} #{} (overall {:.2})",
                actor.role,
                actor.id,
                scores.overall()
            )
        }
        ReviewDecision::Reject { feedback } => {
            let feedback = validate_feedback(feedback)?;
            next.status = ReviewStatus::Rejected;
            next.production_stage = None;
            format!("Script rejected by {} #{}: {feedback}", actor.role, actor.id)
        }
    };

    Ok(next.with_remark(&remark, at))
}

/// Move a rejected script back to the review queue.
///
/// Allowed for the original author and for admins.
pub fn resubmit(
    item: &ContentItem,
    actor: &Actor,
    at: Timestamp,
) -> Result<ContentItem, CoreError> {
    item.ensure_not_dissolved()?;

    if actor.id != item.author_id && !actor.is_admin() {
        return Err(CoreError::Forbidden(
            "Only the author or an admin can resubmit a script".to_string(),
        ));
    }

    if item.status != ReviewStatus::Rejected {
        return Err(CoreError::InvalidTransition(format!(
            "Content item {} is {}; only REJECTED scripts can be resubmitted",
            item.id, item.status
        )));
    }

    let mut next = item.clone();
    next.status = ReviewStatus::Pending;
    next.production_stage = None;
    Ok(next.with_remark(
        &format!("Resubmitted by {} #{}", actor.role, actor.id),
        at,
    ))
}

fn validate_feedback(feedback: &str) -> Result<&str, CoreError> {
    let feedback = feedback.trim();
    if feedback.is_empty() {
        return Err(CoreError::Validation(
            "Feedback is required when rejecting a script".to_string(),
        ));
    }
    if feedback.chars().count() > MAX_FEEDBACK_LENGTH {
        return Err(CoreError::Validation(format!(
            "Feedback exceeds maximum length of {MAX_FEEDBACK_LENGTH} characters"
        )));
    }
    Ok(feedback)
}
