//! Business policy knobs for the workflow engine.

use serde::{Deserialize, Serialize};

/// Number of disapprovals after which a content item is dissolved.
pub const DEFAULT_DISSOLUTION_THRESHOLD: i32 = 4;

/// How many times a conflicted write is retried with a fresh read.
pub const CONFLICT_RETRIES: u32 = 1;

/// Overridable workflow policy. Hosts load this from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPolicy {
    /// `rejection_count` at or above this dissolves the item.
    pub dissolution_threshold: i32,
    /// Whether trusted submitters bypass manual script review.
    pub auto_approve_trusted: bool,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            dissolution_threshold: DEFAULT_DISSOLUTION_THRESHOLD,
            auto_approve_trusted: true,
        }
    }
}

impl WorkflowPolicy {
    /// The dissolution threshold must be at least one.
    pub fn validate(&self) -> Result<(), crate::error::CoreError> {
        if self.dissolution_threshold < 1 {
            return Err(crate::error::CoreError::Validation(format!(
                "dissolution_threshold must be at least 1, got {}",
                self.dissolution_threshold
            )));
        }
        Ok(())
    }
}
