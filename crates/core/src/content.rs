//! Content items, their scores and their assignment slots.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::remarks::append_remark;
use crate::roles::Role;
use crate::stage::{ProductionStage, ReviewStatus};
use crate::types::{DbId, Timestamp};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length for a content item title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a content item description.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Lowest accepted review score.
pub const MIN_SCORE: i16 = 1;

/// Highest accepted review score.
pub const MAX_SCORE: i16 = 10;

/* --------------------------------------------------------------------------
Scores
-------------------------------------------------------------------------- */

/// The four review ratings an admin gives a script on approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub hook_strength: i16,
    pub content_quality: i16,
    pub viral_potential: i16,
    pub replication_clarity: i16,
}

impl Scores {
    /// Build a score set, rejecting any rating outside `1..=10`.
    pub fn new(
        hook_strength: i16,
        content_quality: i16,
        viral_potential: i16,
        replication_clarity: i16,
    ) -> Result<Self, CoreError> {
        let scores = Self {
            hook_strength,
            content_quality,
            viral_potential,
            replication_clarity,
        };
        scores.validate()?;
        Ok(scores)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let named = [
            ("hook_strength", self.hook_strength),
            ("content_quality", self.content_quality),
            ("viral_potential", self.viral_potential),
            ("replication_clarity", self.replication_clarity),
        ];
        for (name, value) in named {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(CoreError::Validation(format!(
                    "{name} must be between {MIN_SCORE} and {MAX_SCORE}, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Arithmetic mean of the four ratings.
    pub fn overall(&self) -> f64 {
        let sum = i32::from(self.hook_strength)
            + i32::from(self.content_quality)
            + i32::from(self.viral_potential)
            + i32::from(self.replication_clarity);
        f64::from(sum) / 4.0
    }
}

/* --------------------------------------------------------------------------
Assignees
-------------------------------------------------------------------------- */

/// Per-role assignment slots. Each slot is set independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignees {
    pub videographer_id: Option<DbId>,
    pub editor_id: Option<DbId>,
    pub posting_manager_id: Option<DbId>,
}

impl Assignees {
    /// Person assigned to `role`, if the role has a slot and it is filled.
    pub fn get(&self, role: Role) -> Option<DbId> {
        match role {
            Role::Videographer => self.videographer_id,
            Role::Editor => self.editor_id,
            Role::PostingManager => self.posting_manager_id,
            _ => None,
        }
    }

    /// Fill the slot for `role`.
    pub fn set(&mut self, role: Role, person_id: DbId) -> Result<(), CoreError> {
        let slot = match role {
            Role::Videographer => &mut self.videographer_id,
            Role::Editor => &mut self.editor_id,
            Role::PostingManager => &mut self.posting_manager_id,
            other => {
                return Err(CoreError::Validation(format!(
                    "Role {other} has no assignment slot"
                )))
            }
        };
        *slot = Some(person_id);
        Ok(())
    }

    /// Every filled slot's person id.
    pub fn people(&self) -> Vec<DbId> {
        [self.videographer_id, self.editor_id, self.posting_manager_id]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn contains(&self, person_id: DbId) -> bool {
        self.people().contains(&person_id)
    }
}

/* --------------------------------------------------------------------------
ContentItem
-------------------------------------------------------------------------- */

/// A single piece of content moving through the production pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub reference_url: Option<String>,
    pub author_id: DbId,
    pub status: ReviewStatus,
    pub production_stage: Option<ProductionStage>,
    pub rejection_count: i32,
    pub is_dissolved: bool,
    pub assignees: Assignees,
    pub admin_remarks: String,
    pub scores: Option<Scores>,
    /// Optimistic concurrency token; the store bumps it on every save.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContentItem {
    /// Build an unsaved submission. The store assigns `id` on insert.
    pub fn draft(
        title: impl Into<String>,
        description: Option<String>,
        reference_url: Option<String>,
        author_id: DbId,
        at: Timestamp,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description,
            reference_url,
            author_id,
            status: ReviewStatus::Pending,
            production_stage: None,
            rejection_count: 0,
            is_dissolved: false,
            assignees: Assignees::default(),
            admin_remarks: String::new(),
            scores: None,
            version: 0,
            created_at: at,
            updated_at: at,
        }
    }

    /// Stage used for transition decisions. An approved item with no stage
    /// yet is treated as [`ProductionStage::NotStarted`].
    pub fn effective_stage(&self) -> Option<ProductionStage> {
        match self.status {
            ReviewStatus::Approved => {
                Some(self.production_stage.unwrap_or(ProductionStage::NotStarted))
            }
            _ => None,
        }
    }

    /// Derived mean of the review scores, if the item has been scored.
    pub fn overall_score(&self) -> Option<f64> {
        self.scores.as_ref().map(Scores::overall)
    }

    /// Append a timestamped remark, returning the updated item.
    pub fn with_remark(mut self, text: &str, at: Timestamp) -> Self {
        self.admin_remarks = append_remark(&self.admin_remarks, text, at);
        self.updated_at = at;
        self
    }

    /// Fail with [`CoreError::Dissolved`] if the item is dissolved.
    pub fn ensure_not_dissolved(&self) -> Result<(), CoreError> {
        if self.is_dissolved {
            return Err(CoreError::Dissolved { id: self.id });
        }
        Ok(())
    }
}

/// Validate user-supplied submission fields.
pub fn validate_submission(title: &str, description: Option<&str>) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    if let Some(d) = description {
        if d.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(CoreError::Validation(format!(
                "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
