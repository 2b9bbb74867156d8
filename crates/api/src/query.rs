//! Shared query parameter types for API handlers.
//!
//! Enum-valued parameters arrive as raw strings and are parsed once here so
//! bad values produce the standard JSON validation error.

use reelflow_core::error::CoreError;
use reelflow_core::queue::QueueFilter;
use reelflow_core::roles::Role;
use reelflow_core::stage::{ProductionStage, ReviewStatus};
use reelflow_core::types::DbId;
use serde::Deserialize;

/// `GET /content` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct QueueParams {
    pub status: Option<String>,
    pub stage: Option<String>,
    pub assignee_id: Option<DbId>,
    #[serde(default)]
    pub include_inactive: bool,
    pub limit: Option<i64>,
}

impl TryFrom<QueueParams> for QueueFilter {
    type Error = CoreError;

    fn try_from(params: QueueParams) -> Result<Self, Self::Error> {
        Ok(QueueFilter {
            status: params
                .status
                .as_deref()
                .map(str::parse::<ReviewStatus>)
                .transpose()?,
            stage: params
                .stage
                .as_deref()
                .map(str::parse::<ProductionStage>)
                .transpose()?,
            assignee_id: params.assignee_id,
            include_inactive: params.include_inactive,
            limit: params.limit,
        })
    }
}

/// `?role=` filter for people listings.
#[derive(Debug, Default, Deserialize)]
pub struct RoleParams {
    pub role: Option<String>,
}

impl RoleParams {
    pub fn parse_role(&self) -> Result<Option<Role>, CoreError> {
        self.role.as_deref().map(str::parse::<Role>).transpose()
    }
}
