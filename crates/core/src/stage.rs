//! Review status and production stage vocabularies.

use crate::macros::define_workflow_enum;

define_workflow_enum! {
    /// Script review outcome.
    ReviewStatus, "review status" {
        Pending = "PENDING",
        Approved = "APPROVED",
        Rejected = "REJECTED",
    }
}

define_workflow_enum! {
    /// Production phase of an approved content item, in pipeline order.
    ProductionStage, "production stage" {
        NotStarted = "NOT_STARTED",
        PreProduction = "PRE_PRODUCTION",
        Planned = "PLANNED",
        Shooting = "SHOOTING",
        ShootReview = "SHOOT_REVIEW",
        Editing = "EDITING",
        EditReview = "EDIT_REVIEW",
        ReadyToPost = "READY_TO_POST",
        Posted = "POSTED",
    }
}

impl ProductionStage {
    /// Stages at which an approved item may still be disapproved.
    pub const DISAPPROVABLE: &'static [ProductionStage] = &[
        ProductionStage::NotStarted,
        ProductionStage::PreProduction,
        ProductionStage::Planned,
        ProductionStage::Shooting,
        ProductionStage::ShootReview,
    ];

    pub fn is_terminal(self) -> bool {
        self == ProductionStage::Posted
    }
}
