//! Reelflow domain core.
//!
//! Pure workflow rules for content moving from script submission to a
//! posted video, plus the engine that runs them against host-supplied
//! collaborators:
//!
//! - [`stage_graph`] -- the allowed production stage transitions.
//! - [`transition`] -- validates a requested stage change.
//! - [`review`] -- admin script review and resubmission.
//! - [`dissolution`] -- disapproval counting and dissolution.
//! - [`trust`] -- auto-approval for trusted submitters.
//! - [`assignment`] -- explicit and least-loaded team assignment.
//! - [`remarks`] -- the append-only audit log.
//! - [`engine`] -- load, decide, versioned save, notify.

mod macros;

pub mod assignment;
pub mod content;
pub mod dissolution;
pub mod engine;
pub mod error;
pub mod person;
pub mod policy;
pub mod queue;
pub mod remarks;
pub mod review;
pub mod roles;
pub mod stage;
pub mod stage_graph;
pub mod store;
pub mod transition;
pub mod trust;
pub mod types;

pub use engine::{Submission, WorkflowEngine};
