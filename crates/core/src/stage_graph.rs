//! The production stage graph.
//!
//! One static table of edges is the single source of truth for which stage
//! may follow which, and who may move an item along each edge. Every other
//! module (validator, API transition listing) reads this table.

use serde::Serialize;

use crate::roles::Role;
use crate::stage::ProductionStage;
use crate::stage::ProductionStage::*;

/// A permitted move between two production stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageEdge {
    pub from: ProductionStage,
    pub to: ProductionStage,
    /// Role allowed to take this edge. Admins may take any edge.
    pub required_role: Role,
    /// Human-readable action name.
    pub label: &'static str,
    /// Backward edges (reshoot, revision) must carry a note.
    pub requires_note: bool,
}

const fn edge(
    from: ProductionStage,
    to: ProductionStage,
    required_role: Role,
    label: &'static str,
    requires_note: bool,
) -> StageEdge {
    StageEdge {
        from,
        to,
        required_role,
        label,
        requires_note,
    }
}

/// Every permitted stage transition.
pub const STAGE_GRAPH: &[StageEdge] = &[
    edge(NotStarted, PreProduction, Role::Admin, "Start pre-production", false),
    edge(PreProduction, Planned, Role::Admin, "Mark planned", false),
    edge(Planned, Shooting, Role::Videographer, "Start shoot", false),
    edge(Shooting, ShootReview, Role::Videographer, "Submit footage", false),
    edge(ShootReview, Editing, Role::Admin, "Approve footage", false),
    edge(ShootReview, Shooting, Role::Admin, "Request reshoot", true),
    edge(Editing, EditReview, Role::Editor, "Submit edit", false),
    edge(EditReview, ReadyToPost, Role::Admin, "Approve edit", false),
    edge(EditReview, Editing, Role::Admin, "Request revision", true),
    edge(ReadyToPost, Posted, Role::PostingManager, "Mark posted", false),
];

impl StageEdge {
    /// Whether `role` may take this edge.
    pub fn permits(&self, role: Role) -> bool {
        role.is_admin() || role == self.required_role
    }
}

/// All edges leaving `from`.
pub fn edges_from(from: ProductionStage) -> impl Iterator<Item = &'static StageEdge> {
    STAGE_GRAPH.iter().filter(move |e| e.from == from)
}

/// The edge `from -> to`, if the graph has one.
pub fn find_edge(from: ProductionStage, to: ProductionStage) -> Option<&'static StageEdge> {
    STAGE_GRAPH.iter().find(|e| e.from == from && e.to == to)
}

/// Edges leaving `from` that `role` is permitted to take.
pub fn available_transitions(from: ProductionStage, role: Role) -> Vec<&'static StageEdge> {
    edges_from(from).filter(|e| e.permits(role)).collect()
}

/// A stage with no outgoing edges.
pub fn is_terminal(stage: ProductionStage) -> bool {
    edges_from(stage).next().is_none()
}
