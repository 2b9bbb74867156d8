//! Stage transition validation.

use crate::content::ContentItem;
use crate::error::CoreError;
use crate::roles::Actor;
use crate::stage::ProductionStage;
use crate::stage_graph::{find_edge, StageEdge};
use crate::types::Timestamp;

/// Check that `actor` may move `item` to `requested` and return the updated
/// item with the new stage and an audit remark. Nothing is persisted.
///
/// Checks run in this order: dissolution, approval status, graph edge,
/// actor role, the actor's assignment, then the note requirement of
/// backward edges.
pub fn validate_transition(
    item: &ContentItem,
    requested: ProductionStage,
    actor: &Actor,
    note: Option<&str>,
    at: Timestamp,
) -> Result<ContentItem, CoreError> {
    item.ensure_not_dissolved()?;

    let current = match item.effective_stage() {
        Some(stage) => stage,
        None => {
            return Err(CoreError::InvalidTransition(format!(
                "Content item {} is {} and has no production stage",
                item.id, item.status
            )))
        }
    };

    let edge = resolve_edge(current, requested)?;

    if !edge.permits(actor.role) {
        return Err(CoreError::Forbidden(format!(
            "{} requires role {}, actor has {}",
            edge.label, edge.required_role, actor.role
        )));
    }

    if !actor_may_take(edge, item, actor) {
        return Err(CoreError::Forbidden(format!(
            "{} on content item {} is reserved for its assigned {}",
            edge.label, item.id, edge.required_role
        )));
    }

    let note = note.map(str::trim).filter(|n| !n.is_empty());
    if edge.requires_note && note.is_none() {
        return Err(CoreError::Validation(format!(
            "{} requires a note explaining the request",
            edge.label
        )));
    }

    let mut remark = format!(
        "{}: {current} -> {requested} by {} #{}",
        edge.label, actor.role, actor.id
    );
    if let Some(n) = note {
        remark.push_str(&format!(" ({n})"));
    }

    let mut next = item.clone().with_remark(&remark, at);
    next.production_stage = Some(requested);
    Ok(next)
}

/// Admins may take any edge. Everyone else needs the edge's role and must
/// hold that role's assignment slot on the item.
pub fn actor_may_take(edge: &StageEdge, item: &ContentItem, actor: &Actor) -> bool {
    if actor.is_admin() {
        return true;
    }
    edge.permits(actor.role) && item.assignees.get(edge.required_role) == Some(actor.id)
}

fn resolve_edge(
    current: ProductionStage,
    requested: ProductionStage,
) -> Result<&'static StageEdge, CoreError> {
    find_edge(current, requested).ok_or_else(|| {
        if current.is_terminal() {
            CoreError::InvalidTransition(format!("{current} is terminal"))
        } else {
            CoreError::InvalidTransition(format!("{current} cannot move to {requested}"))
        }
    })
}
