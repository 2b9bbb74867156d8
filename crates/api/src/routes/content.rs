//! Route definitions for the content workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Content routes, nested under `/content`.
///
/// ```text
/// POST   /                       submit_content
/// GET    /                       list_content
/// GET    /{id}                   get_content
/// GET    /{id}/transitions       list_transitions
/// POST   /{id}/review            review_content (admin)
/// POST   /{id}/resubmit          resubmit_content
/// POST   /{id}/transition        transition_content
/// POST   /{id}/disapprove        disapprove_content (admin)
/// POST   /{id}/assign            assign_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(content::submit_content).get(content::list_content))
        .route("/{id}", get(content::get_content))
        .route("/{id}/transitions", get(content::list_transitions))
        .route("/{id}/review", post(content::review_content))
        .route("/{id}/resubmit", post(content::resubmit_content))
        .route("/{id}/transition", post(content::transition_content))
        .route("/{id}/disapprove", post(content::disapprove_content))
        .route("/{id}/assign", post(content::assign_content))
}
