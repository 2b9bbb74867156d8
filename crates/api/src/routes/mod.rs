pub mod content;
pub mod health;
pub mod people;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /content                         submit, queue listing
/// /content/{id}                    fetch
/// /content/{id}/transitions        edges available to the caller
/// /content/{id}/review             admin script review
/// /content/{id}/resubmit           resubmit rejected script
/// /content/{id}/transition         stage transition
/// /content/{id}/disapprove         admin disapproval
/// /content/{id}/assign             team assignment
///
/// /people                          people with workload (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/content", content::router())
        .nest("/people", people::router())
}
