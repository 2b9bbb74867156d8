use axum::routing::get;
use axum::Router;

use crate::handlers::people;
use crate::state::AppState;

/// People routes, nested under `/people`.
///
/// ```text
/// GET    /                       list_people (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(people::list_people))
}
