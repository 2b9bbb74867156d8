//! Handlers for the person registry.

use axum::extract::{Query, State};
use axum::Json;
use reelflow_db::models::person::PersonWorkload;
use reelflow_db::repositories::PersonRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::RoleParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/people?role=EDITOR
///
/// List people with their current active assignment counts, least loaded
/// first. Admin only.
pub async fn list_people(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<RoleParams>,
) -> AppResult<Json<DataResponse<Vec<PersonWorkload>>>> {
    let role = params.parse_role()?;
    let people = PersonRepo::list_with_workload(&state.pool, role).await?;

    tracing::debug!(
        user_id = admin.user_id,
        role = ?role,
        count = people.len(),
        "Listed people with workload"
    );

    Ok(Json(DataResponse { data: people }))
}
