//! Handlers for the content production workflow.
//!
//! Every endpoint resolves the caller to a workflow actor and delegates to
//! the [`WorkflowEngine`](reelflow_core::WorkflowEngine); role rules for
//! individual stage edges are enforced there, not here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use reelflow_core::assignment::AssignmentRequest;
use reelflow_core::content::ContentItem;
use reelflow_core::queue::QueueFilter;
use reelflow_core::review::ReviewDecision;
use reelflow_core::stage::ProductionStage;
use reelflow_core::types::DbId;
use reelflow_core::Submission;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::QueueParams;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response DTOs
-------------------------------------------------------------------------- */

/// Body for `POST /content`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitContentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub reference_url: Option<String>,
}

/// Body for `POST /content/{id}/transition`.
#[derive(Debug, Deserialize, Validate)]
pub struct TransitionRequest {
    /// Target stage label, e.g. `"SHOOT_REVIEW"`.
    pub to_stage: String,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

/// Body for `POST /content/{id}/disapprove`.
#[derive(Debug, Deserialize, Validate)]
pub struct DisapproveRequest {
    #[validate(length(min = 1, max = 2000))]
    pub reason: String,
}

/// A content item plus derived fields.
#[derive(Debug, Serialize)]
pub struct ContentItemView {
    #[serde(flatten)]
    pub item: ContentItem,
    pub overall_score: Option<f64>,
}

impl From<ContentItem> for ContentItemView {
    fn from(item: ContentItem) -> Self {
        let overall_score = item.overall_score();
        Self {
            item,
            overall_score,
        }
    }
}

/// Response for `POST /content`.
#[derive(Debug, Serialize)]
pub struct SubmitContentResponse {
    pub auto_approved: bool,
    pub item: ContentItemView,
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// POST /api/v1/content
///
/// Submit a script. Trusted submitters are approved immediately.
pub async fn submit_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitContentRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let submission = Submission {
        title: input.title,
        description: input.description,
        reference_url: input.reference_url,
    };
    let outcome = state.engine.submit(submission, auth.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmitContentResponse {
                auto_approved: outcome.auto_approved,
                item: outcome.item.into(),
            },
        }),
    ))
}

/// GET /api/v1/content
///
/// List content matching the query filters, oldest first.
pub async fn list_content(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<QueueParams>,
) -> AppResult<Json<DataResponse<Vec<ContentItemView>>>> {
    let filter = QueueFilter::try_from(params)?;
    let items = state.engine.queue(&filter).await?;
    Ok(Json(DataResponse {
        data: items.into_iter().map(ContentItemView::from).collect(),
    }))
}

/// GET /api/v1/content/{id}
pub async fn get_content(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContentItemView>>> {
    let item = state.engine.get(id).await?;
    Ok(Json(DataResponse { data: item.into() }))
}

/// GET /api/v1/content/{id}/transitions
///
/// Stage edges the caller may take from the item's current stage.
pub async fn list_transitions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let edges = state
        .engine
        .available_transitions(id, &auth.actor())
        .await?;
    Ok(Json(DataResponse { data: edges }))
}

/// POST /api/v1/content/{id}/review
///
/// Approve a pending script with scores, or reject it with feedback.
pub async fn review_content(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(decision): Json<ReviewDecision>,
) -> AppResult<Json<DataResponse<ContentItemView>>> {
    let item = state.engine.review(id, &decision, &admin.actor()).await?;
    Ok(Json(DataResponse { data: item.into() }))
}

/// POST /api/v1/content/{id}/resubmit
pub async fn resubmit_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContentItemView>>> {
    let item = state.engine.resubmit(id, &auth.actor()).await?;
    Ok(Json(DataResponse { data: item.into() }))
}

/// POST /api/v1/content/{id}/transition
///
/// Move the item along one edge of the stage graph.
pub async fn transition_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<Json<DataResponse<ContentItemView>>> {
    input.validate()?;
    let to: ProductionStage = input.to_stage.parse()?;

    let item = state
        .engine
        .transition(id, to, &auth.actor(), input.note.as_deref())
        .await?;
    Ok(Json(DataResponse { data: item.into() }))
}

/// POST /api/v1/content/{id}/disapprove
///
/// Send an approved item back to review. Dissolves it at the threshold.
pub async fn disapprove_content(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DisapproveRequest>,
) -> AppResult<Json<DataResponse<ContentItemView>>> {
    input.validate()?;
    let item = state
        .engine
        .disapprove(id, &input.reason, &admin.actor())
        .await?;
    Ok(Json(DataResponse { data: item.into() }))
}

/// POST /api/v1/content/{id}/assign
///
/// Fill team slots explicitly or by least load. Non-admins may only assign
/// themselves to their own role's slot.
pub async fn assign_content(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(request): Json<AssignmentRequest>,
) -> AppResult<Json<DataResponse<ContentItemView>>> {
    let item = state.engine.assign(id, &request, &auth.actor()).await?;
    Ok(Json(DataResponse { data: item.into() }))
}
