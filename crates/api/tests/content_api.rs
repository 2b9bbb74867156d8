//! Integration tests for the content workflow API.
//!
//! Each test drives the full router over a fresh database: submission,
//! review, assignment, stage transitions and disapproval.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth};
use reelflow_core::roles::Role;
use reelflow_core::types::DbId;
use reelflow_events::EventBus;
use serde_json::json;
use sqlx::PgPool;

/// The people every workflow test needs.
struct Team {
    admin: DbId,
    writer: DbId,
    videographer: DbId,
    editor: DbId,
    poster: DbId,
}

async fn seed_team(pool: &PgPool) -> Team {
    Team {
        admin: common::create_person(pool, "admin@reelflow.test", Role::Admin, false).await,
        writer: common::create_person(pool, "writer@reelflow.test", Role::ScriptWriter, false)
            .await,
        videographer: common::create_person(
            pool,
            "camera@reelflow.test",
            Role::Videographer,
            false,
        )
        .await,
        editor: common::create_person(pool, "editor@reelflow.test", Role::Editor, false).await,
        poster: common::create_person(pool, "poster@reelflow.test", Role::PostingManager, false)
            .await,
    }
}

fn approve_body() -> serde_json::Value {
    json!({
        "decision": "APPROVE",
        "scores": {
            "hook_strength": 8,
            "content_quality": 7,
            "viral_potential": 9,
            "replication_clarity": 6
        }
    })
}

/// Submit as `writer` and return the new item's id.
async fn submit(pool: &PgPool, writer: DbId, title: &str) -> DbId {
    let token = common::token_for(writer, Role::ScriptWriter);
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/content", json!({ "title": title }), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["item"]["id"]
        .as_i64()
        .unwrap()
}

/// Submit and approve; returns the id of an item at NOT_STARTED.
async fn submit_and_approve(pool: &PgPool, team: &Team, title: &str) -> DbId {
    let id = submit(pool, team.writer, title).await;
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/review"),
        approve_body(),
        &common::token_for(team.admin, Role::Admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    id
}

async fn assign(
    pool: &PgPool,
    id: DbId,
    body: serde_json::Value,
    token: &str,
) -> axum::http::Response<axum::body::Body> {
    let app = common::build_test_app(pool.clone());
    post_json_auth(app, &format!("/api/v1/content/{id}/assign"), body, token).await
}

async fn transition(
    pool: &PgPool,
    id: DbId,
    to: &str,
    token: &str,
) -> axum::http::Response<axum::body::Body> {
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/content/{id}/transition"),
        json!({ "to_stage": to }),
        token,
    )
    .await
}

// ---------------------------------------------------------------------------
// Submission and review
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_requires_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/content", json!({ "title": "No auth" })).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn untrusted_submission_waits_for_review(pool: PgPool) {
    let team = seed_team(&pool).await;
    let token = common::token_for(team.writer, Role::ScriptWriter);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/content",
        json!({
            "title": "Street food in 60 seconds",
            "description": "Fast cuts, three vendors",
            "reference_url": "https://example.com/ref"
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["auto_approved"], false);
    let item = &json["data"]["item"];
    assert_eq!(item["status"], "PENDING");
    assert!(item["production_stage"].is_null());
    assert_eq!(item["author_id"], team.writer);
    assert_eq!(item["version"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trusted_writer_is_auto_approved(pool: PgPool) {
    let writer =
        common::create_person(&pool, "trusted@reelflow.test", Role::ScriptWriter, true).await;
    let token = common::token_for(writer, Role::ScriptWriter);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/content",
        json!({ "title": "Trusted idea" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["auto_approved"], true);
    assert_eq!(json["data"]["item"]["status"], "APPROVED");
    assert_eq!(json["data"]["item"]["production_stage"], "NOT_STARTED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_title_is_rejected(pool: PgPool) {
    let team = seed_team(&pool).await;
    let token = common::token_for(team.writer, Role::ScriptWriter);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/content", json!({ "title": "   " }), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_records_scores_and_overall(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit_and_approve(&pool, &team, "Scored").await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/content/{id}"),
        &common::token_for(team.writer, Role::ScriptWriter),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["status"], "APPROVED");
    assert_eq!(data["production_stage"], "NOT_STARTED");
    assert_eq!(data["scores"]["viral_potential"], 9);
    assert_eq!(data["overall_score"], 7.5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_admin_cannot_review(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit(&pool, team.writer, "Self review").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/review"),
        approve_body(),
        &common::token_for(team.writer, Role::ScriptWriter),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_script_can_be_resubmitted(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit(&pool, team.writer, "Needs work").await;
    let admin = common::token_for(team.admin, Role::Admin);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/review"),
        json!({ "decision": "REJECT", "feedback": "Hook is weak" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await;
    assert_eq!(data["data"]["status"], "REJECTED");
    assert!(data["data"]["admin_remarks"]
        .as_str()
        .unwrap()
        .contains("Hook is weak"));

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/resubmit"),
        json!({}),
        &common::token_for(team.writer, Role::ScriptWriter),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "PENDING");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_item_returns_404(pool: PgPool) {
    let team = seed_team(&pool).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/content/999999",
        &common::token_for(team.admin, Role::Admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Production pipeline
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn item_moves_through_the_full_pipeline(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit_and_approve(&pool, &team, "Full run").await;
    let admin = common::token_for(team.admin, Role::Admin);

    let bus = Arc::new(EventBus::default());
    let mut events = bus.subscribe();

    let app = common::build_test_app_with_bus(pool.clone(), Arc::clone(&bus));
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/assign"),
        json!({
            "videographer": { "mode": "AUTO" },
            "editor": { "mode": "EXPLICIT", "person_id": team.editor },
            "posting_manager": { "mode": "AUTO" }
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let assignees = body_json(response).await["data"]["assignees"].clone();
    assert_eq!(assignees["videographer_id"], team.videographer);
    assert_eq!(assignees["editor_id"], team.editor);
    assert_eq!(assignees["posting_manager_id"], team.poster);

    let camera = common::token_for(team.videographer, Role::Videographer);
    let editor = common::token_for(team.editor, Role::Editor);
    let poster = common::token_for(team.poster, Role::PostingManager);

    for (to, token) in [
        ("PRE_PRODUCTION", &admin),
        ("PLANNED", &admin),
        ("SHOOTING", &camera),
        ("SHOOT_REVIEW", &camera),
        ("EDITING", &admin),
        ("EDIT_REVIEW", &editor),
        ("READY_TO_POST", &admin),
        ("POSTED", &poster),
    ] {
        let response = transition(&pool, id, to, token).await;
        assert_eq!(response.status(), StatusCode::OK, "transition to {to}");
        assert_eq!(body_json(response).await["data"]["production_stage"], to);
    }

    let mut assigned = Vec::new();
    while let Ok(event) = events.try_recv() {
        assigned.push(event);
    }
    assert_eq!(assigned.len(), 3);
    assert!(assigned.iter().all(|e| e.event_type == "content.assigned"));

    // Nothing leaves POSTED.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/content/{id}/transitions"), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn transitions_listing_depends_on_role(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit_and_approve(&pool, &team, "Listing").await;
    let admin = common::token_for(team.admin, Role::Admin);
    let response = assign(
        &pool,
        id,
        json!({ "videographer": { "mode": "EXPLICIT", "person_id": team.videographer } }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    for to in ["PRE_PRODUCTION", "PLANNED"] {
        assert_eq!(transition(&pool, id, to, &admin).await.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/content/{id}/transitions"),
        &common::token_for(team.videographer, Role::Videographer),
    )
    .await;
    let edges = body_json(response).await["data"].clone();
    assert_eq!(edges.as_array().unwrap().len(), 1);
    assert_eq!(edges[0]["to"], "SHOOTING");
    assert_eq!(edges[0]["required_role"], "VIDEOGRAPHER");

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/content/{id}/transitions"),
        &common::token_for(team.editor, Role::Editor),
    )
    .await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unassigned_colleague_cannot_move_the_item(pool: PgPool) {
    let team = seed_team(&pool).await;
    let colleague =
        common::create_person(&pool, "camera2@reelflow.test", Role::Videographer, false).await;
    let id = submit_and_approve(&pool, &team, "Not yours").await;
    let admin = common::token_for(team.admin, Role::Admin);
    let response = assign(
        &pool,
        id,
        json!({ "videographer": { "mode": "EXPLICIT", "person_id": team.videographer } }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    for to in ["PRE_PRODUCTION", "PLANNED"] {
        assert_eq!(transition(&pool, id, to, &admin).await.status(), StatusCode::OK);
    }

    let colleague = common::token_for(colleague, Role::Videographer);
    let response = transition(&pool, id, "SHOOTING", &colleague).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/content/{id}/transitions"), &colleague).await;
    assert_eq!(body_json(response).await["data"], json!([]));

    let camera = common::token_for(team.videographer, Role::Videographer);
    let response = transition(&pool, id, "SHOOTING", &camera).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn skipping_a_stage_is_an_invalid_transition(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit_and_approve(&pool, &team, "Skipper").await;

    let response = transition(
        &pool,
        id,
        "SHOOTING",
        &common::token_for(team.admin, Role::Admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_role_cannot_take_an_edge(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit_and_approve(&pool, &team, "Gatekeeping").await;

    let response = transition(
        &pool,
        id,
        "PRE_PRODUCTION",
        &common::token_for(team.editor, Role::Editor),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_stage_label_is_a_validation_error(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit_and_approve(&pool, &team, "Typo").await;

    let response = transition(
        &pool,
        id,
        "FILMING",
        &common::token_for(team.admin, Role::Admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn auto_assignment_without_candidates_is_422(pool: PgPool) {
    let admin = common::create_person(&pool, "solo@reelflow.test", Role::Admin, false).await;
    let writer =
        common::create_person(&pool, "solo-writer@reelflow.test", Role::ScriptWriter, true).await;
    let id = submit(&pool, writer, "Nobody to edit").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/assign"),
        json!({ "editor": { "mode": "AUTO" } }),
        &common::token_for(admin, Role::Admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "NO_ELIGIBLE_PERSON");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_assignment_checks_role(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit_and_approve(&pool, &team, "Mismatch").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/assign"),
        json!({ "editor": { "mode": "EXPLICIT", "person_id": team.videographer } }),
        &common::token_for(team.admin, Role::Admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "ROLE_MISMATCH");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_assignment_is_400(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit_and_approve(&pool, &team, "Empty").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/assign"),
        json!({}),
        &common::token_for(team.admin, Role::Admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "EMPTY_ASSIGNMENT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn editor_can_pick_up_work_for_themselves_only(pool: PgPool) {
    let team = seed_team(&pool).await;
    let id = submit_and_approve(&pool, &team, "Pick up").await;
    let editor = common::token_for(team.editor, Role::Editor);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/assign"),
        json!({ "videographer": { "mode": "AUTO" } }),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/assign"),
        json!({ "editor": { "mode": "EXPLICIT", "person_id": team.editor } }),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["assignees"]["editor_id"],
        team.editor
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn self_pickup_cannot_take_a_colleagues_slot(pool: PgPool) {
    let team = seed_team(&pool).await;
    let colleague =
        common::create_person(&pool, "camera2@reelflow.test", Role::Videographer, false).await;
    let id = submit_and_approve(&pool, &team, "Taken").await;

    let response = assign(
        &pool,
        id,
        json!({ "videographer": { "mode": "EXPLICIT", "person_id": team.videographer } }),
        &common::token_for(team.admin, Role::Admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = assign(
        &pool,
        id,
        json!({ "videographer": { "mode": "EXPLICIT", "person_id": colleague } }),
        &common::token_for(colleague, Role::Videographer),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/content/{id}"),
        &common::token_for(team.admin, Role::Admin),
    )
    .await;
    assert_eq!(
        body_json(response).await["data"]["assignees"]["videographer_id"],
        team.videographer
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trusted_videographer_pickup_approves_pending_item(pool: PgPool) {
    let team = seed_team(&pool).await;
    let trusted =
        common::create_person(&pool, "trusted-cam@reelflow.test", Role::Videographer, true).await;
    let id = submit(&pool, team.writer, "Pick me").await;

    let response = assign(
        &pool,
        id,
        json!({ "videographer": { "mode": "EXPLICIT", "person_id": team.videographer } }),
        &common::token_for(team.videographer, Role::Videographer),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = assign(
        &pool,
        id,
        json!({ "videographer": { "mode": "EXPLICIT", "person_id": trusted } }),
        &common::token_for(trusted, Role::Videographer),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["status"], "APPROVED");
    assert_eq!(data["production_stage"], "NOT_STARTED");
    assert_eq!(data["assignees"]["videographer_id"], trusted);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_auto_assignments_pick_different_editors(pool: PgPool) {
    let team = seed_team(&pool).await;
    common::create_person(&pool, "editor2@reelflow.test", Role::Editor, false).await;
    let admin = common::token_for(team.admin, Role::Admin);
    let body = json!({ "editor": { "mode": "AUTO" } });

    for round in 0..5 {
        let first = submit_and_approve(&pool, &team, &format!("First {round}")).await;
        let second = submit_and_approve(&pool, &team, &format!("Second {round}")).await;

        let (a, b) = tokio::join!(
            assign(&pool, first, body.clone(), &admin),
            assign(&pool, second, body.clone(), &admin),
        );
        assert_eq!(a.status(), StatusCode::OK);
        assert_eq!(b.status(), StatusCode::OK);
        let a = body_json(a).await["data"]["assignees"]["editor_id"].clone();
        let b = body_json(b).await["data"]["assignees"]["editor_id"].clone();
        assert_ne!(a, b, "round {round} gave both items to the same editor");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn people_listing_reports_workload(pool: PgPool) {
    let team = seed_team(&pool).await;
    let second_editor =
        common::create_person(&pool, "editor2@reelflow.test", Role::Editor, false).await;
    let admin = common::token_for(team.admin, Role::Admin);

    for title in ["One", "Two"] {
        let id = submit_and_approve(&pool, &team, title).await;
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/content/{id}/assign"),
            json!({ "editor": { "mode": "EXPLICIT", "person_id": team.editor } }),
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/people?role=EDITOR", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let people = body_json(response).await["data"].clone();
    let people = people.as_array().unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0]["id"], second_editor);
    assert_eq!(people[0]["active_assignments"], 0);
    assert_eq!(people[1]["id"], team.editor);
    assert_eq!(people[1]["active_assignments"], 2);

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/v1/people",
        &common::token_for(team.editor, Role::Editor),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Disapproval and dissolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_disapproval_dissolves_the_item(pool: PgPool) {
    let team = seed_team(&pool).await;
    let admin = common::token_for(team.admin, Role::Admin);
    let id = submit_and_approve(&pool, &team, "Doomed").await;

    for round in 1..=4 {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/content/{id}/disapprove"),
            json!({ "reason": format!("Round {round}") }),
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "disapproval {round}");
        let data = body_json(response).await["data"].clone();
        assert_eq!(data["rejection_count"], round);

        if round < 4 {
            assert_eq!(data["status"], "PENDING");
            assert_eq!(data["is_dissolved"], false);
            let app = common::build_test_app(pool.clone());
            let response = post_json_auth(
                app,
                &format!("/api/v1/content/{id}/review"),
                approve_body(),
                &admin,
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        } else {
            assert_eq!(data["status"], "REJECTED");
            assert_eq!(data["is_dissolved"], true);
        }
    }

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/content/{id}/review"),
        approve_body(),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(body_json(response).await["code"], "DISSOLVED");

    // Dissolved items drop out of the default queue.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/content", &admin).await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn queue_filters_by_status(pool: PgPool) {
    let team = seed_team(&pool).await;
    let pending = submit(&pool, team.writer, "Waiting").await;
    let approved = submit_and_approve(&pool, &team, "Ready").await;
    let admin = common::token_for(team.admin, Role::Admin);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/content?status=PENDING", &admin).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["id"], pending);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/content?stage=NOT_STARTED", &admin).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["id"], approved);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/content?status=MAYBE", &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_public_but_content_is_not(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    assert_eq!(get(app, "/health").await.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    assert_eq!(
        get(app, "/api/v1/content").await.status(),
        StatusCode::UNAUTHORIZED
    );
}
