//! Learner path, lesson play and progress API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL environment variable before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::fixtures;
use common::TestContext;
use leshono_core::{Exercise, ExerciseResponse};

struct Learner {
    ctx: TestContext,
    server: TestServer,
    device_id: uuid::Uuid,
    auth: String,
}

impl Learner {
    async fn new() -> Self {
        let ctx = TestContext::new().await;
        let server = TestServer::new(ctx.router()).unwrap();
        let (device_id, token) = ctx.create_test_device(None).await;
        Self {
            ctx,
            server,
            device_id,
            auth: TestContext::auth_header_value(&token),
        }
    }

    async fn get(&self, path: &str) -> axum_test::TestResponse {
        self.server
            .get(path)
            .add_header(axum::http::header::AUTHORIZATION, self.auth.clone())
            .await
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> axum_test::TestResponse {
        self.server
            .post(path)
            .add_header(axum::http::header::AUTHORIZATION, self.auth.clone())
            .json(&body)
            .await
    }

    async fn complete(&self, lesson_id: &str) -> serde_json::Value {
        let response = self
            .post(&format!("/api/lessons/{}/complete", lesson_id), json!({}))
            .await;
        response.assert_status_ok();
        response.json()
    }

    async fn cleanup(self) {
        self.ctx.cleanup_device(self.device_id).await;
    }
}

/// Correct response for an exercise.
fn correct_response(exercise: &Exercise) -> ExerciseResponse {
    match exercise {
        Exercise::Match { pairs } => ExerciseResponse::Pair {
            left: pairs[0].0.clone(),
            right: pairs[0].1.clone(),
        },
        Exercise::Select { answer, .. } => ExerciseResponse::Choice(answer.clone()),
        Exercise::TrueFalse { answer, .. } => ExerciseResponse::Boolean(*answer),
        Exercise::Type { answer, .. } | Exercise::Fill { answer, .. } => {
            ExerciseResponse::Text(answer.clone())
        }
        Exercise::Arrange { answer, .. } => {
            ExerciseResponse::Tokens(answer.split(' ').map(str::to_string).collect())
        }
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_path_starts_with_first_lesson_unlocked() {
    let learner = Learner::new().await;

    let response = learner.get("/api/path").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let lessons = body["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 6);
    assert_eq!(lessons[0]["lesson_id"], "unit:1.1");
    assert_eq!(lessons[0]["unlocked"], true);
    assert_eq!(lessons[1]["unlocked"], false);
    assert_eq!(body["active_lesson"], "unit:1.1");

    learner.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_locked_lesson_is_forbidden() {
    let learner = Learner::new().await;

    learner
        .post("/api/lessons/1.1.2/start", json!({}))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    learner
        .post("/api/lessons/1.1.2/complete", json!({}))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    learner.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_lesson_not_on_path() {
    let learner = Learner::new().await;

    learner
        .post("/api/lessons/9.9.9/start", json!({}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    learner.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_play_lesson() {
    let learner = Learner::new().await;
    let lesson = learner.ctx.catalog.lesson("unit:1.1").unwrap().clone();

    let response = learner.post("/api/lessons/unit:1.1/start", json!({})).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["hearts"], 5);
    assert_eq!(body["lesson"]["id"], "unit:1.1");

    // Right answer keeps hearts
    let right = correct_response(&lesson.exercises[1]);
    let response = learner
        .post(
            "/api/lessons/unit:1.1/check",
            fixtures::check_request(1, serde_json::to_value(right).unwrap()),
        )
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["correct"], true);
    assert_eq!(body["hearts"], 5);

    // Wrong shape costs a heart and reveals the answer
    let response = learner
        .post(
            "/api/lessons/unit:1.1/check",
            fixtures::check_request(1, json!({"kind": "boolean", "value": true})),
        )
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["correct"], false);
    assert_eq!(body["hearts"], 4);
    assert!(!body["expected"].as_str().unwrap().is_empty());

    learner
        .post(
            "/api/lessons/unit:1.1/check",
            fixtures::check_request(99, json!({"kind": "text", "value": "x"})),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    learner.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_complete_unlocks_next_and_awards_xp() {
    let learner = Learner::new().await;

    let body = learner.complete("unit:1.1").await;
    assert_eq!(body["xp_gained"], 10);
    assert_eq!(body["total_xp"], 10);
    assert_eq!(body["streak"], 1);
    assert_eq!(body["next_lesson"], "1.1.2");

    learner.complete("1.1.2").await;
    let body = learner.complete("review:1.1").await;
    assert_eq!(body["xp_gained"], 15);
    assert_eq!(body["total_xp"], 35);
    assert_eq!(body["next_lesson"], "unit:1.2");

    let path: serde_json::Value = learner.get("/api/path").await.json();
    assert_eq!(path["lessons"][3]["unlocked"], true);
    assert_eq!(path["lessons"][4]["unlocked"], false);
    assert_eq!(path["active_lesson"], "unit:1.2");

    let progress: serde_json::Value = learner.get("/api/progress").await.json();
    assert_eq!(progress["xp"], 35);
    assert_eq!(progress["completed_count"], 3);
    assert_eq!(progress["daily_goal_met"], true);
    assert_eq!(progress["tiers"][0]["done"], 3);
    assert_eq!(progress["tiers"][0]["percent"], 50);

    learner.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_goal() {
    let learner = Learner::new().await;

    let response = learner
        .server
        .put("/api/progress/goal")
        .add_header(axum::http::header::AUTHORIZATION, learner.auth.clone())
        .json(&fixtures::goal_request(50))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["daily_goal"], 50);

    let response = learner
        .server
        .put("/api/progress/goal")
        .add_header(axum::http::header::AUTHORIZATION, learner.auth.clone())
        .json(&fixtures::goal_request(0))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    learner.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_reset_progress() {
    let learner = Learner::new().await;
    learner.complete("unit:1.1").await;

    let response = learner.post("/api/progress/reset", json!({})).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["xp"], 0);
    assert_eq!(body["completed_count"], 0);

    learner
        .post("/api/lessons/1.1.2/start", json!({}))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    learner.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_overlapping_completions_both_count() {
    let learner = Learner::new().await;

    let (a, b) = tokio::join!(learner.complete("unit:1.1"), learner.complete("unit:1.1"));
    assert_eq!(a["xp_gained"], 10);
    assert_eq!(b["xp_gained"], 10);

    let progress: serde_json::Value = learner.get("/api/progress").await.json();
    assert_eq!(progress["xp"], 20);
    assert_eq!(progress["completed_count"], 1);

    learner.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_overlapping_answers_each_cost_a_heart() {
    let learner = Learner::new().await;
    let wrong = || {
        learner.post(
            "/api/lessons/unit:1.1/check",
            fixtures::check_request(1, json!({"kind": "boolean", "value": true})),
        )
    };

    let (a, b, c) = tokio::join!(wrong(), wrong(), wrong());
    for response in [a, b, c] {
        response.assert_status_ok();
    }

    let progress: serde_json::Value = learner.get("/api/progress").await.json();
    assert_eq!(progress["hearts"], 2);

    learner.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_failed_update_leaves_progress_unchanged() {
    let learner = Learner::new().await;
    learner.complete("unit:1.1").await;

    let result = learner
        .ctx
        .db
        .update_progress(learner.device_id, |progress| {
            progress.xp += 500;
            progress.set_daily_goal(0)?;
            Ok(())
        })
        .await;
    assert!(result.is_err());

    let progress = learner.ctx.db.get_progress(learner.device_id).await.unwrap();
    assert_eq!(progress.xp, 10);
    assert_eq!(progress.daily_goal, 20);

    learner.cleanup().await;
}
