//! HTTP routes.

use crate::error::ServerError;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use voxgpt_skill::{RequestEnvelope, ResponseEnvelope, SkillApp};

/// Builds the router: `POST /skill` and `GET /health`.
pub fn router(skill: Arc<SkillApp>) -> Router {
    Router::new()
        .route("/skill", post(skill_request))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(skill)
}

async fn skill_request(
    State(skill): State<Arc<SkillApp>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, ServerError> {
    let response = skill.process(envelope).await?;
    Ok(Json(response))
}

async fn health() -> &'static str {
    "ok"
}
