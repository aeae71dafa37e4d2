use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use mirror_core::catalog::{
    Domain, Question, QuestionCatalog, QuestionSummary, QuestionType, filter_by_type, summarize,
};
use persona_client::types::{ErrorBody, StartPersonaRequest, StartPersonaResponse};
use persona_client::{Client, Stats};
use std::sync::Arc;

pub type ApiError = (StatusCode, Json<ErrorBody>);

/// Shared by every handler. The client carries the server-held key.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<QuestionCatalog>,
    pub client: Client,
}

#[derive(Debug, serde::Serialize)]
pub struct DomainListing {
    #[serde(flatten)]
    pub domain: Domain,
    pub summary: QuestionSummary,
}

#[derive(Debug, serde::Deserialize)]
pub struct QuestionFilter {
    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/domains", get(list_domains))
        .route("/domains/{id}/questions", get(domain_questions))
        .route("/v2/personas/{persona_id}/start", post(start_persona))
        .route("/v2/conversations/{conversation_id}/end", post(end_conversation))
        .route("/stats", get(stats))
        .with_state(state)
}

fn bad_gateway(e: anyhow::Error) -> ApiError {
    tracing::error!("Upstream persona call failed: {:#}", e);
    (StatusCode::BAD_GATEWAY, Json(ErrorBody::new(e.to_string())))
}

pub async fn list_domains(State(state): State<AppState>) -> Json<Vec<DomainListing>> {
    let listings = state
        .catalog
        .domains()
        .iter()
        .map(|domain| DomainListing {
            summary: summarize(state.catalog.lookup(&domain.id)),
            domain: domain.clone(),
        })
        .collect();
    Json(listings)
}

/// Unknown domains answer with an empty list.
pub async fn domain_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(filter): Query<QuestionFilter>,
) -> Json<Vec<Question>> {
    let questions = state.catalog.lookup(&id);
    let questions = match filter.question_type {
        Some(question_type) => filter_by_type(questions, question_type)
            .into_iter()
            .cloned()
            .collect(),
        None => questions.to_vec(),
    };
    Json(questions)
}

pub async fn start_persona(
    State(state): State<AppState>,
    Path(persona_id): Path<String>,
    Json(request): Json<StartPersonaRequest>,
) -> Result<Json<StartPersonaResponse>, ApiError> {
    tracing::info!(
        "Starting persona {} for domain '{}'",
        persona_id,
        request.context().interview_domain()
    );
    state
        .client
        .start_persona(&persona_id, &request)
        .await
        .map(Json)
        .map_err(bad_gateway)
}

pub async fn end_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("Ending conversation {}", conversation_id);
    state
        .client
        .end_conversation(&conversation_id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(bad_gateway)
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    state.client.stats().map(Json).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(e.to_string())),
        )
    })
}
