//! HTTP handlers for the form page and the JSON API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::error::{ApiResult, IntoApiErrorOption};
use super::page::{render_page, PageView};
use super::AppState;
use crate::analysis::{analyze, AnalysisRequest, AnalysisResult};
use crate::presets::{random_pair, DEFAULT_EVENT, DEFAULT_PERSON, PRESET_SUBJECTS, PRESET_TOPICS};

/// Body of both the form post and the JSON call. Missing fields read as empty.
#[derive(Debug, Deserialize)]
pub struct AnalyzeInput {
    #[serde(default)]
    pub person: String,
    #[serde(default)]
    pub event: String,
}

#[derive(Debug, Deserialize)]
pub struct PrefillQuery {
    pub person: Option<String>,
    pub event: Option<String>,
}

/// GET / - the form, prefilled from the query or the defaults
pub async fn index_handler(Query(query): Query<PrefillQuery>) -> Html<String> {
    let person = query.person.as_deref().unwrap_or(DEFAULT_PERSON);
    let event = query.event.as_deref().unwrap_or(DEFAULT_EVENT);
    Html(render_page(PageView { person, event, result: None }))
}

/// GET /random - send the browser back to the form with a random preset pair
pub async fn random_handler() -> Redirect {
    let (person, event) = random_pair(&mut rand::rng());
    Redirect::to(&format!(
        "/?person={}&event={}",
        urlencoding::encode(person),
        urlencoding::encode(event)
    ))
}

/// POST /analyze - form submission. Empty fields re-render the form untouched.
pub async fn analyze_form_handler(State(state): State<AppState>, Form(input): Form<AnalyzeInput>) -> Html<String> {
    let result = match AnalysisRequest::new(&input.person, &input.event) {
        Some(request) => Some(analyze(state.generator.as_ref(), &state.template, request).await),
        None => {
            info!("Ignoring submission with an empty field");
            None
        }
    };

    Html(render_page(PageView {
        person: &input.person,
        event: &input.event,
        result: result.as_ref(),
    }))
}

/// POST /api/analyze - JSON in, `{"text": ..}` or `{"error": ..}` out
pub async fn analyze_api_handler(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeInput>,
) -> ApiResult<(StatusCode, Json<AnalysisResult>)> {
    let request = AnalysisRequest::new(&input.person, &input.event)
        .ok_or_unprocessable("person and event are both required")?;

    let result = analyze(state.generator.as_ref(), &state.template, request).await;
    let status = if result.is_error() { StatusCode::BAD_GATEWAY } else { StatusCode::OK };
    Ok((status, Json(result)))
}

/// GET /api/status
pub async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "provider": state.generator.name(),
        "model": state.model,
    }))
}

/// GET /api/presets
pub async fn presets_handler() -> Json<Value> {
    Json(json!({
        "subjects": PRESET_SUBJECTS,
        "topics": PRESET_TOPICS,
    }))
}
