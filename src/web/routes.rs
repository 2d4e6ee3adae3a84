//! HTTP surface: intake pages, results page, JSON API, and SSE stream.
//!
//! This service is the only holder of upstream credentials; browsers talk to
//! these routes and never to the inference or places endpoints directly.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{
        Html, IntoResponse, Redirect, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use super::pages::render_intake;
use crate::error::EnvelopeError;
use crate::intake::{IntakeForm, IntakeState, Transition, envelope};
use crate::places::GeoPosition;
use crate::results::{ResultsCoordinator, ResultsSession, ResultsView, render_results};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub results: Arc<ResultsCoordinator>,
}

/// Build the full router.
pub fn app_routes(results: Arc<ResultsCoordinator>) -> Router {
    let state = AppState { results };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/advice", post(api_advice))
        .route("/api/providers", post(api_providers))
        .route("/api/results", get(api_results))
        .route("/api/results/stream", get(api_results_stream))
        .layer(cors);

    Router::new()
        .route("/", get(intake_start))
        .route("/intake", post(intake_step))
        .route("/results", get(results_page))
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "symptom-advisor",
        "model": state.results.advice().model_name(),
    }))
}

// ── Intake ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum IntakeAction {
    #[default]
    Next,
    Back,
}

/// One intake form post. Prior answers ride along as hidden fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IntakeSubmission {
    step: usize,
    action: IntakeAction,
    answer: String,
    symptoms: String,
    duration: String,
    conditions: String,
    medications: String,
    allergies: String,
    lat: Option<String>,
    lng: Option<String>,
}

impl IntakeSubmission {
    fn state(&self) -> IntakeState {
        let form = IntakeForm {
            symptoms: self.symptoms.clone(),
            duration: self.duration.clone(),
            conditions: self.conditions.clone(),
            medications: self.medications.clone(),
            allergies: self.allergies.clone(),
        };
        IntakeState::resume(self.step, form).with_input(self.answer.clone())
    }

    fn position(&self) -> Option<GeoPosition> {
        GeoPosition::from_params(self.lat.as_deref(), self.lng.as_deref())
    }
}

async fn intake_start() -> Html<String> {
    Html(render_intake(&IntakeState::new()))
}

async fn intake_step(Form(submission): Form<IntakeSubmission>) -> Response {
    let state = submission.state();

    let next = match submission.action {
        IntakeAction::Back => state.retreat(),
        IntakeAction::Next => match state.advance() {
            Transition::Moved(next) | Transition::Blocked(next) => next,
            Transition::Submitted(form) => {
                return match results_location(&form, submission.position()) {
                    Ok(location) => Redirect::to(&location).into_response(),
                    Err(e) => {
                        warn!(error = %e, "Failed to encode intake envelope");
                        error_page(StatusCode::INTERNAL_SERVER_ERROR, &e)
                    }
                };
            }
        },
    };

    Html(render_intake(&next)).into_response()
}

/// `/results` URL carrying the envelope and, if known, the position.
pub fn results_location(
    form: &IntakeForm,
    position: Option<GeoPosition>,
) -> Result<String, EnvelopeError> {
    let mut location = format!("/results?{}", envelope::encode(form)?);
    if let Some(GeoPosition { lat, lng }) = position {
        location.push_str(&format!("&lat={lat}&lng={lng}"));
    }
    Ok(location)
}

// ── Results ─────────────────────────────────────────────────────────────

/// Envelope and optional position decoded from a results query string.
struct ResultsRequest {
    form: Result<IntakeForm, EnvelopeError>,
    position: Option<GeoPosition>,
}

impl ResultsRequest {
    fn parse(raw_query: Option<&str>) -> Self {
        let raw = raw_query.unwrap_or_default();
        let lat = envelope::param(raw, "lat");
        let lng = envelope::param(raw, "lng");
        Self {
            form: envelope::decode(raw),
            position: GeoPosition::from_params(lat.as_deref(), lng.as_deref()),
        }
    }
}

fn error_page(status: StatusCode, error: &EnvelopeError) -> Response {
    let view = ResultsSession::rejected(error).view();
    (status, Html(render_results(&view))).into_response()
}

fn view_status(view: &ResultsView) -> StatusCode {
    match view {
        ResultsView::Error { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    }
}

async fn results_page(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let request = ResultsRequest::parse(raw.as_deref());
    let form = match request.form {
        Ok(form) => form,
        Err(e) => {
            warn!(error = %e, "Rejected results envelope");
            return error_page(StatusCode::BAD_REQUEST, &e);
        }
    };

    let view = state.results.resolve(form, request.position).await.view();
    (view_status(&view), Html(render_results(&view))).into_response()
}

async fn api_results(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let request = ResultsRequest::parse(raw.as_deref());
    let form = match request.form {
        Ok(form) => form,
        Err(e) => {
            warn!(error = %e, "Rejected results envelope");
            let view = ResultsSession::rejected(&e).view();
            return (StatusCode::BAD_REQUEST, Json(view)).into_response();
        }
    };

    let view = state.results.resolve(form, request.position).await.view();
    (view_status(&view), Json(view)).into_response()
}

async fn api_results_stream(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let request = ResultsRequest::parse(raw.as_deref());

    let views: BoxStream<'static, ResultsView> = match request.form {
        Ok(form) => state.results.watch(form, request.position).boxed(),
        Err(e) => {
            warn!(error = %e, "Rejected results envelope");
            stream::once(async move { ResultsSession::rejected(&e).view() }).boxed()
        }
    };

    let events = views.map(|view| {
        let data = serde_json::to_string(&view).unwrap_or_else(|e| {
            serde_json::json!({"status": "error", "message": e.to_string()}).to_string()
        });
        Ok::<_, Infallible>(Event::default().event("view").data(data))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

// ── JSON API ────────────────────────────────────────────────────────────

async fn api_advice(State(state): State<AppState>, Json(form): Json<IntakeForm>) -> Response {
    if let Some(field) = form.first_unanswered() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": format!("Field {field} is empty")})),
        )
            .into_response();
    }

    match state.results.advice().request_advice(&form).await {
        Ok(advice) => Json(advice).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({"error": format!("Something went wrong: {e}")})),
        )
            .into_response(),
    }
}

async fn api_providers(
    State(state): State<AppState>,
    Json(position): Json<GeoPosition>,
) -> impl IntoResponse {
    let position = GeoPosition::checked(position.lat, position.lng);
    let located = state.results.lookup().resolve(position).await;
    info!(providers = located.providers().len(), "Provider lookup served");
    Json(located.into_providers())
}
