// Axum API Server Module
//
// Purpose: JSON API over the footprint scorer plus the snapshot store
// Country is resolved once per request, before the engine runs

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::answers::{AnswerError, NOT_APPLICABLE_LABEL};
use crate::config::ServerConfig;
use crate::country::{country_for_request, CountryContext, CountryLookup, HttpCountryLookup};
use crate::report::MarkdownFormatter;
use crate::scorer::{FootprintResult, FootprintScorer};
use crate::session::SessionRequest;
use crate::snapshot::{FootprintSnapshot, SnapshotStore};
use crate::tables::{CountrySummary, GradeTier};

/// Upper bound on sessions per batch request
pub const MAX_BATCH_SIZE: usize = 1000;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<FootprintScorer>,
    pub snapshots: SnapshotStore,
    pub lookup: Option<Arc<dyn CountryLookup>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing footprint scorer...");
        let scorer = FootprintScorer::from_config(&config.engine_config())?;
        Ok(Self::with_scorer(scorer, config))
    }

    /// State over an already-built scorer
    pub fn with_scorer(scorer: FootprintScorer, config: ServerConfig) -> Self {
        tracing::info!(
            capacity = config.snapshot_capacity,
            ttl = ?config.snapshot_ttl,
            "Initializing Moka snapshot store..."
        );
        let snapshots = SnapshotStore::new(config.snapshot_capacity, config.snapshot_ttl);

        let lookup = config.country_lookup_url.as_ref().map(|url| {
            tracing::info!(%url, timeout = ?config.country_lookup_timeout, "Country lookup enabled");
            Arc::new(HttpCountryLookup::new(url.clone())) as Arc<dyn CountryLookup>
        });

        Self {
            scorer: Arc::new(scorer),
            snapshots,
            lookup,
            config: Arc::new(config),
        }
    }

    /// Replace the remote country lookup
    pub fn with_lookup(mut self, lookup: Option<Arc<dyn CountryLookup>>) -> Self {
        self.lookup = lookup;
        self
    }

    fn country_context(&self) -> CountryContext<'_> {
        CountryContext {
            factors: self.scorer.factors(),
            lookup: self.lookup.as_deref(),
            timeout: self.config.country_lookup_timeout,
            fallback: &self.config.default_country,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Static tables
        .route("/api/tiers", get(list_tiers))
        .route("/api/questions/:tier", get(get_questions))
        .route("/api/countries", get(list_countries))

        // Scoring
        // IMPORTANT: fixed paths before :id paths
        .route("/api/footprint/preview", post(preview_footprint))
        .route("/api/footprint/batch", post(score_batch))
        .route("/api/footprint", post(create_footprint))

        // Stored results
        .route("/api/results/:id", get(get_result))
        .route("/api/results/:id/report", get(get_result_report))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TierInfo {
    key: &'static str,
    name: &'static str,
    question_count: usize,
}

#[derive(Debug, Serialize)]
struct CountriesResponse {
    fallback: String,
    countries: Vec<CountrySummary>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub sessions: Vec<SessionRequest>,
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    count: usize,
    results: Vec<FootprintResult>,
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_tiers(State(state): State<AppState>) -> Json<Vec<TierInfo>> {
    let bank = state.scorer.questions();
    Json(
        GradeTier::all()
            .iter()
            .map(|tier| TierInfo {
                key: tier.key(),
                name: tier.display_name(),
                question_count: bank.questions(*tier).len(),
            })
            .collect(),
    )
}

async fn get_questions(
    State(state): State<AppState>,
    Path(tier): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tier: GradeTier = tier.parse().map_err(AppError::BadRequest)?;
    let questions = state.scorer.questions().questions(tier);

    Ok(Json(serde_json::json!({
        "tier": tier,
        "name": tier.display_name(),
        "questions": questions,
        "not_applicable_label": NOT_APPLICABLE_LABEL,
    })))
}

async fn list_countries(State(state): State<AppState>) -> Json<CountriesResponse> {
    let factors = state.scorer.factors();
    Json(CountriesResponse {
        fallback: factors.fallback().code.clone(),
        countries: factors.profiles().iter().map(CountrySummary::from).collect(),
    })
}

/// Fill in the country from request headers when the body has none
async fn with_resolved_country(
    state: &AppState,
    headers: &HeaderMap,
    mut request: SessionRequest,
) -> SessionRequest {
    let (code, source) =
        country_for_request(request.country.as_deref(), headers, &state.country_context()).await;
    tracing::debug!(%code, ?source, "Request country");
    request.country = Some(code);
    request
}

async fn score_one(
    state: &AppState,
    headers: &HeaderMap,
    request: SessionRequest,
) -> Result<FootprintResult, AppError> {
    let request = with_resolved_country(state, headers, request).await;
    Ok(state
        .scorer
        .score_request(request, &state.config.default_country)?)
}

async fn preview_footprint(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SessionRequest>,
) -> Result<Json<FootprintResult>, AppError> {
    Ok(Json(score_one(&state, &headers, request).await?))
}

async fn create_footprint(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SessionRequest>,
) -> Result<(StatusCode, Json<FootprintSnapshot>), AppError> {
    let result = score_one(&state, &headers, request).await?;

    let snapshot = state
        .snapshots
        .insert(result)
        .await
        .ok_or_else(|| AppError::Internal("Could not allocate a snapshot id".to_string()))?;

    tracing::info!(id = %snapshot.id, total = snapshot.result.total, "Stored footprint snapshot");

    Ok((StatusCode::CREATED, Json(FootprintSnapshot::clone(&snapshot))))
}

async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FootprintSnapshot>, AppError> {
    let snapshot = state
        .snapshots
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Result {} not found", id)))?;

    Ok(Json(FootprintSnapshot::clone(&snapshot)))
}

async fn get_result_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let snapshot = state
        .snapshots
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Result {} not found", id)))?;

    let markdown = MarkdownFormatter::format(&snapshot.result);
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    )
        .into_response())
}

async fn score_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let count = payload.sessions.len();
    if count > MAX_BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "Batch of {} sessions exceeds the limit of {}",
            count, MAX_BATCH_SIZE
        )));
    }

    tracing::info!("Scoring batch of {} sessions", count);

    // Resolve the header country once for every session that lacks one
    let (header_country, _) = country_for_request(None, &headers, &state.country_context()).await;

    let scorer = state.scorer.clone();
    let default_country = state.config.default_country.clone();

    // CPU-bound work: run Rayon on the blocking thread pool
    let results = tokio::task::spawn_blocking(move || -> Result<Vec<FootprintResult>, AnswerError> {
        let sessions = payload
            .sessions
            .into_iter()
            .map(|request| {
                let country = request
                    .country
                    .clone()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| header_country.clone());
                SessionRequest {
                    country: Some(country),
                    ..request
                }
                .into_session(scorer.questions(), &default_country)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(scorer.score_many_parallel(&sessions))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Rayon task failed: {}", e)))??;

    Ok(Json(BatchResponse { count, results }))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidAnswer(#[from] AnswerError),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidAnswer(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
