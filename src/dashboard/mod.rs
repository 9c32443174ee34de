use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

pub mod models;

use crate::config::Config;
use crate::engine::{complete_analysis, default_counter_sweep, hedge_scenarios};
use crate::validation::{validate_amount, validate_odds, validate_scenario_odds};
use models::*;

#[derive(Clone)]
pub struct AppState {
    pub default_bankroll: f64,
    pub default_locked_stake: f64,
    pub cors_origins: Vec<String>,
}

impl From<&Config> for AppState {
    fn from(config: &Config) -> Self {
        AppState {
            default_bankroll: config.default_bankroll,
            default_locked_stake: config.default_locked_stake,
            cors_origins: config.cors_origins.clone(),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, String)>;

/// Build the Axum router for the calculator API.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/convert", get(convert_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/hedge", post(hedge_handler))
        .route("/api/batch", post(batch_handler))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(Arc::new(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", o, e);
                None
            }
        })
        .collect();
    info!("CORS origins: {:?}", allowed);
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}

/// Validation and engine errors both surface as 422 with the error text.
fn unprocessable(e: impl Display) -> (StatusCode, String) {
    warn!("Rejected request: {}", e);
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

/// GET /health
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// GET /api/convert?odds=-110
async fn convert_handler(Query(q): Query<ConvertQuery>) -> ApiResult<impl IntoResponse> {
    let odds = validate_odds("odds", q.odds).map_err(unprocessable)?;
    Ok(Json(ConvertResponse::from(odds)))
}

/// POST /api/calculate
async fn calculate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CalculateRequest>,
) -> ApiResult<impl IntoResponse> {
    analyze(req, state.default_bankroll, state.default_locked_stake).map(Json)
}

/// POST /api/hedge
async fn hedge_handler(Json(req): Json<HedgeRequest>) -> ApiResult<impl IntoResponse> {
    let locked_odds = validate_odds("locked odds", req.locked_odds).map_err(unprocessable)?;
    let locked_stake = validate_amount("locked stake", req.locked_stake).map_err(unprocessable)?;
    let counter = match req.counter_odds.as_deref() {
        Some(odds) => validate_scenario_odds(odds).map_err(unprocessable)?,
        None => default_counter_sweep(),
    };
    let scenarios: Vec<HedgeScenarioResponse> = hedge_scenarios(locked_odds, locked_stake, &counter)
        .map_err(unprocessable)?
        .map(|s| HedgeScenarioResponse::from(&s))
        .collect();
    Ok(Json(scenarios))
}

/// POST /api/batch
async fn batch_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> ApiResult<impl IntoResponse> {
    let bankroll = req.bankroll.unwrap_or(state.default_bankroll);
    let results = req
        .games
        .into_iter()
        .map(|game| analyze(game, bankroll, state.default_locked_stake))
        .collect::<ApiResult<Vec<_>>>()?;
    info!("Batch analysed {} games", results.len());
    Ok(Json(results))
}

fn analyze(
    req: CalculateRequest,
    fallback_bankroll: f64,
    fallback_locked_stake: f64,
) -> ApiResult<AnalysisResponse> {
    let input = req
        .into_input(fallback_bankroll, fallback_locked_stake)
        .map_err(unprocessable)?;
    let analysis = complete_analysis(&input).map_err(unprocessable)?;
    Ok(AnalysisResponse::from(&analysis))
}
