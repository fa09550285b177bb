//! HTTP endpoints
//!
//! `POST /process` is the sole application-facing contract; everything
//! else is operational (health, config reload). Validation failures map
//! to 422 and internal failures to 500; the engine itself never produces
//! a malformed response body.

use std::time::Instant;

use axum::{
    extract::{Extension, Json, Request, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chatai_core::{Error, ProcessRequest, ProcessResponse};

use crate::auth::{auth_middleware, AuthUser};
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );

    Router::new()
        .route("/process", post(process))
        .route("/reload_config", post(reload_config))
        .route("/health", get(health))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(axum::middleware::from_fn(process_time))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build the CORS layer from configured origins.
///
/// Disabled CORS means permissive (development only); no configured
/// origins defaults to localhost for safety.
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        tracing::info!("no valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Middleware: report processing time back to the caller.
async fn process_time(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = format!("{:.6}", start.elapsed().as_secs_f64());
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        response.headers_mut().insert("X-Process-Time", value);
    }
    response
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// Process one dialogue turn.
async fn process(
    State(state): State<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Json(request): Json<ProcessRequest>,
) -> Response {
    // With auth enabled, the token identity must match the body.
    if let Some(Extension(AuthUser(token_user))) = auth_user {
        if token_user != request.user_id {
            return error_response(
                StatusCode::FORBIDDEN,
                "token user does not match request user_id",
            );
        }
    }

    match state.agent.process(request).await {
        Ok(response) => Json::<ProcessResponse>(response).into_response(),
        Err(Error::InvalidRequest(detail)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, detail)
        }
        Err(e) => {
            tracing::error!(error = %e, "turn processing failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "processing failed")
        }
    }
}

#[derive(Debug, Serialize)]
struct ReloadResponse {
    status: &'static str,
    message: String,
    business_types_count: usize,
}

/// Re-read the business configuration file.
async fn reload_config(State(state): State<AppState>) -> Response {
    match state.config.reload() {
        Ok(count) => Json(ReloadResponse {
            status: "success",
            message: "business configuration reloaded".to_string(),
            business_types_count: count,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "config reload failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("config reload failed: {e}"),
            )
        }
    }
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "ChatAI",
        "timestamp": chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
    }))
}
