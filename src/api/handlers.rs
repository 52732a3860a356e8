//! HTTP endpoint handlers
//!
//! Commands that make no sense in the current state are not errors: they
//! leave the timer unchanged and the response shows the unchanged snapshot.

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    engine::Field,
    state::{AppState, TimerSnapshot},
};
use super::responses::{ApiResponse, ConfigureRequest, HealthResponse, StatusResponse};

/// Turn a command result into a response
fn respond(
    command: &str,
    result: Result<TimerSnapshot, String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(timer) => {
            info!("{} endpoint called - timer {} at {}", command, timer.state, timer.display);
            Ok(Json(ApiResponse::new(
                format!("{} accepted", command),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to run {}: {}", command, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /select/:field - Move the plus/minus cursor
pub async fn select_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let field = match field.parse::<Field>() {
        Ok(field) => field,
        Err(e) => {
            warn!("Rejected select: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    respond("select", state.select_field(field))
}

/// Handle POST /plus - Increment the selected field
pub async fn plus_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("plus", state.adjust(1))
}

/// Handle POST /minus - Decrement the selected field
pub async fn minus_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("minus", state.adjust(-1))
}

/// Handle POST /configure - Adjust a field by an explicit delta
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigureRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond("configure", state.configure(request.field, request.delta))
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("start", state.start())
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("pause", state.pause())
}

/// Handle POST /reset - Stop any alarm and return to the preset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("reset", state.reset())
}

/// Handle POST /toggle - Main button: start, pause, or stop the alarm
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("toggle", state.toggle())
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        view: state.get_view(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
