//! Axum Handlers for the REST API
//!
//! One handler per trainee action. Domain errors carry their own HTTP
//! meaning (credential failures pass through as 401/403, remote-service
//! trouble becomes 502, sequencing mistakes become 409), so the mapping
//! lives here rather than in a blanket conversion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use clinsim_core::avatar::AvatarError;
use clinsim_core::simulation::SimulationError;
use std::sync::Arc;
use tracing::error;

use crate::{
    models::{
        EntryResponse, ErrorResponse, ScriptLineBody, ScriptResponse, SimulationState,
        TranscriptEntry, TranscriptResponse, TransitionResponse, UserResponsePayload, phase_id,
    },
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    BadGateway(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<SimulationError> for ApiError {
    fn from(err: SimulationError) -> Self {
        let message = err.to_string();
        match err {
            SimulationError::AlreadyStarted
            | SimulationError::NotStarted
            | SimulationError::NoSession => ApiError::Conflict(message),
            SimulationError::UnknownLine { .. } => ApiError::NotFound(message),
            SimulationError::Avatar(avatar) => match avatar {
                AvatarError::Unauthorized => ApiError::Unauthorized(message),
                AvatarError::Forbidden => ApiError::Forbidden(message),
                AvatarError::Network(_) | AvatarError::Service { .. } => {
                    ApiError::BadGateway(message)
                }
            },
        }
    }
}

/// Start the simulation with the instructor's pre-briefing.
#[utoipa::path(
    post,
    path = "/simulation/start",
    responses(
        (status = 201, description = "Simulation started; mount the returned session", body = TransitionResponse),
        (status = 401, description = "API key rejected", body = ErrorResponse),
        (status = 409, description = "Simulation already started", body = ErrorResponse),
        (status = 502, description = "Avatar service failure", body = ErrorResponse)
    )
)]
pub async fn start_simulation(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let mut sim = state.simulation.lock().await;
    let directives = sim.start().await?;
    Ok((
        StatusCode::CREATED,
        Json(TransitionResponse::new(&sim, &directives)),
    ))
}

/// Advance to the next phase, switching the active character.
#[utoipa::path(
    post,
    path = "/simulation/advance",
    responses(
        (status = 200, description = "Phase transition result (no-op at debriefing)", body = TransitionResponse),
        (status = 409, description = "Simulation not started", body = ErrorResponse),
        (status = 502, description = "Avatar service failure", body = ErrorResponse)
    )
)]
pub async fn advance_phase(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let mut sim = state.simulation.lock().await;
    let directives = sim.advance().await?;
    Ok(Json(TransitionResponse::new(&sim, &directives)))
}

/// Ask the active character to speak a scripted line.
#[utoipa::path(
    post,
    path = "/simulation/lines/{index}",
    responses(
        (status = 200, description = "Line spoken and logged", body = EntryResponse),
        (status = 404, description = "No such line in the current phase", body = ErrorResponse),
        (status = 409, description = "Simulation not started or no live session", body = ErrorResponse),
        (status = 502, description = "Avatar service failure", body = ErrorResponse)
    ),
    params(
        ("index" = usize, Path, description = "Zero-based line index within the current phase's script")
    )
)]
pub async fn speak_line(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<EntryResponse>, ApiError> {
    let mut sim = state.simulation.lock().await;
    sim.request_line(index).await?;
    let entry = sim
        .transcript()
        .entries()
        .last()
        .map(TranscriptEntry::from)
        .ok_or_else(|| {
            ApiError::InternalServerError(anyhow::anyhow!("spoken line missing from transcript"))
        })?;
    Ok(Json(EntryResponse { entry }))
}

/// Record the trainee's response to the active character.
#[utoipa::path(
    post,
    path = "/simulation/response",
    request_body = UserResponsePayload,
    responses(
        (status = 201, description = "Response logged", body = EntryResponse),
        (status = 400, description = "Empty response text", body = ErrorResponse),
        (status = 409, description = "Simulation not started", body = ErrorResponse)
    )
)]
pub async fn record_response(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserResponsePayload>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Response text must not be empty".to_string(),
        ));
    }
    let mut sim = state.simulation.lock().await;
    sim.record_user_response(payload.text.trim())?;
    let entry = sim
        .transcript()
        .entries()
        .last()
        .map(TranscriptEntry::from)
        .ok_or_else(|| {
            ApiError::InternalServerError(anyhow::anyhow!("recorded response missing from transcript"))
        })?;
    Ok((StatusCode::CREATED, Json(EntryResponse { entry })))
}

/// Mark the current phase complete without transitioning.
#[utoipa::path(
    post,
    path = "/simulation/finish",
    responses(
        (status = 200, description = "Phase marked complete", body = SimulationState),
        (status = 409, description = "Simulation not started", body = ErrorResponse)
    )
)]
pub async fn finish_simulation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SimulationState>, ApiError> {
    let mut sim = state.simulation.lock().await;
    sim.finish()?;
    Ok(Json(SimulationState::snapshot(&sim)))
}

/// Reset everything back to the initial pre-briefing state.
#[utoipa::path(
    post,
    path = "/simulation/reset",
    responses(
        (status = 200, description = "Simulation reset", body = SimulationState)
    )
)]
pub async fn reset_simulation(State(state): State<Arc<AppState>>) -> Json<SimulationState> {
    let mut sim = state.simulation.lock().await;
    sim.reset().await;
    Json(SimulationState::snapshot(&sim))
}

/// Current phase, active character, and completion flags.
#[utoipa::path(
    get,
    path = "/simulation",
    responses(
        (status = 200, description = "Simulation snapshot", body = SimulationState)
    )
)]
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<SimulationState> {
    let sim = state.simulation.lock().await;
    Json(SimulationState::snapshot(&sim))
}

/// The scripted lines available in the current phase.
#[utoipa::path(
    get,
    path = "/simulation/script",
    responses(
        (status = 200, description = "Current phase's script", body = ScriptResponse)
    )
)]
pub async fn get_script(State(state): State<Arc<AppState>>) -> Json<ScriptResponse> {
    let sim = state.simulation.lock().await;
    let lines = sim
        .current_script()
        .iter()
        .enumerate()
        .map(|(index, line)| ScriptLineBody::new(index, line))
        .collect();
    Json(ScriptResponse {
        phase: phase_id(sim.phase()).to_string(),
        lines,
    })
}

/// The full conversation log, in display order.
#[utoipa::path(
    get,
    path = "/simulation/transcript",
    responses(
        (status = 200, description = "Ordered conversation entries", body = TranscriptResponse)
    )
)]
pub async fn get_transcript(State(state): State<Arc<AppState>>) -> Json<TranscriptResponse> {
    let sim = state.simulation.lock().await;
    let entries = sim.transcript().entries().iter().map(TranscriptEntry::from).collect();
    Json(TranscriptResponse { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinsim_core::phase::Phase;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn sequencing_errors_map_to_conflict() {
        assert_eq!(
            status_of(SimulationError::AlreadyStarted.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SimulationError::NotStarted.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SimulationError::NoSession.into()),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn unknown_line_maps_to_not_found() {
        let err = SimulationError::UnknownLine {
            phase: Phase::PreBriefing,
            index: 7,
        };
        assert_eq!(status_of(err.into()), StatusCode::NOT_FOUND);
    }

    #[test]
    fn credential_errors_pass_through() {
        assert_eq!(
            status_of(SimulationError::Avatar(AvatarError::Unauthorized).into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(SimulationError::Avatar(AvatarError::Forbidden).into()),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn remote_failures_map_to_bad_gateway() {
        assert_eq!(
            status_of(SimulationError::Avatar(AvatarError::Network("reset".into())).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(
                SimulationError::Avatar(AvatarError::Service {
                    status: 500,
                    message: "boom".into()
                })
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
    }
}
