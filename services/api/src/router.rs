//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and the OpenAPI documentation.

use crate::{
    handlers,
    models::{
        CompletionMap, EntryResponse, ErrorResponse, ScriptLineBody, ScriptResponse,
        SessionDescriptor, SimulationState, TranscriptEntry, TranscriptResponse,
        TransitionResponse, UserResponsePayload,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::start_simulation,
        handlers::advance_phase,
        handlers::speak_line,
        handlers::record_response,
        handlers::finish_simulation,
        handlers::reset_simulation,
        handlers::get_state,
        handlers::get_script,
        handlers::get_transcript,
    ),
    components(
        schemas(
            TransitionResponse,
            SimulationState,
            CompletionMap,
            SessionDescriptor,
            ScriptResponse,
            ScriptLineBody,
            TranscriptResponse,
            TranscriptEntry,
            EntryResponse,
            UserResponsePayload,
            ErrorResponse
        )
    ),
    tags(
        (name = "clinsim API", description = "Phase orchestration for the scripted avatar training simulation")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/simulation", get(handlers::get_state))
        .route("/simulation/start", post(handlers::start_simulation))
        .route("/simulation/advance", post(handlers::advance_phase))
        .route("/simulation/finish", post(handlers::finish_simulation))
        .route("/simulation/reset", post(handlers::reset_simulation))
        .route("/simulation/lines/{index}", post(handlers::speak_line))
        .route("/simulation/response", post(handlers::record_response))
        .route("/simulation/script", get(handlers::get_script))
        .route("/simulation/transcript", get(handlers::get_transcript))
        .with_state(app_state);

    // Merge the stateful routes with the stateless Swagger UI routes.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
