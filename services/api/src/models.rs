//! API Models
//!
//! Request payloads and response bodies for the REST surface, with `utoipa`
//! schemas for the generated OpenAPI documentation. Core domain types stay
//! free of HTTP concerns; everything here is a thin projection of them.

use chrono::{DateTime, Utc};
use clinsim_core::{
    Directive,
    avatar::AvatarSession,
    character::Character,
    phase::{ALL_PHASES, Phase},
    script::ScriptLine,
    simulation::Simulation,
    transcript::ConversationEntry,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable identifier for a phase.
pub fn phase_id(phase: Phase) -> &'static str {
    match phase {
        Phase::PreBriefing => "pre_briefing",
        Phase::MainSimulation => "main_simulation",
        Phase::Debriefing => "debriefing",
    }
}

/// Stable machine-readable identifier for a character.
pub fn character_id(character: Character) -> &'static str {
    match character {
        Character::Instructor => "instructor",
        Character::Patient => "patient",
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UserResponsePayload {
    /// The trainee's reply to the active character.
    #[schema(example = "I understand your concerns about the vaccine.")]
    pub text: String,
}

/// Credentials and endpoint the front end needs to mount the avatar widget.
#[derive(Serialize, ToSchema)]
pub struct SessionDescriptor {
    pub session_id: String,
    pub access_token: String,
    pub url: String,
}

impl From<&AvatarSession> for SessionDescriptor {
    fn from(session: &AvatarSession) -> Self {
        Self {
            session_id: session.session_id.clone(),
            access_token: session.access_token.clone(),
            url: session.url.clone(),
        }
    }
}

/// One scripted line, addressable by index within its phase.
#[derive(Serialize, ToSchema)]
pub struct ScriptLineBody {
    pub index: usize,
    pub text: String,
    #[schema(example = "friendly")]
    pub emotion: String,
}

impl ScriptLineBody {
    pub fn new(index: usize, line: &ScriptLine) -> Self {
        Self {
            index,
            text: line.text.to_string(),
            emotion: line.emotion.to_string(),
        }
    }
}

/// The current phase's script, in delivery order.
#[derive(Serialize, ToSchema)]
pub struct ScriptResponse {
    #[schema(example = "pre_briefing")]
    pub phase: String,
    pub lines: Vec<ScriptLineBody>,
}

/// One conversation log entry, in display order.
#[derive(Serialize, ToSchema)]
pub struct TranscriptEntry {
    #[schema(example = "avatar")]
    pub role: String,
    pub content: String,
    #[schema(example = "concerned")]
    pub emotion: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "instructor")]
    pub speaker: Option<String>,
}

impl From<&ConversationEntry> for TranscriptEntry {
    fn from(entry: &ConversationEntry) -> Self {
        Self {
            role: entry.role.to_string(),
            content: entry.content.clone(),
            emotion: entry.emotion.map(|e| e.to_string()),
            timestamp: entry.timestamp,
            speaker: entry.speaker.map(|s| character_id(s).to_string()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct TranscriptResponse {
    pub entries: Vec<TranscriptEntry>,
}

/// Completion flags for each phase.
#[derive(Serialize, ToSchema)]
pub struct CompletionMap {
    pub pre_briefing: bool,
    pub main_simulation: bool,
    pub debriefing: bool,
}

/// Snapshot of the simulation shown in the control sidebar.
#[derive(Serialize, ToSchema)]
pub struct SimulationState {
    #[schema(example = "pre_briefing")]
    pub phase: String,
    #[schema(example = "Pre-Briefing (Noa)")]
    pub phase_name: String,
    #[schema(example = "instructor")]
    pub character: String,
    #[schema(example = "Noa Sandoval")]
    pub character_name: String,
    #[schema(example = "Virtual Simulation Instructor")]
    pub character_role: String,
    pub started: bool,
    pub completed: CompletionMap,
    pub has_session: bool,
}

impl SimulationState {
    pub fn snapshot(sim: &Simulation) -> Self {
        let profile = sim.character().profile();
        let [pre, main, debrief] =
            ALL_PHASES.map(|phase| sim.progress().is_complete(phase));
        Self {
            phase: phase_id(sim.phase()).to_string(),
            phase_name: sim.phase().display_name().to_string(),
            character: character_id(sim.character()).to_string(),
            character_name: profile.name.to_string(),
            character_role: profile.role.to_string(),
            started: sim.started(),
            completed: CompletionMap {
                pre_briefing: pre,
                main_simulation: main,
                debriefing: debrief,
            },
            has_session: sim.session().is_some(),
        }
    }
}

/// Result of `start` or `advance`: the new state plus whatever the display
/// layer must do (mount a fresh widget, feed it the queued line).
#[derive(Serialize, ToSchema)]
pub struct TransitionResponse {
    /// False when `advance` was called at the terminal phase.
    pub transitioned: bool,
    pub state: SimulationState,
    pub session: Option<SessionDescriptor>,
    pub queued_line: Option<ScriptLineBody>,
}

impl TransitionResponse {
    pub fn new(sim: &Simulation, directives: &[Directive]) -> Self {
        let mut session = None;
        let mut queued_line = None;
        for directive in directives {
            match directive {
                Directive::MountAvatar(s) => session = Some(SessionDescriptor::from(s)),
                Directive::SpeakLine(line) => queued_line = Some(ScriptLineBody::new(0, line)),
            }
        }
        Self {
            transitioned: !directives.is_empty(),
            state: SimulationState::snapshot(sim),
            session,
            queued_line,
        }
    }
}

/// Response for actions that appended one transcript entry.
#[derive(Serialize, ToSchema)]
pub struct EntryResponse {
    pub entry: TranscriptEntry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinsim_core::script;

    #[test]
    fn ids_are_stable() {
        assert_eq!(phase_id(Phase::PreBriefing), "pre_briefing");
        assert_eq!(phase_id(Phase::Debriefing), "debriefing");
        assert_eq!(character_id(Character::Patient), "patient");
    }

    #[test]
    fn script_line_body_flattens_the_emotion_label() {
        let line = &script::lines(Phase::MainSimulation)[0];
        let body = ScriptLineBody::new(0, line);
        assert_eq!(body.emotion, "concerned");
        assert_eq!(body.text, line.text);
    }

    #[test]
    fn error_response_serializes_flat() {
        let error = ErrorResponse {
            message: "Simulation not started".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"message":"Simulation not started"}"#);
    }
}
