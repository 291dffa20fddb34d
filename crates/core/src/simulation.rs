//! Phase State Machine
//!
//! Owns the whole state of one trainee's simulation: current phase, active
//! character, per-phase completion flags, the live avatar session, and the
//! conversation transcript. Every trainee action maps to exactly one method
//! here; each method is a short synchronous step around at most one remote
//! call.
//!
//! Two invariants hold in every reachable state: the active character always
//! equals `phase.character()`, and a session never survives a character
//! switch (teardown is attempted on every switch and on reset).

use crate::avatar::{AvatarClient, AvatarError, AvatarSession};
use crate::character::Character;
use crate::phase::{Phase, PhaseProgress};
use crate::script::{self, ScriptLine};
use crate::transcript::Transcript;
use crate::Directive;
use std::sync::Arc;
use tracing::{info, warn};

/// Errors surfaced by trainee actions on the state machine.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("the simulation has already been started")]
    AlreadyStarted,
    #[error("the simulation has not been started yet")]
    NotStarted,
    #[error("no script line {index} exists for phase {phase}")]
    UnknownLine { phase: Phase, index: usize },
    #[error("no live avatar session; start or advance the simulation first")]
    NoSession,
    #[error(transparent)]
    Avatar(#[from] AvatarError),
}

/// One trainee's simulation context.
///
/// Explicitly constructed at startup and torn down with the process; there
/// is no persistence, and at most one avatar session is live at a time.
pub struct Simulation {
    client: Arc<dyn AvatarClient>,
    phase: Phase,
    character: Character,
    progress: PhaseProgress,
    session: Option<AvatarSession>,
    started: bool,
    transcript: Transcript,
}

impl Simulation {
    /// Creates a fresh simulation in the pre-briefing phase.
    pub fn new(client: Arc<dyn AvatarClient>) -> Self {
        Self {
            client,
            phase: Phase::PreBriefing,
            character: Phase::PreBriefing.character(),
            progress: PhaseProgress::new(),
            session: None,
            started: false,
            transcript: Transcript::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn progress(&self) -> &PhaseProgress {
        &self.progress
    }

    pub fn session(&self) -> Option<&AvatarSession> {
        self.session.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The script for the phase the trainee is currently in.
    pub fn current_script(&self) -> &'static [ScriptLine] {
        script::lines(self.phase)
    }

    /// Starts the simulation with the instructor's pre-briefing.
    ///
    /// On success the first pre-briefing line is logged and queued for the
    /// widget. On failure nothing changes: `started` stays false and the
    /// transcript stays empty, so the trainee can simply retry.
    pub async fn start(&mut self) -> Result<Vec<Directive>, SimulationError> {
        if self.started {
            return Err(SimulationError::AlreadyStarted);
        }

        let session = self.activate(self.character).await?;
        self.started = true;
        info!(phase = %self.phase, character = %self.character, "simulation started");

        let directives = vec![
            Directive::MountAvatar(session),
            self.queue_line(&script::lines(self.phase)[0]),
        ];
        Ok(directives)
    }

    /// Moves to the next phase, switching character and session.
    ///
    /// A no-op at debriefing (the terminal phase). The old session is torn
    /// down best-effort; the transition itself commits only once the new
    /// character's session exists, so a failed advance leaves the phase,
    /// progress, and transcript untouched and can be retried.
    pub async fn advance(&mut self) -> Result<Vec<Directive>, SimulationError> {
        if !self.started {
            return Err(SimulationError::NotStarted);
        }
        let Some(next) = self.phase.next() else {
            return Ok(Vec::new());
        };

        self.teardown_session().await;
        let session = self.activate(next.character()).await?;

        self.progress.complete(self.phase);
        info!(from = %self.phase, to = %next, "phase transition");
        self.phase = next;
        self.character = next.character();

        let directives = vec![
            Directive::MountAvatar(session),
            self.queue_line(&script::lines(self.phase)[0]),
        ];
        Ok(directives)
    }

    /// Asks the active character to speak the scripted line at `index`
    /// within the current phase.
    pub async fn request_line(&mut self, index: usize) -> Result<(), SimulationError> {
        if !self.started {
            return Err(SimulationError::NotStarted);
        }
        let line = script::lines(self.phase)
            .get(index)
            .ok_or(SimulationError::UnknownLine {
                phase: self.phase,
                index,
            })?;
        let session = self.session.as_ref().ok_or(SimulationError::NoSession)?;

        self.client.speak(session, line.text).await?;
        self.transcript.push_line(self.character, line);
        info!(phase = %self.phase, index, "scripted line spoken");
        Ok(())
    }

    /// Logs a trainee response.
    ///
    /// The response is recorded only; scripted characters never reply to it.
    pub fn record_user_response(&mut self, text: &str) -> Result<(), SimulationError> {
        if !self.started {
            return Err(SimulationError::NotStarted);
        }
        self.transcript.push_user(text);
        Ok(())
    }

    /// Marks the current phase complete without transitioning.
    ///
    /// At debriefing this produces the terminal state: every phase complete
    /// and no further transition possible except via `reset`.
    pub fn finish(&mut self) -> Result<(), SimulationError> {
        if !self.started {
            return Err(SimulationError::NotStarted);
        }
        self.progress.complete(self.phase);
        info!(phase = %self.phase, "phase marked complete");
        Ok(())
    }

    /// Returns the simulation to its exact initial state.
    ///
    /// Any live session is stopped best-effort first; reset itself cannot
    /// fail.
    pub async fn reset(&mut self) {
        self.teardown_session().await;
        self.phase = Phase::PreBriefing;
        self.character = Phase::PreBriefing.character();
        self.progress.reset();
        self.started = false;
        self.transcript.clear();
        info!("simulation reset");
    }

    /// Creates a session for `character` on the remote service.
    async fn activate(&mut self, character: Character) -> Result<AvatarSession, SimulationError> {
        let profile = character.profile();
        let session = self
            .client
            .create_session(profile.avatar_id, profile.knowledge_base_id)
            .await?;
        info!(character = %character, session_id = %session.session_id, "avatar session created");
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Stops the live session, if any. Failures are logged and swallowed:
    /// teardown must never block a phase transition or a reset.
    async fn teardown_session(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(err) = self.client.stop_session(&session).await {
                warn!(session_id = %session.session_id, error = %err, "failed to stop avatar session");
            }
        }
    }

    /// Logs a scripted line and hands it to the display layer.
    fn queue_line(&mut self, line: &ScriptLine) -> Directive {
        self.transcript.push_line(self.character, line);
        Directive::SpeakLine(*line)
    }
}
