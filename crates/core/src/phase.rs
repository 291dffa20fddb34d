//! Simulation Phases
//!
//! The three stages of the training scenario form a fixed forward-only
//! sequence. Phase is the single source of truth for which character must
//! be on screen, so the "instructor brackets the patient" invariant is
//! enforced by construction rather than checked at runtime.

use crate::character::Character;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three sequential stages of the training scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PreBriefing,
    MainSimulation,
    Debriefing,
}

/// All phases, in scenario order.
pub const ALL_PHASES: [Phase; 3] = [
    Phase::PreBriefing,
    Phase::MainSimulation,
    Phase::Debriefing,
];

impl Phase {
    /// The phase that follows this one, or `None` at the terminal phase.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::PreBriefing => Some(Phase::MainSimulation),
            Phase::MainSimulation => Some(Phase::Debriefing),
            Phase::Debriefing => None,
        }
    }

    /// The character that must be active while this phase runs.
    pub fn character(self) -> Character {
        match self {
            Phase::PreBriefing | Phase::Debriefing => Character::Instructor,
            Phase::MainSimulation => Character::Patient,
        }
    }

    /// Human-readable phase name shown to the trainee.
    pub fn display_name(self) -> &'static str {
        match self {
            Phase::PreBriefing => "Pre-Briefing (Noa)",
            Phase::MainSimulation => "Main Simulation (Sam)",
            Phase::Debriefing => "Debriefing (Noa)",
        }
    }

    fn index(self) -> usize {
        match self {
            Phase::PreBriefing => 0,
            Phase::MainSimulation => 1,
            Phase::Debriefing => 2,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Per-phase completion flags, keyed by `Phase`.
///
/// A fixed-size array indexed by the closed enum, so a new phase cannot be
/// added without the compiler pointing at every match that must handle it.
/// Flags are set monotonically; only `reset` clears them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseProgress {
    completed: [bool; 3],
}

impl PhaseProgress {
    /// Fresh progress with every phase incomplete.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `phase` complete. Idempotent.
    pub fn complete(&mut self, phase: Phase) {
        self.completed[phase.index()] = true;
    }

    /// Whether `phase` has been completed.
    pub fn is_complete(&self, phase: Phase) -> bool {
        self.completed[phase.index()]
    }

    /// Clears every flag back to incomplete.
    pub fn reset(&mut self) {
        self.completed = [false; 3];
    }
}
