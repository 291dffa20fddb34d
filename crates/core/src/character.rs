//! Scripted Personas
//!
//! The two characters rendered by the remote avatar service. Each carries
//! the remote avatar identifier and the knowledge-base identifier the
//! service uses for contextual behavior.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two fixed personas in the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Character {
    /// Noa Sandoval, the virtual simulation instructor.
    Instructor,
    /// Sam Richards, the vaccine-hesitant patient.
    Patient,
}

/// Static configuration for a character, as registered with the avatar
/// service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterProfile {
    pub name: &'static str,
    pub role: &'static str,
    /// Identifier of the streaming avatar on the remote service.
    pub avatar_id: &'static str,
    /// Knowledge base the remote service attaches to the session.
    pub knowledge_base_id: &'static str,
}

const INSTRUCTOR_PROFILE: CharacterProfile = CharacterProfile {
    name: "Noa Sandoval",
    role: "Virtual Simulation Instructor",
    avatar_id: "June_HR_public",
    knowledge_base_id: "96b0ed06f07640459bcac16439103895",
};

const PATIENT_PROFILE: CharacterProfile = CharacterProfile {
    name: "Sam Richards",
    role: "Simulation Character",
    avatar_id: "Shawn_Therapist_public",
    knowledge_base_id: "15a0063f43ed4d1c92f5a269dc0b8f9b",
};

impl Character {
    /// The remote-service profile for this character.
    pub fn profile(self) -> &'static CharacterProfile {
        match self {
            Character::Instructor => &INSTRUCTOR_PROFILE,
            Character::Patient => &PATIENT_PROFILE,
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}
