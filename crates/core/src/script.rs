//! Script Repository
//!
//! The fixed, pre-authored dialogue for each phase. Pure lookup: no
//! mutation, no I/O. Line order matters, as the trainee triggers lines by
//! index and every phase entry queues line zero automatically.

use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotion label attached to a scripted utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Friendly,
    Professional,
    Encouraging,
    Concerned,
    Neutral,
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Emotion::Friendly => "friendly",
            Emotion::Professional => "professional",
            Emotion::Encouraging => "encouraging",
            Emotion::Concerned => "concerned",
            Emotion::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// A single pre-authored utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScriptLine {
    pub text: &'static str,
    pub emotion: Emotion,
}

const PRE_BRIEFING_LINES: [ScriptLine; 3] = [
    ScriptLine {
        text: "Hello! I'm Noa Sandoval, your virtual simulation instructor. Welcome to the Flu Vaccination Program simulation.",
        emotion: Emotion::Friendly,
    },
    ScriptLine {
        text: "In this simulation, you'll be interacting with Sam Richards, a patient who has concerns about getting the flu vaccine. Your goal is to address their concerns professionally and provide accurate information.",
        emotion: Emotion::Professional,
    },
    ScriptLine {
        text: "Remember to listen actively, show empathy, and use evidence-based information. Are you ready to begin the simulation?",
        emotion: Emotion::Encouraging,
    },
];

const MAIN_SIMULATION_LINES: [ScriptLine; 1] = [ScriptLine {
    text: "Hi there. I'm Sam Richards. I received a letter about getting a flu shot, but I'm not sure if I really need it. I've heard some concerning things about vaccines.",
    emotion: Emotion::Concerned,
}];

const DEBRIEFING_LINES: [ScriptLine; 3] = [
    ScriptLine {
        text: "Welcome back! I'm Noa again. Let's debrief your simulation experience with Sam Richards.",
        emotion: Emotion::Friendly,
    },
    ScriptLine {
        text: "You did a great job addressing Sam's concerns about the flu vaccine. Let's review what went well and areas for improvement.",
        emotion: Emotion::Encouraging,
    },
    ScriptLine {
        text: "Key takeaways: Always validate patient concerns, provide evidence-based information, and maintain a professional yet empathetic approach. Do you have any questions about the simulation?",
        emotion: Emotion::Professional,
    },
];

/// Returns the ordered script for `phase`.
pub fn lines(phase: Phase) -> &'static [ScriptLine] {
    match phase {
        Phase::PreBriefing => &PRE_BRIEFING_LINES,
        Phase::MainSimulation => &MAIN_SIMULATION_LINES,
        Phase::Debriefing => &DEBRIEFING_LINES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::ALL_PHASES;

    #[test]
    fn every_phase_has_a_script() {
        for phase in ALL_PHASES {
            assert!(!lines(phase).is_empty(), "no script for {phase:?}");
        }
    }

    #[test]
    fn pre_briefing_opens_with_the_introduction() {
        let script = lines(Phase::PreBriefing);
        assert_eq!(script.len(), 3);
        assert!(script[0].text.starts_with("Hello! I'm Noa Sandoval"));
        assert_eq!(script[0].emotion, Emotion::Friendly);
    }

    #[test]
    fn patient_script_is_the_single_opener() {
        let script = lines(Phase::MainSimulation);
        assert_eq!(script.len(), 1);
        assert!(script[0].text.contains("flu shot"));
        assert_eq!(script[0].emotion, Emotion::Concerned);
    }

    #[test]
    fn emotion_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Emotion::Encouraging).unwrap(),
            "\"encouraging\""
        );
        assert_eq!(Emotion::Concerned.to_string(), "concerned");
    }
}
