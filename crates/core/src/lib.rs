//! clinsim core
//!
//! Domain logic for the three-phase healthcare training simulation: the
//! phase state machine, the fixed script repository, the conversation
//! transcript, and the seam to the remote streaming-avatar service. No I/O
//! lives here; the HTTP client and the REST surface are in `clinsim-api`.

pub mod avatar;
pub mod character;
pub mod phase;
pub mod script;
pub mod simulation;
pub mod transcript;

use avatar::AvatarSession;
use script::ScriptLine;
use serde::Serialize;

/// Rendering directives the core issues to the display runtime.
///
/// The state machine decides what must happen on screen; executing it
/// (mounting the embeddable widget, feeding it a line) is the display
/// layer's job.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Directive {
    /// A new avatar session exists; mount the widget with its credentials.
    MountAvatar(AvatarSession),
    /// A scripted line was queued for the active character to deliver.
    SpeakLine(ScriptLine),
}
