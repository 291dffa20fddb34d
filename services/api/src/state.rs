//! Shared Application State
//!
//! One trainee's simulation context, owned by the process and shared with
//! every handler. The mutex serializes the trainee's discrete actions; there
//! is no multi-user concurrency by design.

use crate::config::Config;
use clinsim_core::simulation::Simulation;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The shared application state, created once at startup and passed to all
/// handlers.
pub struct AppState {
    pub simulation: Mutex<Simulation>,
    pub config: Arc<Config>,
}
