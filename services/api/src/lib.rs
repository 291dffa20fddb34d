//! clinsim API Library Crate
//!
//! This library contains the web service around the simulation core: the
//! HeyGen avatar client, environment configuration, application state, API
//! handlers, and routing. The `api` binary is a thin wrapper around it.

pub mod config;
pub mod handlers;
pub mod heygen;
pub mod models;
pub mod router;
pub mod state;
