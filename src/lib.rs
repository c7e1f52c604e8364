//! ExoSeekr tour — guided-onboarding orchestrator for the dashboard.

pub mod config;
pub mod error;
pub mod host;
pub mod store;
pub mod tour;
