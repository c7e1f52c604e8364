//! Error types for the tour orchestrator.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),
}

/// Configuration errors — fatal at startup validation, never at runtime.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Step registry is empty")]
    EmptyRegistry,

    #[error("Duplicate step id: {0}")]
    DuplicateStepId(String),

    #[error("Step {step_id} names unknown route: {route}")]
    UnknownRoute { step_id: String, route: String },
}

/// Durable-storage errors. Recovered locally by the persistence adapter;
/// never reach the tour's callers.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Host navigation failures. Recovered locally by the synchronizer via
/// the anchorless centered fallback.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Navigation to {route} failed: {reason}")]
    Failed { route: String, reason: String },
}

/// Rejected state-machine transitions. Surfaced at debug level only and
/// treated as no-ops by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Tour is already running")]
    AlreadyRunning,

    #[error("{op} is only valid while running (status: {status})")]
    NotRunning { op: &'static str, status: String },

    #[error("Cannot retreat past the first step")]
    AtFirstStep,
}
