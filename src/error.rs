use thiserror::Error;

use crate::control_system::signal_head::Phase;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Route {route} is invalid: {reason}")]
    InvalidRoute { route: String, reason: String },

    #[error("Cycle {cycle} does not contain any routes")]
    EmptyCycle { cycle: String },

    #[error("Cycle {cycle} contains routes that cannot be green at the same time")]
    IncompatibleCycle { cycle: String },

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Unknown {kind} {id}")]
    UnknownReference { kind: &'static str, id: String },

    #[error("Through traffic is going in cycle {cycle}, cannot allow conditional routes")]
    ConditionalWhileThroughLive { cycle: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl ControlError {
    /// Fatal errors raised while building a controller. Nothing built from
    /// a configuration that produced one of these may be used.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, ControlError::ConditionalWhileThroughLive { .. })
    }
}

/// Failure reported by a lamp driver. Stays inside the head's task.
#[derive(Debug, Error)]
#[error("signal head {head} failed to show {phase:?}: {reason}")]
pub struct ActuatorError {
    pub head: String,
    pub phase: Phase,
    pub reason: String,
}
