use thiserror::Error;

/// Configuration errors raised by the state machine.
///
/// All of these are fatal: they indicate a wiring mistake, not a runtime
/// condition the agent can recover from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsmError {
    #[error("Unknown state: {state}")]
    UnknownState { state: String },

    #[error("Duplicate state: {state}")]
    DuplicateState { state: String },

    #[error("No initial state registered")]
    MissingInitialState,

    #[error("Initial state already set to {existing}, refusing {rejected}")]
    MultipleInitialStates { existing: String, rejected: String },

    #[error("State {state} does not accept payload {payload}")]
    PayloadMismatch { state: String, payload: String },
}

impl FsmError {
    pub fn is_recoverable(&self) -> bool {
        false
    }
}

/// Errors raised while building the shared team roster.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    #[error("Roster full: capacity {capacity}")]
    RosterFull { capacity: usize },

    #[error("Agent {agent} already registered")]
    DuplicateMember { agent: u32 },

    #[error("Agent {agent} belongs to a different team")]
    WrongTeam { agent: u32 },
}

impl TeamError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TeamError::DuplicateMember { .. })
    }
}

/// Errors raised while loading or validating tuning configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised while wiring a minion brain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrainError {
    #[error("State machine error: {0}")]
    Fsm(#[from] FsmError),

    #[error("Team error: {0}")]
    Team(#[from] TeamError),
}

pub type Result<T> = std::result::Result<T, FsmError>;
