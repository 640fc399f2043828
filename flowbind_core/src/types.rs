//! Instance lifecycle types.
//!
//! The engine owns every lifecycle transition. These types only describe
//! what it reports and which requests it documents as legal.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wire::Operation;

/// Lifecycle state of a workflow instance as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Queued,
    Running,
    Paused,
    Errored,
    Terminated,
    Complete,
    /// Any state this client does not recognize
    #[serde(other)]
    Unknown,
}

impl InstanceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceState::Queued => "queued",
            InstanceState::Running => "running",
            InstanceState::Paused => "paused",
            InstanceState::Errored => "errored",
            InstanceState::Terminated => "terminated",
            InstanceState::Complete => "complete",
            InstanceState::Unknown => "unknown",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InstanceState::Errored | InstanceState::Terminated | InstanceState::Complete
        )
    }

    /// Whether the engine documents `op` as legal from this state.
    ///
    /// The client never checks this before sending; a request the engine
    /// refuses comes back as a call failure.
    pub fn accepts(&self, op: Operation) -> bool {
        match op {
            Operation::Pause => *self == InstanceState::Running,
            Operation::Resume => *self == InstanceState::Paused,
            Operation::Abort => !self.is_terminal(),
            Operation::Restart | Operation::Status | Operation::Get | Operation::Create => true,
        }
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Operation {
    /// State the engine moves an instance to when it accepts this request.
    ///
    /// Restart re-enters at `queued`; engines may schedule it straight away.
    pub fn requested_state(&self) -> Option<InstanceState> {
        match self {
            Operation::Pause => Some(InstanceState::Paused),
            Operation::Resume => Some(InstanceState::Running),
            Operation::Abort => Some(InstanceState::Terminated),
            Operation::Restart => Some(InstanceState::Queued),
            Operation::Get | Operation::Create | Operation::Status => None,
        }
    }
}

/// Snapshot returned by `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceStatus {
    pub status: InstanceState,
    /// Present when `status` is `errored`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Present when `status` is `complete`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}

impl InstanceStatus {
    pub fn new(status: InstanceState) -> Self {
        Self {
            status,
            error: None,
            output: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
