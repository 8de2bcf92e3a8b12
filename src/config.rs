//! Machine configuration.

use crate::error::MachineError;
use serde::{Deserialize, Serialize};

/// History length kept when the host does not choose one.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Host-supplied settings for a [`StateMachine`](crate::effects::StateMachine).
///
/// Every field has a default, so a partial JSON document is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name used in log events.
    pub name: String,

    /// Maximum number of committed transitions kept in history.
    /// Defaults to [`DEFAULT_HISTORY_LIMIT`]. `None` keeps everything, so the
    /// history then grows by one entry per committed transition for the
    /// lifetime of the machine.
    pub history_limit: Option<usize>,
}

impl MachineConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Keep every committed transition.
    pub fn with_unbounded_history(mut self) -> Self {
        self.history_limit = None;
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, MachineError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: "machine".to_string(),
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}
