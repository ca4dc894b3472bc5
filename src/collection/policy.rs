//! Finish-policy modes for the selection loop.

use crate::error::{PromptSetError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// When and how the selection loop may terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FinishMode {
    /// Terminate the instant all required units are satisfied.
    Auto,
    /// Once all required units are satisfied, add a "Done?" entry to the
    /// selector; loop until the user selects and affirms it (default).
    #[default]
    Choice,
    /// Once all required units are satisfied, terminate automatically when no
    /// unit could still be re-edited; otherwise ask an explicit yes/no.
    Confirm,
    /// `Choice` and `Confirm` combined: the "Done?" entry is selectable, but
    /// the confirmation gate has the final say.
    Aggressive,
}

impl FinishMode {
    /// Parse a finish mode from its selector string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "choice" => Ok(Self::Choice),
            "confirm" => Ok(Self::Confirm),
            "aggressive" => Ok(Self::Aggressive),
            other => Err(PromptSetError::Policy(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Choice => "choice",
            Self::Confirm => "confirm",
            Self::Aggressive => "aggressive",
        }
    }

    /// Whether the finish unit is injected into the selector list once the
    /// collection is satisfied.
    pub(crate) fn shows_finish_choice(self) -> bool {
        matches!(self, Self::Choice | Self::Aggressive)
    }
}

impl fmt::Display for FinishMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
