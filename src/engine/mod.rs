//! The external prompt engine seam.
//!
//! This module defines the single I/O boundary of the library: a
//! [`PromptEngine`] renders exactly one question at a time and returns the
//! answer. The orchestration layer (units and collections) never touches the
//! terminal itself; it builds a declarative [`Question`] and suspends on the
//! engine. Engines are injected at collection construction, so swapping in
//! the [`ScriptedEngine`] for tests or an alternate UI is a constructor
//! argument, not global state.

use crate::error::Result;
use crate::filters::Filter;
use crate::validators::{Validation, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

mod scripted;
mod terminal;

pub use scripted::{PresentedQuestion, ScriptedEngine};
pub use terminal::TerminalEngine;

/// An answer as returned by an engine. Never interpreted by the core beyond
/// pass-through (and a boolean read on the finish confirmation).
pub type AnswerValue = Value;

/// Collected answers, keyed by unit name. BTreeMap for deterministic
/// serialization order.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// The kind of question an engine is asked to render.
///
/// Converts to and from plain strings so declarative configs can spell kinds
/// the way the engine expects, including kinds this library knows nothing
/// about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PromptKind {
    /// Free-form line input (the default).
    Input,
    /// Yes/no confirmation with a boolean answer.
    Confirm,
    /// Selection from a list of choices; answers with the chosen value.
    Select,
    /// Any other kind, passed through to the engine verbatim.
    Custom(String),
}

impl Default for PromptKind {
    fn default() -> Self {
        PromptKind::Input
    }
}

impl From<String> for PromptKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "input" => PromptKind::Input,
            "confirm" => PromptKind::Confirm,
            "select" | "list" => PromptKind::Select,
            _ => PromptKind::Custom(s),
        }
    }
}

impl From<PromptKind> for String {
    fn from(kind: PromptKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptKind::Input => write!(f, "input"),
            PromptKind::Confirm => write!(f, "confirm"),
            PromptKind::Select => write!(f, "select"),
            PromptKind::Custom(kind) => write!(f, "{}", kind),
        }
    }
}

/// One selectable entry of a [`PromptKind::Select`] question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Display text, possibly decorated with a status glyph.
    pub label: String,
    /// The value answered when this entry is chosen (a unit name).
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A fully composed question handed to a [`PromptEngine`].
///
/// Carries the unit's configuration plus its composed validator and filter
/// chains. The engine is expected to call [`Question::validate`] on every
/// candidate answer (re-prompting with the returned message on rejection) and
/// [`Question::apply_filters`] on the accepted raw answer before returning it.
#[derive(Debug, Clone)]
pub struct Question {
    pub kind: PromptKind,
    /// The answer key; a unit's name.
    pub name: String,
    pub message: String,
    /// Value to use when the user submits a blank answer.
    pub default: Option<AnswerValue>,
    /// Choices for `Select` questions; empty otherwise.
    pub choices: Vec<Choice>,
    /// Pass-through configuration for engines that understand more fields.
    pub extra: BTreeMap<String, AnswerValue>,
    validators: Vec<Validator>,
    filters: Vec<Filter>,
}

impl Question {
    /// Create a bare question with no chains and no default.
    pub fn new(kind: PromptKind, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            message: message.into(),
            default: None,
            choices: Vec::new(),
            extra: BTreeMap::new(),
            validators: Vec::new(),
            filters: Vec::new(),
        }
    }

    pub fn with_default(mut self, default: AnswerValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_extra(mut self, extra: BTreeMap<String, AnswerValue>) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_validators(mut self, validators: Vec<Validator>) -> Self {
        self.validators = validators;
        self
    }

    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    /// Run the validator chain in order. The first rejection wins and its
    /// message should be shown to the user; `Ok(())` means the candidate is
    /// acceptable.
    pub fn validate(&self, candidate: &str) -> Validation {
        for validator in &self.validators {
            validator.check(candidate)?;
        }
        Ok(())
    }

    /// Pipe an accepted raw answer through the filter chain, left to right.
    pub fn apply_filters(&self, raw: String) -> String {
        self.filters
            .iter()
            .fold(raw, |value, filter| filter.apply(value))
    }
}

/// The opaque suspend point: renders one question, resolves with one answer.
///
/// Implementations must serialize interaction themselves if they have any
/// shared state; the orchestrator guarantees it never has more than one
/// question in flight.
pub trait PromptEngine {
    /// Present `question` and return the user's answer.
    ///
    /// `prior` holds the answers collected so far, for engines that support
    /// cross-question interpolation; engines are free to ignore it.
    fn prompt(&mut self, question: &Question, prior: &AnswerMap) -> Result<AnswerValue>;

    /// Clear the engine's display surface. No-op by default.
    fn clear(&mut self) {}
}
