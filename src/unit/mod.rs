//! The unit model: one named question plus its metadata and answer state.
//!
//! A [`Unit`] owns its configuration (kind, message, default, pass-through
//! options), its dependency list, its filter/validator chains, and its
//! answer-collection lifecycle. It knows nothing about sequencing; the
//! collection decides when a unit may run, the unit only builds the question
//! and suspends on the engine.

use crate::engine::{AnswerMap, AnswerValue, Choice, PromptEngine, PromptKind, Question};
use crate::error::{PromptSetError, Result};
use crate::filters::Filter;
use crate::listing::{self, ListingStatus};
use crate::validators::{self, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

mod chains;

/// Declarative configuration for a unit.
///
/// `name` is the only hard requirement; everything else has a usable default.
/// Unknown fields are preserved in `extra` and passed through to the engine
/// untouched, so engine-specific options survive a round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Unique key within a collection; dependency references and the final
    /// output mapping use this.
    pub name: String,

    /// Text displayed when the unit runs.
    pub message: String,

    /// Question kind understood by the engine.
    pub kind: PromptKind,

    /// Display text in the selector list. Defaults to `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Value used when the user submits a blank answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<AnswerValue>,

    /// Whether aggregate collection satisfaction waits on this unit.
    pub required: bool,

    /// Whether the unit may be re-selected and answered again.
    pub editable: bool,

    /// Names of units that must be satisfied before this one may run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Pass-through configuration for the engine.
    #[serde(flatten)]
    pub extra: BTreeMap<String, AnswerValue>,
}

impl UnitConfig {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            ..Self::default()
        }
    }
}

/// A default answer: either a literal value or a producer invoked each time
/// the question is built.
#[derive(Clone)]
pub enum DefaultValue {
    Value(AnswerValue),
    Compute(Arc<dyn Fn() -> AnswerValue + Send + Sync>),
}

impl DefaultValue {
    /// Resolve to a concrete value.
    pub fn resolve(&self) -> AnswerValue {
        match self {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::Compute(func) => func(),
        }
    }
}

impl From<AnswerValue> for DefaultValue {
    fn from(value: AnswerValue) -> Self {
        DefaultValue::Value(value)
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Compute(_) => f.debug_tuple("Compute").field(&"<fn>").finish(),
        }
    }
}

/// A single named question with configuration, dependencies, and answer state.
#[derive(Debug)]
pub struct Unit {
    name: String,
    label: String,
    kind: PromptKind,
    message: String,
    default: Option<DefaultValue>,
    extra: BTreeMap<String, AnswerValue>,
    required: bool,
    editable: bool,
    satisfied: bool,
    value: Option<AnswerValue>,
    /// Kept trimmed, deduplicated, and sorted for deterministic display.
    dependencies: Vec<String>,
    pub(crate) filters: Vec<Filter>,
    pub(crate) validators: Vec<Validator>,
}

impl Unit {
    /// Build a unit from its configuration.
    ///
    /// Seeds the validator chain with [`validators::non_blank`]; use
    /// [`Unit::set_allow_blank`] to lift that. Fails when `name` is empty.
    pub fn new(config: UnitConfig) -> Result<Self> {
        if config.name.trim().is_empty() {
            return Err(PromptSetError::Configuration(
                "unit name is required and must be non-empty".to_string(),
            ));
        }

        let label = config.label.unwrap_or_else(|| config.name.clone());
        let mut unit = Self {
            name: config.name,
            label,
            kind: config.kind,
            message: config.message,
            default: config.default.map(DefaultValue::Value),
            extra: config.extra,
            required: config.required,
            editable: config.editable,
            satisfied: false,
            value: None,
            dependencies: Vec::new(),
            filters: Vec::new(),
            validators: vec![validators::non_blank()],
        };
        for dependency in config.dependencies {
            unit.add_dependency(&dependency);
        }
        Ok(unit)
    }

    /// Shorthand for a plain input unit.
    pub fn input(name: impl Into<String>, message: impl Into<String>) -> Result<Self> {
        Self::new(UnitConfig::new(name, message))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &PromptKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn satisfied(&self) -> bool {
        self.satisfied
    }

    /// The accepted answer; `None` until the unit has run (or been preset).
    pub fn value(&self) -> Option<&AnswerValue> {
        self.value.as_ref()
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    // =========================================================================
    // Chainable configuration
    // =========================================================================

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = message.into();
        self
    }

    pub fn set_kind(&mut self, kind: PromptKind) -> &mut Self {
        self.kind = kind;
        self
    }

    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    pub fn set_editable(&mut self, editable: bool) -> &mut Self {
        self.editable = editable;
        self
    }

    /// Set a literal default answer.
    pub fn set_default(&mut self, default: impl Into<AnswerValue>) -> &mut Self {
        self.default = Some(DefaultValue::Value(default.into()));
        self
    }

    /// Set a computed default, resolved every time the question is built.
    pub fn set_default_fn(
        &mut self,
        func: impl Fn() -> AnswerValue + Send + Sync + 'static,
    ) -> &mut Self {
        self.default = Some(DefaultValue::Compute(Arc::new(func)));
        self
    }

    /// Pass an engine-specific option through with the question.
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) -> &mut Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Seed an answer without running the unit. Marks it satisfied.
    pub fn preset_value(&mut self, value: impl Into<AnswerValue>) -> &mut Self {
        self.value = Some(value.into());
        self.satisfied = true;
        self
    }

    /// Drop the satisfaction flag while keeping any previous answer.
    /// Collection-internal: used on the synthetic finish unit so it stays
    /// selectable across loop iterations.
    pub(crate) fn reset_satisfaction(&mut self) {
        self.satisfied = false;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Run the unit: build the question, suspend on the engine, store the
    /// answer, and mark the unit satisfied.
    ///
    /// May be invoked repeatedly when the unit is editable; every invocation
    /// re-runs the full filter and validator chains. Engine failures
    /// propagate unchanged.
    pub fn run(&mut self, engine: &mut dyn PromptEngine, prior: &AnswerMap) -> Result<AnswerValue> {
        let mut question = Question::new(self.kind.clone(), self.name.clone(), self.message.clone())
            .with_extra(self.extra.clone())
            .with_validators(self.validators.clone())
            .with_filters(self.filters.clone());
        if let Some(default) = &self.default {
            question = question.with_default(default.resolve());
        }

        let answer = engine.prompt(&question, prior)?;
        self.value = Some(answer.clone());
        self.satisfied = true;
        Ok(answer)
    }

    /// Status of this unit in a selector list, given the collection's verdict
    /// on its dependencies.
    pub fn listing_status(&self, dependencies_met: bool) -> ListingStatus {
        ListingStatus::from_state(self.satisfied, self.editable, dependencies_met)
    }

    /// The decorated selector entry for this unit.
    pub fn listing_entry(&self, dependencies_met: bool) -> Choice {
        listing::listing_entry(&self.name, &self.label, self.listing_status(dependencies_met))
    }
}
