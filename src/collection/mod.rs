//! The collection: an ordered set of units plus the selection loop.
//!
//! A [`Collection`] owns its units in insertion order (the default display
//! order), the injected prompt engine, the synthetic finish-confirmation
//! unit, and the finish-policy state machine. Membership operations are
//! chainable; the loop itself lives in the sibling `run` module.
//!
//! The unit list is the single source of truth: name views are derived on
//! demand, so the list and the name index cannot drift apart.

use crate::engine::{AnswerMap, PromptEngine, PromptKind, TerminalEngine};
use crate::error::{PromptSetError, Result};
use crate::events::{self, Event, EventAction};
use crate::unit::{Unit, UnitConfig};
use serde_json::Value;
use std::fmt;

mod policy;
mod run;

pub use policy::FinishMode;

/// Reserved name of the synthetic finish-confirmation unit. User units must
/// not reuse it.
pub const FINISH_UNIT_NAME: &str = "__finish__";

/// Answer key of the selector question.
pub(crate) const SELECTOR_NAME: &str = "__selector__";

/// Ordered container of units plus the dependency-aware selection loop.
pub struct Collection {
    units: Vec<Unit>,
    engine: Box<dyn PromptEngine>,
    finish_mode: FinishMode,
    finish_unit: Unit,
    /// Name of the last-selected unit; defaults the selector cursor.
    cursor_hint: Option<String>,
    /// Most recently added-or-targeted unit; implicit target for
    /// dependency-editing operations.
    last_touched: Option<String>,
    /// Whether to clear the engine's display after each prompt.
    autoclear: bool,
    satisfied: bool,
    events: Vec<Event>,
}

fn build_finish_unit() -> Unit {
    let mut config = UnitConfig::new(
        FINISH_UNIT_NAME,
        "Confirm that you are finished (Default: No)",
    );
    config.kind = PromptKind::Confirm;
    config.label = Some("Done?".to_string());
    config.default = Some(Value::Bool(false));
    let mut unit = Unit::new(config).expect("finish unit configuration is valid");
    // Confirmation answers are booleans; the string chains do not apply.
    unit.set_allow_blank(true);
    unit
}

impl Collection {
    /// Create an empty collection driven by the given engine.
    pub fn new(engine: impl PromptEngine + 'static) -> Self {
        Self {
            units: Vec::new(),
            engine: Box::new(engine),
            finish_mode: FinishMode::default(),
            finish_unit: build_finish_unit(),
            cursor_hint: None,
            last_touched: None,
            autoclear: true,
            satisfied: false,
            events: Vec::new(),
        }
    }

    /// Create an empty collection driven by the built-in terminal engine.
    pub fn terminal() -> Self {
        Self::new(TerminalEngine::new())
    }

    /// Empty and reset the collection for reuse. Keeps the engine.
    pub fn reset(&mut self) -> &mut Self {
        self.units.clear();
        self.finish_mode = FinishMode::default();
        self.finish_unit = build_finish_unit();
        self.cursor_hint = None;
        self.last_touched = None;
        self.autoclear = true;
        self.satisfied = false;
        self.events.clear();
        self
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Add a unit. A duplicate name warns (non-fatal) and replaces the prior
    /// unit in place, keeping its position; otherwise the unit is appended.
    /// Updates the last-touched unit either way. Fails on the reserved finish
    /// name, which would shadow the synthetic finish unit in the selector.
    pub fn add(&mut self, unit: Unit) -> Result<&mut Self> {
        let name = unit.name().to_string();
        if name == FINISH_UNIT_NAME {
            return Err(PromptSetError::Configuration(format!(
                "'{}' is reserved for the finish confirmation",
                FINISH_UNIT_NAME
            )));
        }
        if let Some(idx) = self.position(&name) {
            eprintln!("warning: overwriting a prompt with an identical name: '{}'", name);
            self.units[idx] = unit;
            self.events.push(Event::new(EventAction::Replaced).with_unit(&name));
        } else {
            self.units.push(unit);
            self.events.push(Event::new(EventAction::Added).with_unit(&name));
        }
        self.last_touched = Some(name);
        Ok(self)
    }

    /// Construct a unit from its configuration and add it.
    pub fn add_new(&mut self, config: UnitConfig) -> Result<&mut Self> {
        let unit = Unit::new(config)?;
        self.add(unit)
    }

    /// Construct and add several units, first to last.
    pub fn add_units(
        &mut self,
        configs: impl IntoIterator<Item = UnitConfig>,
    ) -> Result<&mut Self> {
        for config in configs {
            self.add_new(config)?;
        }
        Ok(self)
    }

    /// Remove a unit by name.
    ///
    /// Dependency names in other units that pointed at the removed unit are
    /// left in place; they surface as a lookup failure when next evaluated.
    pub fn remove(&mut self, name: &str) -> Result<&mut Self> {
        let idx = self
            .position(name)
            .ok_or_else(|| PromptSetError::NotFound(name.to_string()))?;
        self.units.remove(idx);
        if self.last_touched.as_deref() == Some(name) {
            self.last_touched = None;
        }
        if self.cursor_hint.as_deref() == Some(name) {
            self.cursor_hint = None;
        }
        self.events.push(Event::new(EventAction::Removed).with_unit(name));
        Ok(self)
    }

    /// Look up a unit by name.
    pub fn get(&self, name: &str) -> Result<&Unit> {
        self.units
            .iter()
            .find(|u| u.name() == name)
            .ok_or_else(|| PromptSetError::NotFound(name.to_string()))
    }

    /// Look up a unit by name, mutably. Marks it last-touched.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Unit> {
        let idx = self
            .position(name)
            .ok_or_else(|| PromptSetError::NotFound(name.to_string()))?;
        self.last_touched = Some(name.to_string());
        Ok(&mut self.units[idx])
    }

    /// Unit names in display order.
    pub fn names(&self) -> Vec<&str> {
        self.units.iter().map(Unit::name).collect()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The most recently added-or-targeted unit's name.
    pub fn last_touched(&self) -> Option<&str> {
        self.last_touched.as_deref()
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.units.iter().position(|u| u.name() == name)
    }

    // =========================================================================
    // Dependency editing
    // =========================================================================

    /// Add a prerequisite to `target`, or to the last-touched unit when no
    /// target is given. The prerequisite name itself is not checked for
    /// existence here; a dangling reference fails at dependency-check time.
    pub fn add_prerequisite(&mut self, dependency: &str, target: Option<&str>) -> Result<&mut Self> {
        let target = self.resolve_target(target)?;
        self.get_mut(&target)?.add_dependency(dependency);
        Ok(self)
    }

    /// Remove a prerequisite from `target`, defaulting to the last-touched
    /// unit.
    pub fn remove_prerequisite(
        &mut self,
        dependency: &str,
        target: Option<&str>,
    ) -> Result<&mut Self> {
        let target = self.resolve_target(target)?;
        self.get_mut(&target)?.remove_dependency(dependency);
        Ok(self)
    }

    /// Mark a unit required or optional.
    pub fn set_required(&mut self, name: &str, required: bool) -> Result<&mut Self> {
        self.get_mut(name)?.set_required(required);
        Ok(self)
    }

    /// Mark a unit re-editable or locked after answering.
    pub fn set_editable(&mut self, name: &str, editable: bool) -> Result<&mut Self> {
        self.get_mut(name)?.set_editable(editable);
        Ok(self)
    }

    fn resolve_target(&self, target: Option<&str>) -> Result<String> {
        match target {
            Some(name) => Ok(name.to_string()),
            None => self.last_touched.clone().ok_or_else(|| {
                PromptSetError::NotFound(
                    "no target unit given and none was recently touched".to_string(),
                )
            }),
        }
    }

    // =========================================================================
    // Policy and display configuration
    // =========================================================================

    pub fn finish_mode(&self) -> FinishMode {
        self.finish_mode
    }

    pub fn set_finish_mode(&mut self, mode: FinishMode) -> &mut Self {
        self.finish_mode = mode;
        self
    }

    /// Set the finish mode from its selector string. Fails with a policy
    /// error on unknown strings.
    pub fn set_finish_mode_str(&mut self, mode: &str) -> Result<&mut Self> {
        self.finish_mode = FinishMode::from_str(mode)?;
        Ok(self)
    }

    pub fn set_autoclear(&mut self, autoclear: bool) -> &mut Self {
        self.autoclear = autoclear;
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether every dependency of the named unit is satisfied. A dependency
    /// name with no matching unit is a hard lookup failure.
    pub fn prerequisites_satisfied(&self, name: &str) -> Result<bool> {
        let unit = self.get(name)?;
        Ok(self.first_unmet_dependency(unit)?.is_none())
    }

    /// The first unsatisfied dependency of `unit`, in stored order.
    pub(crate) fn first_unmet_dependency<'a>(&'a self, unit: &Unit) -> Result<Option<&'a Unit>> {
        for dependency in unit.dependencies() {
            let found = if dependency == FINISH_UNIT_NAME {
                &self.finish_unit
            } else {
                self.units
                    .iter()
                    .find(|u| u.name() == dependency)
                    .ok_or_else(|| PromptSetError::NotFound(dependency.clone()))?
            };
            if !found.satisfied() {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// True iff every required unit is satisfied. Optional units never block
    /// aggregate completion.
    pub fn is_satisfied(&self) -> bool {
        self.units.iter().all(|u| !u.required() || u.satisfied())
    }

    /// Whether the loop has completed.
    pub fn satisfied(&self) -> bool {
        self.satisfied
    }

    /// Collect the answered units into a name-to-value mapping. Unsatisfied
    /// units are omitted, not defaulted.
    pub fn reduce(&self) -> AnswerMap {
        self.units
            .iter()
            .filter(|u| u.satisfied())
            .filter_map(|u| u.value().map(|v| (u.name().to_string(), v.clone())))
            .collect()
    }

    /// The reduced mapping serialized as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.reduce())
            .map_err(|e| PromptSetError::Configuration(format!("failed to serialize answers: {}", e)))
    }

    // =========================================================================
    // Event trace
    // =========================================================================

    /// Everything the orchestrator has recorded so far, in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The event trace rendered as NDJSON.
    pub fn events_ndjson(&self) -> Result<String> {
        events::events_ndjson(&self.events)
    }
}

impl fmt::Display for Collection {
    /// Serialized reduced mapping; `{}` when serialization is impossible.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "{{}}"),
        }
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("units", &self.names())
            .field("finish_mode", &self.finish_mode)
            .field("satisfied", &self.satisfied)
            .finish_non_exhaustive()
    }
}
