//! The selection loop and finish-policy evaluation.
//!
//! One iteration is: evaluate the finish policy, present the selector,
//! dispatch to the chosen unit. The loop has exactly two suspend points per
//! iteration (the selector prompt and the chosen unit's own prompt) and
//! never has more than one question in flight.

use super::{Collection, FINISH_UNIT_NAME, FinishMode, SELECTOR_NAME};
use crate::engine::{AnswerMap, Choice, PromptKind, Question};
use crate::error::{PromptSetError, Result};
use crate::events::{Event, EventAction};
use serde_json::Value;

/// What the selector resolved to.
enum Selection {
    /// Index of a unit in the collection.
    Unit(usize),
    /// The synthetic finish unit.
    Finish,
}

impl Collection {
    /// Drive the selection loop until the finish policy signals termination,
    /// then resolve with the reduced name-to-value mapping.
    ///
    /// Fails with [`PromptSetError::EmptyCollection`] before any I/O when the
    /// collection holds no units. Engine failures abort the loop and
    /// propagate unchanged; the loop never retries a failed prompt.
    pub fn start(&mut self) -> Result<AnswerMap> {
        if self.units.is_empty() {
            return Err(PromptSetError::EmptyCollection);
        }

        let mut skip_finish_check = false;
        loop {
            if !skip_finish_check && self.is_finished()? {
                break;
            }
            skip_finish_check = false;

            match self.select_unit()? {
                Selection::Finish => {
                    // Under aggressive the list entry only signals intent;
                    // the confirmation gate in is_finished has the final say.
                    if self.finish_mode == FinishMode::Aggressive {
                        continue;
                    }
                    let prior = self.reduce();
                    let engine = &mut *self.engine;
                    self.finish_unit.run(engine, &prior)?;
                    if self.autoclear {
                        engine.clear();
                    }
                }
                Selection::Unit(idx) => {
                    let (name, answered_and_locked) = {
                        let unit = &self.units[idx];
                        (
                            unit.name().to_string(),
                            unit.satisfied() && !unit.editable(),
                        )
                    };

                    if answered_and_locked {
                        if self.autoclear {
                            self.engine.clear();
                        }
                        println!("Prompt already answered. (Editing this prompt is disabled)");
                        self.events
                            .push(Event::new(EventAction::AlreadyAnswered).with_unit(name));
                        // The collection state did not change; re-present the
                        // selector without re-evaluating the finish policy.
                        skip_finish_check = true;
                        continue;
                    }

                    let blocker = {
                        let unit = &self.units[idx];
                        self.first_unmet_dependency(unit)?
                            .map(|b| b.label().to_string())
                    };
                    if let Some(blocker_label) = blocker {
                        println!("Prompt must be answered before this:\n{}", blocker_label);
                        self.events.push(
                            Event::new(EventAction::Blocked)
                                .with_unit(name)
                                .with_detail(blocker_label),
                        );
                        continue;
                    }

                    let prior = self.reduce();
                    let engine = &mut *self.engine;
                    self.units[idx].run(engine, &prior)?;
                    if self.autoclear {
                        engine.clear();
                    }
                    self.events
                        .push(Event::new(EventAction::Answered).with_unit(name));
                }
            }
        }

        self.satisfied = true;
        self.events.push(Event::new(EventAction::Finished));
        Ok(self.reduce())
    }

    /// Evaluate the finish policy. Under confirm-style modes this may itself
    /// suspend on the finish unit's confirmation prompt.
    fn is_finished(&mut self) -> Result<bool> {
        if !self.is_satisfied() {
            return Ok(false);
        }

        match self.finish_mode {
            FinishMode::Auto => Ok(true),
            FinishMode::Choice => Ok(self
                .finish_unit
                .value()
                .and_then(Value::as_bool)
                .unwrap_or(false)),
            FinishMode::Confirm | FinishMode::Aggressive => {
                // Nothing left that could be re-edited: no point confirming.
                if self.units.iter().all(|u| u.satisfied() && !u.editable()) {
                    return Ok(true);
                }
                let prior = self.reduce();
                let engine = &mut *self.engine;
                let answer = self.finish_unit.run(engine, &prior)?;
                if self.autoclear {
                    engine.clear();
                }
                Ok(answer.as_bool().unwrap_or(false))
            }
        }
    }

    /// Present the selector and resolve the chosen entry.
    ///
    /// When only one entry is available it is picked without prompting, as a
    /// selector with a single option has nothing to ask.
    fn select_unit(&mut self) -> Result<Selection> {
        let choices = self.selector_choices()?;

        let picked = if choices.len() == 1 {
            choices[0].value.clone()
        } else {
            let mut question =
                Question::new(PromptKind::Select, SELECTOR_NAME, "Choose a prompt to answer")
                    .with_choices(choices);
            if let Some(hint) = &self.cursor_hint {
                question = question.with_default(Value::String(hint.clone()));
            }

            let engine = &mut *self.engine;
            let answer = engine.prompt(&question, &AnswerMap::new())?;
            if self.autoclear {
                engine.clear();
            }
            answer
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| {
                    PromptSetError::Engine("selector answered with a non-string value".to_string())
                })?
        };

        self.cursor_hint = Some(picked.clone());

        if picked == FINISH_UNIT_NAME {
            return Ok(Selection::Finish);
        }
        let idx = self
            .position(&picked)
            .ok_or_else(|| PromptSetError::NotFound(picked))?;
        Ok(Selection::Unit(idx))
    }

    /// The selector's choice list: every unit decorated with its status, plus
    /// the finish entry when the policy calls for it.
    fn selector_choices(&mut self) -> Result<Vec<Choice>> {
        let mut choices = Vec::with_capacity(self.units.len() + 1);
        for unit in &self.units {
            let dependencies_met = self.first_unmet_dependency(unit)?.is_none();
            choices.push(unit.listing_entry(dependencies_met));
        }

        if self.is_satisfied() && self.finish_mode.shows_finish_choice() {
            // Keep the finish entry selectable across iterations.
            self.finish_unit.reset_satisfaction();
            choices.push(self.finish_unit.listing_entry(true));
        }

        Ok(choices)
    }
}
