//! Scripted, non-interactive engine.
//!
//! Answers questions from pre-seeded queues instead of a terminal. Used by
//! the test suite and useful for driving a collection from automation. The
//! engine is a cheap clone over shared state, so a caller can hand one clone
//! to a collection and keep another to inspect the transcript afterwards.

use super::{AnswerMap, AnswerValue, PromptEngine, PromptKind, Question};
use crate::error::{PromptSetError, Result};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

/// A record of one question the engine was asked to present.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedQuestion {
    pub name: String,
    pub kind: PromptKind,
    /// Choice values offered, for `Select` questions.
    pub choices: Vec<String>,
    /// The question's default, when it had one.
    pub default: Option<AnswerValue>,
    /// The already-collected answers handed along with the question.
    pub prior: AnswerMap,
}

#[derive(Default)]
struct ScriptState {
    /// Queued answers per question name, consumed front to back.
    answers: BTreeMap<String, VecDeque<AnswerValue>>,
    /// Queued selector picks (unit names), consumed front to back.
    selections: VecDeque<String>,
    transcript: Vec<PresentedQuestion>,
}

/// Deterministic engine that replays a script.
///
/// Scripts must be exhaustive: an unanswered question or an exhausted
/// selection queue is an engine failure, which keeps test runs from hanging
/// and surfaces missing steps immediately.
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    inner: Arc<Mutex<ScriptState>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.inner.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Queue an answer for the named question. Repeated calls queue repeated
    /// answers, consumed one per presentation.
    pub fn answer(self, name: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.state()
            .answers
            .entry(name.into())
            .or_default()
            .push_back(value.into());
        self
    }

    /// Queue a selector pick (the value of the choice to select).
    pub fn select(self, name: impl Into<String>) -> Self {
        self.state().selections.push_back(name.into());
        self
    }

    /// Every question presented so far, in order.
    pub fn transcript(&self) -> Vec<PresentedQuestion> {
        self.state().transcript.clone()
    }

    /// How many times a question with the given name was presented.
    pub fn times_presented(&self, name: &str) -> usize {
        self.state()
            .transcript
            .iter()
            .filter(|q| q.name == name)
            .count()
    }
}

impl PromptEngine for ScriptedEngine {
    fn prompt(&mut self, question: &Question, prior: &AnswerMap) -> Result<AnswerValue> {
        let mut state = self.state();
        state.transcript.push(PresentedQuestion {
            name: question.name.clone(),
            kind: question.kind.clone(),
            choices: question.choices.iter().map(|c| c.value.clone()).collect(),
            default: question.default.clone(),
            prior: prior.clone(),
        });

        if question.kind == PromptKind::Select {
            let pick = state.selections.pop_front().ok_or_else(|| {
                PromptSetError::Engine("selection script exhausted".to_string())
            })?;
            if !question.choices.iter().any(|c| c.value == pick) {
                return Err(PromptSetError::Engine(format!(
                    "scripted selection '{}' is not among the presented choices",
                    pick
                )));
            }
            return Ok(Value::String(pick));
        }

        let queued = state
            .answers
            .get_mut(&question.name)
            .and_then(VecDeque::pop_front);
        drop(state);

        let raw = match queued {
            Some(value) => value,
            None => {
                return question.default.clone().ok_or_else(|| {
                    PromptSetError::Engine(format!(
                        "no scripted answer for '{}'",
                        question.name
                    ))
                });
            }
        };

        // String answers go through the question's chains, the way an
        // interactive engine would run them. A rejected scripted answer is a
        // broken script, not a re-prompt.
        match raw {
            Value::String(s) => match question.validate(&s) {
                Ok(()) => Ok(Value::String(question.apply_filters(s))),
                Err(message) => Err(PromptSetError::Engine(format!(
                    "scripted answer for '{}' rejected: {}",
                    question.name, message
                ))),
            },
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filters, validators};

    fn input_question(name: &str) -> Question {
        Question::new(PromptKind::Input, name, "message")
    }

    #[test]
    fn test_answers_consumed_in_order() {
        let mut engine = ScriptedEngine::new()
            .answer("a", "first")
            .answer("a", "second");

        let q = input_question("a");
        assert_eq!(
            engine.prompt(&q, &AnswerMap::new()).unwrap(),
            Value::String("first".to_string())
        );
        assert_eq!(
            engine.prompt(&q, &AnswerMap::new()).unwrap(),
            Value::String("second".to_string())
        );
        // Exhausted and no default: engine failure.
        assert!(engine.prompt(&q, &AnswerMap::new()).is_err());
    }

    #[test]
    fn test_default_used_when_unscripted() {
        let mut engine = ScriptedEngine::new();
        let q = input_question("a").with_default(Value::String("fallback".to_string()));
        assert_eq!(
            engine.prompt(&q, &AnswerMap::new()).unwrap(),
            Value::String("fallback".to_string())
        );
    }

    #[test]
    fn test_chains_run_against_scripted_answers() {
        let mut engine = ScriptedEngine::new().answer("a", "  hi  ").answer("a", "   ");
        let q = input_question("a")
            .with_validators(vec![validators::non_blank()])
            .with_filters(vec![filters::auto_trim()]);

        assert_eq!(
            engine.prompt(&q, &AnswerMap::new()).unwrap(),
            Value::String("hi".to_string())
        );
        // Blank answer violates the chain: broken script.
        assert!(engine.prompt(&q, &AnswerMap::new()).is_err());
    }

    #[test]
    fn test_selection_must_match_a_choice() {
        let mut engine = ScriptedEngine::new().select("b").select("zzz");
        let q = Question::new(PromptKind::Select, "selector", "pick").with_choices(vec![
            super::super::Choice::new("A", "a"),
            super::super::Choice::new("B", "b"),
        ]);

        assert_eq!(
            engine.prompt(&q, &AnswerMap::new()).unwrap(),
            Value::String("b".to_string())
        );
        assert!(engine.prompt(&q, &AnswerMap::new()).is_err());
    }

    #[test]
    fn test_transcript_records_presentations() {
        let observer = ScriptedEngine::new().answer("a", "1");
        let mut engine = observer.clone();

        let q = input_question("a");
        engine.prompt(&q, &AnswerMap::new()).unwrap();

        let transcript = observer.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].name, "a");
        assert_eq!(transcript[0].kind, PromptKind::Input);
        assert_eq!(observer.times_presented("a"), 1);
    }
}
