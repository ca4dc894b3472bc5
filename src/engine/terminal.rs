//! Interactive terminal engine.
//!
//! A plain line-oriented implementation of [`PromptEngine`] over
//! [`console::Term`]: styled messages, validate-and-reprompt loops for input
//! questions, y/n confirmation, and numbered list selection.

use super::{AnswerMap, AnswerValue, PromptEngine, PromptKind, Question};
use crate::error::{PromptSetError, Result};
use console::{Term, style};
use serde_json::Value;
use std::io::{self, Write};

/// Terminal-backed prompt engine.
pub struct TerminalEngine {
    term: Term,
}

impl Default for TerminalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEngine {
    /// Create an engine talking to stdout/stdin.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn read_line(&self) -> Result<String> {
        self.term
            .read_line()
            .map_err(|e| PromptSetError::Engine(format!("failed to read input: {}", e)))
    }

    fn prompt_input(&mut self, question: &Question) -> Result<AnswerValue> {
        loop {
            match &question.default {
                Some(default) => print!(
                    "{} {} ",
                    style(&question.message).bold(),
                    style(format!("({})", display_default(default))).dim()
                ),
                None => print!("{} ", style(&question.message).bold()),
            }
            io::stdout().flush().ok();

            let raw = self.read_line()?;

            if raw.is_empty()
                && let Some(default) = &question.default
            {
                return Ok(default.clone());
            }

            if let Err(message) = question.validate(&raw) {
                println!("{}", style(message).red());
                continue;
            }

            return Ok(Value::String(question.apply_filters(raw)));
        }
    }

    fn prompt_confirm(&mut self, question: &Question) -> Result<AnswerValue> {
        let default = question
            .default
            .as_ref()
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            print!(
                "{} {} ",
                style(&question.message).bold(),
                style(hint).dim()
            );
            io::stdout().flush().ok();

            let raw = self.read_line()?;
            match raw.trim().to_lowercase().as_str() {
                "" => return Ok(Value::Bool(default)),
                "y" | "yes" => return Ok(Value::Bool(true)),
                "n" | "no" => return Ok(Value::Bool(false)),
                _ => println!("{}", style("Please answer y or n.").red()),
            }
        }
    }

    fn prompt_select(&mut self, question: &Question) -> Result<AnswerValue> {
        if question.choices.is_empty() {
            return Err(PromptSetError::Engine(
                "select question has no choices".to_string(),
            ));
        }

        // Cursor hint: the default names a choice value to highlight.
        let default_index = question
            .default
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|name| question.choices.iter().position(|c| c.value == name))
            .unwrap_or(0);

        println!("{}", style(&question.message).bold());
        for (i, choice) in question.choices.iter().enumerate() {
            let marker = if i == default_index { "❯" } else { " " };
            println!("  {} {}. {}", style(marker).cyan(), i + 1, choice.label);
        }

        loop {
            print!(
                "{} ",
                style(format!("Answer (default {}):", default_index + 1)).dim()
            );
            io::stdout().flush().ok();

            let raw = self.read_line()?;
            let trimmed = raw.trim();

            let index = if trimmed.is_empty() {
                default_index
            } else {
                match trimmed.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= question.choices.len() => n - 1,
                    _ => {
                        println!(
                            "{}",
                            style(format!(
                                "Enter a number between 1 and {}.",
                                question.choices.len()
                            ))
                            .red()
                        );
                        continue;
                    }
                }
            };

            return Ok(Value::String(question.choices[index].value.clone()));
        }
    }
}

fn display_default(default: &AnswerValue) -> String {
    match default {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl PromptEngine for TerminalEngine {
    fn prompt(&mut self, question: &Question, _prior: &AnswerMap) -> Result<AnswerValue> {
        match &question.kind {
            PromptKind::Confirm => self.prompt_confirm(question),
            PromptKind::Select => self.prompt_select(question),
            // Unknown kinds degrade to line input.
            PromptKind::Input | PromptKind::Custom(_) => self.prompt_input(question),
        }
    }

    fn clear(&mut self) {
        let _ = self.term.clear_screen();
    }
}
