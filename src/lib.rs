//! Orchestrates sequences of interactive prompts with dependencies and
//! finish policies.
//!
//! The building blocks:
//! - A [`Unit`](unit::Unit) is one named prompt: its question, its answer
//!   once collected, validator and filter chains, and the names of units
//!   that must be answered first.
//! - A [`Collection`](collection::Collection) owns units in display order
//!   and drives the selection loop: present a picker, dispatch to the chosen
//!   unit, repeat until the finish policy says the session is complete.
//! - A [`PromptEngine`](engine::PromptEngine) does the actual asking. The
//!   built-in [`TerminalEngine`](engine::TerminalEngine) talks to a console;
//!   the [`ScriptedEngine`](engine::ScriptedEngine) replays canned answers
//!   for tests and automation.
//!
//! ```no_run
//! use prompt_set::{Collection, FinishMode, Unit};
//!
//! let mut collection = Collection::terminal();
//! collection
//!     .add(Unit::input("name", "What is your name?")?)?
//!     .add(Unit::input("quest", "What is your quest?")?)?
//!     .add_prerequisite("name", Some("quest"))?
//!     .set_finish_mode(FinishMode::Auto);
//!
//! let answers = collection.start()?;
//! println!("{}", serde_json::to_string(&answers).unwrap_or_default());
//! # Ok::<(), prompt_set::PromptSetError>(())
//! ```

pub mod collection;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod filters;
pub mod listing;
pub mod unit;
pub mod validators;

pub use collection::{Collection, FINISH_UNIT_NAME, FinishMode};
pub use config::CollectionSpec;
pub use engine::{
    AnswerMap, AnswerValue, Choice, PromptEngine, PromptKind, Question, ScriptedEngine,
    TerminalEngine,
};
pub use error::{PromptSetError, Result};
pub use filters::Filter;
pub use unit::{DefaultValue, Unit, UnitConfig};
pub use validators::{Validation, Validator};
