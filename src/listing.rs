//! Selector list formatting.
//!
//! Pure mapping from a unit's answer state to the decorated entry shown in
//! the selection list: a status glyph plus the unit's display label.

use crate::engine::Choice;
use console::style;

/// How a unit should appear in the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    /// Answered and locked; selecting it again only reports a notice.
    Answered,
    /// Answered but re-editable.
    Editable,
    /// Unanswered with every dependency satisfied.
    Eligible,
    /// Unanswered with at least one unmet dependency.
    Blocked,
}

impl ListingStatus {
    /// Derive the status from a unit's flags and its dependency check.
    pub fn from_state(satisfied: bool, editable: bool, dependencies_met: bool) -> Self {
        if satisfied {
            if editable {
                ListingStatus::Editable
            } else {
                ListingStatus::Answered
            }
        } else if dependencies_met {
            ListingStatus::Eligible
        } else {
            ListingStatus::Blocked
        }
    }

    /// The bare status glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            ListingStatus::Answered => "✔",
            ListingStatus::Editable => "✎",
            ListingStatus::Eligible => "○",
            ListingStatus::Blocked => "✖",
        }
    }

    fn styled_glyph(self) -> String {
        let glyph = self.glyph();
        match self {
            ListingStatus::Answered => style(glyph).green().to_string(),
            ListingStatus::Editable => style(glyph).yellow().to_string(),
            ListingStatus::Eligible => style(glyph).cyan().to_string(),
            ListingStatus::Blocked => style(glyph).red().to_string(),
        }
    }
}

/// Build the selector entry for a unit: decorated label, name as the value.
pub fn listing_entry(name: &str, label: &str, status: ListingStatus) -> Choice {
    Choice::new(format!("{} {}", status.styled_glyph(), label), name)
}
