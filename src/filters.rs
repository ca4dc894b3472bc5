//! Built-in answer filters.
//!
//! A filter is a pure `String -> String` transform applied to an accepted
//! answer before it is stored. Filters are carried as [`Filter`] handles so a
//! chain can deduplicate and remove entries by function identity, the same
//! way a unit's validator chain works.
//!
//! The built-in constructors hand back clones of process-wide shared handles,
//! so calling `auto_trim()` twice yields the *same* chain entry and adding it
//! twice is a no-op.

use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// A named, identity-comparable answer filter.
///
/// Cloning a `Filter` is cheap and preserves identity: two clones of the same
/// handle compare equal, while two independently constructed filters never do,
/// even when they wrap the same code.
#[derive(Clone)]
pub struct Filter {
    name: &'static str,
    func: Arc<dyn Fn(String) -> String + Send + Sync>,
}

impl Filter {
    /// Wrap a transform in an anonymous filter handle.
    pub fn new(func: impl Fn(String) -> String + Send + Sync + 'static) -> Self {
        Self::named("custom", func)
    }

    /// Wrap a transform in a named filter handle. The name only shows up in
    /// debug output.
    pub fn named(name: &'static str, func: impl Fn(String) -> String + Send + Sync + 'static) -> Self {
        Self {
            name,
            func: Arc::new(func),
        }
    }

    /// Apply the filter to an answer.
    pub fn apply(&self, value: String) -> String {
        (self.func)(value)
    }

    /// The filter's debug name.
    pub fn name(&self) -> &str {
        self.name
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.name).finish()
    }
}

static AUTO_TRIM: LazyLock<Filter> =
    LazyLock::new(|| Filter::named("auto_trim", |v| v.trim().to_string()));

static SINGLE_SPACE: LazyLock<Filter> = LazyLock::new(|| {
    static WHITESPACE_RUN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));
    Filter::named("single_space", |v| {
        WHITESPACE_RUN.replace_all(&v, " ").into_owned()
    })
});

static UPPER_CASE: LazyLock<Filter> =
    LazyLock::new(|| Filter::named("upper_case", |v| v.to_uppercase()));

static LOWER_CASE: LazyLock<Filter> =
    LazyLock::new(|| Filter::named("lower_case", |v| v.to_lowercase()));

/// Whitespace-trimming filter.
pub fn auto_trim() -> Filter {
    AUTO_TRIM.clone()
}

/// Collapses every run of whitespace into a single space.
pub fn single_space() -> Filter {
    SINGLE_SPACE.clone()
}

/// Uppercases the whole answer.
pub fn upper_case() -> Filter {
    UPPER_CASE.clone()
}

/// Lowercases the whole answer.
pub fn lower_case() -> Filter {
    LOWER_CASE.clone()
}
