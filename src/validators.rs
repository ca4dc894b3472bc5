//! Built-in answer validators.
//!
//! A validator inspects a raw candidate answer and either accepts it
//! (`Ok(())`) or rejects it with a user-facing message (`Err(message)`).
//! Rejection is normal control flow surfaced by the prompt engine as a
//! re-prompt; it is never an error in the [`crate::error`] sense.
//!
//! Like filters, validators are identity-comparable handles. The parameterless
//! built-ins return clones of shared handles, which is what lets
//! `Unit::set_allow_blank` remove the seeded blank-rejection validator again.

use std::fmt;
use std::sync::{Arc, LazyLock};

/// Outcome of a single validator: accepted, or rejected with a message.
pub type Validation = Result<(), String>;

/// A named, identity-comparable answer validator.
#[derive(Clone)]
pub struct Validator {
    name: &'static str,
    func: Arc<dyn Fn(&str) -> Validation + Send + Sync>,
}

impl Validator {
    /// Wrap a predicate in an anonymous validator handle.
    pub fn new(func: impl Fn(&str) -> Validation + Send + Sync + 'static) -> Self {
        Self::named("custom", func)
    }

    /// Wrap a predicate in a named validator handle.
    pub fn named(
        name: &'static str,
        func: impl Fn(&str) -> Validation + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            func: Arc::new(func),
        }
    }

    /// Run the validator against a candidate answer.
    pub fn check(&self, value: &str) -> Validation {
        (self.func)(value)
    }

    /// The validator's debug name.
    pub fn name(&self) -> &str {
        self.name
    }
}

impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

static NON_BLANK: LazyLock<Validator> = LazyLock::new(|| {
    Validator::named("non_blank", |val| {
        if val.trim().is_empty() {
            Err("Response cannot be blank".to_string())
        } else {
            Ok(())
        }
    })
});

static NUMBER_ONLY: LazyLock<Validator> =
    LazyLock::new(|| Validator::named("number_only", |val| check_number(val).map(|_| ())));

static INTEGER_ONLY: LazyLock<Validator> = LazyLock::new(|| {
    Validator::named("integer_only", |val| {
        let num = check_number(val)?;
        if num.fract() != 0.0 {
            Err("Response cannot contain decimals".to_string())
        } else {
            Ok(())
        }
    })
});

fn check_number(val: &str) -> Result<f64, String> {
    val.trim()
        .parse::<f64>()
        .map_err(|_| "Response is not a number".to_string())
}

/// Rejects blank (empty or whitespace-only) answers.
///
/// Every freshly constructed unit carries this validator; remove it with
/// `Unit::set_allow_blank(true)`.
pub fn non_blank() -> Validator {
    NON_BLANK.clone()
}

/// Rejects answers that do not parse as a number.
pub fn number_only() -> Validator {
    NUMBER_ONLY.clone()
}

/// Rejects answers that are not whole numbers.
pub fn integer_only() -> Validator {
    INTEGER_ONLY.clone()
}

/// Builds a validator that requires `needle` to appear in the answer.
///
/// Each call constructs a distinct handle; keep a clone around if you intend
/// to remove it from a chain later.
pub fn contains_string(needle: &str, case_sensitive: bool) -> Validator {
    let needle = needle.to_string();
    Validator::named("contains_string", move |val| {
        let found = if case_sensitive {
            val.contains(&needle)
        } else {
            val.to_lowercase().contains(&needle.to_lowercase())
        };
        if found {
            Ok(())
        } else {
            Err(format!("Response must contain {}", needle))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert!(non_blank().check("hello").is_ok());
        assert_eq!(
            non_blank().check("   "),
            Err("Response cannot be blank".to_string())
        );
        assert!(non_blank().check("").is_err());
    }

    #[test]
    fn test_number_only() {
        assert!(number_only().check("42").is_ok());
        assert!(number_only().check("-3.5").is_ok());
        assert!(number_only().check(" 7 ").is_ok());
        assert_eq!(
            number_only().check("12abc"),
            Err("Response is not a number".to_string())
        );
    }

    #[test]
    fn test_integer_only() {
        assert!(integer_only().check("42").is_ok());
        assert!(integer_only().check("-7").is_ok());
        assert_eq!(
            integer_only().check("3.5"),
            Err("Response cannot contain decimals".to_string())
        );
        assert_eq!(
            integer_only().check("abc"),
            Err("Response is not a number".to_string())
        );
    }

    #[test]
    fn test_contains_string() {
        let v = contains_string("tag", true);
        assert!(v.check("a tag here").is_ok());
        assert!(v.check("a TAG here").is_err());

        let v = contains_string("TAG", false);
        assert!(v.check("a tag here").is_ok());
        assert_eq!(
            v.check("nothing"),
            Err("Response must contain TAG".to_string())
        );
    }

    #[test]
    fn test_builtin_handles_share_identity() {
        assert_eq!(non_blank(), non_blank());
        assert_ne!(non_blank(), number_only());
        // Generated validators are each their own identity.
        assert_ne!(contains_string("x", true), contains_string("x", true));
    }
}
