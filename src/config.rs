//! Declarative collection definitions.
//!
//! A whole collection, including its finish mode and unit list, can be
//! described in YAML and built against any engine. Parsing is forward
//! compatible: unknown per-unit fields ride along in the unit's pass-through
//! configuration.
//!
//! ```no_run
//! use prompt_set::config::CollectionSpec;
//! use prompt_set::engine::TerminalEngine;
//!
//! let spec = CollectionSpec::from_yaml(
//!     r#"
//! finish_mode: auto
//! units:
//!   - name: country
//!     message: Which country?
//!     required: true
//!   - name: city
//!     message: Which city?
//!     required: true
//!     dependencies: [country]
//! "#,
//! )?;
//! let answers = spec.into_collection(TerminalEngine::new())?.start()?;
//! # Ok::<(), prompt_set::error::PromptSetError>(())
//! ```

use crate::collection::{Collection, FinishMode};
use crate::engine::PromptEngine;
use crate::error::{PromptSetError, Result};
use crate::unit::UnitConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A declarative description of a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSpec {
    /// When the selection loop may terminate.
    pub finish_mode: FinishMode,

    /// Whether to clear the display after each prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoclear: Option<bool>,

    /// The units, in display order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<UnitConfig>,
}

impl CollectionSpec {
    /// Parse a spec from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            PromptSetError::Configuration(format!("failed to parse collection spec: {}", e))
        })
    }

    /// Load and parse a spec from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptSetError::Configuration(format!(
                "failed to read collection spec '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Build a collection driven by `engine` from this spec.
    pub fn into_collection(self, engine: impl PromptEngine + 'static) -> Result<Collection> {
        let mut collection = Collection::new(engine);
        collection.set_finish_mode(self.finish_mode);
        if let Some(autoclear) = self.autoclear {
            collection.set_autoclear(autoclear);
        }
        collection.add_units(self.units)?;
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScriptedEngine;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_yaml() {
        let spec = CollectionSpec::from_yaml("").unwrap();
        assert_eq!(spec.finish_mode, FinishMode::Choice);
        assert!(spec.units.is_empty());
        assert!(spec.autoclear.is_none());
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
finish_mode: aggressive
autoclear: false
units:
  - name: country
    message: Which country?
    required: true
  - name: city
    message: Which city?
    kind: input
    editable: true
    dependencies: [country]
"#;
        let spec = CollectionSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.finish_mode, FinishMode::Aggressive);
        assert_eq!(spec.autoclear, Some(false));
        assert_eq!(spec.units.len(), 2);
        assert_eq!(spec.units[1].dependencies, ["country"]);
    }

    #[test]
    fn test_invalid_finish_mode_fails() {
        let err = CollectionSpec::from_yaml("finish_mode: eventually").unwrap_err();
        assert!(matches!(err, PromptSetError::Configuration(_)));
    }

    #[test]
    fn test_unit_without_name_fails_at_build() {
        let spec = CollectionSpec::from_yaml("units:\n  - message: no name\n").unwrap();
        let err = spec.into_collection(ScriptedEngine::new()).unwrap_err();
        assert!(matches!(err, PromptSetError::Configuration(_)));
    }

    #[test]
    fn test_built_collection_runs() {
        let yaml = r#"
finish_mode: auto
units:
  - name: a
    message: first
    required: true
  - name: b
    message: second
    required: true
    dependencies: [a]
"#;
        let engine = ScriptedEngine::new()
            .select("a")
            .answer("a", "1")
            .select("b")
            .answer("b", "2");
        let spec = CollectionSpec::from_yaml(yaml).unwrap();
        let mut collection = spec.into_collection(engine.clone()).unwrap();

        let answers = collection.start().unwrap();
        assert_eq!(answers.get("a"), Some(&json!("1")));
        assert_eq!(answers.get("b"), Some(&json!("2")));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.yaml");
        std::fs::write(&path, "finish_mode: confirm\nunits:\n  - name: a\n    message: m\n")
            .unwrap();

        let spec = CollectionSpec::from_yaml_file(&path).unwrap();
        assert_eq!(spec.finish_mode, FinishMode::Confirm);
        assert_eq!(spec.units[0].name, "a");

        let err = CollectionSpec::from_yaml_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, PromptSetError::Configuration(_)));
    }
}
