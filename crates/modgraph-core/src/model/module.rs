//! Module configuration records.
//!
//! A module record carries a handful of well-known fields that the validator
//! inspects, plus an open `extra` map for everything else. Unknown fields are
//! kept verbatim so a record read from the store can be written back without
//! loss.
//!
//! All accessors are lenient: empty strings read as absent and missing lists
//! read as empty. Validation describes bad input; it does not reject it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One feature entry of a module. Features are identified by `key`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feature {
    pub fn keyed(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        non_empty(self.key.as_deref())
    }
}

/// A module configuration as persisted by the caller's store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModuleRecord {
    pub fn new(module_key: impl Into<String>, module_name: impl Into<String>) -> Self {
        Self {
            module_key: Some(module_key.into()),
            module_name: Some(module_name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_features<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(keys.into_iter().map(Feature::keyed).collect());
        self
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = Some(deps.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a record from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of the expected shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        non_empty(self.module_key.as_deref())
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(self.module_name.as_deref())
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        non_empty(self.version.as_deref())
    }

    #[must_use]
    pub fn features(&self) -> &[Feature] {
        self.features.as_deref().unwrap_or_default()
    }

    /// Keys of all keyed features, in declaration order. Unkeyed entries are skipped.
    pub fn feature_keys(&self) -> impl Iterator<Item = &str> {
        self.features().iter().filter_map(Feature::key)
    }

    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        self.dependencies.as_deref().unwrap_or_default()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
