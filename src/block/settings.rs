//! Block Settings
//!
//! Free-form rendering parameters attached to a block.

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

// == Settings ==
/// Mapping of setting name to an arbitrary JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, Value>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the setting converted to `T`, or `default` when it is absent
    /// or holds a value of another shape.
    pub fn get<T: DeserializeOwned>(&self, name: &str, default: T) -> T {
        self.0
            .get(name)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default)
    }

    /// Raw access to a stored value.
    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    // == Set ==
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
