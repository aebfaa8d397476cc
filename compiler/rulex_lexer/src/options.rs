//! Tokenizer options.
//!
//! Options are a key/value mapping. `captureLocations` is the only key the
//! engine reads; any other key is carried along untouched so consumers can
//! stash their own settings next to it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Options applied to a tokenizer run.
///
/// Fields are optional so that merging can tell "unset" from "false".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Attach offset/line/column spans to every token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_locations: Option<bool>,
    /// Keys the engine does not recognize, preserved as given.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Options {
    /// Options with location capture switched on or off.
    pub fn with_locations(capture: bool) -> Self {
        Options {
            capture_locations: Some(capture),
            extra: BTreeMap::new(),
        }
    }

    /// Whether tokens carry locations. Defaults to `false`.
    #[inline]
    pub fn capture_locations(&self) -> bool {
        self.capture_locations.unwrap_or(false)
    }

    /// Merge `other` into `self`: keys set in `other` win, the rest stay.
    pub fn merge(&mut self, other: &Options) {
        if let Some(capture) = other.capture_locations {
            self.capture_locations = Some(capture);
        }
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}
