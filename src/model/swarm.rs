//! Swarm state and the backend metadata it is initialized from.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle state of a swarm as reported by the orchestration backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwarmState {
    /// No test has run yet.
    #[default]
    Ready,
    /// A start request has been submitted but not confirmed.
    Starting,
    /// Users are being spawned.
    Spawning,
    /// The test is running.
    Running,
    /// Runner is cleaning up after a test.
    Cleanup,
    /// A stop request is in progress.
    Stopping,
    /// The last test has stopped.
    Stopped,
    /// Workers are missing.
    Missing,
}

impl SwarmState {
    /// Returns `true` if a new test may be started from this state.
    pub fn can_start(self) -> bool {
        matches!(self, Self::Ready | Self::Stopped)
    }

    /// Upper-case label for status display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Starting => "STARTING",
            Self::Spawning => "SPAWNING",
            Self::Running => "RUNNING",
            Self::Cleanup => "CLEANUP",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::Missing => "MISSING",
        }
    }
}

impl fmt::Display for SwarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Default value declared for a custom parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraOptionValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<String>),
}

impl ExtraOptionValue {
    /// Renders the value the way it is entered in a text field.
    ///
    /// Lists are joined with `,`.
    pub fn to_form_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(","),
        }
    }
}

/// A backend-declared custom parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtraOption {
    #[serde(alias = "default_value")]
    pub default_value: Option<ExtraOptionValue>,
    #[serde(alias = "help_text")]
    pub help_text: Option<String>,
    pub choices: Option<Vec<String>>,
    #[serde(alias = "is_secret", deserialize_with = "null_as_default")]
    pub is_secret: bool,
    #[serde(alias = "is_required", deserialize_with = "null_as_default")]
    pub is_required: bool,
}

/// Shared swarm configuration, initialized from backend metadata.
///
/// Deserializes from the camelCase shape the backend hands to its web UI.
/// Missing keys and explicit `null`s take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwarmConfiguration {
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    pub spawn_rate: Option<f64>,
    pub user_count: Option<u64>,
    pub num_users: Option<u64>,
    pub run_time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_shape: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub available_shape_classes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub available_user_classes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub show_userclass_picker: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub override_host_warning: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub extra_options: BTreeMap<String, ExtraOption>,
    #[serde(deserialize_with = "null_as_default")]
    pub state: SwarmState,
}

/// Reads an explicit `null` as the field's default.
///
/// `#[serde(default)]` only covers missing keys; the backend also sends
/// `null` for unset values.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
