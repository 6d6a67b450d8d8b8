use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::fragment::{ENTRY_DELIMITER, FRAGMENT_MARKER, KV_SEPARATOR};

/// How a toggle whose state differs from the requested one is brought in line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleStrategy {
    /// Click the control once, letting its own handler flip the state
    #[default]
    Activate,
    /// Write the requested value directly
    Assign,
}

fn default_input_class() -> String {
    "form-control".to_string()
}

fn default_toggle_class() -> String {
    "custom-control-input".to_string()
}

fn default_toggle_marker() -> char {
    '_'
}

fn default_toggle_on() -> String {
    "on".to_string()
}

fn default_toggle_off() -> String {
    "off".to_string()
}

/// Which DOM elements take part in the sync and how toggles are recognized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Class carried by regular inputs. Enumerated first.
    #[serde(default = "default_input_class")]
    pub input_class: String,
    /// Class carried by toggle controls. Enumerated after regular inputs.
    #[serde(default = "default_toggle_class")]
    pub toggle_class: String,
    /// Ids starting with this character are treated as toggles on restore
    #[serde(default = "default_toggle_marker")]
    pub toggle_marker: char,
    #[serde(default = "default_toggle_on")]
    pub toggle_on: String,
    #[serde(default = "default_toggle_off")]
    pub toggle_off: String,
    #[serde(default)]
    pub toggle_strategy: ToggleStrategy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            input_class: default_input_class(),
            toggle_class: default_toggle_class(),
            toggle_marker: default_toggle_marker(),
            toggle_on: default_toggle_on(),
            toggle_off: default_toggle_off(),
            toggle_strategy: ToggleStrategy::default(),
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.input_class.trim().is_empty() || self.toggle_class.trim().is_empty() {
            return Err(SyncError::Config("class names must not be empty".into()));
        }
        if [FRAGMENT_MARKER, ENTRY_DELIMITER, KV_SEPARATOR].contains(&self.toggle_marker) {
            return Err(SyncError::Config(format!(
                "toggle marker '{}' is reserved by the fragment format",
                self.toggle_marker
            )));
        }
        if self.toggle_on == self.toggle_off {
            return Err(SyncError::Config(format!(
                "toggle on/off values must differ (both '{}')",
                self.toggle_on
            )));
        }
        Ok(())
    }

    pub fn is_toggle_key(&self, key: &str) -> bool {
        key.starts_with(self.toggle_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SyncConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.input_class, "form-control");
        assert_eq!(config.toggle_class, "custom-control-input");
        assert_eq!(config.toggle_strategy, ToggleStrategy::Activate);
    }

    #[test]
    fn test_is_toggle_key() {
        let config = SyncConfig::default();
        assert!(config.is_toggle_key("_as_date"));
        assert!(!config.is_toggle_key("n_days"));
        assert!(!config.is_toggle_key(""));
    }

    #[test]
    fn test_reserved_marker_rejected() {
        let config = SyncConfig {
            toggle_marker: ';',
            ..SyncConfig::default()
        };
        assert!(matches!(config.validate(), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_equal_toggle_values_rejected() {
        let config = SyncConfig {
            toggle_off: "on".into(),
            ..SyncConfig::default()
        };
        assert!(matches!(config.validate(), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_empty_class_rejected() {
        let config = SyncConfig {
            toggle_class: " ".into(),
            ..SyncConfig::default()
        };
        assert!(matches!(config.validate(), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: SyncConfig =
            serde_yaml::from_str("toggle_marker: '!'\ntoggle_strategy: assign\n").unwrap();
        assert_eq!(config.toggle_marker, '!');
        assert_eq!(config.toggle_strategy, ToggleStrategy::Assign);
        assert_eq!(config.input_class, "form-control");
        assert_eq!(config.toggle_on, "on");
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SyncConfig {
            input_class: "param".into(),
            ..SyncConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SyncConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
