use crate::config::{SyncConfig, ToggleStrategy};

/// State of a toggle control as read from its displayed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleState {
    On,
    Off,
    /// Anything that isn't one of the two configured spellings
    Other(String),
}

impl ToggleState {
    pub fn from_value(value: &str, config: &SyncConfig) -> Self {
        if value == config.toggle_on {
            ToggleState::On
        } else if value == config.toggle_off {
            ToggleState::Off
        } else {
            ToggleState::Other(value.to_string())
        }
    }

    fn is_binary(&self) -> bool {
        !matches!(self, ToggleState::Other(_))
    }
}

/// What restore should do to a toggle control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// Already in the requested state
    Keep,
    /// Click once to flip between the two binary states
    Activate,
    /// Write the requested value into the control
    Assign(String),
}

/// Transition table for a toggle: (current, requested) -> action.
///
/// | current | requested | action                          |
/// |---------|-----------|---------------------------------|
/// | x       | x         | Keep                            |
/// | On/Off  | Off/On    | Activate (or Assign per config) |
/// | Other   | any       | Assign                          |
/// | any     | Other     | Assign                          |
pub fn transition(current: &str, requested: &str, config: &SyncConfig) -> ToggleAction {
    if current == requested {
        return ToggleAction::Keep;
    }

    let from = ToggleState::from_value(current, config);
    let to = ToggleState::from_value(requested, config);

    match (config.toggle_strategy, from.is_binary() && to.is_binary()) {
        (ToggleStrategy::Activate, true) => ToggleAction::Activate,
        _ => ToggleAction::Assign(requested.to_string()),
    }
}
