use crate::error::TfiacError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default UDP port TFIAC devices listen on
pub const UDP_PORT: u16 = 7777;

/// Lowest target temperature the protocol advertises (degrees)
pub const MIN_TEMP: f64 = 61.0;

/// Highest target temperature the protocol advertises (degrees)
pub const MAX_TEMP: f64 = 88.0;

/// Every operation mode, in the order the protocol lists them
pub const OPERATION_LIST: [OperationMode; 5] = [
    OperationMode::Heat,
    OperationMode::SelfFeel,
    OperationMode::Dehumi,
    OperationMode::Fan,
    OperationMode::Cool,
];

/// Every fan speed
pub const FAN_LIST: [FanMode; 4] = [FanMode::Auto, FanMode::Low, FanMode::Middle, FanMode::High];

/// Every swing mode
pub const SWING_LIST: [SwingMode; 4] = [
    SwingMode::Off,
    SwingMode::Vertical,
    SwingMode::Horizontal,
    SwingMode::Both,
];

/// Operation mode (`BaseMode` on the wire)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum OperationMode {
    Heat,
    SelfFeel,
    Dehumi,
    Fan,
    Cool,
}

impl OperationMode {
    /// Wire token for this mode
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::SelfFeel => "selfFeel",
            Self::Dehumi => "dehumi",
            Self::Fan => "fan",
            Self::Cool => "cool",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = TfiacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OPERATION_LIST
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| unsupported("operation", s))
    }
}

/// Fan speed (`WindSpeed` on the wire)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FanMode {
    Auto,
    Low,
    Middle,
    High,
}

impl FanMode {
    /// Wire token for this fan speed
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Low => "Low",
            Self::Middle => "Middle",
            Self::High => "High",
        }
    }
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanMode {
    type Err = TfiacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FAN_LIST
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| unsupported("fan", s))
    }
}

/// Air-direction oscillation, derived from the horizontal and vertical flags
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SwingMode {
    Off,
    Vertical,
    Horizontal,
    Both,
}

impl SwingMode {
    /// Combine the `WindDirection_H` / `WindDirection_V` flags
    pub fn from_flags(horizontal: bool, vertical: bool) -> Self {
        match (horizontal, vertical) {
            (false, false) => Self::Off,
            (true, false) => Self::Horizontal,
            (false, true) => Self::Vertical,
            (true, true) => Self::Both,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Vertical => "Vertical",
            Self::Horizontal => "Horizontal",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for SwingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwingMode {
    type Err = TfiacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SWING_LIST
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| unsupported("swing", s))
    }
}

/// Power flag (`TurnOn` on the wire)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    On,
    Off,
}

impl Power {
    /// Wire token for this power state
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl From<bool> for Power {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Power {
    type Err = TfiacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            _ => Err(unsupported("power", s)),
        }
    }
}

fn unsupported(kind: &'static str, value: &str) -> TfiacError {
    TfiacError::UnsupportedValue {
        kind,
        value: value.to_string(),
    }
}

/// Last known state of the device
///
/// Every field is filled from one status reply; a snapshot is never partially
/// populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Indoor temperature as reported by the device
    pub current_temp: f64,

    /// Requested temperature
    pub target_temp: f64,

    pub operation: OperationMode,

    pub fan_mode: FanMode,

    /// Derived from the two wind-direction flags
    pub swing_mode: SwingMode,

    pub is_on: Power,
}

impl DeviceStatus {
    /// Merge a single pending change into this snapshot
    pub(crate) fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::TargetTemp(temp) => self.target_temp = temp,
            Setting::Operation(mode) => self.operation = mode,
            Setting::FanMode(mode) => self.fan_mode = mode,
            Setting::Power(power) => self.is_on = power,
        }
    }
}

/// A field that can be changed through [`TfiacClient::set_state`](crate::TfiacClient::set_state)
///
/// Swing is not listed here; it is sent on its own with
/// [`TfiacClient::set_swing`](crate::TfiacClient::set_swing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setting {
    /// Target temperature in degrees; callers should keep it within
    /// [`MIN_TEMP`]..=[`MAX_TEMP`]
    TargetTemp(f64),
    Operation(OperationMode),
    FanMode(FanMode),
    Power(Power),
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetTemp(temp) => write!(f, "target_temp={:?}", temp),
            Self::Operation(mode) => write!(f, "operation={}", mode),
            Self::FanMode(mode) => write!(f, "fan_mode={}", mode),
            Self::Power(power) => write!(f, "is_on={}", power),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_status() -> DeviceStatus {
        DeviceStatus {
            current_temp: 72.0,
            target_temp: 70.0,
            operation: OperationMode::Cool,
            fan_mode: FanMode::Auto,
            swing_mode: SwingMode::Off,
            is_on: Power::On,
        }
    }

    #[test]
    fn wire_tokens_parse_back() {
        for mode in OPERATION_LIST {
            assert_eq!(mode.as_str().parse::<OperationMode>().unwrap(), mode);
        }
        for mode in FAN_LIST {
            assert_eq!(mode.as_str().parse::<FanMode>().unwrap(), mode);
        }
        for mode in SWING_LIST {
            assert_eq!(mode.as_str().parse::<SwingMode>().unwrap(), mode);
        }
        assert_eq!("selfFeel".parse::<OperationMode>().unwrap(), OperationMode::SelfFeel);
        assert_eq!("on".parse::<Power>().unwrap(), Power::On);
    }

    #[test]
    fn unknown_swing_name_is_unsupported() {
        let err = "Diagonal".parse::<SwingMode>().unwrap_err();
        match err {
            TfiacError::UnsupportedValue { kind, value } => {
                assert_eq!(kind, "swing");
                assert_eq!(value, "Diagonal");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert!("HEAT".parse::<OperationMode>().is_err());
        assert!("auto".parse::<FanMode>().is_err());
        assert!("ON".parse::<Power>().is_err());
    }

    #[test]
    fn swing_flag_mapping() {
        assert_eq!(SwingMode::from_flags(false, false), SwingMode::Off);
        assert_eq!(SwingMode::from_flags(true, false), SwingMode::Horizontal);
        assert_eq!(SwingMode::from_flags(false, true), SwingMode::Vertical);
        assert_eq!(SwingMode::from_flags(true, true), SwingMode::Both);
    }

    #[test]
    fn apply_touches_only_the_named_field() {
        let mut status = sample_status();
        status.apply(Setting::TargetTemp(75.0));
        assert_eq!(status.target_temp, 75.0);
        assert_eq!(status.operation, OperationMode::Cool);
        assert_eq!(status.fan_mode, FanMode::Auto);
        assert_eq!(status.is_on, Power::On);

        status.apply(Setting::Power(Power::Off));
        status.apply(Setting::FanMode(FanMode::High));
        status.apply(Setting::Operation(OperationMode::Heat));
        assert_eq!(status.is_on, Power::Off);
        assert_eq!(status.fan_mode, FanMode::High);
        assert_eq!(status.operation, OperationMode::Heat);
        assert_eq!(status.target_temp, 75.0);
        assert_eq!(status.swing_mode, SwingMode::Off);
    }

    #[test]
    fn status_serializes_with_integration_keys() {
        let json = serde_json::to_value(sample_status()).unwrap();
        assert_eq!(json["current_temp"], 72.0);
        assert_eq!(json["target_temp"], 70.0);
        assert_eq!(json["operation"], "cool");
        assert_eq!(json["fan_mode"], "Auto");
        assert_eq!(json["swing_mode"], "Off");
        assert_eq!(json["is_on"], "on");

        let mut status = sample_status();
        status.operation = OperationMode::SelfFeel;
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["operation"], "selfFeel");
    }

    #[test]
    fn temperature_bounds() {
        assert_eq!(MIN_TEMP, 61.0);
        assert_eq!(MAX_TEMP, 88.0);
        assert_eq!(UDP_PORT, 7777);
    }

    #[test]
    fn setting_display() {
        assert_eq!(Setting::TargetTemp(75.0).to_string(), "target_temp=75.0");
        assert_eq!(Setting::Operation(OperationMode::Dehumi).to_string(), "operation=dehumi");
        assert_eq!(Setting::Power(Power::from(false)).to_string(), "is_on=off");
    }
}
