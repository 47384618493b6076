//! Short keys and enumerated values of the radio wire payload.
//!
//! Keys are kept to a few characters because a radio frame carries at
//! most 250 bytes.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const TYPE: &str = ".t";
pub const ID: &str = "id";
pub const PLATFORM: &str = "p";
pub const DEVICE_ID: &str = "dev_id";
pub const STATE: &str = "stat";
pub const BRIGHTNESS: &str = "br";
pub const SUPPORTED_COLOR_MODES: &str = "sup_clrm";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadType {
    /// Announcement, or a request for one when sent towards a device
    #[serde(rename = "d")]
    Discovery,
    /// Announcement carrying the current state
    #[serde(rename = "h")]
    Hybrid,
    #[serde(rename = "s")]
    State,
    /// Any other tag; never emitted
    #[serde(other)]
    Unknown,
}

impl PayloadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "d",
            Self::Hybrid => "h",
            Self::State => "s",
            Self::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Switch,
    BinarySensor,
    Light,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::BinarySensor => "binary_sensor",
            Self::Light => "light",
        }
    }

    /// Platforms that accept commands from the host
    pub fn accepts_commands(&self) -> bool {
        !matches!(self, Self::BinarySensor)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On/off value carried under `stat`.
///
/// Decoding is lenient: `"ON"` is on, every other string is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Power {
    On,
    Off,
}

impl Power {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for Power {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl Serialize for Power {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Power {
    /// Any value other than the string `"ON"`, strings or not, reads as off
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Power::from(value.as_str() == Some("ON")))
    }
}

/// Reads `p`, treating a platform this build does not know as absent.
pub(crate) fn deserialize_platform<'de, D>(deserializer: D) -> Result<Option<Platform>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| Platform::deserialize(value).ok()))
}

/// Reads `br` as any integer and clamps it into the 0..=255 range.
pub(crate) fn deserialize_brightness<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.clamp(0, u8::MAX as i64) as u8))
}
