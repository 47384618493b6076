//! Wire codec for the keyed JSON records exchanged over the radio link.

pub mod keys;

use core::fmt;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

pub use keys::{PayloadType, Platform, Power};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Record could not be encoded
    Serialization(String),
    /// Bytes are not a valid record
    Deserialization(String),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Deserialization(e) => write!(f, "Deserialization error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PayloadError {}

pub type Result<T> = core::result::Result<T, PayloadError>;

/// One radio message.
///
/// Outbound records always carry `id`, `p` and `dev_id`. Inbound records
/// from the host may be as small as `{"id": "..."}`: every key besides
/// `id` is optional and a missing `id` decodes as the empty string, which
/// matches no entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WirePayload {
    #[serde(rename = ".t", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PayloadType>,
    #[serde(default)]
    pub id: String,
    #[serde(
        rename = "p",
        default,
        deserialize_with = "keys::deserialize_platform",
        skip_serializing_if = "Option::is_none"
    )]
    pub platform: Option<Platform>,
    #[serde(rename = "dev_id", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(rename = "stat", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Power>,
    #[serde(
        rename = "br",
        default,
        deserialize_with = "keys::deserialize_brightness",
        skip_serializing_if = "Option::is_none"
    )]
    pub brightness: Option<u8>,
    #[serde(rename = "sup_clrm", default, skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<String>,
}

impl WirePayload {
    fn announce(kind: PayloadType, id: &str, platform: Platform, device_id: &str) -> Self {
        Self {
            kind: Some(kind),
            id: id.to_string(),
            platform: Some(platform),
            device_id: Some(device_id.to_string()),
            ..Default::default()
        }
    }

    pub fn discovery(id: &str, platform: Platform, device_id: &str) -> Self {
        Self::announce(PayloadType::Discovery, id, platform, device_id)
    }

    pub fn hybrid(id: &str, platform: Platform, device_id: &str) -> Self {
        Self::announce(PayloadType::Hybrid, id, platform, device_id)
    }

    pub fn state(id: &str, platform: Platform, device_id: &str) -> Self {
        Self::announce(PayloadType::State, id, platform, device_id)
    }

    /// Host request asking a device to announce `id`
    pub fn discovery_query(id: &str) -> Self {
        Self {
            kind: Some(PayloadType::Discovery),
            id: id.to_string(),
            ..Default::default()
        }
    }

    /// Untyped host command addressed to `id`
    pub fn command(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_state(mut self, power: impl Into<Power>) -> Self {
        self.state = Some(power.into());
        self
    }

    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn with_color_mode(mut self, mode: &str) -> Self {
        self.color_mode = Some(mode.to_string());
        self
    }

    pub fn is_discovery(&self) -> bool {
        self.kind == Some(PayloadType::Discovery)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| PayloadError::Serialization(alloc::format!("{}", e)))
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data)
            .map_err(|e| PayloadError::Deserialization(alloc::format!("{}", e)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn as_json(payload: &WirePayload) -> Value {
        serde_json::from_slice(&payload.encode().unwrap()).unwrap()
    }

    #[test]
    fn test_discovery_uses_short_keys() {
        let payload = WirePayload::discovery("led-switch", Platform::Switch, "node-1");
        let json = as_json(&payload);

        assert_eq!(json[keys::TYPE], "d");
        assert_eq!(json[keys::ID], "led-switch");
        assert_eq!(json[keys::PLATFORM], "switch");
        assert_eq!(json[keys::DEVICE_ID], "node-1");
        assert!(json.get(keys::STATE).is_none());
        assert!(json.get(keys::BRIGHTNESS).is_none());
    }

    #[test]
    fn test_light_state_fields() {
        let payload = WirePayload::hybrid("desk_lamp", Platform::Light, "lamp-node")
            .with_state(true)
            .with_brightness(200);
        let json = as_json(&payload);

        assert_eq!(json[keys::TYPE], "h");
        assert_eq!(json[keys::PLATFORM], "light");
        assert_eq!(json[keys::STATE], "ON");
        assert_eq!(json[keys::BRIGHTNESS], 200);
    }

    #[test]
    fn test_decode_host_command() {
        let payload = WirePayload::decode(br#"{"id":"desk_lamp","stat":"OFF","br":300}"#).unwrap();

        assert_eq!(payload.kind, None);
        assert_eq!(payload.id, "desk_lamp");
        assert_eq!(payload.state, Some(Power::Off));
        assert_eq!(payload.brightness, Some(255));
        assert_eq!(payload.platform, None);
    }

    #[test]
    fn test_decode_missing_keys_default() {
        let payload = WirePayload::decode(b"{}").unwrap();
        assert_eq!(payload.kind, None);
        assert_eq!(payload.id, "");
        assert_eq!(payload.state, None);

        let negative = WirePayload::decode(br#"{"id":"x","br":-5}"#).unwrap();
        assert_eq!(negative.brightness, Some(0));
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let payload =
            WirePayload::decode(br#"{".t":"d","id":"flash_button","extra":[1,2],"rssi":-40}"#)
                .unwrap();
        assert!(payload.is_discovery());
        assert_eq!(payload.id, "flash_button");
    }

    #[test]
    fn test_decode_tolerates_odd_values() {
        let payload =
            WirePayload::decode(br#"{"id":"fan","p":"fan","stat":true,"br":12}"#).unwrap();
        assert_eq!(payload.id, "fan");
        assert_eq!(payload.platform, None);
        assert_eq!(payload.state, Some(Power::Off));
        assert_eq!(payload.brightness, Some(12));

        let light = WirePayload::decode(br#"{"id":"lamp","p":"light","stat":"ON"}"#).unwrap();
        assert_eq!(light.platform, Some(Platform::Light));
        assert_eq!(light.state, Some(Power::On));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(WirePayload::decode(b"not json").is_err());
        assert!(WirePayload::decode(br#"{"id":5}"#).is_err());
        assert!(WirePayload::decode(&[0xFF, 0xFE]).is_err());
    }

    #[test]
    fn test_discovery_query_roundtrip() {
        let query = WirePayload::discovery_query("led_switch");
        let encoded = query.encode().unwrap();
        assert_eq!(encoded, br#"{".t":"d","id":"led_switch"}"#.to_vec());
        assert_eq!(WirePayload::decode(&encoded).unwrap(), query);
    }
}
