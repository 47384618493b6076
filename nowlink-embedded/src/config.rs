use alloc::string::{String, ToString};

use nowlink_api::MacAddress;
use nowlink_api::transport::BYTE_TIMEOUT_MS;

/// Entities one device can host
pub const MAX_ENTITIES: usize = 10;

/// Pending discovery announcements
pub const DISCOVERY_QUEUE_SIZE: usize = 5;

/// Transmission attempts per discovery request before it is dropped
pub const MAX_DISCOVERY_ATTEMPTS: u8 = 3;

/// Brightness used when a light is switched on from zero
pub const DEFAULT_BRIGHTNESS: u8 = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Identifier stamped into every outbound payload as `dev_id`
    pub device_id: String,
    /// Peer every payload is addressed to
    pub destination: MacAddress,
    pub max_discovery_attempts: u8,
}

impl LinkConfig {
    pub fn new(device_id: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_destination(mut self, destination: MacAddress) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_max_discovery_attempts(mut self, attempts: u8) -> Self {
        self.max_discovery_attempts = attempts.max(1);
        self
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device_id: "nowlink".to_string(),
            destination: MacAddress::BROADCAST,
            max_discovery_attempts: MAX_DISCOVERY_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Radio address announced to the host at start-up
    pub mac: MacAddress,
    /// Idle gap after which a partial serial frame is dropped
    pub byte_timeout_ms: u64,
}

impl GatewayConfig {
    pub fn new(mac: MacAddress) -> Self {
        Self {
            mac,
            ..Default::default()
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mac: MacAddress::default(),
            byte_timeout_ms: BYTE_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_config_defaults() {
        let config = LinkConfig::new("kitchen");
        assert_eq!(config.device_id, "kitchen");
        assert!(config.destination.is_broadcast());
        assert_eq!(config.max_discovery_attempts, 3);

        let config = config.with_max_discovery_attempts(0);
        assert_eq!(config.max_discovery_attempts, 1);
    }

    #[test]
    fn test_gateway_config_defaults() {
        let mac = MacAddress::new([1, 2, 3, 4, 5, 6]);
        let config = GatewayConfig::new(mac);
        assert_eq!(config.mac, mac);
        assert_eq!(config.byte_timeout_ms, BYTE_TIMEOUT_MS);
    }
}
