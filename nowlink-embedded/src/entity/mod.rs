pub mod binary_sensor;
pub mod light;
pub mod switch;

pub use binary_sensor::BinarySensor;
pub use light::Light;
pub use switch::Switch;

use nowlink_api::WirePayload;
use nowlink_api::payload::Platform;

/// One controllable or observable point on a device.
///
/// Entities only track whether their state still has to go out; sending
/// is left to [`crate::link::NowLink`].
#[derive(Debug)]
pub enum Entity {
    Switch(Switch),
    BinarySensor(BinarySensor),
    Light(Light),
}

impl Entity {
    pub fn id(&self) -> &str {
        match self {
            Entity::Switch(e) => e.id(),
            Entity::BinarySensor(e) => e.id(),
            Entity::Light(e) => e.id(),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            Entity::Switch(_) => Platform::Switch,
            Entity::BinarySensor(_) => Platform::BinarySensor,
            Entity::Light(_) => Platform::Light,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            Entity::Switch(e) => e.is_dirty(),
            Entity::BinarySensor(e) => e.is_dirty(),
            Entity::Light(e) => e.is_dirty(),
        }
    }

    pub fn clear_dirty(&mut self) {
        match self {
            Entity::Switch(e) => e.clear_dirty(),
            Entity::BinarySensor(e) => e.clear_dirty(),
            Entity::Light(e) => e.clear_dirty(),
        }
    }

    pub fn serialize_discovery(&self, device_id: &str) -> WirePayload {
        match self {
            Entity::Switch(e) => e.serialize_discovery(device_id),
            Entity::BinarySensor(e) => e.serialize_discovery(device_id),
            Entity::Light(e) => e.serialize_discovery(device_id),
        }
    }

    pub fn serialize_state(&self, device_id: &str) -> WirePayload {
        match self {
            Entity::Switch(e) => e.serialize_state(device_id),
            Entity::BinarySensor(e) => e.serialize_state(device_id),
            Entity::Light(e) => e.serialize_state(device_id),
        }
    }

    /// Applies a host command; sensors ignore commands
    pub fn handle_payload(&mut self, payload: &WirePayload) {
        if !self.platform().accepts_commands() {
            log::debug!("{} is read-only, command ignored", self.id());
            return;
        }
        match self {
            Entity::Switch(e) => e.handle_payload(payload),
            Entity::Light(e) => e.handle_payload(payload),
            Entity::BinarySensor(_) => {}
        }
    }

    pub fn as_switch_mut(&mut self) -> Option<&mut Switch> {
        match self {
            Entity::Switch(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_binary_sensor_mut(&mut self) -> Option<&mut BinarySensor> {
        match self {
            Entity::BinarySensor(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_light_mut(&mut self) -> Option<&mut Light> {
        match self {
            Entity::Light(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Switch> for Entity {
    fn from(e: Switch) -> Self {
        Entity::Switch(e)
    }
}

impl From<BinarySensor> for Entity {
    fn from(e: BinarySensor) -> Self {
        Entity::BinarySensor(e)
    }
}

impl From<Light> for Entity {
    fn from(e: Light) -> Self {
        Entity::Light(e)
    }
}
