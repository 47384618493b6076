use core::fmt;

use alloc::boxed::Box;
use alloc::string::{String, ToString};

use nowlink_api::WirePayload;
use nowlink_api::payload::Platform;

use crate::config::DEFAULT_BRIGHTNESS;

pub type LightCallback = Box<dyn FnMut(bool, u8)>;

/// Color mode advertised in the light's discovery payload
pub const COLOR_MODE_BRIGHTNESS: &str = "brightness";

/// Dimmable single-channel light.
///
/// A brightness of zero always means off: `set(true, 0)` leaves the light
/// off. Switching on without naming a brightness while the stored
/// brightness is zero restores [`DEFAULT_BRIGHTNESS`].
pub struct Light {
    id: String,
    on: bool,
    brightness: u8,
    dirty: bool,
    on_change: Option<LightCallback>,
}

impl Light {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            on: false,
            brightness: 0,
            dirty: false,
            on_change: None,
        }
    }

    /// Initial state, normalised like [`Light::set`] but never dirty
    pub fn with_state(mut self, on: bool, brightness: u8) -> Self {
        self.on = on && brightness > 0;
        self.brightness = brightness;
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(bool, u8) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Applies both values; returns whether anything changed
    pub fn set(&mut self, on: bool, brightness: u8) -> bool {
        let on = on && brightness > 0;
        if self.on == on && self.brightness == brightness {
            return false;
        }
        self.on = on;
        self.brightness = brightness;
        self.dirty = true;
        if let Some(callback) = self.on_change.as_mut() {
            callback(on, brightness);
        }
        true
    }

    pub fn set_on(&mut self, on: bool) -> bool {
        let brightness = self.brightness_for(on);
        self.set(on, brightness)
    }

    pub fn set_brightness(&mut self, brightness: u8) -> bool {
        self.set(self.on, brightness)
    }

    /// Flips on/off and returns the new on value
    pub fn toggle(&mut self) -> bool {
        self.set_on(!self.on);
        self.on
    }

    pub fn serialize_discovery(&self, device_id: &str) -> WirePayload {
        WirePayload::discovery(&self.id, Platform::Light, device_id)
            .with_color_mode(COLOR_MODE_BRIGHTNESS)
    }

    pub fn serialize_state(&self, device_id: &str) -> WirePayload {
        WirePayload::hybrid(&self.id, Platform::Light, device_id)
            .with_state(self.on)
            .with_brightness(self.brightness)
    }

    /// `br` and `stat` override the current values when present
    pub fn handle_payload(&mut self, payload: &WirePayload) {
        let on = payload.state.map_or(self.on, |power| power.is_on());
        let brightness = match payload.brightness {
            Some(brightness) => brightness,
            None => self.brightness_for(on),
        };
        self.set(on, brightness);
    }

    fn brightness_for(&self, on: bool) -> u8 {
        if on && self.brightness == 0 {
            DEFAULT_BRIGHTNESS
        } else {
            self.brightness
        }
    }
}

impl fmt::Debug for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Light")
            .field("id", &self.id)
            .field("on", &self.on)
            .field("brightness", &self.brightness)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    use nowlink_api::payload::{PayloadType, Power};

    use super::*;

    fn recording_light() -> (Light, Rc<RefCell<Vec<(bool, u8)>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let light = Light::new("lamp").on_change(move |on, br| sink.borrow_mut().push((on, br)));
        (light, calls)
    }

    #[test]
    fn test_explicit_zero_forces_off() {
        let (mut light, calls) = recording_light();

        assert!(!light.set(true, 0));
        assert!(!light.is_on());
        assert_eq!(light.brightness(), 0);
        assert!(!light.is_dirty());
        assert!(calls.borrow().is_empty());

        light.set(true, 90);
        assert!(light.set(true, 0));
        assert_eq!((light.is_on(), light.brightness()), (false, 0));
    }

    #[test]
    fn test_set_on_restores_default_brightness() {
        let (mut light, calls) = recording_light();

        assert!(light.set_on(true));
        assert!(light.is_on());
        assert_eq!(light.brightness(), DEFAULT_BRIGHTNESS);
        assert_eq!(*calls.borrow(), vec![(true, DEFAULT_BRIGHTNESS)]);
    }

    #[test]
    fn test_set_on_keeps_previous_brightness() {
        let mut light = Light::new("lamp").with_state(false, 40);
        light.set_on(true);
        assert_eq!(light.brightness(), 40);

        light.toggle();
        assert!(!light.is_on());
        assert_eq!(light.brightness(), 40);
    }

    #[test]
    fn test_set_brightness() {
        let mut light = Light::new("lamp").with_state(true, 100);

        light.set_brightness(200);
        assert!(light.is_on());
        assert_eq!(light.brightness(), 200);

        light.set_brightness(0);
        assert!(!light.is_on());
    }

    #[test]
    fn test_same_values_are_ignored() {
        let (mut light, calls) = recording_light();
        light.set(true, 50);
        light.clear_dirty();

        assert!(!light.set(true, 50));
        assert!(!light.set_on(true));
        assert!(!light.set_brightness(50));
        assert!(!light.is_dirty());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_inbound_brightness_zero_turns_off() {
        let mut light = Light::new("lamp").with_state(true, 180);
        light.handle_payload(&WirePayload::command("lamp").with_brightness(0));
        assert!(!light.is_on());
        assert_eq!(light.brightness(), 0);
    }

    #[test]
    fn test_inbound_on_without_brightness() {
        let mut light = Light::new("lamp");
        light.handle_payload(&WirePayload::command("lamp").with_state(true));
        assert!(light.is_on());
        assert_eq!(light.brightness(), DEFAULT_BRIGHTNESS);

        light.handle_payload(&WirePayload::command("lamp").with_state(true).with_brightness(20));
        assert_eq!(light.brightness(), 20);

        light.handle_payload(&WirePayload::command("lamp").with_state(false));
        assert!(!light.is_on());
        assert_eq!(light.brightness(), 20);
    }

    #[test]
    fn test_decoded_brightness_is_clamped() {
        let payload = WirePayload::decode(br#"{"id":"lamp","stat":"ON","br":999}"#).unwrap();
        let mut light = Light::new("lamp");
        light.handle_payload(&payload);
        assert_eq!(light.brightness(), 255);
        assert!(light.is_on());
    }

    #[test]
    fn test_payloads() {
        let light = Light::new("lamp").with_state(true, 77);

        let discovery = light.serialize_discovery("den");
        assert_eq!(discovery.kind, Some(PayloadType::Discovery));
        assert_eq!(discovery.color_mode.as_deref(), Some("brightness"));

        let state = light.serialize_state("den");
        assert_eq!(state.kind, Some(PayloadType::Hybrid));
        assert_eq!(state.state, Some(Power::On));
        assert_eq!(state.brightness, Some(77));
        assert_eq!(state.color_mode, None);
    }
}
