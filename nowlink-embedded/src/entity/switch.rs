use core::fmt;

use alloc::boxed::Box;
use alloc::string::{String, ToString};

use nowlink_api::WirePayload;
use nowlink_api::payload::Platform;

pub type SwitchCallback = Box<dyn FnMut(bool)>;

/// On/off output the host can command.
pub struct Switch {
    id: String,
    state: bool,
    dirty: bool,
    on_change: Option<SwitchCallback>,
}

impl Switch {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            state: false,
            dirty: false,
            on_change: None,
        }
    }

    /// Initial state; does not count as a change
    pub fn with_state(mut self, state: bool) -> Self {
        self.state = state;
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> bool {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Returns whether the state changed
    pub fn set_state(&mut self, state: bool) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        self.dirty = true;
        if let Some(callback) = self.on_change.as_mut() {
            callback(state);
        }
        true
    }

    /// Flips the state and returns the new value
    pub fn toggle(&mut self) -> bool {
        self.set_state(!self.state);
        self.state
    }

    pub fn serialize_discovery(&self, device_id: &str) -> WirePayload {
        WirePayload::discovery(&self.id, Platform::Switch, device_id)
    }

    pub fn serialize_state(&self, device_id: &str) -> WirePayload {
        WirePayload::hybrid(&self.id, Platform::Switch, device_id).with_state(self.state)
    }

    pub fn handle_payload(&mut self, payload: &WirePayload) {
        if let Some(power) = payload.state {
            self.set_state(power.is_on());
        }
    }
}

impl fmt::Debug for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Switch")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("dirty", &self.dirty)
            .finish()
    }
}
