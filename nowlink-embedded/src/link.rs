use log::{debug, warn};

use nowlink_api::payload::PayloadType;
use nowlink_api::transport::MAX_PAYLOAD_SIZE;
use nowlink_api::{MacAddress, WirePayload};

use crate::config::LinkConfig;
use crate::discovery::{DiscoveryQueue, DiscoveryRequest};
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::radio::Radio;
use crate::registry::{EntityHandle, Registry};

/// What happened to the discovery request handled during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    Sent(EntityHandle),
    /// Send failed; queued again with this many failed attempts
    Retrying { entity: EntityHandle, attempts: u8 },
    /// Send failed and the request was given up
    Abandoned(EntityHandle),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub states_sent: usize,
    pub states_failed: usize,
    pub discovery: Option<DiscoveryOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    Malformed,
    UnknownEntity,
    /// Discovery query arrived while the queue was full
    QueueFull,
}

/// Result of handing a received radio packet to the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    Discarded(DiscardReason),
    DiscoveryQueued(EntityHandle),
    Applied(EntityHandle),
}

/// Device side of the radio link.
///
/// Owns the device's entities and decides what goes on the air: dirty
/// state first, then at most one discovery announcement per [`tick`].
/// Nothing here blocks; a failed send leaves the entity dirty for the next
/// tick.
///
/// [`tick`]: NowLink::tick
#[derive(Debug)]
pub struct NowLink<R: Radio> {
    config: LinkConfig,
    registry: Registry,
    queue: DiscoveryQueue,
    radio: R,
}

impl<R: Radio> NowLink<R> {
    pub fn new(config: LinkConfig, radio: R) -> Self {
        Self {
            config,
            registry: Registry::new(),
            queue: DiscoveryQueue::new(),
            radio,
        }
    }

    /// Adds an entity; `announce` queues a discovery for it
    pub fn register(&mut self, entity: impl Into<Entity>, announce: bool) -> Result<EntityHandle> {
        let handle = self.registry.add(entity.into())?;
        if announce {
            self.request_discovery(handle)?;
        }
        Ok(handle)
    }

    /// Queues a discovery announcement; returns `false` when the queue is full
    pub fn request_discovery(&mut self, handle: EntityHandle) -> Result<bool> {
        if self.registry.get(handle).is_none() {
            return Err(Error::UnknownEntity);
        }
        let queued = self.queue.push(handle);
        if !queued {
            debug!("Discovery queue full, dropping request for {:?}", handle);
        }
        Ok(queued)
    }

    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let device_id = self.config.device_id.as_str();
        let destination = self.config.destination;

        for entity in self.registry.iter_mut() {
            if !entity.is_dirty() {
                continue;
            }
            let payload = entity.serialize_state(device_id);
            match transmit(&mut self.radio, &destination, &payload) {
                Ok(()) => {
                    entity.clear_dirty();
                    report.states_sent += 1;
                }
                // Resending cannot shrink the payload
                Err(Error::SerializationError) => {
                    entity.clear_dirty();
                    report.states_failed += 1;
                }
                Err(e) => {
                    debug!("State of {} not sent: {}", entity.id(), e);
                    report.states_failed += 1;
                }
            }
        }

        if let Some(request) = self.queue.pop() {
            report.discovery = self.send_discovery(request);
        }

        report
    }

    fn send_discovery(&mut self, request: DiscoveryRequest) -> Option<DiscoveryOutcome> {
        let entity = self.registry.get(request.entity)?;
        let payload = entity.serialize_discovery(&self.config.device_id);

        match transmit(&mut self.radio, &self.config.destination, &payload) {
            Ok(()) => Some(DiscoveryOutcome::Sent(request.entity)),
            Err(Error::SerializationError) => Some(DiscoveryOutcome::Abandoned(request.entity)),
            Err(_) => {
                let attempts = request.attempts.saturating_add(1);
                if attempts >= self.config.max_discovery_attempts {
                    warn!(
                        "Discovery of {} abandoned after {} attempts",
                        payload.id, attempts
                    );
                    return Some(DiscoveryOutcome::Abandoned(request.entity));
                }

                let retry = DiscoveryRequest {
                    entity: request.entity,
                    attempts,
                };
                if self.queue.requeue(retry) {
                    debug!("Discovery of {} retrying, attempt {}", payload.id, attempts);
                    Some(DiscoveryOutcome::Retrying {
                        entity: request.entity,
                        attempts,
                    })
                } else {
                    Some(DiscoveryOutcome::Abandoned(request.entity))
                }
            }
        }
    }

    /// Dispatches one received radio payload.
    ///
    /// Discovery queries are answered on a later tick, never inline.
    pub fn handle_packet(&mut self, data: &[u8]) -> Inbound {
        let payload = match WirePayload::decode(data) {
            Ok(payload) => payload,
            Err(e) => {
                debug!("Discarding packet: {}", e);
                return Inbound::Discarded(DiscardReason::Malformed);
            }
        };

        let Some(handle) = self.registry.find(&payload.id) else {
            return Inbound::Discarded(DiscardReason::UnknownEntity);
        };

        if payload.kind == Some(PayloadType::Discovery) {
            return if self.queue.push(handle) {
                Inbound::DiscoveryQueued(handle)
            } else {
                Inbound::Discarded(DiscardReason::QueueFull)
            };
        }

        if let Some(entity) = self.registry.get_mut(handle) {
            entity.handle_payload(&payload);
        }
        Inbound::Applied(handle)
    }

    pub fn entity(&self, handle: EntityHandle) -> Option<&Entity> {
        self.registry.get(handle)
    }

    pub fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.registry.get_mut(handle)
    }

    pub fn find(&self, id: &str) -> Option<EntityHandle> {
        self.registry.find(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> {
        self.registry.iter()
    }

    pub fn device_id(&self) -> &str {
        &self.config.device_id
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn pending_discovery(&self) -> usize {
        self.queue.len()
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }
}

fn transmit<R: Radio>(radio: &mut R, peer: &MacAddress, payload: &WirePayload) -> Result<()> {
    let data = payload.encode()?;
    if data.len() > MAX_PAYLOAD_SIZE {
        warn!(
            "Payload for {} is {} bytes, radio limit is {}",
            payload.id,
            data.len(),
            MAX_PAYLOAD_SIZE
        );
        return Err(Error::SerializationError);
    }
    radio.send(peer, &data).map_err(|e| {
        debug!("Radio send to {} failed: {:?}", peer, e);
        Error::Transmit
    })
}
