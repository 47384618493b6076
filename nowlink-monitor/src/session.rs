use nowlink_api::transport::{DecoderStats, Frame, FrameDecoder, FrameType, TransportError};
use nowlink_api::{MacAddress, WirePayload};

/// Something the gateway told us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Gateway (re)booted and announced its radio address
    GatewayReady(MacAddress),
    Packet {
        mac: MacAddress,
        rssi: i8,
        payload: Vec<u8>,
    },
    TxStatus {
        mac: MacAddress,
        status: u8,
    },
    Dropped(TransportError),
}

/// Host end of one serial connection.
#[derive(Debug)]
pub struct Session {
    decoder: FrameDecoder,
    probes: Vec<(MacAddress, String)>,
    gateway: Option<MacAddress>,
}

impl Session {
    pub fn new(probes: Vec<(MacAddress, String)>) -> Self {
        Self {
            decoder: FrameDecoder::for_host(),
            probes,
            gateway: None,
        }
    }

    /// Address announced by the gateway, once seen
    pub fn gateway(&self) -> Option<MacAddress> {
        self.gateway
    }

    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Decodes a chunk read from the port
    pub fn process(&mut self, data: &[u8], now_ms: u64) -> Vec<Event> {
        self.decoder
            .feed_slice(data, now_ms)
            .into_iter()
            .map(|result| match result {
                Ok(decoded) => Self::event(decoded.frame),
                Err(e) => Event::Dropped(e),
            })
            .collect()
    }

    /// Frames to write back in reaction to `event`
    pub fn respond(&mut self, event: &Event) -> Vec<Vec<u8>> {
        match event {
            Event::GatewayReady(mac) => {
                self.gateway = Some(*mac);
                self.probe_frames()
            }
            _ => Vec::new(),
        }
    }

    /// One discovery query per configured probe
    pub fn probe_frames(&self) -> Vec<Vec<u8>> {
        self.probes
            .iter()
            .filter_map(|(mac, entity)| {
                let payload = WirePayload::discovery_query(entity).encode().ok()?;
                let frame = Frame::RadioTx { mac: *mac, payload };
                match frame.encode() {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        tracing::warn!("Probe for {} skipped: {}", entity, e);
                        None
                    }
                }
            })
            .collect()
    }

    fn event(frame: Frame) -> Event {
        match frame {
            Frame::GatewayInit { mac } => Event::GatewayReady(mac),
            Frame::RadioRx { mac, rssi, payload } => Event::Packet { mac, rssi, payload },
            Frame::RadioTxStatus { mac, status } => Event::TxStatus { mac, status },
            // Host decoders never accept transmit requests
            Frame::RadioTx { .. } => {
                Event::Dropped(TransportError::UnknownFrameType(FrameType::RadioTx.as_u8()))
            }
        }
    }
}

pub fn log_event(event: &Event) {
    match event {
        Event::GatewayReady(mac) => tracing::info!("Gateway ready: {}", mac),
        Event::Packet { mac, rssi, payload } => match WirePayload::decode(payload) {
            Ok(record) => tracing::info!(
                "RX {} ({} dBm) id={} type={} {:?}",
                mac,
                rssi,
                record.id,
                record.kind.map_or("-", |kind| kind.as_str()),
                record
            ),
            Err(_) => match serde_json::from_slice::<serde_json::Value>(payload) {
                Ok(value) => tracing::info!("RX {} ({} dBm) {}", mac, rssi, value),
                Err(_) => tracing::info!(
                    "RX {} ({} dBm) {} raw bytes",
                    mac,
                    rssi,
                    payload.len()
                ),
            },
        },
        Event::TxStatus { mac, status } if *status == 0 => {
            tracing::debug!("TX to {} delivered to radio", mac)
        }
        Event::TxStatus { mac, status } => tracing::warn!("TX to {} failed: status {}", mac, status),
        Event::Dropped(TransportError::UnknownFrameType(value)) => match FrameType::from_u8(*value) {
            Ok(frame_type) => tracing::warn!(
                "Dropped {} frame: only the gateway receives it",
                frame_type.name()
            ),
            Err(e) => tracing::warn!("Dropped serial frame: {}", e),
        },
        Event::Dropped(e) => tracing::warn!("Dropped serial frame: {}", e),
    }
}
