use alloc::vec::Vec;

use super::crc::Checksum;
use super::error::{Result, TransportError};
use super::frame::{Frame, expected_body_len};
use super::protocol::{Endpoint, FrameType};
use super::{BYTE_TIMEOUT_MS, MAX_BODY_SIZE, MAX_PAYLOAD_SIZE, SYNC, VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    WaitSync,
    WaitVersion,
    WaitType,
    ReadBody,
    WaitCrc,
}

/// Counters for frames the decoder accepted or threw away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    pub frames: u32,
    pub checksum_errors: u32,
    /// Frames abandoned on a bad version, type or length; includes
    /// payloads declared longer than the radio allows
    pub dropped: u32,
    /// Partial frames abandoned after the inter-byte timeout
    pub timeouts: u32,
}

/// A validated frame and the acknowledgement byte to echo for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub frame: Frame,
    /// Checksum of the frame; the gateway writes it back after dispatch
    pub ack: u8,
}

/// Byte-at-a-time frame parser.
///
/// The parser never blocks and never allocates while reading a body: bytes
/// are accumulated into a fixed buffer and a frame that would not fit is
/// abandoned. A frame left incomplete for longer than the inter-byte
/// timeout is discarded before the next byte is processed.
#[derive(Debug)]
pub struct FrameDecoder {
    endpoint: Endpoint,
    state: DecoderState,
    frame_type: Option<FrameType>,
    body: heapless::Vec<u8, MAX_BODY_SIZE>,
    expected_len: Option<usize>,
    crc: Checksum,
    last_byte_ms: u64,
    timeout_ms: u64,
    stats: DecoderStats,
}

impl FrameDecoder {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            state: DecoderState::WaitSync,
            frame_type: None,
            body: heapless::Vec::new(),
            expected_len: None,
            crc: Checksum::new(),
            last_byte_ms: 0,
            timeout_ms: BYTE_TIMEOUT_MS,
            stats: DecoderStats::default(),
        }
    }

    /// Decoder for the gateway side: accepts host transmit requests
    pub fn for_gateway() -> Self {
        Self::new(Endpoint::Gateway)
    }

    /// Decoder for the host side: accepts gateway events
    pub fn for_host() -> Self {
        Self::new(Endpoint::Host)
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// True when no partial frame is buffered
    pub fn is_idle(&self) -> bool {
        self.state == DecoderState::WaitSync
    }

    /// Drops any partial frame and waits for the next sync byte
    pub fn reset(&mut self) {
        self.state = DecoderState::WaitSync;
        self.frame_type = None;
        self.body.clear();
        self.expected_len = None;
        self.crc.reset();
    }

    /// Discards a stale partial frame; returns whether one was dropped
    pub fn poll_timeout(&mut self, now_ms: u64) -> bool {
        if self.state != DecoderState::WaitSync
            && now_ms.saturating_sub(self.last_byte_ms) > self.timeout_ms
        {
            self.stats.timeouts = self.stats.timeouts.saturating_add(1);
            self.reset();
            return true;
        }
        false
    }

    /// Processes one byte received at `now_ms`.
    ///
    /// Returns `Ok(Some(_))` when the byte completed a valid frame,
    /// `Ok(None)` when more bytes are needed, and `Err(_)` when the frame in
    /// progress was abandoned. After an error the decoder is already hunting
    /// for the next sync byte.
    pub fn feed(&mut self, byte: u8, now_ms: u64) -> Result<Option<Decoded>> {
        self.poll_timeout(now_ms);
        self.last_byte_ms = now_ms;

        match self.state {
            DecoderState::WaitSync => {
                if byte == SYNC {
                    self.state = DecoderState::WaitVersion;
                }
                Ok(None)
            }
            DecoderState::WaitVersion => {
                if byte == SYNC {
                    // Previous sync byte was noise; this one may start a frame
                    return Ok(None);
                }
                if byte != VERSION {
                    return Err(self.abandon(TransportError::UnsupportedVersion(byte)));
                }
                self.crc.reset();
                self.crc.push(byte);
                self.state = DecoderState::WaitType;
                Ok(None)
            }
            DecoderState::WaitType => {
                let frame_type = match self.endpoint.accept(byte) {
                    Ok(frame_type) => frame_type,
                    Err(e) => return Err(self.abandon(e)),
                };
                self.crc.push(byte);
                self.frame_type = Some(frame_type);
                self.body.clear();
                self.expected_len = expected_body_len(frame_type, &[]);
                self.state = DecoderState::ReadBody;
                Ok(None)
            }
            DecoderState::ReadBody => self.read_body(byte),
            DecoderState::WaitCrc => self.finish(byte).map(Some),
        }
    }

    /// Feeds every byte of `data`, collecting completed frames and errors
    pub fn feed_slice(&mut self, data: &[u8], now_ms: u64) -> Vec<Result<Decoded>> {
        data.iter()
            .filter_map(|&byte| self.feed(byte, now_ms).transpose())
            .collect()
    }

    fn read_body(&mut self, byte: u8) -> Result<Option<Decoded>> {
        let Some(frame_type) = self.frame_type else {
            return Err(self.abandon(TransportError::InvalidBody(0)));
        };

        if self.body.push(byte).is_err() {
            let size = self.body.len() + 1;
            return Err(self.abandon(TransportError::BodyOverflow(size)));
        }
        self.crc.push(byte);

        if self.expected_len.is_none() {
            self.expected_len = expected_body_len(frame_type, &self.body);
            match self.expected_len {
                // This byte was the payload length
                Some(_) if byte as usize > MAX_PAYLOAD_SIZE => {
                    return Err(self.abandon(TransportError::PayloadTooLarge(byte as usize)));
                }
                Some(len) if len > MAX_BODY_SIZE => {
                    return Err(self.abandon(TransportError::BodyOverflow(len)));
                }
                _ => {}
            }
        }

        if self.expected_len == Some(self.body.len()) {
            self.state = DecoderState::WaitCrc;
        }
        Ok(None)
    }

    fn finish(&mut self, byte: u8) -> Result<Decoded> {
        let expected = self.crc.value();
        let frame_type = self.frame_type;
        let result = if byte != expected {
            self.stats.checksum_errors = self.stats.checksum_errors.saturating_add(1);
            Err(TransportError::ChecksumMismatch {
                expected,
                actual: byte,
            })
        } else {
            let frame = match frame_type {
                Some(frame_type) => Frame::from_body(frame_type, &self.body),
                None => Err(TransportError::InvalidBody(0)),
            };
            frame.map(|frame| Decoded {
                frame,
                ack: expected,
            })
        };

        if result.is_ok() {
            self.stats.frames = self.stats.frames.saturating_add(1);
        }
        self.reset();
        result
    }

    fn abandon(&mut self, error: TransportError) -> TransportError {
        self.stats.dropped = self.stats.dropped.saturating_add(1);
        self.reset();
        error
    }
}
