use embedded_io::{Read, ReadReady, Write};
use log::{debug, warn};

use nowlink_api::MacAddress;
use nowlink_api::time::TimeProvider;
use nowlink_api::transport::{Decoded, DecoderStats, Frame, FrameDecoder};

use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::radio::Radio;

/// Serial bytes pulled per read call
const READ_CHUNK: usize = 64;

/// Outcome of one [`Gateway::poll`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    pub bytes_read: usize,
    /// Transmit requests handed to the radio
    pub forwarded: usize,
    /// Transmit requests the radio refused; still acknowledged
    pub radio_failures: usize,
    /// Frames dropped by the decoder
    pub rejected: usize,
}

/// Bridges radio traffic onto a serial link to the host.
///
/// Radio events are encoded as frames and written in one piece. Host
/// transmit requests are decoded from whatever bytes the port has ready,
/// sent on the radio and acknowledged with the frame's checksum byte.
pub struct Gateway<S, R, T> {
    config: GatewayConfig,
    serial: S,
    radio: R,
    clock: T,
    decoder: FrameDecoder,
}

impl<S, R, T> Gateway<S, R, T>
where
    S: Read + Write + ReadReady,
    R: Radio,
    T: TimeProvider,
{
    pub fn new(config: GatewayConfig, serial: S, radio: R, clock: T) -> Self {
        Self {
            config,
            serial,
            radio,
            clock,
            decoder: FrameDecoder::for_gateway().with_timeout(config.byte_timeout_ms),
        }
    }

    /// Announces the gateway's own address to the host
    pub fn start(&mut self) -> Result<()> {
        self.write_frame(&Frame::GatewayInit {
            mac: self.config.mac,
        })
    }

    pub fn on_radio_receive(&mut self, mac: MacAddress, data: &[u8], rssi: i8) -> Result<()> {
        self.write_frame(&Frame::RadioRx {
            mac,
            rssi,
            payload: data.to_vec(),
        })
    }

    /// Reports a finished transmission; status 0 means success
    pub fn on_radio_sent(&mut self, mac: MacAddress, status: u8) -> Result<()> {
        self.write_frame(&Frame::RadioTxStatus { mac, status })
    }

    /// Drains the serial port without blocking.
    ///
    /// A failed ack write does not stop decoding: the rest of the chunk
    /// already read is still dispatched, then the first error is returned.
    pub fn poll(&mut self) -> Result<PollReport> {
        let mut report = PollReport::default();
        let mut buf = [0u8; READ_CHUNK];
        let mut failure = None;

        if self.decoder.poll_timeout(self.clock.uptime_ms()) {
            debug!("Serial frame timed out");
        }

        while failure.is_none() && self.serial.read_ready().map_err(serial_error)? {
            let len = self.serial.read(&mut buf).map_err(serial_error)?;
            if len == 0 {
                break;
            }
            report.bytes_read += len;

            let now = self.clock.uptime_ms();
            for &byte in &buf[..len] {
                match self.decoder.feed(byte, now) {
                    Ok(Some(decoded)) => {
                        if let Err(e) = self.dispatch(decoded, &mut report) {
                            failure.get_or_insert(e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        debug!("Serial frame dropped: {}", e);
                        report.rejected += 1;
                    }
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    fn dispatch(&mut self, decoded: Decoded, report: &mut PollReport) -> Result<()> {
        if let Frame::RadioTx { mac, payload } = &decoded.frame {
            debug!(
                "{} for {}, {} bytes",
                decoded.frame.frame_type().name(),
                mac,
                payload.len()
            );
            match self.radio.send(mac, payload) {
                Ok(()) => report.forwarded += 1,
                Err(e) => {
                    warn!("Radio send to {} failed: {:?}", mac, e);
                    report.radio_failures += 1;
                }
            }
        }

        self.serial
            .write_all(&[decoded.ack])
            .map_err(serial_error)
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let bytes = frame.encode()?;
        self.serial.write_all(&bytes).map_err(serial_error)?;
        self.serial.flush().map_err(serial_error)
    }

    pub fn decoder_stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }
}

fn serial_error<E: embedded_io::Error>(e: E) -> Error {
    warn!("Serial I/O failed: {:?}", e.kind());
    Error::SerialError
}
