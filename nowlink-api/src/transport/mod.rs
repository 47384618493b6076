pub mod crc;
pub mod decoder;
pub mod error;
pub mod frame;
pub mod protocol;

pub use crc::{Checksum, checksum};
pub use decoder::{Decoded, DecoderState, DecoderStats, FrameDecoder};
pub use error::TransportError;
pub use frame::Frame;
pub use protocol::{Endpoint, FrameType};

/// First byte of every frame
pub const SYNC: u8 = 0xAA;

/// Only protocol version understood on the serial link
pub const VERSION: u8 = 0x01;

/// Sync, version and type bytes
pub const HEADER_SIZE: usize = 3;

pub const CRC_SIZE: usize = 1;

/// Largest radio payload a frame may carry
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Largest frame body: address, signal strength, length and payload
pub const MAX_BODY_SIZE: usize = 258;

/// A partial frame idle for longer than this is discarded
pub const BYTE_TIMEOUT_MS: u64 = 10;

#[cfg(test)]
mod stream_tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::mac::MacAddress;

    const PEER: MacAddress = MacAddress::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

    fn sample_frames() -> Vec<Frame> {
        vec![
            Frame::GatewayInit { mac: PEER },
            Frame::RadioRx {
                mac: PEER,
                rssi: -40,
                payload: b"{\".t\":\"h\",\"id\":\"led\",\"stat\":\"ON\"}".to_vec(),
            },
            Frame::RadioTxStatus {
                mac: PEER,
                status: 0,
            },
            Frame::RadioRx {
                mac: MacAddress::BROADCAST,
                rssi: 0,
                payload: vec![SYNC; MAX_PAYLOAD_SIZE],
            },
        ]
    }

    #[test]
    fn test_sticky_stream_decodes_every_frame() {
        let frames = sample_frames();
        let mut stream = Vec::new();
        for frame in &frames {
            stream.extend_from_slice(&frame.encode().unwrap());
        }

        let mut decoder = FrameDecoder::for_host();
        let decoded: Vec<Frame> = decoder
            .feed_slice(&stream, 0)
            .into_iter()
            .map(|result| result.unwrap().frame)
            .collect();

        assert_eq!(decoded, frames);
        assert_eq!(decoder.stats().frames, frames.len() as u32);
    }

    #[test]
    fn test_fragmented_stream_within_timeout() {
        let frame = sample_frames().swap_remove(1);
        let bytes = frame.encode().unwrap();
        let mut decoder = FrameDecoder::for_host();

        let mut now = 0;
        let mut decoded = Vec::new();
        for chunk in bytes.chunks(4) {
            decoded.extend(decoder.feed_slice(chunk, now));
            now += BYTE_TIMEOUT_MS;
        }

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].as_ref().unwrap().frame, frame);
    }

    #[test]
    fn test_ack_is_frame_checksum() {
        let frame = Frame::RadioTx {
            mac: PEER,
            payload: b"{\"id\":\"led\",\"stat\":\"OFF\"}".to_vec(),
        };
        let bytes = frame.encode().unwrap();

        let mut decoder = FrameDecoder::for_gateway();
        let decoded = decoder.feed_slice(&bytes, 0).remove(0).unwrap();
        assert_eq!(decoded.ack, bytes[bytes.len() - 1]);
        assert_eq!(decoded.ack, checksum(&bytes[1..bytes.len() - 1]));
    }

    #[test]
    fn test_single_byte_corruption_never_yields_the_frame() {
        let frame = Frame::RadioRx {
            mac: PEER,
            rssi: -40,
            payload: vec![0x01, 0x02, 0x03],
        };
        let bytes = frame.encode().unwrap();

        // Skip the sync byte: corrupting it only hides the frame
        for index in 1..bytes.len() {
            let mut corrupted = bytes.clone();
            corrupted[index] ^= 0x01;

            let mut decoder = FrameDecoder::for_host();
            let results = decoder.feed_slice(&corrupted, 0);
            assert!(
                results.iter().all(|r| r.as_ref().map(|d| &d.frame) != Ok(&frame)),
                "corruption at {} accepted",
                index
            );

            // The decoder recovers for the next clean frame
            let results = decoder.feed_slice(&bytes, 1_000);
            assert_eq!(results.last().unwrap().as_ref().unwrap().frame, frame);
        }
    }
}
