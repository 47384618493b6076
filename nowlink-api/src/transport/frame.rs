use alloc::vec::Vec;

use super::crc::checksum;
use super::error::{Result, TransportError};
use super::protocol::FrameType;
use super::{CRC_SIZE, HEADER_SIZE, MAX_PAYLOAD_SIZE, SYNC, VERSION};

use crate::mac::MacAddress;

/// Offset of the signal strength byte in a radio-receive body
const RSSI_OFFSET: usize = MacAddress::LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    GatewayInit {
        mac: MacAddress,
    },
    RadioRx {
        mac: MacAddress,
        rssi: i8,
        payload: Vec<u8>,
    },
    RadioTx {
        mac: MacAddress,
        payload: Vec<u8>,
    },
    RadioTxStatus {
        mac: MacAddress,
        status: u8,
    },
}

impl Frame {
    pub fn frame_type(&self) -> FrameType {
        match self {
            Self::GatewayInit { .. } => FrameType::GatewayInit,
            Self::RadioRx { .. } => FrameType::RadioRx,
            Self::RadioTx { .. } => FrameType::RadioTx,
            Self::RadioTxStatus { .. } => FrameType::RadioTxStatus,
        }
    }

    /// Peer address carried by the frame
    pub fn mac(&self) -> MacAddress {
        match self {
            Self::GatewayInit { mac }
            | Self::RadioRx { mac, .. }
            | Self::RadioTx { mac, .. }
            | Self::RadioTxStatus { mac, .. } => *mac,
        }
    }

    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::RadioRx { payload, .. } | Self::RadioTx { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Returns body size in bytes
    pub fn body_len(&self) -> usize {
        match self {
            Self::GatewayInit { .. } => MacAddress::LEN,
            Self::RadioRx { payload, .. } => MacAddress::LEN + 2 + payload.len(),
            Self::RadioTx { payload, .. } => MacAddress::LEN + 1 + payload.len(),
            Self::RadioTxStatus { .. } => MacAddress::LEN + 1,
        }
    }

    /// Returns total frame size including sync, header and checksum
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.body_len() + CRC_SIZE
    }

    /// Encodes the complete frame, checksum included
    pub fn encode(&self) -> Result<Vec<u8>> {
        if let Some(payload) = self.payload() {
            if payload.len() > MAX_PAYLOAD_SIZE {
                return Err(TransportError::PayloadTooLarge(payload.len()));
            }
        }

        let mut body = Vec::with_capacity(self.body_len());
        match self {
            Self::GatewayInit { mac } => {
                body.extend_from_slice(mac.as_bytes());
            }
            Self::RadioRx { mac, rssi, payload } => {
                body.extend_from_slice(mac.as_bytes());
                body.push(*rssi as u8);
                body.push(payload.len() as u8);
                body.extend_from_slice(payload);
            }
            Self::RadioTx { mac, payload } => {
                body.extend_from_slice(mac.as_bytes());
                body.push(payload.len() as u8);
                body.extend_from_slice(payload);
            }
            Self::RadioTxStatus { mac, status } => {
                body.extend_from_slice(mac.as_bytes());
                body.push(*status);
            }
        }

        Ok(wrap(self.frame_type().as_u8(), &body))
    }

    /// Decodes a complete body of the given type
    pub fn from_body(frame_type: FrameType, body: &[u8]) -> Result<Self> {
        if expected_body_len(frame_type, body) != Some(body.len()) {
            return Err(TransportError::InvalidBody(frame_type.as_u8()));
        }
        let mac = MacAddress::from_slice(body)
            .ok_or(TransportError::InvalidBody(frame_type.as_u8()))?;

        let frame = match frame_type {
            FrameType::GatewayInit => Self::GatewayInit { mac },
            FrameType::RadioRx => Self::RadioRx {
                mac,
                rssi: body[RSSI_OFFSET] as i8,
                payload: body[RSSI_OFFSET + 2..].to_vec(),
            },
            FrameType::RadioTx => Self::RadioTx {
                mac,
                payload: body[MacAddress::LEN + 1..].to_vec(),
            },
            FrameType::RadioTxStatus => Self::RadioTxStatus {
                mac,
                status: body[MacAddress::LEN],
            },
        };

        Ok(frame)
    }
}

/// Body length for `frame_type`, once `body` holds enough bytes to know it.
///
/// Variable-length bodies carry their payload length right before the
/// payload; `None` means that byte has not arrived yet.
pub fn expected_body_len(frame_type: FrameType, body: &[u8]) -> Option<usize> {
    match frame_type {
        FrameType::GatewayInit => Some(MacAddress::LEN),
        FrameType::RadioTxStatus => Some(MacAddress::LEN + 1),
        FrameType::RadioRx => {
            let len_offset = MacAddress::LEN + 1;
            body.get(len_offset)
                .map(|&len| len_offset + 1 + len as usize)
        }
        FrameType::RadioTx => {
            let len_offset = MacAddress::LEN;
            body.get(len_offset)
                .map(|&len| len_offset + 1 + len as usize)
        }
    }
}

/// Wraps an arbitrary body with sync, version, type and checksum
pub fn wrap(type_byte: u8, body: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER_SIZE + body.len() + CRC_SIZE);
    frame.push(SYNC);
    frame.push(VERSION);
    frame.push(type_byte);
    frame.extend_from_slice(body);

    let crc = checksum(&frame[1..]);
    frame.push(crc);
    frame
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    const MAC: MacAddress = MacAddress::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

    #[test]
    fn test_gateway_init_layout() {
        let bytes = Frame::GatewayInit { mac: MAC }.encode().unwrap();
        assert_eq!(
            bytes,
            vec![0xAA, 0x01, 0x01, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x11]
        );
        assert_eq!(bytes.len(), Frame::GatewayInit { mac: MAC }.encoded_len());
    }

    #[test]
    fn test_radio_rx_layout() {
        let frame = Frame::RadioRx {
            mac: MAC,
            rssi: -40,
            payload: vec![0x01, 0x02, 0x03],
        };
        let bytes = frame.encode().unwrap();

        assert_eq!(
            bytes,
            vec![
                0xAA, 0x01, 0x20, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0xD8, 0x03, 0x01, 0x02,
                0x03, 0xEB
            ]
        );
    }

    #[test]
    fn test_radio_tx_and_status_layout() {
        let tx = Frame::RadioTx {
            mac: MAC,
            payload: vec![0x7B, 0x7D],
        }
        .encode()
        .unwrap();
        assert_eq!(&tx[..3], &[SYNC, VERSION, 0x21]);
        assert_eq!(tx[9], 2);
        assert_eq!(*tx.last().unwrap(), checksum(&tx[1..tx.len() - 1]));

        let status = Frame::RadioTxStatus { mac: MAC, status: 1 }.encode().unwrap();
        assert_eq!(status.len(), 11);
        assert_eq!(status[9], 1);
    }

    #[test]
    fn test_payload_limit() {
        let frame = Frame::RadioTx {
            mac: MAC,
            payload: vec![0; MAX_PAYLOAD_SIZE + 1],
        };
        assert_eq!(
            frame.encode(),
            Err(TransportError::PayloadTooLarge(MAX_PAYLOAD_SIZE + 1))
        );

        let frame = Frame::RadioRx {
            mac: MAC,
            rssi: 0,
            payload: vec![0; MAX_PAYLOAD_SIZE],
        };
        assert!(frame.encode().is_ok());
    }

    #[test]
    fn test_expected_body_len() {
        assert_eq!(expected_body_len(FrameType::GatewayInit, &[]), Some(6));
        assert_eq!(expected_body_len(FrameType::RadioTxStatus, &[]), Some(7));
        assert_eq!(expected_body_len(FrameType::RadioRx, &[0; 7]), None);
        assert_eq!(expected_body_len(FrameType::RadioRx, &[0, 0, 0, 0, 0, 0, 0, 3]), Some(11));
        assert_eq!(expected_body_len(FrameType::RadioTx, &[0; 6]), None);
        assert_eq!(expected_body_len(FrameType::RadioTx, &[0, 0, 0, 0, 0, 0, 5]), Some(12));
    }

    #[test]
    fn test_from_body_rejects_inconsistent_length() {
        assert_eq!(
            Frame::from_body(FrameType::GatewayInit, &[1, 2, 3]),
            Err(TransportError::InvalidBody(0x01))
        );
        assert_eq!(
            Frame::from_body(FrameType::RadioTx, &[0, 0, 0, 0, 0, 0, 2, 9]),
            Err(TransportError::InvalidBody(0x21))
        );
    }

    #[test]
    fn test_from_body_status() {
        let frame =
            Frame::from_body(FrameType::RadioTxStatus, &[1, 2, 3, 4, 5, 6, 0]).unwrap();
        assert_eq!(
            frame,
            Frame::RadioTxStatus {
                mac: MacAddress::new([1, 2, 3, 4, 5, 6]),
                status: 0
            }
        );
    }
}
