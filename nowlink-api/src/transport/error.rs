use core::fmt;

use alloc::string::String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// I/O operation failed
    Io(String),
    /// Version byte other than the supported one
    UnsupportedVersion(u8),
    /// Frame type unknown or not accepted in this direction
    UnknownFrameType(u8),
    /// Declared body does not fit the frame buffer
    BodyOverflow(usize),
    /// Radio payload exceeds the link limit
    PayloadTooLarge(usize),
    /// Trailing checksum byte does not match the frame
    ChecksumMismatch { expected: u8, actual: u8 },
    /// Body too short or inconsistent for its frame type
    InvalidBody(u8),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::UnsupportedVersion(v) => write!(f, "Unsupported protocol version: {}", v),
            Self::UnknownFrameType(t) => write!(f, "Unknown frame type: 0x{:02x}", t),
            Self::BodyOverflow(size) => write!(f, "Frame body overflow: {} bytes", size),
            Self::PayloadTooLarge(size) => write!(f, "Payload too large: {} bytes", size),
            Self::ChecksumMismatch { expected, actual } => write!(
                f,
                "Checksum mismatch: expected 0x{:02x}, got 0x{:02x}",
                expected, actual
            ),
            Self::InvalidBody(t) => write!(f, "Invalid body for frame type 0x{:02x}", t),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

pub type Result<T> = core::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TransportError::UnknownFrameType(0x7F).to_string(),
            "Unknown frame type: 0x7f"
        );
        assert_eq!(
            TransportError::PayloadTooLarge(300).to_string(),
            "Payload too large: 300 bytes"
        );
        assert_eq!(
            TransportError::ChecksumMismatch {
                expected: 0xEB,
                actual: 0x03
            }
            .to_string(),
            "Checksum mismatch: expected 0xeb, got 0x03"
        );
    }
}
