use super::error::TransportError;

/// Frame type byte following the version field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FrameType {
    /// Gateway announces its own radio address after boot
    GatewayInit = 0x01,
    /// Gateway forwards a packet it received over the radio
    RadioRx = 0x20,
    /// Host asks the gateway to transmit a packet
    RadioTx = 0x21,
    /// Gateway reports the outcome of a radio transmission
    RadioTxStatus = 0x22,
}

/// Side of the serial link a decoder runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Radio bridge; receives host requests
    Gateway,
    /// Host computer; receives gateway events
    Host,
}

impl FrameType {
    /// Creates frame type from byte value
    pub fn from_u8(value: u8) -> Result<Self, TransportError> {
        match value {
            0x01 => Ok(Self::GatewayInit),
            0x20 => Ok(Self::RadioRx),
            0x21 => Ok(Self::RadioTx),
            0x22 => Ok(Self::RadioTxStatus),
            other => Err(TransportError::UnknownFrameType(other)),
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Returns frame type name
    pub fn name(&self) -> &'static str {
        match self {
            Self::GatewayInit => "GATEWAY_INIT",
            Self::RadioRx => "ESPNOW_RX",
            Self::RadioTx => "ESPNOW_TX",
            Self::RadioTxStatus => "ESPNOW_TX_STATUS",
        }
    }

    /// Endpoint that consumes frames of this type
    pub fn receiver(&self) -> Endpoint {
        match self {
            Self::RadioTx => Endpoint::Gateway,
            Self::GatewayInit | Self::RadioRx | Self::RadioTxStatus => Endpoint::Host,
        }
    }
}

impl Endpoint {
    /// Parses a type byte, rejecting types this endpoint never receives
    pub fn accept(&self, value: u8) -> Result<FrameType, TransportError> {
        let frame_type = FrameType::from_u8(value)?;
        if frame_type.receiver() == *self {
            Ok(frame_type)
        } else {
            Err(TransportError::UnknownFrameType(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_type_from_u8() {
        assert_eq!(FrameType::from_u8(0x01).unwrap(), FrameType::GatewayInit);
        assert_eq!(FrameType::from_u8(0x20).unwrap(), FrameType::RadioRx);
        assert_eq!(FrameType::from_u8(0x21).unwrap(), FrameType::RadioTx);
        assert_eq!(FrameType::from_u8(0x22).unwrap(), FrameType::RadioTxStatus);
        assert_eq!(
            FrameType::from_u8(0x99),
            Err(TransportError::UnknownFrameType(0x99))
        );
    }

    #[test]
    fn test_frame_type_name() {
        assert_eq!(FrameType::RadioRx.name(), "ESPNOW_RX");
        assert_eq!(FrameType::RadioTx.as_u8(), 0x21);
    }

    #[test]
    fn test_endpoint_acceptance() {
        assert_eq!(Endpoint::Gateway.accept(0x21), Ok(FrameType::RadioTx));
        assert!(Endpoint::Gateway.accept(0x20).is_err());
        assert!(Endpoint::Gateway.accept(0x01).is_err());

        assert_eq!(Endpoint::Host.accept(0x01), Ok(FrameType::GatewayInit));
        assert_eq!(Endpoint::Host.accept(0x22), Ok(FrameType::RadioTxStatus));
        assert!(Endpoint::Host.accept(0x21).is_err());
    }
}
