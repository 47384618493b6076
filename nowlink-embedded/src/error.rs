use core::fmt;

use nowlink_api::payload::PayloadError;
use nowlink_api::transport::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Registry already holds the maximum number of entities
    RegistryFull,
    /// Another entity with the same id is registered
    DuplicateEntity,
    UnknownEntity,
    /// Radio refused or failed to queue a packet
    Transmit,
    SerializationError,
    /// Serial port read or write failed
    SerialError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RegistryFull => write!(f, "Entity registry is full"),
            Error::DuplicateEntity => write!(f, "Entity id already registered"),
            Error::UnknownEntity => write!(f, "Unknown entity"),
            Error::Transmit => write!(f, "Radio transmit failed"),
            Error::SerializationError => write!(f, "Serialization error"),
            Error::SerialError => write!(f, "Serial error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<PayloadError> for Error {
    fn from(_: PayloadError) -> Self {
        Error::SerializationError
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::PayloadTooLarge(_) => Error::SerializationError,
            _ => Error::SerialError,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
