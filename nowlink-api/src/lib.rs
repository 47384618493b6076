#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod mac;
pub mod payload;
pub mod time;
pub mod transport;

pub use mac::MacAddress;
pub use payload::WirePayload;
pub use time::TimeProvider;
