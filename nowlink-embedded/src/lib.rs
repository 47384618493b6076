#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod config;
pub mod discovery;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod link;
pub mod radio;
pub mod registry;
pub mod time;

pub use config::*;
pub use entity::{BinarySensor, Entity, Light, Switch};
pub use error::*;
pub use gateway::{Gateway, PollReport};
pub use link::{DiscardReason, DiscoveryOutcome, Inbound, NowLink, TickReport};
pub use radio::Radio;
pub use registry::EntityHandle;
