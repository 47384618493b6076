mod provider;

pub use provider::EmbeddedTimeProvider;

pub use nowlink_api::time::TimeProvider;
