//! Built-in handlers
//!
//! Each handler is registered in [`crate::registry`] under the name used on
//! the `plugin` line of the OpenVPN configuration.

pub mod allowlist;
pub mod logger;

pub use allowlist::{AllowlistConfig, AllowlistHandler};
pub use logger::LogHandler;
