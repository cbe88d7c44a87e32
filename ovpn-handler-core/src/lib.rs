//! Core library for OpenVPN plugin event handlers
//!
//! This crate defines the [`Handler`] contract, the event and result codes
//! shared with the OpenVPN host, and the plugin v3 bridge that lets a
//! `cdylib` expose handlers to `openvpn --plugin`.

pub mod error;
pub mod types;

pub mod abi;
pub mod config;
pub mod handler;
pub mod plugin;
pub mod registry;

pub use error::{PluginError, Result};
pub use handler::Handler;
pub use plugin::PluginContext;
pub use registry::HandlerRegistry;
pub use types::{Args, Env, Event, EventMask, PluginResult};

/// Initialize logging for standalone tools
///
/// Uses the systemd journal when running as a unit, pretty stderr
/// otherwise. Code running inside OpenVPN logs through the host instead,
/// see [`abi::log`].
pub fn init_logging() -> std::result::Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Try to use systemd journal logging if available
    #[cfg(target_os = "linux")]
    {
        if std::env::var("JOURNAL_STREAM").is_ok() {
            // We're running under systemd, use journal logging
            let journal_layer = tracing_journald::layer()?;
            tracing_subscriber::registry()
                .with(journal_layer)
                .with(tracing_subscriber::filter::LevelFilter::INFO)
                .init();
            return Ok(());
        }
    }

    // Fallback to stderr logging with pretty formatting
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    Ok(())
}
