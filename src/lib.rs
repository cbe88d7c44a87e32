//! ovpn-handler - OpenVPN plugin with built-in Rust handlers
//!
//! Built as a `cdylib`, this crate is loaded by OpenVPN with
//!
//! ```text
//! plugin /usr/lib/openvpn/plugins/libovpn_handler.so <handler> [args...]
//! ```
//!
//! where `<handler>` is one of the names registered by [`registry`].

use ovpn_handler_core::HandlerRegistry;

pub mod handlers;

/// Registry of the built-in handlers
pub fn registry() -> HandlerRegistry {
    HandlerRegistry::new()
        .with::<handlers::LogHandler>(handlers::logger::NAME)
        .with::<handlers::AllowlistHandler>(handlers::allowlist::NAME)
}

ovpn_handler_core::export_plugin!(registry());
