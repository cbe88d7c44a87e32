//! Event logging handler
//!
//! Logs every callback with the session identifiers OpenVPN puts in the
//! environment. Useful to see which events a server actually raises.

use std::sync::atomic::{AtomicU64, Ordering};

use ovpn_handler_core::{Args, Env, Event, Handler, PluginResult, Result};
use tracing::{info, warn};

/// Environment keys worth logging; `password` is deliberately absent
const LOGGED_ENV_KEYS: &[&str] = &[
    "common_name",
    "username",
    "trusted_ip",
    "untrusted_ip",
    "ifconfig_pool_remote_ip",
];

pub const NAME: &str = "logger";

pub struct LogHandler {
    handled: AtomicU64,
}

impl LogHandler {
    /// Number of events handled so far
    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }
}

impl Handler for LogHandler {
    fn new(args: Args, env: Env) -> Result<Self> {
        info!(
            "Logger loaded with {} argument(s) and {} environment variable(s)",
            args.len(),
            env.len()
        );
        Ok(Self {
            handled: AtomicU64::new(0),
        })
    }

    fn handle(&self, event: i32, args: &[String], env: &Env) -> PluginResult {
        let event = match Event::try_from(event) {
            Ok(event) => event,
            Err(e) => {
                warn!("{}", e);
                return PluginResult::Error;
            }
        };
        self.handled.fetch_add(1, Ordering::Relaxed);

        let session: Vec<String> = LOGGED_ENV_KEYS
            .iter()
            .filter_map(|key| env.get(*key).map(|value| format!("{}={}", key, value)))
            .collect();

        info!("{} args={:?} {}", event, args, session.join(" "));
        PluginResult::Success
    }

    fn shutdown(&mut self) {
        info!("Logger handled {} event(s)", self.handled());
    }
}
