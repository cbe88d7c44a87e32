//! Allowlist handler
//!
//! Accepts user/password verification and client connects only for
//! usernames and certificate common names listed in a TOML file:
//!
//! ```toml
//! [allowlist]
//! common_names = ["alice", "bob"]
//! usernames = ["alice"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use ovpn_handler_core::config::load_toml;
use ovpn_handler_core::error::{ConfigError, HandlerError};
use ovpn_handler_core::{Args, Env, Event, EventMask, Handler, PluginResult, Result};
use serde::Deserialize;
use tracing::{info, warn};

pub const NAME: &str = "allowlist";

/// `[allowlist]` table of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AllowlistConfig {
    #[serde(default)]
    pub common_names: Vec<String>,

    #[serde(default)]
    pub usernames: Vec<String>,
}

impl AllowlistConfig {
    /// Load the `[allowlist]` table from `path`
    pub fn from_file(path: &Path) -> Result<Self> {
        #[derive(Deserialize)]
        struct ConfigFile {
            allowlist: AllowlistConfig,
        }

        let file: ConfigFile = load_toml(path)?;
        file.allowlist.validate().map_err(|message| ConfigError::ValidationError { message })?;
        Ok(file.allowlist)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.common_names.is_empty() && self.usernames.is_empty() {
            return Err("Allowlist must name at least one common name or username".to_string());
        }

        if self.common_names.iter().chain(&self.usernames).any(|name| name.is_empty()) {
            return Err("Allowlist entries cannot be empty".to_string());
        }

        Ok(())
    }
}

pub struct AllowlistHandler {
    common_names: HashSet<String>,
    usernames: HashSet<String>,
}

impl AllowlistHandler {
    fn check(&self, allowed: &HashSet<String>, key: &str, env: &Env) -> PluginResult {
        match env.get(key) {
            Some(value) if allowed.contains(value) => {
                info!("Allowed {}={}", key, value);
                PluginResult::Success
            }
            Some(value) => {
                warn!("Rejected {}={}: not in allowlist", key, value);
                PluginResult::Error
            }
            None => {
                warn!("Rejected: environment has no {}", key);
                PluginResult::Error
            }
        }
    }
}

impl From<AllowlistConfig> for AllowlistHandler {
    fn from(config: AllowlistConfig) -> Self {
        Self {
            common_names: config.common_names.into_iter().collect(),
            usernames: config.usernames.into_iter().collect(),
        }
    }
}

impl Handler for AllowlistHandler {
    fn new(args: Args, _env: Env) -> Result<Self> {
        let path = args.first().ok_or_else(|| HandlerError::InvalidArguments {
            name: NAME.to_string(),
            reason: "expected the path of the allowlist file".to_string(),
        })?;

        let config = AllowlistConfig::from_file(Path::new(path))?;
        info!(
            "Allowlist loaded from {}: {} common name(s), {} username(s)",
            path,
            config.common_names.len(),
            config.usernames.len()
        );
        Ok(config.into())
    }

    fn handle(&self, event: i32, _args: &[String], env: &Env) -> PluginResult {
        match Event::try_from(event) {
            Ok(Event::AuthUserPassVerify) => self.check(&self.usernames, "username", env),
            Ok(Event::ClientConnect | Event::ClientConnectV2) => {
                self.check(&self.common_names, "common_name", env)
            }
            _ => PluginResult::Success,
        }
    }

    fn event_mask(&self) -> EventMask {
        EventMask::AUTH_USER_PASS_VERIFY | EventMask::CLIENT_CONNECT | EventMask::CLIENT_CONNECT_V2
    }
}
