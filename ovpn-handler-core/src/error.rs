//! Error types for the OpenVPN handler plugin
//!
//! This module defines all error types used throughout the plugin,
//! from host ABI violations to handler construction failures.

use thiserror::Error;

/// Main error type for the plugin
#[derive(Error, Debug)]
pub enum PluginError {
    /// Errors in what the OpenVPN host passed across the plugin ABI
    #[error("Plugin interface error: {0}")]
    Abi(#[from] AbiError),

    /// Errors related to handler lookup and lifecycle
    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    /// Integer that matches no event or result member
    #[error(transparent)]
    InvalidEnumValue(#[from] InvalidEnumValue),

    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Violations of the OpenVPN plugin v3 calling convention
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("Incompatible plug-in interface: host struct version {found}, plugin expects {expected}")]
    IncompatibleInterface { found: i32, expected: i32 },

    #[error("Too few arguments: expected at least {expected}, got {found}")]
    TooFewArguments { found: usize, expected: usize },

    #[error("Environment entry is not in key=value format: {entry}")]
    MalformedEnv { entry: String },
}

/// Handler lookup and lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("No handler implementation registered as '{name}'")]
    Unimplemented { name: String },

    #[error("Handler '{name}' panicked during {operation}")]
    Panicked {
        name: String,
        operation: &'static str,
    },

    #[error("Invalid arguments for handler '{name}': {reason}")]
    InvalidArguments { name: String, reason: String },
}

/// Integer that does not correspond to any defined enumeration member
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEnumValue {
    #[error("Invalid OpenVPN plugin event value: {0}")]
    Event(i32),

    #[error("Invalid OpenVPN plugin result value: {0}")]
    Result(i32),
}

/// Configuration-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to load configuration file {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PluginError>;
