//! Unit tests for error types and conversions

use ovpn_handler_core::error::{
    AbiError, ConfigError, HandlerError, InvalidEnumValue, PluginError,
};

#[test]
fn test_abi_error_display() {
    let error = AbiError::IncompatibleInterface {
        found: 3,
        expected: 5,
    };
    assert_eq!(
        error.to_string(),
        "Incompatible plug-in interface: host struct version 3, plugin expects 5"
    );

    let error = AbiError::MalformedEnv {
        entry: "garbage".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Environment entry is not in key=value format: garbage"
    );
}

#[test]
fn test_handler_error_display() {
    let error = HandlerError::Unimplemented {
        name: "radius".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "No handler implementation registered as 'radius'"
    );
}

#[test]
fn test_invalid_enum_value_display() {
    assert_eq!(
        InvalidEnumValue::Event(99).to_string(),
        "Invalid OpenVPN plugin event value: 99"
    );
    assert_eq!(
        InvalidEnumValue::Result(7).to_string(),
        "Invalid OpenVPN plugin result value: 7"
    );
}

#[test]
fn test_plugin_error_from_abi() {
    let error: PluginError = AbiError::TooFewArguments {
        found: 1,
        expected: 2,
    }
    .into();
    assert!(matches!(error, PluginError::Abi(_)));
    assert_eq!(
        error.to_string(),
        "Plugin interface error: Too few arguments: expected at least 2, got 1"
    );
}

#[test]
fn test_plugin_error_from_invalid_enum_is_transparent() {
    let error: PluginError = InvalidEnumValue::Event(13).into();
    assert!(matches!(error, PluginError::InvalidEnumValue(_)));
    assert_eq!(error.to_string(), "Invalid OpenVPN plugin event value: 13");
}

#[test]
fn test_plugin_error_from_config() {
    let error: PluginError = ConfigError::ValidationError {
        message: "empty".to_string(),
    }
    .into();
    assert!(matches!(error, PluginError::Config(_)));
}
