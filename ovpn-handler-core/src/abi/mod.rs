//! `#[repr(C)]` mirrors of the OpenVPN plugin v3 structures
//!
//! Layouts follow `openvpn-plugin.h`. Only the fields the plugin reads
//! are relied upon; structures the host owns are never constructed by
//! the plugin outside of tests.

use std::os::raw::{c_char, c_int, c_uint, c_void};

pub mod log;
pub mod strings;

/// Version of the v3 argument structures this plugin was built against
pub const OPENVPN_PLUGINV3_STRUCTVER: c_int = 5;

/// `plugin_log` flags
pub const PLOG_ERR: c_int = 1 << 0;
pub const PLOG_WARN: c_int = 1 << 1;
pub const PLOG_NOTE: c_int = 1 << 2;
pub const PLOG_DEBUG: c_int = 1 << 3;

/// `void plugin_log(openvpn_plugin_log_flags_t, const char *name, const char *fmt, ...)`
pub type PluginLogFn =
    unsafe extern "C" fn(flags: c_int, plugin_name: *const c_char, format: *const c_char, ...);

/// `struct openvpn_plugin_callbacks`
///
/// Later members (`plugin_secure_memzero`, base64 helpers) exist depending
/// on the host version and are not declared.
#[repr(C)]
pub struct Callbacks {
    pub plugin_log: Option<PluginLogFn>,
    /// Takes a `va_list`; never called.
    pub plugin_vlog: *const c_void,
}

/// `struct openvpn_plugin_string_list`
#[repr(C)]
pub struct StringList {
    pub next: *mut StringList,
    pub name: *mut c_char,
    pub value: *mut c_char,
}

/// `struct openvpn_plugin_args_open_in`
#[repr(C)]
pub struct OpenArgs {
    pub type_mask: c_int,
    pub argv: *const *const c_char,
    pub envp: *const *const c_char,
    pub callbacks: *const Callbacks,
    pub ssl_api: c_int,
    pub ovpn_version: *const c_char,
    pub ovpn_version_major: c_uint,
    pub ovpn_version_minor: c_uint,
    pub ovpn_version_patch: *const c_char,
}

/// `struct openvpn_plugin_args_open_return`
#[repr(C)]
pub struct OpenReturn {
    pub type_mask: c_int,
    pub handle: *mut c_void,
    pub return_list: *mut *mut StringList,
}

/// `struct openvpn_plugin_args_func_in`
#[repr(C)]
pub struct FuncArgs {
    pub event_type: c_int,
    pub argv: *const *const c_char,
    pub envp: *const *const c_char,
    pub handle: *mut c_void,
    pub per_client_context: *mut c_void,
    pub current_cert_depth: c_int,
    pub current_cert: *mut c_void,
}

/// `struct openvpn_plugin_args_func_return`
#[repr(C)]
pub struct FuncReturn {
    pub return_list: *mut *mut StringList,
}
