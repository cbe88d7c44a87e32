//! Drives the exported OpenVPN plugin symbols the way the host does

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use ovpn_handler::{openvpn_plugin_close_v1, openvpn_plugin_func_v3, openvpn_plugin_open_v3};
use ovpn_handler_core::abi::{FuncArgs, FuncReturn, OpenArgs, OpenReturn, OPENVPN_PLUGINV3_STRUCTVER};
use ovpn_handler_core::{Event, EventMask};

fn c_strings(values: &[&str]) -> Vec<CString> {
    values.iter().map(|v| CString::new(*v).unwrap()).collect()
}

fn null_terminated(strings: &[CString]) -> Vec<*const c_char> {
    strings
        .iter()
        .map(|s| s.as_ptr())
        .chain(std::iter::once(ptr::null()))
        .collect()
}

/// Load `argv`, deliver one event with `envp`, unload; returns
/// (open status, type mask, event result)
fn run(argv: &[&str], event: Event, envp: &[&str]) -> (i32, i32, Option<i32>) {
    let argv_owned = c_strings(argv);
    let argv_raw = null_terminated(&argv_owned);
    let env_owned = c_strings(&["verb=3"]);
    let env_raw = null_terminated(&env_owned);

    let open_args = OpenArgs {
        type_mask: EventMask::all().bits(),
        argv: argv_raw.as_ptr(),
        envp: env_raw.as_ptr(),
        callbacks: ptr::null(),
        ssl_api: 0,
        ovpn_version: ptr::null(),
        ovpn_version_major: 2,
        ovpn_version_minor: 6,
        ovpn_version_patch: ptr::null(),
    };
    let mut open_ret = OpenReturn {
        type_mask: 0,
        handle: ptr::null_mut(),
        return_list: ptr::null_mut(),
    };

    let status =
        unsafe { openvpn_plugin_open_v3(OPENVPN_PLUGINV3_STRUCTVER, &open_args, &mut open_ret) };
    if status != 0 {
        return (status, open_ret.type_mask, None);
    }

    let func_argv_owned = c_strings(&argv[..1]);
    let func_argv = null_terminated(&func_argv_owned);
    let func_env_owned = c_strings(envp);
    let func_env = null_terminated(&func_env_owned);
    let func_args = FuncArgs {
        event_type: event.into(),
        argv: func_argv.as_ptr(),
        envp: func_env.as_ptr(),
        handle: open_ret.handle,
        per_client_context: ptr::null_mut(),
        current_cert_depth: 0,
        current_cert: ptr::null_mut(),
    };
    let mut func_ret = FuncReturn {
        return_list: ptr::null_mut(),
    };

    let result = unsafe { openvpn_plugin_func_v3(3, &func_args, &mut func_ret) };
    unsafe { openvpn_plugin_close_v1(open_ret.handle) };

    (status, open_ret.type_mask, Some(result))
}

#[test]
fn test_logger_through_plugin_symbols() {
    let (status, mask, result) = run(
        &["/usr/lib/openvpn/plugins/libovpn_handler.so", "logger"],
        Event::ClientConnect,
        &["common_name=alice", "script_type=client-connect"],
    );

    assert_eq!(status, 0);
    assert_eq!(mask, EventMask::all().bits());
    assert_eq!(result, Some(0));
}

#[test]
fn test_unknown_handler_fails_to_load() {
    let (status, _, result) = run(
        &["/usr/lib/openvpn/plugins/libovpn_handler.so", "radius"],
        Event::Up,
        &[],
    );

    assert_eq!(status, 1);
    assert_eq!(result, None);
}

#[test]
fn test_allowlist_without_config_fails_to_load() {
    let (status, _, _) = run(
        &["/usr/lib/openvpn/plugins/libovpn_handler.so", "allowlist"],
        Event::ClientConnect,
        &[],
    );

    assert_eq!(status, 1);
}

#[test]
fn test_malformed_event_env_is_error() {
    let (status, _, result) = run(
        &["/usr/lib/openvpn/plugins/libovpn_handler.so", "logger"],
        Event::Up,
        &["not-a-pair"],
    );

    assert_eq!(status, 0);
    assert_eq!(result, Some(1));
}
