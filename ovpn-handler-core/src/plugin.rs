//! OpenVPN plugin v3 entry points
//!
//! OpenVPN loads the plugin with
//! `plugin /path/to/plugin.so <handler> [handler args...]`, builds the named
//! handler once, forwards every callback to it and shuts it down on unload.
//!
//! [`PluginContext`] holds the pointer-free logic; [`open_v3`], [`func_v3`]
//! and [`close_v1`] translate the C structures, and [`export_plugin!`]
//! emits the symbols the host looks up.
//!
//! [`export_plugin!`]: crate::export_plugin

use std::os::raw::{c_int, c_void};
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info, warn, Dispatch};

use crate::abi::log::host_dispatch;
use crate::abi::strings::{c_string_array, parse_env};
use crate::abi::{FuncArgs, OpenArgs, OpenReturn, OPENVPN_PLUGINV3_STRUCTVER};
use crate::error::{AbiError, HandlerError, Result};
use crate::handler::Handler;
use crate::registry::HandlerRegistry;
use crate::types::{Event, PluginResult};

/// argv index of the handler name at load time; index 0 is the plugin path
pub const ARG_IDX_HANDLER: usize = 1;
/// Minimum argv length at load time
pub const ARG_COUNT: usize = 2;

/// A loaded handler and the log dispatch it runs under
pub struct PluginContext {
    name: String,
    handler: Box<dyn Handler>,
    dispatch: Dispatch,
}

impl PluginContext {
    /// Build the handler named by `argv[1]`
    ///
    /// The handler receives `argv[2..]` and the parsed `envp`.
    pub fn open(
        structver: i32,
        argv: Vec<String>,
        envp: Vec<String>,
        registry: &HandlerRegistry,
        dispatch: Dispatch,
    ) -> Result<Self> {
        if structver != OPENVPN_PLUGINV3_STRUCTVER {
            return Err(AbiError::IncompatibleInterface {
                found: structver,
                expected: OPENVPN_PLUGINV3_STRUCTVER,
            }
            .into());
        }

        if argv.len() < ARG_COUNT {
            return Err(AbiError::TooFewArguments {
                found: argv.len(),
                expected: ARG_COUNT,
            }
            .into());
        }

        let name = argv[ARG_IDX_HANDLER].clone();
        let args = argv[ARG_COUNT..].to_vec();
        let env = parse_env(envp)?;

        let handler = panic::catch_unwind(AssertUnwindSafe(|| registry.build(&name, args, env)))
            .map_err(|_| HandlerError::Panicked {
                name: name.clone(),
                operation: "construction",
            })??;

        let events: Vec<String> = handler
            .event_mask()
            .events()
            .map(|event| event.to_string())
            .collect();
        info!("Handler '{}' subscribed to {}", name, events.join(", "));

        Ok(Self {
            name,
            handler,
            dispatch,
        })
    }

    pub fn handler_name(&self) -> &str {
        &self.name
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// `type_mask` to report back to the host
    pub fn type_mask(&self) -> i32 {
        self.handler.event_mask().bits()
    }

    /// Forward one callback to the handler
    ///
    /// `argv[0]` is the plugin path and is not passed on. A malformed
    /// environment or a panicking handler yields `PluginResult::Error`.
    pub fn call(&self, event: i32, argv: Vec<String>, envp: Vec<String>) -> PluginResult {
        let env = match parse_env(envp) {
            Ok(env) => env,
            Err(e) => {
                error!("Failed to convert environment: {}", e);
                return PluginResult::Error;
            }
        };
        let args: Vec<String> = argv.into_iter().skip(1).collect();

        match Event::try_from(event) {
            Ok(known) => debug!("Dispatching {} to '{}'", known, self.name),
            Err(e) => warn!("{}, dispatching to '{}' anyway", e, self.name),
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.handler.handle(event, &args, &env))) {
            Ok(result) => {
                debug!("Call result: {}", i32::from(result));
                result
            }
            Err(_) => {
                error!(
                    "{}",
                    HandlerError::Panicked {
                        name: self.name.clone(),
                        operation: "handle",
                    }
                );
                PluginResult::Error
            }
        }
    }

    /// Shut the handler down and drop it
    pub fn close(mut self) {
        let handler = &mut self.handler;
        if panic::catch_unwind(AssertUnwindSafe(|| handler.shutdown())).is_err() {
            error!(
                "{}",
                HandlerError::Panicked {
                    name: self.name.clone(),
                    operation: "shutdown",
                }
            );
        }
    }
}

/// Body of `openvpn_plugin_open_v3`
///
/// # Safety
///
/// `args` and `ret` must be null or point to the structures the host
/// passes to `openvpn_plugin_open_v3`.
pub unsafe fn open_v3<F>(
    structver: c_int,
    args: *const OpenArgs,
    ret: *mut OpenReturn,
    registry: F,
) -> c_int
where
    F: FnOnce() -> HandlerRegistry,
{
    let (Some(args), Some(ret)) = (args.as_ref(), ret.as_mut()) else {
        return PluginResult::Error.into();
    };

    let dispatch = host_dispatch(args.callbacks);
    let argv = c_string_array(args.argv);
    let envp = c_string_array(args.envp);

    tracing::dispatcher::with_default(&dispatch, || {
        match PluginContext::open(structver, argv, envp, &registry(), dispatch.clone()) {
            Ok(context) => {
                ret.type_mask = context.type_mask();
                ret.handle = Box::into_raw(Box::new(context)).cast::<c_void>();
                info!("Loaded");
                c_int::from(PluginResult::Success)
            }
            Err(e) => {
                error!("{}", e);
                c_int::from(PluginResult::Error)
            }
        }
    })
}

/// Body of `openvpn_plugin_func_v3`
///
/// # Safety
///
/// `args` must be null or point to the structure the host passes to
/// `openvpn_plugin_func_v3`, whose `handle` came from [`open_v3`].
pub unsafe fn func_v3(args: *const FuncArgs) -> c_int {
    let Some(args) = args.as_ref() else {
        return PluginResult::Error.into();
    };
    let Some(context) = args.handle.cast::<PluginContext>().as_ref() else {
        return PluginResult::Error.into();
    };

    let argv = c_string_array(args.argv);
    let envp = c_string_array(args.envp);

    tracing::dispatcher::with_default(&context.dispatch, || {
        context.call(args.event_type, argv, envp)
    })
    .into()
}

/// Body of `openvpn_plugin_close_v1`
///
/// # Safety
///
/// `handle` must be null or a handle returned by [`open_v3`] that has
/// not been closed yet.
pub unsafe fn close_v1(handle: *mut c_void) {
    if handle.is_null() {
        return;
    }

    let context = Box::from_raw(handle.cast::<PluginContext>());
    let dispatch = context.dispatch.clone();

    tracing::dispatcher::with_default(&dispatch, || {
        (*context).close();
        info!("Unloaded");
    });
}

/// Export the OpenVPN plugin v3 symbols for a `cdylib`
///
/// The expression is evaluated once per plugin load and must yield the
/// [`HandlerRegistry`](crate::HandlerRegistry) to pick handlers from.
///
/// ```ignore
/// ovpn_handler_core::export_plugin!(
///     ovpn_handler_core::HandlerRegistry::new().with::<MyHandler>("mine")
/// );
/// ```
#[macro_export]
macro_rules! export_plugin {
    ($registry:expr) => {
        /// # Safety
        ///
        /// Called by the OpenVPN host.
        #[no_mangle]
        pub unsafe extern "C" fn openvpn_plugin_open_v3(
            v3structver: ::std::os::raw::c_int,
            args: *const $crate::abi::OpenArgs,
            ret: *mut $crate::abi::OpenReturn,
        ) -> ::std::os::raw::c_int {
            $crate::plugin::open_v3(v3structver, args, ret, || $registry)
        }

        /// # Safety
        ///
        /// Called by the OpenVPN host.
        #[no_mangle]
        pub unsafe extern "C" fn openvpn_plugin_func_v3(
            _version: ::std::os::raw::c_int,
            args: *const $crate::abi::FuncArgs,
            _ret: *mut $crate::abi::FuncReturn,
        ) -> ::std::os::raw::c_int {
            $crate::plugin::func_v3(args)
        }

        /// # Safety
        ///
        /// Called by the OpenVPN host.
        #[no_mangle]
        pub unsafe extern "C" fn openvpn_plugin_close_v1(handle: *mut ::std::os::raw::c_void) {
            $crate::plugin::close_v1(handle)
        }
    };
}
