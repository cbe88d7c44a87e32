//! The handler contract
//!
//! Every event handler the plugin can load implements [`Handler`]. The
//! plugin constructs it once when OpenVPN loads the plugin, calls
//! [`Handler::handle`] for each delivered event and [`Handler::shutdown`]
//! once when the plugin is unloaded.

use crate::error::Result;
use crate::types::{Args, Env, EventMask, PluginResult};

/// OpenVPN plugin event handler
///
/// `handle` has no default, so a type that does not provide it cannot
/// claim the capability:
///
/// ```compile_fail
/// use ovpn_handler_core::{Args, Env, Handler, Result};
///
/// struct Incomplete;
///
/// impl Handler for Incomplete {
///     fn new(_args: Args, _env: Env) -> Result<Self> {
///         Ok(Incomplete)
///     }
/// }
/// ```
///
/// `handle` borrows `self` immutably and may be called from several
/// threads, so state shared across calls needs its own synchronisation.
pub trait Handler: Send + Sync {
    /// Build the handler from the plugin arguments and the environment
    /// OpenVPN passed at load time.
    fn new(args: Args, env: Env) -> Result<Self>
    where
        Self: Sized;

    /// Handle one callback.
    ///
    /// `event` is the raw value from the host and is not validated; use
    /// [`Event::try_from`](crate::Event) to interpret it. Failures are
    /// reported by returning [`PluginResult::Error`].
    fn handle(&self, event: i32, args: &[String], env: &Env) -> PluginResult;

    /// Release resources before the plugin is unloaded.
    fn shutdown(&mut self) {}

    /// Events the host should deliver to this handler.
    fn event_mask(&self) -> EventMask {
        EventMask::all()
    }
}
