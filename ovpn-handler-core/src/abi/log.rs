//! Logging into the OpenVPN host
//!
//! Inside the host, tracing events are forwarded to the `plugin_log`
//! callback so they land in the OpenVPN log with the rest of the server
//! output, filtered by the server's `verb` setting.

use std::ffi::{CStr, CString};
use std::fmt::{self, Write as _};
use std::os::raw::c_int;

use tracing::field::{Field, Visit};
use tracing::{Dispatch, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use super::{Callbacks, PluginLogFn, PLOG_DEBUG, PLOG_ERR, PLOG_NOTE, PLOG_WARN};

/// Name the host prefixes our log lines with
pub const PLUGIN_NAME: &CStr = c"ovpn-handler";

const FORMAT: &CStr = c"%s";

/// Tracing layer writing every event through the host's `plugin_log`
pub struct HostLogLayer {
    log: PluginLogFn,
}

impl HostLogLayer {
    pub fn new(log: PluginLogFn) -> Self {
        Self { log }
    }
}

impl<S: Subscriber> Layer<S> for HostLogLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let flags = level_flags(event.metadata().level());
        let message = host_message(&format_event(event));

        // SAFETY: the host keeps `plugin_log` valid while the plugin is
        // loaded, and all three strings are NUL-terminated.
        unsafe { (self.log)(flags, PLUGIN_NAME.as_ptr(), FORMAT.as_ptr(), message.as_ptr()) };
    }
}

/// `plugin_log` flags for a tracing level
pub fn level_flags(level: &Level) -> c_int {
    match *level {
        Level::ERROR => PLOG_ERR,
        Level::WARN => PLOG_WARN,
        Level::INFO => PLOG_NOTE,
        _ => PLOG_DEBUG,
    }
}

/// Text of an event as the host logs it: the message, then ` key=value`
/// for every other field
pub fn format_event(event: &tracing::Event<'_>) -> String {
    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);
    visitor.finish()
}

/// Escape interior NUL bytes so the whole message reaches the host
pub fn host_message(message: &str) -> CString {
    CString::new(message.replace('\0', "\\0")).unwrap_or_default()
}

/// Collects the `message` field followed by ` key=value` pairs
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        self.message + &self.fields
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Dispatch for code running inside the host
///
/// Logs through `plugin_log` when the host provides it, to stderr
/// otherwise.
///
/// # Safety
///
/// `callbacks` must be null or point to a valid `openvpn_plugin_callbacks`
/// that outlives the returned dispatch.
pub unsafe fn host_dispatch(callbacks: *const Callbacks) -> Dispatch {
    match callbacks.as_ref().and_then(|callbacks| callbacks.plugin_log) {
        Some(log) => Dispatch::new(
            tracing_subscriber::registry()
                .with(HostLogLayer::new(log))
                .with(LevelFilter::DEBUG),
        ),
        None => stderr_dispatch(),
    }
}

/// Dispatch writing formatted events to stderr
pub fn stderr_dispatch() -> Dispatch {
    Dispatch::new(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(LevelFilter::INFO),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::{info, warn};

    use super::*;

    /// Keeps the host text of every event
    #[derive(Clone, Default)]
    struct Recorder {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl<S: Subscriber> Layer<S> for Recorder {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.lines.lock().unwrap().push(format_event(event));
        }
    }

    fn record(emit: impl FnOnce()) -> Vec<String> {
        let recorder = Recorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        tracing::subscriber::with_default(subscriber, emit);
        let lines = recorder.lines.lock().unwrap().clone();
        lines
    }

    #[test]
    fn test_message_is_followed_by_fields() {
        let lines = record(|| info!(user = "alice", "Allowed"));
        assert_eq!(lines, vec!["Allowed user=alice".to_string()]);
    }

    #[test]
    fn test_debug_fields_keep_debug_form() {
        let lines = record(|| {
            warn!(attempts = ?vec![1, 2], code = 6, "Denied {}", "bob");
        });
        assert_eq!(lines, vec!["Denied bob attempts=[1, 2] code=6".to_string()]);
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_flags(&Level::ERROR), PLOG_ERR);
        assert_eq!(level_flags(&Level::WARN), PLOG_WARN);
        assert_eq!(level_flags(&Level::INFO), PLOG_NOTE);
        assert_eq!(level_flags(&Level::DEBUG), PLOG_DEBUG);
        assert_eq!(level_flags(&Level::TRACE), PLOG_DEBUG);
    }

    #[test]
    fn test_interior_nul_is_escaped() {
        let message = host_message("bad\0name");
        assert_eq!(message.to_str().unwrap(), "bad\\0name");
    }
}
