//! Event and result codes of the OpenVPN plugin ABI
//!
//! The integer values here cross the process boundary to the OpenVPN
//! host and must match `openvpn-plugin.h` exactly. Never reorder or
//! renumber them.

use std::collections::HashMap;

use bitflags::bitflags;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::InvalidEnumValue;

/// Positional arguments passed by the host
pub type Args = Vec<String>;

/// Environment snapshot passed by the host, one entry per `key=value`
pub type Env = HashMap<String, String>;

/// Lifecycle moment of the VPN server or of a client session that
/// triggered a plugin callback (`OPENVPN_PLUGIN_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
#[repr(i32)]
pub enum Event {
    #[strum(serialize = "UP")]
    Up = 0,
    #[strum(serialize = "DOWN")]
    Down = 1,
    #[strum(serialize = "ROUTE_UP")]
    RouteUp = 2,
    #[strum(serialize = "IPCHANGE")]
    IpChange = 3,
    #[strum(serialize = "TLS_VERIFY")]
    TlsVerify = 4,
    #[strum(serialize = "AUTH_USER_PASS_VERIFY")]
    AuthUserPassVerify = 5,
    #[strum(serialize = "CLIENT_CONNECT")]
    ClientConnect = 6,
    #[strum(serialize = "CLIENT_DISCONNECT")]
    ClientDisconnect = 7,
    #[strum(serialize = "LEARN_ADDRESS")]
    LearnAddress = 8,
    #[strum(serialize = "CLIENT_CONNECT_V2")]
    ClientConnectV2 = 9,
    #[strum(serialize = "TLS_FINAL")]
    TlsFinal = 10,
    #[strum(serialize = "ENABLE_PF")]
    EnablePf = 11,
    #[strum(serialize = "ROUTE_PREDOWN")]
    RoutePredown = 12,
}

impl From<Event> for i32 {
    fn from(event: Event) -> Self {
        event as i32
    }
}

impl TryFrom<i32> for Event {
    type Error = InvalidEnumValue;

    fn try_from(value: i32) -> Result<Self, InvalidEnumValue> {
        Event::iter()
            .find(|event| i32::from(*event) == value)
            .ok_or(InvalidEnumValue::Event(value))
    }
}

/// Outcome of a handler call (`OPENVPN_PLUGIN_FUNC_*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
#[repr(i32)]
pub enum PluginResult {
    #[strum(serialize = "SUCCESS")]
    Success = 0,
    #[strum(serialize = "ERROR")]
    Error = 1,
    /// The decision is postponed and will be delivered to the host
    /// asynchronously, outside of this call.
    #[strum(serialize = "DEFERRED")]
    Deferred = 2,
}

impl From<PluginResult> for i32 {
    fn from(result: PluginResult) -> Self {
        result as i32
    }
}

impl TryFrom<i32> for PluginResult {
    type Error = InvalidEnumValue;

    fn try_from(value: i32) -> Result<Self, InvalidEnumValue> {
        PluginResult::iter()
            .find(|result| i32::from(*result) == value)
            .ok_or(InvalidEnumValue::Result(value))
    }
}

bitflags! {
    /// Set of events a handler wants delivered, laid out like
    /// `OPENVPN_PLUGIN_MASK(event)`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventMask: i32 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const ROUTE_UP = 1 << 2;
        const IPCHANGE = 1 << 3;
        const TLS_VERIFY = 1 << 4;
        const AUTH_USER_PASS_VERIFY = 1 << 5;
        const CLIENT_CONNECT = 1 << 6;
        const CLIENT_DISCONNECT = 1 << 7;
        const LEARN_ADDRESS = 1 << 8;
        const CLIENT_CONNECT_V2 = 1 << 9;
        const TLS_FINAL = 1 << 10;
        const ENABLE_PF = 1 << 11;
        const ROUTE_PREDOWN = 1 << 12;
    }
}

impl From<Event> for EventMask {
    fn from(event: Event) -> Self {
        EventMask::from_bits_retain(1 << i32::from(event))
    }
}

impl EventMask {
    /// Whether `event` is part of the mask
    pub fn contains_event(&self, event: Event) -> bool {
        self.contains(EventMask::from(event))
    }

    /// Members of the mask, in value order
    pub fn events(self) -> impl Iterator<Item = Event> {
        Event::iter().filter(move |event| self.contains_event(*event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_bits_follow_event_values() {
        for event in Event::iter() {
            assert_eq!(EventMask::from(event).bits(), 1 << (event as i32));
        }
        assert_eq!(EventMask::all().bits(), 0x1fff);
    }
}
