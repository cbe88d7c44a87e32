//! Event and result code tables

use colored::Colorize;
use ovpn_handler_core::{Event, PluginResult};
use strum::IntoEnumIterator;

pub fn run_events() {
    println!("{}", "Events".bold());
    for event in Event::iter() {
        println!("  {:>2}  {}", i32::from(event), event);
    }

    println!();
    println!("{}", "Results".bold());
    for result in PluginResult::iter() {
        println!("  {:>2}  {}", i32::from(result), result);
    }
}
