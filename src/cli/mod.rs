//! CLI command implementations
//!
//! This module contains the implementation of all harness subcommands.

pub mod events;
pub mod handlers;
pub mod invoke;
