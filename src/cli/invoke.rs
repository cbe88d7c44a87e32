//! Single-event handler invocation

use std::str::FromStr;

use clap::Args;
use colored::Colorize;
use ovpn_handler_core::abi::strings::parse_env;
use ovpn_handler_core::{Env, Event, HandlerRegistry, PluginError, PluginResult};
use tracing::info;

#[derive(Args)]
pub struct InvokeArgs {
    /// Registered handler name
    pub handler: String,

    /// Event name (e.g. CLIENT_CONNECT) or raw integer value
    #[arg(value_parser = parse_event, allow_negative_numbers = true)]
    pub event: i32,

    /// Argument passed to the handler constructor (repeatable)
    #[arg(long = "init-arg")]
    pub init_args: Vec<String>,

    /// Argument passed with the event (repeatable)
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Environment entry in key=value form (repeatable)
    #[arg(long = "env")]
    pub env: Vec<String>,

    /// Start from this process's environment before applying --env
    #[arg(long)]
    pub inherit_env: bool,
}

/// Accept symbolic names and raw integers, including undefined ones
fn parse_event(value: &str) -> Result<i32, String> {
    if let Ok(raw) = value.parse::<i32>() {
        return Ok(raw);
    }

    Event::from_str(value)
        .map(i32::from)
        .map_err(|_| format!("unknown event '{}'", value))
}

fn build_env(args: &InvokeArgs) -> Result<Env, PluginError> {
    let mut env = Env::new();
    if args.inherit_env {
        env.extend(std::env::vars());
    }
    env.extend(parse_env(&args.env)?);
    Ok(env)
}

/// Run one handler through its whole lifecycle
pub fn run_invoke(registry: &HandlerRegistry, args: InvokeArgs) -> Result<PluginResult, PluginError> {
    let env = build_env(&args)?;

    let mut handler = registry.build(&args.handler, args.init_args.clone(), env.clone())?;
    info!("Constructed handler '{}'", args.handler);

    let result = handler.handle(args.event, &args.args, &env);
    handler.shutdown();

    let event = Event::try_from(args.event)
        .map(|event| event.to_string())
        .unwrap_or_else(|_| args.event.to_string());
    let label = format!("{} ({})", result, i32::from(result));
    let label = match result {
        PluginResult::Success => label.green(),
        PluginResult::Error => label.red(),
        PluginResult::Deferred => label.yellow(),
    };
    println!("{} -> {}", event, label);

    Ok(result)
}
