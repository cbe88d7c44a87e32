//! ovpn-handler - handler harness
//!
//! Exercises the built-in handlers outside of OpenVPN: lists the event
//! and result codes, and runs one handler through construct, handle and
//! shutdown with arguments and environment given on the command line.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use ovpn_handler_core::init_logging;

mod cli;

/// Exit code for failures before the handler produced a result
const EXIT_INVOCATION_ERROR: i32 = 3;

#[derive(Parser)]
#[command(name = "ovpn-handler")]
#[command(about = "Run OpenVPN plugin handlers outside of OpenVPN")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the event and result codes of the plugin ABI
    Events,
    /// List the built-in handlers
    Handlers,
    /// Construct a handler, deliver one event and shut it down
    Invoke(cli::invoke::InvokeArgs),
}

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(EXIT_INVOCATION_ERROR);
    }

    // Usage errors must not exit 2, which reads as Deferred
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if is_informational(&e) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(EXIT_INVOCATION_ERROR);
        }
    };
    let registry = ovpn_handler::registry();

    let result = match cli.command {
        Commands::Events => {
            cli::events::run_events();
            Ok(0)
        }
        Commands::Handlers => {
            cli::handlers::run_handlers(&registry);
            Ok(0)
        }
        // The exit code is the result the host would have received
        Commands::Invoke(args) => cli::invoke::run_invoke(&registry, args).map(i32::from),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_INVOCATION_ERROR);
        }
    }
}

/// Help and version output, which clap reports as errors
fn is_informational(error: &clap::Error) -> bool {
    matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ovpn-handler").chain(args.iter().copied()))
    }

    #[test]
    fn test_mistyped_event_is_usage_error() {
        let error = parse(&["invoke", "logger", "CLIENT_CRRESPONSE"])
            .err()
            .unwrap();

        assert_eq!(error.kind(), ErrorKind::ValueValidation);
        assert!(!is_informational(&error));
    }

    #[test]
    fn test_help_is_informational() {
        let error = parse(&["--help"]).err().unwrap();
        assert!(is_informational(&error));
    }

    #[test]
    fn test_missing_subcommand_is_usage_error() {
        let error = parse(&[]).err().unwrap();
        assert!(!is_informational(&error));
    }

    #[test]
    fn test_negative_event_value_needs_no_separator() {
        let cli = parse(&["invoke", "logger", "-1", "--env", "common_name=alice"]).unwrap();

        match cli.command {
            Commands::Invoke(args) => {
                assert_eq!(args.event, -1);
                assert_eq!(args.env, vec!["common_name=alice".to_string()]);
            }
            _ => panic!("expected the invoke command"),
        }
    }
}
