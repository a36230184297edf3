use clap::ArgMatches;
use tracing::error;

use chatavel_core::events;

pub mod helpers;

mod completions;
mod features;
mod session;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("features", sub_matches)) => features::handle_features_command(sub_matches),
        Some(("session", sub_matches)) => session::handle_session_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    match &result {
        Ok(()) => events::log_app_shutdown(),
        Err(e) => events::log_app_error(&**e),
    }
    result
}
