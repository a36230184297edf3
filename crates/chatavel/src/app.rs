use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("chatavel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Drive the Chatavel trip planner's window stack from a terminal")
        .long_about("Chatavel shows each trip-planner feature (map, chat, expenses, photos, group, plan) in its own stacked window. Windows can be minimized to a taskbar and restored later. The session command runs a headless surface so the stack can be scripted and inspected.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("features")
                .about("List the features that can be opened as windows")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("session")
                .about("Run an interactive window session over stdin")
                .long_about("Reads one command per line from stdin (or --script) and re-renders the surface and taskbar after every change. Type 'help' inside the session for the command list.")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print one JSON object per rendered state instead of text")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("script")
                        .long("script")
                        .short('s')
                        .value_name("FILE")
                        .help("Read session commands from FILE instead of stdin")
                )
                .arg(
                    Arg::new("escape-scope")
                        .long("escape-scope")
                        .help("Which windows one escape press closes (overrides config)")
                        .value_parser(["all", "topmost"])
                )
                .arg(
                    Arg::new("no-minimize")
                        .long("no-minimize")
                        .help("Hide the minimize button on windows (overrides config)")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(clap_complete::Shell))
                )
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "chatavel");
    }

    #[test]
    fn test_cli_verify() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_features_json_flag() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["chatavel", "features", "--json"]);
        assert!(matches.is_ok());

        let matches = matches.unwrap();
        let sub = matches.subcommand_matches("features").unwrap();
        assert!(sub.get_flag("json"));
    }

    #[test]
    fn test_session_args() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec![
                "chatavel",
                "session",
                "--script",
                "trip.txt",
                "--escape-scope",
                "topmost",
                "--no-minimize",
            ])
            .unwrap();
        let sub = matches.subcommand_matches("session").unwrap();
        assert_eq!(sub.get_one::<String>("script").unwrap(), "trip.txt");
        assert_eq!(sub.get_one::<String>("escape-scope").unwrap(), "topmost");
        assert!(sub.get_flag("no-minimize"));
        assert!(!sub.get_flag("json"));
    }

    #[test]
    fn test_session_rejects_unknown_escape_scope() {
        let app = build_cli();
        let matches =
            app.try_get_matches_from(vec!["chatavel", "session", "--escape-scope", "bottom"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["chatavel", "features", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_completions_requires_known_shell() {
        let app = build_cli();
        assert!(
            app.clone()
                .try_get_matches_from(vec!["chatavel", "completions", "bash"])
                .is_ok()
        );
        assert!(
            app.try_get_matches_from(vec!["chatavel", "completions", "cmd"])
                .is_err()
        );
    }
}
