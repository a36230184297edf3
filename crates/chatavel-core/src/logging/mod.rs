use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted.
pub fn init_logging(quiet: bool) {
    let directive = if quiet {
        "chatavel=error"
    } else {
        "chatavel=info"
    };
    let core_directive = if quiet {
        "chatavel_core=error"
    } else {
        "chatavel_core=info"
    };

    let mut filter = EnvFilter::from_default_env();
    for d in [directive, core_directive] {
        match d.parse() {
            Ok(parsed) => filter = filter.add_directive(parsed),
            Err(e) => eprintln!("Warning: invalid log directive '{}': {}", d, e),
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}
