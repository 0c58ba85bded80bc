use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive, e.g. `MV_LOG=debug`.
pub const LOG_ENV: &str = "MV_LOG";

/// Install a stderr log subscriber.
///
/// `MV_LOG` wins when set; otherwise `verbose` picks the level (0 warn,
/// 1 info, 2 debug, 3+ trace). Standard output is left to the programs.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .try_init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
