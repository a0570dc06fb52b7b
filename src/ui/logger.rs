use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr logger.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, raised to
/// `info` for step timings and to `debug` with `--verbose`.
pub fn init_cli_logger(verbose: bool, timings: bool) {
  let default_level = if verbose {
    "debug"
  } else if timings {
    "info"
  } else {
    "warn"
  };

  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("mvn_changes={}", default_level)));

  tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact(),
    )
    .init();
}
