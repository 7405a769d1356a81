use crate::prelude::Result;
use tracing::subscriber::set_global_default;
use tracing::{Level, Subscriber};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

/// Composes a tracing subscriber for the command-line tools.
///
/// The result record of a command is written to stdout, so the sink is
/// expected to be something else, usually `std::io::stderr`.
///
/// # Arguments
///
/// * `max_level`: Default maximum level of logs if the `RUST_LOG`
///   environment variable is not set.
/// * `sink`: Destination where logs will be written to.
///
pub fn get_subscriber<Sink>(max_level: Level, sink: Sink) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Sync + Send + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_error| EnvFilter::new(max_level.as_str()));

    // Compact logs in debug builds, JSON logs in release builds.
    #[cfg(debug_assertions)]
    let subscriber_builder = tracing_subscriber::fmt().compact();
    #[cfg(not(debug_assertions))]
    let subscriber_builder = tracing_subscriber::fmt().json().with_current_span(true);

    subscriber_builder
        .with_env_filter(env_filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(false)
        .with_writer(sink)
        .finish()
}

/// Maps the number of `-v` flags to a default log level.
///
pub fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Register a subscriber as global default to process span data.
///
/// # Warning
///
/// This function should only be called **once** in the application's lifetime.
///
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> Result<()> {
    // Old loggers support.
    LogTracer::init()?;

    set_global_default(subscriber)?;
    Ok(())
}
