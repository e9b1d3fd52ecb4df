use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sets up logging for the `footify` binary.
///
/// Two `tracing_subscriber` layers are installed:
/// 1. A console layer writing to stderr, leaving stdout to the roster output.
/// 2. A file layer writing to `logs/footify.log`, rotated daily.
///
/// Levels come from the `RUST_LOG` environment variable. Without it,
/// everything logs at `info` and the footify crates (`footify`,
/// `footify_app`, `footify_db`) at `debug`, since the `footify` target
/// prefix covers all of them.
pub fn setup_logging() {
    let file_appender = tracing_appender::rolling::daily("logs", "footify.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_thread_ids(true)
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true);

    let default_filter = "info,footify=debug";
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // The file writer flushes until the guard drops; keep it for the process lifetime.
    std::mem::forget(guard);
}
