//! Logger

// Modules
pub mod pre_init;

// Imports
use {
	std::{fs, path::Path, sync::Mutex},
	tracing::metadata::LevelFilter,
	tracing_subscriber::{prelude::*, EnvFilter},
};

/// Environment variable used to filter the stderr output
pub const ENV_STDERR: &str = "RUST_LOG";

/// Environment variable used to filter the log file output
pub const ENV_FILE: &str = "RUST_LOG_FILE";

/// Initializes the global logger.
///
/// Logs to stderr, filtered by [`ENV_STDERR`] (`info` by default), and,
/// if `log_file` is given, to that file, filtered by [`ENV_FILE`] (`debug` by default).
///
/// Any messages queued through [`pre_init`] are emitted right after the logger is installed.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let stderr_layer = tracing_subscriber::fmt::layer()
		.with_writer(std::io::stderr)
		.with_filter(self::env_filter(ENV_STDERR, LevelFilter::INFO));

	// Note: We can't log the error yet, so we keep it until after the logger is up.
	let (file_layer, file_err) = match log_file.map(|path| self::open_log_file(path, log_file_append)) {
		Some(Ok(file)) => {
			let layer = tracing_subscriber::fmt::layer()
				.with_ansi(false)
				.with_writer(Mutex::new(file))
				.with_filter(self::env_filter(ENV_FILE, LevelFilter::DEBUG));
			(Some(layer), None)
		},
		Some(Err(err)) => (None, Some(err)),
		None => (None, None),
	};

	if let Err(err) = tracing_subscriber::registry()
		.with(stderr_layer)
		.with(file_layer)
		.try_init()
	{
		eprintln!("Unable to initialize logger: {err}");
		return;
	}

	if let (Some(path), Some(err)) = (log_file, file_err) {
		tracing::warn!("Unable to open log file {path:?}: {err}");
	}

	for message in pre_init::take() {
		tracing::debug!("{message}");
	}
}

/// Creates the filter for `env_var`, defaulting to `default` for anything it doesn't cover
fn env_filter(env_var: &str, default: LevelFilter) -> EnvFilter {
	EnvFilter::builder()
		.with_default_directive(default.into())
		.with_env_var(env_var)
		.from_env_lossy()
}

/// Opens the log file, either truncating or appending to it
fn open_log_file(path: &Path, append: bool) -> Result<fs::File, std::io::Error> {
	let mut options = fs::File::options();
	options.create(true);
	if append {
		options.append(true);
	} else {
		options.write(true).truncate(true);
	}

	options.open(path)
}
