//! Cache-latency probe (`cachetime`)

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	cachetime::{MappedBuffer, Probe, ProbeConfig},
	cachetime_util::logger,
	clap::{error::ErrorKind, Parser},
	std::{
		io::{self, Write},
		process::ExitCode,
	},
};

/// Exit code for all failures
const FAILURE_EXIT_CODE: u8 = 255;

fn main() -> ExitCode {
	// Get arguments
	// Note: Usage errors go to stdout and exit with the same code as any other failure
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
		Err(err) => {
			print!("{}", err.render());
			return ExitCode::from(FAILURE_EXIT_CODE);
		},
	};
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	match self::run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::error!("{err:?}");
			println!("{err:#}");
			ExitCode::from(FAILURE_EXIT_CODE)
		},
	}
}

/// Maps the buffer and runs the probe, printing each sweep
fn run(args: &Args) -> Result<(), anyhow::Error> {
	let buffer = if args.anonymous {
		MappedBuffer::anonymous(args.size).context("Unable to create anonymous buffer")?
	} else {
		MappedBuffer::open(&args.device, args.size).context("Unable to create device buffer")?
	};
	tracing::info!(size = args.size, elements = buffer.len(), "Mapped buffer");

	let mut probe = Probe::new(buffer, ProbeConfig {
		accesses: args.accesses,
	});

	let mut stdout = io::stdout().lock();
	let sweeps = probe
		.run(|sweep| writeln!(stdout, "{sweep}").context("Unable to write to stdout"))
		.context("Unable to run probe")?;
	tracing::info!(sweeps = sweeps.len(), "Finished");

	Ok(())
}
