//! Arguments

// Imports
use std::path::PathBuf;

/// Default memory device
pub const DEFAULT_DEVICE: &str = "/dev/aesonsoc-mem";

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
#[command(name = "cachetime", version, about)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Size of the region to map and test, in bytes
	pub size: usize,

	/// Memory device to map
	#[clap(long = "device", default_value = DEFAULT_DEVICE)]
	pub device: PathBuf,

	/// Map anonymous memory instead of the memory device
	#[clap(long = "anonymous", conflicts_with = "device")]
	pub anonymous: bool,

	/// Accesses per sweep
	#[clap(long = "accesses", default_value_t = cachetime::probe::DEFAULT_ACCESSES)]
	pub accesses: usize,
}
