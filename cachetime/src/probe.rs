//! Cache-latency probe

// Imports
use {
	crate::{
		buffer::{MappedBuffer, ELEMENT_SIZE},
		elapsed::Elapsed,
		schedule::WorkingSets,
	},
	anyhow::Context,
	std::{fmt, time::Instant},
};

/// Default number of accesses per sweep
pub const DEFAULT_ACCESSES: usize = 64 * 1024 * 1024;

/// Probe configuration
#[derive(Clone, Copy, Debug)]
pub struct ProbeConfig {
	/// Accesses per sweep
	pub accesses: usize,
}

impl Default for ProbeConfig {
	fn default() -> Self {
		Self {
			accesses: DEFAULT_ACCESSES,
		}
	}
}

/// Probe.
///
/// Sweeps increasingly larger windows of a buffer, timing each sweep.
#[derive(Debug)]
pub struct Probe {
	/// Buffer
	buffer: MappedBuffer,

	/// Config
	config: ProbeConfig,
}

impl Probe {
	/// Creates a new probe over `buffer`.
	///
	/// Zeroes the whole buffer.
	pub fn new(mut buffer: MappedBuffer, config: ProbeConfig) -> Self {
		buffer.zero();
		tracing::debug!(byte_len = buffer.byte_len(), "Zeroed buffer");

		Self { buffer, config }
	}

	/// Returns the buffer
	#[must_use]
	pub const fn buffer(&self) -> &MappedBuffer {
		&self.buffer
	}

	/// Runs all sweeps, calling `on_sweep` after each one.
	///
	/// Stops at the first error returned by `on_sweep`.
	pub fn run(
		&mut self,
		mut on_sweep: impl FnMut(&Sweep) -> Result<(), anyhow::Error>,
	) -> Result<Vec<Sweep>, anyhow::Error> {
		let mut sweeps = vec![];
		for window in WorkingSets::for_byte_len(self.buffer.byte_len()) {
			let start = Instant::now();
			self.buffer
				.sweep(window, self.config.accesses)
				.with_context(|| format!("Unable to sweep window of {window} elements"))?;
			let elapsed = Elapsed::since(start);

			let sweep = Sweep { window, elapsed };
			tracing::trace!(?sweep, "Finished sweep");
			on_sweep(&sweep).context("Unable to handle sweep")?;
			sweeps.push(sweep);
		}

		Ok(sweeps)
	}
}

/// Sweep
#[derive(Clone, Copy, Debug)]
pub struct Sweep {
	/// Working-set size, in elements
	pub window: usize,

	/// Elapsed time
	pub elapsed: Elapsed,
}

impl Sweep {
	/// Returns the working-set size, in bytes
	#[must_use]
	pub const fn length_bytes(&self) -> usize {
		self.window * ELEMENT_SIZE
	}
}

impl fmt::Display for Sweep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Length = {}, time = {}", self.length_bytes(), self.elapsed)
	}
}

#[cfg(test)]
mod tests {
	use {
		super::{Probe, ProbeConfig, Sweep, DEFAULT_ACCESSES},
		crate::{buffer::MappedBuffer, elapsed::Elapsed},
		std::time::Duration,
	};

	#[test]
	fn default_accesses() {
		assert_eq!(ProbeConfig::default().accesses, 67_108_864);
		assert_eq!(DEFAULT_ACCESSES, 1 << 26);
	}

	#[test]
	fn sweep_display() {
		let sweep = Sweep {
			window:  512,
			elapsed: Elapsed::from(Duration::new(2, 30_000)),
		};

		assert_eq!(sweep.length_bytes(), 2048);
		assert_eq!(sweep.to_string(), "Length = 2048, time = 2.30");
	}

	#[test]
	fn new_zeroes_buffer() {
		let mut buffer = MappedBuffer::anonymous(1024).expect("Unable to map buffer");
		buffer.increment(5).expect("Index was in bounds");

		let probe = Probe::new(buffer, ProbeConfig::default());
		assert_eq!(probe.buffer().get(5), Some(0));
	}

	#[test]
	fn runs_every_window() {
		let buffer = MappedBuffer::anonymous(2048).expect("Unable to map buffer");
		let mut probe = Probe::new(buffer, ProbeConfig { accesses: 4096 });

		let mut reported = vec![];
		let sweeps = probe
			.run(|sweep| {
				reported.push(sweep.length_bytes());
				Ok(())
			})
			.expect("Unable to run probe");

		assert_eq!(reported, [1024, 2048]);
		assert_eq!(sweeps.iter().map(Sweep::length_bytes).collect::<Vec<_>>(), reported);

		// Both sweeps touch element 0 on every 32nd and 64th access, respectively
		assert_eq!(probe.buffer().get(0), Some(4096 / 32 + 4096 / 64));
	}

	#[test]
	fn too_small_runs_nothing() {
		let buffer = MappedBuffer::anonymous(1020).expect("Unable to map buffer");
		let mut probe = Probe::new(buffer, ProbeConfig { accesses: 16 });

		let sweeps = probe
			.run(|_| panic!("No sweep should run"))
			.expect("Unable to run probe");
		assert!(sweeps.is_empty());
	}

	#[test]
	fn stops_on_handler_error() {
		let buffer = MappedBuffer::anonymous(4096).expect("Unable to map buffer");
		let mut probe = Probe::new(buffer, ProbeConfig { accesses: 16 });

		let mut calls = 0;
		let res = probe.run(|_| {
			calls += 1;
			anyhow::bail!("Output closed")
		});

		assert!(res.is_err());
		assert_eq!(calls, 1);
	}
}
