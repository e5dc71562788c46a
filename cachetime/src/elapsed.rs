//! Elapsed time

// Imports
use std::{
	fmt,
	time::{Duration, Instant},
};

/// Elapsed time of a sweep, with micro-second precision
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct Elapsed {
	/// Whole seconds
	secs: u64,

	/// Micro seconds (0..MICROS_PER_SEC)
	micros: u32,
}

impl Elapsed {
	/// Number of micro-seconds per second
	pub const MICROS_PER_SEC: u32 = 1_000_000;

	/// Returns the time elapsed since `start`
	#[must_use]
	pub fn since(start: Instant) -> Self {
		Self::from(start.elapsed())
	}

	/// Returns the whole seconds
	#[must_use]
	pub const fn secs(&self) -> u64 {
		self.secs
	}

	/// Returns the micro seconds past the whole seconds
	#[must_use]
	pub const fn micros(&self) -> u32 {
		self.micros
	}
}

impl From<Duration> for Elapsed {
	fn from(duration: Duration) -> Self {
		// Note: `Duration` keeps its sub-second part normalized, so
		//       the borrow between seconds and micro-seconds is already done.
		Self {
			secs:   duration.as_secs(),
			micros: duration.subsec_micros(),
		}
	}
}

impl fmt::Display for Elapsed {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Note: Micro-seconds are intentionally not zero-padded
		write!(f, "{}.{}", self.secs, self.micros)
	}
}

#[cfg(test)]
mod tests {
	use {super::Elapsed, std::time::Duration};

	#[test]
	fn borrows_from_seconds() {
		let start = Duration::new(10, 900_000_000);
		let end = Duration::new(12, 100_000_000);
		let elapsed = Elapsed::from(end - start);

		assert_eq!(elapsed.secs(), 1);
		assert_eq!(elapsed.micros(), 200_000);
		assert!(elapsed.micros() < Elapsed::MICROS_PER_SEC);
	}

	#[test]
	fn truncates_to_micros() {
		let elapsed = Elapsed::from(Duration::new(3, 1_999));
		assert_eq!((elapsed.secs(), elapsed.micros()), (3, 1));
	}

	#[test]
	fn display_does_not_pad_micros() {
		assert_eq!(Elapsed::from(Duration::new(1, 5_000)).to_string(), "1.5");
		assert_eq!(Elapsed::from(Duration::new(0, 123_456_000)).to_string(), "0.123456");
		assert_eq!(Elapsed::from(Duration::ZERO).to_string(), "0.0");
	}
}
