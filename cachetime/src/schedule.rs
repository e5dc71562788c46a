//! Working-set schedule
//!
//! The working set starts at [`INITIAL_WINDOW`] elements and doubles, except between
//! [`FINE_START`] and [`FINE_END`], where it grows linearly by [`FINE_STEP`] to localize
//! where the cache stops fitting the working set.

// Imports
use crate::buffer::ELEMENT_SIZE;

/// Initial working-set size, in elements (1 KiB)
pub const INITIAL_WINDOW: usize = 256;

/// Start of the linear region, in elements (128 KiB)
pub const FINE_START: usize = 128 * 1024 / ELEMENT_SIZE;

/// End of the linear region, in elements (2 MiB)
pub const FINE_END: usize = 2 * 1024 * 1024 / ELEMENT_SIZE;

/// Step inside the linear region, in elements (128 KiB)
pub const FINE_STEP: usize = 128 * 1024 / ELEMENT_SIZE;

/// Returns the working-set size after `window`.
///
/// Returns `None` if it would overflow.
#[must_use]
pub const fn next_window(window: usize) -> Option<usize> {
	if window < FINE_START || window >= FINE_END {
		window.checked_mul(2)
	} else {
		window.checked_add(FINE_STEP)
	}
}

/// Iterator over all working-set sizes, in elements, that fit in a buffer
#[derive(Clone, Debug)]
pub struct WorkingSets {
	/// Next working-set size
	next: Option<usize>,

	/// Maximum working-set size (inclusive)
	max: usize,
}

impl WorkingSets {
	/// Creates the schedule for a buffer of `max` elements
	#[must_use]
	pub const fn new(max: usize) -> Self {
		Self {
			next: Some(INITIAL_WINDOW),
			max,
		}
	}

	/// Creates the schedule for a buffer of `byte_len` bytes
	#[must_use]
	pub const fn for_byte_len(byte_len: usize) -> Self {
		Self::new(byte_len / ELEMENT_SIZE)
	}
}

impl Iterator for WorkingSets {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		let window = self.next.filter(|&window| window <= self.max)?;
		self.next = next_window(window);

		Some(window)
	}
}

impl std::iter::FusedIterator for WorkingSets {}
