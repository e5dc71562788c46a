//! Mapped buffer

// Imports
use {
	anyhow::Context,
	memmap2::{MmapMut, MmapOptions},
	std::{fs, path::Path, ptr, slice},
};

/// Element type of the buffer
pub type Element = u32;

/// Size of each element, in bytes
pub const ELEMENT_SIZE: usize = std::mem::size_of::<Element>();

/// Distance between two consecutive accesses of a sweep, in elements (32 bytes)
pub const STRIDE: usize = 8;

/// Buffer of [`Element`]s over a memory mapping.
///
/// The buffer holds `byte_len / ELEMENT_SIZE` elements. Any trailing bytes are
/// still mapped (and zeroed), but not accessible as elements.
#[derive(Debug)]
pub struct MappedBuffer {
	/// Mapping
	mmap: MmapMut,
}

impl MappedBuffer {
	/// Maps the first `byte_len` bytes of the device at `path`, shared and read-write
	pub fn open(path: &Path, byte_len: usize) -> Result<Self, anyhow::Error> {
		anyhow::ensure!(byte_len > 0, "Buffer length must be positive");

		let file = fs::OpenOptions::new()
			.read(true)
			.write(true)
			.open(path)
			.with_context(|| format!("Memory device {path:?} doesn't exist"))?;
		tracing::debug!(?path, "Opened memory device");

		// SAFETY: The mapping is only accessed through `self`, and every bit pattern
		//         is a valid element, so outside writes to the device can't cause UB
		//         beyond changing the values we read.
		let mmap = unsafe { MmapOptions::new().len(byte_len).map_mut(&file) }
			.with_context(|| format!("Unable to map {byte_len} bytes of memory device {path:?}"))?;

		Ok(Self { mmap })
	}

	/// Maps `byte_len` bytes of private anonymous memory
	pub fn anonymous(byte_len: usize) -> Result<Self, anyhow::Error> {
		anyhow::ensure!(byte_len > 0, "Buffer length must be positive");

		let mmap = MmapMut::map_anon(byte_len).with_context(|| format!("Unable to map {byte_len} anonymous bytes"))?;
		Ok(Self { mmap })
	}

	/// Returns the number of elements
	#[must_use]
	pub fn len(&self) -> usize {
		self.mmap.len() / ELEMENT_SIZE
	}

	/// Returns if the buffer has no elements
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of mapped bytes
	#[must_use]
	pub fn byte_len(&self) -> usize {
		self.mmap.len()
	}

	/// Zeroes the whole mapping, including any trailing bytes
	pub fn zero(&mut self) {
		self.mmap.fill(0);
	}

	/// Returns the element at `idx`
	#[must_use]
	pub fn get(&self, idx: usize) -> Option<Element> {
		self.elements().get(idx).copied()
	}

	/// Increments the element at `idx`, returning the new value
	pub fn increment(&mut self, idx: usize) -> Option<Element> {
		let element = self.elements_mut().get_mut(idx)?;
		*element = element.wrapping_add(1);

		Some(*element)
	}

	/// Performs `accesses` strided increments over the first `window` elements.
	///
	/// Access `i` increments the element at `(i * STRIDE) % window`.
	///
	/// Returns `Err` if `window` is empty or larger than the buffer.
	pub fn sweep(&mut self, window: usize, accesses: usize) -> Result<(), anyhow::Error> {
		anyhow::ensure!(
			window != 0 && window <= self.len(),
			"Window of {window} elements doesn't fit in buffer of {} elements",
			self.len()
		);

		let elements = self.elements_mut();
		for i in 0..accesses {
			let idx = i.wrapping_mul(STRIDE) % window;

			// SAFETY: `idx < window <= elements.len()`.
			// Note: The accesses are volatile so none of them are elided or merged.
			unsafe {
				let element = elements.get_unchecked_mut(idx);
				ptr::write_volatile(element, ptr::read_volatile(element).wrapping_add(1));
			}
		}

		Ok(())
	}

	/// Returns the elements
	fn elements(&self) -> &[Element] {
		// SAFETY: Mappings are page-aligned, so aligned for `Element`, we only cover
		//         whole elements within the mapping and any bit pattern is a valid `Element`.
		unsafe { slice::from_raw_parts(self.mmap.as_ptr().cast::<Element>(), self.len()) }
	}

	/// Returns the elements mutably
	fn elements_mut(&mut self) -> &mut [Element] {
		let len = self.len();

		// SAFETY: See `elements`. We hold `&mut self`, so no other borrows exist.
		unsafe { slice::from_raw_parts_mut(self.mmap.as_mut_ptr().cast::<Element>(), len) }
	}
}
