//! Cache-latency probe (`cachetime`)
//!
//! Measures memory-access latency as a function of working-set size, by sweeping
//! increasingly larger windows of a memory-mapped buffer with strided increments.

// Modules
pub mod buffer;
pub mod elapsed;
pub mod probe;
pub mod schedule;

// Exports
pub use self::{
	buffer::MappedBuffer,
	elapsed::Elapsed,
	probe::{Probe, ProbeConfig, Sweep},
	schedule::WorkingSets,
};
