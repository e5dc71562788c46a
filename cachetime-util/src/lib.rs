//! Utilities shared by the `cachetime` crates

// Modules
pub mod logger;
