//! Messages emitted before the logger is initialized

// Imports
use std::sync::{Mutex, PoisonError};

/// Queued messages
static MESSAGES: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Queues a debug message until the logger is initialized
pub fn debug(message: impl Into<String>) {
	MESSAGES
		.lock()
		.unwrap_or_else(PoisonError::into_inner)
		.push(message.into());
}

/// Takes all queued messages
pub(super) fn take() -> Vec<String> {
	std::mem::take(&mut *MESSAGES.lock().unwrap_or_else(PoisonError::into_inner))
}
