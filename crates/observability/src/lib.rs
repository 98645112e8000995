//! Process-wide tracing setup shared by the binaries.

/// Initialize structured logging for the process.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init() {
    tracing::init();
}

/// Subscriber construction (filters, JSON formatting).
pub mod tracing;
