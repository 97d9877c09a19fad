//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core services as `Arc<CoreConfig>`. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::error::{PatientError, PatientResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    id_seed: Option<u64>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `id_seed` selects the identifier source: `None` uses the secure
    /// OS-backed generator, `Some(seed)` the deterministic one (intended for
    /// reproducible runs and tests).
    pub fn new(id_seed: Option<u64>) -> Self {
        Self { id_seed }
    }

    pub fn id_seed(&self) -> Option<u64> {
        self.id_seed
    }
}

/// Parse the identifier seed from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, no seed is configured and the
/// secure generator is used.
///
/// # Errors
///
/// Returns [`PatientError::InvalidInput`] if the value is present but not a
/// valid unsigned integer.
pub fn id_seed_from_env_value(value: Option<String>) -> PatientResult<Option<u64>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    value
        .map(|v| {
            v.parse::<u64>().map_err(|_| {
                PatientError::InvalidInput(format!(
                    "identifier seed must be an unsigned integer, got: '{}'",
                    v
                ))
            })
        })
        .transpose()
}
