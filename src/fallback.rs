use anyhow::Result;
use tracing::{debug, warn};

/// A signal value plus the source that produced it. `source` is `None` when
/// the value is the signal's fixed default (absent or failed data).
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub source: Option<String>,
}

impl<T> Fetched<T> {
    pub fn real(value: T, source: String) -> Self {
        Self {
            value,
            source: Some(source),
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            source: None,
        }
    }
}

/// Uniform fetch-or-default wrapper used by every signal adapter.
///
/// `fetch` returns `Ok(Some((value, source)))` for real data, `Ok(None)`
/// when the collaborator legitimately has nothing, and `Err` on any
/// collaborator failure. Timeouts surface here as errors from the external
/// fetch layer and are treated identically. The caller always gets a value;
/// nothing propagates.
pub fn with_fallback<T>(
    signal: &'static str,
    default: T,
    fetch: impl FnOnce() -> Result<Option<(T, String)>>,
) -> Fetched<T> {
    match fetch() {
        Ok(Some((value, source))) => Fetched::real(value, source),
        Ok(None) => {
            debug!(signal, "no data available, using default");
            Fetched::fallback(default)
        }
        Err(err) => {
            warn!(signal, error = %err, "signal degraded, using default");
            Fetched::fallback(default)
        }
    }
}
