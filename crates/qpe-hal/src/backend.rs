//! Backend trait and configuration.
//!
//! A backend is a pure capability boundary with one operation:
//!
//! ```text
//!   run(circuit, shots) ──→ ExecutionResult { counts, shots }
//! ```
//!
//! `run` is a single awaited call. Retries, timeouts and cancellation are
//! caller policy and deliberately absent from the trait. Implementations
//! that hold device resources MUST scope them to the call and release them
//! on every exit path, so concurrent callers never share mutable state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use qpe_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Configuration for a backend instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an optional unsigned integer from the extra map.
    ///
    /// A present value that is not a non-negative integer is a
    /// configuration error rather than silently ignored.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!(
                    "'{key}' must be a non-negative integer, got {value}"
                ))
            }),
        }
    }
}

/// Trait for backends that execute circuits and return measurement counts.
///
/// # Contract
///
/// - `capabilities()` MUST be synchronous and infallible; implementations
///   cache them at construction time.
/// - `run()` executes the circuit exactly `shots` times and returns counts
///   over the circuit's classical bits whose total equals `shots`.
/// - `run()` MUST NOT retry internally.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Execute a circuit for the given number of shots.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
