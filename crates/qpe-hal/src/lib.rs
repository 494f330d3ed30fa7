//! QPE Hardware Abstraction Layer
//!
//! This crate defines the boundary between the phase estimation engine and
//! whatever executes its circuits: a local simulator, a remote service or a
//! test double.
//!
//! # Overview
//!
//! - A [`Backend`] trait with a single execution operation, `run`
//! - [`Capabilities`] describing qubit count, shot limit and gate set
//! - [`ExecutionResult`] and [`Counts`] for measurement statistics
//! - [`BackendRegistry`] for creating backends by name from a
//!   [`BackendConfig`]
//!
//! # Implementing a Backend
//!
//! ```ignore
//! use qpe_hal::{Backend, Capabilities, ExecutionResult, HalResult};
//! use qpe_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         // Execute and collect counts
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod registry;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use registry::BackendRegistry;
pub use result::{Counts, ExecutionResult};
