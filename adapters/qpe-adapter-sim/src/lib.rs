//! QPE Local Statevector Simulator
//!
//! A [`Backend`](qpe_hal::Backend) that runs phase estimation circuits on an
//! exact statevector and samples the requested number of shots from it.
//!
//! # Features
//!
//! - **Single pass**: the unitary part is simulated once per run, shots are
//!   drawn from the resulting distribution
//! - **Seedable**: a fixed seed gives reproducible counts
//! - **Scoped sessions**: each run owns its random source and releases it
//!   on every exit path
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```ignore
//! use qpe_adapter_sim::SimulatorBackend;
//! use qpe_hal::Backend;
//!
//! let backend = SimulatorBackend::new().with_seed(7);
//! let result = backend.run(&circuit, 1000).await?;
//! println!("Results: {:?}", result.counts);
//! ```

mod session;
mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
