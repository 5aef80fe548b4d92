//! Random quantum circuit generation.
//!
//! Circuits are built layer by layer. Each layer draws operations from a
//! pool of standard gates (optionally plus `reset`), shuffles the qubits and
//! hands every operation its own slice, so each qubit is touched exactly
//! once per layer. Gate angles are uniform in `[0, 2π)`.
//!
//! # Example
//!
//! ```rust
//! use randqc_gen::{RandomCircuitConfig, generate};
//!
//! let config = RandomCircuitConfig::new(3, 5).with_measure(true).with_seed(7);
//! let circuit = generate(&config).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.num_clbits(), 3);
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod pool;

pub use config::RandomCircuitConfig;
pub use error::{GenError, GenResult};
pub use generator::{generate, random_circuit};
pub use pool::{GatePool, PoolEntry};
