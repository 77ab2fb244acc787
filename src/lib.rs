//! # carnot-qsim
//!
//! Small quantum state-vector simulator core: complex amplitudes, H/X/Z/RX/RZ
//! and CNOT applied in place, normalization, sampling with collapse,
//! single-qubit Bloch vectors and OpenQASM 2.0 export.
//!
//! ## Quick Start
//!
//! ```rust
//! use carnot_qsim::core::Simulator;
//!
//! // Bell state: (|00⟩ + |11⟩) / √2
//! let mut sim = Simulator::new(2);
//! sim.h(0).cnot(0, 1);
//!
//! let probs = sim.probabilities();
//! assert!((probs[0] - 0.5).abs() < 1e-9);
//! assert!((probs[3] - 0.5).abs() < 1e-9);
//!
//! // Either half of a Bell pair is maximally mixed
//! assert!(sim.bloch(0).magnitude < 1e-9);
//!
//! // Sampling collapses the state onto |00⟩ or |11⟩
//! let outcome = sim.sample();
//! assert!(outcome == 0 || outcome == 3);
//! ```
//!
//! Circuits are plain gate lists:
//!
//! ```rust
//! use carnot_qsim::circuit::{Circuit, Gate};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.push(Gate::H { target: 0 }).push(Gate::Cnot { control: 0, target: 1 });
//! assert_eq!(
//!     circuit.to_qasm(),
//!     "OPENQASM 2.0;\nqreg q[2];\nh q[0];\ncx q[0],q[1];"
//! );
//! ```

pub mod circuit;
pub mod config;
pub mod core;
pub mod error;
pub mod runtime;

pub use crate::circuit::{Circuit, Gate};
pub use crate::config::SimConfig;
pub use crate::core::{BlochVector, Complex, Simulator, StateVector};
pub use crate::error::{QsimError, Result};
