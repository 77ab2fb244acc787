//! Error types for the simulator core and its surrounding surfaces.
//!
//! The gate engine itself never returns errors: out-of-range qubit indices are
//! contract violations and are asserted. Everything that consumes external
//! data (circuit documents, config files) or runs whole circuits reports
//! failures through [`QsimError`].

use thiserror::Error;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, QsimError>;

/// Errors that can occur while simulating, importing or configuring.
#[derive(Error, Debug)]
pub enum QsimError {
    /// The state vector has no probability mass left to normalize.
    #[error("state vector has zero norm")]
    ZeroNorm,

    /// A gate references a qubit outside the register.
    #[error("qubit {qubit} out of range for a {num_qubits}-qubit register")]
    QubitOutOfRange {
        /// Offending qubit index.
        qubit: usize,
        /// Register size.
        num_qubits: usize,
    },

    /// Amplitude buffer length does not match 2^n.
    #[error("dimension mismatch: expected {expected} amplitudes, got {actual}")]
    DimensionMismatch {
        /// Expected length (2^n).
        expected: usize,
        /// Length supplied.
        actual: usize,
    },

    /// A gate is structurally valid but unusable (e.g. non-finite angle).
    #[error("invalid gate: {0}")]
    InvalidGate(String),

    /// A circuit document could not be interpreted at all.
    #[error("invalid circuit document: {0}")]
    InvalidDocument(String),

    /// Configuration value rejected by validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl QsimError {
    /// Create a qubit-out-of-range error.
    pub fn qubit_out_of_range(qubit: usize, num_qubits: usize) -> Self {
        Self::QubitOutOfRange { qubit, num_qubits }
    }

    /// Create an invalid-gate error.
    pub fn invalid_gate(msg: impl Into<String>) -> Self {
        Self::InvalidGate(msg.into())
    }

    /// Create an invalid-document error.
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
