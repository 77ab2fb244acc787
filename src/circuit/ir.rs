/// Circuit representation.
///
/// A circuit is an ordered gate list over a fixed qubit count. Gates are a
/// closed enum with the fields each variant needs, so a CNOT always has both
/// qubits and a rotation always has an angle. The serde shape matches the
/// editor's circuit entries: `{"type": "RX", "target": 0, "theta": 1.57}`.
use crate::core::gates::{self, Matrix2x2};
use crate::error::{QsimError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Gate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Gate {
    H { target: usize },
    X { target: usize },
    Z { target: usize },
    #[serde(rename = "RX")]
    Rx { target: usize, theta: f64 },
    #[serde(rename = "RZ")]
    Rz { target: usize, theta: f64 },
    #[serde(rename = "CNOT")]
    Cnot { control: usize, target: usize },
    /// Annotation only; measurement happens by sampling the simulated state.
    #[serde(rename = "MEASURE")]
    Measure,
}

impl Gate {
    /// Upper-case name used in documents and diagnostics.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::H { .. } => "H",
            Self::X { .. } => "X",
            Self::Z { .. } => "Z",
            Self::Rx { .. } => "RX",
            Self::Rz { .. } => "RZ",
            Self::Cnot { .. } => "CNOT",
            Self::Measure => "MEASURE",
        }
    }

    /// True for everything except the `Measure` marker.
    pub fn is_unitary(&self) -> bool {
        !matches!(self, Self::Measure)
    }

    /// Target qubit, if the gate has one.
    pub fn target(&self) -> Option<usize> {
        match *self {
            Self::H { target }
            | Self::X { target }
            | Self::Z { target }
            | Self::Rx { target, .. }
            | Self::Rz { target, .. }
            | Self::Cnot { target, .. } => Some(target),
            Self::Measure => None,
        }
    }

    /// All qubit indices referenced, control first for CNOT.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Self::Cnot { control, target } => vec![control, target],
            _ => self.target().into_iter().collect(),
        }
    }

    /// The 2×2 matrix of a single-qubit gate; `None` for CNOT and Measure.
    pub fn matrix(&self) -> Option<Matrix2x2> {
        match *self {
            Self::H { .. } => Some(gates::HADAMARD),
            Self::X { .. } => Some(gates::PAULI_X),
            Self::Z { .. } => Some(gates::PAULI_Z),
            Self::Rx { theta, .. } => Some(gates::rx(theta)),
            Self::Rz { theta, .. } => Some(gates::rz(theta)),
            Self::Cnot { .. } | Self::Measure => None,
        }
    }

    /// Check indices against a register of `num_qubits` and angles for finiteness.
    ///
    /// A CNOT whose control equals its target passes: it runs as a no-op.
    pub fn validate(&self, num_qubits: usize) -> Result<()> {
        for q in self.qubits() {
            if q >= num_qubits {
                return Err(QsimError::qubit_out_of_range(q, num_qubits));
            }
        }
        match *self {
            Self::Rx { theta, .. } | Self::Rz { theta, .. } if !theta.is_finite() => Err(
                QsimError::invalid_gate(format!("{} angle {theta} is not finite", self.mnemonic())),
            ),
            _ => Ok(()),
        }
    }
}

/// Short timeline form, e.g. `RX(1.571) q0` or `CNOT q0→q1`.
impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H { target } | Self::X { target } | Self::Z { target } => {
                write!(f, "{} q{target}", self.mnemonic())
            }
            Self::Rx { target, theta } | Self::Rz { target, theta } => {
                write!(f, "{}({theta:.3}) q{target}", self.mnemonic())
            }
            Self::Cnot { control, target } => write!(f, "CNOT q{control}→q{target}"),
            Self::Measure => write!(f, "MEASURE"),
        }
    }
}

// ── Circuit ───────────────────────────────────────────────────────────────

/// An ordered gate list over `qubits` qubits, owned by one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    pub qubits: usize,
    pub gates: Vec<Gate>,
}

impl Circuit {
    pub fn new(qubits: usize) -> Self {
        Self::with_gates(qubits, Vec::new())
    }

    pub fn with_gates(qubits: usize, gates: Vec<Gate>) -> Self {
        Self { qubits, gates }
    }

    pub fn push(&mut self, gate: Gate) -> &mut Self {
        self.gates.push(gate);
        self
    }

    /// Remove and return the gate at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Gate> {
        (index < self.gates.len()).then(|| self.gates.remove(index))
    }

    /// Move the gate at `from` so it ends up at position `to`.
    /// Out-of-range `to` moves the gate to the end. Returns false if `from` is invalid.
    pub fn move_gate(&mut self, from: usize, to: usize) -> bool {
        if from >= self.gates.len() {
            return false;
        }
        let gate = self.gates.remove(from);
        let to = to.min(self.gates.len());
        self.gates.insert(to, gate);
        true
    }

    pub fn clear(&mut self) {
        self.gates.clear();
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Number of state-changing gates (Measure markers excluded).
    pub fn gate_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_unitary()).count()
    }

    pub fn measure_count(&self) -> usize {
        self.gates.len() - self.gate_count()
    }

    /// Validate the register size and every gate against it.
    pub fn validate(&self) -> Result<()> {
        if self.qubits == 0 {
            return Err(QsimError::invalid_document("circuit needs at least one qubit"));
        }
        self.gates.iter().try_for_each(|g| g.validate(self.qubits))
    }

    /// Render as OpenQASM 2.0 text.
    pub fn to_qasm(&self) -> String {
        super::qasm::to_qasm(&self.gates, self.qubits)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit ({} qubits, {} gates):", self.qubits, self.gates.len())?;
        for (i, gate) in self.gates.iter().enumerate() {
            writeln!(f, "  {i:>3}: {gate}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
