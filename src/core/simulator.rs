/// Session-level simulator interface.
///
/// `Simulator` owns exactly one state vector and one random source, and puts
/// the gate engine behind a chainable API. It is the "running session" of the
/// editor: reset replaces the state, sampling collapses it, and nothing is
/// shared with other sessions.
use super::density::{bloch_vector, BlochVector};
use super::gates::{self, apply_cnot, apply_single_qubit_gate, Matrix2x2};
use super::state::StateVector;
use crate::circuit::Gate;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

pub struct Simulator {
    pub state: StateVector,
    /// Basis index selected by the most recent `sample` (None = not sampled since reset)
    pub last_sample: Option<usize>,
    rng_seed: Option<u64>,
    rng: StdRng,
}

impl Simulator {
    /// Create a simulator for `num_qubits` qubits, initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            state: StateVector::new(num_qubits),
            last_sample: None,
            rng_seed: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a simulator whose sampling sequence is reproducible.
    pub fn with_seed(num_qubits: usize, seed: u64) -> Self {
        Self {
            state: StateVector::new(num_qubits),
            last_sample: None,
            rng_seed: Some(seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Take over an existing state (e.g. the output of a circuit run).
    pub fn from_state(state: StateVector, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            state,
            last_sample: None,
            rng_seed: seed,
            rng,
        }
    }

    // ── Single-Qubit Gates ────────────────────────────────────────────────

    pub fn h(&mut self, qubit: usize) -> &mut Self {
        self.apply(&gates::HADAMARD, qubit)
    }

    pub fn x(&mut self, qubit: usize) -> &mut Self {
        self.apply(&gates::PAULI_X, qubit)
    }

    pub fn z(&mut self, qubit: usize) -> &mut Self {
        self.apply(&gates::PAULI_Z, qubit)
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> &mut Self {
        self.apply(&gates::rx(theta), qubit)
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> &mut Self {
        self.apply(&gates::rz(theta), qubit)
    }

    /// Apply an arbitrary 2×2 matrix, assumed unitary.
    pub fn apply(&mut self, gate: &Matrix2x2, qubit: usize) -> &mut Self {
        apply_single_qubit_gate(&mut self.state, gate, qubit);
        self
    }

    // ── Two-Qubit Gates ───────────────────────────────────────────────────

    pub fn cnot(&mut self, control: usize, target: usize) -> &mut Self {
        apply_cnot(&mut self.state, control, target);
        self
    }

    /// Apply one circuit gate. `Measure` leaves the state untouched.
    pub fn apply_gate(&mut self, gate: &Gate) -> &mut Self {
        match gate {
            Gate::Cnot { control, target } => self.cnot(*control, *target),
            Gate::Measure => self,
            _ => match (gate.matrix(), gate.target()) {
                (Some(m), Some(q)) => self.apply(&m, q),
                _ => self,
            },
        }
    }

    // ── Readout ───────────────────────────────────────────────────────────

    /// Probabilities of each basis state, without collapsing.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }

    pub fn bloch(&self, qubit: usize) -> BlochVector {
        bloch_vector(&self.state, qubit)
    }

    pub fn normalize(&mut self) -> Result<f64> {
        self.state.normalize()
    }

    /// Collapse the whole register onto one basis state and return its index.
    pub fn sample(&mut self) -> usize {
        let index = self.state.sample(&mut self.rng);
        self.last_sample = Some(index);
        index
    }

    /// Sample and render the outcome as a ket label.
    pub fn sample_label(&mut self) -> String {
        let index = self.sample();
        self.state.basis_label(index)
    }

    // ── State Control ─────────────────────────────────────────────────────

    /// Back to |0...0⟩; a seeded simulator also restarts its random sequence.
    pub fn reset(&mut self) {
        self.state.reset();
        self.last_sample = None;
        if let Some(seed) = self.rng_seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    pub fn print_state(&self) {
        print!("{}", self.state);
    }
}

impl fmt::Display for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)?;
        match self.last_sample {
            Some(i) => writeln!(f, "Last sample: |{}⟩", self.state.basis_label(i)),
            None => writeln!(f, "Last sample: none"),
        }
    }
}
