/// Circuit executor.
///
/// Runs a circuit the way the editor does on every edit: fresh |0…0⟩ state,
/// gates in list order, `Measure` markers skipped, then one normalization pass
/// to remove accumulated rounding drift. Sampling is a separate, explicit step
/// ([`ExecutionResult::sample`], [`run_shots`]) because it destroys the state.
use crate::circuit::Circuit;
use crate::core::complex::round6;
use crate::core::{bloch_vector, BlochVector, Complex, Simulator, StateVector};
use crate::error::{QsimError, Result};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

// ── Result types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub num_qubits: usize,
    /// Normalized final state.
    pub state: StateVector,
    /// Norm measured just before the final normalization (drift diagnostic).
    pub norm_before: f64,
    /// Final probability distribution, index order.
    pub probabilities: Vec<f64>,
    /// State-changing gates applied (Measure markers excluded).
    pub gate_count: usize,
}

/// Amplitude entry as exported to the host (6-digit rounding).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmplitudeRecord {
    pub idx: usize,
    pub re: f64,
    pub im: f64,
}

impl ExecutionResult {
    /// Basis states with probability above `threshold`, as `(label, probability)` in index order.
    pub fn significant_states(&self, threshold: f64) -> Vec<(String, f64)> {
        self.probabilities
            .iter()
            .enumerate()
            .filter(|(_, &p)| p > threshold)
            .map(|(i, &p)| (self.state.basis_label(i), p))
            .collect()
    }

    pub fn bloch(&self, qubit: usize) -> BlochVector {
        bloch_vector(&self.state, qubit)
    }

    /// Bloch vectors of every qubit, qubit 0 first.
    pub fn bloch_all(&self) -> Vec<BlochVector> {
        (0..self.num_qubits).map(|q| self.bloch(q)).collect()
    }

    pub fn probabilities_rounded(&self) -> Vec<f64> {
        self.probabilities.iter().map(|&p| round6(p)).collect()
    }

    pub fn amplitudes_rounded(&self) -> Vec<AmplitudeRecord> {
        self.state
            .amplitudes
            .iter()
            .map(Complex::rounded)
            .enumerate()
            .map(|(idx, a)| AmplitudeRecord { idx, re: a.re, im: a.im })
            .collect()
    }

    /// Collapse a copy of the final state with `rng`; the result itself is untouched.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.state.clone().sample(rng)
    }

    /// Sample `shots` independent collapses of the final state.
    pub fn shots<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> Result<ShotHistogram> {
        if shots == 0 {
            return Err(QsimError::config("shot count must be positive"));
        }
        let mut counts = BTreeMap::new();
        for _ in 0..shots {
            *counts.entry(self.sample(rng)).or_insert(0) += 1;
        }
        info!(shots, outcomes = counts.len(), "sampling finished");
        Ok(ShotHistogram {
            num_qubits: self.num_qubits,
            shots,
            counts,
        })
    }
}

/// Outcome counts from repeated sampling of one prepared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShotHistogram {
    pub num_qubits: usize,
    pub shots: usize,
    pub counts: BTreeMap<usize, usize>,
}

impl ShotHistogram {
    pub fn count(&self, index: usize) -> usize {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// `(ket label, count)` pairs in index order, zero counts omitted.
    pub fn labelled(&self) -> Vec<(String, usize)> {
        let n = self.num_qubits;
        self.counts
            .iter()
            .map(|(&i, &c)| (format!("{i:0>n$b}"), c))
            .collect()
    }

    pub fn frequency(&self, index: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(index) as f64 / self.shots as f64
    }
}

// ── Execution ─────────────────────────────────────────────────────────────

/// Validate and run `circuit` from |0…0⟩.
pub fn execute(circuit: &Circuit) -> Result<ExecutionResult> {
    circuit.validate()?;
    debug!(qubits = circuit.qubits, gates = circuit.len(), "executing circuit");

    let mut sim = Simulator::new(circuit.qubits);
    for gate in &circuit.gates {
        sim.apply_gate(gate);
    }

    let norm_before = sim.normalize().map_err(|e| {
        warn!("circuit execution produced a zero-norm state");
        e
    })?;
    if (norm_before - 1.0).abs() > 1e-9 {
        warn!(norm_before, "norm drifted before final normalization");
    }

    let state = sim.state;
    let probabilities = state.probabilities();
    Ok(ExecutionResult {
        num_qubits: circuit.qubits,
        state,
        norm_before,
        probabilities,
        gate_count: circuit.gate_count(),
    })
}

/// Execute once, then sample `shots` independent collapses of the prepared state.
pub fn run_shots<R: Rng + ?Sized>(
    circuit: &Circuit,
    shots: usize,
    rng: &mut R,
) -> Result<ShotHistogram> {
    if shots == 0 {
        return Err(QsimError::config("shot count must be positive"));
    }
    execute(circuit)?.shots(shots, rng)
}

// ── Tests ─────────────────────────────────────────────────────────────────
