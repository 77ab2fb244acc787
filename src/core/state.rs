/// Quantum state vector representation.
///
/// An n-qubit system has 2^n basis states and one complex amplitude per basis
/// state. Bit k of an index is the value qubit k collapses to (qubit 0 is the
/// least-significant bit). The vector should satisfy Σ|αᵢ|² = 1; gates keep it
/// there up to rounding and [`StateVector::normalize`] restores it.
use super::complex::{round6, Complex};
use crate::error::{QsimError, Result};
use rand::Rng;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct StateVector {
    pub num_qubits: usize,
    pub amplitudes: Vec<Complex>,
}

impl StateVector {
    /// Create a state vector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        assert!(num_qubits >= 1, "at least one qubit required");
        assert!(
            num_qubits < usize::BITS as usize,
            "num_qubits exceeds the addressable index width"
        );

        let dim = 1usize << num_qubits;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::one();

        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// Wrap an existing amplitude buffer. The buffer must hold exactly 2^n entries.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex>) -> Result<Self> {
        let expected = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .unwrap_or(0);
        if num_qubits == 0 || amplitudes.len() != expected {
            return Err(QsimError::DimensionMismatch {
                expected,
                actual: amplitudes.len(),
            });
        }
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Dimension of the state space: 2^n
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Put all amplitude mass back on |0...0⟩ without reallocating.
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex::zero());
        self.amplitudes[0] = Complex::one();
    }

    /// Probability of basis state `index`: |αᵢ|²
    #[inline(always)]
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].norm_sq()
    }

    /// Per-basis-state probabilities in index order. Not renormalized.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex::norm_sq).collect()
    }

    /// √Σ|αᵢ|² without touching the vector.
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(Complex::norm_sq)
            .sum::<f64>()
            .sqrt()
    }

    /// Rescale to unit norm and return the norm measured beforehand.
    ///
    /// An all-zero vector is left untouched and reported as
    /// [`QsimError::ZeroNorm`]; only misuse can produce one, so callers should
    /// surface it rather than continue.
    pub fn normalize(&mut self) -> Result<f64> {
        let norm = self.norm();
        if norm == 0.0 {
            warn!(num_qubits = self.num_qubits, "normalize called on a zero-norm state");
            return Err(QsimError::ZeroNorm);
        }
        for amp in self.amplitudes.iter_mut() {
            amp.re /= norm;
            amp.im /= norm;
        }
        Ok(norm)
    }

    /// Collapse onto the basis state selected by the uniform draw `r` ∈ [0, 1).
    ///
    /// Inverse-CDF over the fixed index order: the first index with non-zero
    /// probability whose cumulative sum reaches `r` wins. When rounding leaves
    /// the total short of `r`, the last index carrying probability is used.
    pub fn sample_with(&mut self, r: f64) -> usize {
        let probs = self.probabilities();
        let mut acc = 0.0;
        let mut chosen = None;
        for (i, &p) in probs.iter().enumerate() {
            acc += p;
            if p > 0.0 && acc >= r {
                chosen = Some(i);
                break;
            }
        }
        let index = chosen
            .or_else(|| probs.iter().rposition(|&p| p > 0.0))
            .unwrap_or(0);

        self.collapse_to(index);
        debug!(index, r, "sampled basis state");
        index
    }

    /// Draw from `rng` and collapse. See [`StateVector::sample_with`].
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let r: f64 = rng.gen();
        self.sample_with(r)
    }

    /// Replace the state with basis state `index`.
    pub fn collapse_to(&mut self, index: usize) {
        assert!(index < self.dim(), "basis index out of range");
        self.amplitudes.fill(Complex::zero());
        self.amplitudes[index] = Complex::one();
    }

    /// Check if this qubit's bit is set in basis state index `basis_idx`.
    #[inline(always)]
    pub fn qubit_bit(basis_idx: usize, qubit: usize) -> bool {
        (basis_idx >> qubit) & 1 == 1
    }

    /// Ket label of basis state `index`, highest qubit first ("01" = qubit 0 set).
    pub fn basis_label(&self, index: usize) -> String {
        let n = self.num_qubits;
        format!("{index:0>n$b}")
    }

    /// Probabilities rounded to 6 fractional digits, for display and export.
    pub fn probabilities_rounded(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| round6(a.norm_sq())).collect()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StateVector ({} qubits, dim={}):", self.num_qubits, self.dim())?;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let prob = amp.norm_sq();
            if prob > 1e-12 {
                writeln!(
                    f,
                    "  |{}⟩  amplitude: {}  probability: {:.4}",
                    self.basis_label(i),
                    amp,
                    prob
                )?;
            }
        }
        Ok(())
    }
}
