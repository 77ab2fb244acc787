/// Single-qubit reduced states.
///
/// The reduced density matrix of one qubit is obtained by tracing out every
/// other qubit of the state vector. It is never stored: each call recomputes
/// it from the amplitudes. The Bloch vector is read off its entries, and its
/// length drops below 1 when the qubit is entangled with the rest of the
/// register.
use super::complex::Complex;
use super::state::StateVector;
use std::fmt;

/// 2×2 Hermitian matrix with real diagonal, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedDensityMatrix {
    pub rho: [[Complex; 2]; 2],
}

impl ReducedDensityMatrix {
    /// Partial trace of `state` over every qubit except `target`.
    pub fn of(state: &StateVector, target: usize) -> Self {
        assert!(
            target < state.num_qubits,
            "target qubit {target} out of range for {} qubits",
            state.num_qubits
        );

        let mask = 1usize << target;
        let mut rho00 = 0.0;
        let mut rho11 = 0.0;
        let mut rho01 = Complex::zero();

        for k in (0..state.dim()).filter(|&k| !StateVector::qubit_bit(k, target)) {
            let a = state.amplitudes[k];
            let b = state.amplitudes[k | mask];
            rho00 += a.norm_sq();
            rho11 += b.norm_sq();
            rho01 += a * b.conj();
        }

        Self {
            rho: [
                [Complex::real(rho00), rho01],
                [rho01.conj(), Complex::real(rho11)],
            ],
        }
    }

    /// Tr(ρ²): 1 for a pure reduced state, 1/2 for a maximally mixed one.
    pub fn purity(&self) -> f64 {
        let [[r00, r01], [_, r11]] = self.rho;
        r00.re * r00.re + r11.re * r11.re + 2.0 * r01.norm_sq()
    }

    pub fn bloch(&self) -> BlochVector {
        let [[r00, r01], [_, r11]] = self.rho;
        BlochVector::new(2.0 * r01.re, 2.0 * r01.im, r00.re - r11.re)
    }
}

/// Bloch-sphere coordinates of a single qubit plus their Euclidean length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub magnitude: f64,
}

impl BlochVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        let magnitude = (x * x + y * y + z * z).sqrt();
        Self { x, y, z, magnitude }
    }

    /// Magnitude below `1 - tolerance` means the qubit is not in a pure product state.
    pub fn is_mixed(&self, tolerance: f64) -> bool {
        self.magnitude < 1.0 - tolerance
    }
}

impl fmt::Display for BlochVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={:+.4} y={:+.4} z={:+.4} |r|={:.4}",
            self.x, self.y, self.z, self.magnitude
        )
    }
}

/// Reduced density matrix of `target`.
pub fn reduced_density_matrix(state: &StateVector, target: usize) -> ReducedDensityMatrix {
    ReducedDensityMatrix::of(state, target)
}

/// Bloch vector of `target`, tracing out the other qubits.
pub fn bloch_vector(state: &StateVector, target: usize) -> BlochVector {
    ReducedDensityMatrix::of(state, target).bloch()
}
