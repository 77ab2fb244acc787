/// Gate library and in-place gate application.
///
/// Single-qubit gates are 2×2 complex matrices applied to every pair of basis
/// states that differ only in the target bit. CNOT is a conditional amplitude
/// swap. Both walk the index space with unsigned bit masks, O(2^n) per gate.
use super::complex::Complex;
use super::state::StateVector;
use std::f64::consts::FRAC_1_SQRT_2;

/// A 2×2 complex unitary matrix representing a single-qubit gate.
/// Row-major: matrix[row][col]
pub type Matrix2x2 = [[Complex; 2]; 2];

// ── Fixed Gate Matrices ────────────────────────────────────────────────────

/// Hadamard: H = (1/√2) * [[1, 1], [1, -1]]
pub const HADAMARD: Matrix2x2 = [
    [Complex::real(FRAC_1_SQRT_2), Complex::real(FRAC_1_SQRT_2)],
    [Complex::real(FRAC_1_SQRT_2), Complex::real(-FRAC_1_SQRT_2)],
];

/// Pauli-X (NOT): X = [[0, 1], [1, 0]]
pub const PAULI_X: Matrix2x2 = [
    [Complex::zero(), Complex::one()],
    [Complex::one(), Complex::zero()],
];

/// Pauli-Z (phase flip): Z = [[1, 0], [0, -1]]
pub const PAULI_Z: Matrix2x2 = [
    [Complex::one(), Complex::zero()],
    [Complex::zero(), Complex::real(-1.0)],
];

// ── Parametrized Rotations ─────────────────────────────────────────────────

/// Rotation around X by θ.
/// Rx(θ) = [[cos(θ/2), -i·sin(θ/2)], [-i·sin(θ/2), cos(θ/2)]]
pub fn rx(theta: f64) -> Matrix2x2 {
    let half = theta / 2.0;
    let cos = Complex::real(half.cos());
    let minus_i_sin = Complex::new(0.0, -half.sin());
    [[cos, minus_i_sin], [minus_i_sin, cos]]
}

/// Rotation around Z by θ.
/// Rz(θ) = diag(cos(-θ/2) + i·sin(-θ/2), cos(θ/2) + i·sin(θ/2))
///       = diag(e^(-iθ/2), e^(iθ/2))
pub fn rz(theta: f64) -> Matrix2x2 {
    let p = -theta / 2.0;
    [
        [Complex::new(p.cos(), p.sin()), Complex::zero()],
        [Complex::zero(), Complex::new((-p).cos(), (-p).sin())],
    ]
}

// ── Gate Application ───────────────────────────────────────────────────────

/// Apply a single-qubit `gate` to `target` in place.
///
/// With stride = 2^target the index space splits into blocks of 2·stride;
/// inside each block, index `base + i` (target bit clear) pairs with
/// `base + i + stride` (target bit set). Both amplitudes of a pair are read
/// before either is written. The matrix is assumed unitary; no renormalization
/// happens here.
pub fn apply_single_qubit_gate(state: &mut StateVector, gate: &Matrix2x2, target: usize) {
    assert!(
        target < state.num_qubits,
        "target qubit {target} out of range for {} qubits",
        state.num_qubits
    );

    let [[a, b], [c, d]] = *gate;
    let dim = state.dim();
    let stride = 1usize << target;
    let amps = &mut state.amplitudes;

    for base in (0..dim).step_by(stride << 1) {
        for i in 0..stride {
            let i0 = base + i;
            let i1 = i0 + stride;
            let v0 = amps[i0];
            let v1 = amps[i1];
            amps[i0] = a * v0 + b * v1;
            amps[i1] = c * v0 + d * v1;
        }
    }
}

/// Apply CNOT: flip `target` wherever `control` is |1⟩.
///
/// `control == target` is a no-op. Each (control set, target clear) index is
/// swapped with its target-set partner exactly once.
pub fn apply_cnot(state: &mut StateVector, control: usize, target: usize) {
    assert!(
        control < state.num_qubits,
        "control qubit {control} out of range for {} qubits",
        state.num_qubits
    );
    assert!(
        target < state.num_qubits,
        "target qubit {target} out of range for {} qubits",
        state.num_qubits
    );
    if control == target {
        return;
    }

    let target_mask = 1usize << target;

    for i in 0..state.dim() {
        if StateVector::qubit_bit(i, control) && !StateVector::qubit_bit(i, target) {
            state.amplitudes.swap(i, i | target_mask);
        }
    }
}
