//! Ready-made circuits offered by the editor's template menu.

use super::ir::{Circuit, Gate};
use std::f64::consts::FRAC_PI_2;

/// Names accepted by [`by_name`].
pub const TEMPLATE_NAMES: [&str; 4] = ["empty", "bell", "ghz", "rxdemo"];

pub fn empty(qubits: usize) -> Circuit {
    Circuit::new(qubits.max(1))
}

/// (|00⟩ + |11⟩)/√2: H on q0, CNOT 0→1.
pub fn bell() -> Circuit {
    Circuit::with_gates(
        2,
        vec![Gate::H { target: 0 }, Gate::Cnot { control: 0, target: 1 }],
    )
}

/// (|0…0⟩ + |1…1⟩)/√2 over `qubits` qubits (at least 2).
pub fn ghz(qubits: usize) -> Circuit {
    let qubits = qubits.max(2);
    let mut circuit = Circuit::new(qubits);
    circuit.push(Gate::H { target: 0 });
    for target in 1..qubits {
        circuit.push(Gate::Cnot { control: 0, target });
    }
    circuit
}

/// Four quarter-turn X rotations: a full 2π turn, back to |0⟩ up to phase.
pub fn rx_demo() -> Circuit {
    Circuit::with_gates(1, vec![Gate::Rx { target: 0, theta: FRAC_PI_2 }; 4])
}

/// Look up a template; `qubits` sizes the ones that are not fixed-width.
pub fn by_name(name: &str, qubits: usize) -> Option<Circuit> {
    match name.to_ascii_lowercase().as_str() {
        "empty" => Some(empty(qubits)),
        "bell" => Some(bell()),
        "ghz" => Some(ghz(qubits)),
        "rxdemo" | "rx_demo" => Some(rx_demo()),
        _ => None,
    }
}
