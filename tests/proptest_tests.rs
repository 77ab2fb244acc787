//! Property-based tests for carnot-qsim using proptest
//!
//! Properties that must hold for any gate sequence, not just the
//! hand-picked circuits in the unit tests.

use carnot_qsim::circuit::{self, Circuit, Gate};
use carnot_qsim::core::{bloch_vector, Simulator};
use carnot_qsim::runtime;
use proptest::prelude::*;
use serde_json::json;

const MAX_QUBITS: usize = 4;

/// Any gate valid on an `n`-qubit register.
fn gate_strategy(n: usize) -> impl Strategy<Value = Gate> {
    let angle = -10.0f64..10.0;
    let q = 0..n;
    let mut options = vec![
        q.clone().prop_map(|target| Gate::H { target }).boxed(),
        q.clone().prop_map(|target| Gate::X { target }).boxed(),
        q.clone().prop_map(|target| Gate::Z { target }).boxed(),
        (q.clone(), angle.clone())
            .prop_map(|(target, theta)| Gate::Rx { target, theta })
            .boxed(),
        (q.clone(), angle)
            .prop_map(|(target, theta)| Gate::Rz { target, theta })
            .boxed(),
        Just(Gate::Measure).boxed(),
    ];
    if n >= 2 {
        options.push(
            (0..n, 1..n)
                .prop_map(move |(control, offset)| Gate::Cnot {
                    control,
                    target: (control + offset) % n,
                })
                .boxed(),
        );
    }
    prop::strategy::Union::new(options)
}

fn circuit_strategy() -> impl Strategy<Value = Circuit> {
    (1..=MAX_QUBITS).prop_flat_map(|n| {
        prop::collection::vec(gate_strategy(n), 0..24)
            .prop_map(move |gates| Circuit::with_gates(n, gates))
    })
}

/// Loosely shaped gate entries, as a hand-edited document might contain.
fn json_gate_strategy() -> impl Strategy<Value = serde_json::Value> {
    let kind = prop_oneof![
        Just("H"),
        Just("X"),
        Just("Z"),
        Just("RX"),
        Just("RZ"),
        Just("CNOT"),
        Just("MEASURE"),
        Just("SWAP"),
    ];
    (
        kind,
        prop::option::of(-3i64..10),
        prop::option::of(-3i64..10),
        prop::option::of(-100.0f64..100.0),
    )
        .prop_map(|(kind, target, control, theta)| {
            json!({ "type": kind, "target": target, "control": control, "theta": theta })
        })
}

// ============================================================================
// State-vector properties
// ============================================================================

proptest! {
    /// Property: unitary gates keep the state normalized
    #[test]
    fn norm_preserved(circuit in circuit_strategy()) {
        let mut sim = Simulator::with_seed(circuit.qubits, 3);
        for gate in &circuit.gates {
            sim.apply_gate(gate);
        }
        let norm = sim.state.norm();
        prop_assert!((norm - 1.0).abs() < 1e-9, "norm drifted to {}", norm);
    }

    /// Property: probabilities are a distribution
    #[test]
    fn probabilities_sum_to_one(circuit in circuit_strategy()) {
        let result = runtime::execute(&circuit).unwrap();
        prop_assert_eq!(result.probabilities.len(), 1 << circuit.qubits);
        prop_assert!(result.probabilities.iter().all(|&p| p >= 0.0));
        let total: f64 = result.probabilities.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    /// Property: Bloch vectors never leave the unit ball
    #[test]
    fn bloch_inside_unit_ball(circuit in circuit_strategy()) {
        let result = runtime::execute(&circuit).unwrap();
        for q in 0..circuit.qubits {
            let b = bloch_vector(&result.state, q);
            prop_assert!(b.magnitude <= 1.0 + 1e-9, "q{} |r| = {}", q, b.magnitude);
        }
    }

    /// Property: sampling yields one basis state with amplitude magnitude 1
    #[test]
    fn sample_collapses(circuit in circuit_strategy(), seed in any::<u64>()) {
        let result = runtime::execute(&circuit).unwrap();
        let mut sim = Simulator::from_state(result.state, Some(seed));
        let index = sim.sample();
        prop_assert!((sim.state.probability(index) - 1.0).abs() < 1e-12);
        let others: f64 = sim
            .state
            .probabilities()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, p)| p)
            .sum();
        prop_assert!(others == 0.0);
        prop_assert_eq!(sim.sample(), index);
    }
}

// ============================================================================
// Export and import properties
// ============================================================================

proptest! {
    /// Property: QASM export is a pure function of the circuit
    #[test]
    fn qasm_deterministic(circuit in circuit_strategy()) {
        let a = circuit.to_qasm();
        let b = circuit.clone().to_qasm();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.lines().count(), circuit.len() + 2);
        prop_assert!(!a.ends_with('\n'));
    }

    /// Property: whatever a document contains, the sanitized circuit is runnable
    #[test]
    fn sanitized_documents_validate(
        qubits in -2i64..12,
        gates in prop::collection::vec(json_gate_strategy(), 0..16)
    ) {
        let entries = gates.len();
        let doc = json!({ "version": 1, "qubits": qubits, "gates": gates });
        let circuit = circuit::sanitize(&doc, MAX_QUBITS).unwrap();
        prop_assert!((1..=MAX_QUBITS).contains(&circuit.qubits));
        prop_assert!(circuit.len() <= entries);
        prop_assert!(circuit.validate().is_ok(), "invalid: {:?}", circuit);
        prop_assert!(runtime::execute(&circuit).is_ok());
    }

    /// Property: documents written by the exporter import unchanged
    #[test]
    fn document_round_trip(circuit in circuit_strategy()) {
        let text = circuit.to_document().to_json_pretty().unwrap();
        let back = circuit::parse_document(&text, MAX_QUBITS).unwrap();
        prop_assert_eq!(back.qubits, circuit.qubits);
        prop_assert_eq!(back.len(), circuit.len());
        // serde_json float parsing may land one ulp away
        for (got, want) in back.gates.iter().zip(&circuit.gates) {
            match (got, want) {
                (Gate::Rx { target: t1, theta: a1 }, Gate::Rx { target: t2, theta: a2 })
                | (Gate::Rz { target: t1, theta: a1 }, Gate::Rz { target: t2, theta: a2 }) => {
                    prop_assert_eq!(t1, t2);
                    prop_assert!((a1 - a2).abs() < 1e-12);
                }
                _ => prop_assert_eq!(got, want),
            }
        }
    }
}
