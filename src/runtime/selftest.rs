//! Built-in self-test suite.
//!
//! Small known circuits with known answers, run through the real engine so an
//! embedder (or the CLI) can confirm the core behaves before trusting it.

use crate::circuit::{templates, Circuit, Gate};
use crate::runtime::executor::execute;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfTestResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl fmt::Display for SelfTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { '✓' } else { '✗' };
        write!(f, "{mark} {}  ({})", self.name, self.detail)
    }
}

/// Probability check: `expected[i]` against the circuit's final distribution.
fn check_probs(
    name: &'static str,
    circuit: Circuit,
    expected: &[f64],
    tolerance: f64,
) -> SelfTestResult {
    match execute(&circuit) {
        Ok(result) => {
            let worst = result
                .probabilities
                .iter()
                .zip(expected)
                .map(|(p, e)| (p - e).abs())
                .fold(0.0, f64::max);
            SelfTestResult {
                name,
                passed: result.probabilities.len() == expected.len() && worst <= tolerance,
                detail: format!("max deviation {worst:.2e}"),
            }
        }
        Err(e) => SelfTestResult {
            name,
            passed: false,
            detail: e.to_string(),
        },
    }
}

fn check_bloch(
    name: &'static str,
    circuit: Circuit,
    qubit: usize,
    expected_mag: f64,
    tolerance: f64,
) -> SelfTestResult {
    match execute(&circuit) {
        Ok(result) => {
            let mag = result.bloch(qubit).magnitude;
            SelfTestResult {
                name,
                passed: (mag - expected_mag).abs() <= tolerance,
                detail: format!("|r| = {mag:.6}"),
            }
        }
        Err(e) => SelfTestResult {
            name,
            passed: false,
            detail: e.to_string(),
        },
    }
}

/// Run every check with the given numeric tolerance.
pub fn run_self_tests(tolerance: f64) -> Vec<SelfTestResult> {
    let single = |gate: Gate| Circuit::with_gates(1, vec![gate]);
    let mut ghz = [0.0; 8];
    ghz[0] = 0.5;
    ghz[7] = 0.5;

    vec![
        check_probs("H on |0⟩", single(Gate::H { target: 0 }), &[0.5, 0.5], tolerance),
        check_probs("X on |0⟩", single(Gate::X { target: 0 }), &[0.0, 1.0], tolerance),
        check_probs(
            "RX(π) on |0⟩",
            single(Gate::Rx { target: 0, theta: PI }),
            &[0.0, 1.0],
            tolerance,
        ),
        check_probs("Bell (H→CNOT)", templates::bell(), &[0.5, 0.0, 0.0, 0.5], tolerance),
        check_probs("GHZ (3 qubits)", templates::ghz(3), &ghz, tolerance),
        check_bloch("Bloch |+⟩ is pure", single(Gate::H { target: 0 }), 0, 1.0, tolerance),
        check_bloch("Bloch of Bell half is mixed", templates::bell(), 0, 0.0, tolerance),
    ]
}

pub fn all_passed(results: &[SelfTestResult]) -> bool {
    results.iter().all(|r| r.passed)
}
