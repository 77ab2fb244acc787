/// OpenQASM 2.0 rendering of a gate list.
///
/// Output is deterministic: a two-line header, then one line per gate in list
/// order, joined with `\n` and no trailing newline. Angles always carry six
/// fractional digits. `Measure` becomes a comment because measurement is done
/// by sampling the simulated state, not by the exported program. Qubit indices
/// are written as given; range checks belong to whoever built the list.
use super::ir::Gate;

const HEADER: &str = "OPENQASM 2.0;";
const MEASURE_COMMENT: &str = "// measure (simulated in-app)";

/// Render `gates` over a `qubits`-wide register.
pub fn to_qasm(gates: &[Gate], qubits: usize) -> String {
    let mut lines = Vec::with_capacity(gates.len() + 2);
    lines.push(HEADER.to_string());
    lines.push(format!("qreg q[{qubits}];"));
    lines.extend(gates.iter().map(gate_line));
    lines.join("\n")
}

fn gate_line(gate: &Gate) -> String {
    match *gate {
        Gate::H { target } => format!("h q[{target}];"),
        Gate::X { target } => format!("x q[{target}];"),
        Gate::Z { target } => format!("z q[{target}];"),
        Gate::Rx { target, theta } => format!("rx({}) q[{target}];", angle(theta)),
        Gate::Rz { target, theta } => format!("rz({}) q[{target}];", angle(theta)),
        Gate::Cnot { control, target } => format!("cx q[{control}],q[{target}];"),
        Gate::Measure => MEASURE_COMMENT.to_string(),
    }
}

/// Fixed 6-digit rendering; -0.0 prints as 0.000000.
///
/// `{:.6}` breaks exact ties toward the even digit. Ties here round away
/// from zero instead, so 0.0078125 renders as 0.007813.
fn angle(theta: f64) -> String {
    let theta = if theta == 0.0 { 0.0 } else { theta };
    if is_decimal_tie(theta) {
        return format!("{:.6}", (theta * 1e6).round() / 1e6);
    }
    format!("{theta:.6}")
}

/// True when the exact binary value of `theta` sits halfway between two
/// 6-digit decimals. That happens only for odd multiples of 1/128.
fn is_decimal_tie(theta: f64) -> bool {
    let scaled = theta * 128.0;
    scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 != 0.0
}
