/// Circuit documents exchanged with the embedding editor.
///
/// The editor saves `{"version": 1, "qubits": n, "gates": [...]}`. Loading is
/// tolerant: [`sanitize`] accepts any JSON value and repairs or drops what it
/// cannot use, so everything handed to the simulator afterwards is in range.
use super::ir::{Circuit, Gate};
use crate::error::{QsimError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::PI;
use tracing::{debug, warn};

pub const DOCUMENT_VERSION: u32 = 1;

/// Well-formed circuit document as written by [`Circuit::to_document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDocument {
    pub version: u32,
    pub qubits: usize,
    pub gates: Vec<Gate>,
}

impl CircuitDocument {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Circuit {
    pub fn to_document(&self) -> CircuitDocument {
        CircuitDocument {
            version: DOCUMENT_VERSION,
            qubits: self.qubits,
            gates: self.gates.clone(),
        }
    }
}

/// Parse document text and sanitize it against `max_qubits`.
pub fn parse_document(text: &str, max_qubits: usize) -> Result<Circuit> {
    let value: Value = serde_json::from_str(text)?;
    sanitize(&value, max_qubits)
}

/// Turn an arbitrary JSON value into a usable circuit.
///
/// - non-objects are rejected;
/// - `qubits` is read as an integer (missing or 0 → 1) and clamped to `1..=max_qubits`;
/// - entries that are not objects or carry an unknown `type` are dropped;
/// - single-qubit targets are clamped into the register (missing → 0);
/// - rotation angles that are missing or not finite become π;
/// - CNOT control falls back to 0 and target to the first other qubit; on a
///   one-qubit register CNOT entries are dropped.
pub fn sanitize(value: &Value, max_qubits: usize) -> Result<Circuit> {
    let obj = value
        .as_object()
        .ok_or_else(|| QsimError::invalid_document("not an object"))?;

    let ceiling = max_qubits.max(1) as i64;
    let qubits = parse_int(obj.get("qubits"))
        .filter(|&q| q != 0)
        .unwrap_or(1)
        .clamp(1, ceiling) as usize;

    if let Some(version) = obj.get("version").and_then(Value::as_u64) {
        if version != u64::from(DOCUMENT_VERSION) {
            debug!(version, "loading circuit document with unexpected version");
        }
    }

    let entries = obj.get("gates").and_then(Value::as_array);
    let mut gates = Vec::new();
    let mut dropped = 0usize;

    for entry in entries.into_iter().flatten() {
        match sanitize_gate(entry, qubits) {
            Some(gate) => gates.push(gate),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, kept = gates.len(), "dropped unusable gate entries from circuit document");
    }
    Ok(Circuit::with_gates(qubits, gates))
}

fn sanitize_gate(entry: &Value, qubits: usize) -> Option<Gate> {
    let g = entry.as_object()?;
    let kind = g.get("type")?.as_str()?;
    let q = qubits as i64;
    let in_range = |v: Option<i64>| v.filter(|&i| (0..q).contains(&i));

    let target = || parse_int(g.get("target")).unwrap_or(0).clamp(0, q - 1) as usize;
    let theta = || parse_number(g.get("theta")).filter(|t| t.is_finite()).unwrap_or(PI);

    let gate = match kind {
        "H" => Gate::H { target: target() },
        "X" => Gate::X { target: target() },
        "Z" => Gate::Z { target: target() },
        "RX" => Gate::Rx { target: target(), theta: theta() },
        "RZ" => Gate::Rz { target: target(), theta: theta() },
        "MEASURE" => Gate::Measure,
        "CNOT" => {
            if qubits < 2 {
                return None;
            }
            let control = in_range(parse_int(g.get("control"))).unwrap_or(0) as usize;
            let fallback = if control == 0 { 1 } else { 0 };
            let mut target = in_range(parse_int(g.get("target")))
                .map_or(fallback, |t| t as usize);
            if target == control {
                target = (control + 1) % qubits;
            }
            Gate::Cnot { control, target }
        }
        _ => return None,
    };
    Some(gate)
}

/// Integer reading of a loosely typed field: numbers truncate, strings use
/// their leading integer ("3", " 2q" → 2).
fn parse_int(v: Option<&Value>) -> Option<i64> {
    match v? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim_start();
            let end = s
                .char_indices()
                .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
                .map_or(s.len(), |(i, _)| i);
            s[..end].parse().ok()
        }
        _ => None,
    }
}

/// Numeric reading of a loosely typed field; `None` when absent or unparseable.
fn parse_number(v: Option<&Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            sanitize(&json!([1, 2]), 4),
            Err(QsimError::InvalidDocument(_))
        ));
        assert!(parse_document("not json", 4).is_err());
    }

    #[test]
    fn test_qubits_clamped() {
        assert_eq!(sanitize(&json!({"qubits": 9}), 4).unwrap().qubits, 4);
        assert_eq!(sanitize(&json!({"qubits": -3}), 4).unwrap().qubits, 1);
        assert_eq!(sanitize(&json!({"qubits": "3"}), 4).unwrap().qubits, 3);
        assert_eq!(sanitize(&json!({"qubits": 2.9}), 4).unwrap().qubits, 2);
        assert_eq!(sanitize(&json!({}), 4).unwrap().qubits, 1);
    }

    #[test]
    fn test_unknown_and_malformed_entries_dropped() {
        let doc = json!({
            "qubits": 2,
            "gates": [{"type": "Y", "target": 0}, 5, {"target": 1}, {"type": "H", "target": 1}]
        });
        let c = sanitize(&doc, 4).unwrap();
        assert_eq!(c.gates, vec![Gate::H { target: 1 }]);
    }

    #[test]
    fn test_single_qubit_repairs() {
        let doc = json!({
            "qubits": 2,
            "gates": [
                {"type": "X", "target": 7},
                {"type": "Z"},
                {"type": "RX", "target": 0, "theta": "oops"},
                {"type": "RZ", "target": 1, "theta": 0.25}
            ]
        });
        let c = sanitize(&doc, 4).unwrap();
        assert_eq!(c.gates[0], Gate::X { target: 1 });
        assert_eq!(c.gates[1], Gate::Z { target: 0 });
        assert_eq!(c.gates[2], Gate::Rx { target: 0, theta: PI });
        assert_eq!(c.gates[3], Gate::Rz { target: 1, theta: 0.25 });
    }

    #[test]
    fn test_cnot_repairs() {
        let doc = json!({
            "qubits": 3,
            "gates": [
                {"type": "CNOT", "control": 9, "target": 9},
                {"type": "CNOT", "control": 2, "target": 2},
                {"type": "CNOT", "control": 1},
                {"type": "CNOT", "control": 2, "target": 0}
            ]
        });
        let c = sanitize(&doc, 4).unwrap();
        assert_eq!(c.gates[0], Gate::Cnot { control: 0, target: 1 });
        assert_eq!(c.gates[1], Gate::Cnot { control: 2, target: 0 });
        assert_eq!(c.gates[2], Gate::Cnot { control: 1, target: 0 });
        assert_eq!(c.gates[3], Gate::Cnot { control: 2, target: 0 });
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_cnot_dropped_on_single_qubit() {
        let doc = json!({"qubits": 1, "gates": [{"type": "CNOT", "control": 0, "target": 1}]});
        assert!(sanitize(&doc, 4).unwrap().is_empty());
    }

    #[test]
    fn test_document_round_trip() {
        let mut circuit = Circuit::new(2);
        circuit
            .push(Gate::H { target: 0 })
            .push(Gate::Cnot { control: 0, target: 1 })
            .push(Gate::Measure);
        let text = circuit.to_document().to_json_pretty().unwrap();
        assert!(text.contains("\"version\": 1"));
        assert_eq!(parse_document(&text, 4).unwrap(), circuit);
    }

    #[test]
    fn test_parse_int_leading_digits() {
        assert_eq!(parse_int(Some(&json!(" 2q"))), Some(2));
        assert_eq!(parse_int(Some(&json!("-1"))), Some(-1));
        assert_eq!(parse_int(Some(&json!("q"))), None);
        assert_eq!(parse_int(None), None);
    }
}
