/// Circuits: the ordered gate lists the editor builds and the simulator runs.
///
/// - [`ir`]: `Gate` / `Circuit` types and editing operations
/// - [`qasm`]: OpenQASM 2.0 export
/// - [`document`]: tolerant import of saved circuit documents
/// - [`templates`]: built-in example circuits
pub mod document;
pub mod ir;
pub mod qasm;
pub mod templates;

pub use document::{parse_document, sanitize, CircuitDocument};
pub use ir::{Circuit, Gate};
pub use qasm::to_qasm;
