pub mod complex;
pub mod density;
pub mod gates;
pub mod simulator;
pub mod state;

// Convenience re-exports for library users
pub use complex::Complex;
pub use density::{bloch_vector, reduced_density_matrix, BlochVector, ReducedDensityMatrix};
pub use gates::{apply_cnot, apply_single_qubit_gate, Matrix2x2};
pub use simulator::Simulator;
pub use state::StateVector;
