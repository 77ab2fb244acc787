/// Runtime: executes circuits on the simulator core.
///
/// `execute` is the editor's "run" (reset, apply, normalize). `run_shots`
/// repeats the destructive sampling step on copies of the prepared state.
/// `selftest` checks the engine against circuits with known answers.
pub mod executor;
pub mod selftest;

pub use executor::{execute, run_shots, AmplitudeRecord, ExecutionResult, ShotHistogram};
pub use selftest::{all_passed, run_self_tests, SelfTestResult};
