//! Component check - single-module verification with a status artifact
//!
//! Runs a configured sequence of check steps for one module and records a
//! PASS/FAIL transcript, overwriting the module's status file at the start
//! of each run. Scratch paths are swept between steps so one simulator's
//! leftovers cannot contaminate the next.

pub mod engine;
pub mod status;

pub use engine::{run_component_check, CheckReport, StepResult};
pub use status::StatusLog;
