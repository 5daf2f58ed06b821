#![forbid(unsafe_code)]

//! Runtime: drives a [`Stage`](typecycle_core::Stage) in real time and
//! renders its instances onto lines of an inline terminal region.
//!
//! # Modules
//!
//! - [`program`] - real-time loop sleeping until the next deadline
//! - [`stop`] - condvar-backed stop signal used for those sleeps
//! - [`terminal_session`] - cursor/region lifecycle guard with signal cleanup
//! - [`terminal_line`] - [`TextSurface`](typecycle_core::TextSurface) on one terminal row
//! - [`debug_trace`] - env-gated stderr trace lines

pub mod debug_trace;
pub mod program;
pub mod stop;
pub mod terminal_line;
pub mod terminal_session;

pub use program::{ExitReason, Program, ProgramConfig, RunSummary};
pub use stop::{StopSignal, StopTrigger};
pub use terminal_line::TerminalLine;
pub use terminal_session::{SessionOptions, TerminalSession};
