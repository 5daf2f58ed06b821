#![forbid(unsafe_code)]

//! Real-time driver for a [`Stage`].
//!
//! The loop is single-threaded and cooperative: run every step that is due,
//! then sleep on the [`StopSignal`] until the next deadline. Steps are
//! rescheduled from their own deadlines (see [`Stage::advance_to`]), so a late
//! wakeup catches up instead of drifting.
//!
//! ```ignore
//! let (stop, trigger) = StopSignal::new();
//! let session = TerminalSession::new(SessionOptions::default(), trigger)?;
//! let mut stage = Stage::new();
//! stage.add(cycle, session.line(0).unwrap());
//! Program::new(stage, ProgramConfig::default()).run(&stop)?;
//! ```

use std::io;
use std::time::{Duration, Instant};

use typecycle_core::Stage;

/// Program configuration.
#[derive(Debug, Clone, Default)]
pub struct ProgramConfig {
    /// Return after this much wall time. `None` runs until stopped.
    pub exit_after: Option<Duration>,
}

/// Why [`Program::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The stop trigger fired.
    Stopped,
    /// `exit_after` elapsed.
    ExitAfter,
    /// Nothing left to schedule (empty stage).
    Idle,
}

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: ExitReason,
    /// Steps executed across all instances.
    pub steps: u64,
    /// Wall time spent in the loop.
    pub elapsed: Duration,
}

/// Owns a stage and runs it against the wall clock.
#[derive(Debug)]
pub struct Program {
    stage: Stage,
    config: ProgramConfig,
}

impl Program {
    /// Wrap a stage.
    pub fn new(stage: Stage, config: ProgramConfig) -> Self {
        Self { stage, config }
    }

    /// The stage being driven.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Configuration.
    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Run until `stop` fires, `exit_after` elapses, or the stage is empty.
    ///
    /// # Errors
    ///
    /// Returns the first surface write error.
    pub fn run(&mut self, stop: &crate::stop::StopSignal) -> io::Result<RunSummary> {
        let start = Instant::now();
        let mut steps: u64 = 0;
        tracing::info!(
            instances = self.stage.len(),
            exit_after = ?self.config.exit_after,
            "program started"
        );
        crate::debug_trace!("program started: instances={}", self.stage.len());

        let reason = loop {
            let elapsed = start.elapsed();
            let fired = self.stage.advance_to(elapsed)?;
            if fired > 0 {
                steps += fired as u64;
                tracing::trace!(fired, elapsed_ms = elapsed.as_millis() as u64, "steps fired");
            }

            if let Some(limit) = self.config.exit_after
                && elapsed >= limit
            {
                break ExitReason::ExitAfter;
            }

            let Some(next) = self.stage.next_deadline() else {
                break ExitReason::Idle;
            };
            let wake = match self.config.exit_after {
                Some(limit) => next.min(limit),
                None => next,
            };
            let wait = wake.saturating_sub(start.elapsed());
            crate::debug_trace!("sleeping {:?} until {:?}", wait, wake);
            if stop.wait_timeout(wait) {
                break ExitReason::Stopped;
            }
        };

        let summary = RunSummary {
            reason,
            steps,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            reason = ?summary.reason,
            steps = summary.steps,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "program stopped"
        );
        crate::debug_trace!("program stopped: {:?}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop::StopSignal;
    use std::thread;
    use tracing_test::traced_test;
    use typecycle_core::{Cycle, InstanceId, StringSurface};

    fn stage_with(strings: &[&str]) -> (Stage, InstanceId) {
        let mut stage = Stage::new();
        let id = stage.add(
            Cycle::new(strings.iter().copied()).unwrap(),
            StringSurface::new(),
        );
        (stage, id)
    }

    #[test]
    fn empty_stage_is_idle() {
        let (stop, _trigger) = StopSignal::new();
        let mut program = Program::new(Stage::new(), ProgramConfig::default());
        let summary = program.run(&stop).unwrap();
        assert_eq!(summary.reason, ExitReason::Idle);
        assert_eq!(summary.steps, 0);
    }

    #[test]
    fn exit_after_types_first_characters() {
        let (stop, _trigger) = StopSignal::new();
        let config = ProgramConfig {
            exit_after: Some(Duration::from_millis(250)),
        };
        let (stage, id) = stage_with(&["Hi"]);
        let mut program = Program::new(stage, config);
        let summary = program.run(&stop).unwrap();

        assert_eq!(summary.reason, ExitReason::ExitAfter);
        assert!(summary.elapsed >= Duration::from_millis(250));
        // "Hi" stays on screen until erasing starts at 2400ms.
        assert_eq!(program.stage().surface(id).unwrap().text(), "Hi");
        assert!(summary.steps >= 2);
    }

    #[test]
    fn stop_trigger_ends_run() {
        let (stop, trigger) = StopSignal::new();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            trigger.stop();
        });
        let mut program = Program::new(stage_with(&["abc"]).0, ProgramConfig::default());
        let summary = program.run(&stop).unwrap();
        handle.join().unwrap();

        assert_eq!(summary.reason, ExitReason::Stopped);
        assert!(summary.steps >= 1);
        assert!(summary.elapsed < Duration::from_secs(5));
    }

    #[test]
    fn already_stopped_runs_due_steps_once() {
        let (stop, trigger) = StopSignal::new();
        trigger.stop();
        let mut program = Program::new(stage_with(&["abc"]).0, ProgramConfig::default());
        let summary = program.run(&stop).unwrap();
        assert_eq!(summary.reason, ExitReason::Stopped);
        assert_eq!(summary.steps, 1);
    }

    #[traced_test]
    #[test]
    fn run_logs_lifecycle() {
        let (stop, trigger) = StopSignal::new();
        trigger.stop();
        let mut program = Program::new(stage_with(&["x"]).0, ProgramConfig::default());
        program.run(&stop).unwrap();
        assert!(logs_contain("program started"));
        assert!(logs_contain("program stopped"));
    }
}
