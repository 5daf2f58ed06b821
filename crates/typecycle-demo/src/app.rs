#![forbid(unsafe_code)]

//! Wiring: options to cycle, session, stage, and program.

use std::io;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use typecycle_core::{Cycle, CycleError, Stage, presets};
use typecycle_runtime::{
    Program, ProgramConfig, RunSummary, SessionOptions, StopSignal, TerminalSession,
};

use crate::cli::Opts;

/// Install a stderr `fmt` subscriber when `TYPECYCLE_LOG` is set.
///
/// Left off by default: log lines on the terminal would scroll the region
/// the effect draws into.
pub fn init_tracing() {
    let Ok(directive) = std::env::var("TYPECYCLE_LOG") else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(io::stderr)
        .try_init();
}

/// The cycle the options ask for: custom texts, or the preset.
///
/// # Errors
///
/// Returns [`CycleError::Empty`] only if the cycle ends up with no strings.
pub fn build_cycle(opts: &Opts) -> Result<Cycle, CycleError> {
    if opts.texts.is_empty() {
        Cycle::new(presets::HELLO_WORLD)
    } else {
        Cycle::new(opts.texts.iter().cloned())
    }
}

/// Program configuration derived from the options.
pub fn program_config(opts: &Opts) -> ProgramConfig {
    ProgramConfig {
        exit_after: (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms)),
    }
}

/// Run the effect on the terminal until Ctrl+C or `--exit-after-ms`.
///
/// # Errors
///
/// Returns terminal write errors.
pub fn run(opts: &Opts) -> io::Result<RunSummary> {
    let cycle = build_cycle(opts).map_err(io::Error::other)?;
    let (stop, trigger) = StopSignal::new();
    let session = TerminalSession::new(
        SessionOptions {
            hide_cursor: true,
            reserve_lines: opts.instances,
        },
        trigger,
    )?;

    let mut stage = Stage::new();
    for row in 0..opts.instances {
        let line = session
            .line(row)
            .ok_or_else(|| io::Error::other(format!("row {row} outside reserved region")))?;
        stage.add(cycle.clone(), line);
    }

    let mut program = Program::new(stage, program_config(opts));
    let summary = program.run(&stop)?;
    tracing::info!(
        reason = ?summary.reason,
        steps = summary.steps,
        "typecycle finished"
    );
    drop(session);
    Ok(summary)
}
