#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! Owns the inline region the effect draws into and guarantees the terminal
//! is left usable on every exit path.
//!
//! # Lifecycle
//!
//! 1. `new` reserves `reserve_lines` rows below the shell prompt by printing
//!    newlines, and optionally hides the cursor.
//! 2. Each [`TerminalLine`] handed out by [`TerminalSession::line`] draws on
//!    one of those rows, addressed relative to the resting cursor.
//! 3. Drop shows the cursor again and flushes. The reserved rows stay in the
//!    scrollback with whatever they last displayed.
//!
//! A panic hook performs the same cleanup during unwinding. On Unix, SIGINT
//! and SIGTERM fire the [`StopTrigger`] passed to `new`; the program loop then
//! returns normally and drop runs.
//!
//! No raw mode is entered: the effect reads no input, and cooked mode keeps
//! Ctrl+C delivering SIGINT.

use std::io::{self, Stdout, Write};
use std::sync::OnceLock;

use crossterm::cursor::{Hide, Show};

use crate::stop::StopTrigger;
use crate::terminal_line::TerminalLine;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Terminal session configuration.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Hide the cursor while the session is alive.
    pub hide_cursor: bool,
    /// Rows reserved for effect lines.
    pub reserve_lines: u16,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            hide_cursor: true,
            reserve_lines: 1,
        }
    }
}

/// RAII guard for the inline effect region.
///
/// Only one session should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    cursor_hidden: bool,
    width: u16,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Reserve the region and install cleanup hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written to or the signal
    /// handler cannot be registered.
    pub fn new(options: SessionOptions, stop: StopTrigger) -> io::Result<Self> {
        install_panic_hook();

        let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(80);
        let mut session = Self {
            options: options.clone(),
            cursor_hidden: false,
            width,
            #[cfg(unix)]
            signal_guard: Some(SignalGuard::new(stop)?),
        };
        #[cfg(not(unix))]
        drop(stop);

        let mut stdout = io::stdout();
        for _ in 0..options.reserve_lines {
            stdout.write_all(b"\n")?;
        }
        if options.hide_cursor {
            crossterm::execute!(stdout, Hide)?;
            session.cursor_hidden = true;
        }
        stdout.flush()?;
        tracing::info!(
            reserve_lines = options.reserve_lines,
            width,
            "terminal session started"
        );

        Ok(session)
    }

    /// Terminal width captured when the session started.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Session options.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Surface for reserved row `index` (0 = top of the region).
    ///
    /// Returns `None` if `index` is outside the reserved rows.
    pub fn line(&self, index: u16) -> Option<TerminalLine<Stdout>> {
        if index >= self.options.reserve_lines {
            return None;
        }
        let rows_up = self.options.reserve_lines - index;
        Some(TerminalLine::new(io::stdout(), rows_up).with_max_width(usize::from(self.width)))
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();
        if self.cursor_hidden {
            let _ = crossterm::execute!(stdout, Show);
            self.cursor_hidden = false;
        }
        let _ = stdout.flush();
        tracing::info!("terminal session closed");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, Show);
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new(stop: StopTrigger) -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            for signal in signals.forever() {
                crate::debug_trace!("termination signal {signal} received");
                tracing::warn!(signal, "termination signal received, stopping");
                stop.stop();
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
