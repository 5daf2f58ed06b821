#![forbid(unsafe_code)]

//! The typewriter effect driver.
//!
//! A two-phase state machine over a [`Cycle`]:
//!
//! | Phase   | Condition           | Mutation                 | Next step after |
//! |---------|---------------------|--------------------------|-----------------|
//! | Typing  | `offset < len`      | append grapheme          | 200ms, Typing   |
//! | Typing  | `offset == len`     | none                     | 2000ms, Erasing |
//! | Erasing | `offset > 0`        | replace with `offset-1`  | 100ms, Erasing  |
//! | Erasing | `offset == 0`       | none, advance index      | 1300ms, Typing  |
//!
//! Every [`Typewriter::step`] returns the delay until its own continuation.
//! Callers either schedule that themselves (see [`crate::Stage`]) or feed
//! frame deltas to [`Typewriter::tick`].
//!
//! # Example
//!
//! ```
//! use typecycle_core::{Cycle, StringSurface, TextSurface, Typewriter};
//!
//! let mut tw = Typewriter::new(Cycle::new(["Hi"]).unwrap());
//! let mut surface = StringSurface::new();
//! tw.step(&mut surface).unwrap();
//! tw.step(&mut surface).unwrap();
//! assert_eq!(surface.text(), "Hi");
//! ```

use std::io;
use std::time::Duration;

use crate::cycle::Cycle;
use crate::surface::TextSurface;
use crate::timing::{ERASING_DELAY, NEW_TEXT_DELAY, NEXT_TEXT_DELAY, TYPING_DELAY};

/// Which way the effect is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Appending graphemes.
    Typing,
    /// Removing graphemes.
    Erasing,
}

/// Position of the effect within its cycle.
///
/// `index < cycle.len()` and `offset <= cycle.char_count(index)` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    /// Active string.
    pub index: usize,
    /// Graphemes of the active string currently shown.
    pub offset: usize,
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepAction {
    /// Appended one grapheme.
    Typed,
    /// Removed one grapheme.
    Erased,
    /// String fully typed; switched to erasing.
    Paused,
    /// String fully erased; moved to the next string.
    Advanced,
}

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub action: StepAction,
    /// Delay until the next step is due.
    pub delay: Duration,
}

impl Step {
    const fn new(action: StepAction, delay: Duration) -> Self {
        Self { action, delay }
    }
}

/// Typewriter state: cycle, cursor, phase, and time until the next step.
#[derive(Debug, Clone)]
pub struct Typewriter {
    cycle: Cycle,
    cursor: Cursor,
    phase: Phase,
    until_next: Duration,
}

impl Typewriter {
    /// Start in [`Phase::Typing`] at index 0, offset 0, first step due now.
    pub fn new(cycle: Cycle) -> Self {
        Self {
            cycle,
            cursor: Cursor::default(),
            phase: Phase::Typing,
            until_next: Duration::ZERO,
        }
    }

    /// The string cycle.
    #[inline]
    pub fn cycle(&self) -> &Cycle {
        &self.cycle
    }

    /// Current cursor.
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Time left before the next step is due (as seen by [`tick`](Self::tick)).
    #[inline]
    pub fn until_next(&self) -> Duration {
        self.until_next
    }

    /// The content the surface shows after the steps taken so far.
    pub fn rendered(&self) -> &str {
        self.cycle.prefix(self.cursor.index, self.cursor.offset)
    }

    /// Perform one step against `surface`.
    ///
    /// # Errors
    ///
    /// Propagates the surface's write error. Cursor and phase are left
    /// untouched in that case, so the same step can be retried.
    pub fn step<S: TextSurface + ?Sized>(&mut self, surface: &mut S) -> io::Result<Step> {
        let Cursor { index, offset } = self.cursor;
        let step = match self.phase {
            Phase::Typing => match self.cycle.grapheme(index, offset) {
                Some(grapheme) => {
                    surface.append(grapheme)?;
                    self.cursor.offset = offset + 1;
                    Step::new(StepAction::Typed, TYPING_DELAY)
                }
                None => {
                    self.phase = Phase::Erasing;
                    Step::new(StepAction::Paused, NEW_TEXT_DELAY)
                }
            },
            Phase::Erasing if offset > 0 => {
                surface.replace(self.cycle.prefix(index, offset - 1))?;
                self.cursor.offset = offset - 1;
                Step::new(StepAction::Erased, ERASING_DELAY)
            }
            Phase::Erasing => {
                self.cursor.index = self.cycle.next_index(index);
                self.phase = Phase::Typing;
                Step::new(StepAction::Advanced, NEXT_TEXT_DELAY)
            }
        };
        self.until_next = step.delay;
        crate::trace!(
            action = ?step.action,
            index = self.cursor.index,
            offset = self.cursor.offset,
            "typewriter step"
        );
        Ok(step)
    }

    /// Advance by `dt`, firing every step that falls due within it.
    ///
    /// Overshoot past a deadline carries into the following step, so slicing
    /// the same total time differently yields the same result. Returns the
    /// number of steps fired.
    ///
    /// # Errors
    ///
    /// Stops at the first failed step and leaves it due immediately.
    pub fn tick<S: TextSurface + ?Sized>(
        &mut self,
        dt: Duration,
        surface: &mut S,
    ) -> io::Result<usize> {
        let mut budget = dt;
        let mut fired = 0;
        while budget >= self.until_next {
            budget -= self.until_next;
            self.until_next = Duration::ZERO;
            self.step(surface)?;
            fired += 1;
        }
        self.until_next -= budget;
        Ok(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::StringSurface;

    const MS_100: Duration = Duration::from_millis(100);

    fn typewriter(strings: &[&str]) -> Typewriter {
        Typewriter::new(Cycle::new(strings.iter().copied()).unwrap())
    }

    /// Surface whose writes can be made to fail.
    #[derive(Default)]
    struct FlakySurface {
        inner: StringSurface,
        fail: bool,
    }

    impl TextSurface for FlakySurface {
        fn text(&self) -> &str {
            self.inner.text()
        }

        fn append(&mut self, grapheme: &str) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::other("broken pipe"));
            }
            self.inner.append(grapheme)
        }

        fn replace(&mut self, text: &str) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::other("broken pipe"));
            }
            self.inner.replace(text)
        }
    }

    #[test]
    fn initial_state() {
        let tw = typewriter(&["Hi"]);
        assert_eq!(tw.phase(), Phase::Typing);
        assert_eq!(tw.cursor(), Cursor { index: 0, offset: 0 });
        assert_eq!(tw.until_next(), Duration::ZERO);
        assert_eq!(tw.rendered(), "");
    }

    #[test]
    fn types_then_pauses() {
        let mut tw = typewriter(&["Hi"]);
        let mut s = StringSurface::new();

        let a = tw.step(&mut s).unwrap();
        assert_eq!(a, Step::new(StepAction::Typed, TYPING_DELAY));
        assert_eq!(s.text(), "H");

        tw.step(&mut s).unwrap();
        assert_eq!(s.text(), "Hi");
        assert_eq!(tw.phase(), Phase::Typing);

        let pause = tw.step(&mut s).unwrap();
        assert_eq!(pause, Step::new(StepAction::Paused, NEW_TEXT_DELAY));
        assert_eq!(tw.phase(), Phase::Erasing);
        assert_eq!(s.text(), "Hi");
    }

    #[test]
    fn erases_then_advances() {
        let mut tw = typewriter(&["Hi", "Yo"]);
        let mut s = StringSurface::new();
        for _ in 0..3 {
            tw.step(&mut s).unwrap();
        }

        let e = tw.step(&mut s).unwrap();
        assert_eq!(e, Step::new(StepAction::Erased, ERASING_DELAY));
        assert_eq!(s.text(), "H");
        tw.step(&mut s).unwrap();
        assert_eq!(s.text(), "");

        let adv = tw.step(&mut s).unwrap();
        assert_eq!(adv, Step::new(StepAction::Advanced, NEXT_TEXT_DELAY));
        assert_eq!(tw.cursor(), Cursor { index: 1, offset: 0 });
        assert_eq!(tw.phase(), Phase::Typing);

        tw.step(&mut s).unwrap();
        tw.step(&mut s).unwrap();
        assert_eq!(s.text(), "Yo");
    }

    #[test]
    fn empty_string_entry_passes_through() {
        let mut tw = typewriter(&["", "a"]);
        let mut s = StringSurface::new();
        assert_eq!(tw.step(&mut s).unwrap().action, StepAction::Paused);
        assert_eq!(tw.step(&mut s).unwrap().action, StepAction::Advanced);
        assert_eq!(tw.step(&mut s).unwrap().action, StepAction::Typed);
        assert_eq!(s.text(), "a");
    }

    #[test]
    fn failed_write_keeps_cursor() {
        let mut tw = typewriter(&["ab"]);
        let mut s = FlakySurface::default();
        tw.step(&mut s).unwrap();

        s.fail = true;
        assert!(tw.step(&mut s).is_err());
        assert_eq!(tw.cursor().offset, 1);
        assert_eq!(s.text(), "a");

        s.fail = false;
        tw.step(&mut s).unwrap();
        assert_eq!(s.text(), "ab");
    }

    #[test]
    fn tick_fires_first_step_immediately() {
        let mut tw = typewriter(&["Hi"]);
        let mut s = StringSurface::new();
        assert_eq!(tw.tick(Duration::ZERO, &mut s).unwrap(), 1);
        assert_eq!(s.text(), "H");
        assert_eq!(tw.until_next(), TYPING_DELAY);
    }

    #[test]
    fn tick_accumulates_partial_time() {
        let mut tw = typewriter(&["Hi"]);
        let mut s = StringSurface::new();
        tw.tick(Duration::ZERO, &mut s).unwrap();

        assert_eq!(tw.tick(MS_100, &mut s).unwrap(), 0);
        assert_eq!(s.text(), "H");
        assert_eq!(tw.tick(MS_100, &mut s).unwrap(), 1);
        assert_eq!(s.text(), "Hi");
    }

    #[test]
    fn tick_large_dt_fires_many_steps() {
        let mut tw = typewriter(&["Hi"]);
        let mut s = StringSurface::new();
        // 0ms H, 200ms i, 400ms pause, 2400ms erase, 2500ms erase
        let fired = tw.tick(Duration::from_millis(2500), &mut s).unwrap();
        assert_eq!(fired, 5);
        assert_eq!(s.text(), "");
        assert_eq!(tw.phase(), Phase::Erasing);
    }

    #[test]
    fn tick_error_leaves_step_due() {
        let mut tw = typewriter(&["ab"]);
        let mut s = FlakySurface {
            fail: true,
            ..Default::default()
        };
        assert!(tw.tick(Duration::from_secs(1), &mut s).is_err());
        assert_eq!(tw.until_next(), Duration::ZERO);
        s.fail = false;
        assert_eq!(tw.tick(Duration::ZERO, &mut s).unwrap(), 1);
        assert_eq!(s.text(), "a");
    }

    #[test]
    fn rendered_tracks_surface() {
        let mut tw = typewriter(&["héllo"]);
        let mut s = StringSurface::new();
        for _ in 0..20 {
            tw.step(&mut s).unwrap();
            assert_eq!(tw.rendered(), s.text());
        }
    }
}
