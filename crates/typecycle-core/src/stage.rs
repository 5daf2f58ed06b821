#![forbid(unsafe_code)]

//! A set of isolated typewriter instances driven by one [`Timeline`].
//!
//! Each instance owns its own [`Typewriter`] (cursor and phase) and its own
//! surface; nothing is shared between instances except the clock.
//!
//! ```
//! use std::time::Duration;
//! use typecycle_core::{Cycle, Stage, StringSurface};
//!
//! let mut stage = Stage::new();
//! let id = stage.add(Cycle::new(["Hi"]).unwrap(), StringSurface::new());
//! stage.advance_to(Duration::from_millis(200)).unwrap();
//! assert_eq!(stage.surface(id).unwrap().text(), "Hi");
//! ```

use std::io;
use std::time::Duration;

use crate::cycle::Cycle;
use crate::surface::TextSurface;
use crate::timeline::Timeline;
use crate::typewriter::{Step, Typewriter};

/// Handle to an instance on a [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(usize);

impl InstanceId {
    /// Position of the instance in insertion order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

struct Instance {
    typewriter: Typewriter,
    surface: Box<dyn TextSurface>,
}

/// Runs any number of typewriter instances against virtual time.
#[derive(Default)]
pub struct Stage {
    instances: Vec<Instance>,
    timeline: Timeline<InstanceId>,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("instances", &self.instances.len())
            .field("now", &self.timeline.now())
            .field("pending", &self.timeline.len())
            .finish()
    }
}

impl Stage {
    /// Empty stage at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instance. Its first step is due at the current time.
    pub fn add(&mut self, cycle: Cycle, surface: impl TextSurface + 'static) -> InstanceId {
        let id = InstanceId(self.instances.len());
        self.instances.push(Instance {
            typewriter: Typewriter::new(cycle),
            surface: Box::new(surface),
        });
        self.timeline.schedule(id, Duration::ZERO);
        crate::debug!(instance = id.0, "stage instance added");
        id
    }

    /// Number of instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the stage has no instances.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// When the next step of any instance is due.
    #[inline]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_deadline()
    }

    /// Typewriter state of an instance.
    pub fn typewriter(&self, id: InstanceId) -> Option<&Typewriter> {
        self.instances.get(id.0).map(|i| &i.typewriter)
    }

    /// Surface of an instance.
    pub fn surface(&self, id: InstanceId) -> Option<&dyn TextSurface> {
        self.instances.get(id.0).map(|i| i.surface.as_ref())
    }

    /// Run every step due at or before `t`, in deadline order.
    ///
    /// Each instance is rescheduled relative to the deadline it fired at.
    /// Returns the number of steps run.
    ///
    /// # Errors
    ///
    /// Stops at the first failed surface write. The failing instance stays
    /// due at the failed deadline and the current time does not move past it.
    pub fn advance_to(&mut self, t: Duration) -> io::Result<usize> {
        let span = crate::debug_span!("stage_advance", until = ?t);
        let _guard = span.enter();
        let mut fired = 0;
        while let Some((id, _)) = self.timeline.pop_due(t) {
            match self.step(id) {
                Ok(step) => {
                    self.timeline.schedule(id, step.delay);
                    fired += 1;
                }
                Err(err) => {
                    self.timeline.schedule(id, Duration::ZERO);
                    crate::debug!(
                        instance = id.0,
                        at = ?self.timeline.now(),
                        error = %err,
                        "stage step failed"
                    );
                    return Err(err);
                }
            }
        }
        self.timeline.advance_to(t);
        Ok(fired)
    }

    fn step(&mut self, id: InstanceId) -> io::Result<Step> {
        let instance = &mut self.instances[id.0];
        instance.typewriter.step(&mut instance.surface)
    }
}
