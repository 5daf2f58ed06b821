#![forbid(unsafe_code)]

//! Core: the typewriter effect state machine, its text surfaces, and the
//! deadline timeline that drives any number of isolated instances.
//!
//! Nothing here touches a terminal. The runtime crate supplies a real clock
//! and a terminal-backed [`surface::TextSurface`].

pub mod cycle;
pub mod error;
pub mod logging;
pub mod presets;
pub mod stage;
pub mod surface;
pub mod timeline;
pub mod timing;
pub mod typewriter;

pub use cycle::Cycle;
pub use error::CycleError;
pub use stage::{InstanceId, Stage};
pub use surface::{StringSurface, TextSurface};
pub use timeline::Timeline;
pub use typewriter::{Cursor, Phase, Step, StepAction, Typewriter};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
