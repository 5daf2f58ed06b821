#![forbid(unsafe_code)]

//! typecycle demo: the typewriter effect on an inline terminal region.

pub mod app;
pub mod cli;
