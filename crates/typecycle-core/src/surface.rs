#![forbid(unsafe_code)]

//! Text surfaces: the writable region an effect renders into.
//!
//! The driver never owns its surface. It is handed `&mut` access for the
//! duration of one step and performs exactly one mutation: an append while
//! typing, or a full replacement while erasing.

use std::io;

/// A single writable text region.
pub trait TextSurface {
    /// Current content.
    fn text(&self) -> &str;

    /// Append one grapheme to the end of the content.
    fn append(&mut self, grapheme: &str) -> io::Result<()>;

    /// Replace the whole content.
    fn replace(&mut self, text: &str) -> io::Result<()>;
}

/// In-memory surface backed by a `String`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSurface {
    text: String,
}

impl StringSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextSurface for StringSurface {
    fn text(&self) -> &str {
        &self.text
    }

    fn append(&mut self, grapheme: &str) -> io::Result<()> {
        self.text.push_str(grapheme);
        Ok(())
    }

    fn replace(&mut self, text: &str) -> io::Result<()> {
        self.text.clear();
        self.text.push_str(text);
        Ok(())
    }
}

impl<S: TextSurface + ?Sized> TextSurface for Box<S> {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn append(&mut self, grapheme: &str) -> io::Result<()> {
        (**self).append(grapheme)
    }

    fn replace(&mut self, text: &str) -> io::Result<()> {
        (**self).replace(text)
    }
}
