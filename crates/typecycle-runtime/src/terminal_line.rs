#![forbid(unsafe_code)]

//! A [`TextSurface`] rendered on one row of an inline terminal region.
//!
//! The row is addressed relative to the cursor's resting position below the
//! region: a line with `rows_up = 2` lives two rows above it. Every update
//! moves up, rewrites the row from column 0, clears any tail past the text,
//! then moves back down, so any number of lines can share one writer without
//! tracking where the cursor was left.

use std::io::{self, Write};

use crossterm::cursor::{MoveDown, MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use typecycle_core::TextSurface;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal row surface.
#[derive(Debug)]
pub struct TerminalLine<W: Write> {
    writer: W,
    rows_up: u16,
    max_width: Option<usize>,
    text: String,
}

impl<W: Write> TerminalLine<W> {
    /// Surface on the row `rows_up` rows above the resting cursor.
    pub fn new(writer: W, rows_up: u16) -> Self {
        Self {
            writer,
            rows_up,
            max_width: None,
            text: String::new(),
        }
    }

    /// Truncate what is drawn to `width` columns so the row never wraps.
    ///
    /// Only the drawn text is cut; [`TextSurface::text`] keeps the full content.
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Distance of the row above the resting cursor.
    #[inline]
    pub fn rows_up(&self) -> u16 {
        self.rows_up
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the line, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&mut self) -> io::Result<()> {
        let (visible, fills_row) = match self.max_width {
            Some(width) => {
                let visible = fit_width(&self.text, width);
                (visible, width > 0 && visible.width() >= width)
            }
            None => (self.text.as_str(), false),
        };
        if self.rows_up > 0 {
            queue!(self.writer, MoveUp(self.rows_up))?;
        }
        queue!(self.writer, MoveToColumn(0), Print(visible))?;
        // A full row leaves the cursor pending-wrap on the last column, where
        // EL 0 would erase the final glyph. There is no tail to clear anyway.
        if !fills_row {
            queue!(self.writer, Clear(ClearType::UntilNewLine))?;
        }
        if self.rows_up > 0 {
            queue!(self.writer, MoveDown(self.rows_up))?;
        }
        queue!(self.writer, MoveToColumn(0))?;
        self.writer.flush()
    }
}

impl<W: Write> TextSurface for TerminalLine<W> {
    fn text(&self) -> &str {
        &self.text
    }

    fn append(&mut self, grapheme: &str) -> io::Result<()> {
        let len = self.text.len();
        self.text.push_str(grapheme);
        self.render().inspect_err(|_| self.text.truncate(len))
    }

    fn replace(&mut self, text: &str) -> io::Result<()> {
        let previous = std::mem::replace(&mut self.text, text.to_owned());
        self.render().inspect_err(|_| self.text = previous)
    }
}

/// Longest grapheme-aligned prefix of `text` that fits in `width` columns.
pub fn fit_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (start, grapheme) in text.grapheme_indices(true) {
        used += grapheme.width();
        if used > width {
            break;
        }
        end = start + grapheme.len();
    }
    &text[..end]
}
