#![forbid(unsafe_code)]

//! The fixed, ordered list of strings an effect types in rotation.
//!
//! Each string is segmented into extended grapheme clusters once, at
//! construction, so a "character" is what a reader sees as one glyph
//! (`"e\u{301}"`, `"👍🏽"`) rather than a `char` or a byte.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::CycleError;

/// One display string plus the byte offset at which each grapheme ends.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    text: String,
    ends: Vec<usize>,
}

impl Entry {
    fn new(text: String) -> Self {
        let ends = text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();
        Self { text, ends }
    }

    fn byte_end(&self, graphemes: usize) -> usize {
        let n = graphemes.min(self.ends.len());
        self.ends[..n].last().copied().unwrap_or(0)
    }
}

/// Immutable, non-empty sequence of display strings.
///
/// Indices wrap: [`Cycle::next_index`] of the last entry is `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    entries: Vec<Entry>,
}

impl Cycle {
    /// Build a cycle from an ordered list of strings.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Empty`] if `strings` yields nothing.
    pub fn new<I, S>(strings: I) -> Result<Self, CycleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<Entry> = strings.into_iter().map(|s| Entry::new(s.into())).collect();
        if entries.is_empty() {
            return Err(CycleError::Empty);
        }
        Ok(Self { entries })
    }

    /// Number of strings in the cycle. Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Full text of entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn text(&self, index: usize) -> &str {
        &self.entries[index].text
    }

    /// Length of entry `index` in graphemes.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn char_count(&self, index: usize) -> usize {
        self.entries[index].ends.len()
    }

    /// The first `count` graphemes of entry `index` (clamped to its length).
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn prefix(&self, index: usize, count: usize) -> &str {
        let entry = &self.entries[index];
        &entry.text[..entry.byte_end(count)]
    }

    /// Grapheme at position `offset` of entry `index`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn grapheme(&self, index: usize, offset: usize) -> Option<&str> {
        let entry = &self.entries[index];
        if offset >= entry.ends.len() {
            return None;
        }
        let start = entry.byte_end(offset);
        Some(&entry.text[start..entry.ends[offset]])
    }

    /// Index that follows `index`, wrapping to 0 after the last entry.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.entries.len()
    }

    /// Iterate over the full texts in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.text.as_str())
    }
}
