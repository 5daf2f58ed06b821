#![forbid(unsafe_code)]

//! Fixed step delays of the typewriter effect.

use std::time::Duration;

/// Delay between two typed characters.
pub const TYPING_DELAY: Duration = Duration::from_millis(200);

/// Delay between two erased characters.
pub const ERASING_DELAY: Duration = Duration::from_millis(100);

/// Pause on a fully typed string before erasing starts.
pub const NEW_TEXT_DELAY: Duration = Duration::from_millis(2000);

/// Pause on an empty surface before the next string starts typing.
pub const NEXT_TEXT_DELAY: Duration = TYPING_DELAY.saturating_add(Duration::from_millis(1100));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_text_delay_is_1300ms() {
        assert_eq!(NEXT_TEXT_DELAY, Duration::from_millis(1300));
    }

    #[test]
    fn erase_is_faster_than_typing() {
        assert!(ERASING_DELAY < TYPING_DELAY);
        assert!(NEW_TEXT_DELAY > NEXT_TEXT_DELAY);
    }
}
