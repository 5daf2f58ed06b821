#![forbid(unsafe_code)]

//! Debug tracing controlled by an environment variable.
//!
//! Set `TYPECYCLE_DEBUG_TRACE=1` before launching to get timestamped lines on
//! stderr. When unset, each call site costs one static bool load.
//!
//! ```bash
//! TYPECYCLE_DEBUG_TRACE=1 typecycle 2>trace.log
//! ```

use std::sync::LazyLock;
use std::time::Instant;

static DEBUG_TRACE_ENABLED: LazyLock<bool> =
    LazyLock::new(|| flag_enabled(std::env::var("TYPECYCLE_DEBUG_TRACE").ok().as_deref()));

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Whether debug tracing is enabled.
#[inline]
pub fn is_enabled() -> bool {
    *DEBUG_TRACE_ENABLED
}

/// `1` and `true` (any case) enable tracing; anything else, or unset, does not.
fn flag_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Milliseconds since the first trace call.
#[inline]
pub fn elapsed_ms() -> u64 {
    START_TIME.elapsed().as_millis() as u64
}

/// Print a timestamped line to stderr when `TYPECYCLE_DEBUG_TRACE=1`.
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if $crate::debug_trace::is_enabled() {
            eprintln!(
                "[TYPECYCLE {:>8}ms] {}",
                $crate::debug_trace::elapsed_ms(),
                format_args!($($arg)*)
            );
        }
    };
}
