// timefn - monotonic timer used for the end-of-run throughput report.
//
// std::time::Instant is monotonic and thread-safe on every supported
// platform; the wrapper keeps call sites independent of it.

use std::time::Instant;

/// Nanosecond duration.
pub type DurationNs = u64;

/// Opaque timestamp container. The absolute value is not meaningful;
/// use it only to compute a duration between two measurements.
#[derive(Clone, Copy, Debug)]
pub struct TimeT {
    pub(crate) t: Instant,
}

/// Returns current monotonic timestamp.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Returns the nanosecond duration between `clock_start` and `clock_end`.
pub fn span_ns(clock_start: TimeT, clock_end: TimeT) -> DurationNs {
    clock_end
        .t
        .duration_since(clock_start.t)
        .as_nanos() as DurationNs
}

/// Measures nanoseconds elapsed since `clock_start`.
pub fn clock_span_ns(clock_start: TimeT) -> DurationNs {
    span_ns(clock_start, get_time())
}
