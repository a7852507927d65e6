//! Down-counter arithmetic.
//!
//! The busy-wait itself is [`CounterSource::wait_ms`](crate::hal::CounterSource::wait_ms);
//! this module holds the wrap correction it relies on.

/// Ticks that passed between two readings of a down-counter that wraps
/// from 0 back to `max`.
///
/// When `curr` is above `prev` the counter wrapped once: it ran down from
/// `prev` to 0, jumped to `max`, then ran down to `curr`. That is
/// `prev + (max - curr) + 1` ticks.
///
/// ```
/// use exige_api::timing::elapsed_ticks;
///
/// assert_eq!(elapsed_ticks(500, 200, 65535), 300);
/// assert_eq!(elapsed_ticks(10, 65530, 65535), 16);
/// ```
///
/// The wrap branch never overflows: `curr > prev` implies
/// `prev + (max - curr) < max`.
pub const fn elapsed_ticks(prev: u32, curr: u32, max: u32) -> u32 {
    if prev >= curr {
        prev - curr
    } else {
        prev + (max - curr) + 1
    }
}

/// Milliseconds represented by `ticks` at `ticks_per_ms`, rounded down.
pub const fn ticks_to_ms(ticks: u64, ticks_per_ms: u32) -> u64 {
    ticks / ticks_per_ms as u64
}
