//! Guard intervals for relay settling and trigger debounce.
//!
//! These values come from bench measurements of the relays and of the torch
//! trigger (a press bounces 11 to 15 times over up to ~235 ms, a release
//! barely bounces). They are hardware timing contracts, not settings.
//!
//! | Interval | Value | Applied |
//! |----------|-------|---------|
//! | [`SETTLE_MS`] | 100 ms | after every relay actuation |
//! | [`SENSE_SETTLE_MS`] | 1000 ms | after relay4 connects the sense line |
//! | [`BOUNCE_GUARD_MS`] | 100 ms | after a spot release is observed |
//! | [`RELEASE_POLL_MS`] | 1 ms | between sense-line samples while waiting for release |

/// Wait after a relay actuation before relying on its new position.
pub const SETTLE_MS: u32 = 100;

/// Wait after energizing relay4.
///
/// Connecting the sense line produces a voltage transient; edge detection
/// stays off until it has decayed.
pub const SENSE_SETTLE_MS: u32 = 1000;

/// Wait after the trigger release is seen at the end of a spot weld.
pub const BOUNCE_GUARD_MS: u32 = 100;

/// Sampling period of the release wait.
pub const RELEASE_POLL_MS: u32 = 1;

/// Convert operator seconds to a wait in milliseconds.
///
/// Rounds to the nearest millisecond. Zero, negative, and NaN inputs wait
/// 0 ms; very large inputs saturate at `u32::MAX`.
///
/// # Examples
///
/// ```
/// use yag_trigger::timing::seconds_to_ms;
///
/// assert_eq!(seconds_to_ms(0.2), 200);
/// assert_eq!(seconds_to_ms(1.5), 1500);
/// assert_eq!(seconds_to_ms(-3.0), 0);
/// ```
pub fn seconds_to_ms(seconds: f64) -> u32 {
    if !(seconds > 0.0) {
        return 0;
    }
    // `as` saturates, which covers infinity too
    (seconds * 1000.0 + 0.5) as u32
}
