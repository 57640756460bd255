//! # Millisecond Clocks
//!
//! The parser timestamps every commit with a monotonic millisecond counter and
//! derives the age of a value from it. The counter is free-running and expected
//! to wrap, so ages are computed with wrapping arithmetic.

use core::cell::Cell;

/// A monotonic millisecond source.
///
/// Implemented for any `Fn() -> u32`, which makes it easy to plug a HAL timer in:
///
/// ```rust
/// use core::sync::atomic::{AtomicU32, Ordering};
/// use nmea0183_stream::StreamParser;
///
/// // bumped by a timer interrupt
/// static TICKS: AtomicU32 = AtomicU32::new(0);
///
/// let parser = StreamParser::new(|| TICKS.load(Ordering::Relaxed));
/// assert_eq!(parser.chars_processed(), 0);
/// ```
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary, fixed origin.
    fn now_ms(&self) -> u32;
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// A clock that only moves when told to.
///
/// Useful for tests and for hosts that already keep their own time base.
///
/// ```rust
/// use nmea0183_stream::{Clock, ManualClock};
///
/// let clock = ManualClock::new(1_000);
/// clock.advance(250);
/// assert_eq!(clock.now_ms(), 1_250);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    /// Creates a clock reading `now_ms`.
    pub const fn new(now_ms: u32) -> Self {
        ManualClock {
            now: Cell::new(now_ms),
        }
    }

    /// Sets the current reading.
    pub fn set(&self, now_ms: u32) {
        self.now.set(now_ms);
    }

    /// Moves the clock forward, wrapping like a hardware counter.
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Wall-clock backed source measuring time since its creation.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Starts counting from now.
    pub fn new() -> Self {
        StdClock {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        StdClock::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> u32 {
        // truncation keeps the counter wrapping every ~49.7 days
        self.origin.elapsed().as_millis() as u32
    }
}
