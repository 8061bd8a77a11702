//! Monotonic time source abstraction

/// Free-running millisecond tick.
///
/// The counter wraps at `u32::MAX`; consumers compare instants with
/// `wrapping_sub`, so intervals up to ~24 days are handled correctly
/// across the wrap.
pub trait MonotonicClock {
    /// Milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u32;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
