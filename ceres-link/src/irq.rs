//! Interrupt-facing link state.
//!
//! The only state touched from both notification and main-loop context.
//! All fields are single-word atomics so the handlers stay O(1) and never
//! take a lock; the main-loop side uses `critical_section::with` where a
//! read-modify-write must exclude a handler.

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

/// Shared flags between the interrupt glue and the transport engine.
///
/// Board glue allocates one per channel in a `static` and forwards the
/// hardware notifications to [`tx_complete`](LinkIrq::tx_complete),
/// [`rx_event`](LinkIrq::rx_event) and [`line_error`](LinkIrq::line_error).
/// The [`DisplayLink`](crate::DisplayLink) facade borrows the same instance.
#[derive(Debug)]
pub struct LinkIrq {
    /// A transmit burst is in flight
    tx_busy: AtomicBool,
    /// A receive chunk awaits debounce and dispatch
    rx_pending: AtomicBool,
    /// Total assembled length reported by the latest chunk event
    rx_len: AtomicU16,
    /// Clock reading at the latest chunk event
    rx_last_event_ms: AtomicU32,
    /// A line error awaits the cooldown reset
    fault_pending: AtomicBool,
    /// Clock reading when the line error was raised
    fault_at_ms: AtomicU32,
}

impl LinkIrq {
    pub const fn new() -> Self {
        Self {
            tx_busy: AtomicBool::new(false),
            rx_pending: AtomicBool::new(false),
            rx_len: AtomicU16::new(0),
            rx_last_event_ms: AtomicU32::new(0),
            fault_pending: AtomicBool::new(false),
            fault_at_ms: AtomicU32::new(0),
        }
    }

    /// Transmit-complete notification. Interrupt context, O(1).
    ///
    /// Only clears the busy flag; the next [`pump`](crate::DisplayLink::pump)
    /// hands the following burst to the hardware. Keeping the handler free
    /// of hardware calls bounds the interrupt-context work.
    pub fn tx_complete(&self) {
        self.tx_busy.store(false, Ordering::Release);
    }

    /// Receive-chunk notification. Interrupt context, O(1).
    ///
    /// `len` is the total assembled length so far; a later chunk of the
    /// same frame simply overwrites length and timestamp (last event wins,
    /// the hardware appends within one linear buffer). The listener stays
    /// armed, so no event is ever lost while debounce is pending.
    pub fn rx_event(&self, len: u16, now_ms: u32) {
        self.rx_len.store(len, Ordering::Relaxed);
        self.rx_last_event_ms.store(now_ms, Ordering::Relaxed);
        self.rx_pending.store(true, Ordering::Release);
    }

    /// Line-error notification (overrun/framing/noise). Interrupt context.
    ///
    /// Discards any pending reassembly and arms the cooldown. The listener
    /// reset itself is deferred to
    /// [`FaultMonitor::process`](crate::fault::FaultMonitor::process):
    /// resetting from error context risks re-entering the same error while
    /// the line is still noisy.
    pub fn line_error(&self, now_ms: u32) {
        self.rx_pending.store(false, Ordering::Relaxed);
        self.fault_at_ms.store(now_ms, Ordering::Relaxed);
        self.fault_pending.store(true, Ordering::Release);
    }

    /// Clear every flag (driver init).
    pub(crate) fn reset(&self) {
        self.tx_busy.store(false, Ordering::Relaxed);
        self.rx_pending.store(false, Ordering::Relaxed);
        self.rx_len.store(0, Ordering::Relaxed);
        self.fault_pending.store(false, Ordering::Release);
    }

    pub(crate) fn tx_busy(&self) -> bool {
        self.tx_busy.load(Ordering::Acquire)
    }

    /// Claim the transmitter for one burst.
    ///
    /// Double-checks under a critical section so the claim cannot race the
    /// completion handler of a burst that is just finishing.
    pub(crate) fn claim_tx(&self) -> bool {
        critical_section::with(|_| {
            if self.tx_busy.load(Ordering::Relaxed) {
                false
            } else {
                self.tx_busy.store(true, Ordering::Relaxed);
                true
            }
        })
    }

    /// Roll back a claim after the hardware refused the burst.
    pub(crate) fn release_tx(&self) {
        self.tx_busy.store(false, Ordering::Release);
    }

    pub(crate) fn rx_pending(&self) -> bool {
        self.rx_pending.load(Ordering::Acquire)
    }

    pub(crate) fn rx_last_event_ms(&self) -> u32 {
        self.rx_last_event_ms.load(Ordering::Relaxed)
    }

    /// Snapshot the assembled length and clear the pending flag, excluding
    /// a concurrent [`rx_event`](LinkIrq::rx_event): without the critical
    /// section a chunk landing between the two operations would be lost.
    pub(crate) fn take_rx(&self) -> usize {
        critical_section::with(|_| {
            let len = self.rx_len.load(Ordering::Relaxed) as usize;
            self.rx_pending.store(false, Ordering::Relaxed);
            len
        })
    }

    pub(crate) fn fault_pending(&self) -> bool {
        self.fault_pending.load(Ordering::Acquire)
    }

    pub(crate) fn fault_at_ms(&self) -> u32 {
        self.fault_at_ms.load(Ordering::Relaxed)
    }

    /// Leave the fault state, discarding any chunk recorded during the
    /// cooldown (it belongs to the pre-reset listen window).
    pub(crate) fn clear_fault(&self) {
        self.rx_pending.store(false, Ordering::Relaxed);
        self.fault_pending.store(false, Ordering::Release);
    }
}

impl Default for LinkIrq {
    fn default() -> Self {
        Self::new()
    }
}
