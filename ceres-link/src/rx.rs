//! Receive reassembly engine.
//!
//! The peer may spread one logical frame across several hardware delivery
//! events; reacting to the first event would truncate the frame. A chunk
//! event therefore only records length and timestamp, and the frame is
//! considered complete once no further event has arrived for a debounce
//! window tuned to the slowest expected peer inter-byte gap.
//!
//! State machine per assembly: `Armed -> Pending -> (Dispatch | Discard)
//! -> Armed`, one in flight at a time.

use ceres_hal::SerialPort;
use ceres_protocol::{declared_frame_len, is_ack, MAX_FRAME_SIZE};

use crate::irq::LinkIrq;

/// Linear assembly buffer size (one maximal frame)
pub const RX_BUFFER_SIZE: usize = MAX_FRAME_SIZE;

/// Quiet time after the last chunk event before the frame counts as complete
pub const RX_DEBOUNCE_MS: u32 = 30;

/// Reassembles chunk events into validated frames.
pub struct RxAssembly {
    buf: [u8; RX_BUFFER_SIZE],
    dispatched: u32,
    discarded: u32,
}

impl RxAssembly {
    pub const fn new() -> Self {
        Self {
            buf: [0; RX_BUFFER_SIZE],
            dispatched: 0,
            discarded: 0,
        }
    }

    /// Advance the assembly by one scheduler tick.
    ///
    /// Waits out the debounce window, suppresses the acknowledge pattern,
    /// then snapshots, re-arms and validates. On success `on_frame` gets
    /// exactly `3 + LEN` bytes (trailing padding is not forwarded); a
    /// malformed frame is discarded silently - never fatal.
    pub fn process<P, F>(&mut self, irq: &LinkIrq, port: &mut P, now_ms: u32, on_frame: &mut F)
    where
        P: SerialPort,
        F: FnMut(&[u8]),
    {
        if !irq.rx_pending() {
            return;
        }
        if now_ms.wrapping_sub(irq.rx_last_event_ms()) < RX_DEBOUNCE_MS {
            // Still accumulating fragments of a slow sender
            return;
        }
        if irq.tx_busy() {
            // Half duplex: let the outbound burst finish first
            return;
        }

        let len = irq.take_rx().min(RX_BUFFER_SIZE);
        let len = port.read_received(&mut self.buf[..len]);

        // Restart listening before dispatch so no peer bytes are lost
        // while the callback runs.
        let _ = port.arm_receive();

        if is_ack(&self.buf[..len]) {
            return;
        }

        let total = match declared_frame_len(&self.buf[..len]) {
            Some(total) if len >= total => total,
            _ => {
                // Noise, or a frame shorter than its declared length
                self.discarded += 1;
                #[cfg(feature = "defmt")]
                defmt::warn!("rx: discarding malformed frame ({} bytes)", len);
                return;
            }
        };

        self.dispatched += 1;
        on_frame(&self.buf[..total]);
    }

    /// Frames handed to the callback since init.
    pub fn dispatched(&self) -> u32 {
        self.dispatched
    }

    /// Malformed inbound frames dropped since init.
    pub fn discarded(&self) -> u32 {
        self.discarded
    }
}

impl Default for RxAssembly {
    fn default() -> Self {
        Self::new()
    }
}
