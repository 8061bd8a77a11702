//! Test doubles for the HAL seams.

use core::cell::Cell;

use heapless::Vec;

use ceres_hal::{MonotonicClock, SerialPort};

/// Recording serial port.
///
/// Transmitted bursts are appended to `sent`; the inbound assembly buffer
/// is loaded by tests via [`deliver`](MockPort::deliver) before raising
/// `rx_event` on the `LinkIrq` under test.
pub struct MockPort {
    pub sent: Vec<u8, 1024>,
    /// Burst boundaries within `sent` (length of each accepted burst)
    pub bursts: Vec<usize, 32>,
    /// Refuse the next start_transmit call
    pub refuse_next: bool,
    pub armed: u32,
    pub aborted: u32,
    rx: [u8; 64],
    rx_len: usize,
}

impl MockPort {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            bursts: Vec::new(),
            refuse_next: false,
            armed: 0,
            aborted: 0,
            rx: [0; 64],
            rx_len: 0,
        }
    }

    /// Load bytes into the assembly buffer, as the hardware would.
    pub fn deliver(&mut self, bytes: &[u8]) {
        self.rx[..bytes.len()].copy_from_slice(bytes);
        self.rx_len = bytes.len();
    }
}

impl SerialPort for MockPort {
    type Error = ();

    fn start_transmit(&mut self, burst: &[u8]) -> Result<(), ()> {
        if self.refuse_next {
            self.refuse_next = false;
            return Err(());
        }
        self.sent.extend_from_slice(burst).unwrap();
        self.bursts.push(burst.len()).unwrap();
        Ok(())
    }

    fn arm_receive(&mut self) -> Result<(), ()> {
        self.armed += 1;
        self.rx_len = 0;
        Ok(())
    }

    fn abort_receive(&mut self) {
        self.aborted += 1;
    }

    fn read_received(&self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.rx_len);
        out[..n].copy_from_slice(&self.rx[..n]);
        n
    }
}

/// Manually advanced millisecond clock.
pub struct TickClock(Cell<u32>);

impl TickClock {
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl MonotonicClock for TickClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}
