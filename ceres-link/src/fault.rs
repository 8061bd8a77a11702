//! Fault recovery monitor.
//!
//! Line errors are absorbed, never escalated: the error notification arms
//! a cooldown, and once it elapses the listener is reset from main-loop
//! context. Resetting immediately from the error handler would risk
//! re-entering the same error while the line is still noisy. Repeated
//! errors simply re-arm the cooldown; a permanently noisy line yields a
//! reset loop at a fixed cadence.

use ceres_hal::SerialPort;

use crate::irq::LinkIrq;

/// Quiet time after a line error before the listener reset runs
pub const ERROR_COOLDOWN_MS: u32 = 100;

/// Drives the cooldown-then-reset sequence.
pub struct FaultMonitor {
    resets: u32,
}

impl FaultMonitor {
    pub const fn new() -> Self {
        Self { resets: 0 }
    }

    /// Advance the monitor by one scheduler tick.
    ///
    /// Returns `true` while a cooldown is pending, in which case receive
    /// processing must stay suppressed. Performs exactly one abort+re-arm
    /// per error once the cooldown elapses.
    pub fn process<P: SerialPort>(&mut self, irq: &LinkIrq, port: &mut P, now_ms: u32) -> bool {
        if !irq.fault_pending() {
            return false;
        }
        if now_ms.wrapping_sub(irq.fault_at_ms()) < ERROR_COOLDOWN_MS {
            return true;
        }

        port.abort_receive();
        let _ = port.arm_receive();
        irq.clear_fault();
        self.resets += 1;
        #[cfg(feature = "defmt")]
        defmt::warn!("link: listener reset after line error ({} total)", self.resets);
        false
    }

    /// Listener resets performed since init.
    pub fn resets(&self) -> u32 {
        self.resets
    }
}

impl Default for FaultMonitor {
    fn default() -> Self {
        Self::new()
    }
}
