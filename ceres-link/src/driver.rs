//! The display link facade.
//!
//! Owns the transmit queue, the receive assembly and the fault monitor,
//! borrows the interrupt-facing [`LinkIrq`], and hides the concurrency
//! discipline from callers. Higher-level code only ever sees the write
//! operations, the periodic entry points and the busy query.

use ceres_hal::{MonotonicClock, SerialPort};
use ceres_protocol::Command;

use crate::fault::FaultMonitor;
use crate::irq::LinkIrq;
use crate::rx::RxAssembly;
use crate::txq::TxQueue;

/// Link health counters, for the diagnostics console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Validated frames handed to the callback
    pub frames_dispatched: u32,
    /// Malformed inbound frames dropped
    pub frames_discarded: u32,
    /// Listener resets performed after line errors
    pub faults_recovered: u32,
}

/// Asynchronous framed-serial driver for one display channel.
///
/// `N` is the transmit FIFO capacity in bytes. The scheduler must invoke
/// [`process`](DisplayLink::process) and [`pump`](DisplayLink::pump) every
/// tick; every other operation returns immediately and never blocks.
///
/// ```ignore
/// static DISPLAY_IRQ: LinkIrq = LinkIrq::new();
///
/// let mut link: DisplayLink<_, _, _, 256> =
///     DisplayLink::new(&DISPLAY_IRQ, port, clock, |frame| ui.dispatch(frame));
/// link.init()?;
/// loop {
///     link.pump();
///     link.process();
///     // ... other cooperative tasks
/// }
/// ```
pub struct DisplayLink<'a, P, C, F, const N: usize>
where
    P: SerialPort,
    C: MonotonicClock,
    F: FnMut(&[u8]),
{
    irq: &'a LinkIrq,
    port: P,
    clock: C,
    on_frame: F,
    tx: TxQueue<N>,
    rx: RxAssembly,
    fault: FaultMonitor,
}

impl<'a, P, C, F, const N: usize> DisplayLink<'a, P, C, F, N>
where
    P: SerialPort,
    C: MonotonicClock,
    F: FnMut(&[u8]),
{
    /// Build the driver around its hardware seams and dispatch callback.
    ///
    /// The callback is invoked synchronously from
    /// [`process`](DisplayLink::process), once per validated inbound frame.
    pub fn new(irq: &'a LinkIrq, port: P, clock: C, on_frame: F) -> Self {
        Self {
            irq,
            port,
            clock,
            on_frame,
            tx: TxQueue::new(),
            rx: RxAssembly::new(),
            fault: FaultMonitor::new(),
        }
    }

    /// Reset all state and arm the receive listener.
    pub fn init(&mut self) -> Result<(), P::Error> {
        self.irq.reset();
        self.tx.clear();
        self.port.arm_receive()
    }

    /// Periodic entry point: fault recovery first, then receive assembly.
    pub fn process(&mut self) {
        let now_ms = self.clock.now_ms();
        if self.fault.process(self.irq, &mut self.port, now_ms) {
            // Cooldown pending; leave the receive path alone
            return;
        }
        self.rx
            .process(self.irq, &mut self.port, now_ms, &mut self.on_frame);
    }

    /// Periodic entry point: drain one burst into the transmit path.
    pub fn pump(&mut self) {
        self.tx.pump(self.irq, &mut self.port);
    }

    /// Switch the active view.
    pub fn write_screen(&mut self, view_id: u16) -> bool {
        self.send(Command::SetScreen(view_id))
    }

    /// Write a signed 16-bit value into a VP.
    pub fn write_int16(&mut self, vp: u16, value: i16) -> bool {
        self.send(Command::WriteInt16 { vp, value })
    }

    /// Write a signed 32-bit value into a VP.
    pub fn write_int32(&mut self, vp: u16, value: i32) -> bool {
        self.send(Command::WriteInt32 { vp, value })
    }

    /// Write text into a string VP, clipped to `max_len` bytes.
    pub fn write_string(&mut self, vp: u16, text: &str, max_len: usize) -> bool {
        self.send(Command::WriteString { vp, text, max_len })
    }

    /// Queue pre-framed bytes untouched (vendor raw commands).
    pub fn write_raw(&mut self, bytes: &[u8]) -> bool {
        self.send(Command::WriteRaw(bytes))
    }

    /// True until the transmit path is fully flushed. Lets multi-step
    /// update sequences serialize dependent writes without overlapping
    /// transmissions.
    pub fn is_busy(&self) -> bool {
        self.tx.is_busy(self.irq)
    }

    /// Link health counters.
    pub fn stats(&self) -> LinkStats {
        LinkStats {
            frames_dispatched: self.rx.dispatched(),
            frames_discarded: self.rx.discarded(),
            faults_recovered: self.fault.resets(),
        }
    }

    /// The underlying port (board glue, diagnostics).
    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    fn send(&mut self, command: Command<'_>) -> bool {
        match command.encode() {
            Ok(bytes) => self.tx.enqueue(&bytes),
            Err(_) => false,
        }
    }
}
