//! Framed Serial Transport Engine
//!
//! Half-duplex, interrupt/DMA-driven link engine for the analyzer's touch
//! display (and, transmit side only, the debug console). It encodes
//! outbound commands, queues them without ever blocking the caller,
//! reassembles fragmented inbound byte streams into validated frames, and
//! recovers autonomously from line errors.
//!
//! # Execution model
//!
//! There is no RTOS. A cooperative main loop calls [`DisplayLink::pump`]
//! and [`DisplayLink::process`] every tick; the hardware raises three
//! asynchronous notifications (transmit complete, receive chunk, line
//! error) which the board's interrupt glue forwards to a [`LinkIrq`]
//! living in a `static`:
//!
//! ```text
//!  main loop                      interrupt context
//!  ─────────                      ─────────────────
//!  link.pump()      ◄── tx_busy ──  LinkIrq::tx_complete()
//!  link.process()   ◄── rx_*    ──  LinkIrq::rx_event(len, now)
//!                   ◄── fault_* ──  LinkIrq::line_error(now)
//! ```
//!
//! The notification handlers are O(1) flag updates; everything that takes
//! time (draining the queue, validating a frame, resetting the listener)
//! happens on the main-loop side. Compound updates that must exclude a
//! handler run inside `critical_section::with`, kept short and bounded.
//!
//! A slow or noisy peer degrades throughput, never availability: queue
//! overflow refuses the whole frame (advisory `bool`), malformed inbound
//! frames are discarded after the debounce window, and line errors reset
//! the listener after a cooldown instead of escalating.

#![no_std]
#![deny(unsafe_code)]

pub mod driver;
pub mod fault;
pub mod irq;
pub mod rx;
pub mod txq;

#[cfg(test)]
pub(crate) mod testutil;

pub use driver::{DisplayLink, LinkStats};
pub use fault::{FaultMonitor, ERROR_COOLDOWN_MS};
pub use irq::LinkIrq;
pub use rx::{RxAssembly, RX_BUFFER_SIZE, RX_DEBOUNCE_MS};
pub use txq::{TxQueue, TX_BURST_SIZE};
