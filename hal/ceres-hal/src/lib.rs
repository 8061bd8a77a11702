//! Ceres Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the transport engine is written
//! against. Chip-specific glue (STM32 HAL wrappers, host-test doubles)
//! implements them; the engine itself never touches a peripheral register.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Transport engine (ceres-link)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ceres-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  board glue   │       │  test doubles │
//! │  (out of tree)│       │  (cfg(test))  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialPort`] - half-duplex burst transmit / chunked receive
//! - [`clock::MonotonicClock`] - free-running millisecond tick

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod serial;

// Re-export key traits at crate root for convenience
pub use clock::MonotonicClock;
pub use serial::{DataBits, Parity, SerialConfig, SerialPort, StopBits};
