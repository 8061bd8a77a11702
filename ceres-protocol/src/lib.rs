//! Touch Display Wire Protocol
//!
//! This crate defines the binary frame format spoken between the analyzer
//! main board and its DGUS-style touch display. The display exposes
//! addressable value slots (VPs); the firmware writes measurement values
//! and view selections into them and receives touch-originated value
//! changes back.
//!
//! # Protocol Overview
//!
//! All frames share one shape:
//! ```text
//! ┌───────┬───────┬─────┬─────┬─────────┬─────────────┐
//! │ SYNC0 │ SYNC1 │ LEN │ CMD │ ADDRESS │ PAYLOAD     │
//! │ 0x5A  │ 0xA5  │ 1B  │ 1B  │ 2B (BE) │ 0..58B      │
//! └───────┴───────┴─────┴─────┴─────────┴─────────────┘
//! ```
//!
//! `LEN` counts every byte after itself (CMD + ADDRESS + PAYLOAD), so a
//! complete frame is always `3 + LEN` bytes. All multi-byte numerics are
//! big-endian. The codec here is pure: no I/O, no state, no buffer
//! ownership beyond the call.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;

pub use command::{Command, Decoded, VIEW_MAGIC, VP_VIEW_SELECT};
pub use frame::{
    declared_frame_len, is_ack, FrameBytes, FrameError, ACK_FRAME, CMD_VALUE_CHANGED, CMD_WRITE,
    MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, SYNC0, SYNC1,
};
