//! Frame-level constants and header validation.
//!
//! Frame format:
//! - SYNC0, SYNC1 (2 bytes): 0x5A 0xA5 synchronization pair
//! - LEN (1 byte): count of all bytes after itself (CMD + ADDRESS + PAYLOAD)
//! - CMD (1 byte): 0x82 register write, 0x83 display-originated value change
//! - ADDRESS (2 bytes): big-endian VP address
//! - PAYLOAD: command-specific data

use heapless::Vec;

/// First synchronization byte
pub const SYNC0: u8 = 0x5A;
/// Second synchronization byte
pub const SYNC1: u8 = 0xA5;

/// Write a value into a display VP
pub const CMD_WRITE: u8 = 0x82;
/// Display-originated notification that a VP changed (touch input)
pub const CMD_VALUE_CHANGED: u8 = 0x83;

/// Maximum complete frame size (matches the receive buffer on the wire side)
pub const MAX_FRAME_SIZE: usize = 64;

/// Bytes preceding the LEN-counted region (SYNC0 + SYNC1 + LEN)
pub const FRAME_OVERHEAD: usize = 3;

/// Maximum payload size (frame minus sync pair, LEN, CMD and ADDRESS)
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - FRAME_OVERHEAD - 3;

/// The display's write acknowledgement: CMD_WRITE followed by "OK".
/// Pure flow-control noise, never dispatched to the application.
pub const ACK_FRAME: [u8; 6] = [SYNC0, SYNC1, 0x03, CMD_WRITE, 0x4F, 0x4B];

/// A complete encoded frame
pub type FrameBytes = Vec<u8, MAX_FRAME_SIZE>;

/// Errors that can occur during frame encoding or parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum frame size
    Oversize,
    /// Missing or wrong sync pair, or fewer than 4 bytes
    InvalidHeader,
    /// Buffer ends before the declared length
    Truncated,
    /// CMD byte is not one this protocol defines
    UnknownCommand,
}

/// Validate a frame header and return the declared total frame size.
///
/// Returns `Some(3 + LEN)` when the buffer starts with the sync pair and is
/// at least 4 bytes long (LEN and CMD present); `None` otherwise. The buffer
/// may be shorter than the declared size - completeness is the caller's
/// check, this only reads the header.
pub fn declared_frame_len(buf: &[u8]) -> Option<usize> {
    if buf.len() < 4 || buf[0] != SYNC0 || buf[1] != SYNC1 {
        return None;
    }
    Some(FRAME_OVERHEAD + buf[2] as usize)
}

/// True if `buf` is exactly the display's write acknowledgement.
pub fn is_ack(buf: &[u8]) -> bool {
    buf == ACK_FRAME.as_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_accepts_sync_pair() {
        assert_eq!(declared_frame_len(&[0x5A, 0xA5, 0x05, 0x82]), Some(8));
    }

    #[test]
    fn header_rejects_bad_sync() {
        assert_eq!(declared_frame_len(&[0xA5, 0x5A, 0x05, 0x82]), None);
        assert_eq!(declared_frame_len(&[0x00, 0xA5, 0x05, 0x82]), None);
    }

    #[test]
    fn header_rejects_short_buffer() {
        assert_eq!(declared_frame_len(&[0x5A, 0xA5, 0x05]), None);
    }

    #[test]
    fn header_tolerates_trailing_padding() {
        // Declared size can be smaller than the delivered buffer
        let buf = [0x5A, 0xA5, 0x03, 0x82, 0x4F, 0x4B, 0x00, 0x00];
        assert_eq!(declared_frame_len(&buf), Some(6));
    }

    #[test]
    fn ack_pattern_is_exact() {
        assert!(is_ack(&[0x5A, 0xA5, 0x03, 0x82, 0x4F, 0x4B]));
        // One byte off is a real frame, not an ack
        assert!(!is_ack(&[0x5A, 0xA5, 0x03, 0x82, 0x4F, 0x4C]));
        // Trailing bytes disqualify the exact match
        assert!(!is_ack(&[0x5A, 0xA5, 0x03, 0x82, 0x4F, 0x4B, 0x00]));
    }
}
