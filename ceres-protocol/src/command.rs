//! Outbound command encoding and frame parsing.
//!
//! Every command the firmware sends is a CMD_WRITE frame targeting a VP
//! address; the payload shape depends on what lives at that address. The
//! inverse mapping ([`Decoded`]) infers the shape from the payload length,
//! which is how the display itself interprets writes.

use crate::frame::{
    declared_frame_len, FrameBytes, FrameError, CMD_VALUE_CHANGED, CMD_WRITE, FRAME_OVERHEAD,
    MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, SYNC0, SYNC1,
};

/// VP address of the view selector register
pub const VP_VIEW_SELECT: u16 = 0x0084;

/// Magic prefix the view selector register expects before the view id
pub const VIEW_MAGIC: [u8; 2] = [0x5A, 0x01];

/// Commands the firmware sends to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Switch the active view
    SetScreen(u16),
    /// Write a signed 16-bit value into a VP
    WriteInt16 { vp: u16, value: i16 },
    /// Write a signed 32-bit value into a VP
    WriteInt32 { vp: u16, value: i32 },
    /// Write text into a string VP, clipped to `max_len` bytes
    WriteString {
        vp: u16,
        text: &'a str,
        max_len: usize,
    },
    /// Pre-framed bytes passed through untouched (vendor raw commands)
    WriteRaw(&'a [u8]),
}

impl<'a> Command<'a> {
    /// Encode this command into wire bytes.
    ///
    /// The produced frame always satisfies `total_size == 3 + LEN`. Strings
    /// are clipped, never refused; only a raw buffer that cannot fit the
    /// frame size yields [`FrameError::Oversize`].
    pub fn encode(&self) -> Result<FrameBytes, FrameError> {
        match *self {
            Command::SetScreen(id) => {
                let id = id.to_be_bytes();
                write_frame(VP_VIEW_SELECT, &[VIEW_MAGIC[0], VIEW_MAGIC[1], id[0], id[1]])
            }
            Command::WriteInt16 { vp, value } => write_frame(vp, &value.to_be_bytes()),
            Command::WriteInt32 { vp, value } => write_frame(vp, &value.to_be_bytes()),
            Command::WriteString { vp, text, max_len } => {
                let bytes = text.as_bytes();
                let clipped = bytes.len().min(max_len).min(MAX_PAYLOAD_SIZE);
                write_frame(vp, &bytes[..clipped])
            }
            Command::WriteRaw(bytes) => {
                if bytes.len() > MAX_FRAME_SIZE {
                    return Err(FrameError::Oversize);
                }
                let mut out = FrameBytes::new();
                out.extend_from_slice(bytes).map_err(|_| FrameError::Oversize)?;
                Ok(out)
            }
        }
    }
}

/// Build a CMD_WRITE frame around `payload` for the given VP.
fn write_frame(vp: u16, payload: &[u8]) -> Result<FrameBytes, FrameError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(FrameError::Oversize);
    }
    let vp = vp.to_be_bytes();
    let mut out = FrameBytes::new();
    // LEN counts CMD + ADDRESS + PAYLOAD
    let header = [SYNC0, SYNC1, (3 + payload.len()) as u8, CMD_WRITE, vp[0], vp[1]];
    out.extend_from_slice(&header).map_err(|_| FrameError::Oversize)?;
    out.extend_from_slice(payload).map_err(|_| FrameError::Oversize)?;
    Ok(out)
}

/// A frame parsed back into its logical content.
///
/// Payload width decides the numeric variant (2 bytes = int16, 4 bytes =
/// int32) the same way the display resolves writes; anything else comes
/// back as raw bytes. Borrows from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded<'a> {
    /// View selector write
    SetScreen(u16),
    /// 16-bit VP write
    WriteInt16 { vp: u16, value: i16 },
    /// 32-bit VP write
    WriteInt32 { vp: u16, value: i32 },
    /// VP write with a payload of any other width (strings, raw data)
    WriteBytes { vp: u16, data: &'a [u8] },
    /// Display-originated value change (touch input)
    ValueChanged { vp: u16, data: &'a [u8] },
}

impl<'a> Decoded<'a> {
    /// Parse one frame from the start of `buf`.
    ///
    /// `buf` may extend past the declared frame; the excess is ignored.
    /// A buffer shorter than the declared frame is [`FrameError::Truncated`].
    pub fn parse(buf: &'a [u8]) -> Result<Self, FrameError> {
        let total = declared_frame_len(buf).ok_or(FrameError::InvalidHeader)?;
        if buf.len() < total {
            return Err(FrameError::Truncated);
        }
        if total < FRAME_OVERHEAD + 3 {
            // LEN must at least cover CMD + ADDRESS
            return Err(FrameError::InvalidHeader);
        }
        let frame = &buf[..total];
        let cmd = frame[3];
        let vp = u16::from_be_bytes([frame[4], frame[5]]);
        let data = &frame[6..];

        match cmd {
            CMD_WRITE => Ok(match data {
                [m0, m1, hi, lo] if vp == VP_VIEW_SELECT && [*m0, *m1] == VIEW_MAGIC => {
                    Decoded::SetScreen(u16::from_be_bytes([*hi, *lo]))
                }
                [hi, lo] => Decoded::WriteInt16 {
                    vp,
                    value: i16::from_be_bytes([*hi, *lo]),
                },
                [b0, b1, b2, b3] => Decoded::WriteInt32 {
                    vp,
                    value: i32::from_be_bytes([*b0, *b1, *b2, *b3]),
                },
                _ => Decoded::WriteBytes { vp, data },
            }),
            CMD_VALUE_CHANGED => Ok(Decoded::ValueChanged { vp, data }),
            _ => Err(FrameError::UnknownCommand),
        }
    }
}
