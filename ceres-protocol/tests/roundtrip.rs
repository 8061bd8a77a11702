//! Property tests for the codec: whatever the firmware encodes, the
//! display-side interpretation recovers.

use ceres_protocol::{Command, Decoded, VP_VIEW_SELECT};
use proptest::prelude::*;

proptest! {
    #[test]
    fn int16_roundtrip(vp in 0u16..=0xFFFF, value in i16::MIN..=i16::MAX) {
        // The view selector address has its own payload shape
        prop_assume!(vp != VP_VIEW_SELECT);
        let bytes = Command::WriteInt16 { vp, value }.encode().unwrap();
        prop_assert_eq!(Decoded::parse(&bytes).unwrap(), Decoded::WriteInt16 { vp, value });
    }

    #[test]
    fn int32_roundtrip(vp in 0u16..=0xFFFF, value in i32::MIN..=i32::MAX) {
        prop_assume!(vp != VP_VIEW_SELECT);
        let bytes = Command::WriteInt32 { vp, value }.encode().unwrap();
        prop_assert_eq!(Decoded::parse(&bytes).unwrap(), Decoded::WriteInt32 { vp, value });
    }

    #[test]
    fn screen_roundtrip(id in 0u16..=0xFFFF) {
        let bytes = Command::SetScreen(id).encode().unwrap();
        prop_assert_eq!(Decoded::parse(&bytes).unwrap(), Decoded::SetScreen(id));
    }

    #[test]
    fn string_roundtrip(text in "[ -~]{5,40}", max_len in 5usize..=40) {
        let bytes = Command::WriteString { vp: 0x2200, text: &text, max_len }.encode().unwrap();
        let clipped = &text.as_bytes()[..text.len().min(max_len)];
        // Frames whose payload happens to be 2 or 4 bytes decode as numerics;
        // everything else must come back as the clipped text
        if clipped.len() != 2 && clipped.len() != 4 {
            prop_assert_eq!(
                Decoded::parse(&bytes).unwrap(),
                Decoded::WriteBytes { vp: 0x2200, data: clipped }
            );
        }
        // The declared length always matches the clipped payload
        prop_assert_eq!(bytes[2] as usize, 3 + clipped.len());
    }
}
