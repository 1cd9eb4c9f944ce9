//! The coarse bold/italic bitmask used by older typeface lookup paths.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct LegacyStyle(u32);

impl LegacyStyle {
    pub const NORMAL: LegacyStyle = LegacyStyle(0);
    pub const BOLD: LegacyStyle = LegacyStyle(0x01);
    pub const ITALIC: LegacyStyle = LegacyStyle(0x02);

    /// Builds a style from raw bits. Bits other than bold and italic are ignored.
    pub const fn from_bits(bits: u32) -> Self {
        LegacyStyle(bits & 0x03)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_bold(self) -> bool {
        self.0 & Self::BOLD.0 != 0
    }

    pub const fn is_italic(self) -> bool {
        self.0 & Self::ITALIC.0 != 0
    }
}

impl BitOr for LegacyStyle {
    type Output = LegacyStyle;

    fn bitor(self, rhs: Self) -> Self::Output {
        LegacyStyle(self.0 | rhs.0)
    }
}

impl BitOrAssign for LegacyStyle {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits_masks_unknown_bits() {
        let style = LegacyStyle::from_bits(0xff);
        assert!(style.is_bold());
        assert!(style.is_italic());
        assert_eq!(style.bits(), 0x03);
    }

    #[test]
    fn test_flags() {
        assert!(!LegacyStyle::NORMAL.is_bold());
        assert!(LegacyStyle::BOLD.is_bold());
        assert!(!LegacyStyle::BOLD.is_italic());
        assert_eq!((LegacyStyle::BOLD | LegacyStyle::ITALIC).bits(), 3);
    }
}
