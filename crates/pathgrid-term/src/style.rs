//! Glyph styling: [`Color`], [`AttrMask`], [`Style`].

use std::ops::BitOr;

/// An RGB colour packed as `0x00RRGGBB`, or the terminal default.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(Option<u32>);

impl Color {
    /// The terminal's own foreground/background.
    pub const DEFAULT: Self = Self(None);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Some(((r as u32) << 16) | ((g as u32) << 8) | (b as u32)))
    }

    /// `(r, g, b)`, or `None` for [`Color::DEFAULT`].
    #[inline]
    pub const fn rgb(self) -> Option<(u8, u8, u8)> {
        match self.0 {
            Some(v) => Some(((v >> 16) as u8, (v >> 8) as u8, v as u8)),
            None => None,
        }
    }
}

/// Bitmask of text attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct AttrMask(pub u8);

impl AttrMask {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const DIM: Self = Self(1 << 1);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AttrMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Foreground, background and attributes of a glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: AttrMask,
}

impl Style {
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    pub const fn with_attrs(mut self, attrs: AttrMask) -> Self {
        self.attrs = attrs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_components() {
        let c = Color::from_rgb(0x0f, 0x17, 0x2a);
        assert_eq!(c.rgb(), Some((0x0f, 0x17, 0x2a)));
        assert_eq!(Color::DEFAULT.rgb(), None);
    }

    #[test]
    fn black_is_not_default() {
        assert_ne!(Color::from_rgb(0, 0, 0), Color::DEFAULT);
    }

    #[test]
    fn attr_mask() {
        let m = AttrMask::BOLD;
        assert!(m.contains(AttrMask::BOLD));
        assert!(!m.contains(AttrMask::DIM));
        assert!((m | AttrMask::DIM).contains(AttrMask::DIM));
        assert!(AttrMask::NONE.is_empty());
    }
}
