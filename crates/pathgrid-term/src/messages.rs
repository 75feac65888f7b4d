//! Input events: [`Msg`], [`Key`], [`MouseAction`], [`ModMask`].

use std::time::Instant;

use pathgrid_core::Coord;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Space,
    Backspace,
    /// A printable character.
    Char(char),
}

/// Modifier keys held during an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Left button pressed.
    Main,
    /// Right button pressed.
    Secondary,
    /// Middle button pressed.
    Auxiliary,
    /// Moved with the left button held.
    Drag,
    Release,
}

/// An input message delivered to a [`Model`](crate::Model).
#[derive(Clone, Debug)]
pub enum Msg {
    KeyDown {
        key: Key,
        modifiers: ModMask,
    },
    /// A mouse event at a screen `(row, col)`.
    Mouse {
        action: MouseAction,
        pos: Coord,
        modifiers: ModMask,
    },
    /// The terminal was resized.
    Screen { width: u16, height: u16 },
    /// Sent by the app loop once per iteration with the current time.
    Tick(Instant),
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
}

impl Msg {
    /// A `KeyDown` with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: ModMask::NONE,
        }
    }

    /// A mouse event with no modifiers.
    pub fn mouse(action: MouseAction, pos: Coord) -> Self {
        Self::Mouse {
            action,
            pos,
            modifiers: ModMask::NONE,
        }
    }
}
