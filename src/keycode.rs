//! USB HID keyboard usage IDs (usage page 0x07), limited to the keys a hitbox profile can bind.

/// A logical key, as understood by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum KeyCode {
    A = 0x04, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Kc1 = 0x1E, Kc2, Kc3, Kc4, Kc5, Kc6, Kc7, Kc8, Kc9, Kc0,
    Enter = 0x28,
    Escape,
    Backspace,
    Tab,
    Space,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    NonUsHash,
    Semicolon,
    Quote,
    Grave,
    Comma,
    Dot,
    Slash,
    CapsLock,
    F1 = 0x3A, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    PrintScreen = 0x46,
    ScrollLock,
    Pause,
    Insert,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,
    Right,
    Left,
    Down,
    Up,
    LCtrl = 0xE0,
    LShift,
    LAlt,
    LGui,
    RCtrl,
    RShift,
    RAlt,
    RGui,
}

use KeyCode::*;

/// Letter keys in alphabetical order.
pub(crate) const LETTERS: [KeyCode; 26] = [
    A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
];

/// Digit keys, indexed by the digit they type.
pub(crate) const DIGITS: [KeyCode; 10] = [Kc0, Kc1, Kc2, Kc3, Kc4, Kc5, Kc6, Kc7, Kc8, Kc9];

impl KeyCode {
    /// The usage ID sent in a report slot.
    pub const fn usage(self) -> u8 {
        self as u8
    }

    /// Bit in the report's modifier byte, or 0 for an ordinary key.
    pub const fn modifier_bit(self) -> u8 {
        match self {
            LCtrl => 0x01,
            LShift => 0x02,
            LAlt => 0x04,
            LGui => 0x08,
            RCtrl => 0x10,
            RShift => 0x20,
            RAlt => 0x40,
            RGui => 0x80,
            _ => 0,
        }
    }

    pub const fn is_modifier(self) -> bool {
        self.modifier_bit() != 0
    }
}
