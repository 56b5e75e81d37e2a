//! US keyboard layout: which key (and whether shift) produces a given character.

use crate::error::HidError;
use crate::hid::Keyboard;
use crate::keycode::{KeyCode, KeyCode::*, DIGITS, LETTERS};

/// One key, optionally with left shift held around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keystroke {
    pub code: KeyCode,
    pub shift: bool,
}

const fn plain(code: KeyCode) -> Option<Keystroke> {
    Some(Keystroke { code, shift: false })
}

const fn shifted(code: KeyCode) -> Option<Keystroke> {
    Some(Keystroke { code, shift: true })
}

/// The keystroke that types `ch`, or `None` outside printable ASCII and the handful of control
/// characters that have their own key.
pub const fn keystroke(ch: char) -> Option<Keystroke> {
    match ch {
        'a'..='z' => plain(LETTERS[ch as usize - 'a' as usize]),
        'A'..='Z' => shifted(LETTERS[ch as usize - 'A' as usize]),
        '0'..='9' => plain(DIGITS[ch as usize - '0' as usize]),
        '\n' => plain(Enter),
        '\t' => plain(Tab),
        '\x08' => plain(Backspace),
        '\x1b' => plain(Escape),
        ' ' => plain(Space),
        '!' => shifted(Kc1),
        '@' => shifted(Kc2),
        '#' => shifted(Kc3),
        '$' => shifted(Kc4),
        '%' => shifted(Kc5),
        '^' => shifted(Kc6),
        '&' => shifted(Kc7),
        '*' => shifted(Kc8),
        '(' => shifted(Kc9),
        ')' => shifted(Kc0),
        '-' => plain(Minus),
        '_' => shifted(Minus),
        '=' => plain(Equal),
        '+' => shifted(Equal),
        '[' => plain(LeftBracket),
        '{' => shifted(LeftBracket),
        ']' => plain(RightBracket),
        '}' => shifted(RightBracket),
        '\\' => plain(Backslash),
        '|' => shifted(Backslash),
        ';' => plain(Semicolon),
        ':' => shifted(Semicolon),
        '\'' => plain(Quote),
        '"' => shifted(Quote),
        '`' => plain(Grave),
        '~' => shifted(Grave),
        ',' => plain(Comma),
        '<' => shifted(Comma),
        '.' => plain(Dot),
        '>' => shifted(Dot),
        '/' => plain(Slash),
        '?' => shifted(Slash),
        _ => None,
    }
}

/// Type `text` one character at a time: shift down if needed, key down, key up, shift up.
///
/// Stops at the first character without a keystroke. Every key that was pressed is released
/// again even when delivery fails part way, and the first error is returned.
pub async fn type_text<K: Keyboard>(keyboard: &mut K, text: &str) -> Result<(), HidError> {
    for ch in text.chars() {
        let stroke = keystroke(ch).ok_or(HidError::Untypeable(ch))?;

        let mut result = Ok(());
        if stroke.shift {
            result = result.and(keyboard.press(LShift).await);
        }
        result = result.and(keyboard.press(stroke.code).await);
        result = result.and(keyboard.release(stroke.code).await);
        if stroke.shift {
            result = result.and(keyboard.release(LShift).await);
        }
        result?;
    }
    Ok(())
}
