//! HID boot keyboard decoding: raw report → key token.

pub mod keyboard;
pub mod keymap;


use core::fmt::{self, Write};

use crate::config::TOKEN_TEXT_CAPACITY;
use crate::error::Error;
use keyboard::KeyboardReport;

/// Rendered text of a [`KeyToken`].
pub type TokenText = heapless::String<TOKEN_TEXT_CAPACITY>;

/// Control keys that render as a word rather than a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NamedKey {
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    CapsLock,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    ArrowRight,
    ArrowLeft,
    ArrowDown,
    ArrowUp,
}

impl NamedKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            NamedKey::Enter => "Enter",
            NamedKey::Escape => "Esc",
            NamedKey::Backspace => "Backspace",
            NamedKey::Tab => "Tab",
            NamedKey::Space => "Space",
            NamedKey::CapsLock => "Caps Lock",
            NamedKey::F1 => "F1",
            NamedKey::F2 => "F2",
            NamedKey::F3 => "F3",
            NamedKey::F4 => "F4",
            NamedKey::F5 => "F5",
            NamedKey::F6 => "F6",
            NamedKey::F7 => "F7",
            NamedKey::F8 => "F8",
            NamedKey::F9 => "F9",
            NamedKey::F10 => "F10",
            NamedKey::F11 => "F11",
            NamedKey::F12 => "F12",
            NamedKey::ArrowRight => "Right Arrow",
            NamedKey::ArrowLeft => "Left Arrow",
            NamedKey::ArrowDown => "Down Arrow",
            NamedKey::ArrowUp => "Up Arrow",
        }
    }
}

/// One resolved key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyToken {
    /// Printable character, shift already applied.
    Char(char),
    /// Control key.
    Named(NamedKey),
    /// Usage code with no table entry (keypad, media, ...).
    Unknown(u8),
}

impl KeyToken {
    /// Text form sent over the bus.
    pub fn render(&self) -> TokenText {
        let mut text = TokenText::new();
        // Longest rendering fits TOKEN_TEXT_CAPACITY.
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(c) => f.write_char(*c),
            KeyToken::Named(key) => f.write_str(key.as_str()),
            KeyToken::Unknown(code) => write!(f, "Unknown (0x{:02x})", code),
        }
    }
}

/// Decode a raw report as received from the USB host stack.
///
/// `Ok(None)` means no key slot was populated (key release, or
/// modifiers only).
pub fn decode(report: &[u8]) -> Result<Option<KeyToken>, Error> {
    KeyboardReport::from_bytes(report).map(|r| r.key_token())
}
