//! Usage-code → key token table (US layout, plus the non-US `#~` key).
//!
//! One static table shared by every transport. Index 0 is usage 0x04
//! (`a`); the last entry is usage 0x52 (Up Arrow).

use super::{KeyToken, NamedKey};

#[derive(Clone, Copy)]
enum Entry {
    /// Printable key: unshifted / shifted character.
    Printable(char, char),
    /// Control key, same token with or without shift.
    Named(NamedKey),
}

use Entry::{Named, Printable};

/// First usage code covered by [`TABLE`].
pub const FIRST_USAGE: u8 = 0x04;

/// Last usage code covered by [`TABLE`].
pub const LAST_USAGE: u8 = 0x52;

#[rustfmt::skip]
static TABLE: [Option<Entry>; (LAST_USAGE - FIRST_USAGE + 1) as usize] = [
    // 0x04 - 0x1D: letters
    Some(Printable('a', 'A')), Some(Printable('b', 'B')), Some(Printable('c', 'C')),
    Some(Printable('d', 'D')), Some(Printable('e', 'E')), Some(Printable('f', 'F')),
    Some(Printable('g', 'G')), Some(Printable('h', 'H')), Some(Printable('i', 'I')),
    Some(Printable('j', 'J')), Some(Printable('k', 'K')), Some(Printable('l', 'L')),
    Some(Printable('m', 'M')), Some(Printable('n', 'N')), Some(Printable('o', 'O')),
    Some(Printable('p', 'P')), Some(Printable('q', 'Q')), Some(Printable('r', 'R')),
    Some(Printable('s', 'S')), Some(Printable('t', 'T')), Some(Printable('u', 'U')),
    Some(Printable('v', 'V')), Some(Printable('w', 'W')), Some(Printable('x', 'X')),
    Some(Printable('y', 'Y')), Some(Printable('z', 'Z')),
    // 0x1E - 0x27: digit row
    Some(Printable('1', '!')), Some(Printable('2', '@')), Some(Printable('3', '#')),
    Some(Printable('4', '$')), Some(Printable('5', '%')), Some(Printable('6', '^')),
    Some(Printable('7', '&')), Some(Printable('8', '*')), Some(Printable('9', '(')),
    Some(Printable('0', ')')),
    // 0x28 - 0x2C
    Some(Named(NamedKey::Enter)), Some(Named(NamedKey::Escape)),
    Some(Named(NamedKey::Backspace)), Some(Named(NamedKey::Tab)),
    Some(Named(NamedKey::Space)),
    // 0x2D - 0x38: punctuation
    Some(Printable('-', '_')), Some(Printable('=', '+')), Some(Printable('[', '{')),
    Some(Printable(']', '}')), Some(Printable('\\', '|')), Some(Printable('#', '~')),
    Some(Printable(';', ':')), Some(Printable('\'', '"')), Some(Printable('`', '~')),
    Some(Printable(',', '<')), Some(Printable('.', '>')), Some(Printable('/', '?')),
    // 0x39 - 0x45
    Some(Named(NamedKey::CapsLock)),
    Some(Named(NamedKey::F1)), Some(Named(NamedKey::F2)), Some(Named(NamedKey::F3)),
    Some(Named(NamedKey::F4)), Some(Named(NamedKey::F5)), Some(Named(NamedKey::F6)),
    Some(Named(NamedKey::F7)), Some(Named(NamedKey::F8)), Some(Named(NamedKey::F9)),
    Some(Named(NamedKey::F10)), Some(Named(NamedKey::F11)), Some(Named(NamedKey::F12)),
    // 0x46 - 0x4E: PrintScreen .. PageDown, not mapped
    None, None, None, None, None, None, None, None, None,
    // 0x4F - 0x52: arrows
    Some(Named(NamedKey::ArrowRight)), Some(Named(NamedKey::ArrowLeft)),
    Some(Named(NamedKey::ArrowDown)), Some(Named(NamedKey::ArrowUp)),
];

/// Map a non-zero usage code to its token.
///
/// Total: codes outside the table come back as [`KeyToken::Unknown`].
pub fn lookup(usage: u8, shift: bool) -> KeyToken {
    let entry = usage
        .checked_sub(FIRST_USAGE)
        .and_then(|index| TABLE.get(index as usize))
        .copied()
        .flatten();

    match entry {
        Some(Printable(base, shifted)) => KeyToken::Char(if shift { shifted } else { base }),
        Some(Named(key)) => KeyToken::Named(key),
        None => KeyToken::Unknown(usage),
    }
}
