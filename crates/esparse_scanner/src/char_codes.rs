//! Character classes used by the scanner.

use unicode_xid::UnicodeXID;

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Lead byte of the UTF-8 encodings of U+2028 and U+2029.
pub const LS_PS_LEAD: u8 = 0xE2;

/// Check if a character is a line terminator.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

/// Whether `bytes[i..]` starts with the UTF-8 encoding of U+2028 or U+2029.
#[inline]
pub fn is_ls_ps_at(bytes: &[u8], i: usize) -> bool {
    bytes.get(i) == Some(&LS_PS_LEAD)
        && bytes.get(i + 1) == Some(&0x80)
        && matches!(bytes.get(i + 2), Some(0xA8) | Some(0xA9))
}

/// Check if a character is whitespace (not line break).
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{00A0}' // no-break space
            | '\u{1680}' // ogham space mark
            | '\u{2000}'..='\u{200A}' // various spaces
            | '\u{202F}' // narrow no-break space
            | '\u{205F}' // medium mathematical space
            | '\u{3000}' // ideographic space
            | BYTE_ORDER_MARK
    )
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

#[inline]
pub fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub fn hex_value(b: u8) -> Option<u32> {
    (b as char).to_digit(16)
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch.is_ascii_alphabetic()
        || (ch as u32 > 0x7F && ch.is_xid_start())
}

/// Check if a character can be part of an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch.is_ascii_alphanumeric()
        || ch == '\u{200C}'
        || ch == '\u{200D}'
        || (ch as u32 > 0x7F && ch.is_xid_continue())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('é'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(is_identifier_part('\u{200D}'));
    }

    #[test]
    fn test_ls_ps_detection() {
        let text = "a\u{2028}b";
        assert!(is_ls_ps_at(text.as_bytes(), 1));
        assert!(!is_ls_ps_at(text.as_bytes(), 0));
        assert!(is_line_break(PARAGRAPH_SEPARATOR));
    }
}
