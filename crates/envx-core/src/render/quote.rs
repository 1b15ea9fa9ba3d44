//! Double-quoted string literals for line-oriented outputs

use std::fmt::Write;

/// Quote `s` as a double-quoted literal
///
/// Escapes `"` and `\`, uses the short forms `\a \b \f \n \r \t \v`, writes
/// other C0 controls and DEL as `\xHH` and every other non-printable character
/// as `\uHHHH`/`\UHHHHHHHH`. Printable non-ASCII text is kept as is.
///
/// Non-printable means control, format, private-use and noncharacter code
/// points plus every space separator except ASCII space. Unassigned code
/// points are passed through.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            c if c < ' ' || c == '\u{7F}' => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c if !is_printable(c) && u32::from(c) <= 0xFFFF => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c if !is_printable(c) => {
                let _ = write!(out, "\\U{:08x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Space separators (Zs except U+0020), line and paragraph separators
const SEPARATORS: &[(u32, u32)] = &[
    (0x00A0, 0x00A0),
    (0x1680, 0x1680),
    (0x2000, 0x200A),
    (0x2028, 0x2029),
    (0x202F, 0x202F),
    (0x205F, 0x205F),
    (0x3000, 0x3000),
];

/// Format characters (Cf)
const FORMAT: &[(u32, u32)] = &[
    (0x00AD, 0x00AD),
    (0x0600, 0x0605),
    (0x061C, 0x061C),
    (0x06DD, 0x06DD),
    (0x070F, 0x070F),
    (0x0890, 0x0891),
    (0x08E2, 0x08E2),
    (0x180E, 0x180E),
    (0x200B, 0x200F),
    (0x202A, 0x202E),
    (0x2060, 0x2064),
    (0x2066, 0x206F),
    (0xFEFF, 0xFEFF),
    (0xFFF9, 0xFFFB),
    (0x110BD, 0x110BD),
    (0x110CD, 0x110CD),
    (0x13430, 0x1343F),
    (0x1BCA0, 0x1BCA3),
    (0x1D173, 0x1D17A),
    (0xE0001, 0xE0001),
    (0xE0020, 0xE007F),
];

/// Private use areas (Co) and the U+FDD0 noncharacter block
const PRIVATE_AND_NONCHARACTERS: &[(u32, u32)] = &[
    (0xE000, 0xF8FF),
    (0xFDD0, 0xFDEF),
    (0xF0000, 0xFFFFD),
    (0x100000, 0x10FFFD),
];

fn in_ranges(cp: u32, ranges: &[(u32, u32)]) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

fn is_printable(c: char) -> bool {
    let cp = u32::from(c);
    !(c.is_control()
        // U+xFFFE and U+xFFFF in every plane
        || (cp & 0xFFFE) == 0xFFFE
        || in_ranges(cp, SEPARATORS)
        || in_ranges(cp, FORMAT)
        || in_ranges(cp, PRIVATE_AND_NONCHARACTERS))
}
