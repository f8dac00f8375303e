//! Character-class checks and small parsers shared by the decoders

use crate::constants::FIELD_SEPARATOR;

/// True if `s` is non-empty and only hex digits
pub fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// True if `s` is non-empty and only decimal digits
pub fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a hex field that fits in 32 bits
pub fn parse_hex(s: &str) -> Option<u32> {
    if !is_hex(s) {
        return None;
    }
    u32::from_str_radix(s, 16).ok()
}

/// Parse a decimal field that fits in 32 bits
pub fn parse_decimal(s: &str) -> Option<u32> {
    if !is_decimal(s) {
        return None;
    }
    s.parse().ok()
}

/// Split the dot-separated fields of a codec string
pub fn fields(component: &str) -> Vec<&str> {
    component.split(FIELD_SEPARATOR as char).collect()
}

/// Split a field like `L93` into its leading letter and the remainder
pub fn split_letter(field: &str) -> Option<(char, &str)> {
    let mut chars = field.chars();
    let first = chars.next().filter(char::is_ascii_alphabetic)?;
    Some((first, chars.as_str()))
}

/// Decode RFC 4648 base32 (case-insensitive, no padding) into octets.
///
/// Leftover bits that do not fill a whole octet are kept in a final,
/// zero-padded octet when any of them is set.
pub fn decode_base32(s: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(s.len() * 5 / 8 + 1);
    let mut acc: u32 = 0;
    let mut pending = 0u32;

    for b in s.bytes() {
        let v = match b.to_ascii_uppercase() {
            c @ b'A'..=b'Z' => c - b'A',
            c @ b'2'..=b'7' => c - b'2' + 26,
            _ => return None,
        };
        acc = (acc << 5) | u32::from(v);
        pending += 5;
        if pending >= 8 {
            pending -= 8;
            out.push((acc >> pending) as u8);
            acc &= (1 << pending) - 1;
        }
    }

    if pending > 0 && acc != 0 {
        out.push((acc << (8 - pending)) as u8);
    }
    Some(out)
}

/// `1` or `0` for a flag
pub const fn show_bit(flag: bool) -> &'static str {
    if flag {
        "1"
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        assert!(is_hex("64002A"));
        assert!(!is_hex("64002G"));
        assert!(!is_hex(""));
        assert!(is_decimal("0123"));
        assert!(!is_decimal("12a"));
    }

    #[test]
    fn test_parsers_reject_overflow() {
        assert_eq!(parse_hex("ffffffff"), Some(u32::MAX));
        assert_eq!(parse_hex("1ffffffff"), None);
        assert_eq!(parse_decimal("99999999999"), None);
        assert_eq!(parse_decimal("186"), Some(186));
    }

    #[test]
    fn test_split_letter() {
        assert_eq!(split_letter("L93"), Some(('L', "93")));
        assert_eq!(split_letter("93"), None);
        assert_eq!(split_letter(""), None);
    }

    #[test]
    fn test_base32() {
        // "MZXW6===" is "foo" in RFC 4648
        assert_eq!(decode_base32("MZXW6"), Some(b"foo".to_vec()));
        assert_eq!(decode_base32("mzxw6"), Some(b"foo".to_vec()));
        assert_eq!(decode_base32("AA"), Some(vec![0x00]));
        assert_eq!(decode_base32("QA"), Some(vec![0x80]));
        assert_eq!(decode_base32("Q"), Some(vec![0x80]));
        assert_eq!(decode_base32("A1"), None);
    }
}
