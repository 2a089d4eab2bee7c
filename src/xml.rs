//! Reversible mapping between arbitrary keys and XML element local-names.
//!
//! Characters that may not appear in an NCName at their position are written
//! as `_xHHHH_` (or `_xHHHHHHHH_` above the BMP). An underscore that would
//! otherwise read as the start of such a sequence is itself written as `_x005F_`.

use std::borrow::Cow;

/// Returns true if `c` may start an XML 1.0 NCName.
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// Returns true if `c` may appear after the first character of an NCName.
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Returns true if `c` is allowed in XML 1.0 character data.
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Encodes `key` so it can be used as an element local-name.
pub fn encode_local_name(key: &str) -> Cow<'_, str> {
    if !key.char_indices().any(|(i, c)| needs_escape(key, i, c)) {
        return Cow::Borrowed(key);
    }

    let mut out = String::with_capacity(key.len() + 16);
    for (i, c) in key.char_indices() {
        if needs_escape(key, i, c) {
            push_escape(&mut out, c);
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Decodes a local-name produced by [`encode_local_name`].
///
/// Sequences that only look like escapes (wrong digit count, non-hex digits,
/// surrogate code points) are kept literally, so decoding never fails.
pub fn decode_local_name(name: &str) -> Cow<'_, str> {
    if !name.contains("_x") {
        return Cow::Borrowed(name);
    }

    let mut out = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match parse_escape(tail) {
            Some((c, len)) => {
                out.push(c);
                rest = &tail[len..];
            }
            None => {
                out.push('_');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn needs_escape(key: &str, index: usize, c: char) -> bool {
    if c == '_' {
        return starts_like_escape(&key[index..]);
    }
    if index == 0 {
        !is_name_start_char(c)
    } else {
        !is_name_char(c)
    }
}

// `_x` followed by four hex digits. Anything shorter can never be decoded,
// so a literal underscore in front of it is safe.
fn starts_like_escape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 6 && b[1] == b'x' && b[2..6].iter().all(u8::is_ascii_hexdigit)
}

fn push_escape(out: &mut String, c: char) {
    let code = c as u32;
    if code > 0xFFFF {
        out.push_str(&format!("_x{:08X}_", code));
    } else {
        out.push_str(&format!("_x{:04X}_", code));
    }
}

/// Parses an escape at the start of `s`, returning the char and bytes consumed.
fn parse_escape(s: &str) -> Option<(char, usize)> {
    let digits = s.as_bytes().get(2..)?;
    for width in [4usize, 8] {
        if digits.len() > width
            && digits[..width].iter().all(u8::is_ascii_hexdigit)
            && digits[width] == b'_'
        {
            return u32::from_str_radix(&s[2..2 + width], 16)
                .ok()
                .and_then(char::from_u32)
                .map(|c| (c, width + 3));
        }
    }
    None
}
