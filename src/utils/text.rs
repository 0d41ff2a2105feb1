//! Text primitives used on raw page markup.
//!
//! Catalog pages are never parsed into a tree. Everything is read with two
//! primitives: [`slice_between`], which takes the text strictly between a start
//! and an end marker, and [`scan_until`], a bounded forward scan that stops at a
//! delimiter. Both report a missing marker as `None` instead of panicking.

use std::borrow::Cow;

/// Characters removed from titles because at least one target filesystem
/// rejects them.
pub const TITLE_ILLEGAL_CHARS: &[char] = &[':', '*', '?', '<', '>', '|'];

/// Characters removed from file names.
pub const FILE_NAME_ILLEGAL_CHARS: &[char] = &['\\', '/', ':', '*', '?', '<', '>', '|'];

/// Return the text strictly between the first `start` marker and the first
/// `end` marker that follows it.
///
/// # Example
///
/// ```rust
/// use campdown::utils::slice_between;
///
/// assert_eq!(slice_between("<b>bold</b>", "<b>", "</b>"), Some("bold"));
/// assert_eq!(slice_between("<b>bold", "<b>", "</b>"), None);
/// ```
pub fn slice_between<'a>(haystack: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = haystack.find(start)? + start.len();
    let rest = &haystack[from..];
    let to = rest.find(end)?;
    Some(&rest[..to])
}

/// Scan `haystack` forward from byte offset `from` until `delimiter`, returning
/// the text that was scanned over.
///
/// Returns `None` when `from` is out of bounds or the delimiter never shows up.
pub fn scan_until(haystack: &str, from: usize, delimiter: char) -> Option<&str> {
    let rest = haystack.get(from..)?;
    rest.find(delimiter).map(|to| &rest[..to])
}

/// Decode HTML character references (`&amp;`, `&ntilde;`, `&#39;`, `&#x2019;`, ...).
///
/// Named references cover the full HTML5 table. Numeric references in the C1
/// range are read as Windows-1252, the way browsers do, so `&#150;` is an en
/// dash. Unknown or malformed references are kept verbatim.
pub fn html_unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];

        // The longest named reference is 33 bytes including `&` and `;`.
        let decoded = candidate
            .char_indices()
            .take(40)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| {
                decode_reference(&candidate[..=semi]).map(|decoded| (decoded, semi))
            });

        match decoded {
            Some((decoded, semi)) => {
                out.push_str(&decoded);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Decode one `&...;` reference.
fn decode_reference(reference: &str) -> Option<String> {
    let body = reference.strip_prefix('&')?.strip_suffix(';')?;

    if let Some(number) = body.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return Some(numeric_reference(code).to_string());
    }

    match html_escape::decode_html_entities(reference) {
        Cow::Owned(decoded) if decoded != reference => Some(decoded),
        _ => None,
    }
}

/// Map a numeric reference to its character.
fn numeric_reference(code: u32) -> char {
    let code = match code {
        0x80 => 0x20ac,
        0x82 => 0x201a,
        0x83 => 0x0192,
        0x84 => 0x201e,
        0x85 => 0x2026,
        0x86 => 0x2020,
        0x87 => 0x2021,
        0x88 => 0x02c6,
        0x89 => 0x2030,
        0x8a => 0x0160,
        0x8b => 0x2039,
        0x8c => 0x0152,
        0x8e => 0x017d,
        0x91 => 0x2018,
        0x92 => 0x2019,
        0x93 => 0x201c,
        0x94 => 0x201d,
        0x95 => 0x2022,
        0x96 => 0x2013,
        0x97 => 0x2014,
        0x98 => 0x02dc,
        0x99 => 0x2122,
        0x9a => 0x0161,
        0x9b => 0x203a,
        0x9c => 0x0153,
        0x9e => 0x017e,
        0x9f => 0x0178,
        0 => return char::REPLACEMENT_CHARACTER,
        other => other,
    };
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Remove every character of `illegal` from `value`.
pub fn strip_chars(value: &str, illegal: &[char]) -> String {
    value.chars().filter(|c| !illegal.contains(c)).collect()
}

/// Make a directory name safe: `/` becomes `&`, backslashes and double
/// quotes are dropped, along with the characters in [`TITLE_ILLEGAL_CHARS`].
pub fn safe_path(value: &str) -> String {
    let replaced = value.replace('/', "&").replace(['\\', '"'], "");
    strip_chars(&replaced, TITLE_ILLEGAL_CHARS)
}

/// Make a file name safe by removing [`FILE_NAME_ILLEGAL_CHARS`] and double quotes.
pub fn safe_file_name(value: &str) -> String {
    strip_chars(value, FILE_NAME_ILLEGAL_CHARS).replace('"', "")
}
