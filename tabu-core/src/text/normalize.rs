//! Canonical comparison form for words and distractors
//!
//! Two strings are "the same word" throughout the pipeline when their
//! normalized forms are equal. The form is lowercase, diacritic-folded,
//! punctuation-free and single-spaced:
//!
//! ```
//! # use tabu_core::text::normalize;
//! assert_eq!(normalize("  Çığ  (Doğa) "), "cig doga");
//! assert_eq!(normalize("Yeni-Nesil!!"), "yeni nesil");
//! ```

use tracing::trace;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize text for comparison. Never fails and is idempotent.
pub fn normalize(text: &str) -> String {
    let lowered: String = text.nfkc().collect::<String>().to_lowercase();

    let folded: String = lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'ı' { 'i' } else { c })
        .nfc()
        .collect();

    let normalized = collapse(folded.chars().map(|c| {
        if c.is_alphanumeric() {
            c
        } else {
            ' '
        }
    }));

    trace!("normalize: '{}' -> '{}'", text, normalized);
    normalized
}

/// ASCII-only normalization used when input is not valid UTF-8
fn normalize_ascii(bytes: &[u8]) -> String {
    collapse(bytes.iter().map(|b| {
        if b.is_ascii_alphanumeric() {
            b.to_ascii_lowercase() as char
        } else {
            ' '
        }
    }))
}

/// Normalize raw bytes, degrading to ASCII-only folding on invalid UTF-8
#[cfg_attr(not(test), allow(dead_code))]
pub(crate) fn normalize_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => normalize(text),
        Err(e) => {
            trace!("normalize_bytes: invalid UTF-8 ({e}), using ASCII fallback");
            normalize_ascii(bytes)
        }
    }
}

/// Collapse whitespace runs to a single space and trim both ends
fn collapse(chars: impl Iterator<Item = char>) -> String {
    let mut out = String::new();
    let mut pending_space = false;

    for c in chars {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }

    out
}
