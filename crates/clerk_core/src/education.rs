//! Education/major normalization.
//!
//! Raw spreadsheet majors carry degree abbreviations ("S-1 ", "D-3 ") and
//! the occasional category phrase. The target form's picklist expects an
//! exact string, so the rewrite rules here are literal and ordered.

/// Ordered degree-abbreviation rewrites, applied to the upper-cased text.
/// Each pattern must start a word (start of string or after whitespace);
/// a pattern buried inside a longer word is left alone.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("S-1 ", "SARJANA-"),
    ("D-3 ", "DIPLOMA III-"),
    ("SMA PAKET C ", "SMA-Paket C"),
];

/// Ordered keyword-to-canonical mapping. A hit returns the canonical
/// phrase immediately, skipping the title-case fallback for the rest of
/// the text.
const CATEGORY_MAP: &[(&str, &str)] = &[("SLTA SEDERAJAT", "SEKOLAH MENENGAH ATAS")];

/// Normalize a raw education/major string into the picklist vocabulary.
///
/// Upper-cases and trims, applies the abbreviation rewrites in order,
/// then either returns a mapped canonical phrase or title-cases the
/// rewritten text. Deterministic; non-empty input yields non-empty
/// output.
pub fn normalize_education(raw: &str) -> String {
    let mut text = raw.to_uppercase().trim().to_string();

    for (pattern, replacement) in SUBSTITUTIONS {
        text = replace_at_word_start(&text, pattern, replacement);
    }

    for (keyword, canonical) in CATEGORY_MAP {
        if text.contains(keyword) {
            return title_case(canonical);
        }
    }

    title_case(&text)
}

/// Title-case with the source tool's semantics: a letter is upper-cased
/// when the preceding character is not alphabetic and lower-cased
/// otherwise. "DIPLOMA III-AKUNTANSI" therefore becomes
/// "Diploma Iii-Akuntansi", and the letter after a hyphen is capitalized.
/// The "Iii" is pinned by the external picklist this output is matched
/// against; do not switch to word-based casing.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alphabetic = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}

/// Replace every occurrence of `pattern` that begins a word. Occurrences
/// inside a longer word are copied through unchanged.
fn replace_at_word_start(text: &str, pattern: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut idx = 0;
    while let Some(found) = text[idx..].find(pattern) {
        let start = idx + found;
        let at_word_start = start == 0
            || text[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
        if at_word_start {
            out.push_str(&text[idx..start]);
            out.push_str(replacement);
            idx = start + pattern.len();
        } else {
            // Skip one character and keep scanning; the next occurrence
            // may still be a word start.
            let next = start
                + text[start..]
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(1);
            out.push_str(&text[idx..next]);
            idx = next;
        }
    }
    out.push_str(&text[idx..]);
    out
}
