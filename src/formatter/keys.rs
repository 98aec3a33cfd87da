//! Identifier normalization for section and setting keys
//!
//! Keys are split into words at case changes and separators, then joined
//! with underscores in lowercase:
//!
//! - `DisplaySettings` -> `display_settings`
//! - `HTTPServer` -> `http_server`
//! - `anti-aliasing` -> `anti_aliasing`
//! - `sound_volume` -> `sound_volume`
//!
//! The rewrite is idempotent: normalized keys contain no uppercase letters
//! and no hyphens, so no rule applies to them again.

/// Normalize a key to lowercase, underscore-separated form
pub fn normalize_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let acronyms_split = split_acronym_boundaries(&chars);
    let words_split = split_word_boundaries(&acronyms_split);

    words_split
        .into_iter()
        .map(|c| if c == '-' { '_' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when `normalize_key` would return the key unchanged
pub fn is_normalized(key: &str) -> bool {
    normalize_key(key) == key
}

/// `HTTPServer` -> `HTTP_Server`: an uppercase run followed by an
/// uppercase letter that starts a lowercase word
fn split_acronym_boundaries(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        let after_upper = i > 0 && chars[i - 1].is_ascii_uppercase();
        let before_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
        if c.is_ascii_uppercase() && after_upper && before_lower {
            out.push('_');
        }
        out.push(c);
    }
    out
}

/// `fullScreen` -> `full_Screen`, `Level2Boss` -> `Level2_Boss`
fn split_word_boundaries(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() {
                out.push('_');
            }
        }
        out.push(c);
    }
    out
}
