//! Text normalization applied before matching.

use std::borrow::Cow;

/// Characters treated as a plain ASCII hyphen-minus when matching.
pub const DASH_VARIANTS: [char; 10] = [
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2015}', // horizontal bar
    '\u{2212}', // minus sign
    '\u{FE58}', // small em dash
    '\u{FE63}', // small hyphen-minus
    '\u{FF0D}', // fullwidth hyphen-minus
];

/// Replaces every typographic dash with `-`, borrowing when nothing changes.
pub fn normalize_dashes(text: &str) -> Cow<'_, str> {
    if !text.contains(&DASH_VARIANTS[..]) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if DASH_VARIANTS.contains(&c) { '-' } else { c })
            .collect(),
    )
}

/// Returns the first line that is not blank, trimmed.
pub fn first_non_blank_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}
