//! Stripping of whitespace and diacritics before valuation

use crate::{alphabet::Alphabet, tables};

/// Iterate the characters of `text` that survive normalization for `alphabet`, in input order.
///
/// Works on Unicode scalar values, so a combining mark is dropped on its own while the base
/// character it decorates is kept.
pub fn retained_chars(text: &str, alphabet: Alphabet) -> impl Iterator<Item = char> + '_ {
    let diacritics = tables::diacritic_set(alphabet);
    text.chars()
        .filter(move |c| !c.is_whitespace() && !diacritics.contains(*c))
}

/// Remove whitespace and the diacritics of `alphabet` from `text`.
///
/// Never fails: text made only of whitespace or marks normalizes to an empty string. Normalizing an
/// already normalized string returns it unchanged.
///
/// # Example
/// ```
/// use numerology::{Alphabet, normalize};
///
/// assert_eq!(normalize("اَب ", Alphabet::Arabic), "اب");
/// ```
pub fn normalize(text: &str, alphabet: Alphabet) -> String {
    retained_chars(text, alphabet).collect()
}
