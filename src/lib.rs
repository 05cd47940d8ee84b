#![cfg_attr(not(feature = "gen"), no_std)]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

extern crate alloc;
use alloc::{borrow::Cow, string::String};

#[allow(clippy::pedantic, clippy::nursery)]
pub(crate) mod tables {
    include!(concat!(env!("OUT_DIR"), "/fold_tables.rs"));
}

#[cfg(feature = "gen")]
mod emit;
#[cfg(feature = "gen")]
mod rule;
#[cfg(feature = "gen")]
mod table;

#[cfg(feature = "gen")]
pub use emit::write_tables;
#[cfg(feature = "gen")]
pub use rule::Rule;
#[cfg(feature = "gen")]
pub use table::{BuildError, FoldTable, MAX_MAPPING, NUKE_CHAR, PAGE_SIZE};

/// Folds one codepoint for search comparison.
///
/// Identity for everything the table leaves alone, including all values at
/// or past `0x10000`.
///
/// # Examples
///
/// ```
/// assert_eq!(norma::fold_u32(0x41), 0x61);
/// assert_eq!(norma::fold_u32(0x212B), 0x61); // Å, the angstrom sign
/// assert_eq!(norma::fold_u32(0x1000), 0x1000);
/// assert_eq!(norma::fold_u32(0x10041), 0x10041);
/// ```
#[must_use]
pub const fn fold_u32(c: u32) -> u32 {
    tables::lookup(c)
}

/// Folds one character for search comparison.
///
/// # Examples
///
/// ```
/// assert_eq!(norma::fold_char('Ü'), 'u');
/// assert_eq!(norma::fold_char('\u{00AD}'), ' '); // soft hyphen is removed
/// assert_eq!(norma::fold_char('æ'), 'æ');
/// ```
#[must_use]
pub const fn fold_char(c: char) -> char {
    // Table values stay in the BMP and never land on a surrogate; the
    // round trip keeps that a data concern rather than a safety one.
    match char::from_u32(fold_u32(c as u32)) {
        Some(folded) => folded,
        None => c,
    }
}

/// Folds a whole string, borrowing when every character already folds to
/// itself.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
///
/// assert_eq!(norma::fold_str("Ünïcode"), "unicode");
/// assert!(matches!(norma::fold_str("already folded"), Cow::Borrowed(_)));
/// ```
#[must_use]
pub fn fold_str(s: &str) -> Cow<'_, str> {
    let Some((changed, _)) = s.char_indices().find(|&(_, c)| fold_char(c) != c) else {
        return Cow::Borrowed(s);
    };

    let mut folded = String::with_capacity(s.len());
    folded.push_str(&s[..changed]);
    folded.extend(s[changed..].chars().map(fold_char));
    Cow::Owned(folded)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::ascii("Hello, World", "hello, world")]
    #[case::accents("Ünïcode", "unicode")]
    #[case::greek("ΆΒΙΩ", "αβιω")]
    #[case::greek_tonos_stripped("ΐ", "ι")]
    #[case::cyrillic_diaeresis_stripped("Ёлка", "елка")]
    #[case::kelvin("\u{212A}elvin", "kelvin")]
    #[case::ligature_keeps_first_codepoint("ﬁle", "fle")]
    #[case::fullwidth("ＡＢＣ", "abc")]
    #[case::nbsp("a\u{00A0}b", "a b")]
    #[case::removed_become_spaces("zero\u{200B}width", "zero width")]
    #[case::empty("", "")]
    fn folds_strings(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fold_str(input), expected);
    }

    #[test]
    fn folded_input_is_borrowed() {
        let folded = "already 'folded' text, 123";
        assert!(matches!(fold_str(folded), Cow::Borrowed(_)));
    }

    #[test]
    fn prefix_before_first_change_is_kept() {
        assert_eq!(fold_str("abcÜx"), "abcux");
    }
}
