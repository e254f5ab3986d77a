//! Coarse character classes used to describe separators.

use std::fmt;

use serde::{Deserialize, Serialize};

const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const SYMBOLS: &str = "€£¥©®™§¶±÷×°";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    LetterOrDigit,
    Whitespace,
    Punctuation,
    Symbol,
    Newline,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::LetterOrDigit => "letter-or-digit",
            Category::Whitespace => "whitespace",
            Category::Punctuation => "punctuation",
            Category::Symbol => "symbol",
            Category::Newline => "newline",
            Category::Other => "other",
        }
    }

    /// Categories a trailing separator may lack when the text ends early.
    pub fn is_optional_at_end(&self) -> bool {
        matches!(self, Category::Whitespace | Category::Newline)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a character of class `next` folds into a run of class `prev`.
///
/// Whitespace and punctuation after letters belong to the letter run, whitespace after
/// punctuation belongs to the punctuation run. Pattern construction and matching must agree
/// on this or derived patterns stop matching their own examples.
pub fn absorbs(prev: Category, next: Category) -> bool {
    matches!(
        (prev, next),
        (
            Category::LetterOrDigit,
            Category::Whitespace | Category::Punctuation
        ) | (Category::Punctuation, Category::Whitespace)
    )
}

/// Character classifier with fixed ASCII tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classifier {
    /// Treat non-ASCII alphanumerics as letters instead of `Other`.
    pub extended_letters: bool,
}

impl Classifier {
    pub const fn new(extended_letters: bool) -> Self {
        Self { extended_letters }
    }

    pub fn classify(&self, ch: char) -> Category {
        match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' => Category::LetterOrDigit,
            ' ' | '\t' | '\r' => Category::Whitespace,
            '\n' => Category::Newline,
            c if PUNCTUATION.contains(c) => Category::Punctuation,
            c if SYMBOLS.contains(c) => Category::Symbol,
            c if self.extended_letters && c.is_alphanumeric() => Category::LetterOrDigit,
            _ => Category::Other,
        }
    }
}

/// Classify with the default tables.
pub fn classify(ch: char) -> Category {
    Classifier::default().classify(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_fixed_tables() {
        assert_eq!(classify('q'), Category::LetterOrDigit);
        assert_eq!(classify('Z'), Category::LetterOrDigit);
        assert_eq!(classify('7'), Category::LetterOrDigit);
        assert_eq!(classify(' '), Category::Whitespace);
        assert_eq!(classify('\t'), Category::Whitespace);
        assert_eq!(classify('\r'), Category::Whitespace);
        assert_eq!(classify('\n'), Category::Newline);
        assert_eq!(classify(':'), Category::Punctuation);
        assert_eq!(classify('\\'), Category::Punctuation);
        assert_eq!(classify('`'), Category::Punctuation);
        assert_eq!(classify('€'), Category::Symbol);
        assert_eq!(classify('°'), Category::Symbol);
        assert_eq!(classify('—'), Category::Other);
        assert_eq!(classify('é'), Category::Other);
    }

    #[test]
    fn extended_letters_cover_non_ascii_alphanumerics() {
        let classifier = Classifier::new(true);
        assert_eq!(classifier.classify('é'), Category::LetterOrDigit);
        assert_eq!(classifier.classify('ж'), Category::LetterOrDigit);
        assert_eq!(classifier.classify('—'), Category::Other);
        assert_eq!(classifier.classify('£'), Category::Symbol);
    }

    #[test]
    fn classification_is_total() {
        let boundaries = [
            0x00, 0x09, 0x0A, 0x0D, 0x1F, 0x20, 0x2F, 0x30, 0x39, 0x3A, 0x40, 0x41, 0x5A, 0x5B,
            0x60, 0x61, 0x7A, 0x7B, 0x7E, 0x7F, 0x80, 0xA3, 0xB0, 0xFF, 0x20AC, 0xD7FF, 0xE000,
            0xFFFF, 0x1_0000, 0x1_F600, 0x10_FFFF,
        ];
        let sampled = (0..=0x10_FFFFu32).step_by(0x1013);
        for code in boundaries.into_iter().chain(sampled) {
            if let Some(ch) = char::from_u32(code) {
                let default = classify(ch);
                let extended = Classifier::new(true).classify(ch);
                if !ch.is_alphanumeric() || ch.is_ascii() {
                    assert_eq!(default, extended, "U+{code:04X}");
                }
            }
        }
    }

    #[test]
    fn absorption_rules() {
        use Category::*;
        assert!(absorbs(LetterOrDigit, Whitespace));
        assert!(absorbs(LetterOrDigit, Punctuation));
        assert!(absorbs(Punctuation, Whitespace));
        assert!(!absorbs(Whitespace, Punctuation));
        assert!(!absorbs(Punctuation, LetterOrDigit));
        assert!(!absorbs(LetterOrDigit, Newline));
        assert!(!absorbs(Newline, Whitespace));
    }
}
