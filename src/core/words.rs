//! The secret word pair.

use serde::{Deserialize, Serialize};

/// Words handed out at the start of a game.
///
/// Ordinary players ("apples") see `primary`; the impostor sees `alt`.
/// Only `primary` is ever compared against a guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub primary: String,
    pub alt: String,
}

impl WordPair {
    /// Create a word pair.
    pub fn new(primary: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            alt: alt.into(),
        }
    }

    /// Check a guess against the primary word.
    ///
    /// Surrounding whitespace and letter case are ignored; nothing else is.
    ///
    /// ```
    /// use apple_orange::core::WordPair;
    ///
    /// let words = WordPair::new("Apple", "Orange");
    /// assert!(words.is_primary("  aPPle "));
    /// assert!(!words.is_primary("apples"));
    /// assert!(!words.is_primary("Orange"));
    /// ```
    #[must_use]
    pub fn is_primary(&self, guess: &str) -> bool {
        normalize(guess) == normalize(&self.primary)
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let words = WordPair::new("banana", "plantain");
        assert!(words.is_primary("banana"));
    }

    #[test]
    fn test_case_and_whitespace_ignored() {
        let words = WordPair::new(" Banana\t", "plantain");
        assert!(words.is_primary("BANANA"));
        assert!(words.is_primary("\n banana  "));
    }

    #[test]
    fn test_inner_whitespace_matters() {
        let words = WordPair::new("ice cream", "gelato");
        assert!(words.is_primary("Ice Cream"));
        assert!(!words.is_primary("icecream"));
        assert!(!words.is_primary("ice  cream"));
    }

    #[test]
    fn test_alt_word_never_matches() {
        let words = WordPair::new("banana", "plantain");
        assert!(!words.is_primary("plantain"));
    }

    #[test]
    fn test_non_ascii_case_folding() {
        let words = WordPair::new("straße", "weg");
        assert!(words.is_primary("STRASSE"));
    }
}
