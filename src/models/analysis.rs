use unicode_segmentation::UnicodeSegmentation;

/// Classic english stop words, as the standard analyzers of
/// the java world know them.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Turns field text into terms, and query terms into
/// something comparable with them.
///
/// Text is split on unicode word boundaries (UAX #29), which
/// leaves punctuation and whitespace out. Every word is then
/// lower cased. Empty words never make it out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analyzer {
    english_stop_words: bool,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// This analyzer, also dropping [`ENGLISH_STOP_WORDS`]
    pub fn with_english_stop_words(mut self, enabled: bool) -> Self {
        self.english_stop_words = enabled;
        self
    }

    pub fn english_stop_words(&self) -> bool {
        self.english_stop_words
    }

    /// The terms of the given text, in order of appearance.
    /// Duplicates are kept.
    ///
    /// Example:
    /// ```
    /// use newsdex::prelude::*;
    ///
    /// let terms: Vec<String> = Analyzer::new().tokenize("U.S. dawn, Kim's visit!").collect();
    /// assert_eq!(terms, vec!["u.s", "dawn", "kim's", "visit"]);
    /// ```
    pub fn tokenize<'a>(&self, text: &'a str) -> impl Iterator<Item = String> + use<'a> {
        let drop_stop_words = self.english_stop_words;
        text.unicode_words()
            .map(str::to_lowercase)
            .filter(|t| !t.is_empty())
            .filter(move |t| !(drop_stop_words && is_stop_word(t)))
    }

    /// A query term, normalised like indexed tokens are.
    /// The term is NOT split. A term with inner spaces or
    /// punctuation will simply match nothing.
    pub fn normalize_term(&self, term: &str) -> String {
        term.trim().to_lowercase()
    }
}

fn is_stop_word(t: &str) -> bool {
    ENGLISH_STOP_WORDS.binary_search(&t).is_ok()
}
