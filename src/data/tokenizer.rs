// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// Splits a sentence into word-level symbols with one regex
// per language. Each match becomes one token:
//
//   "The cat, isn't it?"  →  [The, cat, ",", isn, "'", t, it, "?"]
//   "L'homme mange."      →  [L', homme, mange, "."]
//
// French keeps elided articles and pronouns (l', d', qu', ...)
// attached to their apostrophe so they form one vocabulary
// entry instead of two.
//
// Case is preserved; the word-level path never lower-cases.

use std::collections::HashMap;

use regex::Regex;

use crate::domain::{language::Language, traits::Tokenizer};
use crate::error::PipelineResult;

/// Word runs, or any single non-space character.
const DEFAULT_PATTERN: &str = r"\w+|[^\w\s]";

/// Elided word plus apostrophe, then word runs, then punctuation.
const FRENCH_PATTERN: &str = r"\w+['’]|\w+|[^\w\s]";

/// Regex-driven implementation of the Tokenizer trait.
#[derive(Debug, Clone)]
pub struct RegexTokenizer {
    default:  Regex,
    patterns: HashMap<Language, Regex>,
}

impl RegexTokenizer {
    /// Build the tokenizer with the built-in language patterns.
    pub fn new() -> PipelineResult<Self> {
        let mut patterns = HashMap::new();
        patterns.insert(Language::Fr, Regex::new(FRENCH_PATTERN)?);

        Ok(Self {
            default: Regex::new(DEFAULT_PATTERN)?,
            patterns,
        })
    }

    /// Replace the pattern used for one language.
    pub fn with_pattern(mut self, language: Language, pattern: &str) -> PipelineResult<Self> {
        self.patterns.insert(language, Regex::new(pattern)?);
        Ok(self)
    }

    fn pattern_for(&self, language: Language) -> &Regex {
        self.patterns.get(&language).unwrap_or(&self.default)
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str, language: Language) -> Vec<String> {
        self.pattern_for(language)
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
