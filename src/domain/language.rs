// ============================================================
// Layer 3 — Language Tag
// ============================================================
// Identifies which side of the corpus a sentence belongs to
// for tokenisation purposes. clap's ValueEnum lets the CLI
// accept `--src-lang en --tgt-lang fr` directly.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A language the word tokenizer knows how to split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// French
    Fr,
}

impl Language {
    /// Short ISO 639-1 code, as used in file names and logs.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which half of a sentence pair is being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}
