// ============================================================
// Layer 3 — Sentence Pair Domain Types
// ============================================================
// SentencePair is one aligned line from the two corpus files.
// EncodedPair is the same pair after both sides went through
// an encoder: two sequences of integer token ids.
//
// Example:
//   SentencePair { source: "the cat", target: "le chat" }
//   EncodedPair  { source: [7, 9],    target: [1, 4, 5, 2] }
//                                      ^sos        ^eos

use serde::{Deserialize, Serialize};

/// Integer id of a token in a Symbol Table or segmenter.
pub type TokenId = u32;

/// One aligned (source, target) sentence pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    pub source: String,
    pub target: String,
}

impl SentencePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// One encoded training sample.
///
/// Owned by whoever requested it; the dataset never keeps a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPair {
    pub source: Vec<TokenId>,
    pub target: Vec<TokenId>,
}

impl EncodedPair {
    pub fn new(source: Vec<TokenId>, target: Vec<TokenId>) -> Self {
        Self { source, target }
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }
}
