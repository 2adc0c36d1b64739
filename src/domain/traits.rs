// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline consumes three external capabilities:
//
//   CorpusSource → produces aligned sentence pairs
//   Tokenizer    → splits text into word-level symbols
//   Segmenter    → splits text into subword pieces and maps
//                  each piece to an integer id
//
// Implementations:
//   - TextFileCorpus  (data::corpus)    implements CorpusSource
//   - RegexTokenizer  (data::tokenizer) implements Tokenizer
//   - HfSegmenter     (infra::segmenter) implements Segmenter
//
// Tokenizer and Segmenter are Send + Sync: a dataset is read
// from several data-loader workers at once.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::{
    language::Language,
    sentence_pair::{SentencePair, TokenId},
};
use crate::error::PipelineResult;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can load an aligned parallel corpus.
pub trait CorpusSource {
    /// Load all sentence pairs in corpus order.
    fn load_pairs(&self) -> PipelineResult<Vec<SentencePair>>;
}

// ─── Tokenizer ────────────────────────────────────────────────────────────────
/// Splits raw text into word-level symbols for a given language.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str, language: Language) -> Vec<String>;
}

// ─── Segmenter ────────────────────────────────────────────────────────────────
/// A trained subword model.
pub trait Segmenter: Send + Sync {
    /// Split text into subword pieces.
    fn encode_as_pieces(&self, text: &str) -> PipelineResult<Vec<String>>;

    /// Map a piece to its id. Unknown pieces map to the unknown id.
    fn piece_to_id(&self, piece: &str) -> TokenId;
}
