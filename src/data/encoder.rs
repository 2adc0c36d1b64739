// ============================================================
// Layer 4 — Sentence Encoders
// ============================================================
// Turn one raw sentence into a sequence of integer token ids.
//
// Two strategies implement the Encoder trait:
//
//   WordEncoder    tokenizer → SymbolTable lookup
//                  source side: [w1, w2, ..., wn]
//                  target side: [<sos>, w1, ..., wn, <eos>]
//
//   SubwordEncoder lower-case → segmenter pieces → piece ids
//                  both sides:  [<s>, p1, ..., pn, </s>]
//
// Every target-side sequence, and every subword sequence, is
// non-empty even when the text produces no symbols, because
// the boundary markers are always present.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::data::vocab::SymbolTable;
use crate::domain::{
    language::{Language, Side},
    sentence_pair::TokenId,
    specials::{SpecialIds, PIECE_EOS, PIECE_PAD, PIECE_SOS, PIECE_UNK},
    traits::{Segmenter, Tokenizer},
};
use crate::error::PipelineResult;

/// Which encoding strategy produced a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    Word,
    Subword,
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingMode::Word => f.write_str("word"),
            EncodingMode::Subword => f.write_str("subword"),
        }
    }
}

// ─── Encoder ──────────────────────────────────────────────────────────────────
/// Encodes the text of one language into token ids.
pub trait Encoder: Send + Sync {
    fn encode(&self, text: &str) -> PipelineResult<Vec<TokenId>>;

    /// Control ids of the language this encoder produces.
    fn specials(&self) -> SpecialIds;
}

// ─── WordEncoder ──────────────────────────────────────────────────────────────
/// Word-level encoding through a Symbol Table.
pub struct WordEncoder {
    tokenizer: Arc<dyn Tokenizer>,
    table:     Arc<SymbolTable>,
    language:  Language,
    markers:   bool,
}

impl WordEncoder {
    /// Source-side encoder: raw ids, no boundary markers.
    pub fn source(tokenizer: Arc<dyn Tokenizer>, table: Arc<SymbolTable>, language: Language) -> Self {
        Self::for_side(Side::Source, tokenizer, table, language)
    }

    /// Target-side encoder: ids wrapped in start/end markers.
    pub fn target(tokenizer: Arc<dyn Tokenizer>, table: Arc<SymbolTable>, language: Language) -> Self {
        Self::for_side(Side::Target, tokenizer, table, language)
    }

    pub fn for_side(
        side:      Side,
        tokenizer: Arc<dyn Tokenizer>,
        table:     Arc<SymbolTable>,
        language:  Language,
    ) -> Self {
        Self {
            tokenizer,
            table,
            language,
            markers: side == Side::Target,
        }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }
}

impl Encoder for WordEncoder {
    fn encode(&self, text: &str) -> PipelineResult<Vec<TokenId>> {
        let body = self
            .tokenizer
            .tokenize(text, self.language)
            .into_iter()
            .map(|token| self.table.lookup(&token));

        Ok(if self.markers {
            self.table.specials().wrap(body)
        } else {
            body.collect()
        })
    }

    fn specials(&self) -> SpecialIds {
        self.table.specials()
    }
}

// ─── SubwordEncoder ───────────────────────────────────────────────────────────
/// Subword encoding through a trained segmenter.
pub struct SubwordEncoder {
    segmenter: Arc<dyn Segmenter>,
    specials:  SpecialIds,
}

impl SubwordEncoder {
    pub fn new(segmenter: Arc<dyn Segmenter>) -> Self {
        let specials = specials_from_segmenter(segmenter.as_ref());
        Self { segmenter, specials }
    }
}

impl Encoder for SubwordEncoder {
    fn encode(&self, text: &str) -> PipelineResult<Vec<TokenId>> {
        let pieces = self.segmenter.encode_as_pieces(&text.to_lowercase())?;
        let body   = pieces.iter().map(|piece| self.segmenter.piece_to_id(piece));
        Ok(self.specials.wrap(body))
    }

    fn specials(&self) -> SpecialIds {
        self.specials
    }
}

/// Resolve the control ids of a subword model by piece name.
pub fn specials_from_segmenter(segmenter: &dyn Segmenter) -> SpecialIds {
    SpecialIds {
        pad: segmenter.piece_to_id(PIECE_PAD),
        sos: segmenter.piece_to_id(PIECE_SOS),
        eos: segmenter.piece_to_id(PIECE_EOS),
        unk: segmenter.piece_to_id(PIECE_UNK),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::{tokenizer::RegexTokenizer, vocab::VocabBuilder};
    use crate::error::PipelineError;
    use std::collections::HashMap;

    /// Whitespace segmenter over a fixed piece inventory.
    pub(crate) struct FixedSegmenter {
        ids: HashMap<String, TokenId>,
    }

    impl FixedSegmenter {
        pub(crate) fn new(pieces: &[&str]) -> Self {
            let ids = pieces
                .iter()
                .enumerate()
                .map(|(i, p)| (p.to_string(), i as TokenId))
                .collect();
            Self { ids }
        }
    }

    impl Segmenter for FixedSegmenter {
        fn encode_as_pieces(&self, text: &str) -> PipelineResult<Vec<String>> {
            Ok(text.split_whitespace().map(|p| format!("▁{p}")).collect())
        }

        fn piece_to_id(&self, piece: &str) -> TokenId {
            self.ids.get(piece).copied().unwrap_or(self.ids[PIECE_UNK])
        }
    }

    /// FixedSegmenter that refuses any text containing `bad`.
    pub(crate) struct FailingSegmenter {
        inner: FixedSegmenter,
    }

    impl FailingSegmenter {
        pub(crate) fn new(pieces: &[&str]) -> Self {
            Self { inner: FixedSegmenter::new(pieces) }
        }
    }

    impl Segmenter for FailingSegmenter {
        fn encode_as_pieces(&self, text: &str) -> PipelineResult<Vec<String>> {
            if text.contains("bad") {
                return Err(PipelineError::Segmenter(format!("cannot segment '{text}'")));
            }
            self.inner.encode_as_pieces(text)
        }

        fn piece_to_id(&self, piece: &str) -> TokenId {
            self.inner.piece_to_id(piece)
        }
    }

    fn table(lines: &[&str]) -> Arc<SymbolTable> {
        let tok = RegexTokenizer::new().unwrap();
        let sentences = lines.iter().map(|l| tok.tokenize(l, Language::Fr));
        Arc::new(VocabBuilder::new(100, 1).build(sentences))
    }

    #[test]
    fn test_word_source_has_no_markers() {
        let tok = Arc::new(RegexTokenizer::new().unwrap());
        let enc = WordEncoder::source(tok, table(&["le chat"]), Language::Fr);
        assert_eq!(enc.encode("le chat").unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_word_target_is_wrapped() {
        let tok = Arc::new(RegexTokenizer::new().unwrap());
        let enc = WordEncoder::target(tok, table(&["le chat"]), Language::Fr);
        let ids = enc.encode("le chien").unwrap();
        assert_eq!(ids, vec![1, 4, 3, 2]);
        assert_eq!(ids.first(), Some(&enc.specials().sos));
        assert_eq!(ids.last(), Some(&enc.specials().eos));
    }

    #[test]
    fn test_word_target_of_empty_text_is_markers_only() {
        let tok = Arc::new(RegexTokenizer::new().unwrap());
        let enc = WordEncoder::target(tok, table(&[]), Language::Fr);
        assert_eq!(enc.encode("").unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_word_level_preserves_case() {
        let tok = Arc::new(RegexTokenizer::new().unwrap());
        let enc = WordEncoder::source(tok, table(&["le"]), Language::Fr);
        assert_eq!(enc.encode("Le").unwrap(), vec![3]);
    }

    #[test]
    fn test_subword_lowercases_and_wraps() {
        let seg = Arc::new(FixedSegmenter::new(&[
            "<pad>", "<unk>", "<s>", "</s>", "▁le", "▁chat",
        ]));
        let enc = SubwordEncoder::new(seg);

        assert_eq!(
            enc.specials(),
            SpecialIds { pad: 0, sos: 2, eos: 3, unk: 1 }
        );
        assert_eq!(enc.encode("Le CHAT noir").unwrap(), vec![2, 4, 5, 1, 3]);
        assert_eq!(enc.encode("").unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_segmenter_error_is_returned() {
        let seg = Arc::new(FailingSegmenter::new(&["<pad>", "<unk>", "<s>", "</s>"]));
        let enc = SubwordEncoder::new(seg);
        assert!(matches!(enc.encode("a bad line"), Err(PipelineError::Segmenter(_))));
    }
}
