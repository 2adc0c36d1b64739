// ============================================================
// Layer 6 — Subword Segmenter
// ============================================================
// Adapts a trained HuggingFace tokenizer (tokenizer.json) to
// the Segmenter trait used by the subword encoding path.
//
//   encode_as_pieces("le chat") → ["▁le", "▁chat"]   (model pieces)
//   piece_to_id("▁chat")        → 57
//   piece_to_id("never-seen")   → id of <unk>
//
// The tokenizer file is loaded once and is read-only afterwards,
// so one HfSegmenter can be shared across loader workers.
//
// Reference: Sennrich et al. (2016) BPE paper
//            Kudo & Richardson (2018) SentencePiece paper

use std::{path::Path, str::FromStr};

use tokenizers::Tokenizer;

use crate::domain::{
    sentence_pair::TokenId,
    specials::{PIECE_UNK, UNK_TOKEN},
    traits::Segmenter,
};
use crate::error::{PipelineError, PipelineResult};

pub struct HfSegmenter {
    tokenizer: Tokenizer,
    unk_id:    TokenId,
}

impl HfSegmenter {
    /// Load a segmenter from a `tokenizer.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            PipelineError::Segmenter(format!("cannot load '{}': {e}", path.display()))
        })?;

        tracing::info!("Loaded subword model from '{}'", path.display());
        Self::from_tokenizer(tokenizer)
    }

    /// Build a segmenter from the JSON text of a tokenizer file.
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        let tokenizer = Tokenizer::from_str(json)
            .map_err(|e| PipelineError::Segmenter(format!("cannot parse tokenizer JSON: {e}")))?;
        Self::from_tokenizer(tokenizer)
    }

    /// The model must define an unknown piece for unseen input.
    pub fn from_tokenizer(tokenizer: Tokenizer) -> PipelineResult<Self> {
        let unk_id = tokenizer
            .token_to_id(PIECE_UNK)
            .or_else(|| tokenizer.token_to_id(UNK_TOKEN))
            .ok_or_else(|| {
                PipelineError::Segmenter(format!("subword model has no '{PIECE_UNK}' piece"))
            })?;

        Ok(Self { tokenizer, unk_id })
    }

    /// Number of pieces in the model, added tokens included.
    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }
}

impl Segmenter for HfSegmenter {
    fn encode_as_pieces(&self, text: &str) -> PipelineResult<Vec<String>> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| PipelineError::Segmenter(format!("cannot segment text: {e}")))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn piece_to_id(&self, piece: &str) -> TokenId {
        self.tokenizer.token_to_id(piece).unwrap_or(self.unk_id)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A word-level tokenizer.json with subword-style control pieces.
    pub(crate) fn word_level_json() -> String {
        serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": { "type": "Whitespace" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": {
                    "<pad>": 0, "<unk>": 1, "<s>": 2, "</s>": 3,
                    "le": 4, "chat": 5, "noir": 6
                },
                "unk_token": "<unk>"
            }
        })
        .to_string()
    }

    #[test]
    fn test_pieces_and_ids() {
        let seg = HfSegmenter::from_json(&word_level_json()).unwrap();
        assert_eq!(seg.encode_as_pieces("le chat").unwrap(), vec!["le", "chat"]);
        assert_eq!(seg.piece_to_id("chat"), 5);
        assert_eq!(seg.piece_to_id("</s>"), 3);
        assert_eq!(seg.vocab_size(), 7);
    }

    #[test]
    fn test_unknown_piece_maps_to_unk() {
        let seg = HfSegmenter::from_json(&word_level_json()).unwrap();
        assert_eq!(seg.piece_to_id("chien"), 1);
        let pieces = seg.encode_as_pieces("le chien").unwrap();
        let ids: Vec<TokenId> = pieces.iter().map(|p| seg.piece_to_id(p)).collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn test_bad_json_is_segmenter_error() {
        assert!(matches!(
            HfSegmenter::from_json("{not json"),
            Err(PipelineError::Segmenter(_))
        ));
    }
}
