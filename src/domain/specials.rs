// ============================================================
// Layer 3 — Reserved Symbols
// ============================================================
// Four control symbols are always present in every vocabulary:
//
//   id 0  <pad>  fills rows up to the batch width
//   id 1  <sos>  first id of every target sequence
//   id 2  <eos>  last id of every target sequence
//   id 3  <unk>  any token the vocabulary has never seen
//
// Subword models name start/end differently (<s>, </s>) and
// choose their own ids, so the ids are carried around in a
// SpecialIds value per language instead of being hard-coded.

use serde::{Deserialize, Serialize};

use crate::domain::sentence_pair::TokenId;

pub const PAD_TOKEN: &str = "<pad>";
pub const SOS_TOKEN: &str = "<sos>";
pub const EOS_TOKEN: &str = "<eos>";
pub const UNK_TOKEN: &str = "<unk>";

/// Reserved word-level symbols in id order.
pub const RESERVED_TOKENS: [&str; 4] = [PAD_TOKEN, SOS_TOKEN, EOS_TOKEN, UNK_TOKEN];

/// Piece names used by subword models.
pub const PIECE_PAD: &str = "<pad>";
pub const PIECE_SOS: &str = "<s>";
pub const PIECE_EOS: &str = "</s>";
pub const PIECE_UNK: &str = "<unk>";

/// The control ids of one language, shared by its encoder and
/// the collator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialIds {
    pub pad: TokenId,
    pub sos: TokenId,
    pub eos: TokenId,
    pub unk: TokenId,
}

impl Default for SpecialIds {
    /// The fixed word-level layout: pad=0, sos=1, eos=2, unk=3.
    fn default() -> Self {
        Self {
            pad: 0,
            sos: 1,
            eos: 2,
            unk: 3,
        }
    }
}

impl SpecialIds {
    /// Wrap `body` with start-of-sequence and end-of-sequence ids.
    pub fn wrap(&self, body: impl IntoIterator<Item = TokenId>) -> Vec<TokenId> {
        let mut ids = vec![self.sos];
        ids.extend(body);
        ids.push(self.eos);
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let s = SpecialIds::default();
        assert_eq!((s.pad, s.sos, s.eos, s.unk), (0, 1, 2, 3));
    }

    #[test]
    fn test_wrap_empty_body() {
        let s = SpecialIds::default();
        assert_eq!(s.wrap(Vec::new()), vec![1, 2]);
    }
}
