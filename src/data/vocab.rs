// ============================================================
// Layer 4 — Symbol Table (Vocabulary)
// ============================================================
// A bidirectional mapping between word-level tokens and ids.
//
// Id layout:
//
//   0 <pad> │ 1 <sos> │ 2 <eos> │ 3 <unk> │ 4 most frequent │ 5 ... │
//   ─────── reserved, never evicted ───────┴──── ranked corpus tokens ──
//
// Construction (VocabBuilder):
//   1. Tokenize one side of every sentence pair
//   2. Count each token, remembering first-seen order
//   3. Drop tokens seen fewer than `min_freq` times
//   4. Stable-sort by count descending (ties keep first-seen order)
//   5. Keep at most `max_tokens` of them after the reserved ids
//
// A table has two construction paths: built fresh from a corpus,
// or rebuilt from a persisted VocabRecord. Both produce the same
// type with the same lookup behaviour; unseen tokens resolve to
// the <unk> id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    language::{Language, Side},
    sentence_pair::{SentencePair, TokenId},
    specials::{SpecialIds, EOS_TOKEN, PAD_TOKEN, RESERVED_TOKENS, SOS_TOKEN, UNK_TOKEN},
    traits::Tokenizer,
};
use crate::error::{PipelineError, PipelineResult};

/// Default cap on corpus tokens kept in a table.
pub const DEFAULT_MAX_TOKENS: usize = 10_000;

/// Default minimum occurrence count for a corpus token.
pub const DEFAULT_MIN_FREQ: usize = 2;

// ─── VocabRecord ──────────────────────────────────────────────────────────────
/// The persisted form of a SymbolTable: both directions of the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabRecord {
    pub token_to_id: HashMap<String, TokenId>,
    pub id_to_token: Vec<String>,
}

// ─── SymbolTable ──────────────────────────────────────────────────────────────
/// Immutable token ↔ id mapping with reserved control symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    token_to_id: HashMap<String, TokenId>,
    id_to_token: Vec<String>,
    specials:    SpecialIds,
}

impl SymbolTable {
    /// Build a table from tokens already in ranked order.
    /// Reserved symbols are placed first; duplicates and reserved
    /// names inside `ranked` are skipped.
    fn from_ranked<I>(ranked: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut token_to_id = HashMap::new();
        let mut id_to_token = Vec::new();

        let reserved = RESERVED_TOKENS.iter().map(|t| t.to_string());
        for token in reserved.chain(ranked) {
            if token_to_id.contains_key(&token) {
                continue;
            }
            token_to_id.insert(token.clone(), id_to_token.len() as TokenId);
            id_to_token.push(token);
        }

        Self {
            token_to_id,
            id_to_token,
            specials: SpecialIds::default(),
        }
    }

    /// A table holding only the four reserved symbols.
    pub fn reserved_only() -> Self {
        Self::from_ranked(std::iter::empty())
    }

    /// Rebuild a table from its persisted record.
    ///
    /// The two directions must agree, and all four reserved
    /// symbols must be present.
    pub fn from_record(record: VocabRecord) -> PipelineResult<Self> {
        let VocabRecord { token_to_id, id_to_token } = record;

        if token_to_id.len() != id_to_token.len() {
            return Err(PipelineError::InvalidVocab(format!(
                "{} forward entries but {} reverse entries",
                token_to_id.len(),
                id_to_token.len()
            )));
        }

        for (id, token) in id_to_token.iter().enumerate() {
            match token_to_id.get(token) {
                Some(&mapped) if mapped as usize == id => {}
                _ => {
                    return Err(PipelineError::InvalidVocab(format!(
                        "token '{token}' at id {id} is not mapped back to {id}"
                    )));
                }
            }
        }

        let reserved_id = |name: &str| {
            token_to_id.get(name).copied().ok_or_else(|| {
                PipelineError::InvalidVocab(format!("missing reserved symbol '{name}'"))
            })
        };
        let specials = SpecialIds {
            pad: reserved_id(PAD_TOKEN)?,
            sos: reserved_id(SOS_TOKEN)?,
            eos: reserved_id(EOS_TOKEN)?,
            unk: reserved_id(UNK_TOKEN)?,
        };

        Ok(Self {
            token_to_id,
            id_to_token,
            specials,
        })
    }

    /// The persisted form of this table.
    pub fn to_record(&self) -> VocabRecord {
        VocabRecord {
            token_to_id: self.token_to_id.clone(),
            id_to_token: self.id_to_token.clone(),
        }
    }

    /// Id of `token`, or the unknown id when absent.
    pub fn lookup(&self, token: &str) -> TokenId {
        self.token_to_id
            .get(token)
            .copied()
            .unwrap_or(self.specials.unk)
    }

    /// Token at `id`, if the id is inside the table.
    pub fn token(&self, id: TokenId) -> Option<&str> {
        self.id_to_token.get(id as usize).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// Number of entries, reserved symbols included.
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    pub fn specials(&self) -> SpecialIds {
        self.specials
    }

    /// Tokens in id order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.id_to_token.iter().map(String::as_str)
    }

    /// Map ids back to tokens. Start and pad ids are skipped and
    /// decoding stops at the first end-of-sequence id.
    pub fn decode(&self, ids: &[TokenId]) -> Vec<&str> {
        let SpecialIds { pad, sos, eos, unk } = self.specials;
        let unk_token = self.token(unk).unwrap_or(UNK_TOKEN);

        ids.iter()
            .copied()
            .take_while(|&id| id != eos)
            .filter(|&id| id != pad && id != sos)
            .map(|id| self.token(id).unwrap_or(unk_token))
            .collect()
    }
}

// ─── VocabBuilder ─────────────────────────────────────────────────────────────
/// Frequency-capped Symbol Table construction.
#[derive(Debug, Clone, Copy)]
pub struct VocabBuilder {
    max_tokens: usize,
    min_freq:   usize,
}

impl Default for VocabBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS, DEFAULT_MIN_FREQ)
    }
}

impl VocabBuilder {
    /// `max_tokens` counts corpus tokens only; the four reserved
    /// symbols come on top.
    pub fn new(max_tokens: usize, min_freq: usize) -> Self {
        Self { max_tokens, min_freq }
    }

    /// Build a table from pre-tokenized sentences.
    pub fn build<I, S>(&self, sentences: I) -> SymbolTable
    where
        I: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        // counts[i] = (token, count); index maps token → i.
        // Vec order is first-seen order.
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index:  HashMap<String, usize> = HashMap::new();

        for sentence in sentences {
            for token in sentence {
                let token = token.as_ref();
                if RESERVED_TOKENS.contains(&token) {
                    continue;
                }
                match index.get(token) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        index.insert(token.to_string(), counts.len());
                        counts.push((token.to_string(), 1));
                    }
                }
            }
        }

        let distinct = counts.len();
        counts.retain(|(_, count)| *count >= self.min_freq);
        // sort_by is stable, so equal counts stay in first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(self.max_tokens);

        tracing::debug!(
            "Vocabulary: {} distinct tokens, {} kept (min_freq={}, max_tokens={})",
            distinct,
            counts.len(),
            self.min_freq,
            self.max_tokens,
        );

        SymbolTable::from_ranked(counts.into_iter().map(|(token, _)| token))
    }

    /// Tokenize one side of every pair and build its table.
    pub fn build_from_pairs(
        &self,
        pairs:     &[SentencePair],
        side:      Side,
        language:  Language,
        tokenizer: &dyn Tokenizer,
    ) -> SymbolTable {
        let sentences = pairs.iter().map(|pair| {
            let text = match side {
                Side::Source => &pair.source,
                Side::Target => &pair.target,
            };
            tokenizer.tokenize(text, language)
        });

        let table = self.build(sentences);
        tracing::info!("Built {} vocabulary ({:?} side): {} entries", language, side, table.len());
        table
    }
}
