// ============================================================
// Layer 4 — Pair Dataset
// ============================================================
// An indexable view of a parallel corpus.
//
// Encoding is lazy: the dataset keeps the raw sentence pairs
// and runs both encoders only when a sample is requested.
// `materialize()` is the explicit eager path, producing the
// full Vec<EncodedPair> that gets persisted to disk and fed
// to Burn's data loader.
//
//   PairDataset ──sample(i)──▶ (source encoder, target encoder) ──▶ EncodedPair
//
// Not a Burn Dataset: Dataset::get has no error channel, so
// the data loader is fed the materialized samples instead.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use std::sync::Arc;

use crate::data::encoder::{Encoder, SubwordEncoder, WordEncoder};
use crate::data::vocab::SymbolTable;
use crate::domain::{
    language::Language,
    sentence_pair::{EncodedPair, SentencePair},
    specials::SpecialIds,
    traits::{Segmenter, Tokenizer},
};
use crate::error::{PipelineError, PipelineResult};

/// A lazily encoded view of a parallel corpus.
pub struct PairDataset {
    pairs:          Vec<SentencePair>,
    source_encoder: Box<dyn Encoder>,
    target_encoder: Box<dyn Encoder>,
}

impl PairDataset {
    /// Build from any pair of encoders.
    pub fn new(
        pairs:          Vec<SentencePair>,
        source_encoder: Box<dyn Encoder>,
        target_encoder: Box<dyn Encoder>,
    ) -> Self {
        Self {
            pairs,
            source_encoder,
            target_encoder,
        }
    }

    /// Word-level dataset: one Symbol Table per language.
    pub fn word_level(
        pairs:        Vec<SentencePair>,
        tokenizer:    Arc<dyn Tokenizer>,
        source_vocab: Arc<SymbolTable>,
        source_lang:  Language,
        target_vocab: Arc<SymbolTable>,
        target_lang:  Language,
    ) -> Self {
        let source = WordEncoder::source(tokenizer.clone(), source_vocab, source_lang);
        let target = WordEncoder::target(tokenizer, target_vocab, target_lang);
        Self::new(pairs, Box::new(source), Box::new(target))
    }

    /// Subword dataset: one segmenter per language.
    pub fn subword(
        pairs:            Vec<SentencePair>,
        source_segmenter: Arc<dyn Segmenter>,
        target_segmenter: Arc<dyn Segmenter>,
    ) -> Self {
        let source = SubwordEncoder::new(source_segmenter);
        let target = SubwordEncoder::new(target_segmenter);
        Self::new(pairs, Box::new(source), Box::new(target))
    }

    /// Encode the sample at `index`.
    pub fn sample(&self, index: usize) -> PipelineResult<EncodedPair> {
        let pair = self.pairs.get(index).ok_or(PipelineError::IndexOutOfRange {
            index,
            len: self.pairs.len(),
        })?;

        Ok(EncodedPair::new(
            self.source_encoder.encode(&pair.source)?,
            self.target_encoder.encode(&pair.target)?,
        ))
    }

    /// Encode every sample, in corpus order.
    pub fn materialize(&self) -> PipelineResult<Vec<EncodedPair>> {
        (0..self.pairs.len()).map(|i| self.sample(i)).collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[SentencePair] {
        &self.pairs
    }

    pub fn source_specials(&self) -> SpecialIds {
        self.source_encoder.specials()
    }

    pub fn target_specials(&self) -> SpecialIds {
        self.target_encoder.specials()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::tests::{FailingSegmenter, FixedSegmenter};
    use crate::data::{tokenizer::RegexTokenizer, vocab::VocabBuilder};
    use crate::domain::language::Side;

    fn word_dataset() -> PairDataset {
        let pairs = vec![
            SentencePair::new("the cat", "le chat"),
            SentencePair::new("the black cat", "le chat noir"),
        ];
        let tok  = Arc::new(RegexTokenizer::new().unwrap());
        let src  = VocabBuilder::new(10, 1).build_from_pairs(&pairs, Side::Source, Language::En, tok.as_ref());
        let tgt  = VocabBuilder::new(10, 1).build_from_pairs(&pairs, Side::Target, Language::Fr, tok.as_ref());
        PairDataset::word_level(pairs, tok, Arc::new(src), Language::En, Arc::new(tgt), Language::Fr)
    }

    #[test]
    fn test_length_matches_corpus() {
        let ds = word_dataset();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.pairs().len(), 2);
    }

    #[test]
    fn test_sample_encodes_both_sides() {
        let ds     = word_dataset();
        let sample = ds.sample(1).unwrap();
        // source: the=4 cat=5 black=6, no markers
        assert_eq!(sample.source, vec![4, 6, 5]);
        // target: <sos> le=4 chat=5 noir=6 <eos>
        assert_eq!(sample.target, vec![1, 4, 5, 6, 2]);
    }

    #[test]
    fn test_out_of_range_index() {
        let ds = word_dataset();
        assert!(matches!(
            ds.sample(2),
            Err(PipelineError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_materialize_matches_lazy_access() {
        let ds  = word_dataset();
        let all = ds.materialize().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], ds.sample(0).unwrap());
        assert_eq!(all[1], ds.sample(1).unwrap());
    }

    #[test]
    fn test_subword_dataset_is_symmetric() {
        let seg = Arc::new(FixedSegmenter::new(&["<pad>", "<unk>", "<s>", "</s>", "▁a"]));
        let ds  = PairDataset::subword(
            vec![SentencePair::new("A", "a b")],
            seg.clone(),
            seg,
        );
        let sample = ds.sample(0).unwrap();
        assert_eq!(sample.source, vec![2, 4, 3]);
        assert_eq!(sample.target, vec![2, 4, 1, 3]);
        assert_eq!(ds.source_specials().pad, 0);
    }

    #[test]
    fn test_encoding_error_reaches_caller() {
        let seg = Arc::new(FailingSegmenter::new(&["<pad>", "<unk>", "<s>", "</s>"]));
        let ds  = PairDataset::subword(
            vec![
                SentencePair::new("good", "good"),
                SentencePair::new("bad", "good"),
                SentencePair::new("good", "good"),
            ],
            seg.clone(),
            seg,
        );

        assert!(ds.sample(0).is_ok());
        assert!(matches!(ds.sample(1), Err(PipelineError::Segmenter(_))));
        assert!(matches!(ds.materialize(), Err(PipelineError::Segmenter(_))));
    }
}
