// ============================================================
// Layer 4 — Translation Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<EncodedPair>
// into Int tensors ready for an encoder-decoder model.
//
// The sorting and padding happen in the Collator; this type
// only moves the padded buffers onto the requested device:
//
//   Collator::collate → PaddedBatch (flat Vec<u32> buffers)
//                     → Tensor::from_data(..., [rows, width])
//
// Output shapes:
//   source          [batch_size, max_source_len]
//   target          [batch_size, max_target_len]
//   source_lengths  [batch_size]
//   target_lengths  [batch_size]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    tensor::{backend::Backend, Int, Tensor, TensorData},
};

use crate::data::collator::{Collator, PaddedBatch};
use crate::domain::sentence_pair::{EncodedPair, TokenId};

// ─── TranslationBatch ─────────────────────────────────────────────────────────
/// A padded batch of sentence pairs, rows sorted by source length
/// (longest first).
#[derive(Debug, Clone)]
pub struct TranslationBatch<B: Backend> {
    /// Padded source ids — shape: [batch_size, max_source_len]
    pub source: Tensor<B, 2, Int>,

    /// Padded target ids — shape: [batch_size, max_target_len]
    pub target: Tensor<B, 2, Int>,

    /// Pre-padding source length of each row — shape: [batch_size]
    pub source_lengths: Tensor<B, 1, Int>,

    /// Pre-padding target length of each row — shape: [batch_size]
    pub target_lengths: Tensor<B, 1, Int>,
}

// ─── TranslationBatcher ───────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct TranslationBatcher {
    collator: Collator,
}

impl TranslationBatcher {
    pub fn new(collator: Collator) -> Self {
        Self { collator }
    }

    /// Move an already collated batch onto `device`.
    pub fn to_tensors<B: Backend>(&self, padded: PaddedBatch, device: &B::Device) -> TranslationBatch<B> {
        let rows = padded.batch_size();

        TranslationBatch {
            source:         matrix(padded.source, rows, padded.source_width, device),
            target:         matrix(padded.target, rows, padded.target_width, device),
            source_lengths: vector(&padded.source_lengths, device),
            target_lengths: vector(&padded.target_lengths, device),
        }
    }
}

impl<B: Backend> Batcher<B, EncodedPair, TranslationBatch<B>> for TranslationBatcher {
    fn batch(&self, items: Vec<EncodedPair>, device: &B::Device) -> TranslationBatch<B> {
        let padded = self.collator.collate(items);

        tracing::debug!(
            "Batch: {} rows, source width {}, target width {}",
            padded.batch_size(),
            padded.source_width,
            padded.target_width,
        );

        self.to_tensors(padded, device)
    }
}

fn matrix<B: Backend>(ids: Vec<TokenId>, rows: usize, cols: usize, device: &B::Device) -> Tensor<B, 2, Int> {
    let flat: Vec<i64> = ids.into_iter().map(i64::from).collect();
    Tensor::from_data(TensorData::new(flat, [rows, cols]), device)
}

fn vector<B: Backend>(lengths: &[usize], device: &B::Device) -> Tensor<B, 1, Int> {
    let flat: Vec<i64> = lengths.iter().map(|&n| n as i64).collect();
    let len = flat.len();
    Tensor::from_data(TensorData::new(flat, [len]), device)
}
