// ============================================================
// Layer 4 — Batch Collator
// ============================================================
// Assembles a list of variable-length EncodedPairs into one
// rectangular batch plus per-row original lengths.
//
// Steps:
//   1. Pair every sample with its input position
//   2. Stable-sort by source length, longest first
//   3. Right-pad each source row to the longest source, using
//      the source pad id; same for targets with the target pad id
//   4. Flatten rows into row-major buffers and record lengths
//
// Example (source pad = 0):
//
//   input            sorted + padded       lengths
//   [7, 8, 9]        [4, 5, 6, 7, 8]       5
//   [4, 5, 6, 7, 8]  [7, 8, 9, 0, 0]       3
//
// Row i describes the same sample in every output. Packed
// recurrent layers need the descending source-length order.

use crate::domain::{
    sentence_pair::{EncodedPair, TokenId},
    specials::SpecialIds,
};

/// A padded, length-sorted batch of plain id buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedBatch {
    /// Row-major `[batch_size, source_width]`.
    pub source:         Vec<TokenId>,
    /// Row-major `[batch_size, target_width]`.
    pub target:         Vec<TokenId>,
    pub source_lengths: Vec<usize>,
    pub target_lengths: Vec<usize>,
    pub source_width:   usize,
    pub target_width:   usize,
    /// `order[i]` is the input position of the sample now in row `i`.
    pub order:          Vec<usize>,
}

impl PaddedBatch {
    pub fn batch_size(&self) -> usize {
        self.source_lengths.len()
    }

    pub fn source_row(&self, row: usize) -> &[TokenId] {
        &self.source[row * self.source_width..(row + 1) * self.source_width]
    }

    pub fn target_row(&self, row: usize) -> &[TokenId] {
        &self.target[row * self.target_width..(row + 1) * self.target_width]
    }
}

/// Sorts and pads EncodedPairs using each language's pad id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collator {
    source_pad: TokenId,
    target_pad: TokenId,
}

impl Collator {
    pub fn new(source: SpecialIds, target: SpecialIds) -> Self {
        Self {
            source_pad: source.pad,
            target_pad: target.pad,
        }
    }

    pub fn source_pad(&self) -> TokenId {
        self.source_pad
    }

    pub fn target_pad(&self) -> TokenId {
        self.target_pad
    }

    pub fn collate(&self, items: Vec<EncodedPair>) -> PaddedBatch {
        // ── Steps 1-2: stable sort by source length, descending ──────────────
        let mut indexed: Vec<(usize, EncodedPair)> = items.into_iter().enumerate().collect();
        indexed.sort_by(|a, b| b.1.source_len().cmp(&a.1.source_len()));

        let source_width = indexed.iter().map(|(_, p)| p.source_len()).max().unwrap_or(0);
        let target_width = indexed.iter().map(|(_, p)| p.target_len()).max().unwrap_or(0);
        let batch_size   = indexed.len();

        // ── Steps 3-4: pad into flat row-major buffers ───────────────────────
        let mut source         = Vec::with_capacity(batch_size * source_width);
        let mut target         = Vec::with_capacity(batch_size * target_width);
        let mut source_lengths = Vec::with_capacity(batch_size);
        let mut target_lengths = Vec::with_capacity(batch_size);
        let mut order          = Vec::with_capacity(batch_size);

        for (position, pair) in indexed {
            pad_into(&mut source, &pair.source, source_width, self.source_pad);
            pad_into(&mut target, &pair.target, target_width, self.target_pad);
            source_lengths.push(pair.source_len());
            target_lengths.push(pair.target_len());
            order.push(position);
        }

        PaddedBatch {
            source,
            target,
            source_lengths,
            target_lengths,
            source_width,
            target_width,
            order,
        }
    }
}

fn pad_into(out: &mut Vec<TokenId>, ids: &[TokenId], width: usize, pad: TokenId) {
    out.extend_from_slice(ids);
    out.extend(std::iter::repeat(pad).take(width - ids.len()));
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn pair(source: &[TokenId], target: &[TokenId]) -> EncodedPair {
        EncodedPair::new(source.to_vec(), target.to_vec())
    }

    fn collator(source_pad: TokenId, target_pad: TokenId) -> Collator {
        Collator::new(
            SpecialIds { pad: source_pad, ..SpecialIds::default() },
            SpecialIds { pad: target_pad, ..SpecialIds::default() },
        )
    }

    #[test]
    fn test_longest_source_comes_first() {
        let batch = collator(0, 0).collate(vec![
            pair(&[7, 8, 9], &[1, 5, 2]),
            pair(&[4, 5, 6, 7, 8], &[1, 2]),
        ]);

        assert_eq!(batch.source_width, 5);
        assert_eq!(batch.source_lengths, vec![5, 3]);
        assert_eq!(batch.source_row(0), &[4, 5, 6, 7, 8]);
        assert_eq!(batch.source_row(1), &[7, 8, 9, 0, 0]);
        assert_eq!(batch.order, vec![1, 0]);
    }

    #[test]
    fn test_target_rows_follow_source_order() {
        let batch = collator(0, 0).collate(vec![
            pair(&[7], &[1, 5, 6, 2]),
            pair(&[4, 5], &[1, 2]),
        ]);

        assert_eq!(batch.target_width, 4);
        assert_eq!(batch.target_lengths, vec![2, 4]);
        assert_eq!(batch.target_row(0), &[1, 2, 0, 0]);
        assert_eq!(batch.target_row(1), &[1, 5, 6, 2]);
    }

    #[test]
    fn test_languages_use_their_own_pad_ids() {
        let batch = collator(9, 7).collate(vec![
            pair(&[4], &[1, 2]),
            pair(&[4, 4], &[1, 5, 2]),
        ]);

        assert_eq!(batch.source_row(1), &[4, 9]);
        assert_eq!(batch.target_row(1), &[1, 2, 7]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let batch = collator(0, 0).collate(vec![
            pair(&[1, 1], &[10]),
            pair(&[2, 2, 2], &[20]),
            pair(&[3, 3], &[30]),
        ]);

        assert_eq!(batch.order, vec![1, 0, 2]);
        assert_eq!(batch.target, vec![20, 10, 30]);
    }

    #[test]
    fn test_source_lengths_non_increasing_and_padding() {
        let items: Vec<EncodedPair> = [3usize, 1, 6, 4, 6, 2]
            .iter()
            .map(|&n| pair(&vec![5; n], &[1, 2]))
            .collect();
        let batch = collator(0, 0).collate(items);

        assert!(batch.source_lengths.windows(2).all(|w| w[0] >= w[1]));
        for row in 0..batch.batch_size() {
            let cells = batch.source_row(row);
            assert_eq!(cells.len(), 6);
            assert!(cells[batch.source_lengths[row]..].iter().all(|&c| c == 0));
        }
    }

    #[test]
    fn test_single_sample_batch() {
        let batch = collator(0, 0).collate(vec![pair(&[4, 5], &[1, 6, 2])]);
        assert_eq!(batch.batch_size(), 1);
        assert_eq!(batch.source, vec![4, 5]);
        assert_eq!(batch.target, vec![1, 6, 2]);
        assert_eq!(batch.order, vec![0]);
    }

    #[test]
    fn test_empty_input() {
        let batch = collator(0, 0).collate(Vec::new());
        assert_eq!(batch.batch_size(), 0);
        assert_eq!(batch.source_width, 0);
    }
}
