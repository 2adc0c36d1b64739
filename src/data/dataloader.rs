// ============================================================
// Layer 4 — Batch Delivery
// ============================================================
// Wraps Burn's DataLoaderBuilder: encoded samples, held in an
// InMemDataset, plus the TranslationBatcher become a
// restartable stream of batches.
//
//   create_loader       reloaded Vec<EncodedPair> + Collator
//   create_pair_loader  PairDataset, materialized first so any
//                       encoding error is returned here
//
// Each call to `loader.iter()` is one epoch. With shuffling on,
// every epoch visits the samples in a new seeded order; the
// final batch of an epoch may be smaller than `batch_size`.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use std::sync::Arc;

use burn::{
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::InMemDataset,
    },
    tensor::backend::Backend,
};
use serde::{Deserialize, Serialize};

use crate::data::{
    batcher::{TranslationBatch, TranslationBatcher},
    collator::Collator,
    dataset::PairDataset,
};
use crate::domain::sentence_pair::EncodedPair;
use crate::error::PipelineResult;

/// Batch delivery options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderOptions {
    pub batch_size:  usize,
    pub shuffle:     bool,
    /// Shuffle seed; a random one is drawn when absent.
    pub seed:        Option<u64>,
    /// Worker threads; 0 batches on the calling thread.
    pub num_workers: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            batch_size:  32,
            shuffle:     false,
            seed:        None,
            num_workers: 0,
        }
    }
}

pub type TranslationLoader<B> = Arc<dyn DataLoader<B, TranslationBatch<B>>>;

/// Build a data loader yielding TranslationBatches from `samples`.
pub fn create_loader<B: Backend>(
    samples:  Vec<EncodedPair>,
    collator: Collator,
    options:  &LoaderOptions,
    device:   B::Device,
) -> TranslationLoader<B> {
    let batcher = TranslationBatcher::new(collator);

    let mut builder = DataLoaderBuilder::<B, EncodedPair, TranslationBatch<B>>::new(batcher)
        .batch_size(options.batch_size)
        .set_device(device);

    if options.num_workers > 0 {
        builder = builder.num_workers(options.num_workers);
    }

    if options.shuffle {
        let seed = options.seed.unwrap_or_else(rand::random);
        tracing::debug!("Shuffling each epoch with seed {}", seed);
        builder = builder.shuffle(seed);
    }

    tracing::info!(
        "Data loader: {} samples, batch_size={}, shuffle={}, workers={}",
        samples.len(),
        options.batch_size,
        options.shuffle,
        options.num_workers,
    );

    builder.build(InMemDataset::new(samples))
}

/// Encode every pair of `dataset` and build a loader over the
/// result, collating with the dataset's own pad ids.
pub fn create_pair_loader<B: Backend>(
    dataset: &PairDataset,
    options: &LoaderOptions,
    device:  B::Device,
) -> PipelineResult<TranslationLoader<B>> {
    let samples  = dataset.materialize()?;
    let collator = Collator::new(dataset.source_specials(), dataset.target_specials());
    Ok(create_loader(samples, collator, options, device))
}
