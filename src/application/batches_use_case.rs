// ============================================================
// Layer 2 — BatchesUseCase
// ============================================================
// Streams batches from a prepared dataset, the way a training
// loop would consume them:
//
//   Step 1: Load manifest + encoded pairs  (Layer 6 - infra)
//   Step 2: Collator from the manifest     (Layer 4 - data)
//   Step 3: Build the data loader          (Layer 4 - data)
//   Step 4: Iterate N epochs, logging each batch's shape
//
// The manifest carries both languages' pad ids, so neither the
// vocabularies nor the segmenters are needed here.

use anyhow::{ensure, Result};
use burn::backend::{ndarray::NdArrayDevice, NdArray};
use serde::{Deserialize, Serialize};

use crate::data::{
    collator::Collator,
    dataloader::{create_loader, LoaderOptions},
};
use crate::infra::artifact_store::ArtifactStore;

/// CPU backend used to materialize batch tensors.
pub type PipelineBackend = NdArray;

// ─── Batch Configuration ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub out_dir: String,
    pub epochs:  usize,
    pub loader:  LoaderOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            out_dir: "prepared".to_string(),
            epochs:  1,
            loader:  LoaderOptions::default(),
        }
    }
}

/// Totals over every epoch that was streamed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub epochs:           usize,
    pub batches:          usize,
    pub samples:          usize,
    pub max_source_width: usize,
    pub max_target_width: usize,
}

// ─── BatchesUseCase ───────────────────────────────────────────────────────────
pub struct BatchesUseCase {
    config: BatchConfig,
}

impl BatchesUseCase {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<BatchReport> {
        let cfg = &self.config;
        ensure!(cfg.loader.batch_size > 0, "batch size must be at least 1");

        // ── Step 1: Load the prepared dataset ─────────────────────────────────
        let store    = ArtifactStore::open(&cfg.out_dir);
        let manifest = store.load_manifest()?;
        let samples  = store.load_dataset()?;
        tracing::info!(
            "Loaded {} {} pairs ({} → {})",
            samples.len(),
            manifest.mode,
            manifest.source_lang,
            manifest.target_lang,
        );

        // ── Steps 2-3: Collator and loader ────────────────────────────────────
        let collator = Collator::new(manifest.source_specials, manifest.target_specials);
        let loader   = create_loader::<PipelineBackend>(
            samples,
            collator,
            &cfg.loader,
            NdArrayDevice::Cpu,
        );

        // ── Step 4: Stream epochs ─────────────────────────────────────────────
        let mut report = BatchReport { epochs: cfg.epochs, ..BatchReport::default() };

        for epoch in 1..=cfg.epochs {
            let mut epoch_batches = 0;

            for batch in loader.iter() {
                let [rows, source_width] = batch.source.dims();
                let [_, target_width]    = batch.target.dims();

                tracing::debug!(
                    "Epoch {} batch {}: source [{}, {}], target [{}, {}]",
                    epoch,
                    epoch_batches + 1,
                    rows,
                    source_width,
                    rows,
                    target_width,
                );

                epoch_batches           += 1;
                report.samples          += rows;
                report.max_source_width  = report.max_source_width.max(source_width);
                report.max_target_width  = report.max_target_width.max(target_width);
            }

            report.batches += epoch_batches;
            tracing::info!("Epoch {}: {} batches", epoch, epoch_batches);
        }

        Ok(report)
    }
}
