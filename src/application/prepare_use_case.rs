// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Orchestrates dataset preparation in order:
//
//   Step 1: Load the parallel corpus      (Layer 4 - data)
//   Step 2: Build encoders                (Layer 4 - data)
//           word path:    build + save both Symbol Tables
//           subword path: load both segmenter files (Layer 6)
//   Step 3: Wrap pairs in a PairDataset   (Layer 4 - data)
//   Step 4: Materialize and save dataset  (Layer 6 - infra)
//   Step 5: Save manifest and config      (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data::{
    corpus::{BlankLinePolicy, TextFileCorpus},
    dataset::PairDataset,
    encoder::EncodingMode,
    tokenizer::RegexTokenizer,
    vocab::{VocabBuilder, DEFAULT_MAX_TOKENS, DEFAULT_MIN_FREQ},
};
use crate::domain::{
    language::{Language, Side},
    traits::CorpusSource,
};
use crate::infra::{
    artifact_store::{ArtifactStore, DatasetManifest},
    segmenter::HfSegmenter,
};

// ─── Preparation Configuration ───────────────────────────────────────────────
// Serialisable so it can be saved next to the artifacts it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub source_path:      String,
    pub target_path:      String,
    pub source_lang:      Language,
    pub target_lang:      Language,
    pub out_dir:          String,
    pub max_tokens:       usize,
    pub min_freq:         usize,
    pub blank_lines:      BlankLinePolicy,
    /// tokenizer.json for the source side; with `target_segmenter`
    /// selects the subword path.
    pub source_segmenter: Option<String>,
    pub target_segmenter: Option<String>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            source_path:      "data/train.en".to_string(),
            target_path:      "data/train.fr".to_string(),
            source_lang:      Language::En,
            target_lang:      Language::Fr,
            out_dir:          "prepared".to_string(),
            max_tokens:       DEFAULT_MAX_TOKENS,
            min_freq:         DEFAULT_MIN_FREQ,
            blank_lines:      BlankLinePolicy::Independent,
            source_segmenter: None,
            target_segmenter: None,
        }
    }
}

impl PrepareConfig {
    /// Subword when both segmenter files are given, word-level when
    /// neither is. One without the other is a configuration error.
    pub fn mode(&self) -> Result<EncodingMode> {
        match (&self.source_segmenter, &self.target_segmenter) {
            (Some(_), Some(_)) => Ok(EncodingMode::Subword),
            (None, None) => Ok(EncodingMode::Word),
            _ => bail!("Subword mode needs both --src-segmenter and --tgt-segmenter"),
        }
    }
}

/// What one `prepare` run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareSummary {
    pub mode:              EncodingMode,
    pub num_pairs:         usize,
    /// Symbol Table sizes; None on the subword path.
    pub source_vocab_size: Option<usize>,
    pub target_vocab_size: Option<usize>,
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PrepareSummary> {
        let cfg  = &self.config;
        let mode = cfg.mode()?;

        // ── Step 1: Load the parallel corpus ──────────────────────────────────
        let corpus = TextFileCorpus::new(&cfg.source_path, &cfg.target_path, cfg.blank_lines);
        let pairs  = corpus.load_pairs().with_context(|| {
            format!(
                "Cannot load corpus '{}' / '{}'",
                cfg.source_path, cfg.target_path
            )
        })?;

        let store = ArtifactStore::create(&cfg.out_dir)?;

        // ── Steps 2-3: Build encoders and the lazy dataset ────────────────────
        let (dataset, source_vocab_size, target_vocab_size) = match mode {
            EncodingMode::Word => {
                let tokenizer = Arc::new(RegexTokenizer::new()?);
                let builder   = VocabBuilder::new(cfg.max_tokens, cfg.min_freq);

                let source_vocab = builder.build_from_pairs(&pairs, Side::Source, cfg.source_lang, tokenizer.as_ref());
                let target_vocab = builder.build_from_pairs(&pairs, Side::Target, cfg.target_lang, tokenizer.as_ref());
                store.save_vocabs(&source_vocab, &target_vocab)?;

                let sizes   = (Some(source_vocab.len()), Some(target_vocab.len()));
                let dataset = PairDataset::word_level(
                    pairs,
                    tokenizer,
                    Arc::new(source_vocab),
                    cfg.source_lang,
                    Arc::new(target_vocab),
                    cfg.target_lang,
                );
                (dataset, sizes.0, sizes.1)
            }
            EncodingMode::Subword => {
                let load = |path: &Option<String>| -> Result<Arc<HfSegmenter>> {
                    let path = path.as_deref().unwrap_or_default();
                    let seg  = HfSegmenter::from_file(path)
                        .with_context(|| format!("Cannot load segmenter '{path}'"))?;
                    Ok(Arc::new(seg))
                };
                let source = load(&cfg.source_segmenter)?;
                let target = load(&cfg.target_segmenter)?;
                (PairDataset::subword(pairs, source, target), None, None)
            }
        };

        // ── Step 4: Materialize and persist ───────────────────────────────────
        let samples = dataset.materialize().context("Cannot encode corpus")?;
        store.save_dataset(&samples)?;

        // ── Step 5: Manifest and config ───────────────────────────────────────
        let manifest = DatasetManifest {
            mode,
            source_lang:     cfg.source_lang,
            target_lang:     cfg.target_lang,
            source_specials: dataset.source_specials(),
            target_specials: dataset.target_specials(),
            num_pairs:       samples.len(),
        };
        store.save_manifest(&manifest)?;
        store.save_config(cfg)?;

        tracing::info!(
            "Prepared {} {} pairs in '{}'",
            samples.len(),
            mode,
            store.dir().display()
        );

        Ok(PrepareSummary {
            mode,
            num_pairs: samples.len(),
            source_vocab_size,
            target_vocab_size,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::specials::SpecialIds;
    use crate::infra::segmenter::tests::word_level_json;
    use std::fs;
    use tempdir::TempDir;

    fn write_corpus(dir: &TempDir) -> (String, String) {
        let src = dir.path().join("train.en");
        let tgt = dir.path().join("train.fr");
        fs::write(&src, "the cat\nthe black cat\n\nthe dog\n").unwrap();
        fs::write(&tgt, "le chat\nle chat noir\nle chien\n").unwrap();
        (src.display().to_string(), tgt.display().to_string())
    }

    fn config(dir: &TempDir) -> PrepareConfig {
        let (source_path, target_path) = write_corpus(dir);
        PrepareConfig {
            source_path,
            target_path,
            out_dir: dir.path().join("out").display().to_string(),
            ..PrepareConfig::default()
        }
    }

    #[test]
    fn test_word_level_prepare() {
        let dir     = TempDir::new("prepare_test").unwrap();
        let cfg     = config(&dir);
        let summary = PrepareUseCase::new(cfg.clone()).execute().unwrap();

        // min_freq=2: source keeps "the" and "cat"; target keeps "le" and "chat"
        assert_eq!(summary.mode, EncodingMode::Word);
        assert_eq!(summary.num_pairs, 3);
        assert_eq!(summary.source_vocab_size, Some(6));
        assert_eq!(summary.target_vocab_size, Some(6));

        let store   = ArtifactStore::open(&cfg.out_dir);
        let samples = store.load_dataset().unwrap();
        assert_eq!(samples[0].source, vec![4, 5]);
        assert_eq!(samples[2].target, vec![1, 4, 3, 2]);
        assert_eq!(store.load_manifest().unwrap().target_specials, SpecialIds::default());
        assert_eq!(store.load_config().unwrap(), cfg);
    }

    #[test]
    fn test_mismatched_corpus_fails() {
        let dir = TempDir::new("prepare_test").unwrap();
        let cfg = config(&dir);
        fs::write(&cfg.target_path, "le chat\n").unwrap();

        let err = PrepareUseCase::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("corpus mismatch"));
    }

    #[test]
    fn test_subword_prepare() {
        let dir     = TempDir::new("prepare_test").unwrap();
        let seg     = dir.path().join("tokenizer.json");
        fs::write(&seg, word_level_json()).unwrap();

        let seg_path = Some(seg.display().to_string());
        let cfg = PrepareConfig {
            source_segmenter: seg_path.clone(),
            target_segmenter: seg_path,
            ..config(&dir)
        };
        let summary = PrepareUseCase::new(cfg.clone()).execute().unwrap();
        assert_eq!(summary.mode, EncodingMode::Subword);
        assert_eq!(summary.source_vocab_size, None);

        let store   = ArtifactStore::open(&cfg.out_dir);
        let samples = store.load_dataset().unwrap();
        // <s>=2 le=4 chat=5 noir=6 </s>=3
        assert_eq!(samples[1].target, vec![2, 4, 5, 6, 3]);
        // source words are all unknown to this model
        assert_eq!(samples[0].source, vec![2, 1, 1, 3]);
        assert_eq!(store.load_manifest().unwrap().source_specials.pad, 0);
    }

    #[test]
    fn test_half_configured_subword_is_rejected() {
        let cfg = PrepareConfig {
            source_segmenter: Some("a.json".to_string()),
            ..PrepareConfig::default()
        };
        assert!(cfg.mode().is_err());
    }
}
