// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores everything `prepare` produces, so that
// `batches` (or a training run) can start from disk.
//
// Files written per output directory:
//
//   out/
//     vocab_src.json        ← source Symbol Table (word path only)
//     vocab_tgt.json        ← target Symbol Table (word path only)
//     dataset.json          ← every EncodedPair, in corpus order
//     manifest.json         ← mode, languages, special ids, size
//     prepare_config.json   ← the PrepareConfig used
//
// Vocabulary blob: { "token_to_id": {...}, "id_to_token": [...] }
// Dataset blob:    [ { "source": [...], "target": [...] }, ... ]
//
// The free functions are the library-level persistence API and
// return PipelineResult; ArtifactStore wraps them with anyhow
// context naming the file involved.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::application::prepare_use_case::PrepareConfig;
use crate::data::{
    encoder::EncodingMode,
    vocab::{SymbolTable, VocabRecord},
};
use crate::domain::{language::Language, sentence_pair::EncodedPair, specials::SpecialIds};
use crate::error::PipelineResult;

// ─── Library-level persistence ────────────────────────────────────────────────

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> PipelineResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> PipelineResult<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Persist a Symbol Table as its token_to_id / id_to_token record.
pub fn save_vocab(table: &SymbolTable, path: impl AsRef<Path>) -> PipelineResult<()> {
    write_json(&table.to_record(), path.as_ref())
}

/// Reload a Symbol Table; unmapped tokens resolve to `<unk>`.
pub fn load_vocab(path: impl AsRef<Path>) -> PipelineResult<SymbolTable> {
    let record: VocabRecord = read_json(path.as_ref())?;
    SymbolTable::from_record(record)
}

/// Persist a fully materialized dataset.
pub fn save_dataset(samples: &[EncodedPair], path: impl AsRef<Path>) -> PipelineResult<()> {
    write_json(samples, path.as_ref())
}

/// Reload a materialized dataset.
pub fn load_dataset(path: impl AsRef<Path>) -> PipelineResult<Vec<EncodedPair>> {
    read_json(path.as_ref())
}

// ─── DatasetManifest ──────────────────────────────────────────────────────────
/// What a persisted dataset needs to be collated without its
/// vocabularies or segmenters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub mode:            EncodingMode,
    pub source_lang:     Language,
    pub target_lang:     Language,
    pub source_specials: SpecialIds,
    pub target_specials: SpecialIds,
    pub num_pairs:       usize,
}

// ─── ArtifactStore ────────────────────────────────────────────────────────────
/// Manages the files of one prepared-dataset directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open an existing store without touching the filesystem.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn save_vocabs(&self, source: &SymbolTable, target: &SymbolTable) -> Result<()> {
        for (table, name) in [(source, "vocab_src.json"), (target, "vocab_tgt.json")] {
            let path = self.path(name);
            save_vocab(table, &path)
                .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;
            tracing::debug!("Saved vocabulary ({} entries) to '{}'", table.len(), path.display());
        }
        Ok(())
    }

    pub fn load_vocabs(&self) -> Result<(SymbolTable, SymbolTable)> {
        let load = |name: &str| {
            let path = self.path(name);
            load_vocab(&path)
                .with_context(|| format!("Cannot load vocabulary from '{}'", path.display()))
        };
        Ok((load("vocab_src.json")?, load("vocab_tgt.json")?))
    }

    pub fn save_dataset(&self, samples: &[EncodedPair]) -> Result<()> {
        let path = self.path("dataset.json");
        save_dataset(samples, &path)
            .with_context(|| format!("Cannot write dataset to '{}'", path.display()))?;
        tracing::info!("Saved {} encoded pairs to '{}'", samples.len(), path.display());
        Ok(())
    }

    pub fn load_dataset(&self) -> Result<Vec<EncodedPair>> {
        let path = self.path("dataset.json");
        load_dataset(&path).with_context(|| {
            format!(
                "Cannot load dataset from '{}'. Have you run 'prepare' first?",
                path.display()
            )
        })
    }

    pub fn save_manifest(&self, manifest: &DatasetManifest) -> Result<()> {
        self.save_pretty("manifest.json", manifest)
    }

    pub fn load_manifest(&self) -> Result<DatasetManifest> {
        self.load_pretty("manifest.json")
    }

    pub fn save_config(&self, cfg: &PrepareConfig) -> Result<()> {
        self.save_pretty("prepare_config.json", cfg)
    }

    pub fn load_config(&self) -> Result<PrepareConfig> {
        self.load_pretty("prepare_config.json")
    }

    fn save_pretty<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.path(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    fn load_pretty<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.path(name);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Cannot parse '{}'", path.display()))
    }
}
