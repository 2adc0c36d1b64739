// ============================================================
// Layer 4 — Parallel Corpus Loader
// ============================================================
// Reads two aligned UTF-8 text files, one sentence per line,
// and zips them into SentencePairs.
//
//   source.en            target.fr
//   ─────────            ─────────
//   the cat              le chat
//   a black dog          un chien noir
//        │                    │
//        └────── zip ─────────┘
//                 ▼
//   [("the cat", "le chat"), ("a black dog", "un chien noir")]
//
// Blank lines are handled by a BlankLinePolicy:
//
//   Independent — each file drops its own blank lines, then the
//                 remaining counts must match. If blank lines sit
//                 at different positions in the two files the
//                 pairing shifts silently.
//   Joint       — raw line counts must match; a pair is dropped
//                 when either of its lines is blank.
//
// Any count mismatch is a fatal CorpusMismatch error.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use std::{fs, path::PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::data::preprocessor::Preprocessor;
use crate::domain::{sentence_pair::SentencePair, traits::CorpusSource};
use crate::error::{PipelineError, PipelineResult};

/// How blank lines are removed before pairing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BlankLinePolicy {
    /// Strip blank lines from each file separately, then pair.
    #[default]
    Independent,
    /// Pair by raw line number, then drop pairs with a blank side.
    Joint,
}

/// Loads a parallel corpus from two line-aligned text files.
/// Implements the CorpusSource trait from Layer 3.
pub struct TextFileCorpus {
    source_path: PathBuf,
    target_path: PathBuf,
    policy:      BlankLinePolicy,
}

impl TextFileCorpus {
    pub fn new(
        source_path: impl Into<PathBuf>,
        target_path: impl Into<PathBuf>,
        policy:      BlankLinePolicy,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
            policy,
        }
    }
}

impl CorpusSource for TextFileCorpus {
    fn load_pairs(&self) -> PipelineResult<Vec<SentencePair>> {
        let source_text = fs::read_to_string(&self.source_path)?;
        let target_text = fs::read_to_string(&self.target_path)?;

        let pairs = pair_lines(&source_text, &target_text, self.policy)?;

        tracing::info!(
            "Loaded {} sentence pairs from '{}' / '{}'",
            pairs.len(),
            self.source_path.display(),
            self.target_path.display(),
        );
        Ok(pairs)
    }
}

/// Pair the lines of two in-memory texts under the given policy.
pub fn pair_lines(
    source_text: &str,
    target_text: &str,
    policy:      BlankLinePolicy,
) -> PipelineResult<Vec<SentencePair>> {
    let pre = Preprocessor::new();

    let source_lines: Vec<String> = source_text.lines().map(|l| pre.clean_line(l)).collect();
    let target_lines: Vec<String> = target_text.lines().map(|l| pre.clean_line(l)).collect();

    match policy {
        BlankLinePolicy::Independent => {
            let (source_raw, target_raw) = (source_lines.len(), target_lines.len());
            let source: Vec<String> = source_lines.into_iter().filter(|l| !l.is_empty()).collect();
            let target: Vec<String> = target_lines.into_iter().filter(|l| !l.is_empty()).collect();

            tracing::debug!(
                "Dropped blank lines: {} from source, {} from target",
                source_raw - source.len(),
                target_raw - target.len(),
            );

            if source.len() != target.len() {
                return Err(PipelineError::CorpusMismatch {
                    source_lines: source.len(),
                    target_lines: target.len(),
                });
            }

            Ok(source
                .into_iter()
                .zip(target)
                .map(|(s, t)| SentencePair::new(s, t))
                .collect())
        }
        BlankLinePolicy::Joint => {
            if source_lines.len() != target_lines.len() {
                return Err(PipelineError::CorpusMismatch {
                    source_lines: source_lines.len(),
                    target_lines: target_lines.len(),
                });
            }

            let total = source_lines.len();
            let pairs: Vec<SentencePair> = source_lines
                .into_iter()
                .zip(target_lines)
                .filter(|(s, t)| !s.is_empty() && !t.is_empty())
                .map(|(s, t)| SentencePair::new(s, t))
                .collect();

            if pairs.len() < total {
                tracing::debug!("Dropped {} pairs with a blank side", total - pairs.len());
            }
            Ok(pairs)
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io,
        sync::{Arc, Mutex},
    };
    use tempdir::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn debug_logs<T>(f: impl FnOnce() -> T) -> String {
        let buffer     = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(buffer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_pairs_in_order() {
        let pairs = pair_lines("a\nb\n", "x\ny\n", BlankLinePolicy::Independent).unwrap();
        assert_eq!(pairs, vec![SentencePair::new("a", "x"), SentencePair::new("b", "y")]);
    }

    #[test]
    fn test_independent_drops_blank_lines_per_file() {
        // Blank lines at different positions still pair up by count
        let pairs = pair_lines("a\n\nb\n", "x\ny\n\n", BlankLinePolicy::Independent).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], SentencePair::new("b", "y"));
    }

    #[test]
    fn test_independent_logs_blank_lines_per_file() {
        let logs = debug_logs(|| {
            pair_lines("a\n\nb\n", "x\n\ny\n \n", BlankLinePolicy::Independent).unwrap()
        });
        assert!(logs.contains("1 from source, 2 from target"), "{logs}");
    }

    #[test]
    fn test_independent_mismatch_is_error() {
        let err = pair_lines("a\nb\nc\n", "x\ny\n", BlankLinePolicy::Independent).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::CorpusMismatch { source_lines: 3, target_lines: 2 }
        ));
    }

    #[test]
    fn test_joint_drops_pairs_with_blank_side() {
        let pairs = pair_lines("a\n\nc\n", "x\ny\nz\n", BlankLinePolicy::Joint).unwrap();
        assert_eq!(pairs, vec![SentencePair::new("a", "x"), SentencePair::new("c", "z")]);
    }

    #[test]
    fn test_joint_requires_equal_raw_counts() {
        let err = pair_lines("a\n\n", "x\n", BlankLinePolicy::Joint).unwrap_err();
        assert!(matches!(err, PipelineError::CorpusMismatch { .. }));
    }

    #[test]
    fn test_lines_are_trimmed() {
        let pairs = pair_lines("  the cat \r\n", "le chat\t\n", BlankLinePolicy::Independent).unwrap();
        assert_eq!(pairs[0], SentencePair::new("the cat", "le chat"));
    }

    #[test]
    fn test_load_from_files() {
        let dir = TempDir::new("corpus_test").unwrap();
        let src = dir.path().join("train.en");
        let tgt = dir.path().join("train.fr");
        fs::write(&src, "the cat\n\na dog\n").unwrap();
        fs::write(&tgt, "le chat\nun chien\n").unwrap();

        let corpus = TextFileCorpus::new(&src, &tgt, BlankLinePolicy::Independent);
        let pairs  = corpus.load_pairs().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], SentencePair::new("a dog", "un chien"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir    = TempDir::new("corpus_test").unwrap();
        let corpus = TextFileCorpus::new(
            dir.path().join("nope.en"),
            dir.path().join("nope.fr"),
            BlankLinePolicy::Independent,
        );
        assert!(matches!(corpus.load_pairs(), Err(PipelineError::Io(_))));
    }
}
