// ============================================================
// Error Types
// ============================================================
// Every fallible library operation returns PipelineResult<T>.
// The application and CLI layers wrap these in anyhow with
// file-path context.
//
// An unknown token is NOT an error: lookups fall back to the
// unknown id. Everything else propagates to the caller.

/// Errors from corpus loading, encoding and persistence.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The two sides of the corpus do not have the same number of lines.
    #[error("corpus mismatch: {source_lines} source lines != {target_lines} target lines")]
    CorpusMismatch {
        /// Line count of the source-language file.
        source_lines: usize,
        /// Line count of the target-language file.
        target_lines: usize,
    },

    /// A sample index outside `0..len` was requested.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The dataset length.
        len: usize,
    },

    /// A persisted vocabulary is internally inconsistent.
    #[error("invalid vocabulary: {0}")]
    InvalidVocab(String),

    /// The subword segmenter failed to load or to segment text.
    #[error("segmenter error: {0}")]
    Segmenter(String),

    /// A tokenizer pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialisation error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
