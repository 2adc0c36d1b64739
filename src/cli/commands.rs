// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `prepare` and `batches`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use bitext_prep::application::{
    batches_use_case::BatchConfig,
    prepare_use_case::PrepareConfig,
};
use bitext_prep::data::{
    corpus::BlankLinePolicy,
    dataloader::LoaderOptions,
    vocab::{DEFAULT_MAX_TOKENS, DEFAULT_MIN_FREQ},
};
use bitext_prep::domain::language::Language;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build vocabularies, encode a parallel corpus and save it
    Prepare(PrepareArgs),

    /// Stream padded batches from a prepared dataset
    Batches(BatchesArgs),
}

/// All arguments for the `prepare` command.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Source-language corpus, one sentence per line
    #[arg(long)]
    pub src: String,

    /// Target-language corpus, line-aligned with --src
    #[arg(long)]
    pub tgt: String,

    #[arg(long, value_enum, default_value_t = Language::En)]
    pub src_lang: Language,

    #[arg(long, value_enum, default_value_t = Language::Fr)]
    pub tgt_lang: Language,

    /// Directory for vocabularies, dataset and manifest
    #[arg(long, default_value = "prepared")]
    pub out_dir: String,

    /// Most corpus tokens kept per vocabulary (reserved symbols excluded)
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: usize,

    /// Minimum occurrences for a token to enter the vocabulary
    #[arg(long, default_value_t = DEFAULT_MIN_FREQ)]
    pub min_freq: usize,

    /// How blank lines are removed before pairing
    #[arg(long, value_enum, default_value_t = BlankLinePolicy::Independent)]
    pub blank_lines: BlankLinePolicy,

    /// Source tokenizer.json; selects subword encoding
    #[arg(long, requires = "tgt_segmenter")]
    pub src_segmenter: Option<String>,

    /// Target tokenizer.json; selects subword encoding
    #[arg(long, requires = "src_segmenter")]
    pub tgt_segmenter: Option<String>,
}

impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            source_path:      a.src,
            target_path:      a.tgt,
            source_lang:      a.src_lang,
            target_lang:      a.tgt_lang,
            out_dir:          a.out_dir,
            max_tokens:       a.max_tokens,
            min_freq:         a.min_freq,
            blank_lines:      a.blank_lines,
            source_segmenter: a.src_segmenter,
            target_segmenter: a.tgt_segmenter,
        }
    }
}

/// All arguments for the `batches` command
#[derive(Args, Debug)]
pub struct BatchesArgs {
    /// Directory written by `prepare`
    #[arg(long, default_value = "prepared")]
    pub out_dir: String,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Reshuffle samples every epoch
    #[arg(long)]
    pub shuffle: bool,

    /// Shuffle seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Background batching threads; 0 batches on the main thread
    #[arg(long, default_value_t = 1)]
    pub num_workers: usize,

    #[arg(long, default_value_t = 1)]
    pub epochs: usize,
}

impl From<BatchesArgs> for BatchConfig {
    fn from(a: BatchesArgs) -> Self {
        BatchConfig {
            out_dir: a.out_dir,
            epochs:  a.epochs,
            loader:  LoaderOptions {
                batch_size:  a.batch_size,
                shuffle:     a.shuffle,
                seed:        a.seed,
                num_workers: a.num_workers,
            },
        }
    }
}
