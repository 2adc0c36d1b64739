// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with clap and hands off to the
// application layer.
//
// Two commands are supported:
//   1. `prepare` — corpus → vocabularies + encoded dataset on disk
//   2. `batches` — prepared dataset → padded, sorted batches
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BatchesArgs, Commands, PrepareArgs};

#[derive(Parser, Debug)]
#[command(
    name = "bitext-prep",
    version,
    about = "Encode a parallel corpus and collate it into padded seq2seq batches."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Batches(args) => run_batches(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    use bitext_prep::application::prepare_use_case::PrepareUseCase;

    tracing::info!("Preparing corpus '{}' / '{}'", args.src, args.tgt);

    let summary = PrepareUseCase::new(args.into()).execute()?;

    println!("Prepared {} sentence pairs ({} encoding).", summary.num_pairs, summary.mode);
    if let (Some(src), Some(tgt)) = (summary.source_vocab_size, summary.target_vocab_size) {
        println!("Vocabulary sizes: source {src}, target {tgt}.");
    }
    Ok(())
}

fn run_batches(args: BatchesArgs) -> Result<()> {
    use bitext_prep::application::batches_use_case::BatchesUseCase;

    let report = BatchesUseCase::new(args.into()).execute()?;

    println!(
        "Streamed {} batches ({} samples) over {} epoch(s); widest source {}, widest target {}.",
        report.batches,
        report.samples,
        report.epochs,
        report.max_source_width,
        report.max_target_width,
    );
    Ok(())
}
