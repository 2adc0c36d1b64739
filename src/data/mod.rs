// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from two raw text files all
// the way to tensor batches.
//
// The pipeline flows in this order:
//
//   source.txt + target.txt
//       │
//       ▼
//   TextFileCorpus     → reads, cleans and pairs lines
//       │
//       ▼
//   RegexTokenizer     → splits sentences into word symbols
//   VocabBuilder       → builds one SymbolTable per language
//       │
//       ▼
//   WordEncoder /      → converts one sentence to token ids
//   SubwordEncoder
//       │
//       ▼
//   PairDataset        → encodes pairs by index, lazily
//       │
//       ▼
//   Collator           → sorts by source length, pads, stacks
//   TranslationBatcher → implements Burn's Batcher trait
//       │
//       ▼
//   DataLoader         → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads and pairs two line-aligned corpus files
pub mod corpus;

/// Cleans individual corpus lines
pub mod preprocessor;

/// Regex word tokenizer
pub mod tokenizer;

/// Symbol Table and its frequency-capped builder
pub mod vocab;

/// Word-level and subword sentence encoders
pub mod encoder;

/// Lazily encoded, indexable sentence pairs
pub mod dataset;

/// Sorts and pads encoded pairs into rectangular batches
pub mod collator;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Builds Burn data loaders over materialized pairs
pub mod dataloader;
