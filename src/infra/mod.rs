// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concerns that touch the outside world:
//
//   artifact_store.rs — Vocabulary, dataset, manifest and config
//                       persistence as JSON files.
//
//   segmenter.rs      — Subword segmenter backed by a HuggingFace
//                       tokenizer.json file.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Saving and loading prepared artifacts
pub mod artifact_store;

/// HuggingFace tokenizer adapter for subword encoding
pub mod segmenter;
