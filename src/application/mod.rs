// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each
// (preparing a dataset, streaming its batches).
//
// Rules for this layer:
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Corpus → vocabularies + encoded dataset
pub mod prepare_use_case;

// Encoded dataset → padded batches
pub mod batches_use_case;
