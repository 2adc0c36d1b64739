// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing a parallel corpus
// and its encoded form.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// The external capabilities the pipeline consumes (word
// tokenizer, subword segmenter, corpus source) are traits
// here so the data layer never depends on a concrete one.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Language tags passed to the tokenizer
pub mod language;

// Raw and encoded sentence pairs
pub mod sentence_pair;

// Reserved control symbols and their ids
pub mod specials;

// Core abstractions (traits) that other layers implement
pub mod traits;
