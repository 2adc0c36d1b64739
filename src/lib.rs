//! Prepares parallel-language sentence pairs for seq2seq training:
//! vocabulary construction, word-level and subword encoding, and
//! collation of variable-length pairs into padded, length-sorted
//! batches.

pub mod application;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;

pub use error::{PipelineError, PipelineResult};
