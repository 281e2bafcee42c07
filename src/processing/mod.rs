/*! Record processing

Deduplication of parsed record streams, and checksumming of generated files.
!*/
pub mod checksum;
pub mod dedup;

pub use dedup::{Deduplicator, FailurePolicy, GenerationStats};
