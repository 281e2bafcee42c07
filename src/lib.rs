/*!
# korean-corpora

Loaders for Korean NLP corpora (AIHub, KLUE, KorQuAD, NIKL and various benchmark TSV files).

Raw corpus files are normalized into `(identifier, record)` pairs, deduplicated by identifier,
and optionally split into train/validation/test partitions by hashing identifiers.

Configurations are declared in [registry], and generated through [builder::Builder].
!*/
pub mod builder;
pub mod cli;
pub mod config;
pub mod corpora;
pub mod download;
pub mod error;
pub mod io;
pub mod processing;
pub mod registry;
pub mod split;
