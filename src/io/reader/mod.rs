/*! Raw corpus readers

Each reader only deals with the physical format of a file. Turning what they read into records
is done by the corpus parsers in [crate::corpora].
!*/
pub mod conll;
pub mod json;
pub mod tsv;
pub mod xlsx;

pub use conll::{Block, BlockReader};
