/*!
# Partition writing

Generated partitions are written as JSON Lines, one `{"key": .., "example": ..}` object per line,
optionally gzipped.
!*/
mod jsonl;

pub use jsonl::JsonlWriter;
