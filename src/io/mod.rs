/*!
# IO utilities

Raw corpus reading (JSON, TSV, CoNLL-like, XLSX) and generated partition writing.
!*/
pub mod reader;
pub mod writer;
