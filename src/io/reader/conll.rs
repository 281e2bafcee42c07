/*! CoNLL-like block reader.

Blocks are groups of tab separated lines, separated by blank lines.
Lines starting with `#` are comments, and the last comment seen before a block is attached to it.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub comment: String,
    pub rows: Vec<Vec<String>>,
}

impl Block {
    /// Last whitespace separated token of the comment, usually an identifier.
    pub fn guid(&self) -> &str {
        self.comment.split(' ').last().unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct BlockReader<T>
where
    T: Read,
{
    lines: Lines<BufReader<T>>,
    comment: String,
}

impl BlockReader<File> {
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let f = File::open(src)?;
        Ok(Self::new(f))
    }
}

impl<T> BlockReader<T>
where
    T: Read,
{
    pub fn new(inner: T) -> Self {
        Self {
            lines: BufReader::new(inner).lines(),
            comment: String::new(),
        }
    }
}

impl<T> Iterator for BlockReader<T>
where
    T: Read,
{
    type Item = Result<Block, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = Vec::new();
        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    let line = line.trim_end_matches(['\r', '\n']);
                    if line.starts_with('#') {
                        self.comment = line.split('\t').next().unwrap_or_default().to_string();
                    } else if line.trim().is_empty() {
                        if !rows.is_empty() {
                            break;
                        }
                    } else {
                        rows.push(line.split('\t').map(String::from).collect());
                    }
                }
                Some(Err(e)) => return Some(Err(Error::Io(e))),
                None => {
                    if rows.is_empty() {
                        return None;
                    }
                    break;
                }
            }
        }

        Some(Ok(Block {
            comment: self.comment.clone(),
            rows,
        }))
    }
}
