//! Identifier hashing.
use md5::{Digest, Md5};

use super::SplitFn;

/// md5 of `text`, as a lowercase hex string.
pub fn hash_text(text: &str) -> String {
    format!("{:x}", Md5::digest(text.as_bytes()))
}

/// md5 of `text`, read as a big-endian 128-bit integer.
///
/// This is the value of [hash_text] parsed in base 16.
#[inline]
pub fn hash_value(text: &str) -> u128 {
    let digest = Md5::digest(text.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    u128::from_be_bytes(bytes)
}

/// Returns whether `identifier` belongs to the partition described by `predicate`.
pub fn split_assign<P>(identifier: &str, predicate: &P) -> bool
where
    P: SplitFn + ?Sized,
{
    predicate.contains(hash_value(identifier))
}
