/*! Checksums of generated files

Computes a sha384sum for each generated file, and writes them into a config-wide file, _usually_ compatible with `sha384sum -c` implementations.

sha256 is used for the download cache sidecars.
!*/
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use std::ops::Add;

use sha2::digest::generic_array::ArrayLength;
use sha2::digest::{FixedOutputReset, OutputSizeUser};
use sha2::{Digest, Sha256, Sha384};

use crate::error::Error;

/// Create the checksum file of the files in `dir`, named `<name>_sha384.txt`.
///
/// The checksum file itself (and other checksum files) are not hashed.
pub fn gen_checksum_file(dir: &Path, name: &str) -> Result<PathBuf, Error> {
    debug!("gen checksum on folder {:?}", dir);
    let mut hasher = Sha384::new();

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() && !is_checksum_file(&entry.path()) {
            files.push(entry.path());
        }
    }
    files.sort();

    let checksum_filepath = dir.join(format!("{}_sha384.txt", name));
    debug!("writing hashes to: {:?}", checksum_filepath);
    let mut checksum_file = File::create(&checksum_filepath)?;

    // write filenames and hashes in sha384sum -c compatible format.
    for path in files {
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("[{}] hashing {}", name, filename);
        let hash = get_hash(&path, &mut hasher)?;
        writeln!(&mut checksum_file, "{} {}", hash, filename)?;
    }

    Ok(checksum_filepath)
}

fn is_checksum_file(path: &Path) -> bool {
    path.file_name()
        .map(|f| f.to_string_lossy().ends_with("_sha384.txt"))
        .unwrap_or(false)
}

/// compute the hash of the file pointed by the filepath by using [io::copy] between a file handler and the hasher.
#[inline]
fn get_hash<D>(filepath: &Path, hasher: &mut D) -> Result<String, Error>
where
    D: Digest + FixedOutputReset + io::Write,
    <D as OutputSizeUser>::OutputSize: Add,
    <<D as OutputSizeUser>::OutputSize as Add>::Output: ArrayLength<u8>,
{
    let mut f = File::open(filepath)?;
    io::copy(&mut f, hasher)?;
    Ok(format!("{:x}", hasher.finalize_reset()))
}

/// sha256 of a file, as lowercase hex.
pub fn sha256_file(filepath: &Path) -> Result<String, Error> {
    let mut hasher = Sha256::new();
    get_hash(filepath, &mut hasher)
}
