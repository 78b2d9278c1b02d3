//! Name table serialization using `MessagePack`.
//!
//! Tables are built offline from a grammar file and shipped as a binary
//! file; loading one needs no pattern compilation at all.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use phrasebook_foundation::{Error, ErrorKind, Result};
use phrasebook_registry::NameTable;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serializes a name table to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes<K: Serialize>(table: &NameTable<K>) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(table)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a name table from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes<K: DeserializeOwned>(bytes: &[u8]) -> Result<NameTable<K>> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} file '{}': {e}",
        path.display()
    )))
}

/// Saves a name table to a file, creating or overwriting it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<K: Serialize, P: AsRef<Path>>(table: &NameTable<K>, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(table)?;

    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;

    Ok(())
}

/// Loads a name table from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<K: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<NameTable<K>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;

    from_bytes(&bytes)
}
