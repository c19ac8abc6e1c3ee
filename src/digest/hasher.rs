//! SHA-256 digests for streamed content and canonical JSON values

use crate::types::DigestValue;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::{self, Read};

/// Default read chunk size (64 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Stream a reader through SHA-256 in fixed-size chunks.
///
/// Memory use is bounded by `buffer_size` regardless of the content length.
pub fn sha256_reader<R: Read>(mut reader: R, buffer_size: usize) -> io::Result<DigestValue> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0_u8; buffer_size.max(1)];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    Ok(DigestValue::Sha256(hex::encode(hasher.finalize())))
}

/// Digest in-memory bytes
pub fn sha256_bytes(bytes: &[u8]) -> DigestValue {
    DigestValue::Sha256(hex::encode(Sha256::digest(bytes)))
}

/// Digest the compact JSON encoding of a value.
///
/// Structs serialize their fields in declaration order and maps used here are
/// ordered, so the encoding is stable for equal values.
pub fn sha256_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<DigestValue> {
    let encoded = serde_json::to_vec(value)?;
    Ok(sha256_bytes(&encoded))
}
