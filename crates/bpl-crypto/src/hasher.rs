use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use bpl_types::Digest;

/// Streaming BLAKE3 content hasher.
///
/// Reads input in fixed-size chunks, so memory use is independent of input
/// size. The resulting [`Digest`] is the plain content hash: a 0-byte input
/// produces the standard BLAKE3 empty-input value.
pub struct ContentHasher;

/// Read granularity for streamed hashing.
const CHUNK_SIZE: usize = 8192;

impl ContentHasher {
    /// Hash an in-memory buffer.
    pub fn digest_bytes(data: &[u8]) -> Digest {
        Digest::from_hash(*blake3::hash(data).as_bytes())
    }

    /// Hash a byte stream incrementally.
    ///
    /// Fails with the underlying `io::Error` if the stream cannot be read to
    /// completion; no partial digest is ever returned.
    pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<Digest> {
        let mut hasher = blake3::Hasher::new();
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Digest::from_hash(*hasher.finalize().as_bytes()))
    }

    /// Hash the contents of a file on disk.
    pub fn digest_file(path: &Path) -> io::Result<Digest> {
        let file = File::open(path)?;
        Self::digest_reader(BufReader::new(file))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(data: &[u8], expected: &Digest) -> bool {
        Self::digest_bytes(data) == *expected
    }
}
