//! Canonical encoding and decoding of capture files.
//!
//! Postcard provides the byte-stable encoding. The header magic is validated
//! as part of decoding, so a capture written by a different producer fails
//! loudly instead of yielding a half-sensible record. Trailing bytes after
//! the encoded capture are treated as corruption.

use crate::record::{CAPTURE_MAGIC, Capture};
use std::fs;
use std::io;
use std::path::Path;

/// Errors produced while decoding a capture.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not a valid capture encoding: truncated, trailing
    /// garbage, or a schema mismatch.
    #[error("malformed capture encoding")]
    Malformed,
    /// The header decoded but its magic is not [`CAPTURE_MAGIC`].
    #[error("capture magic mismatch: found {found:#018x}, expected {expected:#018x}")]
    BadMagic {
        /// Magic value found in the header.
        found: u64,
        /// The expected sentinel.
        expected: u64,
    },
    /// Reading the capture file failed.
    #[error("capture I/O error")]
    Io(#[from] io::Error),
}

impl Capture {
    /// Encode to canonical bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("capture encoding failed")
    }

    /// Decode from canonical bytes and validate the header magic.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Malformed`] if the bytes are truncated, carry trailing
    /// garbage, or do not match the schema; [`DecodeError::BadMagic`] if the
    /// header sentinel is wrong. No partial capture is returned in either
    /// case.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let (capture, rest): (Self, &[u8]) =
            postcard::take_from_bytes(data).map_err(|_| DecodeError::Malformed)?;
        if !rest.is_empty() {
            return Err(DecodeError::Malformed);
        }
        if capture.header.magic != CAPTURE_MAGIC {
            return Err(DecodeError::BadMagic {
                found: capture.header.magic,
                expected: CAPTURE_MAGIC,
            });
        }
        Ok(capture)
    }

    /// Read and decode a capture file.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Io`] if the file cannot be read, otherwise as
    /// [`Capture::from_bytes`].
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Encode and write a capture file (producer side).
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the write fails.
    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EdgeRecord, ExceptionRecord, RegionRecord};
    use proptest::prelude::*;

    fn sample_capture() -> Capture {
        Capture::new(
            1_700_000_000,
            vec![
                EdgeRecord {
                    prev: 0x1000,
                    next: 0x2000,
                    hit: 3,
                },
                EdgeRecord {
                    prev: 0x2000,
                    next: 0x3000,
                    hit: 1,
                },
            ],
            vec![ExceptionRecord {
                kind: 1,
                pc: 0x2040,
                faulty_addr: 0xdead_beef,
                access: 2,
            }],
            vec![RegionRecord {
                base: 0x1000,
                size: 0x2000,
                name: "libtarget.so".to_string(),
            }],
        )
    }

    #[test]
    fn test_roundtrip() {
        let capture = sample_capture();
        let decoded = Capture::from_bytes(&capture.to_bytes()).unwrap();
        assert_eq!(capture, decoded);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let capture = sample_capture();
        assert_eq!(capture.to_bytes(), capture.to_bytes());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut capture = sample_capture();
        capture.header.magic = 0x0bad_0bad;
        let err = Capture::from_bytes(&capture.to_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BadMagic {
                found: 0x0bad_0bad,
                expected: CAPTURE_MAGIC,
            }
        ));
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let bytes = sample_capture().to_bytes();
        let err = Capture::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let mut bytes = sample_capture().to_bytes();
        bytes.extend_from_slice(b"junk");
        let err = Capture::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            Capture::from_bytes(&[]),
            Err(DecodeError::Malformed)
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.bbtrace");

        let capture = sample_capture();
        capture.write_to(&path).unwrap();
        let decoded = Capture::read_from(&path).unwrap();
        assert_eq!(capture, decoded);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Capture::read_from(dir.path().join("absent.bbtrace")).unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }

    fn arb_edges() -> impl Strategy<Value = Vec<EdgeRecord>> {
        proptest::collection::vec(
            (any::<u64>(), any::<u64>(), any::<u32>())
                .prop_map(|(prev, next, hit)| EdgeRecord { prev, next, hit }),
            0..64,
        )
    }

    proptest::proptest! {
        #[test]
        fn prop_roundtrip(timestamp: u64, edges in arb_edges()) {
            let capture = Capture::new(timestamp, edges, vec![], vec![]);
            let decoded = Capture::from_bytes(&capture.to_bytes()).unwrap();
            prop_assert_eq!(capture, decoded);
        }

        #[test]
        fn prop_hint_order_independent(edges in arb_edges()) {
            let forward = crate::record::edge_hash_hint(&edges);
            let mut reversed = edges.clone();
            reversed.reverse();
            prop_assert_eq!(crate::record::edge_hash_hint(&reversed), forward);
        }
    }
}
