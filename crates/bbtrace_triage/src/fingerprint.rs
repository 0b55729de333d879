//! Stable content fingerprints for executions and crash events.
//!
//! Fingerprints are deduplication keys, not security primitives. BLAKE3 is
//! used for speed and a fixed-length output; what actually matters is that
//! every input field enters the hasher at a fixed width and in a fixed
//! order, so the digest never depends on iteration order or platform.

use crate::edge::Edge;
use std::fmt;

/// A 256-bit content fingerprint, rendered as 64 hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Number of bytes in a fingerprint.
    pub const LEN: usize = 32;

    /// Digest a canonical (sorted, deduplicated) edge sequence.
    ///
    /// Only `from_pc` and `to_pc` enter the digest, each as 8 big-endian
    /// bytes: two executions covering the same edges with different hit
    /// counts share a fingerprint.
    #[must_use]
    pub fn of_edges(edges: &[Edge]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for edge in edges {
            hasher.update(&edge.from_pc.to_be_bytes());
            hasher.update(&edge.to_pc.to_be_bytes());
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Digest the identity of one crash: raw exception kind, program
    /// counter, faulting address, raw access kind, in that fixed order.
    ///
    /// The observation timestamp is deliberately absent, so the same fault
    /// seen at two different times deduplicates to one crash.
    #[must_use]
    pub fn of_crash(kind: u32, pc: u64, faulty_addr: u64, access: u32) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&kind.to_be_bytes());
        hasher.update(&pc.to_be_bytes());
        hasher.update(&faulty_addr.to_be_bytes());
        hasher.update(&access.to_be_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
