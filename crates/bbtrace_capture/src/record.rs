//! Record structs for one execution capture.

use serde::{Deserialize, Serialize};

/// Sentinel value every capture header must carry (ASCII "bbtrace1").
pub const CAPTURE_MAGIC: u64 = 0x6262_7472_6163_6531;

/// Capture file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureHeader {
    /// Must equal [`CAPTURE_MAGIC`]; anything else is rejected at decode.
    pub magic: u64,
    /// Seconds since the Unix epoch when the capture was serialized.
    pub timestamp: u64,
    /// Producer-supplied whole-run hash hint (see [`edge_hash_hint`]).
    /// Not authoritative: consumers derive their own fingerprints.
    pub hash: u64,
}

/// One observed control-flow edge with its hit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source basic-block address.
    pub prev: u64,
    /// Destination basic-block address.
    pub next: u64,
    /// Number of times the edge fired.
    pub hit: u32,
}

/// One exception raised during the run.
///
/// `kind` and `access` are carried as raw discriminants so values written by
/// a newer tracer still decode; consumers map unrecognized values to their
/// "unknown" marker instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    /// Exception kind discriminant (0 = unknown, 1 = access violation).
    pub kind: u32,
    /// Program counter at the time of the fault.
    pub pc: u64,
    /// Address whose access faulted.
    pub faulty_addr: u64,
    /// Access kind discriminant (0 = unknown, 1 = read, 2 = write,
    /// 3 = execute).
    pub access: u32,
}

/// One memory region mapped during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Base address of the mapping.
    pub base: u64,
    /// Size of the mapping in bytes.
    pub size: u64,
    /// Backing file name, empty for anonymous mappings.
    pub name: String,
}

/// A complete decoded capture: header plus the three record sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Validated header.
    pub header: CaptureHeader,
    /// Control-flow edges, in whatever order the producer emitted them.
    pub edges: Vec<EdgeRecord>,
    /// Exceptions, in the order they were raised.
    pub exceptions: Vec<ExceptionRecord>,
    /// Memory regions, in whatever order the producer emitted them.
    pub regions: Vec<RegionRecord>,
}

impl Capture {
    /// Build a capture with a well-formed header for the given records.
    ///
    /// The header hash is populated from [`edge_hash_hint`].
    #[must_use]
    pub fn new(
        timestamp: u64,
        edges: Vec<EdgeRecord>,
        exceptions: Vec<ExceptionRecord>,
        regions: Vec<RegionRecord>,
    ) -> Self {
        let hash = edge_hash_hint(&edges);
        Self {
            header: CaptureHeader {
                magic: CAPTURE_MAGIC,
                timestamp,
                hash,
            },
            edges,
            exceptions,
            regions,
        }
    }
}

/// XOR fold over edge endpoints, the producer's cheap whole-run hash hint.
///
/// Order-independent by construction; hit counts do not participate.
#[must_use]
pub fn edge_hash_hint(edges: &[EdgeRecord]) -> u64 {
    edges
        .iter()
        .fold(0, |hash, edge| hash ^ edge.prev ^ edge.next)
}
