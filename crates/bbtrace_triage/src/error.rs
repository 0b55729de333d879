//! Error types for trace construction and lifecycle operations.

use bbtrace_capture::DecodeError;
use std::path::PathBuf;

/// Errors produced while building an [`crate::ExecutionTrace`].
///
/// Every variant is fatal to the construction at hand: no partially built
/// trace is ever observable, and nothing here retries.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The capture bytes could not be read, decoded, or validated.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A declared dependency file does not exist. Checked before any decode
    /// work, so a broken run fails fast.
    #[error("missing dependency file: {}", .path.display())]
    DependencyMissing {
        /// The dependency path that was not found.
        path: PathBuf,
    },

    /// The command line was empty; the first element must be the executable
    /// path.
    #[error("empty command line")]
    EmptyCommandLine,

    /// A decoded memory region had zero size, leaving its upper bound
    /// undefined.
    #[error("zero-sized memory region at base {base:#x}")]
    EmptyRegion {
        /// Base address of the offending region.
        base: u64,
    },

    /// A decoded memory region extends past the top of the address space,
    /// so its upper bound does not fit in a `u64`.
    #[error("memory region at base {base:#x} with size {size:#x} overflows the address space")]
    RegionOverflow {
        /// Base address of the offending region.
        base: u64,
        /// Size of the offending region.
        size: u64,
    },
}
