//! bbtrace capture wire format.
//!
//! One capture file records a single instrumented execution of a target
//! process: the control-flow edges it took, the exceptions it raised, and
//! the memory regions mapped while it ran. The encoding is canonical and
//! byte-stable, so the same records always serialize to the same bytes on
//! every platform.
//!
//! The producer side (an instrumented-process harness) builds a [`Capture`]
//! and writes it with [`Capture::write_to`]; the consumer side reads it back
//! with [`Capture::read_from`], which validates the header magic before any
//! record is handed out.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod record;

pub use codec::DecodeError;
pub use record::{
    CAPTURE_MAGIC, Capture, CaptureHeader, EdgeRecord, ExceptionRecord, RegionRecord,
    edge_hash_hint,
};
