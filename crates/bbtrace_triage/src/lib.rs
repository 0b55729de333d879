//! Execution-trace canonicalization and triage for fuzzing results.
//!
//! One capture of an instrumented run is decoded into a canonical
//! [`ExecutionTrace`]: a deduplicated, sorted edge set, a crash event per
//! raised exception, and a sorted memory-region list, each with a stable
//! content fingerprint. Canonical means coverage identity depends only on
//! which edges occurred and how often, never on when.
//!
//! Triage builds on three operations:
//!
//! - **deduplicate crashes** by [`CrashEvent::fingerprint`], which keys on
//!   the fault identity and ignores timestamps;
//! - **deduplicate executions** by [`ExecutionTrace::fingerprint`], which
//!   keys on the covered edges and ignores hit counts;
//! - **measure new coverage** with [`EdgeDiff`], the symmetric difference of
//!   two canonical edge sets partitioned by origin.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod crash;
pub mod diff;
pub mod edge;
pub mod error;
pub mod fingerprint;
pub mod region;
pub mod time;
pub mod trace;

pub use crash::{AccessKind, CrashEvent, ExceptionKind};
pub use diff::EdgeDiff;
pub use edge::Edge;
pub use error::TraceError;
pub use fingerprint::Fingerprint;
pub use region::MemoryRegion;
pub use time::Timestamp;
pub use trace::ExecutionTrace;
