//! Crash events and their deduplication identity.

use crate::fingerprint::Fingerprint;
use crate::time::Timestamp;
use bbtrace_capture::ExceptionRecord;
use std::fmt;

/// Kind of exception raised by the traced process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// Anything the tracer could not classify.
    Unknown,
    /// Memory access violation.
    AccessViolation,
}

impl ExceptionKind {
    /// Map a raw wire discriminant. Unrecognized values fall back to
    /// [`ExceptionKind::Unknown`] rather than failing.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::AccessViolation,
            _ => Self::Unknown,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::AccessViolation => "violation",
        }
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the faulting address was being accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Access direction could not be determined.
    Unknown,
    /// Read access.
    Read,
    /// Write access.
    Write,
    /// Instruction fetch.
    Execute,
}

impl AccessKind {
    /// Map a raw wire discriminant. Unrecognized values fall back to
    /// [`AccessKind::Unknown`] rather than failing.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Read,
            2 => Self::Write,
            3 => Self::Execute,
            _ => Self::Unknown,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Read => "read",
            Self::Write => "write",
            Self::Execute => "execute",
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One exception observed during a run, with its deduplication fingerprint.
///
/// The fingerprint is computed at construction from the raw wire fields
/// (kind, pc, faulting address, access) and never from the timestamp: the
/// same fault observed at two different times is the same crash. There is no
/// way to obtain a `CrashEvent` without a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashEvent {
    kind: ExceptionKind,
    pc: u64,
    faulty_addr: u64,
    access: AccessKind,
    fingerprint: Fingerprint,
    observed_at: Timestamp,
}

impl CrashEvent {
    /// Build a crash event from a decoded exception record, stamping it with
    /// the owning trace's timestamp.
    #[must_use]
    pub fn new(record: &ExceptionRecord, observed_at: Timestamp) -> Self {
        Self {
            kind: ExceptionKind::from_raw(record.kind),
            pc: record.pc,
            faulty_addr: record.faulty_addr,
            access: AccessKind::from_raw(record.access),
            fingerprint: Fingerprint::of_crash(
                record.kind,
                record.pc,
                record.faulty_addr,
                record.access,
            ),
            observed_at,
        }
    }

    /// Exception kind.
    #[must_use]
    pub const fn kind(&self) -> ExceptionKind {
        self.kind
    }

    /// Program counter at the time of the fault.
    #[must_use]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Address whose access faulted.
    #[must_use]
    pub const fn faulty_addr(&self) -> u64 {
        self.faulty_addr
    }

    /// Access kind of the fault.
    #[must_use]
    pub const fn access(&self) -> AccessKind {
        self.access
    }

    /// The deduplication key for this crash.
    #[must_use]
    pub const fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// When the owning trace was recorded.
    #[must_use]
    pub const fn observed_at(&self) -> Timestamp {
        self.observed_at
    }
}

impl fmt::Display for CrashEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type: {}, pc: {:#x}, addr: {:#x}, access: {}",
            self.kind, self.pc, self.faulty_addr, self.access
        )
    }
}
