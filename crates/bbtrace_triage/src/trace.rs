//! The canonical record of one instrumented execution.

use crate::crash::CrashEvent;
use crate::edge::{self, Edge};
use crate::error::TraceError;
use crate::fingerprint::Fingerprint;
use crate::region::MemoryRegion;
use crate::time::Timestamp;
use bbtrace_capture::Capture;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One execution of the target process, decoded from a capture file into
/// canonical form.
///
/// The trace exclusively owns its edge, crash, and region collections. The
/// dependency paths are weak references to files owned elsewhere: the trace
/// may delete them through [`purge`], but never creates them.
///
/// [`purge`]: ExecutionTrace::purge
#[derive(Debug, Clone)]
pub struct ExecutionTrace {
    command_line: Vec<String>,
    input_payload: Option<Vec<u8>>,
    dependency_paths: BTreeSet<PathBuf>,
    capture_path: PathBuf,
    timestamp: Timestamp,
    header_hash: u64,
    fingerprint: Fingerprint,
    edges: Vec<Edge>,
    crash_events: Vec<CrashEvent>,
    regions: Vec<MemoryRegion>,
}

impl ExecutionTrace {
    /// Decode the capture file at `capture_path` into a canonical trace.
    ///
    /// `command_line` is the argv the target was launched with, first
    /// element the executable path. `input_payload` is the stdin bytes fed
    /// to the process, if any. Every path in `deps` must exist when this is
    /// called; that check runs before any decode work so a broken run fails
    /// fast.
    ///
    /// # Errors
    ///
    /// [`TraceError::EmptyCommandLine`] if `command_line` has no elements,
    /// [`TraceError::DependencyMissing`] for the first absent dependency,
    /// [`TraceError::Decode`] for an unreadable, malformed, or wrong-magic
    /// capture, and [`TraceError::EmptyRegion`] for a zero-sized region
    /// record. No partially built trace is observable on any of these paths.
    pub fn new(
        command_line: Vec<String>,
        capture_path: impl Into<PathBuf>,
        input_payload: Option<Vec<u8>>,
        deps: Option<BTreeSet<PathBuf>>,
    ) -> Result<Self, TraceError> {
        if command_line.is_empty() {
            return Err(TraceError::EmptyCommandLine);
        }

        let dependency_paths = deps.unwrap_or_default();
        for dep in &dependency_paths {
            if !dep.is_file() {
                return Err(TraceError::DependencyMissing { path: dep.clone() });
            }
        }

        let capture_path = capture_path.into();
        let capture = Capture::read_from(&capture_path)?;
        debug!(
            path = %capture_path.display(),
            edges = capture.edges.len(),
            exceptions = capture.exceptions.len(),
            regions = capture.regions.len(),
            "decoded capture"
        );

        let timestamp = Timestamp::from_epoch_secs(capture.header.timestamp);
        let edges = edge::canonicalize(&capture.edges);
        let fingerprint = Fingerprint::of_edges(&edges);

        let crash_events = capture
            .exceptions
            .iter()
            .map(|record| CrashEvent::new(record, timestamp))
            .collect();

        let mut regions = capture
            .regions
            .iter()
            .map(MemoryRegion::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        regions.sort();

        Ok(Self {
            command_line,
            input_payload,
            dependency_paths,
            capture_path,
            timestamp,
            header_hash: capture.header.hash,
            fingerprint,
            edges,
            crash_events,
            regions,
        })
    }

    /// The argv the target was launched with.
    #[must_use]
    pub fn command_line(&self) -> &[String] {
        &self.command_line
    }

    /// Stdin bytes fed to the process, if any.
    #[must_use]
    pub fn input_payload(&self) -> Option<&[u8]> {
        self.input_payload.as_deref()
    }

    /// Files this execution relied on.
    #[must_use]
    pub fn dependency_paths(&self) -> &BTreeSet<PathBuf> {
        &self.dependency_paths
    }

    /// Path of the backing capture file.
    #[must_use]
    pub fn capture_path(&self) -> &Path {
        &self.capture_path
    }

    /// When the capture was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The producer's whole-run hash hint from the capture header. Not
    /// authoritative; use [`fingerprint`] for identity.
    ///
    /// [`fingerprint`]: ExecutionTrace::fingerprint
    #[must_use]
    pub const fn header_hash(&self) -> u64 {
        self.header_hash
    }

    /// The execution's coverage fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Canonical edge set: deduplicated, ascending on the full triple.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable access to the edge set for out-of-band edits. Callers must
    /// invoke [`recompute_fingerprint`] afterwards; the trace itself never
    /// mutates its edges.
    ///
    /// [`recompute_fingerprint`]: ExecutionTrace::recompute_fingerprint
    pub fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    /// Crash events in decode order.
    #[must_use]
    pub fn crash_events(&self) -> &[CrashEvent] {
        &self.crash_events
    }

    /// Memory regions sorted ascending by base address.
    #[must_use]
    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    /// Whether the backing capture file and every dependency exist right
    /// now. Strict: a file already deleted, for instance by [`purge`], makes
    /// the whole trace invalid.
    ///
    /// [`purge`]: ExecutionTrace::purge
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.capture_path.is_file() && self.dependency_paths.iter().all(|dep| dep.is_file())
    }

    /// Delete the backing capture file and every dependency file.
    ///
    /// Best-effort and idempotent: a file already gone is skipped, not an
    /// error, unlike the strict existence check in [`is_valid`]. Each
    /// deletion is logged; per-file failures are logged and swallowed.
    ///
    /// [`is_valid`]: ExecutionTrace::is_valid
    pub fn purge(&self) {
        remove_file(&self.capture_path, "capture");
        for dep in &self.dependency_paths {
            remove_file(dep, "dependency");
        }
    }

    /// Recompute the execution fingerprint from the current in-memory edge
    /// set. Required after any edit through [`edges_mut`]; idempotent on an
    /// unchanged set.
    ///
    /// The edge set is re-canonicalized first, so edits that left it
    /// unsorted or with duplicate triples do not leak into the fingerprint:
    /// the result depends only on which edges are present.
    ///
    /// [`edges_mut`]: ExecutionTrace::edges_mut
    pub fn recompute_fingerprint(&mut self) {
        let set: BTreeSet<Edge> = self.edges.drain(..).collect();
        self.edges = set.into_iter().collect();
        self.fingerprint = Fingerprint::of_edges(&self.edges);
    }
}

fn remove_file(path: &Path, role: &str) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), role, "removed file"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), role, "file already absent");
        }
        Err(err) => debug!(path = %path.display(), role, %err, "failed to remove file"),
    }
}

impl fmt::Display for ExecutionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] cmd: {}, payload: {} bytes, time: {}, fingerprint: {}, {} edge(s), {} crash(es)",
            self.capture_path.display(),
            self.command_line.join(" "),
            self.input_payload.as_ref().map_or(0, Vec::len),
            self.timestamp,
            self.fingerprint,
            self.edges.len(),
            self.crash_events.len(),
        )
    }
}
