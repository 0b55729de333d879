//! Wall-clock metadata for traces.
//!
//! Timestamps are carried as capture metadata only; no triage logic depends
//! on wall-clock time. In particular crash fingerprints never include the
//! timestamp.

use std::fmt;

/// Seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create from epoch seconds.
    #[must_use]
    pub const fn from_epoch_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Raw epoch seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Current wall clock, for producers writing capture headers.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards");
        Self(duration.as_secs())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_secs() {
        let ts = Timestamp::from_epoch_secs(1_700_000_000);
        assert_eq!(ts.as_secs(), 1_700_000_000);
    }

    #[test]
    fn test_ordering() {
        assert!(Timestamp::from_epoch_secs(1) < Timestamp::from_epoch_secs(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Timestamp::from_epoch_secs(42)), "42s");
    }
}
