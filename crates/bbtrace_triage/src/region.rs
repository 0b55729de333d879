//! Mapped memory regions.

use crate::error::TraceError;
use bbtrace_capture::RegionRecord;
use std::fmt;

/// One memory region mapped during the traced run, possibly backed by a
/// file.
///
/// Ordering is by base address first, so sorting a region list yields the
/// ascending layout the trace exposes. Overlapping regions are accepted:
/// capture data may legitimately contain mappings that overlapped at
/// different times, and containment queries are answered per region.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemoryRegion {
    base: u64,
    size: u64,
    name: String,
}

impl MemoryRegion {
    /// Build a region. Zero-sized regions and regions extending past the
    /// top of the address space are rejected so [`upper`] is always well
    /// defined and `lower() <= upper()` always holds.
    ///
    /// # Errors
    ///
    /// [`TraceError::EmptyRegion`] if `size` is zero,
    /// [`TraceError::RegionOverflow`] if `base + size - 1` does not fit in
    /// a `u64`.
    ///
    /// [`upper`]: MemoryRegion::upper
    pub fn new(base: u64, size: u64, name: impl Into<String>) -> Result<Self, TraceError> {
        if size == 0 {
            return Err(TraceError::EmptyRegion { base });
        }
        if base.checked_add(size - 1).is_none() {
            return Err(TraceError::RegionOverflow { base, size });
        }
        Ok(Self {
            base,
            size,
            name: name.into(),
        })
    }

    pub(crate) fn from_record(record: &RegionRecord) -> Result<Self, TraceError> {
        Self::new(record.base, record.size, record.name.clone())
    }

    /// Base address of the mapping.
    #[must_use]
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Size of the mapping in bytes, always positive.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Backing file name, empty for anonymous mappings.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First address of the region.
    #[must_use]
    pub const fn lower(&self) -> u64 {
        self.base
    }

    /// Last address of the region, inclusive.
    #[must_use]
    pub const fn upper(&self) -> u64 {
        self.base + (self.size - 1)
    }

    /// Whether `addr` falls inside this region, bounds included.
    #[must_use]
    pub const fn contains(&self, addr: u64) -> bool {
        self.lower() <= addr && addr <= self.upper()
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#010x}, {:#010x}] {}", self.lower(), self.upper(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let region = MemoryRegion::new(0x1000, 0x2000, "libtarget.so").unwrap();
        assert_eq!(region.lower(), 0x1000);
        assert_eq!(region.upper(), 0x2fff);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let region = MemoryRegion::new(0x1000, 0x1000, "").unwrap();
        assert!(region.contains(0x1000));
        assert!(region.contains(0x1fff));
        assert!(!region.contains(0xfff));
        assert!(!region.contains(0x2000));
    }

    #[test]
    fn test_single_byte_region() {
        let region = MemoryRegion::new(0x40, 1, "").unwrap();
        assert_eq!(region.lower(), region.upper());
        assert!(region.contains(0x40));
    }

    #[test]
    fn test_region_at_top_of_address_space() {
        let region = MemoryRegion::new(u64::MAX - 3, 4, "").unwrap();
        assert_eq!(region.upper(), u64::MAX);
        assert!(region.contains(u64::MAX));
        assert!(!region.contains(u64::MAX - 4));
    }

    #[test]
    fn test_overflowing_region_rejected() {
        let err = MemoryRegion::new(u64::MAX - 1, 4, "").unwrap_err();
        assert!(matches!(
            err,
            TraceError::RegionOverflow {
                base,
                size: 4,
            } if base == u64::MAX - 1
        ));
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = MemoryRegion::new(0x4000, 0, "stack").unwrap_err();
        assert!(matches!(err, TraceError::EmptyRegion { base: 0x4000 }));
    }

    #[test]
    fn test_orders_by_base() {
        let low = MemoryRegion::new(0x1000, 0x100, "b").unwrap();
        let high = MemoryRegion::new(0x2000, 0x100, "a").unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_display() {
        let region = MemoryRegion::new(0x1000, 0x1000, "heap").unwrap();
        assert_eq!(format!("{region}"), "[0x00001000, 0x00001fff] heap");
    }
}
