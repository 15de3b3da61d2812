//! Per-session position tracking.

/// Where a seek is measured from.
///
/// The raw numbers are part of the external contract: callers driving the
/// device over its numeric interface pass 0, 1 or 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Whence {
    FromStart = 0,
    FromCurrent = 1,
    FromEnd = 2,
}

impl Whence {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Whence::FromStart),
            1 => Some(Whence::FromCurrent),
            2 => Some(Whence::FromEnd),
            _ => None,
        }
    }
}

/// The seek target landed outside `[0, capacity]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange;

impl core::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "seek target outside the region")
    }
}

/// A signed offset into a region of known capacity.
///
/// Invariant: `0 <= offset <= capacity`. The offset may equal the capacity,
/// meaning "at end"; it never exceeds it and is never negative. Each open
/// session owns exactly one cursor.
pub struct PositionCursor {
    offset: i64,
    capacity: u32,
}

impl PositionCursor {
    pub fn new(capacity: u32) -> Self {
        PositionCursor {
            offset: 0,
            capacity,
        }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Recompute the offset relative to the chosen origin.
    ///
    /// Returns the new offset on success. The cursor is unchanged when the
    /// candidate falls outside `[0, capacity]`.
    pub fn seek(&mut self, base: i64, whence: Whence) -> Result<i64, OutOfRange> {
        let candidate = match whence {
            Whence::FromStart => base,
            Whence::FromCurrent => self.offset.checked_add(base).ok_or(OutOfRange)?,
            Whence::FromEnd => i64::from(self.capacity).checked_add(base).ok_or(OutOfRange)?,
        };

        if candidate < 0 || candidate > i64::from(self.capacity) {
            return Err(OutOfRange);
        }

        self.offset = candidate;
        Ok(candidate)
    }

    /// Advance past `n` transferred bytes.
    ///
    /// The store clamps every transfer at the capacity, so the invariant
    /// holds afterwards.
    pub fn advance(&mut self, n: usize) {
        self.offset += n as i64;
        debug_assert!(self.offset <= i64::from(self.capacity));
    }
}

#[test]
fn seek_origins() {
    let mut cursor = PositionCursor::new(100);

    assert_eq!(cursor.seek(40, Whence::FromStart), Ok(40));
    assert_eq!(cursor.seek(10, Whence::FromCurrent), Ok(50));
    assert_eq!(cursor.seek(-10, Whence::FromEnd), Ok(90));
    assert_eq!(cursor.seek(0, Whence::FromEnd), Ok(100));
}

#[test]
fn seek_round_trip() {
    let mut cursor = PositionCursor::new(100);
    for target in [0, 1, 57, 100] {
        assert_eq!(cursor.seek(target, Whence::FromStart), Ok(target));
        assert_eq!(cursor.seek(0, Whence::FromCurrent), Ok(target));
    }
}

#[test]
fn seek_out_of_range_leaves_offset() {
    let mut cursor = PositionCursor::new(100);
    cursor.seek(30, Whence::FromStart).unwrap();

    assert_eq!(cursor.seek(101, Whence::FromStart), Err(OutOfRange));
    assert_eq!(cursor.seek(-1, Whence::FromStart), Err(OutOfRange));
    assert_eq!(cursor.seek(-101, Whence::FromEnd), Err(OutOfRange));
    assert_eq!(cursor.offset(), 30);
}

#[test]
fn whence_raw_contract() {
    assert_eq!(Whence::from_raw(0), Some(Whence::FromStart));
    assert_eq!(Whence::from_raw(1), Some(Whence::FromCurrent));
    assert_eq!(Whence::from_raw(2), Some(Whence::FromEnd));
    assert_eq!(Whence::from_raw(3), None);
}
