use memmap2::MmapMut;

/// Capacity used when the caller does not choose one, in bytes.
pub const DEFAULT_CAPACITY: u32 = 1024;

/// A fixed-capacity, RAM-backed byte region.
///
/// Backed by an anonymous memory map of exactly `capacity` bytes, zeroed
/// on creation and never reallocated to a different size.
pub struct BoundedStore {
    /// The backing allocation. Its length equals `capacity` for the whole
    /// lifetime of the store.
    map: MmapMut,
    capacity: u32,
}

impl BoundedStore {
    /// Allocate a zeroed region of `capacity` bytes.
    pub fn with_capacity(capacity: u32) -> Result<Self, std::io::Error> {
        let map = MmapMut::map_anon(capacity as usize)?;
        Ok(BoundedStore { map, capacity })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Copy bytes starting at `offset` into `buf`, returning the count
    /// actually transferred.
    ///
    /// The transfer is clamped so it never crosses the capacity boundary.
    /// An `offset` at or past the capacity transfers zero bytes; that is
    /// end-of-region, not an error.
    pub fn read_at(&self, offset: i64, buf: &mut [u8]) -> usize {
        let Some(span) = self.span_at(offset, buf.len()) else {
            return 0;
        };
        let n = span.len();
        buf[..n].copy_from_slice(&self.map[span]);
        n
    }

    /// Copy `data` into the region starting at `offset`, returning the
    /// count actually written.
    ///
    /// Clamped like [`read_at`](Self::read_at); bytes past the capacity
    /// boundary are dropped, not buffered and not an error.
    pub fn write_at(&mut self, offset: i64, data: &[u8]) -> usize {
        let Some(span) = self.span_at(offset, data.len()) else {
            return 0;
        };
        let n = span.len();
        self.map[span].copy_from_slice(&data[..n]);
        n
    }

    /// Zero the whole region.
    pub fn clear(&mut self) {
        self.map.fill(0);
    }

    /// Count the bytes satisfying `predicate` over the whole region.
    pub fn count_matching(&self, predicate: impl Fn(u8) -> bool) -> u32 {
        // Capacity is a u32, so the count always fits.
        self.map.iter().filter(|&&byte| predicate(byte)).count() as u32
    }

    /// Allocate a fresh region of the same capacity carrying a copy of the
    /// current contents.
    pub fn duplicate(&self) -> Result<Self, std::io::Error> {
        let mut map = MmapMut::map_anon(self.capacity as usize)?;
        map.copy_from_slice(&self.map);
        Ok(BoundedStore {
            map,
            capacity: self.capacity,
        })
    }

    /// The in-bounds span for a transfer of up to `len` bytes at `offset`,
    /// or `None` when the offset is at or past the end of the region.
    fn span_at(&self, offset: i64, len: usize) -> Option<core::ops::Range<usize>> {
        let capacity = self.capacity as usize;
        let offset = usize::try_from(offset).ok()?;
        if offset >= capacity {
            return None;
        }
        let len = len.min(capacity - offset);
        Some(offset..offset + len)
    }
}

#[test]
fn transfers_are_clamped() {
    let mut store = BoundedStore::with_capacity(16).unwrap();

    assert_eq!(store.write_at(12, b"abcdefgh"), 4);

    let mut buf = [0u8; 8];
    assert_eq!(store.read_at(12, &mut buf), 4);
    assert_eq!(&buf[..4], b"abcd");
}

#[test]
fn end_of_region_transfers_nothing() {
    let mut store = BoundedStore::with_capacity(16).unwrap();
    let mut buf = [0u8; 4];

    assert_eq!(store.read_at(16, &mut buf), 0);
    assert_eq!(store.write_at(16, b"data"), 0);
    assert_eq!(store.read_at(0, &mut []), 0);
}

#[test]
fn fresh_region_is_zeroed() {
    let store = BoundedStore::with_capacity(32).unwrap();
    assert_eq!(store.count_matching(|byte| byte == 0), 32);
}

#[test]
fn clear_resets_contents() {
    let mut store = BoundedStore::with_capacity(32).unwrap();
    store.write_at(0, b"some bytes");
    store.clear();
    assert_eq!(store.count_matching(|byte| byte != 0), 0);
}

#[test]
fn duplicate_carries_contents() {
    let mut store = BoundedStore::with_capacity(16).unwrap();
    store.write_at(4, b"copy");

    let copy = store.duplicate().unwrap();
    assert_eq!(copy.capacity(), 16);

    let mut buf = [0u8; 4];
    assert_eq!(copy.read_at(4, &mut buf), 4);
    assert_eq!(&buf, b"copy");

    // The copy is a separate allocation.
    store.write_at(4, b"gone");
    assert_eq!(copy.read_at(4, &mut buf), 4);
    assert_eq!(&buf, b"copy");
}
