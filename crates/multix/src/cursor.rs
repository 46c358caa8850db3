//! Per-record, per-index positions.

/// Where a record sits in one index.
///
/// Every [`IndexedRecord`](crate::IndexedRecord) holds one cursor per
/// registered index, in registration order. Cursors start out
/// [`Detached`](Cursor::Detached) and are filled in as the record is admitted
/// to each index. Sequenced and ordered cursors name the record's node in that
/// index's arena, which makes navigation and removal O(1) to locate; a hashed
/// cursor carries nothing, since the key locates the entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Detached,
    Sequenced(u32),
    Hashed,
    Ordered(u32),
}

impl Cursor {
    pub fn is_attached(&self) -> bool {
        !matches!(self, Cursor::Detached)
    }
}
