use std::fmt;

/// Identity of a live record in a [`Multix`](crate::Multix).
///
/// Returned by insertion and carried by every [`IndexedRecord`](crate::IndexedRecord)
/// that lookups and iteration hand out, so a record found through one index
/// can be navigated in another or removed. Ids of removed records are never
/// handed out again, even though their storage slot is reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl RecordId {
    pub(crate) fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.slot, self.generation)
    }
}
