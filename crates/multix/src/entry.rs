//! Borrowed record handles that navigate on their own.

use std::fmt;
use std::ops::Deref;

use crate::error::MultixError;
use crate::id::RecordId;
use crate::multix::Multix;
use crate::record::IndexedRecord;

/// A live record together with the container holding it.
///
/// Unlike a bare [`IndexedRecord`], an entry can step to its neighbours in
/// any sequenced or ordered index by name. It borrows the container shared,
/// so it cannot outlive a later insertion or removal.
pub struct Entry<'a, R> {
    multix: &'a Multix<R>,
    record: &'a IndexedRecord<R>,
}

impl<'a, R> Entry<'a, R> {
    pub(crate) fn new(multix: &'a Multix<R>, record: &'a IndexedRecord<R>) -> Self {
        Self { multix, record }
    }

    pub fn id(&self) -> RecordId {
        self.record.id()
    }

    pub fn record(&self) -> &'a IndexedRecord<R> {
        self.record
    }

    /// The entry after this one in index `name`.
    pub fn successor(&self, name: &str) -> Result<Option<Entry<'a, R>>, MultixError> {
        let next = self.multix.successor(self.id(), name)?;
        Ok(next.map(|id| self.neighbour(id)))
    }

    /// The entry before this one in index `name`.
    pub fn predecessor(&self, name: &str) -> Result<Option<Entry<'a, R>>, MultixError> {
        let prev = self.multix.predecessor(self.id(), name)?;
        Ok(prev.map(|id| self.neighbour(id)))
    }

    fn neighbour(&self, id: RecordId) -> Entry<'a, R> {
        Entry::new(self.multix, self.multix.live(id))
    }
}

impl<R> Clone for Entry<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Entry<'_, R> {}

impl<R> Deref for Entry<'_, R> {
    type Target = IndexedRecord<R>;

    fn deref(&self) -> &IndexedRecord<R> {
        self.record
    }
}

impl<R: fmt::Debug> fmt::Debug for Entry<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry").field(self.record).finish()
    }
}
