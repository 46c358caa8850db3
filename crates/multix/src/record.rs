//! Record wrappers and the arena that owns them.

use std::ops::{Deref, DerefMut};

use crate::attributes::Attributes;
use crate::cursor::Cursor;
use crate::error::AttributeError;
use crate::id::RecordId;
use crate::value::Value;

/// A record held by a [`Multix`](crate::Multix), with its cursor into every
/// index.
///
/// Dereferences to the wrapped record and forwards [`Attributes`] to it, so
/// an indexed record reads like the record itself. Navigation between records
/// goes through the container ([`Multix::successor`](crate::Multix::successor),
/// [`Multix::predecessor`](crate::Multix::predecessor)) since the index
/// structures live there.
#[derive(Debug)]
pub struct IndexedRecord<R> {
    id: RecordId,
    record: R,
    cursors: Box<[Cursor]>,
}

impl<R> IndexedRecord<R> {
    pub(crate) fn new(id: RecordId, record: R, cursors: Box<[Cursor]>) -> Self {
        Self {
            id,
            record,
            cursors,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    /// Mutable access to the wrapped record.
    ///
    /// Fields that an index extracts its key from must not change while the
    /// record is in the container.
    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    pub fn into_record(self) -> R {
        self.record
    }

    /// Cursors in index registration order.
    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    pub(crate) fn cursor(&self, pos: usize) -> Cursor {
        self.cursors[pos]
    }

    #[cfg(test)]
    pub(crate) fn cursors_mut(&mut self) -> &mut [Cursor] {
        &mut self.cursors
    }
}

impl<R> Deref for IndexedRecord<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

impl<R> DerefMut for IndexedRecord<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.record
    }
}

impl<R: Attributes> Attributes for IndexedRecord<R> {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.record.attribute(name)
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        self.record.set_attribute(name, value)
    }
}

#[derive(Debug)]
struct Slot<R> {
    generation: u32,
    entry: Option<IndexedRecord<R>>,
}

/// Generational arena of indexed records.
///
/// Freed slots are reused; the slot's generation is bumped on every removal
/// so stale ids miss.
#[derive(Debug)]
pub(crate) struct RecordArena<R> {
    slots: Vec<Slot<R>>,
    free: Vec<u32>,
    len: usize,
}

impl<R> RecordArena<R> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Id the next [`insert`](Self::insert) will hand out.
    pub(crate) fn vacant_id(&self) -> RecordId {
        match self.free.last() {
            Some(&slot) => RecordId::new(slot, self.slots[slot as usize].generation),
            None => RecordId::new(self.slots.len() as u32, 0),
        }
    }

    pub(crate) fn insert(&mut self, entry: IndexedRecord<R>) -> RecordId {
        let id = entry.id;
        debug_assert_eq!(id, self.vacant_id());
        match self.free.pop() {
            Some(slot) => self.slots[slot as usize].entry = Some(entry),
            None => self.slots.push(Slot {
                generation: id.generation,
                entry: Some(entry),
            }),
        }
        self.len += 1;
        id
    }

    pub(crate) fn get(&self, id: RecordId) -> Option<&IndexedRecord<R>> {
        let slot = self.slots.get(id.slot as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: RecordId) -> Option<&mut IndexedRecord<R>> {
        let slot = self.slots.get_mut(id.slot as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    pub(crate) fn remove(&mut self, id: RecordId) -> Option<IndexedRecord<R>> {
        let slot = self.slots.get_mut(id.slot as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.slot);
        self.len -= 1;
        Some(entry)
    }

    /// Live records in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &IndexedRecord<R>> + '_ {
        self.slots.iter().filter_map(|slot| slot.entry.as_ref())
    }

    /// Look up a record an index refers to.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live: indexes only hold live ids.
    pub(crate) fn expect_live(&self, id: RecordId) -> &IndexedRecord<R> {
        match self.get(id) {
            Some(entry) => entry,
            None => panic!("index refers to dead record {id}"),
        }
    }
}
