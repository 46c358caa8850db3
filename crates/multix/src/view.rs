//! Borrowed views of one index, resolving record ids to records.

use crate::id::RecordId;
use crate::index::{hashed, ordered, sequenced, HashedIndex, IndexKind, OrderedIndex, SequencedIndex};
use crate::record::{IndexedRecord, RecordArena};
use crate::value::Value;

/// Insertion-order view.
pub struct SequencedView<'a, R> {
    pub(crate) index: &'a SequencedIndex,
    pub(crate) records: &'a RecordArena<R>,
}

impl<'a, R> SequencedView<'a, R> {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn first(&self) -> Option<&'a IndexedRecord<R>> {
        self.index.first().map(|id| self.records.expect_live(id))
    }

    pub fn last(&self) -> Option<&'a IndexedRecord<R>> {
        self.index.last().map(|id| self.records.expect_live(id))
    }

    /// Records oldest first; `.rev()` walks newest first.
    pub fn iter(&self) -> SequencedIter<'a, R> {
        SequencedIter {
            ids: self.index.iter(),
            records: self.records,
        }
    }
}

impl<'a, R> IntoIterator for &SequencedView<'a, R> {
    type Item = &'a IndexedRecord<R>;
    type IntoIter = SequencedIter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct SequencedIter<'a, R> {
    ids: sequenced::Iter<'a>,
    records: &'a RecordArena<R>,
}

impl<'a, R> Iterator for SequencedIter<'a, R> {
    type Item = &'a IndexedRecord<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| self.records.expect_live(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<R> DoubleEndedIterator for SequencedIter<'_, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|id| self.records.expect_live(id))
    }
}

impl<R> ExactSizeIterator for SequencedIter<'_, R> {}

/// Unique-key view.
pub struct HashedView<'a, R> {
    pub(crate) index: &'a HashedIndex<R>,
    pub(crate) records: &'a RecordArena<R>,
}

impl<'a, R> HashedView<'a, R> {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&'a IndexedRecord<R>> {
        self.index.get(key).map(|id| self.records.expect_live(id))
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.index.contains_key(key)
    }

    /// `(key, record)` pairs in unspecified order.
    pub fn iter(&self) -> HashedIter<'a, R> {
        HashedIter {
            entries: self.index.iter(),
            records: self.records,
        }
    }
}

pub struct HashedIter<'a, R> {
    entries: hashed::Iter<'a>,
    records: &'a RecordArena<R>,
}

impl<'a, R> Iterator for HashedIter<'a, R> {
    type Item = (&'a Value, &'a IndexedRecord<R>);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries
            .next()
            .map(|(key, id)| (key, self.records.expect_live(id)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

/// Key-ordered view.
///
/// Lookups splay the underlying tree and so need the view mutably; walks and
/// cursor navigation leave the tree alone.
pub struct OrderedView<'a, R> {
    pub(crate) index: &'a mut OrderedIndex<R>,
    pub(crate) records: &'a RecordArena<R>,
}

impl<'a, R> OrderedView<'a, R> {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// A record filed under `key`, if any. With duplicate keys, which of the
    /// equal records is returned depends on the tree's current shape.
    pub fn lookup(&mut self, key: &Value) -> Option<&'a IndexedRecord<R>> {
        let records = self.records;
        self.index.lookup(key).map(|id| records.expect_live(id))
    }

    pub fn contains_key(&mut self, key: &Value) -> bool {
        self.index.contains_key(key)
    }

    /// The record with the greatest key not above `key`.
    pub fn floor(&self, key: &Value) -> Option<&'a IndexedRecord<R>> {
        self.index.floor(key).map(|id| self.records.expect_live(id))
    }

    pub fn first(&self) -> Option<&'a IndexedRecord<R>> {
        self.index.first().map(|id| self.records.expect_live(id))
    }

    pub fn last(&self) -> Option<&'a IndexedRecord<R>> {
        self.index.last().map(|id| self.records.expect_live(id))
    }

    /// Records in key order, equal keys in insertion order.
    pub fn iter(&self) -> OrderedIter<'_, R> {
        OrderedIter {
            entries: self.index.iter(),
            records: self.records,
        }
    }

    /// Keys alongside records, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&Value, &IndexedRecord<R>)> + '_ {
        let records = self.records;
        self.index
            .iter()
            .map(move |(key, id)| (key, records.expect_live(id)))
    }

    /// Current tree shape, for debugging.
    pub fn dump(&self) -> String {
        self.index.dump()
    }
}

pub struct OrderedIter<'a, R> {
    entries: ordered::Iter<'a>,
    records: &'a RecordArena<R>,
}

impl<'a, R> Iterator for OrderedIter<'a, R> {
    type Item = &'a IndexedRecord<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries
            .next()
            .map(|(_, id)| self.records.expect_live(id))
    }
}

/// Any index, by name.
pub enum View<'a, R> {
    Sequenced(SequencedView<'a, R>),
    Hashed(HashedView<'a, R>),
    Ordered(OrderedView<'a, R>),
}

impl<'a, R> View<'a, R> {
    pub fn kind(&self) -> IndexKind {
        match self {
            View::Sequenced(_) => IndexKind::Sequenced,
            View::Hashed(_) => IndexKind::Hashed,
            View::Ordered(_) => IndexKind::Ordered,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            View::Sequenced(v) => v.len(),
            View::Hashed(v) => v.len(),
            View::Ordered(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every record in the index's own order (unspecified for hashed).
    pub fn iter(&self) -> Iter<'_, R> {
        match self {
            View::Sequenced(v) => Iter::Sequenced(v.iter()),
            View::Hashed(v) => Iter::Hashed(v.iter()),
            View::Ordered(v) => Iter::Ordered(v.iter()),
        }
    }

    /// Ids of every record, in [`iter`](Self::iter) order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.iter().map(IndexedRecord::id).collect()
    }

    pub fn into_sequenced(self) -> Option<SequencedView<'a, R>> {
        match self {
            View::Sequenced(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_hashed(self) -> Option<HashedView<'a, R>> {
        match self {
            View::Hashed(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_ordered(self) -> Option<OrderedView<'a, R>> {
        match self {
            View::Ordered(v) => Some(v),
            _ => None,
        }
    }
}

pub enum Iter<'a, R> {
    Sequenced(SequencedIter<'a, R>),
    Hashed(HashedIter<'a, R>),
    Ordered(OrderedIter<'a, R>),
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a IndexedRecord<R>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Sequenced(it) => it.next(),
            Iter::Hashed(it) => it.next().map(|(_, record)| record),
            Iter::Ordered(it) => it.next(),
        }
    }
}
