//! The container: owns every record and coordinates every index.

use indexmap::IndexMap;
use tracing::trace;

use crate::attributes::Attributes;
use crate::cursor::Cursor;
use crate::entry::Entry;
use crate::error::{MultixError, Rejected, ValidationError};
use crate::id::RecordId;
use crate::index::{Index, IndexKind, IndexSpec, KeySelector};
use crate::record::{IndexedRecord, RecordArena};
use crate::view::{HashedView, OrderedView, SequencedView, View};

/// A collection of records indexed several ways at once.
///
/// Each record is stored once. Every registered index files it on insertion
/// and drops it on removal, and insertion is all-or-nothing: if any index
/// rejects a record, no index sees it.
///
/// ```
/// use multix::{KeySelector, Multix, Value};
///
/// struct Talk {
///     speaker: &'static str,
///     slot: u32,
/// }
///
/// let mut talks = Multix::builder()
///     .sequenced("seq")
///     .hashed("speaker", KeySelector::new(|t: &Talk| t.speaker))
///     .ordered("slot", KeySelector::new(|t: &Talk| t.slot))
///     .build()
///     .unwrap();
///
/// let b = talks.insert(Talk { speaker: "b", slot: 2 }).unwrap();
/// talks.insert(Talk { speaker: "a", slot: 1 }).unwrap();
/// assert!(talks.insert(Talk { speaker: "a", slot: 3 }).is_err());
///
/// let slots: Vec<u32> = talks.ordered("slot").unwrap().iter().map(|t| t.slot).collect();
/// assert_eq!(slots, vec![1, 2]);
///
/// let found = talks.hashed("speaker").unwrap().get(&Value::from("b")).unwrap().id();
/// assert_eq!(found, b);
/// assert_eq!(talks.remove(b).speaker, "b");
/// ```
#[derive(Debug)]
pub struct Multix<R> {
    records: RecordArena<R>,
    indexes: IndexMap<String, Index<R>>,
}

impl<R> Multix<R> {
    pub fn builder() -> MultixBuilder<R> {
        MultixBuilder::new()
    }

    /// Container with the given indexes, in registration order.
    pub fn new(specs: impl IntoIterator<Item = IndexSpec<R>>) -> Result<Self, MultixError> {
        specs
            .into_iter()
            .fold(MultixBuilder::new(), MultixBuilder::index)
            .build()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.len() == 0
    }

    /// Index names in registration order.
    pub fn index_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.indexes.keys().map(String::as_str)
    }

    pub fn index_kind(&self, name: &str) -> Option<IndexKind> {
        self.indexes.get(name).map(Index::kind)
    }

    /// Insert `record` into every index, or into none.
    ///
    /// Fails with [`MultixError::DuplicateKey`] when a hashed index already
    /// holds the record's key, or [`MultixError::MissingKey`] when a keyed
    /// index finds no key on it. The record is dropped on failure; use
    /// [`try_insert`](Self::try_insert) to get it back.
    pub fn insert(&mut self, record: R) -> Result<RecordId, MultixError> {
        self.try_insert(record).map_err(|rejected| rejected.error)
    }

    /// Like [`insert`](Self::insert), but hands a rejected record back.
    pub fn try_insert(&mut self, record: R) -> Result<RecordId, Rejected<R>> {
        let mut keys = Vec::with_capacity(self.indexes.len());
        for (name, index) in &self.indexes {
            match index.admit(name, &record) {
                Ok(key) => keys.push(key),
                Err(error) => return Err(Rejected { error, record }),
            }
        }

        let id = self.records.vacant_id();
        let mut cursors = vec![Cursor::Detached; self.indexes.len()].into_boxed_slice();
        for ((cursor, index), key) in cursors.iter_mut().zip(self.indexes.values_mut()).zip(keys) {
            *cursor = index.commit(id, key);
        }
        debug_assert!(cursors.iter().all(Cursor::is_attached));
        self.records.insert(IndexedRecord::new(id, record, cursors));
        trace!(record = %id, indexes = self.indexes.len(), "inserted");
        Ok(id)
    }

    /// Remove the record from every index and hand it back.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live record of this container.
    pub fn remove(&mut self, id: RecordId) -> R {
        let Some(entry) = self.records.remove(id) else {
            panic!("remove of record {id}, which is not in the container");
        };
        for (pos, (name, index)) in self.indexes.iter_mut().enumerate() {
            index.detach(name, entry.cursor(pos), id, entry.record());
        }
        trace!(record = %id, indexes = self.indexes.len(), "removed");
        entry.into_record()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.get(id).is_some()
    }

    pub fn get(&self, id: RecordId) -> Option<&IndexedRecord<R>> {
        self.records.get(id)
    }

    /// A handle on a live record that can navigate by itself.
    pub fn entry(&self, id: RecordId) -> Option<Entry<'_, R>> {
        self.records.get(id).map(|record| Entry::new(self, record))
    }

    /// Mutable access to a record. Changing a field an index keys on while
    /// the record is in the container corrupts that index.
    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut IndexedRecord<R>> {
        self.records.get_mut(id)
    }

    /// Every live record, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedRecord<R>> + '_ {
        self.records.iter()
    }

    /// The index registered as `name`.
    pub fn view(&mut self, name: &str) -> Result<View<'_, R>, MultixError> {
        let records = &self.records;
        let index = self
            .indexes
            .get_mut(name)
            .ok_or_else(|| MultixError::UnknownIndex(name.to_string()))?;
        Ok(match index {
            Index::Sequenced(index) => View::Sequenced(SequencedView { index, records }),
            Index::Hashed(index) => View::Hashed(HashedView { index, records }),
            Index::Ordered(index) => View::Ordered(OrderedView { index, records }),
        })
    }

    pub fn sequenced(&self, name: &str) -> Result<SequencedView<'_, R>, MultixError> {
        match self.lookup_index(name)? {
            Index::Sequenced(index) => Ok(SequencedView {
                index,
                records: &self.records,
            }),
            other => Err(mismatch(name, IndexKind::Sequenced, other.kind())),
        }
    }

    pub fn hashed(&self, name: &str) -> Result<HashedView<'_, R>, MultixError> {
        match self.lookup_index(name)? {
            Index::Hashed(index) => Ok(HashedView {
                index,
                records: &self.records,
            }),
            other => Err(mismatch(name, IndexKind::Hashed, other.kind())),
        }
    }

    pub fn ordered(&mut self, name: &str) -> Result<OrderedView<'_, R>, MultixError> {
        match self.view(name)? {
            View::Ordered(view) => Ok(view),
            other => Err(mismatch(name, IndexKind::Ordered, other.kind())),
        }
    }

    /// The record after `id` in index `name`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live.
    pub fn successor(&self, id: RecordId, name: &str) -> Result<Option<RecordId>, MultixError> {
        let (pos, index) = self.cursor_index(name)?;
        index.successor(name, self.live(id).cursor(pos))
    }

    /// The record before `id` in index `name`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live.
    pub fn predecessor(&self, id: RecordId, name: &str) -> Result<Option<RecordId>, MultixError> {
        let (pos, index) = self.cursor_index(name)?;
        index.predecessor(name, self.live(id).cursor(pos))
    }

    /// Check that every index holds exactly the live records, that every
    /// record's cursors point back at it, and that ordered trees are sound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for entry in self.records.iter() {
            let detached = entry.cursors().iter().position(|c| !c.is_attached());
            if let Some(pos) = detached {
                let name = self
                    .indexes
                    .get_index(pos)
                    .map_or_else(|| format!("#{pos}"), |(name, _)| name.clone());
                return Err(ValidationError::Detached {
                    index: name,
                    record: entry.id(),
                });
            }
        }
        for (pos, (name, index)) in self.indexes.iter().enumerate() {
            index.validate(name, pos, &self.records)?;
        }
        Ok(())
    }

    fn lookup_index(&self, name: &str) -> Result<&Index<R>, MultixError> {
        self.indexes
            .get(name)
            .ok_or_else(|| MultixError::UnknownIndex(name.to_string()))
    }

    fn cursor_index(&self, name: &str) -> Result<(usize, &Index<R>), MultixError> {
        self.indexes
            .get_full(name)
            .map(|(pos, _, index)| (pos, index))
            .ok_or_else(|| MultixError::UnknownIndex(name.to_string()))
    }

    pub(crate) fn live(&self, id: RecordId) -> &IndexedRecord<R> {
        match self.records.get(id) {
            Some(entry) => entry,
            None => panic!("record {id} is not in the container"),
        }
    }
}

fn mismatch(name: &str, expected: IndexKind, found: IndexKind) -> MultixError {
    MultixError::IndexKindMismatch {
        index: name.to_string(),
        expected,
        found,
    }
}

/// Declares the indexes of a [`Multix`].
///
/// Indexes are committed to in registration order, and that order is what
/// [`Multix::index_names`] and each record's cursor table follow.
#[derive(Debug)]
pub struct MultixBuilder<R> {
    specs: Vec<IndexSpec<R>>,
    capacity: usize,
}

impl<R> Default for MultixBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MultixBuilder<R> {
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            capacity: 0,
        }
    }

    /// Pre-size record storage and every index for `capacity` records.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn index(mut self, spec: IndexSpec<R>) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn sequenced(self, name: impl Into<String>) -> Self {
        self.index(IndexSpec::sequenced(name))
    }

    pub fn hashed(self, name: impl Into<String>, key: KeySelector<R>) -> Self {
        self.index(IndexSpec::hashed(name, key))
    }

    pub fn ordered(self, name: impl Into<String>, key: KeySelector<R>) -> Self {
        self.index(IndexSpec::ordered(name, key))
    }

    /// Hashed index keyed on attribute `attribute`.
    pub fn hashed_by(self, name: impl Into<String>, attribute: impl Into<String>) -> Self
    where
        R: Attributes,
    {
        self.hashed(name, KeySelector::attribute(attribute))
    }

    /// Ordered index keyed on attribute `attribute`.
    pub fn ordered_by(self, name: impl Into<String>, attribute: impl Into<String>) -> Self
    where
        R: Attributes,
    {
        self.ordered(name, KeySelector::attribute(attribute))
    }

    /// Fails with [`MultixError::DuplicateIndex`] if two indexes share a name.
    pub fn build(self) -> Result<Multix<R>, MultixError> {
        let mut indexes = IndexMap::with_capacity(self.specs.len());
        for spec in self.specs {
            let (name, index) = spec.build(self.capacity);
            if indexes.contains_key(&name) {
                return Err(MultixError::DuplicateIndex(name));
            }
            indexes.insert(name, index);
        }
        trace!(
            indexes = ?indexes.keys().collect::<Vec<_>>(),
            capacity = self.capacity,
            "built container"
        );
        Ok(Multix {
            records: RecordArena::with_capacity(self.capacity),
            indexes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Multix<(u32, &'static str)> {
        Multix::builder()
            .sequenced("seq")
            .hashed("name", KeySelector::new(|r: &(u32, &'static str)| r.1))
            .build()
            .unwrap()
    }

    #[test]
    fn validate_reports_a_detached_cursor() {
        let mut m = names();
        let a = m.insert((1, "a")).unwrap();
        let b = m.insert((2, "b")).unwrap();
        assert_eq!(m.validate(), Ok(()));

        m.records.get_mut(b).unwrap().cursors_mut()[1] = Cursor::Detached;
        assert_eq!(
            m.validate(),
            Err(ValidationError::Detached {
                index: "name".to_string(),
                record: b,
            })
        );
        assert!(m.get(a).unwrap().cursors().iter().all(Cursor::is_attached));
    }

    #[test]
    fn rejected_insert_fills_no_cursor_table() {
        let mut m = names();
        m.insert((1, "a")).unwrap();
        let next = m.records.vacant_id();
        assert!(m.try_insert((2, "a")).is_err());
        assert_eq!(m.records.vacant_id(), next);
        assert!(!m.contains(next));
        assert_eq!(m.validate(), Ok(()));
    }
}
