//! Unique-key hash index.

use std::collections::{hash_map, HashMap};

use tracing::debug;

use super::KeySelector;
use crate::cursor::Cursor;
use crate::error::{MultixError, ValidationError};
use crate::id::RecordId;
use crate::record::RecordArena;
use crate::value::Value;

#[derive(Debug)]
pub struct HashedIndex<R> {
    key: KeySelector<R>,
    map: HashMap<Value, RecordId>,
}

impl<R> HashedIndex<R> {
    pub fn with_capacity(key: KeySelector<R>, capacity: usize) -> Self {
        Self {
            key,
            map: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Extract the record's key and check nobody holds it yet.
    pub(crate) fn admit(&self, name: &str, record: &R) -> Result<Value, MultixError> {
        let Some(key) = self.key.extract(record) else {
            debug!(index = name, "rejecting record without a key");
            return Err(MultixError::MissingKey {
                index: name.to_string(),
            });
        };
        if self.map.contains_key(&key) {
            debug!(index = name, %key, "rejecting duplicate key");
            return Err(MultixError::DuplicateKey {
                index: name.to_string(),
                key,
            });
        }
        Ok(key)
    }

    pub(crate) fn insert(&mut self, key: Value, id: RecordId) {
        let prior = self.map.insert(key, id);
        debug_assert!(prior.is_none(), "hashed insert without admission");
    }

    /// Erase the entry filed under `record`'s key.
    ///
    /// # Panics
    ///
    /// Panics when the record no longer yields a key: it was changed while
    /// indexed.
    pub(crate) fn remove(&mut self, name: &str, id: RecordId, record: &R) {
        let Some(key) = self.key.extract(record) else {
            panic!("record {id} lost its key for index {name:?} while indexed");
        };
        let removed = self.map.remove(&key);
        debug_assert_eq!(removed, Some(id), "record {id} filed under another key");
    }

    pub fn get(&self, key: &Value) -> Option<RecordId> {
        self.map.get(key).copied()
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.map.contains_key(key)
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.map.iter(),
        }
    }

    pub(crate) fn validate(
        &self,
        name: &str,
        pos: usize,
        records: &RecordArena<R>,
    ) -> Result<(), ValidationError> {
        for (key, &id) in &self.map {
            let Some(record) = records.get(id) else {
                return Err(ValidationError::DeadRecord {
                    index: name.to_string(),
                    record: id,
                });
            };
            if record.cursor(pos) != Cursor::Hashed {
                return Err(ValidationError::Detached {
                    index: name.to_string(),
                    record: id,
                });
            }
            if self.key.extract(record.record()).as_ref() != Some(key) {
                return Err(ValidationError::CursorMismatch {
                    index: name.to_string(),
                    record: id,
                });
            }
        }
        Ok(())
    }
}

/// Entries of a [`HashedIndex`] in unspecified order.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, Value, RecordId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Value, RecordId);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, &id)| (k, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
