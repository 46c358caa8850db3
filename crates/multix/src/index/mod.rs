//! Index kinds and their shared admission / commit / detach plumbing.

pub mod hashed;
pub mod ordered;
pub mod sequenced;

use std::fmt;

use crate::attributes::Attributes;
use crate::cursor::Cursor;
use crate::error::{MultixError, ValidationError};
use crate::id::RecordId;
use crate::record::RecordArena;
use crate::value::Value;

pub use hashed::HashedIndex;
pub use ordered::OrderedIndex;
pub use sequenced::SequencedIndex;

type KeyFn<R> = dyn Fn(&R) -> Option<Value> + Send + Sync;

/// Extracts an index key from a record.
pub struct KeySelector<R> {
    describe: String,
    extract: Box<KeyFn<R>>,
}

impl<R> KeySelector<R> {
    /// Key computed by `f`.
    ///
    /// The key keeps the [`Value`] variant its type converts to, and keys of
    /// different variants never compare equal: a `u32` field is stored as
    /// [`Value::UInt`], so looking it up with `Value::from(13)` (an
    /// [`Value::Int`]) misses. Look keys up with the same Rust type the
    /// selector returns.
    ///
    /// ```
    /// use multix::{KeySelector, Multix, Value};
    ///
    /// let mut m = Multix::builder()
    ///     .ordered("n", KeySelector::new(|n: &u32| *n))
    ///     .build()
    ///     .unwrap();
    /// m.insert(13u32).unwrap();
    ///
    /// let mut view = m.ordered("n").unwrap();
    /// assert!(view.lookup(&Value::from(13u32)).is_some());
    /// assert!(view.lookup(&Value::from(13)).is_none());
    /// ```
    pub fn new<F, K>(f: F) -> Self
    where
        F: Fn(&R) -> K + Send + Sync + 'static,
        K: Into<Value>,
    {
        Self {
            describe: "fn".to_string(),
            extract: Box::new(move |r| Some(f(r).into())),
        }
    }

    /// Key computed by `f`, which may find none. A record without a key is
    /// rejected at admission.
    pub fn optional<F>(f: F) -> Self
    where
        F: Fn(&R) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            describe: "fn".to_string(),
            extract: Box::new(f),
        }
    }

    /// Key read from the record's attribute `name`.
    pub fn attribute(name: impl Into<String>) -> Self
    where
        R: Attributes,
    {
        let name = name.into();
        Self {
            describe: format!("attribute {name:?}"),
            extract: Box::new(move |r: &R| r.attribute(&name)),
        }
    }

    pub fn extract(&self, record: &R) -> Option<Value> {
        (self.extract)(record)
    }
}

impl<R> fmt::Debug for KeySelector<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeySelector").field(&self.describe).finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Sequenced,
    Hashed,
    Ordered,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexKind::Sequenced => "sequenced",
            IndexKind::Hashed => "hashed",
            IndexKind::Ordered => "ordered",
        })
    }
}

/// Declaration of one index: its name, kind and key selector.
#[derive(Debug)]
pub struct IndexSpec<R> {
    pub(crate) name: String,
    pub(crate) kind: SpecKind<R>,
}

#[derive(Debug)]
pub(crate) enum SpecKind<R> {
    Sequenced,
    Hashed(KeySelector<R>),
    Ordered(KeySelector<R>),
}

impl<R> IndexSpec<R> {
    /// Insertion-order index.
    pub fn sequenced(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SpecKind::Sequenced,
        }
    }

    /// Unique-key hash index.
    pub fn hashed(name: impl Into<String>, key: KeySelector<R>) -> Self {
        Self {
            name: name.into(),
            kind: SpecKind::Hashed(key),
        }
    }

    /// Key-ordered splay index; duplicate keys allowed.
    pub fn ordered(name: impl Into<String>, key: KeySelector<R>) -> Self {
        Self {
            name: name.into(),
            kind: SpecKind::Ordered(key),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> IndexKind {
        match self.kind {
            SpecKind::Sequenced => IndexKind::Sequenced,
            SpecKind::Hashed(_) => IndexKind::Hashed,
            SpecKind::Ordered(_) => IndexKind::Ordered,
        }
    }

    pub(crate) fn build(self, capacity: usize) -> (String, Index<R>) {
        let index = match self.kind {
            SpecKind::Sequenced => Index::Sequenced(SequencedIndex::with_capacity(capacity)),
            SpecKind::Hashed(key) => Index::Hashed(HashedIndex::with_capacity(key, capacity)),
            SpecKind::Ordered(key) => Index::Ordered(OrderedIndex::with_capacity(key, capacity)),
        };
        (self.name, index)
    }
}

/// One registered index.
#[derive(Debug)]
pub(crate) enum Index<R> {
    Sequenced(SequencedIndex),
    Hashed(HashedIndex<R>),
    Ordered(OrderedIndex<R>),
}

impl<R> Index<R> {
    pub(crate) fn kind(&self) -> IndexKind {
        match self {
            Index::Sequenced(_) => IndexKind::Sequenced,
            Index::Hashed(_) => IndexKind::Hashed,
            Index::Ordered(_) => IndexKind::Ordered,
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Index::Sequenced(idx) => idx.len(),
            Index::Hashed(idx) => idx.len(),
            Index::Ordered(idx) => idx.len(),
        }
    }

    /// Admission check. On success returns the key this index will file the
    /// record under, if it uses one.
    pub(crate) fn admit(&self, name: &str, record: &R) -> Result<Option<Value>, MultixError> {
        match self {
            Index::Sequenced(_) => Ok(None),
            Index::Hashed(idx) => idx.admit(name, record).map(Some),
            Index::Ordered(idx) => idx.admit(name, record).map(Some),
        }
    }

    /// File an admitted record. `key` is what [`admit`](Self::admit) returned.
    pub(crate) fn commit(&mut self, id: RecordId, key: Option<Value>) -> Cursor {
        match (self, key) {
            (Index::Sequenced(idx), _) => Cursor::Sequenced(idx.push_back(id)),
            (Index::Hashed(idx), Some(key)) => {
                idx.insert(key, id);
                Cursor::Hashed
            }
            (Index::Ordered(idx), Some(key)) => Cursor::Ordered(idx.insert(key, id)),
            (_, None) => unreachable!("keyed index committed without a key"),
        }
    }

    /// Drop `record` from this index.
    ///
    /// # Panics
    ///
    /// Panics when the cursor does not belong to this index kind, or a hashed
    /// record's key can no longer be found.
    pub(crate) fn detach(&mut self, name: &str, cursor: Cursor, id: RecordId, record: &R) {
        match (self, cursor) {
            (Index::Sequenced(idx), Cursor::Sequenced(node)) => {
                let unlinked = idx.unlink(node);
                debug_assert_eq!(unlinked, id);
            }
            (Index::Hashed(idx), Cursor::Hashed) => idx.remove(name, id, record),
            (Index::Ordered(idx), Cursor::Ordered(node)) => {
                let removed = idx.remove(node);
                debug_assert_eq!(removed, id);
            }
            (idx, cursor) => panic!(
                "record {id} carries {cursor:?} for {} index {name:?}",
                idx.kind()
            ),
        }
    }

    pub(crate) fn successor(&self, name: &str, cursor: Cursor) -> Result<Option<RecordId>, MultixError> {
        match (self, cursor) {
            (Index::Sequenced(idx), Cursor::Sequenced(node)) => Ok(idx.next(node)),
            (Index::Ordered(idx), Cursor::Ordered(node)) => Ok(idx.next(node)),
            (Index::Hashed(_), _) => Err(MultixError::NoNavigation(name.to_string())),
            (idx, cursor) => panic!("{cursor:?} used with {} index {name:?}", idx.kind()),
        }
    }

    pub(crate) fn predecessor(
        &self,
        name: &str,
        cursor: Cursor,
    ) -> Result<Option<RecordId>, MultixError> {
        match (self, cursor) {
            (Index::Sequenced(idx), Cursor::Sequenced(node)) => Ok(idx.prev(node)),
            (Index::Ordered(idx), Cursor::Ordered(node)) => Ok(idx.prev(node)),
            (Index::Hashed(_), _) => Err(MultixError::NoNavigation(name.to_string())),
            (idx, cursor) => panic!("{cursor:?} used with {} index {name:?}", idx.kind()),
        }
    }

    /// Check this index against the records it claims to hold. `pos` is the
    /// index's slot in every record's cursor table.
    pub(crate) fn validate(
        &self,
        name: &str,
        pos: usize,
        records: &RecordArena<R>,
    ) -> Result<(), ValidationError> {
        if self.len() != records.len() {
            return Err(ValidationError::LengthMismatch {
                index: name.to_string(),
                expected: records.len(),
                found: self.len(),
            });
        }
        match self {
            Index::Sequenced(idx) => idx.validate(name, pos, records),
            Index::Hashed(idx) => idx.validate(name, pos, records),
            Index::Ordered(idx) => idx.validate(name, pos, records),
        }
    }
}
