//! Key-ordered index backed by a splay tree.
//!
//! Tree nodes live in an arena owned by the index and link to each other by
//! `u32` position, parent links included. Insertion and lookup each perform
//! one splay step on the node they touch (a failed lookup splays the last
//! node it visited); removal splays the removed node's former parent.
//! Navigation and iteration are read-only and never reshape the tree.

use tracing::debug;

use splay_forest::util::print::dump;
use splay_forest::{self as forest, InOrder, Node, Search};

use super::KeySelector;
use crate::cursor::Cursor;
use crate::error::{MultixError, ValidationError};
use crate::id::RecordId;
use crate::record::RecordArena;
use crate::value::Value;

#[derive(Clone, Debug)]
pub(crate) struct TreeNode {
    p: Option<u32>,
    l: Option<u32>,
    r: Option<u32>,
    key: Value,
    record: RecordId,
}

impl TreeNode {
    fn new(key: Value, record: RecordId) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            key,
            record,
        }
    }
}

impl Node for TreeNode {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

fn key_of(node: &TreeNode) -> &Value {
    &node.key
}

#[derive(Debug)]
pub struct OrderedIndex<R> {
    key: KeySelector<R>,
    // Freed slots keep their last key until reused.
    arena: Vec<TreeNode>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
}

impl<R> OrderedIndex<R> {
    pub fn with_capacity(key: KeySelector<R>, capacity: usize) -> Self {
        Self {
            key,
            arena: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Extract the record's key. Ordered indexes admit duplicates, so only a
    /// missing key rejects.
    pub(crate) fn admit(&self, name: &str, record: &R) -> Result<Value, MultixError> {
        match self.key.extract(record) {
            Some(key) => Ok(key),
            None => {
                debug!(index = name, "rejecting record without a key");
                Err(MultixError::MissingKey {
                    index: name.to_string(),
                })
            }
        }
    }

    /// File `record` under `key` after every existing equal key, splay the
    /// new node, and return it.
    pub fn insert(&mut self, key: Value, record: RecordId) -> u32 {
        let node = TreeNode::new(key, record);
        let idx = match self.free.pop() {
            Some(idx) => {
                self.arena[idx as usize] = node;
                idx
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        };
        self.root = forest::insert(&mut self.arena, self.root, idx, key_of);
        self.root = forest::splay(&mut self.arena, self.root, idx);
        self.len += 1;
        idx
    }

    /// Unlink `node`, splay its former parent, and return the record it held.
    pub fn remove(&mut self, node: u32) -> RecordId {
        let removed = forest::remove(&mut self.arena, self.root, node);
        self.root = removed.root;
        if let Some(parent) = removed.parent {
            self.root = forest::splay(&mut self.arena, self.root, parent);
        }
        self.free.push(node);
        self.len -= 1;
        self.arena[node as usize].record
    }

    /// Find a record filed under `key`.
    ///
    /// Splays the matching node, or on a miss the last node visited, so this
    /// takes `&mut self` even though no record changes.
    pub fn lookup(&mut self, key: &Value) -> Option<RecordId> {
        match forest::search(&self.arena, self.root, key, key_of) {
            Search::Found(idx) => {
                self.root = forest::splay(&mut self.arena, self.root, idx);
                Some(self.arena[idx as usize].record)
            }
            Search::Miss(Some(last)) => {
                self.root = forest::splay(&mut self.arena, self.root, last);
                None
            }
            Search::Miss(None) => None,
        }
    }

    pub fn contains_key(&mut self, key: &Value) -> bool {
        self.lookup(key).is_some()
    }

    /// Record with the greatest key not above `key`. Does not splay.
    pub fn floor(&self, key: &Value) -> Option<RecordId> {
        forest::find_or_next_lower(&self.arena, self.root, key, key_of).map(|i| self.record(i))
    }

    pub fn first(&self) -> Option<RecordId> {
        forest::first(&self.arena, self.root).map(|i| self.record(i))
    }

    pub fn last(&self) -> Option<RecordId> {
        forest::last(&self.arena, self.root).map(|i| self.record(i))
    }

    pub fn record(&self, node: u32) -> RecordId {
        self.arena[node as usize].record
    }

    /// Record after `node` in key order. Does not splay.
    pub fn next(&self, node: u32) -> Option<RecordId> {
        forest::next(&self.arena, node).map(|i| self.record(i))
    }

    /// Record before `node` in key order. Does not splay.
    pub fn prev(&self, node: u32) -> Option<RecordId> {
        forest::prev(&self.arena, node).map(|i| self.record(i))
    }

    /// `(key, record)` pairs in key order, ties in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            arena: &self.arena,
            walk: InOrder::new(&self.arena, self.root),
        }
    }

    /// Tree shape, one node per line, for debugging.
    pub fn dump(&self) -> String {
        dump(&self.arena, self.root, &|i, n: &TreeNode| {
            format!("{} {} (node {i})", n.key, n.record)
        })
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<u32> {
        self.root
    }

    pub(crate) fn validate(
        &self,
        name: &str,
        pos: usize,
        records: &RecordArena<R>,
    ) -> Result<(), ValidationError> {
        forest::validate(&self.arena, self.root, self.len, key_of).map_err(|source| {
            ValidationError::Tree {
                index: name.to_string(),
                source,
            }
        })?;
        for node in InOrder::new(&self.arena, self.root) {
            let id = self.record(node);
            let Some(record) = records.get(id) else {
                return Err(ValidationError::DeadRecord {
                    index: name.to_string(),
                    record: id,
                });
            };
            if record.cursor(pos) != Cursor::Ordered(node) {
                return Err(ValidationError::CursorMismatch {
                    index: name.to_string(),
                    record: id,
                });
            }
        }
        Ok(())
    }
}

/// In-order iterator over an [`OrderedIndex`].
#[derive(Debug)]
pub struct Iter<'a> {
    arena: &'a [TreeNode],
    walk: InOrder<'a, TreeNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Value, RecordId);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena[self.walk.next()? as usize];
        Some((&node.key, node.record))
    }
}

impl std::iter::FusedIterator for Iter<'_> {}
