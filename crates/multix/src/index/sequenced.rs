//! Insertion-order index: a doubly linked list over an arena of link nodes.

use crate::cursor::Cursor;
use crate::error::ValidationError;
use crate::id::RecordId;
use crate::record::RecordArena;

#[derive(Clone, Debug)]
struct ListNode {
    prev: Option<u32>,
    next: Option<u32>,
    record: RecordId,
}

#[derive(Debug, Default)]
pub struct SequencedIndex {
    nodes: Vec<ListNode>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
}

impl SequencedIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `record` at the tail and return its node.
    pub fn push_back(&mut self, record: RecordId) -> u32 {
        let node = ListNode {
            prev: self.tail,
            next: None,
            record,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx as usize] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as u32
            }
        };

        match self.tail {
            Some(tail) => self.nodes[tail as usize].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
        idx
    }

    /// Splice `node` out of the list and return the record it held.
    pub fn unlink(&mut self, node: u32) -> RecordId {
        let ListNode { prev, next, record } = self.nodes[node as usize].clone();

        match prev {
            Some(p) => self.nodes[p as usize].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n as usize].prev = prev,
            None => self.tail = prev,
        }

        let slot = &mut self.nodes[node as usize];
        slot.prev = None;
        slot.next = None;
        self.free.push(node);
        self.len -= 1;
        record
    }

    pub fn record(&self, node: u32) -> RecordId {
        self.nodes[node as usize].record
    }

    /// Record after `node`, if any.
    pub fn next(&self, node: u32) -> Option<RecordId> {
        self.nodes[node as usize].next.map(|n| self.record(n))
    }

    /// Record before `node`, if any.
    pub fn prev(&self, node: u32) -> Option<RecordId> {
        self.nodes[node as usize].prev.map(|p| self.record(p))
    }

    pub fn first(&self) -> Option<RecordId> {
        self.head.map(|h| self.record(h))
    }

    pub fn last(&self) -> Option<RecordId> {
        self.tail.map(|t| self.record(t))
    }

    /// Record ids from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            index: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    pub(crate) fn validate<R>(
        &self,
        name: &str,
        pos: usize,
        records: &RecordArena<R>,
    ) -> Result<(), ValidationError> {
        let broken = |detail| ValidationError::List {
            index: name.to_string(),
            detail,
        };

        let mut count = 0usize;
        let mut prev: Option<u32> = None;
        let mut curr = self.head;
        while let Some(node) = curr {
            count += 1;
            if count > self.len {
                return Err(broken("forward walk is longer than the list"));
            }
            let entry = &self.nodes[node as usize];
            if entry.prev != prev {
                return Err(broken("prev link does not match forward walk"));
            }
            let Some(record) = records.get(entry.record) else {
                return Err(ValidationError::DeadRecord {
                    index: name.to_string(),
                    record: entry.record,
                });
            };
            if record.cursor(pos) != Cursor::Sequenced(node) {
                return Err(ValidationError::CursorMismatch {
                    index: name.to_string(),
                    record: entry.record,
                });
            }
            prev = curr;
            curr = entry.next;
        }
        if prev != self.tail {
            return Err(broken("forward walk does not end at the tail"));
        }
        if count != self.len {
            return Err(broken("forward walk is shorter than the list"));
        }
        Ok(())
    }
}

/// Head-to-tail iterator over a [`SequencedIndex`]; also walks tail to head.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    index: &'a SequencedIndex,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = RecordId;

    fn next(&mut self) -> Option<RecordId> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.front = self.index.nodes[node as usize].next;
        self.remaining -= 1;
        Some(self.index.record(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<RecordId> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.back = self.index.nodes[node as usize].prev;
        self.remaining -= 1;
        Some(self.index.record(node))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(slot: u32) -> RecordId {
        RecordId::new(slot, 0)
    }

    fn ids(index: &SequencedIndex) -> Vec<u32> {
        index.iter().map(|r| r.slot).collect()
    }

    #[test]
    fn unlink_endpoints_and_middle() {
        let mut list = SequencedIndex::default();
        let a = list.push_back(id(0));
        let b = list.push_back(id(1));
        let c = list.push_back(id(2));
        let d = list.push_back(id(3));

        assert_eq!(list.unlink(b), id(1));
        assert_eq!(ids(&list), vec![0, 2, 3]);

        assert_eq!(list.unlink(a), id(0));
        assert_eq!(list.first(), Some(id(2)));
        assert_eq!(list.prev(c), None);

        assert_eq!(list.unlink(d), id(3));
        assert_eq!(list.last(), Some(id(2)));
        assert_eq!(list.next(c), None);

        assert_eq!(list.unlink(c), id(2));
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
    }

    #[test]
    fn freed_nodes_are_reused() {
        let mut list = SequencedIndex::default();
        let a = list.push_back(id(0));
        list.push_back(id(1));
        list.unlink(a);
        let c = list.push_back(id(2));
        assert_eq!(c, a);
        assert_eq!(ids(&list), vec![1, 2]);
        assert_eq!(list.iter().rev().map(|r| r.slot).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let mut list = SequencedIndex::default();
        for i in 0..4 {
            list.push_back(id(i));
        }
        let mut it = list.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(id(0)));
        assert_eq!(it.next_back(), Some(id(3)));
        assert_eq!(it.next(), Some(id(1)));
        assert_eq!(it.next_back(), Some(id(2)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }
}
