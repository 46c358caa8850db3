//! Stack-free in-order traversal.
//!
//! The walker keeps only the node it will yield next. Advancing from a node
//! follows a small direction state machine over child and parent links, so
//! the walk needs neither recursion nor an auxiliary stack.

use super::{first, get_l, get_p, get_r};
use crate::types::Node;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Walk {
    DescendRight,
    DescendLeft,
    Ascend,
}

/// In-order iterator over node indices.
///
/// Yields every node reachable from the root it was created with, in
/// non-decreasing key order. It borrows the arena, so the tree cannot be
/// restructured mid-walk; restart by creating a new walker from the current
/// root.
#[derive(Clone, Debug)]
pub struct InOrder<'a, N> {
    arena: &'a [N],
    curr: Option<u32>,
}

impl<'a, N: Node> InOrder<'a, N> {
    pub fn new(arena: &'a [N], root: Option<u32>) -> Self {
        Self {
            arena,
            curr: first(arena, root),
        }
    }

    /// Node that follows `n` in order.
    ///
    /// # Panics
    ///
    /// Panics when ascending reaches a parent that does not list the child
    /// it came from.
    fn advance(&self, mut n: u32) -> Option<u32> {
        let arena = self.arena;
        let mut walk = Walk::DescendRight;
        loop {
            match walk {
                Walk::DescendRight => match get_r(arena, n) {
                    Some(r) => {
                        n = r;
                        walk = Walk::DescendLeft;
                    }
                    None => walk = Walk::Ascend,
                },
                Walk::DescendLeft => match get_l(arena, n) {
                    Some(l) => n = l,
                    None => return Some(n),
                },
                Walk::Ascend => {
                    let child = n;
                    n = get_p(arena, child)?;
                    if get_l(arena, n) == Some(child) {
                        return Some(n);
                    }
                    if get_r(arena, n) != Some(child) {
                        panic!("broken tree: node {child} is not a child of {n}");
                    }
                }
            }
        }
    }
}

impl<N: Node> Iterator for InOrder<'_, N> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let node = self.curr?;
        self.curr = self.advance(node);
        Some(node)
    }
}

impl<N: Node> std::iter::FusedIterator for InOrder<'_, N> {}
