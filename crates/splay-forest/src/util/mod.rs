//! Tree utility functions: link helpers, navigation, keyed insert, search and
//! removal.
//!
//! Key-based helpers accept a `key_of` accessor closure so callers can keep
//! whatever node layout suits their arena.

pub mod print;
pub mod validate;
pub mod walk;

use std::cmp::Ordering;

use crate::types::Node;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

/// Set the left child of `idx`, pointing the child's parent link back.
#[inline]
pub fn set_left<N: Node>(arena: &mut [N], idx: u32, child: Option<u32>) {
    arena[idx as usize].set_l(child);
    if let Some(c) = child {
        set_p(arena, c, Some(idx));
    }
}

/// Set the right child of `idx`, pointing the child's parent link back.
#[inline]
pub fn set_right<N: Node>(arena: &mut [N], idx: u32, child: Option<u32>) {
    arena[idx as usize].set_r(child);
    if let Some(c) = child {
        set_p(arena, c, Some(idx));
    }
}

/// Whether `child` hangs off the left of `parent`.
///
/// # Panics
///
/// Panics if `child` is neither child of `parent`.
pub(crate) fn is_left_child<N: Node>(arena: &[N], parent: u32, child: u32) -> bool {
    if get_l(arena, parent) == Some(child) {
        true
    } else if get_r(arena, parent) == Some(child) {
        false
    } else {
        panic!("broken tree: node {child} is not a child of {parent}");
    }
}

/// Put `new` into the slot `old` occupies under `parent`, and point `new`'s
/// parent link at `parent`. With no parent, `new` simply becomes parentless.
///
/// # Panics
///
/// Panics if `parent` does not list `old` as a child.
pub fn replace_child<N: Node>(arena: &mut [N], parent: Option<u32>, old: u32, new: Option<u32>) {
    if let Some(n) = new {
        set_p(arena, n, parent);
    }
    if let Some(p) = parent {
        if is_left_child(arena, p, old) {
            arena[p as usize].set_l(new);
        } else {
            arena[p as usize].set_r(new);
        }
    }
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    walk::InOrder::new(arena, root).count()
}

/// Outcome of [`search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Search {
    /// A node with an equal key.
    Found(u32),
    /// No equal key; carries the last node visited, if the tree is not empty.
    Miss(Option<u32>),
}

/// Descend from `root` looking for `key`: left on less, right on greater.
///
/// Does not restructure the tree; callers that want splay-on-access splay
/// whichever node the result names.
pub fn search<N, K, F>(arena: &[N], root: Option<u32>, key: &K, key_of: F) -> Search
where
    N: Node,
    K: Ord + ?Sized,
    F: Fn(&N) -> &K,
{
    let Some(mut curr) = root else {
        return Search::Miss(None);
    };
    loop {
        let next = match key.cmp(key_of(&arena[curr as usize])) {
            Ordering::Equal => return Search::Found(curr),
            Ordering::Less => get_l(arena, curr),
            Ordering::Greater => get_r(arena, curr),
        };
        match next {
            Some(n) => curr = n,
            None => return Search::Miss(Some(curr)),
        }
    }
}

/// Finds node by key, or the next lower node if the exact key does not exist.
pub fn find_or_next_lower<N, K, F>(arena: &[N], root: Option<u32>, key: &K, key_of: F) -> Option<u32>
where
    N: Node,
    K: Ord + ?Sized,
    F: Fn(&N) -> &K,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        match key_of(&arena[i as usize]).cmp(key) {
            Ordering::Equal => return Some(i),
            Ordering::Greater => curr = get_l(arena, i),
            Ordering::Less => {
                result = Some(i);
                curr = get_r(arena, i);
            }
        }
    }
    result
}

/// Attach the detached `node` as a new leaf and return the root.
///
/// Descends left while the new key is less than the node key and right
/// otherwise, so equal keys land after every existing tie in in-order
/// sequence. The tree is not splayed.
pub fn insert<N, K, F>(arena: &mut [N], root: Option<u32>, node: u32, key_of: F) -> Option<u32>
where
    N: Node,
    K: Ord + ?Sized,
    F: Fn(&N) -> &K,
{
    let Some(mut curr) = root else {
        set_p(arena, node, None);
        return Some(node);
    };

    loop {
        let less = key_of(&arena[node as usize]) < key_of(&arena[curr as usize]);
        let next = if less {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };

        match next {
            Some(nxt) => curr = nxt,
            None => {
                if less {
                    set_left(arena, curr, Some(node));
                } else {
                    set_right(arena, curr, Some(node));
                }
                return root;
            }
        }
    }
}

/// Outcome of [`remove`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removed {
    /// Root after the removal.
    pub root: Option<u32>,
    /// Former parent of the removed node: the structural parent of whatever
    /// took its place, and the node to splay to rebalance around the
    /// deletion site. `None` when the removed node was the root.
    pub parent: Option<u32>,
}

/// Unlink `node` from the tree rooted at `root`.
///
/// With a left subtree, that subtree's maximum takes the node's place,
/// adopting both of the node's children; otherwise the right child takes the
/// node's place. The removed node ends up with no links.
pub fn remove<N: Node>(arena: &mut [N], root: Option<u32>, node: u32) -> Removed {
    let parent = get_p(arena, node);
    let left = get_l(arena, node);
    let right = get_r(arena, node);

    let replacement = match left {
        Some(l) => {
            let mut max = l;
            let mut max_parent = node;
            while let Some(r) = get_r(arena, max) {
                max_parent = max;
                max = r;
            }
            if max != l {
                set_right(arena, max_parent, get_l(arena, max));
                set_left(arena, max, Some(l));
            }
            set_right(arena, max, right);
            Some(max)
        }
        None => right,
    };

    replace_child(arena, parent, node, replacement);
    set_p(arena, node, None);
    arena[node as usize].set_l(None);
    arena[node as usize].set_r(None);

    Removed {
        root: if parent.is_none() { replacement } else { root },
        parent,
    }
}
