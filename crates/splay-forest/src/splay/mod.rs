//! Splay-step rotations.
//!
//! A call to [`splay`] performs exactly one splay step for the given node:
//! a single rotation when the node's parent is the root, otherwise one of the
//! four double rotations chosen by the shape of the node / parent /
//! grandparent path. Every child assignment goes through
//! [`set_left`](crate::util::set_left) / [`set_right`](crate::util::set_right),
//! which keep the child's parent link in step.

use crate::types::Node;
use crate::util::{get_l, get_p, get_r, is_left_child, replace_child, set_left, set_right};

// ── single-level rotations ────────────────────────────────────────────────

/// Zig: promote `n` over the root `m` (n was left child of m).
///
/// ```text
///     m          n
///    / \        / \
///   n   c  →   a   m
///  / \            / \
/// a   b          b   c
/// ```
pub fn zig<N: Node>(arena: &mut [N], n: u32, m: u32) {
    let top = get_p(arena, m);
    replace_child(arena, top, m, Some(n));
    set_left(arena, m, get_r(arena, n));
    set_right(arena, n, Some(m));
}

/// Zag: promote `n` over the root `m` (n was right child of m).
pub fn zag<N: Node>(arena: &mut [N], n: u32, m: u32) {
    let top = get_p(arena, m);
    replace_child(arena, top, m, Some(n));
    set_right(arena, m, get_l(arena, n));
    set_left(arena, n, Some(m));
}

// ── double-level rotations ────────────────────────────────────────────────

/// Zig-zig: `n` is the left child of `m`, `m` is the left child of `g`.
///
/// ```text
///       g        n
///      / \      / \
///     m   d    a   m
///    / \    →     / \
///   n   c        b   g
///  / \              / \
/// a   b            c   d
/// ```
pub fn zig_zig<N: Node>(arena: &mut [N], n: u32, m: u32, g: u32) {
    let top = get_p(arena, g);
    replace_child(arena, top, g, Some(n));
    set_left(arena, g, get_r(arena, m));
    set_right(arena, m, Some(g));
    set_left(arena, m, get_r(arena, n));
    set_right(arena, n, Some(m));
}

/// Zag-zag: `n` is the right child of `m`, `m` is the right child of `g`.
pub fn zag_zag<N: Node>(arena: &mut [N], n: u32, m: u32, g: u32) {
    let top = get_p(arena, g);
    replace_child(arena, top, g, Some(n));
    set_right(arena, g, get_l(arena, m));
    set_left(arena, m, Some(g));
    set_right(arena, m, get_l(arena, n));
    set_left(arena, n, Some(m));
}

/// Zig-zag: `n` is the right child of `m`, `m` is the left child of `g`.
///
/// ```text
///     g           n
///    / \        /   \
///   m   d      m     g
///  / \    →   / \   / \
/// a   n      a   b c   d
///    / \
///   b   c
/// ```
pub fn zig_zag<N: Node>(arena: &mut [N], n: u32, m: u32, g: u32) {
    let top = get_p(arena, g);
    replace_child(arena, top, g, Some(n));
    set_right(arena, m, get_l(arena, n));
    set_left(arena, g, get_r(arena, n));
    set_left(arena, n, Some(m));
    set_right(arena, n, Some(g));
}

/// Zag-zig: `n` is the left child of `m`, `m` is the right child of `g`.
pub fn zag_zig<N: Node>(arena: &mut [N], n: u32, m: u32, g: u32) {
    let top = get_p(arena, g);
    replace_child(arena, top, g, Some(n));
    set_left(arena, m, get_r(arena, n));
    set_right(arena, g, get_l(arena, n));
    set_left(arena, n, Some(g));
    set_right(arena, n, Some(m));
}

// ── top-level splay ───────────────────────────────────────────────────────

/// Perform one splay step on `node` and return the (possibly new) root.
///
/// The node moves up one level when its parent is the root and two levels
/// otherwise. Calling this on the root is a no-op.
///
/// # Panics
///
/// Panics if a parent link names a node that does not list `node` (or its
/// parent) as a child: the tree is broken.
pub fn splay<N: Node>(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32> {
    let Some(m) = get_p(arena, node) else {
        return root;
    };
    let left = is_left_child(arena, m, node);
    match get_p(arena, m) {
        None => {
            if left {
                zig(arena, node, m);
            } else {
                zag(arena, node, m);
            }
        }
        Some(g) => match (is_left_child(arena, g, m), left) {
            (true, true) => zig_zig(arena, node, m, g),
            (false, false) => zag_zag(arena, node, m, g),
            (true, false) => zig_zag(arena, node, m, g),
            (false, true) => zag_zig(arena, node, m, g),
        },
    }
    if get_p(arena, node).is_none() {
        Some(node)
    } else {
        root
    }
}
