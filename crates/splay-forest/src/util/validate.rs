//! Structural checks used by tests and debug assertions.

use thiserror::Error;

use super::{get_l, get_p, get_r};
use crate::types::Node;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("root {0} has a parent link")]
    RootHasParent(u32),
    #[error("node {child} does not link back to parent {parent}")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("node {0} is out of key order")]
    OutOfOrder(u32),
    #[error("tree holds {found} nodes, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("tree walk does not terminate")]
    Cycle,
}

/// Check parent/child link symmetry, in-order key order and node count.
///
/// Walks the tree by hand rather than through [`InOrder`](super::walk::InOrder)
/// so that a broken parent link is reported instead of panicking.
pub fn validate<N, K, F>(
    arena: &[N],
    root: Option<u32>,
    expected: usize,
    key_of: F,
) -> Result<(), ValidationError>
where
    N: Node,
    K: Ord + ?Sized,
    F: Fn(&N) -> &K,
{
    let Some(root) = root else {
        return match expected {
            0 => Ok(()),
            _ => Err(ValidationError::SizeMismatch { expected, found: 0 }),
        };
    };
    if get_p(arena, root).is_some() {
        return Err(ValidationError::RootHasParent(root));
    }

    let mut found = 0usize;
    let mut prev: Option<u32> = None;
    let mut curr = Some(root);
    let mut from_child: Option<u32> = None;
    let mut steps = 0usize;
    // Manual in-order walk: (node, child we came up from) drives the direction.
    while let Some(n) = curr {
        steps += 1;
        if steps > 3 * arena.len() + 3 {
            return Err(ValidationError::Cycle);
        }
        let l = get_l(arena, n);
        let r = get_r(arena, n);
        for child in [l, r].into_iter().flatten() {
            if get_p(arena, child) != Some(n) {
                return Err(ValidationError::BrokenParentLink { parent: n, child });
            }
        }

        let came_from_left = from_child.is_some() && from_child == l;
        let came_from_right = from_child.is_some() && from_child == r;
        if let Some(child) = from_child {
            if !came_from_left && !came_from_right {
                return Err(ValidationError::BrokenParentLink { parent: n, child });
            }
        }

        if from_child.is_none() {
            if let Some(l) = l {
                curr = Some(l);
                continue;
            }
        }
        if !came_from_right {
            if from_child.is_none() || came_from_left {
                if let Some(p) = prev {
                    if key_of(&arena[n as usize]) < key_of(&arena[p as usize]) {
                        return Err(ValidationError::OutOfOrder(n));
                    }
                }
                prev = Some(n);
                found += 1;
            }
            if let Some(r) = r {
                from_child = None;
                curr = Some(r);
                continue;
            }
        }
        from_child = Some(n);
        curr = get_p(arena, n);
    }

    if found != expected {
        return Err(ValidationError::SizeMismatch { expected, found });
    }
    Ok(())
}
