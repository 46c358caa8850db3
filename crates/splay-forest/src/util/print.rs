//! Tree dumps for debugging.

use super::{get_l, get_r};
use crate::types::Node;

/// Dump the tree under `root`, one node per line, left branch first.
///
/// Each child line starts with `├─` or, for the last child present, `└─`,
/// followed by `←` or `→` for the side it hangs on.
pub fn dump<N, F>(arena: &[N], root: Option<u32>, label: &F) -> String
where
    N: Node,
    F: Fn(u32, &N) -> String,
{
    match root {
        Some(root) => dump_node(arena, root, "", label),
        None => "∅".to_string(),
    }
}

fn dump_node<N, F>(arena: &[N], idx: u32, tab: &str, label: &F) -> String
where
    N: Node,
    F: Fn(u32, &N) -> String,
{
    let mut out = label(idx, &arena[idx as usize]);
    let children = [(get_l(arena, idx), '←'), (get_r(arena, idx), '→')];
    let last = children.iter().rposition(|(child, _)| child.is_some());

    for (i, (child, arrow)) in children.into_iter().enumerate() {
        let Some(child) = child else {
            continue;
        };
        let (branch, indent) = if Some(i) == last {
            ("└─", "   ")
        } else {
            ("├─", "│  ")
        };
        let below = dump_node(arena, child, &format!("{tab}{indent}"), label);
        out.push_str(&format!("\n{tab}{branch} {arrow} {below}"));
    }

    out
}
