//! Arena-based splay-tree primitives.
//!
//! Nodes live in a caller-owned slice and address each other by `u32`
//! index. Every node carries a parent link next to its two child links, so
//! the tree can be walked in order, navigated from any node, and restructured
//! without recursion or an auxiliary stack.
//!
//! The crate does not own nodes or keys. Callers keep the arena (usually a
//! `Vec<N>`) and the current root, and pass both into every function; the
//! functions that may change the root return the new one.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] link trait |
//! | [`splay`] | single splay step: zig, zag, zig-zig, zag-zag, zig-zag, zag-zig |
//! | [`util`] | first / last / next / prev, keyed insert, search, removal, in-order walk, validation, printing |

pub mod splay;
pub mod types;
pub mod util;

pub use splay::splay;
pub use types::Node;
pub use util::validate::{validate, ValidationError};
pub use util::walk::InOrder;
pub use util::{
    find_or_next_lower, first, insert, last, next, prev, remove, search, size, Removed, Search,
};
