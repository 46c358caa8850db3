//! In-memory multi-index record container.
//!
//! A [`Multix`] stores each record once and keeps it filed in several
//! indexes at the same time:
//!
//! - **sequenced**: insertion order, walkable from either end;
//! - **hashed**: unique keys with expected O(1) lookup;
//! - **ordered**: a splay tree over keys that may repeat.
//!
//! Insertion is all-or-nothing across indexes, removal drops a record from
//! every index at once, and a record found through one index can be navigated
//! in any other through its [`RecordId`].
//!
//! ```
//! use multix::{Multix, Value};
//!
//! #[derive(Debug)]
//! struct Presen {
//!     title: String,
//!     speaker: String,
//!     hour: u32,
//! }
//!
//! let mut table = Multix::builder()
//!     .sequenced("seq")
//!     .hashed("title", multix::KeySelector::new(|p: &Presen| p.title.clone()))
//!     .ordered("hour", multix::KeySelector::new(|p: &Presen| p.hour))
//!     .build()
//!     .unwrap();
//!
//! let late = table
//!     .insert(Presen { title: "splay".into(), speaker: "k".into(), hour: 15 })
//!     .unwrap();
//! table
//!     .insert(Presen { title: "intro".into(), speaker: "m".into(), hour: 13 })
//!     .unwrap();
//!
//! assert_eq!(table.sequenced("seq").unwrap().first().unwrap().id(), late);
//! assert_eq!(table.ordered("hour").unwrap().first().unwrap().title, "intro");
//! assert_eq!(table.predecessor(late, "hour").unwrap().map(|id| table.get(id).unwrap().hour), Some(13));
//! assert!(table.hashed("title").unwrap().contains_key(&Value::from("splay")));
//! ```

mod attributes;
mod cursor;
mod entry;
mod error;
mod id;
mod index;
mod multix;
mod record;
mod value;
mod view;

pub use attributes::Attributes;
pub use cursor::Cursor;
pub use entry::Entry;
pub use error::{AttributeError, MultixError, Rejected, ValidationError};
pub use id::RecordId;
pub use index::{IndexKind, IndexSpec, KeySelector};
pub use multix::{Multix, MultixBuilder};
pub use record::IndexedRecord;
pub use value::Value;
pub use view::{
    HashedIter, HashedView, Iter, OrderedIter, OrderedView, SequencedIter, SequencedView, View,
};
