use thiserror::Error;

use crate::id::RecordId;
use crate::index::IndexKind;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MultixError {
    #[error("index {index:?} already holds key {key}")]
    DuplicateKey { index: String, key: Value },
    #[error("index {index:?} found no key on the record")]
    MissingKey { index: String },
    #[error("unknown index {0:?}")]
    UnknownIndex(String),
    #[error("index {index:?} is {found}, not {expected}")]
    IndexKindMismatch {
        index: String,
        expected: IndexKind,
        found: IndexKind,
    },
    #[error("index {0:?} has no record order to navigate")]
    NoNavigation(String),
    #[error("index {0:?} is registered twice")]
    DuplicateIndex(String),
}

impl MultixError {
    /// Whether this is an admission rejection from `insert`.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            MultixError::DuplicateKey { .. } | MultixError::MissingKey { .. }
        )
    }
}

/// A rejected insertion: the reason, and the record handed back untouched.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Rejected<R> {
    pub error: MultixError,
    pub record: R,
}

impl<R> Rejected<R> {
    pub fn into_record(self) -> R {
        self.record
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("unknown attribute {0:?}")]
    Unknown(String),
    #[error("attribute {name:?} expects {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("attribute {0:?} is read-only")]
    ReadOnly(String),
}

/// Container inconsistency found by [`Multix::validate`](crate::Multix::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("index {index:?} holds {found} records, container holds {expected}")]
    LengthMismatch {
        index: String,
        expected: usize,
        found: usize,
    },
    #[error("index {index:?} lists record {record} which is not live")]
    DeadRecord { index: String, record: RecordId },
    #[error("record {record} has no cursor into index {index:?}")]
    Detached { index: String, record: RecordId },
    #[error("cursor of record {record} in index {index:?} points at another record")]
    CursorMismatch { index: String, record: RecordId },
    #[error("index {index:?}: {source}")]
    Tree {
        index: String,
        #[source]
        source: splay_forest::ValidationError,
    },
    #[error("index {index:?}: {detail}")]
    List { index: String, detail: &'static str },
}
