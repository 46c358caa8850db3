//! Named attribute access on records.

use crate::error::AttributeError;
use crate::value::Value;

/// Read and write access to a record's attributes by name.
///
/// Implement this for a record type to let indexes select keys by attribute
/// name ([`KeySelector::attribute`](crate::KeySelector::attribute)).
/// [`IndexedRecord`](crate::IndexedRecord) forwards it to the wrapped record.
///
/// ```
/// use multix::{AttributeError, Attributes, Value};
///
/// struct Talk {
///     speaker: String,
///     title: String,
/// }
///
/// impl Attributes for Talk {
///     fn attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "speaker" => Some(self.speaker.as_str().into()),
///             "title" => Some(self.title.as_str().into()),
///             _ => None,
///         }
///     }
///
///     fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
///         let slot = match name {
///             "speaker" => &mut self.speaker,
///             "title" => &mut self.title,
///             _ => return Err(AttributeError::Unknown(name.to_string())),
///         };
///         match value {
///             Value::Str(s) => {
///                 *slot = s;
///                 Ok(())
///             }
///             other => Err(AttributeError::TypeMismatch {
///                 name: name.to_string(),
///                 expected: "str",
///                 found: other.type_name(),
///             }),
///         }
///     }
/// }
///
/// let mut talk = Talk { speaker: "kinaba".into(), title: "intro".into() };
/// talk.set_attribute("title", "Boost.MultiIndex".into()).unwrap();
/// assert_eq!(talk.attribute("title"), Some(Value::from("Boost.MultiIndex")));
/// ```
pub trait Attributes {
    /// Current value of attribute `name`, or `None` if the record has no
    /// such attribute.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Overwrite attribute `name`.
    ///
    /// Changing an attribute that an index uses as its key while the record
    /// is in the container leaves that index out of order; remove the record,
    /// change it, and insert it again instead.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        let _ = value;
        Err(AttributeError::ReadOnly(name.to_string()))
    }
}
