//! `MatchingData`: Type-erased view of one field value of a node
//!
//! A [`Matcher`](crate::Matcher) extracts a field from a [`Node`] as
//! `MatchingData`, and an [`InputMatcher`](crate::InputMatcher) decides whether
//! that data matches. This keeps value matchers independent of where the value
//! came from.

use crate::Node;
use serde_json::{Number, Value};

/// Borrowed, type-erased field value.
///
/// # Variants
///
/// - `None`: The field is absent from the node
/// - `Null`, `Bool`, `Number`, `String`, `Array`, `Object`: The JSON value
///
/// `None` and `Null` are distinct: `{"kind": null}` carries the field,
/// `{}` does not. Both fail every string match.
///
/// # Example
///
/// ```
/// use kindred::MatchingData;
/// use serde_json::json;
///
/// let node = json!({"kind": "circle", "sides": 0});
/// let node = node.as_object().unwrap();
///
/// assert_eq!(MatchingData::field(node, "kind").as_str(), Some("circle"));
/// assert_eq!(MatchingData::field(node, "sides").as_str(), None);
/// assert!(MatchingData::field(node, "color").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchingData<'a> {
    /// The field is absent.
    None,

    /// JSON `null`.
    Null,

    /// JSON boolean.
    Bool(bool),

    /// JSON number.
    Number(&'a Number),

    /// JSON string.
    String(&'a str),

    /// JSON array.
    Array(&'a [Value]),

    /// JSON object.
    Object(&'a Node),
}

impl<'a> MatchingData<'a> {
    /// Extract `field` from `node`, or [`MatchingData::None`] if it is absent.
    #[must_use]
    pub fn field(node: &'a Node, field: &str) -> Self {
        node.get(field).map_or(Self::None, Self::from)
    }

    /// Returns the string value, if this is a JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::String(s) => Some(*s),
            _ => None,
        }
    }

    /// Returns `true` if the field was absent.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns a static name for the data kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl<'a> From<&'a Value> for MatchingData<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items),
            Value::Object(map) => Self::Object(map),
        }
    }
}
