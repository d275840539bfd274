//! Matcher: Predicates over whole nodes
//!
//! A [`Matcher`] decides whether a node qualifies for a [`Binding`](crate::Binding).
//! [`FieldMatcher`] is the discriminator matcher: it pulls one field out of the
//! node as [`MatchingData`] and hands it to an [`InputMatcher`].

use crate::{ExactMatcher, InputMatcher, MatchingData, Node};
use std::fmt::Debug;

/// Predicate over a node.
///
/// Implementations must be pure: the same node always gives the same answer,
/// and nothing is mutated.
///
/// # Example
///
/// ```
/// use kindred::{FieldMatcher, Matcher};
/// use serde_json::json;
///
/// let matcher = FieldMatcher::exact("kind", "circle");
/// let node = json!({"kind": "circle", "radius": 1.0});
/// assert!(matcher.matches(node.as_object().unwrap()));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Matcher`",
    label = "this type cannot decide whether a node matches",
    note = "use FieldMatcher::exact(field, value) or implement `matches(&self, &Node) -> bool`"
)]
pub trait Matcher: Send + Sync + Debug {
    /// Returns `true` if `node` qualifies.
    fn matches(&self, node: &Node) -> bool;

    /// Name of the discriminator field this matcher reads, if it reads one.
    fn discriminator(&self) -> Option<&str> {
        None
    }
}

#[diagnostic::do_not_recommend]
impl Matcher for Box<dyn Matcher> {
    fn matches(&self, node: &Node) -> bool {
        (**self).matches(node)
    }

    fn discriminator(&self) -> Option<&str> {
        (**self).discriminator()
    }
}

/// Exact-field matcher: a named field compared by an [`InputMatcher`].
///
/// # INV: absent → false
///
/// If the field is missing from the node the matcher returns `false` without
/// consulting the inner matcher.
pub struct FieldMatcher {
    field: String,
    matcher: Box<dyn InputMatcher>,
}

impl FieldMatcher {
    /// Create a field matcher from a field name and a value matcher.
    #[must_use]
    pub fn new(field: impl Into<String>, matcher: Box<dyn InputMatcher>) -> Self {
        Self {
            field: field.into(),
            matcher,
        }
    }

    /// Match when `field` is a string equal to `value`.
    #[must_use]
    pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Box::new(ExactMatcher::new(value)))
    }

    /// The discriminator field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The value matcher.
    #[must_use]
    pub fn input_matcher(&self) -> &dyn InputMatcher {
        &*self.matcher
    }
}

impl Matcher for FieldMatcher {
    fn matches(&self, node: &Node) -> bool {
        match MatchingData::field(node, &self.field) {
            MatchingData::None => false,
            data => self.matcher.matches(&data),
        }
    }

    fn discriminator(&self) -> Option<&str> {
        Some(&self.field)
    }
}

impl Debug for FieldMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldMatcher")
            .field("field", &self.field)
            .field("matcher", &self.matcher)
            .finish()
    }
}
