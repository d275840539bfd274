//! `InputMatcher`: Domain-agnostic value matching
//!
//! The `InputMatcher` trait matches against type-erased [`MatchingData`].
//! It knows nothing about nodes or field names, so the same matcher can be
//! paired with any extraction.
//!
//! # Available Matchers
//!
//! - [`ExactMatcher`]: Exact string equality

use crate::MatchingData;
use std::fmt::Debug;

/// Matches against type-erased [`MatchingData`].
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so templates can be shared
/// across concurrent decode calls.
///
/// # Example
///
/// ```
/// use kindred::{ExactMatcher, InputMatcher, MatchingData};
///
/// let matcher = ExactMatcher::new("circle");
/// assert!(matcher.matches(&MatchingData::String("circle")));
/// assert!(!matcher.matches(&MatchingData::String("square")));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `InputMatcher`",
    label = "this type cannot match against MatchingData",
    note = "use the built-in ExactMatcher or implement `matches(&self, &MatchingData) -> bool`"
)]
pub trait InputMatcher: Send + Sync + Debug {
    /// Check if the given value matches.
    ///
    /// Returns `false` if the value kind is incompatible with this matcher.
    fn matches(&self, value: &MatchingData<'_>) -> bool;
}

#[diagnostic::do_not_recommend]
impl InputMatcher for Box<dyn InputMatcher> {
    fn matches(&self, value: &MatchingData<'_>) -> bool {
        (**self).matches(value)
    }
}

/// Exact string equality matcher.
///
/// Matches only JSON strings that equal the expected value byte-for-byte.
/// There is no coercion: the number `1` never matches `"1"`.
///
/// # Example
///
/// ```
/// use kindred::{ExactMatcher, InputMatcher, MatchingData};
///
/// let matcher = ExactMatcher::new("circle");
/// assert!(matcher.matches(&MatchingData::String("circle")));
/// assert!(!matcher.matches(&MatchingData::String("Circle"))); // case-sensitive
/// assert!(!matcher.matches(&MatchingData::Null));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactMatcher {
    expected: String,
}

impl ExactMatcher {
    /// Create a new exact matcher with the given expected value.
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Returns the expected value.
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl InputMatcher for ExactMatcher {
    fn matches(&self, value: &MatchingData<'_>) -> bool {
        value.as_str().is_some_and(|s| s == self.expected)
    }
}
