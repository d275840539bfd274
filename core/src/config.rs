//! Config types for generic template construction.
//!
//! These types mirror the runtime template types but are serde-deserializable,
//! enabling config-driven templates via [`TypeRegistry::load_template()`].
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type |
//! |-------------|-------------|
//! | [`TemplateConfig`] | [`Template`](crate::Template) |
//! | [`RuleConfig`] | [`Binding`](crate::Binding) |
//! | [`MatchConfig`] | [`Matcher`](crate::Matcher) |
//! | [`ChildConfig`] | [`Child`](crate::Child) |
//!
//! # Example
//!
//! ```yaml
//! rules:
//!   - match: { type: exact, field: kind, value: drawing }
//!     type: example.Drawing
//!     children:
//!       - field: shape
//!         template:
//!           rules:
//!             - match: { type: exact, field: kind, value: circle }
//!               type: example.Circle
//! ```
//!
//! [`TypeRegistry::load_template()`]: crate::TypeRegistry::load_template

use crate::{FieldMatcher, Matcher};
use serde::Deserialize;

/// Configuration for a [`Template`](crate::Template).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateConfig {
    /// Rules to try in order (first-match-wins).
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// Configuration for a [`Binding`](crate::Binding).
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// The matcher that gates this rule.
    #[serde(rename = "match")]
    pub matcher: MatchConfig,

    /// Registered name of the target type.
    /// Must match a name registered in the [`TypeRegistry`](crate::TypeRegistry).
    #[serde(rename = "type")]
    pub type_name: String,

    /// Child fields decoded with their own templates, in declaration order.
    #[serde(default)]
    pub children: Vec<ChildConfig>,
}

/// Configuration for a [`Matcher`](crate::Matcher).
///
/// Uses `#[serde(tag = "type")]` for discriminated union deserialization:
///
/// ```json
/// { "type": "exact", "field": "kind", "value": "circle" }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum MatchConfig {
    /// Field present and equal to a string.
    #[serde(rename = "exact")]
    Exact {
        /// Discriminator field name.
        field: String,
        /// Expected string value.
        value: String,
    },
}

impl MatchConfig {
    /// Build the runtime matcher.
    #[must_use]
    pub fn build(&self) -> Box<dyn Matcher> {
        match self {
            Self::Exact { field, value } => Box::new(FieldMatcher::exact(field, value)),
        }
    }
}

/// Configuration for a child field of a rule.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildConfig {
    /// Field name in the matching node.
    pub field: String,

    /// Rule set for the field's value.
    pub template: TemplateConfig,
}
