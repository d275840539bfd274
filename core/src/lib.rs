//! kindred - Discriminator-driven polymorphic JSON decoding
//!
//! Decodes a JSON object (or an array of objects) into strongly-typed values,
//! choosing the concrete type of every node from the value of a discriminator
//! field inside that node, recursively, down through named child fields.
//!
//! # Architecture
//!
//! - [`MatchingData`]: Borrowed, type-erased view of one field of a node
//! - [`InputMatcher`]: Domain-agnostic value matching ([`ExactMatcher`])
//! - [`Matcher`]: Predicate over a whole node ([`FieldMatcher`])
//! - [`Prototype`]: Type-erased factory for a [`Polymorphic`] target type
//! - [`Binding`]: Matcher + prototype + named child templates
//! - [`Template`]: Ordered bindings with first-match-wins semantics
//! - [`Decoder`]: Two-pass engine: resolve a [`Skeleton`], then populate it
//!   from the input bytes
//!
//! # Key Design Insights
//!
//! 1. **Unmatched is not an error**: a node no binding accepts is passed through
//!    as a generic [`serde_json::Value`].
//!
//! 2. **Two passes**: the resolve pass only decides *which type* each node becomes.
//!    The populate pass re-reads the input bytes with `serde`, driven by the
//!    skeleton, so every non-child field is filled by ordinary field matching.
//!
//! 3. **No reflection**: child assignment goes through an explicit setter table
//!    ([`Polymorphic::set_child`]), and child field names are checked against
//!    [`Polymorphic::CHILDREN`] when the template is built.
//!
//! # Example
//!
//! ```
//! use kindred::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(default)]
//! struct Circle { radius: f64 }
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(default)]
//! struct Drawing {
//!     title: String,
//!     #[serde(skip_deserializing)]
//!     shape: Decoded,
//! }
//!
//! impl Polymorphic for Circle {}
//!
//! impl Polymorphic for Drawing {
//!     const CHILDREN: &'static [&'static str] = &["shape"];
//!
//!     fn set_child(&mut self, field: &str, value: Decoded) -> Result<(), ChildError> {
//!         match field {
//!             "shape" => {
//!                 self.shape = value;
//!                 Ok(())
//!             }
//!             _ => Err(ChildError::unknown(field)),
//!         }
//!     }
//! }
//!
//! let mut template = Template::new();
//! let drawing = template.add_rule("kind", "drawing", Prototype::of::<Drawing>());
//! drawing
//!     .add_child("shape")
//!     .unwrap()
//!     .add_rule("kind", "circle", Prototype::of::<Circle>());
//!
//! let json = br#"{"kind":"drawing","title":"sun","shape":{"kind":"circle","radius":2.5}}"#;
//! let decoded = kindred::decode(json, &template).unwrap();
//!
//! let drawing = decoded.as_typed::<Drawing>().unwrap();
//! assert_eq!(drawing.title, "sun");
//! assert_eq!(drawing.shape.as_typed::<Circle>(), Some(&Circle { radius: 2.5 }));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod binding;
mod decoder;
mod error;
mod input_matcher;
mod instance;
mod matcher;
mod matching_data;
mod populate;
mod prototype;
mod skeleton;
mod template;
mod trace;

#[cfg(feature = "registry")]
mod config;
#[cfg(feature = "registry")]
mod registry;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use binding::{Binding, Child};
pub use decoder::{decode, Decoder};
pub use error::{ChildError, DecodeError, TemplateError};
pub use input_matcher::{ExactMatcher, InputMatcher};
pub use instance::{Decoded, Instance, Polymorphic, TypedValue};
pub use matcher::{FieldMatcher, Matcher};
pub use matching_data::MatchingData;
pub use prototype::Prototype;
pub use skeleton::{Skeleton, TypedSkeleton};
pub use template::Template;

// Registry (feature-gated)
#[cfg(feature = "registry")]
pub use config::{ChildConfig, MatchConfig, RuleConfig, TemplateConfig};
#[cfg(feature = "registry")]
pub use registry::{TypeRegistry, TypeRegistryBuilder};

// Trace types
pub use trace::{MatchStep, MatchTrace};

/// A JSON object-shaped node: field name to decoded value.
pub type Node = serde_json::Map<String, serde_json::Value>;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use kindred::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Core types
        Binding,
        // Errors
        ChildError,
        // Output
        Decoded,
        DecodeError,
        Decoder,
        // Concrete matchers
        ExactMatcher,
        FieldMatcher,
        InputMatcher,
        // Traits
        Matcher,
        // Trace types
        MatchStep,
        MatchTrace,
        MatchingData,
        Node,
        Polymorphic,
        Prototype,
        Skeleton,
        Template,
        TemplateError,
        TypedValue,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum allowed nesting depth of a [`Template`] tree.
///
/// Resolution only descends through declared child fields, so this also bounds
/// the recursion depth of a decode call. Enforced by [`Decoder::new`] and
/// [`Template::validate`]; override per decoder with [`Decoder::with_max_depth`].
pub const MAX_DEPTH: usize = 32;

/// Maximum number of bindings in a single [`Template`].
///
/// Bounds the linear first-match scan. Rule sets are expected to hold tens of
/// variants per nesting level, not thousands.
pub const MAX_BINDINGS: usize = 256;
