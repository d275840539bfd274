//! Error types for template construction, child assignment and decoding.
//!
//! Template errors are caught when the rule set is built or loaded, before any
//! document is seen. Decode errors are terminal for the whole decode call: there
//! is no partial result. An unmatched node is *not* an error.

/// Errors from template construction and validation.
///
/// Fix the rule set and rebuild the template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A child template was declared with an empty field name.
    #[error("child field name for \"{type_name}\" must not be empty")]
    EmptyFieldName {
        /// Target type of the binding the child was added to.
        type_name: String,
    },

    /// A binding's matcher reads an empty discriminator field name.
    #[error("rule for \"{type_name}\" matches on an empty field name")]
    EmptyMatchField {
        /// Target type of the binding.
        type_name: String,
    },

    /// The same child field was declared twice on one binding.
    #[error("child field \"{field}\" is already declared on \"{type_name}\"")]
    DuplicateChild {
        /// Target type of the binding.
        type_name: String,
        /// The repeated field name.
        field: String,
    },

    /// The target type has no settable child field with this name.
    #[error(
        "\"{type_name}\" has no child field \"{field}\"; accepted: {}",
        list(.available)
    )]
    UnknownChildField {
        /// Target type of the binding.
        type_name: String,
        /// The rejected field name.
        field: String,
        /// Child fields the type does accept (for self-correcting messages).
        available: Vec<String>,
    },

    /// Template nesting exceeds the configured maximum.
    #[error("template nesting depth is {depth}, but maximum allowed is {max}")]
    DepthExceeded {
        /// Actual depth of the template tree.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },

    /// Too many bindings in a single template.
    #[error("template has {count} bindings, but maximum allowed is {max}")]
    TooManyBindings {
        /// Actual count of bindings.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A type name was not found in the registry.
    #[error("unknown type \"{type_name}\"; registered: {}", list(.available))]
    UnknownType {
        /// The unregistered type name.
        type_name: String,
        /// Type names that ARE registered.
        available: Vec<String>,
    },

    /// Template configuration could not be deserialized or interpreted.
    #[error("invalid template config: {message}")]
    InvalidConfig {
        /// The underlying error message.
        message: String,
    },
}

/// Errors returned by a [`Polymorphic::set_child`](crate::Polymorphic::set_child)
/// setter table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChildError {
    /// The type has no child field with this name.
    #[error("no child field named \"{field}\"")]
    UnknownField {
        /// The field that was assigned.
        field: String,
    },

    /// The decoded child value has the wrong shape for the field.
    #[error("child field \"{field}\" expects {expected}, got {found}")]
    UnexpectedValue {
        /// The field that was assigned.
        field: String,
        /// What the field accepts.
        expected: String,
        /// What was decoded.
        found: String,
    },
}

impl ChildError {
    /// The setter table has no entry for `field`.
    #[must_use]
    pub fn unknown(field: &str) -> Self {
        Self::UnknownField {
            field: field.to_owned(),
        }
    }

    /// The value decoded for `field` is not what the field stores.
    #[must_use]
    pub fn unexpected(field: &str, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedValue {
            field: field.to_owned(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Errors from a decode call.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input bytes are not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The top-level value is neither an object nor an array.
    #[error("input must be a JSON object or an array of JSON objects, found {found}")]
    Shape {
        /// JSON kind of the top-level value.
        found: &'static str,
    },

    /// A matched node lacks a child field its binding declares.
    #[error("missing required child field \"{field}\"")]
    MissingChild {
        /// The declared child field.
        field: String,
    },

    /// A declared child field holds a scalar or array instead of an object.
    #[error("field \"{field}\" is not an object")]
    NotAnObject {
        /// The declared child field.
        field: String,
    },

    /// The second pass could not populate the resolved skeleton.
    #[error("failed to populate decoded value: {0}")]
    Populate(#[source] serde_json::Error),

    /// The template failed validation when the decoder was built.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl DecodeError {
    /// Stable, machine-readable name of the error category.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Syntax(_) => "syntax",
            Self::Shape { .. } => "shape",
            Self::MissingChild { .. } => "missing_child",
            Self::NotAnObject { .. } => "not_an_object",
            Self::Populate(_) => "populate",
            Self::Template(_) => "template",
        }
    }
}

fn list(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_owned()
    } else {
        names.join(", ")
    }
}
