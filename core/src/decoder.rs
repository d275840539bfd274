//! Decoder: Entry points for the two-pass decode.
//!
//! 1. Parse the bytes into an untyped `serde_json::Value` tree.
//! 2. Resolve a [`Skeleton`] against the template (object or array root).
//! 3. Re-decode the input bytes into the skeleton.

use crate::{populate, Decoded, DecodeError, Skeleton, Template, TemplateError, MAX_DEPTH};
use serde_json::Value;

/// A validated template ready to decode documents.
///
/// Construction validates the template once; decoding never mutates it, so a
/// `Decoder` is `Copy` and can be shared freely across threads.
///
/// # Example
///
/// ```ignore
/// let decoder = Decoder::new(&template)?;
/// let first = decoder.decode(br#"{"kind":"circle","radius":1.5}"#)?;
/// let second = decoder.decode_str(r#"[{"kind":"square","side":2}]"#)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'t> {
    template: &'t Template,
}

impl<'t> Decoder<'t> {
    /// Validate `template` against [`MAX_DEPTH`] and wrap it.
    ///
    /// # Errors
    ///
    /// [`TemplateError::DepthExceeded`] or [`TemplateError::TooManyBindings`].
    pub fn new(template: &'t Template) -> Result<Self, TemplateError> {
        Self::with_max_depth(template, MAX_DEPTH)
    }

    /// Validate `template` against a custom nesting limit and wrap it.
    ///
    /// Resolution only descends through declared children, so `max_depth`
    /// bounds the recursion of every decode call made with this decoder.
    ///
    /// # Errors
    ///
    /// [`TemplateError::DepthExceeded`] or [`TemplateError::TooManyBindings`].
    pub fn with_max_depth(template: &'t Template, max_depth: usize) -> Result<Self, TemplateError> {
        template.validate_depth(max_depth)?;
        Ok(Self { template })
    }

    /// The template this decoder applies.
    #[must_use]
    pub fn template(&self) -> &'t Template {
        self.template
    }

    /// Run only the resolve pass: which type each node becomes.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Syntax`]: malformed JSON
    /// - [`DecodeError::Shape`]: top level is not an object or array
    /// - [`DecodeError::MissingChild`] / [`DecodeError::NotAnObject`]: a
    ///   declared child field is absent or not an object
    pub fn resolve(&self, bytes: &[u8]) -> Result<Skeleton<'t>, DecodeError> {
        let root: Value = serde_json::from_slice(bytes)
            .inspect_err(|e| tracing::debug!(error = %e, "input is not well-formed JSON"))
            .map_err(DecodeError::Syntax)?;

        match &root {
            Value::Object(node) => Skeleton::resolve(node, self.template),
            Value::Array(items) => Skeleton::resolve_array(items, self.template),
            other => {
                let found = kind_of(other);
                tracing::debug!(found, "top-level value is neither object nor array");
                Err(DecodeError::Shape { found })
            }
        }
    }

    /// Decode a document.
    ///
    /// Returns a typed value when a binding matches the top-level object, the
    /// generic value when none does, or a sequence for a top-level array.
    ///
    /// # Errors
    ///
    /// Everything [`resolve`](Self::resolve) returns, plus
    /// [`DecodeError::Populate`] when a field value does not fit its target type.
    pub fn decode(&self, bytes: &[u8]) -> Result<Decoded, DecodeError> {
        tracing::debug!(len = bytes.len(), bindings = self.template.len(), "decoding document");

        let skeleton = self.resolve(bytes)?;
        let decoded = populate::populate(bytes, &skeleton)
            .inspect_err(|e| tracing::debug!(error = %e, "populate pass failed"))?;

        tracing::debug!(
            typed = skeleton.typed_count(),
            root = decoded.type_name().unwrap_or("untyped"),
            "decoded document"
        );
        Ok(decoded)
    }

    /// Decode a document held in a string.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode).
    pub fn decode_str(&self, json: &str) -> Result<Decoded, DecodeError> {
        self.decode(json.as_bytes())
    }
}

/// Decode `bytes` with `template`.
///
/// Shorthand for [`Decoder::new`] followed by [`Decoder::decode`].
///
/// # Errors
///
/// [`DecodeError::Template`] if the template fails validation, otherwise see
/// [`Decoder::decode`].
pub fn decode(bytes: &[u8], template: &Template) -> Result<Decoded, DecodeError> {
    Decoder::new(template)?.decode(bytes)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
