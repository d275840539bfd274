//! Skeleton: Result of the type-resolution pass.
//!
//! Resolution walks the untyped document and decides, for every node reachable
//! through declared child fields, which binding (if any) it falls under. It
//! checks that declared children are present and object-shaped, and nothing
//! else: field values are filled later by the populate pass.

use crate::{Binding, DecodeError, Node, Template};
use serde_json::Value;

/// Type-resolved shape of a document.
///
/// Borrows the bindings of the template it was resolved against.
#[derive(Debug)]
pub enum Skeleton<'t> {
    /// No binding matched (or not an object): decode generically.
    Untyped,
    /// A binding matched: decode as its target type.
    Typed(TypedSkeleton<'t>),
    /// A top-level array, element by element.
    Sequence(Vec<Skeleton<'t>>),
}

/// A matched node: its binding and one resolved skeleton per declared child.
#[derive(Debug)]
pub struct TypedSkeleton<'t> {
    binding: &'t Binding,
    children: Vec<Skeleton<'t>>,
}

impl<'t> TypedSkeleton<'t> {
    /// The selected binding.
    #[must_use]
    pub fn binding(&self) -> &'t Binding {
        self.binding
    }

    /// Child skeletons, aligned with [`Binding::children`].
    #[must_use]
    pub fn children(&self) -> &[Skeleton<'t>] {
        &self.children
    }
}

impl<'t> Skeleton<'t> {
    /// Resolve an object node.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MissingChild`]: a declared child field is absent
    /// - [`DecodeError::NotAnObject`]: a declared child field is not an object
    pub fn resolve(node: &Node, template: &'t Template) -> Result<Self, DecodeError> {
        let Some(binding) = template.first_match(node) else {
            tracing::trace!(bindings = template.len(), "no binding matched, node stays untyped");
            return Ok(Self::Untyped);
        };
        tracing::trace!(target_type = binding.prototype().name(), "binding matched");

        let mut children = Vec::with_capacity(binding.children().len());
        for child in binding.children() {
            let field = child.field();
            let child_node = match node.get(field) {
                Some(Value::Object(child_node)) => child_node,
                Some(_) => {
                    tracing::debug!(field, "declared child field is not an object");
                    return Err(DecodeError::NotAnObject {
                        field: field.to_owned(),
                    });
                }
                None => {
                    tracing::debug!(field, "declared child field is missing");
                    return Err(DecodeError::MissingChild {
                        field: field.to_owned(),
                    });
                }
            };
            children.push(Self::resolve(child_node, child.template())?);
        }

        Ok(Self::Typed(TypedSkeleton { binding, children }))
    }

    /// Resolve every element of a top-level array.
    ///
    /// Object elements are resolved against `template`; anything else stays
    /// untyped. The first error aborts.
    ///
    /// # Errors
    ///
    /// Any error from [`resolve`](Self::resolve) on an element.
    pub fn resolve_array(items: &[Value], template: &'t Template) -> Result<Self, DecodeError> {
        items
            .iter()
            .map(|item| match item {
                Value::Object(node) => Self::resolve(node, template),
                _ => Ok(Self::Untyped),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Sequence)
    }

    /// Prototype name if this node resolved to a type.
    #[must_use]
    pub fn type_name(&self) -> Option<&'t str> {
        match self {
            Self::Typed(typed) => Some(typed.binding.prototype().name()),
            _ => None,
        }
    }

    /// Number of typed nodes in this skeleton.
    #[must_use]
    pub fn typed_count(&self) -> usize {
        match self {
            Self::Untyped => 0,
            Self::Typed(typed) => 1 + typed.children.iter().map(Self::typed_count).sum::<usize>(),
            Self::Sequence(items) => items.iter().map(Self::typed_count).sum(),
        }
    }
}
