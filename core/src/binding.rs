//! `Binding`: Matcher + target type + child templates
//!
//! A `Binding` is one decoding rule. When its matcher accepts a node, the node
//! becomes an instance of the binding's [`Prototype`], and every declared child
//! field is decoded with its own [`Template`].

use crate::{Matcher, Prototype, Template, TemplateError};
use std::fmt::Debug;

/// A declared child field and the template that decodes it.
#[derive(Debug)]
pub struct Child {
    field: String,
    template: Template,
}

impl Child {
    /// The field name in the matching node, also the setter-table key.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The rule set applied to the field's value.
    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// One decoding rule.
///
/// # INV: children are mandatory
///
/// Once a child is declared, a matching node must carry that field as an
/// object. Absence or any other shape fails the whole decode.
///
/// # Example
///
/// ```ignore
/// let mut template = Template::new();
/// let drawing = template.add_rule("kind", "drawing", Prototype::of::<Drawing>());
/// drawing
///     .add_child("shape")?
///     .add_rule("kind", "circle", Prototype::of::<Circle>());
/// ```
#[derive(Debug)]
pub struct Binding {
    matcher: Box<dyn Matcher>,
    prototype: Prototype,
    children: Vec<Child>,
}

impl Binding {
    /// Create a binding with no children.
    #[must_use]
    pub fn new(matcher: Box<dyn Matcher>, prototype: Prototype) -> Self {
        Self {
            matcher,
            prototype,
            children: Vec::new(),
        }
    }

    /// Declare `field` as a child and return its empty template.
    ///
    /// The field name is checked here rather than at decode time.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::EmptyFieldName`]: `field` is empty
    /// - [`TemplateError::DuplicateChild`]: `field` is already declared here
    /// - [`TemplateError::UnknownChildField`]: the target type has no such child
    pub fn add_child(&mut self, field: &str) -> Result<&mut Template, TemplateError> {
        if field.is_empty() {
            return Err(TemplateError::EmptyFieldName {
                type_name: self.prototype.name().to_owned(),
            });
        }
        if self.child(field).is_some() {
            return Err(TemplateError::DuplicateChild {
                type_name: self.prototype.name().to_owned(),
                field: field.to_owned(),
            });
        }
        if !self.prototype.accepts_child(field) {
            return Err(TemplateError::UnknownChildField {
                type_name: self.prototype.name().to_owned(),
                field: field.to_owned(),
                available: self
                    .prototype
                    .children()
                    .iter()
                    .map(|c| (*c).to_owned())
                    .collect(),
            });
        }

        let index = self.children.len();
        self.children.push(Child {
            field: field.to_owned(),
            template: Template::new(),
        });
        Ok(&mut self.children[index].template)
    }

    /// Evaluate the matcher against `node`.
    pub fn matches(&self, node: &crate::Node) -> bool {
        self.matcher.matches(node)
    }

    /// The matcher.
    #[must_use]
    pub fn matcher(&self) -> &dyn Matcher {
        &*self.matcher
    }

    /// The target type.
    #[must_use]
    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    /// Declared children, in declaration order.
    #[must_use]
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Look up a declared child by field name.
    #[must_use]
    pub fn child(&self, field: &str) -> Option<&Child> {
        self.children.iter().find(|c| c.field == field)
    }
}
