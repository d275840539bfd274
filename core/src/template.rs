//! Template: Ordered rule set with first-match-wins semantics
//!
//! A `Template` is the rule set active at one nesting level. Bindings are
//! tried in insertion order and the first whose matcher accepts the node wins.

use crate::{
    Binding, FieldMatcher, MatchStep, MatchTrace, Matcher, Node, Prototype, TemplateError,
    MAX_BINDINGS, MAX_DEPTH,
};

/// Ordered collection of [`Binding`]s.
///
/// Built once with [`add_rule`](Self::add_rule) /
/// [`Binding::add_child`], then read-only: decoding never mutates a template,
/// so one template can serve any number of concurrent decode calls.
///
/// # INV: First-match-wins
///
/// Bindings are evaluated in order. The first accepting binding terminates the
/// scan, even if later bindings would also accept the node.
///
/// # Example
///
/// ```ignore
/// let mut template = Template::new();
/// template.add_rule("kind", "circle", Prototype::of::<Circle>());
/// template.add_rule("kind", "square", Prototype::of::<Square>());
/// ```
#[derive(Debug, Default)]
pub struct Template {
    bindings: Vec<Binding>,
}

impl Template {
    /// Create an empty template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding that matches when `field` equals `value`.
    ///
    /// Returns the new binding so child templates can be attached.
    pub fn add_rule(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
        prototype: Prototype,
    ) -> &mut Binding {
        self.add_binding(FieldMatcher::exact(field, value), prototype)
    }

    /// Append a binding with an arbitrary matcher.
    pub fn add_binding(
        &mut self,
        matcher: impl Matcher + 'static,
        prototype: Prototype,
    ) -> &mut Binding {
        let index = self.bindings.len();
        self.bindings.push(Binding::new(Box::new(matcher), prototype));
        &mut self.bindings[index]
    }

    /// Returns the first binding whose matcher accepts `node`.
    ///
    /// Linear scan in insertion order; `None` means the node stays untyped.
    #[must_use]
    pub fn first_match(&self, node: &Node) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.matches(node))
    }

    /// Like [`first_match`](Self::first_match), recording every binding tried.
    ///
    /// `selected` is always the index `first_match` would return.
    #[must_use]
    pub fn first_match_with_trace(&self, node: &Node) -> MatchTrace {
        let mut steps = Vec::new();
        for (index, binding) in self.bindings.iter().enumerate() {
            let matched = binding.matches(node);
            steps.push(MatchStep {
                index,
                matcher: format!("{:?}", binding.matcher()),
                target: binding.prototype().name().to_owned(),
                matched,
            });
            if matched {
                return MatchTrace {
                    steps,
                    selected: Some(index),
                };
            }
        }
        MatchTrace {
            steps,
            selected: None,
        }
    }

    /// The bindings, in evaluation order.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Nesting depth: 1 for a template without child templates, plus one per
    /// level of child templates below it.
    #[must_use]
    pub fn depth(&self) -> usize {
        let child_depth = self
            .bindings
            .iter()
            .flat_map(Binding::children)
            .map(|c| c.template().depth())
            .max()
            .unwrap_or(0);
        1 + child_depth
    }

    /// Validate against [`MAX_DEPTH`] and [`MAX_BINDINGS`], and check every
    /// discriminator field name.
    ///
    /// # Errors
    ///
    /// See [`validate_depth`](Self::validate_depth).
    pub fn validate(&self) -> Result<(), TemplateError> {
        self.validate_depth(MAX_DEPTH)
    }

    /// Validate against a custom depth limit and [`MAX_BINDINGS`].
    ///
    /// # Errors
    ///
    /// - [`TemplateError::DepthExceeded`]: nesting deeper than `max_depth`
    /// - [`TemplateError::TooManyBindings`]: some level has more than [`MAX_BINDINGS`]
    /// - [`TemplateError::EmptyMatchField`]: some binding matches on an empty field name
    pub fn validate_depth(&self, max_depth: usize) -> Result<(), TemplateError> {
        let depth = self.depth();
        if depth > max_depth {
            return Err(TemplateError::DepthExceeded {
                depth,
                max: max_depth,
            });
        }
        self.validate_rules()
    }

    fn validate_rules(&self) -> Result<(), TemplateError> {
        if self.bindings.len() > MAX_BINDINGS {
            return Err(TemplateError::TooManyBindings {
                count: self.bindings.len(),
                max: MAX_BINDINGS,
            });
        }
        if let Some(binding) = self
            .bindings
            .iter()
            .find(|b| b.matcher().discriminator() == Some(""))
        {
            return Err(TemplateError::EmptyMatchField {
                type_name: binding.prototype().name().to_owned(),
            });
        }
        self.bindings
            .iter()
            .flat_map(Binding::children)
            .try_for_each(|c| c.template().validate_rules())
    }
}
