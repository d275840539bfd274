//! Match trace types for debugging rule selection.
//!
//! Use [`Template::first_match_with_trace`](crate::Template::first_match_with_trace)
//! to see which bindings were tried against a node and which one won.
//!
//! # Example
//!
//! ```ignore
//! let trace = template.first_match_with_trace(&node);
//! println!("selected: {:?}", trace.selected);
//! for step in &trace.steps {
//!     println!("  binding[{}] -> {}: matched={}", step.index, step.target, step.matched);
//! }
//! ```

/// Trace of one first-match scan over a [`Template`](crate::Template).
///
/// # INV: `selected` == `first_match()` index
///
/// Steps stop after the first match, preserving first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTrace {
    /// Each binding evaluated, in order.
    pub steps: Vec<MatchStep>,
    /// Index of the winning binding, or `None` if the node stays untyped.
    pub selected: Option<usize>,
}

impl MatchTrace {
    /// Returns `true` if some binding accepted the node.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.selected.is_some()
    }

    /// The winning step, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&MatchStep> {
        self.selected.and_then(|i| self.steps.get(i))
    }
}

/// One binding's evaluation in a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchStep {
    /// Index in the template (0-based).
    pub index: usize,
    /// Debug description of the matcher.
    pub matcher: String,
    /// Prototype name of the binding's target type.
    pub target: String,
    /// Did the matcher accept the node?
    pub matched: bool,
}
