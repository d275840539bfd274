//! Prototype: Type-erased descriptor of a binding's target type.
//!
//! The concrete type `T` is monomorphized into a factory function when the
//! prototype is created and erased behind a plain `fn` pointer, so a
//! [`Binding`](crate::Binding) can build a `T` without knowing it statically.

use crate::{populate, Instance, Polymorphic, TypedSkeleton};
use std::fmt;
use std::sync::Arc;

/// Builds an instance, children included, from one object's bytes.
type BuildFn = fn(&[u8], &TypedSkeleton<'_>) -> Result<Box<dyn Instance>, serde_json::Error>;

/// Type descriptor for a [`Polymorphic`] type.
///
/// Cheap to clone: the name is shared and the factory is a function pointer.
///
/// # Example
///
/// ```
/// use kindred::{Polymorphic, Prototype};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
/// struct Circle { radius: f64 }
///
/// impl Polymorphic for Circle {}
///
/// let prototype = Prototype::named::<Circle>("geo.Circle");
/// assert_eq!(prototype.name(), "geo.Circle");
/// assert!(prototype.children().is_empty());
/// ```
#[derive(Clone)]
pub struct Prototype {
    name: Arc<str>,
    children: &'static [&'static str],
    build: BuildFn,
}

impl Prototype {
    /// Prototype for `T`, named after its Rust type path.
    #[must_use]
    pub fn of<T: Polymorphic>() -> Self {
        Self::named::<T>(std::any::type_name::<T>())
    }

    /// Prototype for `T` under an explicit name.
    #[must_use]
    pub fn named<T: Polymorphic>(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            children: T::CHILDREN,
            build: populate::instantiate::<T>,
        }
    }

    /// The prototype name carried into [`TypedValue`](crate::TypedValue).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child fields the target type accepts.
    #[must_use]
    pub fn children(&self) -> &'static [&'static str] {
        self.children
    }

    /// Returns `true` if `field` is a settable child field.
    #[must_use]
    pub fn accepts_child(&self, field: &str) -> bool {
        self.children.iter().any(|c| *c == field)
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Deserialize the target type from `bytes`, one object resolved to
    /// `skeleton`.
    pub(crate) fn instantiate(
        &self,
        bytes: &[u8],
        skeleton: &TypedSkeleton<'_>,
    ) -> Result<Box<dyn Instance>, serde_json::Error> {
        (self.build)(bytes, skeleton)
    }
}

impl fmt::Debug for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("name", &self.name)
            .field("children", &self.children)
            .finish()
    }
}
