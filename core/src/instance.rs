//! Target types and decoded values.
//!
//! A target type implements [`Polymorphic`]: it is an ordinary `serde` type
//! plus an explicit setter table for the fields that are decoded through child
//! templates. Every `Polymorphic` type is also an [`Instance`], the object-safe
//! form the decoder hands around as `Box<dyn Instance>`.

use crate::ChildError;
use serde::de::DeserializeOwned;
use serde::{ser, Serialize, Serializer};
use serde_json::Value;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// A type a [`Binding`](crate::Binding) can instantiate.
///
/// Non-child fields are filled by the type's own `Deserialize` impl from the
/// node's remaining fields, so missing fields should default (put
/// `#[serde(default)]` on the container). Child fields are filled through
/// [`set_child`](Self::set_child) and should be `#[serde(skip_deserializing)]`.
///
/// # Example
///
/// ```
/// use kindred::{ChildError, Decoded, Polymorphic};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Layer {
///     name: String,
///     #[serde(skip_deserializing)]
///     content: Decoded,
/// }
///
/// impl Polymorphic for Layer {
///     const CHILDREN: &'static [&'static str] = &["content"];
///
///     fn set_child(&mut self, field: &str, value: Decoded) -> Result<(), ChildError> {
///         match field {
///             "content" => {
///                 self.content = value;
///                 Ok(())
///             }
///             _ => Err(ChildError::unknown(field)),
///         }
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Polymorphic`",
    label = "this type cannot be the target of a binding",
    note = "implement `Polymorphic` (and derive Debug, PartialEq, Serialize, Deserialize)"
)]
pub trait Polymorphic:
    DeserializeOwned + Serialize + PartialEq + Debug + Send + Sync + 'static
{
    /// Field names that may be declared as children with
    /// [`Binding::add_child`](crate::Binding::add_child).
    const CHILDREN: &'static [&'static str] = &[];

    /// Assign the decoded value of child field `field`.
    ///
    /// # Errors
    ///
    /// [`ChildError::UnknownField`] if the field is not in the table,
    /// [`ChildError::UnexpectedValue`] if the value has the wrong shape.
    fn set_child(&mut self, field: &str, value: Decoded) -> Result<(), ChildError> {
        let _ = value;
        Err(ChildError::unknown(field))
    }
}

/// Object-safe view of a [`Polymorphic`] value.
///
/// Blanket-implemented for every `Polymorphic` type; there is no need to
/// implement it by hand.
pub trait Instance: Debug + Send + Sync + 'static {
    /// Borrow as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Convert into `Any` for owned downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Dispatch to [`Polymorphic::set_child`].
    ///
    /// # Errors
    ///
    /// Whatever the setter table returns.
    fn assign_child(&mut self, field: &str, value: Decoded) -> Result<(), ChildError>;

    /// Equality across erased instances (false for different concrete types).
    fn eq_instance(&self, other: &dyn Instance) -> bool;

    /// Render as a JSON value.
    ///
    /// # Errors
    ///
    /// If the type's `Serialize` impl fails.
    fn to_json(&self) -> Result<Value, serde_json::Error>;
}

impl<T: Polymorphic> Instance for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn assign_child(&mut self, field: &str, value: Decoded) -> Result<(), ChildError> {
        Polymorphic::set_child(self, field, value)
    }

    fn eq_instance(&self, other: &dyn Instance) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|o| self == o)
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// A decoded instance together with the name of the prototype that built it.
#[derive(Debug)]
pub struct TypedValue {
    name: Arc<str>,
    value: Box<dyn Instance>,
}

impl TypedValue {
    pub(crate) fn new(name: Arc<str>, value: Box<dyn Instance>) -> Self {
        Self { name, value }
    }

    /// Name of the prototype that produced this value.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.name
    }

    /// The erased instance.
    #[must_use]
    pub fn instance(&self) -> &dyn Instance {
        &*self.value
    }

    /// Returns `true` if the instance is a `T`.
    #[must_use]
    pub fn is<T: Polymorphic>(&self) -> bool {
        self.value.as_any().is::<T>()
    }

    /// Borrow the instance as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Polymorphic>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref::<T>()
    }

    /// Take the instance as a `T`, or give `self` back if it is another type.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when the instance is not a `T`.
    #[allow(clippy::missing_panics_doc)] // downcast guarded by is::<T>()
    pub fn downcast<T: Polymorphic>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.value.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("instance type checked above"),
        }
    }
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value.eq_instance(&*other.value)
    }
}

/// Result of a decode call.
///
/// - `Typed`: a node some binding matched
/// - `Untyped`: a node no binding matched, or a non-object array element,
///   exactly as the generic decoder produces it
/// - `Sequence`: a top-level array, element by element
///
/// The default value is `Untyped(null)`, so `Decoded` can sit in a
/// `#[serde(skip_deserializing)]` child field.
#[derive(Debug, PartialEq)]
pub enum Decoded {
    /// A typed instance.
    Typed(TypedValue),
    /// A generic JSON value.
    Untyped(Value),
    /// A top-level array.
    Sequence(Vec<Decoded>),
}

impl Decoded {
    /// Prototype name if this is a typed value.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Typed(t) => Some(t.type_name()),
            _ => None,
        }
    }

    /// Returns `true` for [`Decoded::Typed`].
    #[must_use]
    pub fn is_typed(&self) -> bool {
        matches!(self, Self::Typed(_))
    }

    /// Borrow as `T` if this is a typed `T`.
    #[must_use]
    pub fn as_typed<T: Polymorphic>(&self) -> Option<&T> {
        match self {
            Self::Typed(t) => t.downcast_ref(),
            _ => None,
        }
    }

    /// Take as `T`, or give `self` back.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged unless this is a typed `T`.
    pub fn into_typed<T: Polymorphic>(self) -> Result<T, Self> {
        match self {
            Self::Typed(t) => t.downcast().map_err(Self::Typed),
            other => Err(other),
        }
    }

    /// Borrow the generic value if this is untyped.
    #[must_use]
    pub fn as_untyped(&self) -> Option<&Value> {
        match self {
            Self::Untyped(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the elements if this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Decoded]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Short description of the shape, for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Typed(t) => t.type_name().to_owned(),
            Self::Untyped(_) => "untyped value".to_owned(),
            Self::Sequence(_) => "sequence".to_owned(),
        }
    }
}

impl Default for Decoded {
    fn default() -> Self {
        Self::Untyped(Value::Null)
    }
}

impl Serialize for Decoded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Typed(t) => t
                .value
                .to_json()
                .map_err(ser::Error::custom)?
                .serialize(serializer),
            Self::Untyped(v) => v.serialize(serializer),
            Self::Sequence(items) => serializer.collect_seq(items),
        }
    }
}
