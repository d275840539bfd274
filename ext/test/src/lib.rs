//! kindred-test: Test domain for conformance testing
//!
//! Provides a small family of shape types with child fields for exercising
//! templates. This is the reference extension that demonstrates how to write
//! target types for kindred.
//!
//! | Name | Type | Child fields |
//! |------|------|--------------|
//! | `test.Circle` | [`Circle`] | |
//! | `test.Square` | [`Square`] | |
//! | `test.Reading` | [`Reading`] | |
//! | `test.Drawing` | [`Drawing`] | `shape` (any decoded value) |
//! | `test.Layer` | [`Layer`] | `content` (any decoded value) |
//! | `test.Scene` | [`Scene`] | `layer` ([`Layer`] only), `shape` ([`Shape`] only) |
//!
//! # Example
//!
//! ```
//! use kindred_test::prelude::*;
//!
//! let mut template = Template::new();
//! template
//!     .add_rule("kind", "drawing", Prototype::named::<Drawing>(DRAWING))
//!     .add_child("shape")
//!     .unwrap()
//!     .add_rule("kind", "circle", Prototype::named::<Circle>(CIRCLE));
//!
//! let decoded = kindred::decode(
//!     br#"{"kind":"drawing","shape":{"kind":"circle","radius":0.5}}"#,
//!     &template,
//! )
//! .unwrap();
//! let drawing = decoded.as_typed::<Drawing>().unwrap();
//! assert_eq!(drawing.shape.type_name(), Some(CIRCLE));
//! ```

use kindred::prelude::*;
use serde::{Deserialize, Serialize};


/// Registered name of [`Circle`].
pub const CIRCLE: &str = "test.Circle";
/// Registered name of [`Square`].
pub const SQUARE: &str = "test.Square";
/// Registered name of [`Reading`].
pub const READING: &str = "test.Reading";
/// Registered name of [`Drawing`].
pub const DRAWING: &str = "test.Drawing";
/// Registered name of [`Layer`].
pub const LAYER: &str = "test.Layer";
/// Registered name of [`Scene`].
pub const SCENE: &str = "test.Scene";

// ═══════════════════════════════════════════════════════════════════════════════
// Leaf types
// ═══════════════════════════════════════════════════════════════════════════════

/// A circle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Circle {
    pub kind: String,
    pub radius: f64,
}

impl Polymorphic for Circle {}

/// A square.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Square {
    pub kind: String,
    pub side: f64,
}

impl Polymorphic for Square {}

/// A sensor reading: one field per scalar shape JSON can carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reading {
    pub kind: String,
    pub online: bool,
    pub offset: i64,
    pub count: u64,
    pub total: u128,
    pub delta: i128,
    pub value: f64,
    pub unit: Option<String>,
    pub note: Option<String>,
    pub raw: Vec<u8>,
    pub samples: Vec<f64>,
}

impl Polymorphic for Reading {}

// ═══════════════════════════════════════════════════════════════════════════════
// Container types
// ═══════════════════════════════════════════════════════════════════════════════

/// Holds whatever its `shape` child decodes to.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Drawing {
    pub kind: String,
    pub title: String,
    #[serde(skip_deserializing)]
    pub shape: Decoded,
}

impl Polymorphic for Drawing {
    const CHILDREN: &'static [&'static str] = &["shape"];

    fn set_child(&mut self, field: &str, value: Decoded) -> Result<(), ChildError> {
        match field {
            "shape" => {
                self.shape = value;
                Ok(())
            }
            _ => Err(ChildError::unknown(field)),
        }
    }
}

/// Holds whatever its `content` child decodes to.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layer {
    pub kind: String,
    pub name: String,
    #[serde(skip_deserializing)]
    pub content: Decoded,
}

impl Polymorphic for Layer {
    const CHILDREN: &'static [&'static str] = &["content"];

    fn set_child(&mut self, field: &str, value: Decoded) -> Result<(), ChildError> {
        match field {
            "content" => {
                self.content = value;
                Ok(())
            }
            _ => Err(ChildError::unknown(field)),
        }
    }
}

/// A [`Circle`] or a [`Square`], recovered from a [`Decoded`] child.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Shape {
    Circle(Circle),
    Square(Square),
}

impl TryFrom<Decoded> for Shape {
    type Error = Decoded;

    fn try_from(value: Decoded) -> Result<Self, Decoded> {
        value
            .into_typed::<Circle>()
            .map(Shape::Circle)
            .or_else(|value| value.into_typed::<Square>().map(Shape::Square))
    }
}

/// Strongly-typed children: the setters reject anything but the expected types.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub kind: String,
    pub name: String,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
}

impl Polymorphic for Scene {
    const CHILDREN: &'static [&'static str] = &["layer", "shape"];

    fn set_child(&mut self, field: &str, value: Decoded) -> Result<(), ChildError> {
        match field {
            "layer" => {
                let layer = value
                    .into_typed::<Layer>()
                    .map_err(|other| ChildError::unexpected(field, LAYER, other.describe()))?;
                self.layer = Some(layer);
                Ok(())
            }
            "shape" => {
                let shape = Shape::try_from(value).map_err(|other| {
                    ChildError::unexpected(field, "a circle or square", other.describe())
                })?;
                self.shape = Some(shape);
                Ok(())
            }
            _ => Err(ChildError::unknown(field)),
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        Circle, Drawing, Layer, Reading, Scene, Shape, Square, CIRCLE, DRAWING, LAYER, READING,
        SCENE, SQUARE,
    };
    pub use kindred::prelude::*;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry support (feature = "registry")
// ═══════════════════════════════════════════════════════════════════════════════

/// Register all kindred-test types with the given builder.
///
/// - `test.Circle` → [`Circle`]
/// - `test.Square` → [`Square`]
/// - `test.Reading` → [`Reading`]
/// - `test.Drawing` → [`Drawing`]
/// - `test.Layer` → [`Layer`]
/// - `test.Scene` → [`Scene`]
#[cfg(feature = "registry")]
#[must_use]
pub fn register(builder: kindred::TypeRegistryBuilder) -> kindred::TypeRegistryBuilder {
    builder
        .register::<Circle>(CIRCLE)
        .register::<Square>(SQUARE)
        .register::<Reading>(READING)
        .register::<Drawing>(DRAWING)
        .register::<Layer>(LAYER)
        .register::<Scene>(SCENE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scene_template() -> Template {
        let mut template = Template::new();
        let scene = template.add_rule("kind", "scene", Prototype::named::<Scene>(SCENE));
        scene
            .add_child("layer")
            .unwrap()
            .add_rule("kind", "layer", Prototype::named::<Layer>(LAYER));
        let shape = scene.add_child("shape").unwrap();
        shape.add_rule("kind", "circle", Prototype::named::<Circle>(CIRCLE));
        shape.add_rule("kind", "square", Prototype::named::<Square>(SQUARE));
        template
    }

    #[test]
    fn test_shape_from_decoded() {
        let template = scene_template();
        let decoded = kindred::decode(
            br#"{"kind":"scene","name":"s","layer":{"kind":"layer"},"shape":{"kind":"square","side":1.5}}"#,
            &template,
        )
        .unwrap();

        let scene = decoded.as_typed::<Scene>().unwrap();
        assert_eq!(
            scene.shape,
            Some(Shape::Square(Square {
                kind: "square".into(),
                side: 1.5,
            }))
        );
        assert_eq!(scene.layer.as_ref().map(|l| l.kind.as_str()), Some("layer"));
    }

    #[test]
    fn test_shape_rejects_other_values() {
        let untyped = Decoded::Untyped(json!({"kind": "hexagon"}));
        let back = Shape::try_from(untyped).unwrap_err();
        assert_eq!(back, Decoded::Untyped(json!({"kind": "hexagon"})));
    }

    #[test]
    fn test_scene_setter_rejects_untyped_layer() {
        let mut scene = Scene::default();
        let err = scene
            .set_child("layer", Decoded::Untyped(json!({"kind": "x"})))
            .unwrap_err();
        assert_eq!(err, ChildError::unexpected("layer", LAYER, "untyped value"));
        assert!(scene.layer.is_none());
    }

    #[test]
    fn test_unknown_setter_field() {
        let mut drawing = Drawing::default();
        assert_eq!(
            drawing.set_child("colour", Decoded::default()),
            Err(ChildError::unknown("colour"))
        );
    }

    #[test]
    fn test_scene_serializes_children() {
        let template = scene_template();
        let decoded = kindred::decode(
            br#"{"kind":"scene","name":"s","layer":{"kind":"layer","name":"bg"},"shape":{"kind":"circle","radius":0.5}}"#,
            &template,
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&decoded).unwrap(),
            json!({
                "kind": "scene",
                "name": "s",
                "layer": {"kind": "layer", "name": "bg", "content": null},
                "shape": {"kind": "circle", "radius": 0.5}
            })
        );
    }

    #[cfg(feature = "registry")]
    #[test]
    fn test_register_all_types() {
        let registry = register(kindred::TypeRegistryBuilder::new()).build();
        assert_eq!(
            registry.type_names(),
            vec![CIRCLE, DRAWING, LAYER, READING, SCENE, SQUARE]
        );
    }
}
