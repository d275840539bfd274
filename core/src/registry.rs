//! Type registry for config-driven template construction.
//!
//! The registry enables **generic config loading**: JSON/YAML config ->
//! [`Template`] without hand-written builder code per rule set.
//!
//! # Architecture
//!
//! Each [`Polymorphic`] type registers itself under a name. At registration
//! time the concrete type `T` is monomorphized into a [`Prototype`] and erased
//! behind a function pointer, so the registry can later bind any registered
//! name to a rule read from config.
//!
//! # Example
//!
//! ```ignore
//! let registry = TypeRegistryBuilder::new()
//!     .register::<Circle>("geo.Circle")
//!     .register::<Drawing>("geo.Drawing")
//!     .build();
//!
//! let config: TemplateConfig = serde_yaml::from_str(yaml)?;
//! let template = registry.load_template(&config)?;
//! ```

use std::collections::HashMap;

use crate::{
    config::{MatchConfig, RuleConfig, TemplateConfig},
    Polymorphic, Prototype, Template, TemplateError, MAX_BINDINGS, MAX_DEPTH,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder for constructing a [`TypeRegistry`].
///
/// Register target types by name, then call [`build()`](Self::build) to
/// produce an immutable registry. No registration is possible afterwards.
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    prototypes: HashMap<String, Prototype>,
}

impl TypeRegistryBuilder {
    /// Create a new empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `name`.
    ///
    /// Registering the same name twice keeps the later type.
    #[must_use]
    pub fn register<T: Polymorphic>(mut self, name: &str) -> Self {
        self.prototypes
            .insert(name.to_owned(), Prototype::named::<T>(name));
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> TypeRegistry {
        TypeRegistry {
            prototypes: self.prototypes,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════════

/// Immutable name -> [`Prototype`] table.
///
/// Produced by [`TypeRegistryBuilder::build`]. `Send + Sync`, so a single
/// registry can load templates from any thread.
#[derive(Debug)]
pub struct TypeRegistry {
    prototypes: HashMap<String, Prototype>,
}

impl TypeRegistry {
    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.prototypes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Prototype registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Prototype> {
        self.prototypes.get(name)
    }

    /// Build a [`Template`] from config.
    ///
    /// Limits are checked while walking the config, before any nested level
    /// is built.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::UnknownType`]: a rule names an unregistered type
    /// - [`TemplateError::UnknownChildField`] / [`TemplateError::DuplicateChild`] /
    ///   [`TemplateError::EmptyFieldName`]: a child field is not settable
    /// - [`TemplateError::DepthExceeded`]: nesting deeper than [`MAX_DEPTH`]
    /// - [`TemplateError::TooManyBindings`]: a level holds more than [`MAX_BINDINGS`] rules
    /// - [`TemplateError::EmptyMatchField`]: a rule matches on an empty field name
    pub fn load_template(&self, config: &TemplateConfig) -> Result<Template, TemplateError> {
        let template = self.load_level(config, 1)?;
        tracing::debug!(
            bindings = template.len(),
            depth = template.depth(),
            "loaded template from config"
        );
        Ok(template)
    }

    /// Deserialize a [`TemplateConfig`] from a JSON value, then
    /// [`load_template`](Self::load_template).
    ///
    /// # Errors
    ///
    /// [`TemplateError::InvalidConfig`] if `value` is not a template config,
    /// otherwise see [`load_template`](Self::load_template).
    pub fn load_template_value(&self, value: serde_json::Value) -> Result<Template, TemplateError> {
        let config: TemplateConfig =
            serde_json::from_value(value).map_err(|e| TemplateError::InvalidConfig {
                message: e.to_string(),
            })?;
        self.load_template(&config)
    }

    fn load_level(&self, config: &TemplateConfig, depth: usize) -> Result<Template, TemplateError> {
        if depth > MAX_DEPTH {
            return Err(TemplateError::DepthExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
        if config.rules.len() > MAX_BINDINGS {
            return Err(TemplateError::TooManyBindings {
                count: config.rules.len(),
                max: MAX_BINDINGS,
            });
        }

        let mut template = Template::new();
        for rule in &config.rules {
            self.load_rule(&mut template, rule, depth)?;
        }
        Ok(template)
    }

    fn load_rule(
        &self,
        template: &mut Template,
        rule: &RuleConfig,
        depth: usize,
    ) -> Result<(), TemplateError> {
        let prototype = self.get(&rule.type_name).cloned().ok_or_else(|| {
            TemplateError::UnknownType {
                type_name: rule.type_name.clone(),
                available: self.type_names().into_iter().map(str::to_owned).collect(),
            }
        })?;

        let MatchConfig::Exact { field, .. } = &rule.matcher;
        if field.is_empty() {
            return Err(TemplateError::EmptyMatchField {
                type_name: rule.type_name.clone(),
            });
        }

        let binding = template.add_binding(rule.matcher.build(), prototype);
        for child in &rule.children {
            let loaded = self.load_level(&child.template, depth + 1)?;
            *binding.add_child(&child.field)? = loaded;
        }
        Ok(())
    }
}
