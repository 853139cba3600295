// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::core::elements::{Element, ElementNode};
use crate::core::error::{PlexusError, Result};
use crate::core::handle::Ref;

/// Constructor stored per registered type name.
pub type ElementConstructorFn = Arc<dyn Fn() -> Result<Box<dyn Element>> + Send + Sync>;

/// Link-time registration entry submitted by [`register_element!`](crate::register_element).
pub struct ElementRegistration {
    name: &'static str,
    construct: fn() -> Box<dyn Element>,
}

impl ElementRegistration {
    pub const fn new(name: &'static str, construct: fn() -> Box<dyn Element>) -> Self {
        Self { name, construct }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

inventory::collect!(ElementRegistration);

/// Process-wide element registry.
/// Registers every `register_element!` type on first access.
pub static ELEMENT_REGISTRY: LazyLock<ElementTypeRegistry> = LazyLock::new(|| {
    let registry = ElementTypeRegistry::new();
    register_static(&registry, inventory::iter::<ElementRegistration>);
    registry
});

/// Register link-time entries. A name submitted more than once is ambiguous,
/// so none of its entries are registered.
fn register_static<'a>(
    registry: &ElementTypeRegistry,
    registrations: impl IntoIterator<Item = &'a ElementRegistration>,
) {
    let mut by_name: HashMap<&'static str, Vec<&'a ElementRegistration>> = HashMap::new();
    for registration in registrations {
        by_name.entry(registration.name).or_default().push(registration);
    }

    for (name, entries) in by_name {
        if entries.len() > 1 {
            tracing::error!(
                "[registry] element type '{}' submitted {} times, none registered",
                name,
                entries.len()
            );
            continue;
        }
        let construct = entries[0].construct;
        if let Err(err) = registry.register_type(name, move || Ok(construct())) {
            tracing::error!("[registry] skipping static registration: {}", err);
        }
    }
}

/// Name → constructor table.
pub struct ElementTypeRegistry {
    constructors: RwLock<HashMap<String, ElementConstructorFn>>,
}

impl Default for ElementTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTypeRegistry {
    pub fn new() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
        }
    }

    /// Register a constructor under `name`. Fails if the name is taken.
    pub fn register_type<F>(&self, name: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn() -> Result<Box<dyn Element>> + Send + Sync + 'static,
    {
        let type_name = name.into();
        {
            let mut constructors = self.constructors.write();
            if constructors.contains_key(&type_name) {
                return Err(PlexusError::IllegalArgument(format!(
                    "element type '{}' is already registered",
                    type_name
                )));
            }
            constructors.insert(type_name.clone(), Arc::new(constructor));
        }

        tracing::info!("[register] new element type registered '{}'", type_name);
        Ok(())
    }

    /// Register a `Default`-constructible element type.
    pub fn register<E>(&self, name: impl Into<String>) -> Result<()>
    where
        E: Element + Default,
    {
        self.register_type(name, || Ok(Box::new(E::default()) as Box<dyn Element>))
    }

    /// Registered type names, sorted.
    pub fn types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.constructors.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.constructors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.read().is_empty()
    }

    /// Construct a fresh, uninitialized element of type `name`.
    ///
    /// The constructor runs without the registry lock held, so it may itself
    /// register or create types.
    pub fn create(&self, name: &str) -> Result<Box<dyn Element>> {
        let constructor = self.constructors.read().get(name).cloned().ok_or_else(|| {
            PlexusError::ElementCreation(format!("unknown element type '{}'", name))
        })?;

        constructor().map_err(|e| {
            PlexusError::ElementCreation(format!("constructor for '{}' failed: {}", name, e))
        })
    }

    /// Construct an element of type `type_name` and wrap it in a node.
    pub fn instantiate(&self, type_name: &str, instance_name: &str) -> Result<Ref<ElementNode>> {
        let element = self.create(type_name)?;
        let node = ElementNode::from_boxed(instance_name, type_name, element);
        tracing::debug!(
            "[{}] Created '{}' of type '{}'",
            node.id(),
            instance_name,
            type_name
        );
        Ok(node)
    }
}

impl std::fmt::Debug for ElementTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementTypeRegistry")
            .field("types", &self.types())
            .finish()
    }
}
