// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use parking_lot::RwLock;
use serde_json::{json, Value as JsonValue};

use super::PipelineUniqueId;
use crate::core::elements::{ElementNode, ElementUniqueId};
use crate::core::error::{PlexusError, Result};
use crate::core::handle::{Ref, WeakRef};

/// Container of elements and owner of their membership.
///
/// A pipeline holds each member strongly; members point back with a weak
/// reference, so dropping the last `Ref<Pipeline>` releases every element
/// that nothing else holds.
pub struct Pipeline {
    id: PipelineUniqueId,
    name: String,
    self_ref: WeakRef<Pipeline>,
    members: RwLock<Vec<Ref<ElementNode>>>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Ref<Self> {
        let name = name.into();
        Ref::new_cyclic(|self_ref| Self {
            id: PipelineUniqueId::new(),
            name,
            self_ref: self_ref.clone(),
            members: RwLock::new(Vec::new()),
        })
    }

    pub fn id(&self) -> &PipelineUniqueId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add `element`, moving it out of any pipeline it belonged to before.
    pub fn add(&self, element: &Ref<ElementNode>) -> Result<()> {
        let this = self.self_ref.upgrade().ok_or_else(|| {
            PlexusError::Pipeline(format!("pipeline '{}' has been dropped", self.name))
        })?;
        element.set_pipeline(&this)
    }

    /// Remove an element. Waits for an in-flight invocation of it to finish.
    pub fn remove(&self, id: &ElementUniqueId) -> Option<Ref<ElementNode>> {
        let element = self.detach_member(id)?;
        element.clear_pipeline(&self.id);
        tracing::debug!("[{}] Removed element '{}'", self.id, element.name());
        Some(element)
    }

    pub fn clear(&self) {
        let drained: Vec<Ref<ElementNode>> = std::mem::take(&mut *self.members.write());
        for element in &drained {
            element.clear_pipeline(&self.id);
        }
        tracing::debug!("[{}] Cleared {} elements", self.id, drained.len());
    }

    pub fn contains(&self, id: &ElementUniqueId) -> bool {
        self.members.read().iter().any(|e| e.id() == id)
    }

    pub fn element(&self, id: &ElementUniqueId) -> Option<Ref<ElementNode>> {
        self.members.read().iter().find(|e| e.id() == id).cloned()
    }

    pub fn element_by_name(&self, name: &str) -> Option<Ref<ElementNode>> {
        self.members
            .read()
            .iter()
            .find(|e| e.name() == name)
            .cloned()
    }

    /// Snapshot of the members in insertion order.
    pub fn elements(&self) -> Vec<Ref<ElementNode>> {
        self.members.read().clone()
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Connect `from.out_pin` to `to.in_pin`. Both elements must be members.
    pub fn connect(
        &self,
        from: &ElementNode,
        out_pin: &str,
        to: &ElementNode,
        in_pin: &str,
    ) -> Result<()> {
        for element in [from, to] {
            if !self.contains(element.id()) {
                return Err(PlexusError::Pipeline(format!(
                    "element '{}' is not a member of pipeline '{}'",
                    element.name(),
                    self.name
                )));
            }
        }

        let output = from.output_pin(out_pin).ok_or_else(|| {
            PlexusError::IllegalArgument(format!(
                "element '{}' has no output pin '{}'",
                from.name(),
                out_pin
            ))
        })?;
        let input = to.input_pin(in_pin).ok_or_else(|| {
            PlexusError::IllegalArgument(format!(
                "element '{}' has no input pin '{}'",
                to.name(),
                in_pin
            ))
        })?;

        output.connect(&*input)?;
        tracing::debug!(
            "[{}] Connected {}.{} -> {}.{}",
            self.id,
            from.name(),
            out_pin,
            to.name(),
            in_pin
        );
        Ok(())
    }

    pub(crate) fn attach_member(&self, element: Ref<ElementNode>) {
        self.members.write().push(element);
    }

    pub(crate) fn detach_member(&self, id: &ElementUniqueId) -> Option<Ref<ElementNode>> {
        let mut members = self.members.write();
        let index = members.iter().position(|e| e.id() == id)?;
        Some(members.remove(index))
    }

    pub fn to_json(&self) -> JsonValue {
        let elements: Vec<JsonValue> = self.elements().iter().map(|e| e.to_json()).collect();
        json!({
            "id": self.id.as_str(),
            "name": self.name,
            "elements": elements,
        })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}
