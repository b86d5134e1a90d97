//! Selective deep cloning of model elements.
//!
//! [`CloneHelper::clone_into`] carries an explicit allow-list of qualified
//! property names from a source element onto a freshly constructed target,
//! deep-copying nested structures so the result never aliases the source
//! tree. The primary use-case is morphing an element into another concrete
//! type (user task to service task, throw event to end event) while keeping
//! a chosen subset of its semantics.

use std::rc::Rc;

use log::{debug, trace};

use crate::element::{ElementRef, Value};
use crate::factory::Factory;
use crate::name::QName;
use crate::schema::Schema;

/// Copies allow-listed properties between typed elements.
#[derive(Debug, Clone)]
pub struct CloneHelper {
    schema: Rc<Schema>,
}

impl CloneHelper {
    /// Creates a helper over the given schema.
    pub fn new(schema: Rc<Schema>) -> Self {
        Self { schema }
    }

    /// Creates a helper sharing a factory's schema.
    pub fn from_factory(factory: &Factory) -> Self {
        Self::new(Rc::clone(factory.schema()))
    }

    /// Populates `target` with deep copies of the allow-listed properties
    /// of `source` and returns it.
    ///
    /// `target` is expected to be freshly constructed and empty; it may be
    /// of a different concrete type than `source`. Allow-list entries that
    /// are absent from `source`, or structurally inapplicable to either
    /// side, are skipped silently. Identifier properties are never carried.
    ///
    /// Every nested element reachable from the result is a brand-new node
    /// whose parent handle points at its structural container within the
    /// clone, never into the source tree.
    pub fn clone_into(
        &self,
        source: &ElementRef,
        target: ElementRef,
        allowed: &[QName],
    ) -> ElementRef {
        debug!(
            source:% = source.type_name(),
            target:% = target.type_name(),
            allowed = allowed.len();
            "cloning element"
        );
        self.copy_properties(source, &target, allowed, true);
        target
    }

    fn copy_properties(
        &self,
        source: &ElementRef,
        target: &ElementRef,
        allowed: &[QName],
        root: bool,
    ) {
        let source_type = source.type_name();
        let target_type = target.type_name();

        for name in allowed {
            let Some(value) = source.get(name) else {
                continue;
            };

            // the descriptor may live on either side of a cross-type morph
            let descriptor = self
                .schema
                .resolve_property(&source_type, name)
                .or_else(|| self.schema.resolve_property(&target_type, name));
            let Some(descriptor) = descriptor else {
                trace!(property:% = name; "property not declared for either type, skipping");
                continue;
            };
            if descriptor.is_id() {
                continue;
            }

            match value {
                value if value.is_scalar() => target.set(name.clone(), value),
                Value::Ref(_) | Value::Refs(_) => target.set(name.clone(), value),
                Value::Element(child) => {
                    if root && self.schema.is_extension_container(&child.type_name()) {
                        if let Some(container) =
                            self.copy_extension_container(&child, target, allowed)
                        {
                            target.set(name.clone(), Value::Element(container));
                        }
                    } else {
                        let copy = self.deep_copy(&child);
                        copy.set_parent(target);
                        target.set(name.clone(), Value::Element(copy));
                    }
                }
                Value::List(items) => {
                    let copies = items
                        .iter()
                        .map(|item| {
                            let copy = self.deep_copy(item);
                            copy.set_parent(target);
                            copy
                        })
                        .collect();
                    target.set(name.clone(), Value::List(copies));
                }
                _ => {}
            }
        }
    }

    /// Copies an extension container, keeping only the values whose type is
    /// named in the allow-list. Returns `None` when nothing survives, in
    /// which case the container property itself is omitted from the clone.
    fn copy_extension_container(
        &self,
        container: &ElementRef,
        owner: &ElementRef,
        allowed: &[QName],
    ) -> Option<ElementRef> {
        let mut kept: Vec<(QName, Vec<ElementRef>)> = Vec::new();

        for property in container.property_names() {
            let Some(Value::List(items)) = container.get(&property) else {
                continue;
            };
            let survivors: Vec<ElementRef> = items
                .into_iter()
                .filter(|item| {
                    let item_type = item.type_name();
                    let allow = allowed.iter().any(|entry| matches_type(entry, &item_type));
                    if !allow {
                        trace!(value:% = item_type; "extension value not allow-listed, dropping");
                    }
                    allow
                })
                .collect();
            if !survivors.is_empty() {
                kept.push((property, survivors));
            }
        }

        if kept.is_empty() {
            trace!("extension container empty after filtering, omitting");
            return None;
        }

        let fresh = ElementRef::new(container.type_name());
        fresh.set_parent(owner);
        for (property, items) in kept {
            let copies = items
                .iter()
                .map(|item| {
                    let copy = self.deep_copy(item);
                    copy.set_parent(&fresh);
                    copy
                })
                .collect();
            fresh.set(property, Value::List(copies));
        }
        Some(fresh)
    }

    /// Deep-copies a nested element with its own full property set as the
    /// effective allow-list. Below the root, extension containers are
    /// carried wholesale.
    fn deep_copy(&self, source: &ElementRef) -> ElementRef {
        let target = ElementRef::new(source.type_name());
        let properties = source.property_names();
        self.copy_properties(source, &target, &properties, false);
        target
    }
}

/// Allow-list entries name nested types either exactly
/// (`camunda:ExecutionListener`) or in property-style spelling with a
/// lower-case first letter (`camunda:executionListener`).
fn matches_type(entry: &QName, type_name: &QName) -> bool {
    if entry.prefix() != type_name.prefix() {
        return false;
    }
    let entry_local = entry.local();
    let type_local = type_name.local();
    if entry_local == type_local {
        return true;
    }
    let mut entry_chars = entry_local.chars();
    let mut type_chars = type_local.chars();
    match (entry_chars.next(), type_chars.next()) {
        (Some(a), Some(b)) => {
            a.eq_ignore_ascii_case(&b) && entry_chars.as_str() == type_chars.as_str()
        }
        _ => false,
    }
}
