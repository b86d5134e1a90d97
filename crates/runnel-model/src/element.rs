//! Shared model element nodes.
//!
//! Elements form an ownership tree: every nested element is owned by exactly
//! one parent, reachable back through a weak parent handle. Cross-references
//! between elements (a flow pointing at its source node, a shape pointing at
//! a data object) are stored as by-id [`Value::Ref`] entries and never own
//! their target.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::name::QName;

/// A property value held by an element.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A non-owning reference to another element, by id.
    Ref(String),
    /// Non-owning references to other elements, by id.
    Refs(Vec<String>),
    /// A single owned nested element.
    Element(ElementRef),
    /// A collection of owned nested elements.
    List(Vec<ElementRef>),
}

impl Value {
    /// Returns true for plain scalar values (bool, number, string).
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementRef> {
        match self {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ElementRef]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct ElementData {
    type_name: QName,
    properties: IndexMap<QName, Value>,
    parent: Option<Weak<RefCell<ElementData>>>,
}

/// A shared handle to a model element node.
///
/// Handles are cheap to clone and compare by pointer identity via
/// [`ElementRef::same_as`]. Property access clones values out of the node,
/// so no borrow is held across calls.
#[derive(Debug, Clone)]
pub struct ElementRef(Rc<RefCell<ElementData>>);

impl ElementRef {
    /// Creates a fresh element of the given type with no properties and no
    /// parent. Code outside this crate goes through
    /// [`Factory::create`](crate::factory::Factory::create), which validates
    /// the type against a schema first.
    pub fn new(type_name: QName) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            type_name,
            properties: IndexMap::new(),
            parent: None,
        })))
    }

    /// Returns the qualified type name of this element.
    pub fn type_name(&self) -> QName {
        self.0.borrow().type_name.clone()
    }

    /// Returns true if both handles point at the same node.
    pub fn same_as(&self, other: &ElementRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns a copy of the value stored under the given property name.
    pub fn get(&self, name: &QName) -> Option<Value> {
        self.0.borrow().properties.get(name).cloned()
    }

    /// Returns true if the element carries the given property.
    pub fn has(&self, name: &QName) -> bool {
        self.0.borrow().properties.contains_key(name)
    }

    /// Sets a property value, replacing any previous value.
    pub fn set(&self, name: QName, value: Value) {
        self.0.borrow_mut().properties.insert(name, value);
    }

    /// Removes a property, if present.
    pub fn remove(&self, name: &QName) {
        self.0.borrow_mut().properties.shift_remove(name);
    }

    /// Returns the property names present on this element, in insertion
    /// order.
    pub fn property_names(&self) -> Vec<QName> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    /// Returns the structural parent, if the element has one and it is
    /// still alive.
    pub fn parent(&self) -> Option<ElementRef> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(ElementRef)
    }

    /// Sets the structural parent back-reference.
    pub fn set_parent(&self, parent: &ElementRef) {
        self.0.borrow_mut().parent = Some(Rc::downgrade(&parent.0));
    }

    /// Returns the element id, when an id property is set.
    pub fn id(&self) -> Option<String> {
        self.get(&QName::new("bpmn", "id"))
            .and_then(|value| value.as_str().map(str::to_string))
    }

    /// Returns the directly contained child elements, in property order.
    pub fn children(&self) -> Vec<ElementRef> {
        let data = self.0.borrow();
        let mut children = Vec::new();
        for value in data.properties.values() {
            match value {
                Value::Element(child) => children.push(child.clone()),
                Value::List(items) => children.extend(items.iter().cloned()),
                _ => {}
            }
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qn(s: &str) -> QName {
        s.parse().unwrap()
    }

    #[test]
    fn test_identity_is_pointer_based() {
        let a = ElementRef::new(qn("bpmn:Task"));
        let b = ElementRef::new(qn("bpmn:Task"));
        assert!(a.same_as(&a.clone()));
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_parent_back_reference() {
        let parent = ElementRef::new(qn("bpmn:Process"));
        let child = ElementRef::new(qn("bpmn:Task"));
        child.set_parent(&parent);
        parent.set(qn("bpmn:flowElements"), Value::List(vec![child.clone()]));

        assert!(child.parent().unwrap().same_as(&parent));
    }

    #[test]
    fn test_get_clones_value_out() {
        let task = ElementRef::new(qn("bpmn:Task"));
        task.set(qn("bpmn:name"), Value::Str("Review".into()));

        let value = task.get(&qn("bpmn:name")).unwrap();
        assert_eq!(value.as_str(), Some("Review"));

        task.remove(&qn("bpmn:name"));
        assert!(!task.has(&qn("bpmn:name")));
        // the copy we took earlier is unaffected
        assert_eq!(value.as_str(), Some("Review"));
    }

    #[test]
    fn test_children_walks_containments_only() {
        let task = ElementRef::new(qn("bpmn:Task"));
        let doc = ElementRef::new(qn("bpmn:Documentation"));
        task.set(qn("bpmn:documentation"), Value::List(vec![doc.clone()]));
        task.set(qn("bpmn:default"), Value::Ref("Flow_1".into()));

        let children = task.children();
        assert_eq!(children.len(), 1);
        assert!(children[0].same_as(&doc));
    }
}
