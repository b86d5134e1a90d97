//! Id-based semantic lookup.
//!
//! The renderer never holds the model tree directly; it resolves element
//! ids from the rendering datums through this read-only index.

use indexmap::IndexMap;

use crate::element::ElementRef;

/// Maps element ids to semantic model elements.
#[derive(Debug, Default)]
pub struct SemanticIndex {
    elements: IndexMap<String, ElementRef>,
}

impl SemanticIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element under the given id, replacing any previous
    /// entry.
    pub fn insert(&mut self, id: impl Into<String>, element: ElementRef) {
        self.elements.insert(id.into(), element);
    }

    /// Resolves an element by id.
    pub fn get(&self, id: &str) -> Option<&ElementRef> {
        self.elements.get(id)
    }

    /// Returns the number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::QName;

    #[test]
    fn test_insert_and_get() {
        let mut index = SemanticIndex::new();
        let task = ElementRef::new(QName::new("bpmn", "Task"));
        index.insert("Task_1", task.clone());

        assert!(index.get("Task_1").unwrap().same_as(&task));
        assert!(index.get("Task_2").is_none());
    }
}
