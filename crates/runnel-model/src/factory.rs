//! Construction of empty typed elements.

use std::rc::Rc;

use crate::element::ElementRef;
use crate::error::ModelError;
use crate::name::QName;
use crate::packages;
use crate::schema::Schema;

/// Creates empty, typed model elements after validating the type against a
/// schema.
///
/// # Examples
///
/// ```
/// use runnel_model::Factory;
///
/// let factory = Factory::standard().unwrap();
/// let task = factory.create(&"bpmn:UserTask".parse().unwrap()).unwrap();
/// assert_eq!(task.type_name().to_string(), "bpmn:UserTask");
/// ```
#[derive(Debug, Clone)]
pub struct Factory {
    schema: Rc<Schema>,
}

impl Factory {
    /// Creates a factory over the given schema.
    pub fn new(schema: Rc<Schema>) -> Self {
        Self { schema }
    }

    /// Creates a factory over the standard schema (BPMN + Camunda).
    pub fn standard() -> Result<Self, ModelError> {
        Ok(Self::new(Rc::new(packages::standard_schema()?)))
    }

    /// Returns the schema this factory validates against.
    pub fn schema(&self) -> &Rc<Schema> {
        &self.schema
    }

    /// Constructs an empty element of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownType`] when the schema does not declare
    /// the type.
    pub fn create(&self, type_name: &QName) -> Result<ElementRef, ModelError> {
        if !self.schema.contains_type(type_name) {
            return Err(ModelError::UnknownType(type_name.clone()));
        }
        Ok(ElementRef::new(type_name.clone()))
    }
}
