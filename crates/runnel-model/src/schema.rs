//! Schema descriptors and reflective property lookup.
//!
//! The schema layer answers the questions the clone helper and the document
//! loader need to ask about any qualified property name: is it a scalar, a
//! reference, or a contained element; is it single- or many-valued; which
//! concrete type does a containment hold. Types are declared per package and
//! may inherit properties through a supertype chain; packages may also layer
//! *extension attributes* onto elements of other packages (the way
//! `camunda:asyncBefore` attaches to an activity it does not declare).

use indexmap::IndexMap;

use crate::error::ModelError;
use crate::name::QName;

/// What kind of value a property holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// A plain scalar value (bool, number, string).
    Scalar,
    /// A non-owning by-id reference to another element.
    Reference,
    /// An owned nested element (or collection of them) of the given type.
    Contained(QName),
}

/// Describes a single declared property.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: QName,
    kind: PropertyKind,
    many: bool,
    id: bool,
}

impl PropertyDescriptor {
    /// A single scalar property.
    pub fn scalar(name: QName) -> Self {
        Self {
            name,
            kind: PropertyKind::Scalar,
            many: false,
            id: false,
        }
    }

    /// The identifier property of a type.
    pub fn id(name: QName) -> Self {
        Self {
            name,
            kind: PropertyKind::Scalar,
            many: false,
            id: true,
        }
    }

    /// A single non-owning reference.
    pub fn reference(name: QName) -> Self {
        Self {
            name,
            kind: PropertyKind::Reference,
            many: false,
            id: false,
        }
    }

    /// A many-valued non-owning reference.
    pub fn many_references(name: QName) -> Self {
        Self {
            name,
            kind: PropertyKind::Reference,
            many: true,
            id: false,
        }
    }

    /// A single contained element of the given type.
    pub fn contained(name: QName, ty: QName) -> Self {
        Self {
            name,
            kind: PropertyKind::Contained(ty),
            many: false,
            id: false,
        }
    }

    /// A collection of contained elements of the given type.
    pub fn many_contained(name: QName, ty: QName) -> Self {
        Self {
            name,
            kind: PropertyKind::Contained(ty),
            many: true,
            id: false,
        }
    }

    /// Returns the qualified property name.
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Returns the kind of value this property holds.
    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// Returns true for many-valued properties.
    pub fn is_many(&self) -> bool {
        self.many
    }

    /// Returns true for identifier properties.
    pub fn is_id(&self) -> bool {
        self.id
    }

    /// Returns true for non-owning reference properties.
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, PropertyKind::Reference)
    }

    /// Returns the contained element type, if this is a containment.
    pub fn contained_type(&self) -> Option<&QName> {
        match &self.kind {
            PropertyKind::Contained(ty) => Some(ty),
            _ => None,
        }
    }
}

/// Describes a declared element type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: QName,
    supertype: Option<QName>,
    extension_container: bool,
    properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
    pub fn new(
        name: QName,
        supertype: Option<QName>,
        properties: Vec<PropertyDescriptor>,
    ) -> Self {
        Self {
            name,
            supertype,
            extension_container: false,
            properties,
        }
    }

    /// Marks this type as the extension-elements container, which receives
    /// special filtering during selective cloning.
    pub fn extension_container(mut self) -> Self {
        self.extension_container = true;
        self
    }

    /// Returns the qualified type name.
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Returns the direct supertype, if any.
    pub fn supertype(&self) -> Option<&QName> {
        self.supertype.as_ref()
    }

    /// Returns true if this type is an extension-elements container.
    pub fn is_extension_container(&self) -> bool {
        self.extension_container
    }

    /// Returns the properties declared directly on this type.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }
}

/// A vocabulary package: a prefix, its owned types, and the extension
/// attributes it layers onto foreign elements.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    prefix: String,
    types: Vec<TypeDescriptor>,
    extension_attributes: Vec<PropertyDescriptor>,
}

impl Package {
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        types: Vec<TypeDescriptor>,
        extension_attributes: Vec<PropertyDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            types,
            extension_attributes,
        }
    }

    /// Returns the human-readable package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace prefix the package owns.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// A registry of packages with reflective lookup over all declared types.
#[derive(Debug)]
pub struct Schema {
    types: IndexMap<QName, TypeDescriptor>,
    extension_attributes: IndexMap<QName, PropertyDescriptor>,
}

impl Schema {
    /// Builds a schema from the given packages.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateType`] if two packages declare the
    /// same qualified type name.
    pub fn new(packages: Vec<Package>) -> Result<Self, ModelError> {
        let mut types = IndexMap::new();
        let mut extension_attributes = IndexMap::new();

        for package in packages {
            for ty in package.types {
                let name = ty.name().clone();
                if types.insert(name.clone(), ty).is_some() {
                    return Err(ModelError::DuplicateType(name));
                }
            }
            for attr in package.extension_attributes {
                extension_attributes.insert(attr.name().clone(), attr);
            }
        }

        Ok(Self {
            types,
            extension_attributes,
        })
    }

    /// Returns true if the schema declares the given type.
    pub fn contains_type(&self, name: &QName) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the descriptor for the given type.
    pub fn type_descriptor(&self, name: &QName) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Returns true if `name` equals `ancestor` or inherits from it.
    pub fn is_kind_of(&self, name: &QName, ancestor: &QName) -> bool {
        let mut current = Some(name);
        while let Some(ty) = current {
            if ty == ancestor {
                return true;
            }
            current = self.types.get(ty).and_then(TypeDescriptor::supertype);
        }
        false
    }

    /// Returns true if the given type is an extension-elements container.
    pub fn is_extension_container(&self, name: &QName) -> bool {
        self.types
            .get(name)
            .is_some_and(TypeDescriptor::is_extension_container)
    }

    /// Resolves a qualified property name against an element type.
    ///
    /// The lookup walks the type's own properties, then its supertype chain,
    /// and finally the extension attributes registered by other packages.
    /// `None` means the property is structurally inapplicable to the type.
    pub fn resolve_property(
        &self,
        element_type: &QName,
        property: &QName,
    ) -> Option<&PropertyDescriptor> {
        let mut current = self.types.get(element_type);
        while let Some(ty) = current {
            if let Some(descriptor) = ty.properties().iter().find(|p| p.name() == property) {
                return Some(descriptor);
            }
            current = ty.supertype().and_then(|name| self.types.get(name));
        }
        self.extension_attributes.get(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        let base = QName::new("t", "Base");
        let node = QName::new("t", "Node");
        let leaf = QName::new("t", "Leaf");

        let package = Package::new(
            "Test",
            "t",
            vec![
                TypeDescriptor::new(
                    base.clone(),
                    None,
                    vec![PropertyDescriptor::id(QName::new("t", "id"))],
                ),
                TypeDescriptor::new(
                    node.clone(),
                    Some(base.clone()),
                    vec![PropertyDescriptor::many_contained(
                        QName::new("t", "children"),
                        leaf.clone(),
                    )],
                ),
                TypeDescriptor::new(
                    leaf,
                    Some(base),
                    vec![PropertyDescriptor::scalar(QName::new("t", "label"))],
                ),
            ],
            vec![PropertyDescriptor::scalar(QName::new("x", "extra"))],
        );

        Schema::new(vec![package]).unwrap()
    }

    #[test]
    fn test_inherited_property_resolution() {
        let schema = sample_schema();
        let descriptor = schema
            .resolve_property(&QName::new("t", "Node"), &QName::new("t", "id"))
            .unwrap();
        assert!(descriptor.is_id());
    }

    #[test]
    fn test_extension_attribute_resolution() {
        let schema = sample_schema();
        let descriptor = schema
            .resolve_property(&QName::new("t", "Leaf"), &QName::new("x", "extra"))
            .unwrap();
        assert_eq!(*descriptor.kind(), PropertyKind::Scalar);
    }

    #[test]
    fn test_inapplicable_property_is_none() {
        let schema = sample_schema();
        assert!(
            schema
                .resolve_property(&QName::new("t", "Leaf"), &QName::new("t", "children"))
                .is_none()
        );
    }

    #[test]
    fn test_is_kind_of_walks_supertypes() {
        let schema = sample_schema();
        assert!(schema.is_kind_of(&QName::new("t", "Leaf"), &QName::new("t", "Base")));
        assert!(!schema.is_kind_of(&QName::new("t", "Base"), &QName::new("t", "Leaf")));
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let ty = TypeDescriptor::new(QName::new("t", "Dup"), None, vec![]);
        let package = Package::new("Test", "t", vec![ty.clone(), ty], vec![]);
        assert!(matches!(
            Schema::new(vec![package]),
            Err(ModelError::DuplicateType(_))
        ));
    }
}
