//! Runnel Semantic Model
//!
//! This crate provides the semantic model layer for Runnel BPMN diagrams.
//! It includes:
//!
//! - **Names**: Namespace-qualified names ([`name::QName`])
//! - **Schema**: Package, type, and property descriptors with reflective
//!   lookup ([`schema`] module)
//! - **Elements**: Shared, parent-linked model element nodes
//!   ([`element::ElementRef`])
//! - **Packages**: The built-in `bpmn` vocabulary and the `camunda`
//!   extension package ([`packages`] module)
//! - **Factory**: Construction of empty typed elements ([`factory::Factory`])
//! - **Index**: Id-based semantic lookup ([`index::SemanticIndex`])
//! - **Clone**: Selective deep cloning with allow-lists
//!   ([`clone::CloneHelper`])

pub mod clone;
pub mod element;
pub mod error;
pub mod factory;
pub mod index;
pub mod name;
pub mod packages;
pub mod schema;

pub use clone::CloneHelper;
pub use element::{ElementRef, Value};
pub use error::ModelError;
pub use factory::Factory;
pub use index::SemanticIndex;
pub use name::QName;
pub use schema::Schema;
