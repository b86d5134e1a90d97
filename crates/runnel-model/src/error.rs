//! Error types for semantic model operations.

use thiserror::Error;

use crate::name::QName;

/// The main error type for model construction and lookup.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown element type `{0}`")]
    UnknownType(QName),

    #[error("type `{0}` is declared more than once")]
    DuplicateType(QName),

    #[error("invalid qualified name `{0}`, expected `prefix:local`")]
    InvalidName(String),
}
