//! Namespace-qualified names.
//!
//! Every type tag and property name in the model is a [`QName`]: a package
//! prefix plus a local name, written `prefix:local` (`bpmn:UserTask`,
//! `camunda:inputOutput`). Allow-lists passed to the clone helper are lists
//! of qualified names as well, so one name type covers the whole surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A namespace-qualified name, `prefix:local`.
///
/// # Examples
///
/// ```
/// use runnel_model::name::QName;
///
/// let name: QName = "bpmn:UserTask".parse().unwrap();
/// assert_eq!(name.prefix(), "bpmn");
/// assert_eq!(name.local(), "UserTask");
/// assert_eq!(name.to_string(), "bpmn:UserTask");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QName {
    prefix: String,
    local: String,
}

impl QName {
    /// Creates a qualified name from its parts.
    pub fn new(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            local: local.into(),
        }
    }

    /// Returns the package prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the local part of the name.
    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

impl FromStr for QName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
                Ok(Self::new(prefix, local))
            }
            _ => Err(ModelError::InvalidName(s.to_string())),
        }
    }
}

impl TryFrom<String> for QName {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<QName> for String {
    fn from(name: QName) -> Self {
        name.to_string()
    }
}
