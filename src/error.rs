//! Error types raised by validating builders
//!
//! Every error in this crate is a structural validation failure reported
//! synchronously by `build()`. There is no fatal class and no retry: the
//! builder stays usable and the caller decides what to do with the failed
//! field.

use thiserror::Error;

use crate::value::DataType;

/// Result type alias for builder and validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Structural validation failure raised while building a node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required scalar field was never set
    #[error("Missing required field: '{field}'")]
    MissingRequiredField {
        /// Name of the missing field
        field: String,
    },

    /// A required repeating field was left empty
    #[error("Required repeating field: '{field}' must contain at least one element")]
    EmptyRequiredList {
        /// Name of the empty field
        field: String,
    },

    /// A repeating field contained an absent element
    #[error("Repeating field: '{field}' does not permit absent elements (index {index})")]
    NullListElement {
        /// Name of the repeating field
        field: String,
        /// Index of the absent element
        index: usize,
    },

    /// A choice field payload fell outside its declared type set
    #[error(
        "Invalid type: {actual} for choice field: '{field}' must be one of: [{}]",
        join_types(.allowed)
    )]
    InvalidChoiceType {
        /// Name of the choice field
        field: String,
        /// Runtime type of the offending payload
        actual: DataType,
        /// Types the field declares
        allowed: &'static [DataType],
    },

    /// An element carried neither a value nor any children
    #[error("Element: '{type_name}' must have a value or children")]
    EmptyElement {
        /// Type name of the empty element
        type_name: &'static str,
    },
}

impl ValidationError {
    /// Create a missing required field error
    pub fn missing_required_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Create an empty required list error
    pub fn empty_required_list(field: impl Into<String>) -> Self {
        Self::EmptyRequiredList {
            field: field.into(),
        }
    }

    /// Create a null list element error
    pub fn null_list_element(field: impl Into<String>, index: usize) -> Self {
        Self::NullListElement {
            field: field.into(),
            index,
        }
    }

    /// Create an invalid choice type error
    pub fn invalid_choice_type(
        field: impl Into<String>,
        actual: DataType,
        allowed: &'static [DataType],
    ) -> Self {
        Self::InvalidChoiceType {
            field: field.into(),
            actual,
            allowed,
        }
    }

    /// Create an empty element error
    pub fn empty_element(type_name: &'static str) -> Self {
        Self::EmptyElement { type_name }
    }

    /// The field the failure points at, if the rule is field-level
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field }
            | Self::EmptyRequiredList { field }
            | Self::NullListElement { field, .. }
            | Self::InvalidChoiceType { field, .. } => Some(field),
            Self::EmptyElement { .. } => None,
        }
    }
}

fn join_types(types: &[DataType]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
