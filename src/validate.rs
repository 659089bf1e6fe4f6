//! Structural validation run by every builder at build time
//!
//! Each function enforces one rule and maps to one
//! [`ValidationError`](crate::error::ValidationError) kind. Generated
//! `build()` routines call them in field-declaration order, base checks
//! before derived ones, so error reporting is deterministic. Checking is
//! fail-fast: the first violation aborts the build and no partially valid
//! node escapes.

use crate::error::{Result, ValidationError};
use crate::value::{DataType, DataValue};
use crate::visitor::Visitable;

/// Unwrap a required scalar slot
pub fn require_non_null<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ValidationError::missing_required_field(field))
}

/// Check that a required repeating field has at least one element
pub fn check_non_empty_list<T>(elements: &[T], field: &str) -> Result<()> {
    if elements.is_empty() {
        return Err(ValidationError::empty_required_list(field));
    }
    Ok(())
}

/// Densify a repeating slot, rejecting absent elements
///
/// Wire formats allow sparse primitive arrays, so builders accumulate
/// repeating primitives as `Option` items; the frozen node stores them
/// dense.
pub fn check_list<T>(elements: Vec<Option<T>>, field: &str) -> Result<Vec<T>> {
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            element.ok_or_else(|| ValidationError::null_list_element(field, index))
        })
        .collect()
}

/// Check that a choice payload's type belongs to the field's declared set
pub fn choice_type(value: &DataValue, field: &str, allowed: &'static [DataType]) -> Result<()> {
    let actual = value.data_type();
    if !allowed.contains(&actual) {
        return Err(ValidationError::invalid_choice_type(field, actual, allowed));
    }
    Ok(())
}

/// Unwrap a required choice slot and check its type membership
pub fn require_choice_type(
    value: Option<DataValue>,
    field: &str,
    allowed: &'static [DataType],
) -> Result<DataValue> {
    let value = require_non_null(value, field)?;
    choice_type(&value, field, allowed)?;
    Ok(value)
}

/// Reject an element that carries neither a value nor any children
pub fn require_value_or_children<T: Visitable + ?Sized>(node: &T) -> Result<()> {
    if !node.has_value() && !node.has_children() {
        return Err(ValidationError::empty_element(node.type_name()));
    }
    Ok(())
}
