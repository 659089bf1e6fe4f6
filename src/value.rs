//! Choice value payloads and their closed type set
//!
//! A choice field ("value\[x\]" in FHIR terms) holds exactly one payload
//! whose runtime type must belong to a finite set declared once by the
//! owning field. [`DataValue`] is the payload sum type, [`DataType`] the
//! matching tag set. Membership is checked at build time by
//! [`crate::validate::choice_type`]; consumers dispatch with an exhaustive
//! match or through [`DataValue::accept`], never with downcasts.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::datatypes::{Coding, Quantity};
use crate::visitor::{Visitable, Visitor};

/// Payload of a choice-typed field
///
/// The variant list is the closed universe of types the runtime can carry
/// in a choice position. A code generator narrows it per field by declaring
/// an allowed subset of [`DataType`] tags next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataValue {
    /// true or false
    Boolean(bool),
    /// Signed 32-bit integer
    Integer(i32),
    /// Arbitrary-precision decimal
    Decimal(Decimal),
    /// Sequence of Unicode characters
    String(String),
    /// Uniform resource identifier
    Uri(String),
    /// Coded value taken from a defined set
    Code(String),
    /// Markdown-formatted text
    Markdown(String),
    /// Logical identifier
    Id(String),
    /// Calendar date
    Date(NaiveDate),
    /// Instant in time with an offset
    DateTime(DateTime<FixedOffset>),
    /// Time of day
    Time(NaiveTime),
    /// Measured amount with an optional unit
    Quantity(Quantity),
    /// Reference to a code defined by a terminology system
    Coding(Coding),
}

impl DataValue {
    /// Create a uri value
    pub fn uri(value: impl Into<String>) -> Self {
        Self::Uri(value.into())
    }

    /// Create a code value
    pub fn code(value: impl Into<String>) -> Self {
        Self::Code(value.into())
    }

    /// Create a markdown value
    pub fn markdown(value: impl Into<String>) -> Self {
        Self::Markdown(value.into())
    }

    /// Create an id value
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    /// The runtime type tag of this payload
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Boolean(_) => DataType::Boolean,
            Self::Integer(_) => DataType::Integer,
            Self::Decimal(_) => DataType::Decimal,
            Self::String(_) => DataType::String,
            Self::Uri(_) => DataType::Uri,
            Self::Code(_) => DataType::Code,
            Self::Markdown(_) => DataType::Markdown,
            Self::Id(_) => DataType::Id,
            Self::Date(_) => DataType::Date,
            Self::DateTime(_) => DataType::DateTime,
            Self::Time(_) => DataType::Time,
            Self::Quantity(_) => DataType::Quantity,
            Self::Coding(_) => DataType::Coding,
        }
    }

    /// Dispatch this payload to the matching visitor hook
    ///
    /// Primitive payloads go to the typed value hooks; composite payloads
    /// are traversed as child elements under the choice field's name.
    pub fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        match self {
            Self::Boolean(value) => visitor.visit_boolean(name, index, *value),
            Self::Integer(value) => visitor.visit_integer(name, index, *value),
            Self::Decimal(value) => visitor.visit_decimal(name, index, value),
            Self::String(value)
            | Self::Uri(value)
            | Self::Code(value)
            | Self::Markdown(value)
            | Self::Id(value) => visitor.visit_string(name, index, value),
            Self::Date(value) => visitor.visit_date(name, index, value),
            Self::DateTime(value) => visitor.visit_date_time(name, index, value),
            Self::Time(value) => visitor.visit_time(name, index, value),
            Self::Quantity(value) => Visitable::accept(value, name, index, visitor),
            Self::Coding(value) => Visitable::accept(value, name, index, visitor),
        }
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<Decimal> for DataValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<NaiveDate> for DataValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for DataValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveTime> for DataValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<Quantity> for DataValue {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<Coding> for DataValue {
    fn from(value: Coding) -> Self {
        Self::Coding(value)
    }
}

/// Runtime type tag for choice payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// true or false
    Boolean,
    /// Signed 32-bit integer
    Integer,
    /// Arbitrary-precision decimal
    Decimal,
    /// Sequence of Unicode characters
    String,
    /// Uniform resource identifier
    Uri,
    /// Coded value taken from a defined set
    Code,
    /// Markdown-formatted text
    Markdown,
    /// Logical identifier
    Id,
    /// Calendar date
    Date,
    /// Instant in time with an offset
    DateTime,
    /// Time of day
    Time,
    /// Measured amount with an optional unit
    Quantity,
    /// Reference to a code defined by a terminology system
    Coding,
}

impl DataType {
    /// Every type the runtime can carry in a choice position
    pub const ALL: &'static [DataType] = &[
        DataType::Boolean,
        DataType::Integer,
        DataType::Decimal,
        DataType::String,
        DataType::Uri,
        DataType::Code,
        DataType::Markdown,
        DataType::Id,
        DataType::Date,
        DataType::DateTime,
        DataType::Time,
        DataType::Quantity,
        DataType::Coding,
    ];

    /// The type's name as it appears in element definitions
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Uri => "uri",
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Id => "id",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Time => "time",
            Self::Quantity => "Quantity",
            Self::Coding => "Coding",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
