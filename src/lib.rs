//! Immutable FHIR data model runtime
//!
//! The generic core underneath generated resource classes: an immutable,
//! extensible document tree with validating builders, a closed choice-type
//! mechanism, and a deterministic visitor traversal. Wire formats,
//! path-expression evaluation and terminology checking are external
//! consumers of this crate; the runtime guarantees structural invariants
//! only.
//!
//! Nodes are built exclusively through their builders, which validate at
//! build time:
//!
//! ```
//! use octofhir_fhirmodel::{DataValue, Extension};
//!
//! let extension = Extension::builder()
//!     .url("http://example.org/fhir/StructureDefinition/status")
//!     .value(DataValue::code("draft"))
//!     .build()?;
//! assert_eq!(extension.url(), "http://example.org/fhir/StructureDefinition/status");
//! # Ok::<(), octofhir_fhirmodel::ValidationError>(())
//! ```
//!
//! Built trees are immutable and safely shared across threads; traversal
//! never mutates.

#![warn(missing_docs)]

pub mod datatypes;
pub mod element;
pub mod error;
pub mod extension;
pub mod resource;
pub mod validate;
pub mod value;
pub mod visitor;

pub use datatypes::{
    Coding, CodingBuilder, Meta, MetaBuilder, Narrative, NarrativeBuilder, NarrativeStatus,
    Quantity, QuantityBuilder,
};
pub use element::{
    BackboneBuilder, BackboneData, BackboneElement, Element, ElementBuilder, ElementData,
    HashCache, hash_of,
};
pub use error::{Result, ValidationError};
pub use extension::{Extension, ExtensionBuilder};
pub use resource::{Resource, ResourceBuilder, ResourceData, resource_eq};
pub use value::{DataType, DataValue};
pub use visitor::{Visitable, Visitor, walk, walk_list, walk_optional, walk_root, walk_string_list};
