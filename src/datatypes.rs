//! Complex datatypes referenced by the runtime itself
//!
//! The resource header and choice payloads need a small set of composite
//! element types: [`Coding`] and [`Quantity`] as choice payloads,
//! [`Meta`] and [`Narrative`] for resource metadata and narrative text.
//! Each follows the same contract as any generated element: builder-only
//! construction, structural validation, visitor traversal in declaration
//! order.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::element::{Element, ElementBuilder, ElementData, hash_of};
use crate::error::Result;
use crate::extension::Extension;
use crate::validate;
use crate::visitor::{Visitable, Visitor, walk, walk_string_list};

/// A reference to a code defined by a terminology system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coding {
    element: ElementData,
    system: Option<String>,
    version: Option<String>,
    code: Option<String>,
    display: Option<String>,
    user_selected: Option<bool>,
}

impl Coding {
    /// Create a builder for a coding
    pub fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    /// Identity of the terminology system
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    /// Version of the system the code was taken from
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Symbol in syntax defined by the system
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Representation defined by the system
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Whether this coding was chosen directly by the user
    pub fn user_selected(&self) -> Option<bool> {
        self.user_selected
    }
}

impl Element for Coding {
    fn element(&self) -> &ElementData {
        &self.element
    }
}

impl Visitable for Coding {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        walk(self, name, index, visitor, |v| {
            self.element.accept_children(v);
            if let Some(system) = &self.system {
                v.visit_string("system", None, system);
            }
            if let Some(version) = &self.version {
                v.visit_string("version", None, version);
            }
            if let Some(code) = &self.code {
                v.visit_string("code", None, code);
            }
            if let Some(display) = &self.display {
                v.visit_string("display", None, display);
            }
            if let Some(user_selected) = self.user_selected {
                v.visit_boolean("userSelected", None, user_selected);
            }
        });
    }

    fn type_name(&self) -> &'static str {
        "Coding"
    }

    fn has_children(&self) -> bool {
        self.element.has_children()
            || self.system.is_some()
            || self.version.is_some()
            || self.code.is_some()
            || self.display.is_some()
            || self.user_selected.is_some()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Hash for Coding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.element.cached_hash(|| {
            hash_of(&(
                &self.element,
                &self.system,
                &self.version,
                &self.code,
                &self.display,
                &self.user_selected,
            ))
        }));
    }
}

/// Mutable accumulator for [`Coding`]
#[derive(Debug, Clone, Default)]
pub struct CodingBuilder {
    element: ElementBuilder,
    system: Option<String>,
    version: Option<String>,
    code: Option<String>,
    display: Option<String>,
    user_selected: Option<bool>,
}

impl CodingBuilder {
    /// Set the local id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element = self.element.id(id);
        self
    }

    /// Append one extension
    pub fn add_extension(mut self, extension: Extension) -> Self {
        self.element = self.element.add_extension(extension);
        self
    }

    /// Replace the whole extension list
    pub fn extension(mut self, extension: Vec<Extension>) -> Self {
        self.element = self.element.extension(extension);
        self
    }

    /// Set the terminology system
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the system version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the code
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the display text
    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Set whether the user chose this coding directly
    pub fn user_selected(mut self, user_selected: bool) -> Self {
        self.user_selected = Some(user_selected);
        self
    }

    /// Enable or disable build-time validation
    pub fn validating(mut self, validating: bool) -> Self {
        self.element = self.element.validating(validating);
        self
    }

    /// Build the immutable coding, validating it first
    pub fn build(&self) -> Result<Coding> {
        let coding = Coding {
            element: self.element.build(),
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected,
        };
        if self.element.is_validating() {
            validate::require_value_or_children(&coding)?;
        }
        Ok(coding)
    }
}

impl From<&Coding> for CodingBuilder {
    fn from(coding: &Coding) -> Self {
        Self {
            element: ElementBuilder::from(&coding.element),
            system: coding.system.clone(),
            version: coding.version.clone(),
            code: coding.code.clone(),
            display: coding.display.clone(),
            user_selected: coding.user_selected,
        }
    }
}

/// A measured amount with an optional unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    element: ElementData,
    value: Option<Decimal>,
    unit: Option<String>,
    system: Option<String>,
    code: Option<String>,
}

impl Quantity {
    /// Create a builder for a quantity
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    /// Numerical value
    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    /// Human-readable unit representation
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// System that defines the coded unit form
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    /// Coded form of the unit
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl Element for Quantity {
    fn element(&self) -> &ElementData {
        &self.element
    }
}

impl Visitable for Quantity {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        walk(self, name, index, visitor, |v| {
            self.element.accept_children(v);
            if let Some(value) = &self.value {
                v.visit_decimal("value", None, value);
            }
            if let Some(unit) = &self.unit {
                v.visit_string("unit", None, unit);
            }
            if let Some(system) = &self.system {
                v.visit_string("system", None, system);
            }
            if let Some(code) = &self.code {
                v.visit_string("code", None, code);
            }
        });
    }

    fn type_name(&self) -> &'static str {
        "Quantity"
    }

    fn has_children(&self) -> bool {
        self.element.has_children()
            || self.value.is_some()
            || self.unit.is_some()
            || self.system.is_some()
            || self.code.is_some()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.element.cached_hash(|| {
            hash_of(&(
                &self.element,
                &self.value,
                &self.unit,
                &self.system,
                &self.code,
            ))
        }));
    }
}

/// Mutable accumulator for [`Quantity`]
#[derive(Debug, Clone, Default)]
pub struct QuantityBuilder {
    element: ElementBuilder,
    value: Option<Decimal>,
    unit: Option<String>,
    system: Option<String>,
    code: Option<String>,
}

impl QuantityBuilder {
    /// Set the local id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element = self.element.id(id);
        self
    }

    /// Append one extension
    pub fn add_extension(mut self, extension: Extension) -> Self {
        self.element = self.element.add_extension(extension);
        self
    }

    /// Set the numerical value
    pub fn value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the human-readable unit
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the system that defines the coded unit form
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the coded form of the unit
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Enable or disable build-time validation
    pub fn validating(mut self, validating: bool) -> Self {
        self.element = self.element.validating(validating);
        self
    }

    /// Build the immutable quantity, validating it first
    pub fn build(&self) -> Result<Quantity> {
        let quantity = Quantity {
            element: self.element.build(),
            value: self.value,
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
        };
        if self.element.is_validating() {
            validate::require_value_or_children(&quantity)?;
        }
        Ok(quantity)
    }
}

impl From<&Quantity> for QuantityBuilder {
    fn from(quantity: &Quantity) -> Self {
        Self {
            element: ElementBuilder::from(&quantity.element),
            value: quantity.value,
            unit: quantity.unit.clone(),
            system: quantity.system.clone(),
            code: quantity.code.clone(),
        }
    }
}

/// Metadata about a resource: version, last change, declared profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    element: ElementData,
    version_id: Option<String>,
    last_updated: Option<DateTime<FixedOffset>>,
    profile: Vec<String>,
}

impl Meta {
    /// Create a builder for resource metadata
    pub fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    /// Version-specific identifier
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// When the resource version last changed
    pub fn last_updated(&self) -> Option<&DateTime<FixedOffset>> {
        self.last_updated.as_ref()
    }

    /// Profiles the resource claims to conform to
    pub fn profile(&self) -> &[String] {
        &self.profile
    }
}

impl Element for Meta {
    fn element(&self) -> &ElementData {
        &self.element
    }
}

impl Visitable for Meta {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        walk(self, name, index, visitor, |v| {
            self.element.accept_children(v);
            if let Some(version_id) = &self.version_id {
                v.visit_string("versionId", None, version_id);
            }
            if let Some(last_updated) = &self.last_updated {
                v.visit_date_time("lastUpdated", None, last_updated);
            }
            walk_string_list(&self.profile, "profile", "uri", v);
        });
    }

    fn type_name(&self) -> &'static str {
        "Meta"
    }

    fn has_children(&self) -> bool {
        self.element.has_children()
            || self.version_id.is_some()
            || self.last_updated.is_some()
            || !self.profile.is_empty()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Hash for Meta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.element.cached_hash(|| {
            hash_of(&(
                &self.element,
                &self.version_id,
                &self.last_updated,
                &self.profile,
            ))
        }));
    }
}

/// Mutable accumulator for [`Meta`]
///
/// The profile list accumulates `Option` items because wire formats allow
/// sparse primitive arrays; `build()` densifies it and rejects absent
/// entries.
#[derive(Debug, Clone, Default)]
pub struct MetaBuilder {
    element: ElementBuilder,
    version_id: Option<String>,
    last_updated: Option<DateTime<FixedOffset>>,
    profile: Vec<Option<String>>,
}

impl MetaBuilder {
    /// Set the local id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element = self.element.id(id);
        self
    }

    /// Append one extension
    pub fn add_extension(mut self, extension: Extension) -> Self {
        self.element = self.element.add_extension(extension);
        self
    }

    /// Set the version-specific identifier
    pub fn version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    /// Set when the resource version last changed
    pub fn last_updated(mut self, last_updated: DateTime<FixedOffset>) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    /// Append one profile url
    pub fn add_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile.push(Some(profile.into()));
        self
    }

    /// Replace the whole profile list, absent entries included
    pub fn profile(mut self, profile: Vec<Option<String>>) -> Self {
        self.profile = profile;
        self
    }

    /// Enable or disable build-time validation
    pub fn validating(mut self, validating: bool) -> Self {
        self.element = self.element.validating(validating);
        self
    }

    /// Build the immutable metadata, validating it first
    pub fn build(&self) -> Result<Meta> {
        let profile = validate::check_list(self.profile.clone(), "profile")?;
        let meta = Meta {
            element: self.element.build(),
            version_id: self.version_id.clone(),
            last_updated: self.last_updated,
            profile,
        };
        if self.element.is_validating() {
            validate::require_value_or_children(&meta)?;
        }
        Ok(meta)
    }
}

impl From<&Meta> for MetaBuilder {
    fn from(meta: &Meta) -> Self {
        Self {
            element: ElementBuilder::from(&meta.element),
            version_id: meta.version_id.clone(),
            last_updated: meta.last_updated,
            profile: meta.profile.iter().cloned().map(Some).collect(),
        }
    }
}

/// Status of a narrative in relation to its resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NarrativeStatus {
    /// Generated entirely from the structured data
    Generated,
    /// Generated from the structured data plus extensions
    Extensions,
    /// Contains content not found in the structured data
    Additional,
    /// Excluded from the structured data on purpose
    Empty,
}

impl NarrativeStatus {
    /// The status code as it appears on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Extensions => "extensions",
            Self::Additional => "additional",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for NarrativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable summary of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    element: ElementData,
    status: NarrativeStatus,
    div: String,
}

impl Narrative {
    /// Create a builder for a narrative
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    /// Relation of the narrative to the structured data
    pub fn status(&self) -> NarrativeStatus {
        self.status
    }

    /// The xhtml content of the narrative
    pub fn div(&self) -> &str {
        &self.div
    }
}

impl Element for Narrative {
    fn element(&self) -> &ElementData {
        &self.element
    }
}

impl Visitable for Narrative {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        walk(self, name, index, visitor, |v| {
            self.element.accept_children(v);
            v.visit_string("status", None, self.status.as_str());
            v.visit_string("div", None, &self.div);
        });
    }

    fn type_name(&self) -> &'static str {
        "Narrative"
    }

    fn has_children(&self) -> bool {
        // status and div are always present
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Hash for Narrative {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(
            self.element
                .cached_hash(|| hash_of(&(&self.element, &self.status, &self.div))),
        );
    }
}

/// Mutable accumulator for [`Narrative`]
#[derive(Debug, Clone, Default)]
pub struct NarrativeBuilder {
    element: ElementBuilder,
    status: Option<NarrativeStatus>,
    div: Option<String>,
}

impl NarrativeBuilder {
    /// Set the local id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element = self.element.id(id);
        self
    }

    /// Set the narrative status
    pub fn status(mut self, status: NarrativeStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the xhtml content
    pub fn div(mut self, div: impl Into<String>) -> Self {
        self.div = Some(div.into());
        self
    }

    /// Enable or disable build-time validation
    pub fn validating(mut self, validating: bool) -> Self {
        self.element = self.element.validating(validating);
        self
    }

    /// Build the immutable narrative, validating it first
    pub fn build(&self) -> Result<Narrative> {
        let status = validate::require_non_null(self.status, "status")?;
        let div = validate::require_non_null(self.div.clone(), "div")?;
        Ok(Narrative {
            element: self.element.build(),
            status,
            div,
        })
    }
}

impl From<&Narrative> for NarrativeBuilder {
    fn from(narrative: &Narrative) -> Self {
        Self {
            element: ElementBuilder::from(&narrative.element),
            status: Some(narrative.status),
            div: Some(narrative.div.clone()),
        }
    }
}
