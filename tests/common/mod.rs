//! Generated-style node shapes used by the integration tests
//!
//! These mirror what a code generator emits on top of the runtime: a
//! capability-statement-like resource with two backbone elements and a
//! choice-typed element. Shapes embed the base data structs, delegate the
//! shared setters, and call the validation engine in declaration order.

#![allow(dead_code)]

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use octofhir_fhirmodel::{
    BackboneBuilder, BackboneData, BackboneElement, DataType, DataValue, Element, ElementBuilder,
    ElementData, Extension, Meta, Narrative, Resource, ResourceBuilder, ResourceData, Result,
    Visitable, Visitor, hash_of, resource_eq, validate, walk, walk_list, walk_optional,
    walk_string_list,
};

/// Software component backing a capability declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Software {
    backbone: BackboneData,
    name: String,
    version: Option<String>,
    release_date: Option<DateTime<FixedOffset>>,
}

impl Software {
    pub fn builder() -> SoftwareBuilder {
        SoftwareBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn release_date(&self) -> Option<&DateTime<FixedOffset>> {
        self.release_date.as_ref()
    }
}

impl Element for Software {
    fn element(&self) -> &ElementData {
        self.backbone.element()
    }
}

impl BackboneElement for Software {
    fn backbone(&self) -> &BackboneData {
        &self.backbone
    }
}

impl Visitable for Software {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        walk(self, name, index, visitor, |v| {
            self.backbone.accept_children(v);
            v.visit_string("name", None, &self.name);
            if let Some(version) = &self.version {
                v.visit_string("version", None, version);
            }
            if let Some(release_date) = &self.release_date {
                v.visit_date_time("releaseDate", None, release_date);
            }
        });
    }

    fn type_name(&self) -> &'static str {
        "Software"
    }

    fn has_children(&self) -> bool {
        // name is always present
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Hash for Software {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.backbone.cached_hash(|| {
            hash_of(&(
                &self.backbone,
                &self.name,
                &self.version,
                &self.release_date,
            ))
        }));
    }
}

#[derive(Debug, Clone, Default)]
pub struct SoftwareBuilder {
    backbone: BackboneBuilder,
    name: Option<String>,
    version: Option<String>,
    release_date: Option<DateTime<FixedOffset>>,
}

impl SoftwareBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.backbone = self.backbone.id(id);
        self
    }

    pub fn add_extension(mut self, extension: Extension) -> Self {
        self.backbone = self.backbone.add_extension(extension);
        self
    }

    pub fn add_modifier_extension(mut self, extension: Extension) -> Self {
        self.backbone = self.backbone.add_modifier_extension(extension);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn release_date(mut self, release_date: DateTime<FixedOffset>) -> Self {
        self.release_date = Some(release_date);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.backbone = self.backbone.validating(validating);
        self
    }

    pub fn build(&self) -> Result<Software> {
        let name = validate::require_non_null(self.name.clone(), "name")?;
        let software = Software {
            backbone: self.backbone.build(),
            name,
            version: self.version.clone(),
            release_date: self.release_date,
        };
        if self.backbone.is_validating() {
            validate::require_value_or_children(&software)?;
        }
        Ok(software)
    }
}

impl From<&Software> for SoftwareBuilder {
    fn from(software: &Software) -> Self {
        Self {
            backbone: BackboneBuilder::from(&software.backbone),
            name: Some(software.name.clone()),
            version: software.version.clone(),
            release_date: software.release_date,
        }
    }
}

/// Restful interaction supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionCode {
    Read,
    Vread,
    Update,
    Delete,
    Create,
    SearchType,
}

impl InteractionCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Vread => "vread",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Create => "create",
            Self::SearchType => "search-type",
        }
    }
}

impl fmt::Display for InteractionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One restful interaction declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    backbone: BackboneData,
    code: InteractionCode,
    documentation: Option<String>,
}

impl Interaction {
    pub fn builder() -> InteractionBuilder {
        InteractionBuilder::default()
    }

    pub fn code(&self) -> InteractionCode {
        self.code
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }
}

impl Element for Interaction {
    fn element(&self) -> &ElementData {
        self.backbone.element()
    }
}

impl BackboneElement for Interaction {
    fn backbone(&self) -> &BackboneData {
        &self.backbone
    }
}

impl Visitable for Interaction {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        walk(self, name, index, visitor, |v| {
            self.backbone.accept_children(v);
            v.visit_string("code", None, self.code.as_str());
            if let Some(documentation) = &self.documentation {
                v.visit_string("documentation", None, documentation);
            }
        });
    }

    fn type_name(&self) -> &'static str {
        "Interaction"
    }

    fn has_children(&self) -> bool {
        // code is always present
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Hash for Interaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.backbone.cached_hash(|| {
            hash_of(&(&self.backbone, &self.code, &self.documentation))
        }));
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionBuilder {
    backbone: BackboneBuilder,
    code: Option<InteractionCode>,
    documentation: Option<String>,
}

impl InteractionBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.backbone = self.backbone.id(id);
        self
    }

    pub fn add_extension(mut self, extension: Extension) -> Self {
        self.backbone = self.backbone.add_extension(extension);
        self
    }

    pub fn add_modifier_extension(mut self, extension: Extension) -> Self {
        self.backbone = self.backbone.add_modifier_extension(extension);
        self
    }

    pub fn code(mut self, code: InteractionCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.backbone = self.backbone.validating(validating);
        self
    }

    pub fn build(&self) -> Result<Interaction> {
        let code = validate::require_non_null(self.code, "code")?;
        let interaction = Interaction {
            backbone: self.backbone.build(),
            code,
            documentation: self.documentation.clone(),
        };
        if self.backbone.is_validating() {
            validate::require_value_or_children(&interaction)?;
        }
        Ok(interaction)
    }
}

impl From<&Interaction> for InteractionBuilder {
    fn from(interaction: &Interaction) -> Self {
        Self {
            backbone: BackboneBuilder::from(&interaction.backbone),
            code: Some(interaction.code),
            documentation: interaction.documentation.clone(),
        }
    }
}

/// Element with a choice-typed value restricted to a declared set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    element: ElementData,
    value: DataValue,
}

impl Measurement {
    /// Types the value field may carry
    pub const VALUE_TYPES: &'static [DataType] =
        &[DataType::Quantity, DataType::Decimal, DataType::String];

    pub fn builder() -> MeasurementBuilder {
        MeasurementBuilder::default()
    }

    pub fn value(&self) -> &DataValue {
        &self.value
    }
}

impl Element for Measurement {
    fn element(&self) -> &ElementData {
        &self.element
    }
}

impl Visitable for Measurement {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        walk(self, name, index, visitor, |v| {
            self.element.accept_children(v);
            self.value.accept("value", None, v);
        });
    }

    fn type_name(&self) -> &'static str {
        "Measurement"
    }

    fn has_children(&self) -> bool {
        // value is always present
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Hash for Measurement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(
            self.element
                .cached_hash(|| hash_of(&(&self.element, &self.value))),
        );
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeasurementBuilder {
    element: ElementBuilder,
    value: Option<DataValue>,
}

impl MeasurementBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element = self.element.id(id);
        self
    }

    pub fn add_extension(mut self, extension: Extension) -> Self {
        self.element = self.element.add_extension(extension);
        self
    }

    pub fn value(mut self, value: impl Into<DataValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.element = self.element.validating(validating);
        self
    }

    pub fn build(&self) -> Result<Measurement> {
        let value = if self.element.is_validating() {
            validate::require_choice_type(self.value.clone(), "value", Measurement::VALUE_TYPES)?
        } else {
            validate::require_non_null(self.value.clone(), "value")?
        };
        Ok(Measurement {
            element: self.element.build(),
            value,
        })
    }
}

impl From<&Measurement> for MeasurementBuilder {
    fn from(measurement: &Measurement) -> Self {
        Self {
            element: ElementBuilder::from(measurement.element()),
            value: Some(measurement.value.clone()),
        }
    }
}

/// Capability declaration resource
///
/// The formats list has cardinality 1..* and accumulates like any wire
/// primitive list; software and interactions are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    resource: ResourceData,
    format: Vec<String>,
    software: Option<Software>,
    interaction: Vec<Interaction>,
}

impl Capability {
    pub fn builder() -> CapabilityBuilder {
        CapabilityBuilder::default()
    }

    pub fn format(&self) -> &[String] {
        &self.format
    }

    pub fn software(&self) -> Option<&Software> {
        self.software.as_ref()
    }

    pub fn interaction(&self) -> &[Interaction] {
        &self.interaction
    }
}

impl Resource for Capability {
    fn resource(&self) -> &ResourceData {
        &self.resource
    }

    fn equals_resource(&self, other: &dyn Resource) -> bool {
        resource_eq(self, other)
    }

    fn structural_hash(&self) -> u64 {
        hash_of(self)
    }
}

impl Visitable for Capability {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        walk(self, name, index, visitor, |v| {
            self.resource.accept_children(v);
            walk_string_list(&self.format, "format", "code", v);
            walk_optional(&self.software, "software", v);
            walk_list(&self.interaction, "interaction", "Interaction", v);
        });
    }

    fn type_name(&self) -> &'static str {
        "Capability"
    }

    fn has_children(&self) -> bool {
        self.resource.has_children()
            || !self.format.is_empty()
            || self.software.is_some()
            || !self.interaction.is_empty()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.resource.cached_hash(|| {
            hash_of(&(
                &self.resource,
                &self.format,
                &self.software,
                &self.interaction,
            ))
        }));
    }
}

#[derive(Debug, Clone, Default)]
pub struct CapabilityBuilder {
    resource: ResourceBuilder,
    format: Vec<Option<String>>,
    software: Option<Software>,
    interaction: Vec<Interaction>,
}

impl CapabilityBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.resource = self.resource.id(id);
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.resource = self.resource.meta(meta);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.resource = self.resource.language(language);
        self
    }

    pub fn text(mut self, text: Narrative) -> Self {
        self.resource = self.resource.text(text);
        self
    }

    pub fn add_contained(mut self, resource: Arc<dyn Resource>) -> Self {
        self.resource = self.resource.add_contained(resource);
        self
    }

    pub fn add_extension(mut self, extension: Extension) -> Self {
        self.resource = self.resource.add_extension(extension);
        self
    }

    pub fn add_modifier_extension(mut self, extension: Extension) -> Self {
        self.resource = self.resource.add_modifier_extension(extension);
        self
    }

    pub fn add_format(mut self, format: impl Into<String>) -> Self {
        self.format.push(Some(format.into()));
        self
    }

    pub fn format(mut self, format: Vec<Option<String>>) -> Self {
        self.format = format;
        self
    }

    pub fn software(mut self, software: Software) -> Self {
        self.software = Some(software);
        self
    }

    pub fn add_interaction(mut self, interaction: Interaction) -> Self {
        self.interaction.push(interaction);
        self
    }

    pub fn interaction(mut self, interaction: Vec<Interaction>) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.resource = self.resource.validating(validating);
        self
    }

    pub fn build(&self) -> Result<Capability> {
        let format = validate::check_list(self.format.clone(), "format")?;
        let capability = Capability {
            resource: self.resource.build(),
            format,
            software: self.software.clone(),
            interaction: self.interaction.clone(),
        };
        if self.resource.is_validating() {
            validate::check_non_empty_list(&capability.format, "format")?;
        }
        Ok(capability)
    }
}

impl From<&Capability> for CapabilityBuilder {
    fn from(capability: &Capability) -> Self {
        Self {
            resource: ResourceBuilder::from(capability.resource()),
            format: capability.format.iter().cloned().map(Some).collect(),
            software: capability.software.clone(),
            interaction: capability.interaction.clone(),
        }
    }
}
