//! Extension nodes
//!
//! Every element in the tree accepts optional extensions: url-keyed
//! attachments that carry either a choice value or further nested
//! extensions. An extension with neither is meaningless and is rejected at
//! build time.

use std::hash::{Hash, Hasher};

use crate::element::{Element, ElementBuilder, ElementData, hash_of};
use crate::error::Result;
use crate::validate;
use crate::value::{DataType, DataValue};
use crate::visitor::{Visitable, Visitor, walk};

/// A url-keyed attachment extending any element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    element: ElementData,
    url: String,
    value: Option<DataValue>,
}

impl Extension {
    /// Types an extension value may carry
    pub const VALUE_TYPES: &'static [DataType] = DataType::ALL;

    /// Create a builder for an extension
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    /// The url identifying the meaning of the extension
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The attached value, if the extension carries one
    pub fn value(&self) -> Option<&DataValue> {
        self.value.as_ref()
    }
}

impl Element for Extension {
    fn element(&self) -> &ElementData {
        &self.element
    }
}

impl Visitable for Extension {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        walk(self, name, index, visitor, |v| {
            self.element.accept_children(v);
            v.visit_string("url", None, &self.url);
            if let Some(value) = &self.value {
                value.accept("value", None, v);
            }
        });
    }

    fn type_name(&self) -> &'static str {
        "Extension"
    }

    fn has_children(&self) -> bool {
        self.element.has_children() || self.value.is_some()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Hash for Extension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(
            self.element
                .cached_hash(|| hash_of(&(&self.element, &self.url, &self.value))),
        );
    }
}

/// Mutable accumulator for [`Extension`]
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    element: ElementBuilder,
    url: Option<String>,
    value: Option<DataValue>,
}

impl ExtensionBuilder {
    /// Set the local id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element = self.element.id(id);
        self
    }

    /// Append one nested extension
    pub fn add_extension(mut self, extension: Extension) -> Self {
        self.element = self.element.add_extension(extension);
        self
    }

    /// Replace the whole nested extension list
    pub fn extension(mut self, extension: Vec<Extension>) -> Self {
        self.element = self.element.extension(extension);
        self
    }

    /// Set the url identifying the meaning of the extension
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the attached value
    pub fn value(mut self, value: impl Into<DataValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Enable or disable build-time validation
    pub fn validating(mut self, validating: bool) -> Self {
        self.element = self.element.validating(validating);
        self
    }

    /// Build the immutable extension, validating it first
    pub fn build(&self) -> Result<Extension> {
        let url = validate::require_non_null(self.url.clone(), "url")?;
        let extension = Extension {
            element: self.element.build(),
            url,
            value: self.value.clone(),
        };
        if self.element.is_validating() {
            if let Some(value) = extension.value() {
                validate::choice_type(value, "value", Extension::VALUE_TYPES)?;
            }
            validate::require_value_or_children(&extension)?;
        }
        Ok(extension)
    }
}

impl From<&Extension> for ExtensionBuilder {
    fn from(extension: &Extension) -> Self {
        Self {
            element: ElementBuilder::from(&extension.element),
            url: Some(extension.url.clone()),
            value: extension.value.clone(),
        }
    }
}
