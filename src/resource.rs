//! Resource roots and contained sub-resources
//!
//! A resource is the top of a document tree: a backbone-like shape that
//! additionally carries a logical id, version metadata, an implicit-rules
//! reference, a language tag, a narrative and locally contained
//! sub-resources. Contained resources have no identity outside their
//! parent; they are held as shared immutable trees behind `Arc`.
//!
//! Concrete resource types are generated elsewhere and embed
//! [`ResourceData`] the way elements embed
//! [`ElementData`](crate::element::ElementData). Because `contained` is
//! heterogeneous, the [`Resource`] trait bridges structural equality and
//! hashing across trait objects.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::datatypes::{Meta, Narrative};
use crate::element::HashCache;
use crate::extension::Extension;
use crate::visitor::{Visitable, Visitor, walk_list, walk_optional};

/// Capability trait for any resource root
pub trait Resource: Visitable + Send + Sync {
    /// The shared resource header of this node
    fn resource(&self) -> &ResourceData;

    /// Structural equality across resource trait objects
    ///
    /// Implementations downcast and delegate to `PartialEq`:
    /// `other.as_any().downcast_ref::<Self>().is_some_and(|o| self == o)`.
    fn equals_resource(&self, other: &dyn Resource) -> bool;

    /// Structural hash of the whole subtree, memoized per node
    fn structural_hash(&self) -> u64;

    /// The resource type name
    fn resource_type(&self) -> &'static str {
        self.type_name()
    }

    /// Logical id of the resource
    fn id(&self) -> Option<&str> {
        self.resource().id()
    }

    /// Metadata about the resource
    fn meta(&self) -> Option<&Meta> {
        self.resource().meta()
    }

    /// Reference to the rules the content was constructed under
    fn implicit_rules(&self) -> Option<&str> {
        self.resource().implicit_rules()
    }

    /// Base language of the content
    fn language(&self) -> Option<&str> {
        self.resource().language()
    }

    /// Human-readable narrative
    fn text(&self) -> Option<&Narrative> {
        self.resource().text()
    }

    /// Resources contained in this one, in insertion order
    fn contained(&self) -> &[Arc<dyn Resource>] {
        self.resource().contained()
    }

    /// Extensions attached to the resource, in insertion order
    fn extension(&self) -> &[Extension] {
        self.resource().extension()
    }

    /// Modifier extensions, in insertion order
    fn modifier_extension(&self) -> &[Extension] {
        self.resource().modifier_extension()
    }
}

/// Header state every resource carries
#[derive(Debug, Clone)]
pub struct ResourceData {
    id: Option<String>,
    meta: Option<Meta>,
    implicit_rules: Option<String>,
    language: Option<String>,
    text: Option<Narrative>,
    contained: Vec<Arc<dyn Resource>>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    hash: HashCache,
}

impl ResourceData {
    /// Create a builder for a resource header
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::default()
    }

    /// Logical id of the resource
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Metadata about the resource
    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// Reference to the rules the content was constructed under
    pub fn implicit_rules(&self) -> Option<&str> {
        self.implicit_rules.as_deref()
    }

    /// Base language of the content
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Human-readable narrative
    pub fn text(&self) -> Option<&Narrative> {
        self.text.as_ref()
    }

    /// Resources contained in this one, in insertion order
    pub fn contained(&self) -> &[Arc<dyn Resource>] {
        &self.contained
    }

    /// Extensions attached to the resource, in insertion order
    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    /// Modifier extensions, in insertion order
    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    /// Whether the header carries any content
    pub fn has_children(&self) -> bool {
        self.id.is_some()
            || self.meta.is_some()
            || self.implicit_rules.is_some()
            || self.language.is_some()
            || self.text.is_some()
            || !self.contained.is_empty()
            || !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
    }

    /// Memoize a structural hash for the node embedding this header
    pub fn cached_hash(&self, compute: impl FnOnce() -> u64) -> u64 {
        self.hash.get_or_compute(compute)
    }

    /// Emit the shared resource children to a visitor
    ///
    /// Order is fixed: id, meta, implicitRules, language, text, contained,
    /// extension, modifierExtension, then the concrete type's own fields.
    pub fn accept_children(&self, visitor: &mut dyn Visitor) {
        if let Some(id) = &self.id {
            visitor.visit_string("id", None, id);
        }
        walk_optional(&self.meta, "meta", visitor);
        if let Some(implicit_rules) = &self.implicit_rules {
            visitor.visit_string("implicitRules", None, implicit_rules);
        }
        if let Some(language) = &self.language {
            visitor.visit_string("language", None, language);
        }
        walk_optional(&self.text, "text", visitor);
        if !self.contained.is_empty() {
            visitor.visit_list_start("contained", "Resource", self.contained.len());
            for (index, resource) in self.contained.iter().enumerate() {
                resource.accept("contained", Some(index), visitor);
            }
            visitor.visit_list_end("contained", "Resource", self.contained.len());
        }
        walk_list(&self.extension, "extension", "Extension", visitor);
        walk_list(
            &self.modifier_extension,
            "modifierExtension",
            "Extension",
            visitor,
        );
    }
}

impl PartialEq for ResourceData {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.meta == other.meta
            && self.implicit_rules == other.implicit_rules
            && self.language == other.language
            && self.text == other.text
            && self.contained.len() == other.contained.len()
            && self
                .contained
                .iter()
                .zip(&other.contained)
                .all(|(a, b)| a.equals_resource(b.as_ref()))
            && self.extension == other.extension
            && self.modifier_extension == other.modifier_extension
    }
}

impl Eq for ResourceData {}

impl Hash for ResourceData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.meta.hash(state);
        self.implicit_rules.hash(state);
        self.language.hash(state);
        self.text.hash(state);
        for resource in &self.contained {
            state.write_u64(resource.structural_hash());
        }
        self.extension.hash(state);
        self.modifier_extension.hash(state);
    }
}

/// Mutable accumulator for [`ResourceData`]
#[derive(Debug, Clone)]
pub struct ResourceBuilder {
    id: Option<String>,
    meta: Option<Meta>,
    implicit_rules: Option<String>,
    language: Option<String>,
    text: Option<Narrative>,
    contained: Vec<Arc<dyn Resource>>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    validating: bool,
}

impl Default for ResourceBuilder {
    fn default() -> Self {
        Self {
            id: None,
            meta: None,
            implicit_rules: None,
            language: None,
            text: None,
            contained: Vec::new(),
            extension: Vec::new(),
            modifier_extension: Vec::new(),
            validating: true,
        }
    }
}

impl ResourceBuilder {
    /// Set the logical id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the resource metadata
    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Set the implicit-rules reference
    pub fn implicit_rules(mut self, implicit_rules: impl Into<String>) -> Self {
        self.implicit_rules = Some(implicit_rules.into());
        self
    }

    /// Set the base language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the narrative
    pub fn text(mut self, text: Narrative) -> Self {
        self.text = Some(text);
        self
    }

    /// Append one contained resource
    pub fn add_contained(mut self, resource: Arc<dyn Resource>) -> Self {
        self.contained.push(resource);
        self
    }

    /// Replace the whole contained list
    pub fn contained(mut self, contained: Vec<Arc<dyn Resource>>) -> Self {
        self.contained = contained;
        self
    }

    /// Append one extension
    pub fn add_extension(mut self, extension: Extension) -> Self {
        self.extension.push(extension);
        self
    }

    /// Replace the whole extension list
    pub fn extension(mut self, extension: Vec<Extension>) -> Self {
        self.extension = extension;
        self
    }

    /// Append one modifier extension
    pub fn add_modifier_extension(mut self, extension: Extension) -> Self {
        self.modifier_extension.push(extension);
        self
    }

    /// Replace the whole modifier extension list
    pub fn modifier_extension(mut self, extension: Vec<Extension>) -> Self {
        self.modifier_extension = extension;
        self
    }

    /// Enable or disable build-time validation for the owning builder
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Whether the owning builder should run validation at build time
    pub fn is_validating(&self) -> bool {
        self.validating
    }

    /// Freeze the accumulated state into an immutable resource header
    pub fn build(&self) -> ResourceData {
        ResourceData {
            id: self.id.clone(),
            meta: self.meta.clone(),
            implicit_rules: self.implicit_rules.clone(),
            language: self.language.clone(),
            text: self.text.clone(),
            contained: self.contained.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            hash: HashCache::new(),
        }
    }
}

impl From<&ResourceData> for ResourceBuilder {
    fn from(data: &ResourceData) -> Self {
        Self {
            id: data.id.clone(),
            meta: data.meta.clone(),
            implicit_rules: data.implicit_rules.clone(),
            language: data.language.clone(),
            text: data.text.clone(),
            contained: data.contained.clone(),
            extension: data.extension.clone(),
            modifier_extension: data.modifier_extension.clone(),
            validating: true,
        }
    }
}

/// Downcast-based equality helper for generated `equals_resource` impls
pub fn resource_eq<T: Resource + PartialEq + 'static>(left: &T, right: &dyn Resource) -> bool {
    right
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|right| left == right)
}
