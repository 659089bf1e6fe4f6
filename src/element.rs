//! Base element lattice shared by every node type
//!
//! Concrete node types are generated elsewhere; what they share is carried
//! here by composition. [`ElementData`] holds the local id and extension
//! list every element has, [`BackboneData`] adds the modifier extensions,
//! and the [`Element`]/[`BackboneElement`] traits give consumers uniform
//! access regardless of the concrete shape. Node trees are immutable after
//! construction; the only hidden mutable state is the memoized structural
//! hash in [`HashCache`].

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::extension::Extension;
use crate::visitor::{Visitable, Visitor, walk_list};

/// Lazily memoized structural hash slot
///
/// The first call to [`HashCache::get_or_compute`] stores the computed
/// value; later calls return it without recomputing. Writes are relaxed
/// atomics: a race between first computations merely repeats idempotent
/// work, it can never surface an inconsistent value. A computed hash of
/// zero is indistinguishable from the unset state and is recomputed on
/// demand.
#[derive(Debug, Default)]
pub struct HashCache(AtomicU64);

impl HashCache {
    /// Create an empty cache slot
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Return the cached hash, computing and storing it on first use
    pub fn get_or_compute(&self, compute: impl FnOnce() -> u64) -> u64 {
        let cached = self.0.load(Ordering::Relaxed);
        if cached != 0 {
            return cached;
        }
        let computed = compute();
        self.0.store(computed, Ordering::Relaxed);
        computed
    }
}

impl Clone for HashCache {
    fn clone(&self) -> Self {
        // a clone is a distinct node; it recomputes the same value
        Self::new()
    }
}

impl PartialEq for HashCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HashCache {}

/// Hash a value with the standard hasher and return the 64-bit digest
pub fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// State every element carries: local id, extensions, hash memo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    id: Option<String>,
    extension: Vec<Extension>,
    hash: HashCache,
}

impl ElementData {
    /// Create a builder for element state
    pub fn builder() -> ElementBuilder {
        ElementBuilder::default()
    }

    /// Local identifier for intra-document references
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Extensions attached to the element, in insertion order
    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    /// Whether the element state carries any child content
    pub fn has_children(&self) -> bool {
        !self.extension.is_empty()
    }

    /// Memoize a structural hash for the node embedding this state
    pub fn cached_hash(&self, compute: impl FnOnce() -> u64) -> u64 {
        self.hash.get_or_compute(compute)
    }

    /// Emit the shared children (id, extension) to a visitor
    pub fn accept_children(&self, visitor: &mut dyn Visitor) {
        if let Some(id) = &self.id {
            visitor.visit_string("id", None, id);
        }
        walk_list(&self.extension, "extension", "Extension", visitor);
    }
}

impl Hash for ElementData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.extension.hash(state);
    }
}

/// Mutable accumulator for [`ElementData`]
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    validating: bool,
}

impl Default for ElementBuilder {
    fn default() -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            validating: true,
        }
    }
}

impl ElementBuilder {
    /// Set the local id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
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

    /// Enable or disable build-time validation for the owning builder
    ///
    /// Trusted producers (a parser re-reading content this model already
    /// validated) may switch the engine off; structural requirements
    /// implied by a node's shape still apply.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    /// Whether the owning builder should run validation at build time
    pub fn is_validating(&self) -> bool {
        self.validating
    }

    /// Freeze the accumulated state into immutable element data
    ///
    /// Copy-on-build: the builder keeps its slots, and element data built
    /// earlier is never aliased by later mutation.
    pub fn build(&self) -> ElementData {
        ElementData {
            id: self.id.clone(),
            extension: self.extension.clone(),
            hash: HashCache::new(),
        }
    }
}

impl From<&ElementData> for ElementBuilder {
    fn from(data: &ElementData) -> Self {
        Self {
            id: data.id.clone(),
            extension: data.extension.clone(),
            validating: true,
        }
    }
}

/// State every backbone element carries on top of [`ElementData`]
///
/// Modifier extensions change the meaning of the element that carries them
/// and must never be silently ignored by a consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackboneData {
    element: ElementData,
    modifier_extension: Vec<Extension>,
}

impl BackboneData {
    /// Create a builder for backbone state
    pub fn builder() -> BackboneBuilder {
        BackboneBuilder::default()
    }

    /// The element state underneath
    pub fn element(&self) -> &ElementData {
        &self.element
    }

    /// Modifier extensions, in insertion order
    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    /// Whether the backbone state carries any child content
    pub fn has_children(&self) -> bool {
        self.element.has_children() || !self.modifier_extension.is_empty()
    }

    /// Memoize a structural hash for the node embedding this state
    pub fn cached_hash(&self, compute: impl FnOnce() -> u64) -> u64 {
        self.element.cached_hash(compute)
    }

    /// Emit the shared children (id, extension, modifierExtension)
    pub fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        walk_list(
            &self.modifier_extension,
            "modifierExtension",
            "Extension",
            visitor,
        );
    }
}

impl Hash for BackboneData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.element.hash(state);
        self.modifier_extension.hash(state);
    }
}

/// Mutable accumulator for [`BackboneData`]
#[derive(Debug, Clone, Default)]
pub struct BackboneBuilder {
    element: ElementBuilder,
    modifier_extension: Vec<Extension>,
}

impl BackboneBuilder {
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
        self.element = self.element.validating(validating);
        self
    }

    /// Whether the owning builder should run validation at build time
    pub fn is_validating(&self) -> bool {
        self.element.is_validating()
    }

    /// Freeze the accumulated state into immutable backbone data
    pub fn build(&self) -> BackboneData {
        BackboneData {
            element: self.element.build(),
            modifier_extension: self.modifier_extension.clone(),
        }
    }
}

impl From<&BackboneData> for BackboneBuilder {
    fn from(data: &BackboneData) -> Self {
        Self {
            element: ElementBuilder::from(&data.element),
            modifier_extension: data.modifier_extension.clone(),
        }
    }
}

/// Capability trait for any node with element state
pub trait Element: Visitable {
    /// The element state of this node
    fn element(&self) -> &ElementData;

    /// Local identifier for intra-document references
    fn id(&self) -> Option<&str> {
        self.element().id()
    }

    /// Extensions attached to this node, in insertion order
    fn extension(&self) -> &[Extension] {
        self.element().extension()
    }
}

/// Capability trait for nodes that also carry modifier extensions
pub trait BackboneElement: Element {
    /// The backbone state of this node
    fn backbone(&self) -> &BackboneData;

    /// Modifier extensions, in insertion order
    fn modifier_extension(&self) -> &[Extension] {
        self.backbone().modifier_extension()
    }
}
