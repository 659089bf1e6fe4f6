//! Visitor traversal over immutable node trees
//!
//! Traversal is single-threaded, depth-first, pre-order, and deterministic:
//! fields in declaration order, then index order within list fields. For
//! each node the engine runs
//!
//! ```text
//! if visitor.pre_visit(node) {
//!     visitor.visit_start(name, index, node);
//!     if visitor.visit(name, index, node) {
//!         // children, in declaration order
//!     }
//!     visitor.visit_end(name, index, node);
//!     visitor.post_visit(node);
//! }
//! ```
//!
//! Returning `false` from [`Visitor::pre_visit`] skips the whole subtree
//! including `visit_end`/`post_visit`; returning `false` from
//! [`Visitor::visit`] skips only the children. Visitors never mutate the
//! tree; a transforming visitor accumulates its output externally.

use std::any::Any;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

/// A node that can be traversed by a [`Visitor`]
pub trait Visitable: fmt::Debug {
    /// Accept a visitor under the given field name and list index
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor);

    /// The node's type name, used for dispatch and diagnostics
    fn type_name(&self) -> &'static str;

    /// Whether any scalar field is set or any list field is non-empty
    fn has_children(&self) -> bool;

    /// Whether the node carries a primitive value of its own
    fn has_value(&self) -> bool {
        false
    }

    /// Upcast for consumers that dispatch on the concrete type
    fn as_any(&self) -> &dyn Any;
}

/// Hooks invoked during traversal; every hook has a no-op default
pub trait Visitor {
    /// Gate for a node; `false` skips the subtree entirely
    fn pre_visit(&mut self, _node: &dyn Visitable) -> bool {
        true
    }

    /// Called after a node's subtree has been fully traversed
    fn post_visit(&mut self, _node: &dyn Visitable) {}

    /// Called when a node is entered
    fn visit_start(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {}

    /// Gate for a node's children; `false` still runs `visit_end`
    fn visit(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) -> bool {
        true
    }

    /// Called when a node is left
    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {}

    /// Called before the elements of a non-empty list field
    fn visit_list_start(&mut self, _name: &str, _type_name: &'static str, _len: usize) {}

    /// Called after the elements of a non-empty list field
    fn visit_list_end(&mut self, _name: &str, _type_name: &'static str, _len: usize) {}

    /// A boolean field value
    fn visit_boolean(&mut self, _name: &str, _index: Option<usize>, _value: bool) {}

    /// An integer field value
    fn visit_integer(&mut self, _name: &str, _index: Option<usize>, _value: i32) {}

    /// A decimal field value
    fn visit_decimal(&mut self, _name: &str, _index: Option<usize>, _value: &Decimal) {}

    /// A string-kind field value (string, uri, code, markdown, id)
    fn visit_string(&mut self, _name: &str, _index: Option<usize>, _value: &str) {}

    /// A date field value
    fn visit_date(&mut self, _name: &str, _index: Option<usize>, _value: &NaiveDate) {}

    /// A date-time field value
    fn visit_date_time(
        &mut self,
        _name: &str,
        _index: Option<usize>,
        _value: &DateTime<FixedOffset>,
    ) {
    }

    /// A time field value
    fn visit_time(&mut self, _name: &str, _index: Option<usize>, _value: &NaiveTime) {}
}

/// Run the per-node traversal protocol around a children closure
///
/// Generated `accept` implementations delegate here so the gating order is
/// written exactly once.
pub fn walk<N, F>(
    node: &N,
    name: &str,
    index: Option<usize>,
    visitor: &mut dyn Visitor,
    children: F,
) where
    N: Visitable,
    F: FnOnce(&mut dyn Visitor),
{
    if !visitor.pre_visit(node) {
        return;
    }
    visitor.visit_start(name, index, node);
    if visitor.visit(name, index, node) {
        children(visitor);
    }
    visitor.visit_end(name, index, node);
    visitor.post_visit(node);
}

/// Traverse a whole tree starting at its root node
pub fn walk_root(node: &dyn Visitable, visitor: &mut dyn Visitor) {
    node.accept(node.type_name(), None, visitor);
}

/// Visit an optional composite child
pub fn walk_optional<T: Visitable>(node: &Option<T>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(node) = node {
        node.accept(name, None, visitor);
    }
}

/// Visit a list field, one indexed call per element
///
/// Empty lists emit nothing. The element type name is passed through to
/// the list hooks so polymorphic consumers can dispatch without inspecting
/// elements.
pub fn walk_list<T: Visitable>(
    nodes: &[T],
    name: &str,
    type_name: &'static str,
    visitor: &mut dyn Visitor,
) {
    if nodes.is_empty() {
        return;
    }
    visitor.visit_list_start(name, type_name, nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        node.accept(name, Some(index), visitor);
    }
    visitor.visit_list_end(name, type_name, nodes.len());
}

/// Visit a repeating string-kind field, one indexed call per element
pub fn walk_string_list(
    values: &[String],
    name: &str,
    type_name: &'static str,
    visitor: &mut dyn Visitor,
) {
    if values.is_empty() {
        return;
    }
    visitor.visit_list_start(name, type_name, values.len());
    for (index, value) in values.iter().enumerate() {
        visitor.visit_string(name, Some(index), value);
    }
    visitor.visit_list_end(name, type_name, values.len());
}
