//! Template tree visitor.
//!
//! Implement `Visitor` and override the `visit_*` methods of interest.
//! Call the matching `walk_*` function from an override to keep descending,
//! or leave it out to skip the subtree.
//!
//! ```ignore
//! impl Visitor for Counter {
//!     fn visit_element(&mut self, el: &Element) {
//!         self.count += 1;
//!         walk_element(self, el);
//!     }
//! }
//! ```

use crate::ast::{
    Attribute, CallTemplate, Element, ElementComponent, Node, TemplateFile, TopLevelNode,
};

pub trait Visitor: Sized {
    fn visit_file(&mut self, file: &TemplateFile) {
        walk_file(self, file);
    }

    fn visit_top_level(&mut self, node: &TopLevelNode) {
        walk_top_level(self, node);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_element(&mut self, el: &Element) {
        walk_element(self, el);
    }

    fn visit_element_component(&mut self, component: &ElementComponent) {
        walk_element_component(self, component);
    }

    fn visit_call(&mut self, call: &CallTemplate) {
        walk_call(self, call);
    }

    fn visit_attributes(&mut self, _attrs: &[Attribute]) {}
}

pub fn walk_file<V: Visitor>(visitor: &mut V, file: &TemplateFile) {
    for node in &file.nodes {
        visitor.visit_top_level(node);
    }
}

pub fn walk_top_level<V: Visitor>(visitor: &mut V, node: &TopLevelNode) {
    if let TopLevelNode::Template(template) = node {
        walk_nodes(visitor, &template.children);
    }
}

pub fn walk_nodes<V: Visitor>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    match node {
        Node::Element(el) => visitor.visit_element(el),
        Node::ElementComponent(component) => visitor.visit_element_component(component),
        Node::CallTemplate(call) => visitor.visit_call(call),
        Node::RawElement(raw) => visitor.visit_attributes(&raw.attributes),
        Node::If(if_expr) => {
            walk_nodes(visitor, &if_expr.then);
            for branch in &if_expr.else_ifs {
                walk_nodes(visitor, &branch.then);
            }
            if let Some(otherwise) = &if_expr.otherwise {
                walk_nodes(visitor, otherwise);
            }
        }
        Node::Switch(switch) => {
            for case in &switch.cases {
                walk_nodes(visitor, &case.children);
            }
        }
        Node::For(for_expr) => walk_nodes(visitor, &for_expr.children),
        Node::Fragment(fragment) => walk_nodes(visitor, &fragment.children),
        Node::Text(_)
        | Node::DocType(_)
        | Node::Comment(_)
        | Node::HostCode(_)
        | Node::StringExpression(_)
        | Node::Children(_) => {}
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, el: &Element) {
    visitor.visit_attributes(&el.attributes);
    walk_nodes(visitor, &el.children);
}

pub fn walk_element_component<V: Visitor>(visitor: &mut V, component: &ElementComponent) {
    visitor.visit_attributes(&component.attributes);
    walk_nodes(visitor, &component.children);
}

pub fn walk_call<V: Visitor>(visitor: &mut V, call: &CallTemplate) {
    if let Some(children) = &call.children {
        walk_nodes(visitor, children);
    }
}
