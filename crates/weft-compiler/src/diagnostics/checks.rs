use indexmap::IndexMap;
use weft_core::utils::component_fn_path;

use super::symbols::SymbolResolver;
use super::{DiagnosticKind, Diagnostics};
use crate::ast::{Attribute, CallTemplate, Element, ElementComponent, TemplateFile};
use crate::cursor::Range;
use crate::visitor::{Visitor, walk_call, walk_element, walk_element_component};

/// Elements that implicitly close an open `<p>`.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav",
    "ol", "p", "pre", "section", "table", "ul",
];

/// Markup checks that need nothing but the tree.
pub fn diagnose(file: &TemplateFile) -> Diagnostics {
    let mut checker = MarkupChecker::default();
    checker.visit_file(file);
    log::debug!("markup checks found {} diagnostics", checker.diagnostics.len());
    checker.diagnostics
}

/// Component checks against `resolver`. Unknown components are reported only
/// when `complete` says every signature could be collected.
pub fn check_symbols(
    file: &TemplateFile,
    resolver: &dyn SymbolResolver,
    complete: bool,
) -> Diagnostics {
    let mut checker = SymbolChecker {
        resolver,
        complete,
        diagnostics: Diagnostics::new(),
    };
    checker.visit_file(file);
    checker.diagnostics
}

struct OpenElement {
    name: String,
    range: Range,
}

#[derive(Default)]
struct MarkupChecker {
    diagnostics: Diagnostics,
    /// Open elements of the current render scope, innermost last.
    open: Vec<OpenElement>,
}

impl MarkupChecker {
    fn check_nesting(&mut self, el: &Element) {
        let name = el.name.as_str();
        let conflict = match name {
            "a" | "form" => self.open.iter().rev().find(|open| open.name == name),
            _ if BLOCK_ELEMENTS.contains(&name) => self.open.iter().rev().find(|open| open.name == "p"),
            _ => None,
        };
        if let Some(outer) = conflict {
            self.diagnostics
                .report(DiagnosticKind::IllegalNesting, el.name_range)
                .message(format!("`<{name}>` cannot appear inside `<{}>`", outer.name))
                .related_to(format!("`<{}>` opened here", outer.name), outer.range)
                .emit();
        }
    }

    /// Children rendered by another component start a fresh scope.
    fn detached<F: FnOnce(&mut Self)>(&mut self, f: F) {
        let saved = std::mem::take(&mut self.open);
        f(self);
        self.open = saved;
    }
}

impl Visitor for MarkupChecker {
    fn visit_element(&mut self, el: &Element) {
        if el.is_void() && !el.children.is_empty() {
            self.diagnostics
                .report(DiagnosticKind::VoidElementWithChildren, el.name_range)
                .message(&el.name)
                .emit();
        }
        if el.self_closing && !el.is_void() {
            self.diagnostics
                .report(DiagnosticKind::SelfClosingNonVoid, el.name_range)
                .message(&el.name)
                .emit();
        }
        self.check_nesting(el);
        self.open.push(OpenElement {
            name: el.name.clone(),
            range: el.name_range,
        });
        walk_element(self, el);
        self.open.pop();
    }

    fn visit_element_component(&mut self, component: &ElementComponent) {
        self.detached(|this| walk_element_component(this, component));
    }

    fn visit_call(&mut self, call: &CallTemplate) {
        self.detached(|this| walk_call(this, call));
    }

    fn visit_attributes(&mut self, attrs: &[Attribute]) {
        check_duplicates(attrs, &mut self.diagnostics);
    }
}

/// Branches of a conditional attribute are checked on their own.
fn check_duplicates(attrs: &[Attribute], diagnostics: &mut Diagnostics) {
    let mut seen: IndexMap<&str, Range> = IndexMap::new();
    for attr in attrs {
        if let Attribute::Conditional {
            then, otherwise, ..
        } = attr
        {
            check_duplicates(then, diagnostics);
            check_duplicates(otherwise, diagnostics);
            continue;
        }
        let Some(key) = attr.key() else {
            continue;
        };
        match seen.get(key.name.as_str()) {
            Some(&first) => diagnostics
                .report(DiagnosticKind::DuplicateAttribute, key.range)
                .message(&key.name)
                .related_to("first set here", first)
                .emit(),
            None => {
                seen.insert(key.name.as_str(), key.range);
            }
        }
    }
}

struct SymbolChecker<'r> {
    resolver: &'r dyn SymbolResolver,
    complete: bool,
    diagnostics: Diagnostics,
}

impl SymbolChecker<'_> {
    fn check_component(&mut self, component: &ElementComponent) {
        let path = component_fn_path(&component.name);
        let Some(signature) = self.resolver.resolve(&path) else {
            if self.complete {
                self.diagnostics
                    .report(DiagnosticKind::UnknownComponent, component.name_range)
                    .message(&component.name)
                    .emit();
            }
            return;
        };

        let mut supplied = vec![false; signature.named_params().len()];
        let mut opaque = false;
        for attr in &component.attributes {
            let Some(key) = attr.key() else {
                opaque = true;
                continue;
            };
            match signature.param_index(&key.name) {
                Some(index) => supplied[index] = true,
                None if signature.rest_param().is_some() => {}
                None => self
                    .diagnostics
                    .report(DiagnosticKind::UnknownComponentAttribute, key.range)
                    .message(format!("`{}` has no parameter `{}`", component.name, key.name))
                    .emit(),
            }
        }
        if opaque {
            return;
        }
        for (param, _) in signature
            .named_params()
            .iter()
            .zip(&supplied)
            .filter(|(_, supplied)| !**supplied)
        {
            self.diagnostics
                .report(DiagnosticKind::MissingComponentAttribute, component.name_range)
                .message(format!("`<{}>` requires `{}`", component.name, param.name))
                .emit();
        }
    }
}

impl Visitor for SymbolChecker<'_> {
    fn visit_element_component(&mut self, component: &ElementComponent) {
        self.check_component(component);
        walk_element_component(self, component);
    }

    fn visit_call(&mut self, call: &CallTemplate) {
        if let Some((path, args)) = call.call_parts()
            && let Some(signature) = self.resolver.resolve(path)
            && signature.params.len() != args.len()
        {
            self.diagnostics
                .report(DiagnosticKind::ArgumentCountMismatch, call.expr.range)
                .message(format!(
                    "`{path}` takes {} argument(s) but {} were given",
                    signature.params.len(),
                    args.len()
                ))
                .emit();
        }
        walk_call(self, call);
    }
}
