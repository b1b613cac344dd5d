//! Indented text dump of a parsed file, for tests and `weft ast`.

use std::fmt::{self, Write};

use crate::ast::{
    Attribute, CssProperty, Node, RawPart, TemplateFile, TopLevelNode, TrailingSpace,
};
use crate::cursor::Range;

impl TemplateFile {
    pub fn printer(&self) -> AstPrinter<'_> {
        AstPrinter::new(self)
    }
}

pub struct AstPrinter<'a> {
    file: &'a TemplateFile,
    spans: bool,
}

impl<'a> AstPrinter<'a> {
    pub fn new(file: &'a TemplateFile) -> Self {
        Self { file, spans: false }
    }

    /// Append `@line:col..line:col` to each node.
    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        let package = &self.file.package;
        write!(w, "Package {}", package.name)?;
        self.end_line(package.range, TrailingSpace::None, w)?;
        for node in &self.file.nodes {
            self.format_top_level(node, w)?;
        }
        Ok(())
    }

    fn end_line(&self, range: Range, space: TrailingSpace, w: &mut impl Write) -> fmt::Result {
        match space {
            TrailingSpace::None => {}
            TrailingSpace::Horizontal => write!(w, " +sp")?,
            TrailingSpace::Vertical => write!(w, " +nl")?,
        }
        if self.spans {
            write!(w, " @{}..{}", range.from, range.to)?;
        }
        writeln!(w)
    }

    fn format_top_level(&self, node: &TopLevelNode, w: &mut impl Write) -> fmt::Result {
        let visibility = |v: &Option<String>| v.as_ref().map(|v| format!("{v} ")).unwrap_or_default();
        match node {
            TopLevelNode::Import(expr) => {
                write!(w, "Import {:?}", expr.value)?;
                self.end_line(expr.range, TrailingSpace::None, w)
            }
            TopLevelNode::HostCode(expr) => {
                write!(w, "HostCode {:?}", expr.value)?;
                self.end_line(expr.range, TrailingSpace::None, w)
            }
            TopLevelNode::Template(t) => {
                write!(
                    w,
                    "{}Template {}({})",
                    visibility(&t.visibility),
                    t.name,
                    t.params_expr.value
                )?;
                self.end_line(t.range, TrailingSpace::None, w)?;
                self.format_nodes(&t.children, 1, w)
            }
            TopLevelNode::Css(css) => {
                write!(
                    w,
                    "{}Css {}({})",
                    visibility(&css.visibility),
                    css.name,
                    css.params_expr.value
                )?;
                self.end_line(css.range, TrailingSpace::None, w)?;
                for property in &css.properties {
                    match property {
                        CssProperty::Constant { name, value, range } => {
                            write!(w, "  Property {name}: {value}")?;
                            self.end_line(*range, TrailingSpace::None, w)?;
                        }
                        CssProperty::Expression { name, expr, range } => {
                            write!(w, "  Property {name}: {{{}}}", expr.value)?;
                            self.end_line(*range, TrailingSpace::None, w)?;
                        }
                    }
                }
                Ok(())
            }
            TopLevelNode::Script(script) => {
                write!(
                    w,
                    "{}Script {}({})",
                    visibility(&script.visibility),
                    script.name,
                    script.params_expr.value
                )?;
                self.end_line(script.range, TrailingSpace::None, w)?;
                write!(w, "  Body {:?}", script.body.value)?;
                self.end_line(script.body.range, TrailingSpace::None, w)
            }
        }
    }

    fn format_nodes(&self, nodes: &[Node], indent: usize, w: &mut impl Write) -> fmt::Result {
        for node in nodes {
            self.format_node(node, indent, w)?;
        }
        Ok(())
    }

    fn format_node(&self, node: &Node, indent: usize, w: &mut impl Write) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        write!(w, "{prefix}")?;
        match node {
            Node::Element(el) => {
                write!(w, "Element {}", el.name)?;
                if el.self_closing {
                    write!(w, " /")?;
                }
                self.end_line(el.range, el.trailing_space, w)?;
                self.format_attributes(&el.attributes, indent + 1, w)?;
                self.format_nodes(&el.children, indent + 1, w)
            }
            Node::Text(text) => {
                write!(w, "Text {:?}", text.value)?;
                self.end_line(text.range, text.trailing_space, w)
            }
            Node::RawElement(raw) => {
                write!(w, "Raw {} {:?}", raw.name, raw.contents)?;
                self.end_line(raw.range, raw.trailing_space, w)?;
                self.format_attributes(&raw.attributes, indent + 1, w)?;
                for part in &raw.parts {
                    if let RawPart::Expression { expr, in_string } = part {
                        write!(w, "{prefix}  Island {}", expr.value)?;
                        if *in_string {
                            write!(w, " (in string)")?;
                        }
                        self.end_line(expr.range, TrailingSpace::None, w)?;
                    }
                }
                Ok(())
            }
            Node::DocType(doctype) => {
                write!(w, "DocType {:?}", doctype.value)?;
                self.end_line(doctype.range, doctype.trailing_space, w)
            }
            Node::Comment(comment) => {
                write!(w, "Comment {:?}", comment.contents)?;
                self.end_line(comment.range, comment.trailing_space, w)
            }
            Node::If(if_expr) => {
                write!(w, "If {}", if_expr.cond.value)?;
                self.end_line(if_expr.range, TrailingSpace::None, w)?;
                self.format_nodes(&if_expr.then, indent + 1, w)?;
                for branch in &if_expr.else_ifs {
                    writeln!(w, "{prefix}ElseIf {}", branch.cond.value)?;
                    self.format_nodes(&branch.then, indent + 1, w)?;
                }
                if let Some(otherwise) = &if_expr.otherwise {
                    writeln!(w, "{prefix}Else")?;
                    self.format_nodes(otherwise, indent + 1, w)?;
                }
                Ok(())
            }
            Node::Switch(switch) => {
                write!(w, "Switch {}", switch.expr.value)?;
                self.end_line(switch.range, TrailingSpace::None, w)?;
                for case in &switch.cases {
                    match &case.pattern {
                        Some(pattern) => write!(w, "{prefix}  Case {}", pattern.value)?,
                        None => write!(w, "{prefix}  Default")?,
                    }
                    self.end_line(case.range, TrailingSpace::None, w)?;
                    self.format_nodes(&case.children, indent + 2, w)?;
                }
                Ok(())
            }
            Node::For(for_expr) => {
                write!(w, "For {} in {}", for_expr.pattern.value, for_expr.iter.value)?;
                self.end_line(for_expr.range, TrailingSpace::None, w)?;
                self.format_nodes(&for_expr.children, indent + 1, w)
            }
            Node::Fragment(fragment) => {
                write!(w, "Fragment {:?}", fragment.id)?;
                self.end_line(fragment.range, TrailingSpace::None, w)?;
                self.format_nodes(&fragment.children, indent + 1, w)
            }
            Node::HostCode(code) => {
                write!(w, "Code {:?}", code.value)?;
                self.end_line(code.range, TrailingSpace::None, w)
            }
            Node::StringExpression(expr) => {
                write!(w, "Expr {}", expr.expr.value)?;
                self.end_line(expr.range, expr.trailing_space, w)
            }
            Node::CallTemplate(call) => {
                write!(w, "Call {}", call.expr.value)?;
                self.end_line(call.range, call.trailing_space, w)?;
                if let Some(children) = &call.children {
                    writeln!(w, "{prefix}  Block")?;
                    self.format_nodes(children, indent + 2, w)?;
                }
                Ok(())
            }
            Node::ElementComponent(component) => {
                write!(w, "Component {}", component.name)?;
                if component.self_closing {
                    write!(w, " /")?;
                }
                self.end_line(component.range, component.trailing_space, w)?;
                self.format_attributes(&component.attributes, indent + 1, w)?;
                self.format_nodes(&component.children, indent + 1, w)
            }
            Node::Children(children) => {
                write!(w, "Children")?;
                self.end_line(children.range, children.trailing_space, w)
            }
        }
    }

    fn format_attributes(&self, attrs: &[Attribute], indent: usize, w: &mut impl Write) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        for attr in attrs {
            write!(w, "{prefix}")?;
            match attr {
                Attribute::Constant { key, value, .. } => write!(w, "Attr {}={value:?}", key.name)?,
                Attribute::BoolConstant { key, .. } => write!(w, "Attr {}", key.name)?,
                Attribute::Expression { key, expr, .. } => {
                    write!(w, "Attr {}={{{}}}", key.name, expr.value)?
                }
                Attribute::BoolExpression { key, expr, .. } => {
                    write!(w, "Attr {}?={{{}}}", key.name, expr.value)?
                }
                Attribute::Conditional {
                    cond,
                    then,
                    otherwise,
                    range,
                } => {
                    write!(w, "AttrIf {}", cond.value)?;
                    self.end_line(*range, TrailingSpace::None, w)?;
                    self.format_attributes(then, indent + 1, w)?;
                    if !otherwise.is_empty() {
                        writeln!(w, "{prefix}AttrElse")?;
                        self.format_attributes(otherwise, indent + 1, w)?;
                    }
                    continue;
                }
                Attribute::Spread { expr, .. } => write!(w, "Attr {{{}...}}", expr.value)?,
            }
            self.end_line(attr.range(), TrailingSpace::None, w)?;
        }
        Ok(())
    }
}
