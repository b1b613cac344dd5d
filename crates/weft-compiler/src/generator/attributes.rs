//! Element attributes and their escaping contexts.

use weft_core::html::{escape_attr, is_url_attribute};

use super::Emitter;
use crate::ast::{Attribute, AttributeKey, Expression};

/// How an expression attribute value is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ValueKind {
    Class,
    Script,
    Url,
    Style,
    Text,
}

impl ValueKind {
    fn of(key: &AttributeKey) -> Self {
        let name = key.name.to_ascii_lowercase();
        if name == "class" {
            Self::Class
        } else if name.starts_with("on") {
            Self::Script
        } else if name == "style" {
            Self::Style
        } else if is_url_attribute(&name) {
            Self::Url
        } else {
            Self::Text
        }
    }

    fn write_method(self) -> &'static str {
        match self {
            Self::Class => "write_classes",
            Self::Script => "write_script",
            Self::Url => "write_url",
            Self::Style => "write_style",
            Self::Text => "write_attr",
        }
    }

    /// Method that writes the `<style>` or `<script>` definitions a value
    /// needs before the element opens.
    fn prelude_method(self) -> Option<&'static str> {
        match self {
            Self::Class => Some("render_css"),
            Self::Script => Some("render_scripts"),
            _ => None,
        }
    }
}

impl Emitter<'_> {
    /// Write the CSS and script definitions that `attrs` depend on, ahead of
    /// the opening tag. Top-level class and handler values are bound once;
    /// the returned slots hold the binding name per attribute.
    pub(super) fn emit_attribute_prelude(&mut self, attrs: &[Attribute]) -> Vec<Option<String>> {
        let mut vars = Vec::with_capacity(attrs.len());
        for attr in attrs {
            let var = match attr {
                Attribute::Expression { key, expr, .. } => ValueKind::of(key)
                    .prelude_method()
                    .map(|method| self.emit_bound_prelude(method, expr)),
                Attribute::Conditional {
                    cond,
                    then,
                    otherwise,
                    ..
                } if needs_prelude(then) || needs_prelude(otherwise) => {
                    self.emit_conditional_prelude(cond, then, otherwise);
                    None
                }
                _ => None,
            };
            vars.push(var);
        }
        vars
    }

    fn emit_bound_prelude(&mut self, method: &str, expr: &Expression) -> String {
        let var = self.fresh_var();
        self.w.start_line();
        self.w.push(&format!("let {var} = &("));
        self.w.push_expression(expr);
        self.w.push(");");
        self.w.end_line();
        self.w
            .line(&format!("__weft_ctx.{method}(__weft_w, {var})?;"));
        var
    }

    /// Values inside a conditional are evaluated again when the attribute
    /// itself is written.
    fn emit_conditional_prelude(
        &mut self,
        cond: &Expression,
        then: &[Attribute],
        otherwise: &[Attribute],
    ) {
        self.w.start_line();
        self.w.push("if ");
        self.w.push(&cond.value);
        self.w.push(" {");
        self.w.end_line();
        self.w.indent();
        self.emit_unbound_prelude(then);
        if needs_prelude(otherwise) {
            self.w.dedent();
            self.w.open("} else {");
            self.emit_unbound_prelude(otherwise);
        }
        self.w.close("}");
    }

    fn emit_unbound_prelude(&mut self, attrs: &[Attribute]) {
        for attr in attrs {
            match attr {
                Attribute::Expression { key, expr, .. } => {
                    if let Some(method) = ValueKind::of(key).prelude_method() {
                        self.w.line(&format!(
                            "__weft_ctx.{method}(__weft_w, &({}))?;",
                            expr.value
                        ));
                    }
                }
                Attribute::Conditional {
                    cond,
                    then,
                    otherwise,
                    ..
                } if needs_prelude(then) || needs_prelude(otherwise) => {
                    self.emit_conditional_prelude(cond, then, otherwise);
                }
                _ => {}
            }
        }
    }

    /// Write `attrs` inside an open tag. `vars` comes from
    /// [`Self::emit_attribute_prelude`] for the same slice.
    pub(super) fn emit_attributes(&mut self, attrs: &[Attribute], vars: &[Option<String>]) {
        for (i, attr) in attrs.iter().enumerate() {
            let var = vars.get(i).and_then(Option::as_deref);
            self.emit_attribute(attr, var);
        }
    }

    fn emit_attribute(&mut self, attr: &Attribute, var: Option<&str>) {
        match attr {
            Attribute::Constant {
                key, value, range, ..
            } => {
                let text = format!(" {}=\"{}\"", key.name, escape_attr(value));
                self.w.mapped_literal(&text, *range);
            }
            Attribute::BoolConstant { key, range } => {
                self.w.mapped_literal(&format!(" {}", key.name), *range);
            }
            Attribute::Expression { key, expr, .. } => {
                self.w.mapped_literal(&format!(" {}=\"", key.name), key.range);
                let method = ValueKind::of(key).write_method();
                self.w.start_line();
                match var {
                    Some(var) => self.w.push(&format!("__weft_ctx.{method}(__weft_w, {var})?;")),
                    None => {
                        self.w.push(&format!("__weft_ctx.{method}(__weft_w, &("));
                        self.w.push_expression(expr);
                        self.w.push("))?;");
                    }
                }
                self.w.end_line();
                self.w.literal("\"");
            }
            Attribute::BoolExpression { key, expr, .. } => {
                self.w.start_line();
                self.w.push("if ");
                self.w.push_expression(expr);
                self.w.push(" {");
                self.w.end_line();
                self.w.indent();
                self.w.mapped_literal(&format!(" {}", key.name), key.range);
                self.w.close("}");
            }
            Attribute::Conditional {
                cond,
                then,
                otherwise,
                ..
            } => {
                self.w.start_line();
                self.w.push("if ");
                self.w.push_expression(cond);
                self.w.push(" {");
                self.w.end_line();
                self.w.indent();
                self.emit_attributes(then, &[]);
                if !otherwise.is_empty() {
                    self.w.dedent();
                    self.w.open("} else {");
                    self.emit_attributes(otherwise, &[]);
                }
                self.w.close("}");
            }
            Attribute::Spread { expr, .. } => {
                self.w.start_line();
                self.w.push("__weft_ctx.write_attributes(__weft_w, &(");
                self.w.push_expression(expr);
                self.w.push("))?;");
                self.w.end_line();
            }
        }
    }
}

fn needs_prelude(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| match attr {
        Attribute::Expression { key, .. } => ValueKind::of(key).prelude_method().is_some(),
        Attribute::Conditional {
            then, otherwise, ..
        } => needs_prelude(then) || needs_prelude(otherwise),
        _ => false,
    })
}
