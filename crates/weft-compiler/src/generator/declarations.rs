//! `css` and `script` declarations.

use super::{Emitter, rust_string_body};
use crate::ast::{CssProperty, CssTemplate, Expression, ScriptTemplate};
use crate::cursor::Range;

impl Emitter<'_> {
    fn emit_signature(
        &mut self,
        visibility: Option<&str>,
        (name, name_range): (&str, Range),
        params: &Expression,
        ret: &str,
    ) {
        self.w.start_line();
        if let Some(vis) = visibility {
            self.w.push(vis);
            self.w.push(" ");
        }
        self.w.push("fn ");
        self.w.push_mapped(name, name_range);
        self.w.push("(");
        self.w.push_expression(params);
        self.w.push(&format!(") -> {ret} {{"));
        self.w.end_line();
        self.w.indent();
    }

    /// Constant declarations are copied as written; expression values go
    /// through `sanitize_css_property` at render time.
    pub(super) fn emit_css(&mut self, css: &CssTemplate) {
        self.emit_signature(
            css.visibility.as_deref(),
            (&css.name, css.name_range),
            &css.params_expr,
            "::weft_runtime::CssClass",
        );
        if css.properties.is_empty() {
            self.w
                .line("let __weft_css = ::std::string::String::new();");
        } else {
            self.w
                .line("let mut __weft_css = ::std::string::String::new();");
        }
        for property in &css.properties {
            match property {
                CssProperty::Constant { name, value, range } => {
                    self.w.start_line();
                    self.w.push("__weft_css.push_str(");
                    let start = self.w.position();
                    self.w.push_string(&format!("{name}:{value};"));
                    let end = self.w.position();
                    self.w.push(");");
                    self.w.end_line();
                    self.w.map_literal(*range, start, end);
                }
                CssProperty::Expression { name, expr, .. } => {
                    self.w.open("{");
                    self.w.start_line();
                    self.w.push(&format!(
                        "let (__weft_name, __weft_value) = ::weft_runtime::sanitize_css_property(\"{}\", &::std::string::ToString::to_string(&(",
                        rust_string_body(name)
                    ));
                    self.w.push_expression(expr);
                    self.w.push(")));");
                    self.w.end_line();
                    self.w.line("__weft_css.push_str(&__weft_name);");
                    self.w.line("__weft_css.push(':');");
                    self.w.line("__weft_css.push_str(&__weft_value);");
                    self.w.line("__weft_css.push(';');");
                    self.w.close("}");
                }
            }
        }
        self.w.start_line();
        self.w.push("::weft_runtime::CssClass::new(");
        self.w.push_string(&css.name);
        self.w.push(", __weft_css)");
        self.w.end_line();
        self.w.close("}");
    }

    /// Arguments are JSON encoded when the call is built.
    pub(super) fn emit_script(&mut self, script: &ScriptTemplate) {
        self.emit_signature(
            script.visibility.as_deref(),
            (&script.name, script.name_range),
            &script.params_expr,
            "::weft_runtime::ScriptCall",
        );
        self.w.start_line();
        self.w.push("::weft_runtime::ScriptCall::new(");
        self.w.push_string(&script.name);
        self.w.push(", &[");
        for (i, param) in script.params.iter().enumerate() {
            if i > 0 {
                self.w.push(", ");
            }
            self.w.push_string(&param.name);
        }
        self.w.push("], ");
        let start = self.w.position();
        self.w.push_string(&script.body.value);
        let end = self.w.position();
        self.w.map_literal(script.body.range, start, end);
        self.w.push(")");
        for param in &script.params {
            self.w.push(&format!(".arg(&{})", param.name));
        }
        self.w.end_line();
        self.w.close("}");
    }
}
