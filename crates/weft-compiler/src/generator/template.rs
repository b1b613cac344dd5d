//! Template declarations and the nodes inside them.

use super::{Emitter, GenerateResult};
use crate::ast::{
    CallTemplate, Element, Fragment, IfExpression, Node, RawElement, RawPart, SwitchExpression,
    Template,
};
use crate::cursor::Range;

impl Emitter<'_> {
    pub(super) fn emit_template(&mut self, template: &Template) -> GenerateResult<()> {
        log::trace!("template {}", template.name);
        self.w.start_line();
        if let Some(vis) = &template.visibility {
            self.w.push(vis);
            self.w.push(" ");
        }
        self.w.push("fn ");
        self.w.push_mapped(&template.name, template.name_range);
        self.w.push("(");
        self.w.push_expression(&template.params_expr);
        self.w.push(") -> impl ::weft_runtime::Component {");
        self.w.end_line();
        self.w.indent();
        self.w
            .open("::weft_runtime::component(move |__weft_ctx, __weft_w| {");
        self.w.line("__weft_ctx.check()?;");
        self.w.line("let __weft_children = __weft_ctx.children();");
        self.w
            .line("let __weft_ctx = &__weft_ctx.clear_children();");
        self.emit_nodes(&template.children)?;
        self.w.line("Ok(())");
        self.w.close("})");
        self.w.close("}");
        Ok(())
    }

    /// Whitespace after a node renders as one space unless the node is last.
    pub(super) fn emit_nodes(&mut self, nodes: &[Node]) -> GenerateResult<()> {
        self.emit_node_list(nodes, false)
    }

    /// Body of an `if` branch, `for` loop or `switch` arm. The space after
    /// the last node is kept, so it is written on every pass.
    fn emit_body(&mut self, nodes: &[Node]) -> GenerateResult<()> {
        self.emit_node_list(nodes, true)
    }

    fn emit_node_list(&mut self, nodes: &[Node], keep_last_space: bool) -> GenerateResult<()> {
        for (i, node) in nodes.iter().enumerate() {
            self.emit_node(node)?;
            let last = i + 1 == nodes.len();
            if (keep_last_space || !last) && !node.trailing_space().is_none() {
                self.w.literal(" ");
            }
        }
        Ok(())
    }

    fn emit_node(&mut self, node: &Node) -> GenerateResult<()> {
        match node {
            Node::Element(el) => self.emit_element(el)?,
            Node::Text(text) => self.w.mapped_literal(&text.value, text.range),
            Node::RawElement(raw) => self.emit_raw_element(raw),
            Node::DocType(doctype) => self
                .w
                .mapped_literal(&format!("<!DOCTYPE {}>", doctype.value), doctype.range),
            Node::Comment(comment) => self
                .w
                .mapped_literal(&format!("<!--{}-->", comment.contents), comment.range),
            Node::If(if_expr) => self.emit_if(if_expr)?,
            Node::Switch(switch) => self.emit_switch(switch)?,
            Node::For(for_expr) => {
                self.w.start_line();
                self.w.push("for ");
                self.w.push_expression(&for_expr.pattern);
                self.w.push(" in ");
                self.w.push_expression(&for_expr.iter);
                self.w.push(" {");
                self.w.end_line();
                self.w.indent();
                self.emit_body(&for_expr.children)?;
                self.w.close("}");
            }
            Node::Fragment(fragment) => self.emit_fragment(fragment)?,
            Node::HostCode(expr) => {
                self.w.start_line();
                self.w.push_expression(expr);
                self.w.end_line();
            }
            Node::StringExpression(expr) => {
                self.w.start_line();
                self.w.push("__weft_ctx.write_escaped(__weft_w, &(");
                self.w.push_expression(&expr.expr);
                self.w.push("))?;");
                self.w.end_line();
            }
            Node::CallTemplate(call) => self.emit_call(call)?,
            Node::ElementComponent(component) => self.emit_element_component(component)?,
            Node::Children(_) => self.w.line(
                "::weft_runtime::Component::render(&__weft_children, __weft_ctx, __weft_w)?;",
            ),
        }
        Ok(())
    }

    fn emit_element(&mut self, el: &Element) -> GenerateResult<()> {
        let vars = self.emit_attribute_prelude(&el.attributes);
        let open = Range::new(el.range.from, el.name_range.to);
        self.w.mapped_literal(&format!("<{}", el.name), open);
        self.emit_attributes(&el.attributes, &vars);
        self.w.literal(">");
        self.emit_nodes(&el.children)?;
        if el.is_void() {
            return Ok(());
        }
        let close = format!("</{}>", el.name);
        match el.end_tag {
            Some(range) => self.w.mapped_literal(&close, range),
            None => self.w.literal(&close),
        }
        Ok(())
    }

    fn emit_raw_element(&mut self, raw: &RawElement) {
        let vars = self.emit_attribute_prelude(&raw.attributes);
        self.w.literal(&format!("<{}", raw.name));
        self.emit_attributes(&raw.attributes, &vars);
        self.w.literal(">");
        for part in &raw.parts {
            match part {
                RawPart::Text { value, range } => self.w.mapped_literal(value, *range),
                RawPart::Expression { expr, in_string } => {
                    self.w.start_line();
                    self.w.push("__weft_ctx.write_script_content(__weft_w, &(");
                    self.w.push_expression(expr);
                    self.w.push(&format!("), {in_string})?;"));
                    self.w.end_line();
                }
            }
        }
        self.w.literal(&format!("</{}>", raw.name));
    }

    fn emit_if(&mut self, if_expr: &IfExpression) -> GenerateResult<()> {
        self.w.start_line();
        self.w.push("if ");
        self.w.push_expression(&if_expr.cond);
        self.w.push(" {");
        self.w.end_line();
        self.w.indent();
        self.emit_body(&if_expr.then)?;
        for branch in &if_expr.else_ifs {
            self.w.dedent();
            self.w.start_line();
            self.w.push("} else if ");
            self.w.push_expression(&branch.cond);
            self.w.push(" {");
            self.w.end_line();
            self.w.indent();
            self.emit_body(&branch.then)?;
        }
        if let Some(otherwise) = &if_expr.otherwise {
            self.w.dedent();
            self.w.open("} else {");
            self.emit_body(otherwise)?;
        }
        self.w.close("}");
        Ok(())
    }

    fn emit_switch(&mut self, switch: &SwitchExpression) -> GenerateResult<()> {
        self.w.start_line();
        self.w.push("match ");
        self.w.push_expression(&switch.expr);
        self.w.push(" {");
        self.w.end_line();
        self.w.indent();
        for case in &switch.cases {
            self.w.start_line();
            match &case.pattern {
                Some(pattern) => self.w.push_expression(pattern),
                None => self.w.push("_"),
            }
            self.w.push(" => {");
            self.w.end_line();
            self.w.indent();
            self.emit_body(&case.children)?;
            self.w.close("}");
        }
        if switch.cases.iter().all(|case| case.pattern.is_some()) {
            self.w.line("_ => {}");
        }
        self.w.close("}");
        Ok(())
    }

    fn emit_fragment(&mut self, fragment: &Fragment) -> GenerateResult<()> {
        self.w.start_line();
        self.w.push("__weft_ctx.fragment(");
        self.w.push_string(&fragment.id);
        self.w.push(", __weft_w, |__weft_ctx, __weft_w| {");
        self.w.end_line();
        self.w.indent();
        self.emit_nodes(&fragment.children)?;
        self.w.line("Ok(())");
        self.w.close("})?;");
        Ok(())
    }

    fn emit_call(&mut self, call: &CallTemplate) -> GenerateResult<()> {
        match &call.children {
            None => {
                self.w.start_line();
                self.w.push("::weft_runtime::Component::render(&(");
                self.w.push_expression(&call.expr);
                self.w.push("), __weft_ctx, __weft_w)?;");
                self.w.end_line();
            }
            Some(children) => {
                self.emit_children_block(children)?;
                self.w.start_line();
                self.w.push("::weft_runtime::Component::render(&(");
                self.w.push_expression(&call.expr);
                self.w.push(
                    "), &__weft_ctx.with_children(&__weft_block), __weft_w)?;",
                );
                self.w.end_line();
                self.w.close("}");
            }
        }
        Ok(())
    }

    /// Open a scope binding `__weft_block` to a component rendering
    /// `children`. The caller renders the callee and closes the scope.
    pub(super) fn emit_children_block(&mut self, children: &[Node]) -> GenerateResult<()> {
        self.w.open("{");
        self.w
            .open("let __weft_block = ::weft_runtime::component(|__weft_ctx, __weft_w| {");
        self.emit_nodes(children)?;
        self.w.line("Ok(())");
        self.w.close("});");
        Ok(())
    }
}
