//! Tag-form components: `<UserCard name="x"/>`.
//!
//! With a known signature, attributes bind to parameters by name and are
//! passed positionally; a trailing `Attributes` parameter collects the rest.
//! Without one, every attribute goes into a single `Attributes` props value.

use weft_core::utils::component_fn_path;

use super::{Emitter, GenerateError, GenerateResult, rust_string_body};
use crate::ast::{Attribute, ElementComponent};
use crate::diagnostics::{ComponentSignature, DiagnosticKind};

impl Emitter<'_> {
    pub(super) fn emit_element_component(
        &mut self,
        component: &ElementComponent,
    ) -> GenerateResult<()> {
        reject_opaque_attributes(component)?;
        let path = component_fn_path(&component.name);
        let signature = self.registry.get(&path).cloned();
        let bindings = match &signature {
            Some(signature) => Some(bind_attributes(component, signature)?),
            None => {
                self.diagnostics
                    .report(DiagnosticKind::UnresolvedSymbols, component.name_range)
                    .message(&component.name)
                    .emit();
                None
            }
        };

        let has_block = !component.children.is_empty();
        if has_block {
            self.emit_children_block(&component.children)?;
        }
        self.w.start_line();
        self.w.push("::weft_runtime::Component::render(&(");
        self.w.push_mapped(&path, component.name_range);
        self.w.push("(");
        match (&signature, bindings) {
            (Some(signature), Some(bindings)) => {
                self.push_bound_arguments(component, signature, &bindings)
            }
            _ => self.push_props(&component.attributes.iter().collect::<Vec<_>>(), false),
        }
        self.w.push(")), ");
        if has_block {
            self.w.push("&__weft_ctx.with_children(&__weft_block)");
        } else {
            self.w.push("__weft_ctx");
        }
        self.w.push(", __weft_w)?;");
        self.w.end_line();
        if has_block {
            self.w.close("}");
        }
        Ok(())
    }

    fn push_bound_arguments(
        &mut self,
        component: &ElementComponent,
        signature: &ComponentSignature,
        bindings: &Bindings<'_>,
    ) {
        for (i, slot) in bindings.named.iter().enumerate() {
            if i > 0 {
                self.w.push(", ");
            }
            if let Some(attr) = slot {
                self.push_argument(attr);
            }
        }
        let Some(rest) = signature.rest_param() else {
            for attr in &bindings.unmatched {
                if let Some(key) = attr.key() {
                    self.diagnostics
                        .report(DiagnosticKind::UnknownComponentAttribute, key.range)
                        .message(format!(
                            "`{}` has no parameter `{}`",
                            component.name, key.name
                        ))
                        .emit();
                }
            }
            return;
        };
        if rest > 0 {
            self.w.push(", ");
        }
        let by_ref = signature.params[rest].ty.trim_start().starts_with('&');
        self.push_props(&bindings.unmatched, by_ref);
    }

    /// A positional argument. The attribute name maps to the argument so
    /// editors can jump from it to the parameter.
    fn push_argument(&mut self, attr: &Attribute) {
        let Some(key) = attr.key() else {
            return;
        };
        match attr {
            Attribute::Constant { value, .. } => {
                let literal = format!("::std::convert::Into::into(\"{}\")", rust_string_body(value));
                self.w.push_mapped(&literal, key.range);
            }
            Attribute::BoolConstant { .. } => self.w.push_mapped("true", key.range),
            Attribute::Expression { expr, .. } | Attribute::BoolExpression { expr, .. } => {
                self.w.push_keyed_expression(expr, key.range);
            }
            Attribute::Conditional { .. } | Attribute::Spread { .. } => {}
        }
    }

    /// `::weft_runtime::Attributes::new().set("name", value)...`
    fn push_props(&mut self, attrs: &[&Attribute], by_ref: bool) {
        if by_ref {
            self.w.push("&");
        }
        self.w.push("::weft_runtime::Attributes::new()");
        for attr in attrs {
            let Some(key) = attr.key() else {
                continue;
            };
            self.w.push(".set(");
            self.w.push_string(&key.name);
            self.w.push(", ");
            match attr {
                Attribute::Constant { value, .. } => self.w.push_string(value),
                Attribute::BoolConstant { .. } => self.w.push("true"),
                Attribute::Expression { expr, .. } | Attribute::BoolExpression { expr, .. } => {
                    self.w.push_expression(expr)
                }
                Attribute::Conditional { .. } | Attribute::Spread { .. } => {}
            }
            self.w.push(")");
        }
    }
}

/// Attributes of one component invocation, matched against its signature.
struct Bindings<'c> {
    /// One slot per named parameter, in parameter order.
    named: Vec<Option<&'c Attribute>>,
    unmatched: Vec<&'c Attribute>,
}

fn bind_attributes<'c>(
    component: &'c ElementComponent,
    signature: &ComponentSignature,
) -> GenerateResult<Bindings<'c>> {
    let mut named = vec![None; signature.named_params().len()];
    let mut unmatched = Vec::new();
    for attr in &component.attributes {
        let Some(key) = attr.key() else {
            continue;
        };
        match signature.param_index(&key.name) {
            Some(index) => named[index] = Some(attr),
            None => unmatched.push(attr),
        }
    }
    if let Some(missing) = named.iter().position(Option::is_none) {
        return Err(GenerateError::new(
            format!(
                "<{}>: missing required attribute `{}`",
                component.name,
                signature.named_params()[missing].name
            ),
            component.name_range,
        ));
    }
    Ok(Bindings { named, unmatched })
}

fn reject_opaque_attributes(component: &ElementComponent) -> GenerateResult<()> {
    match component
        .attributes
        .iter()
        .find(|attr| matches!(attr, Attribute::Spread { .. } | Attribute::Conditional { .. }))
    {
        Some(attr) => Err(GenerateError::new(
            format!(
                "<{}>: spread and conditional attributes are not supported on components",
                component.name
            ),
            attr.range(),
        )),
        None => Ok(()),
    }
}
