#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Runtime contract for code generated by the weft compiler.
//!
//! Generated templates are plain functions returning `impl Component`. A
//! component writes itself to a `std::io::Write` through a [`RenderContext`],
//! which carries the cancellation token, injected children, the requested
//! fragment set and the per-render bookkeeping for CSS and script blocks.

pub mod attributes;
pub mod context;
pub mod css;
pub mod error;
pub mod script;
pub mod url;

use std::io;

pub use attributes::{AttributeValue, Attributes, SpreadAttributes};
pub use context::{
    CancellationToken, RenderContext, RenderOptions, render, render_fragments_to_string,
    render_to_string, render_with_options_to_string,
};
pub use css::{
    ClassList, ClassValue, CssClass, SafeCss, StyleValue, class_if, sanitize_css_property,
};
pub use error::{Error, Result};
pub use script::{ScriptCall, ScriptValue, script_content};
pub use url::{SafeUrl, UrlValue, sanitize_url};
pub use weft_core::html::{escape_attr, escape_html};

#[cfg(test)]
mod context_tests;
#[cfg(test)]
mod script_tests;
#[cfg(test)]
mod url_tests;

/// Something that renders markup.
pub trait Component {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()>;
}

/// A component backed by a closure. Generated templates return these.
pub struct ComponentFn<F>(F);

/// Wrap a render closure as a [`Component`].
pub fn component<F>(f: F) -> ComponentFn<F>
where
    F: Fn(&RenderContext<'_>, &mut dyn io::Write) -> Result<()>,
{
    ComponentFn(f)
}

impl<F> Component for ComponentFn<F>
where
    F: Fn(&RenderContext<'_>, &mut dyn io::Write) -> Result<()>,
{
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()> {
        (self.0)(ctx, w)
    }
}

/// Markup written verbatim, without escaping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raw<S>(pub S);

impl<S: AsRef<str>> Component for Raw<S> {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()> {
        ctx.write(w, self.0.as_ref())
    }
}

/// Text components are escaped.
impl Component for str {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()> {
        ctx.write_escaped(w, self)
    }
}

impl Component for String {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()> {
        ctx.write_escaped(w, self.as_str())
    }
}

impl<T: Component + ?Sized> Component for &T {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()> {
        (**self).render(ctx, w)
    }
}

impl<T: Component + ?Sized> Component for Box<T> {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()> {
        (**self).render(ctx, w)
    }
}

impl<T: Component> Component for Option<T> {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()> {
        match self {
            Some(c) => c.render(ctx, w),
            None => Ok(()),
        }
    }
}

impl<T: Component> Component for [T] {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()> {
        for c in self {
            c.render(ctx, w)?;
        }
        Ok(())
    }
}

impl<T: Component> Component for Vec<T> {
    fn render(&self, ctx: &RenderContext<'_>, w: &mut dyn io::Write) -> Result<()> {
        self.as_slice().render(ctx, w)
    }
}

/// A component that renders nothing.
pub struct Nop;

impl Component for Nop {
    fn render(&self, _ctx: &RenderContext<'_>, _w: &mut dyn io::Write) -> Result<()> {
        Ok(())
    }
}
