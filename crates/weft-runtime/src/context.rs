//! Render context and entry points.
//!
//! A render owns one [`RenderState`]; every [`RenderContext`] handed to
//! components borrows it. Children injection and fragment selection are
//! explicit values on the context rather than ambient globals.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt::Display;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use weft_core::html::{escape_attr, escape_html};

use crate::attributes::SpreadAttributes;
use crate::css::{ClassList, ClassValue, StyleValue};
use crate::script::{ScriptValue, script_content};
use crate::url::UrlValue;
use crate::{Component, Error, Result};

/// Cooperative cancellation shared between a render and its caller.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for a top-level render.
#[derive(Default)]
pub struct RenderOptions<'a> {
    children: Option<&'a dyn Component>,
    fragments: Option<Vec<String>>,
    cancel: Option<CancellationToken>,
}

impl<'a> RenderOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content made available to `{ children... }` in the root component.
    pub fn children(mut self, children: &'a dyn Component) -> Self {
        self.children = Some(children);
        self
    }

    /// Render only the named fragments, in document order.
    pub fn fragments<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fragments = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// State shared by every context of one render.
struct RenderState {
    cancel: Option<CancellationToken>,
    fragments: Option<HashSet<String>>,
    /// Number of requested fragments currently being rendered.
    fragment_depth: Cell<usize>,
    /// Ids of CSS classes and scripts already written.
    emitted: RefCell<HashSet<String>>,
}

/// Per-call view of a render.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    state: &'a RenderState,
    children: Option<&'a dyn Component>,
}

impl<'a> RenderContext<'a> {
    /// Fail with [`Error::Cancelled`] once the token has fired.
    pub fn check(&self) -> Result<()> {
        match &self.state.cancel {
            Some(token) if token.is_cancelled() => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    pub fn children(&self) -> Option<&'a dyn Component> {
        self.children
    }

    /// A context whose children are `children`, for rendering a call site's block.
    pub fn with_children<'b>(&'b self, children: &'b dyn Component) -> RenderContext<'b> {
        RenderContext {
            state: self.state,
            children: Some(children),
        }
    }

    /// A context without children, so nested calls do not inherit them.
    pub fn clear_children(&self) -> RenderContext<'a> {
        RenderContext {
            state: self.state,
            children: None,
        }
    }

    pub fn write(&self, w: &mut dyn io::Write, s: &str) -> Result<()> {
        self.check()?;
        w.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Write a value in an element body.
    pub fn write_escaped<T: Display + ?Sized>(&self, w: &mut dyn io::Write, value: &T) -> Result<()> {
        self.check()?;
        let text = value.to_string();
        w.write_all(escape_html(&text).as_bytes())?;
        Ok(())
    }

    /// Write a value inside a quoted attribute.
    pub fn write_attr<T: Display + ?Sized>(&self, w: &mut dyn io::Write, value: &T) -> Result<()> {
        self.check()?;
        let text = value.to_string();
        w.write_all(escape_attr(&text).as_bytes())?;
        Ok(())
    }

    /// Write a URL attribute value, sanitizing its scheme unless it is a [`SafeUrl`](crate::SafeUrl).
    pub fn write_url<U: UrlValue + ?Sized>(&self, w: &mut dyn io::Write, value: &U) -> Result<()> {
        self.check()?;
        let url = value.to_url();
        w.write_all(escape_attr(&url).as_bytes())?;
        Ok(())
    }

    /// Write a `style` attribute value.
    pub fn write_style<S: StyleValue + ?Sized>(&self, w: &mut dyn io::Write, value: &S) -> Result<()> {
        self.check()?;
        let mut css = String::new();
        value.write_style(&mut css);
        w.write_all(escape_attr(&css).as_bytes())?;
        Ok(())
    }

    /// Write `<style>` blocks for classes not yet emitted in this render.
    pub fn render_css<C: ClassValue + ?Sized>(&self, w: &mut dyn io::Write, value: &C) -> Result<()> {
        let mut classes = ClassList::default();
        value.collect_classes(&mut classes);

        let mut css = String::new();
        for class in classes.css() {
            if self.first_emission(class.name()) {
                css.push_str(class.style());
            }
        }
        if css.is_empty() {
            return Ok(());
        }
        self.write(w, r#"<style type="text/css">"#)?;
        self.write(w, &css)?;
        self.write(w, "</style>")
    }

    /// Write the class names of a `class` attribute value.
    pub fn write_classes<C: ClassValue + ?Sized>(&self, w: &mut dyn io::Write, value: &C) -> Result<()> {
        self.check()?;
        let mut classes = ClassList::default();
        value.collect_classes(&mut classes);
        w.write_all(escape_attr(&classes.joined()).as_bytes())?;
        Ok(())
    }

    /// Write `<script>` definitions for handlers not yet emitted in this render.
    pub fn render_scripts<S: ScriptValue + ?Sized>(&self, w: &mut dyn io::Write, value: &S) -> Result<()> {
        let mut out = String::new();
        for script in value.scripts() {
            if self.first_emission(script.function_name()) {
                out.push_str(script.definition());
            }
        }
        if out.is_empty() {
            return Ok(());
        }
        self.write(w, "<script>")?;
        self.write(w, &out)?;
        self.write(w, "</script>")
    }

    /// Write an event handler attribute value.
    pub fn write_script<S: ScriptValue + ?Sized>(&self, w: &mut dyn io::Write, value: &S) -> Result<()> {
        self.check()?;
        let call = value.call()?;
        w.write_all(escape_attr(&call).as_bytes())?;
        Ok(())
    }

    /// Write a value inside a `<script>` element.
    pub fn write_script_content<T: Serialize + ?Sized>(
        &self,
        w: &mut dyn io::Write,
        value: &T,
        inside_string: bool,
    ) -> Result<()> {
        self.check()?;
        let js = script_content(value, inside_string)?;
        w.write_all(js.as_bytes())?;
        Ok(())
    }

    /// Write spread attributes, each prefixed by a space.
    pub fn write_attributes<A: SpreadAttributes + ?Sized>(
        &self,
        w: &mut dyn io::Write,
        attrs: &A,
    ) -> Result<()> {
        self.check()?;
        let mut out = String::new();
        attrs.write_attributes(&mut out);
        w.write_all(out.as_bytes())?;
        Ok(())
    }

    /// Render a named fragment.
    ///
    /// Without a fragment selection the body renders inline. With one, output
    /// is only kept while at least one requested fragment is open, so a
    /// requested fragment nested in an unrequested one still renders.
    pub fn fragment<F>(&self, id: &str, w: &mut dyn io::Write, body: F) -> Result<()>
    where
        F: FnOnce(&RenderContext<'_>, &mut dyn io::Write) -> Result<()>,
    {
        self.check()?;
        if !self.is_fragment_requested(id) {
            return body(self, w);
        }
        let depth = &self.state.fragment_depth;
        depth.set(depth.get() + 1);
        let _guard = DepthGuard(depth);
        body(self, w)
    }

    pub fn is_fragment_requested(&self, id: &str) -> bool {
        self.state
            .fragments
            .as_ref()
            .is_some_and(|ids| ids.contains(id))
    }

    /// Whether this render was restricted to a set of fragments.
    pub fn is_rendering_fragments(&self) -> bool {
        self.state.fragments.is_some()
    }

    fn first_emission(&self, id: &str) -> bool {
        self.state.emitted.borrow_mut().insert(id.to_string())
    }
}

struct DepthGuard<'s>(&'s Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Discards writes unless a requested fragment is open.
struct FragmentGate<'w, 's> {
    inner: &'w mut dyn io::Write,
    depth: &'s Cell<usize>,
}

impl io::Write for FragmentGate<'_, '_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.depth.get() == 0 {
            return Ok(buf.len());
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Render `component` to `w`.
pub fn render<C: Component + ?Sized>(
    component: &C,
    options: RenderOptions<'_>,
    w: &mut dyn io::Write,
) -> Result<()> {
    let state = RenderState {
        cancel: options.cancel,
        fragments: options.fragments.map(|ids| ids.into_iter().collect()),
        fragment_depth: Cell::new(0),
        emitted: RefCell::new(HashSet::new()),
    };
    let ctx = RenderContext {
        state: &state,
        children: options.children,
    };

    if state.fragments.is_none() {
        return component.render(&ctx, w);
    }
    log::trace!("rendering fragments {:?}", state.fragments);
    let mut gate = FragmentGate {
        inner: w,
        depth: &state.fragment_depth,
    };
    component.render(&ctx, &mut gate)
}

pub fn render_to_string<C: Component + ?Sized>(component: &C) -> Result<String> {
    render_with_options_to_string(component, RenderOptions::default())
}

/// Render only the fragments named in `ids`.
pub fn render_fragments_to_string<C, I, S>(component: &C, ids: I) -> Result<String>
where
    C: Component + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    render_with_options_to_string(component, RenderOptions::default().fragments(ids))
}

pub fn render_with_options_to_string<C: Component + ?Sized>(
    component: &C,
    options: RenderOptions<'_>,
) -> Result<String> {
    let mut buf = Vec::new();
    render(component, options, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
