//! CSS sanitization, `style` attribute values and generated CSS classes.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Replacement for property names that fail validation.
pub const UNSAFE_PROPERTY_NAME: &str = "zWeftUnsafeCSSPropertyName";
/// Replacement for property values that fail validation.
pub const UNSAFE_PROPERTY_VALUE: &str = "zWeftUnsafeCSSPropertyValue";

/// Sanitize one CSS declaration, returning `(name, value)`.
///
/// Names are trimmed and lowercased. Values that could escape the
/// declaration or smuggle script (comments, escapes, NUL, angle brackets,
/// `expression(`, `url(`) are replaced wholesale.
pub fn sanitize_css_property(name: &str, value: &str) -> (String, String) {
    let name = name.trim().to_ascii_lowercase();
    if !is_safe_property_name(&name) {
        return (
            UNSAFE_PROPERTY_NAME.to_string(),
            UNSAFE_PROPERTY_VALUE.to_string(),
        );
    }

    let value = value.trim();
    let safe = if name == "font-family" {
        is_safe_font_family(value)
    } else {
        is_safe_property_value(value)
    };
    if safe {
        (name, value.to_string())
    } else {
        log::debug!("rejected CSS value for `{name}`");
        (name, UNSAFE_PROPERTY_VALUE.to_string())
    }
}

fn is_safe_property_name(name: &str) -> bool {
    let body = name.strip_prefix('-').unwrap_or(name);
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_lowercase() || first == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-'))
}

fn has_forbidden_sequence(value: &str) -> bool {
    if value.contains("/*") || value.contains("*/") {
        return true;
    }
    if value.chars().any(|c| matches!(c, '\\' | '\0' | '<' | '>')) {
        return true;
    }
    let lower = value.to_ascii_lowercase();
    lower.contains("expression(") || lower.contains("url(")
}

fn is_safe_property_value(value: &str) -> bool {
    !value.is_empty()
        && !has_forbidden_sequence(value)
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    ' ' | '-' | '+' | '.' | ',' | '%' | '#' | '(' | ')' | '!' | '/' | '_'
                )
        })
}

fn is_safe_font_family(value: &str) -> bool {
    if value.is_empty() || has_forbidden_sequence(value) {
        return false;
    }
    value.split(',').all(|family| {
        let family = family.trim();
        if let Some(quote) = family.chars().next().filter(|c| matches!(c, '"' | '\'')) {
            let inner = &family[1..];
            return !inner.is_empty()
                && inner.ends_with(quote)
                && !inner[..inner.len() - 1].contains(quote);
        }
        !family.is_empty()
            && family
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
    })
}

/// A declaration list the author vouches for. Rendered without sanitization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SafeCss(pub String);

/// Values accepted by `style` attributes.
pub trait StyleValue {
    fn write_style(&self, out: &mut String);
}

fn push_declaration(out: &mut String, name: &str, value: &str) {
    let (name, value) = sanitize_css_property(name, value);
    out.push_str(&name);
    out.push(':');
    out.push_str(&value);
    out.push(';');
}

/// `"color: red; width: 2px"`: each declaration is sanitized separately.
impl StyleValue for str {
    fn write_style(&self, out: &mut String) {
        for declaration in self.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                push_declaration(out, name, value);
            }
        }
    }
}

impl StyleValue for String {
    fn write_style(&self, out: &mut String) {
        self.as_str().write_style(out)
    }
}

impl StyleValue for SafeCss {
    fn write_style(&self, out: &mut String) {
        let css = self.0.trim();
        if css.is_empty() {
            return;
        }
        out.push_str(css);
        if !css.ends_with(';') {
            out.push(';');
        }
    }
}

impl<K: AsRef<str>, V: AsRef<str>> StyleValue for (K, V) {
    fn write_style(&self, out: &mut String) {
        push_declaration(out, self.0.as_ref(), self.1.as_ref());
    }
}

impl<K: AsRef<str>, V: AsRef<str>> StyleValue for BTreeMap<K, V> {
    fn write_style(&self, out: &mut String) {
        for (name, value) in self {
            push_declaration(out, name.as_ref(), value.as_ref());
        }
    }
}

impl<T: StyleValue> StyleValue for [T] {
    fn write_style(&self, out: &mut String) {
        for item in self {
            item.write_style(out);
        }
    }
}

impl<T: StyleValue> StyleValue for Vec<T> {
    fn write_style(&self, out: &mut String) {
        self.as_slice().write_style(out)
    }
}

impl<T: StyleValue, const N: usize> StyleValue for [T; N] {
    fn write_style(&self, out: &mut String) {
        self.as_slice().write_style(out)
    }
}

impl<T: StyleValue> StyleValue for Option<T> {
    fn write_style(&self, out: &mut String) {
        if let Some(value) = self {
            value.write_style(out);
        }
    }
}

impl<T: StyleValue + ?Sized> StyleValue for &T {
    fn write_style(&self, out: &mut String) {
        (**self).write_style(out)
    }
}

/// A class generated from a `css` template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssClass {
    name: String,
    style: String,
}

impl CssClass {
    /// Build a class whose name is `prefix` plus a hash of its declarations,
    /// so identical bodies share one class.
    pub fn new(prefix: &str, declarations: impl Into<String>) -> Self {
        let declarations = declarations.into();
        let name = format!("{prefix}_{:08x}", crc32fast::hash(declarations.as_bytes()));
        let style = format!(".{name}{{{declarations}}}");
        Self { name, style }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule set, e.g. `.primary_1a2b3c4d{color:red;}`.
    pub fn style(&self) -> &str {
        &self.style
    }
}

/// Class names and CSS classes gathered from a `class` attribute value.
#[derive(Debug, Default)]
pub struct ClassList<'a> {
    names: Vec<Cow<'a, str>>,
    css: Vec<&'a CssClass>,
}

impl<'a> ClassList<'a> {
    pub fn push_name(&mut self, name: impl Into<Cow<'a, str>>) {
        let name = name.into();
        if !name.is_empty() && !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn push_class(&mut self, class: &'a CssClass) {
        self.push_name(class.name());
        self.css.push(class);
    }

    pub fn css(&self) -> &[&'a CssClass] {
        &self.css
    }

    /// Space separated, duplicates removed, first occurrence wins.
    pub fn joined(&self) -> String {
        self.names.join(" ")
    }
}

/// Values accepted by `class` attributes.
pub trait ClassValue {
    fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>);
}

impl ClassValue for str {
    fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>) {
        for name in self.split_whitespace() {
            out.push_name(name);
        }
    }
}

impl ClassValue for String {
    fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>) {
        self.as_str().collect_classes(out)
    }
}

impl ClassValue for CssClass {
    fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>) {
        out.push_class(self);
    }
}

impl<T: ClassValue> ClassValue for Option<T> {
    fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>) {
        if let Some(value) = self {
            value.collect_classes(out);
        }
    }
}

impl<T: ClassValue> ClassValue for [T] {
    fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>) {
        for item in self {
            item.collect_classes(out);
        }
    }
}

impl<T: ClassValue> ClassValue for Vec<T> {
    fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>) {
        self.as_slice().collect_classes(out)
    }
}

impl<T: ClassValue, const N: usize> ClassValue for [T; N] {
    fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>) {
        self.as_slice().collect_classes(out)
    }
}

impl<T: ClassValue + ?Sized> ClassValue for &T {
    fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>) {
        (**self).collect_classes(out)
    }
}

macro_rules! impl_class_value_tuple {
    ($($name:ident),+) => {
        impl<$($name: ClassValue),+> ClassValue for ($($name,)+) {
            #[allow(non_snake_case)]
            fn collect_classes<'a>(&'a self, out: &mut ClassList<'a>) {
                let ($($name,)+) = self;
                $($name.collect_classes(out);)+
            }
        }
    };
}

impl_class_value_tuple!(A, B);
impl_class_value_tuple!(A, B, C);
impl_class_value_tuple!(A, B, C, D);

/// `Some(value)` when `condition` holds, for conditional classes.
pub fn class_if<T>(value: T, condition: bool) -> Option<T> {
    condition.then_some(value)
}
