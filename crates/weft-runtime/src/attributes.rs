//! Spread attributes and the generic props object.

use std::collections::BTreeMap;

use weft_core::html::{escape_attr, is_url_attribute, is_valid_attribute_name};

use crate::url::{SafeUrl, sanitize_url};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    Str(String),
    /// `true` renders the bare name, `false` omits the attribute.
    Bool(bool),
    /// A URL exempt from scheme checks.
    Url(SafeUrl),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<SafeUrl> for AttributeValue {
    fn from(value: SafeUrl) -> Self {
        Self::Url(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),+) => {
        $(impl From<$ty> for AttributeValue {
            fn from(value: $ty) -> Self {
                Self::Str(value.to_string())
            }
        })+
    };
}

impl_from_number!(i32, i64, u32, u64, usize, f64);

/// Ordered attribute list.
///
/// Used for `{ attrs... }` spreads and as the props object passed to tag-form
/// components whose signature is unknown at compile time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, AttributeValue)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Attributes::insert`].
    pub fn set(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace `name`, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter().position(|(n, _)| *n == name) {
            Some(i) => self.0[i].1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// String value of `name`, if it is a string or URL.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            AttributeValue::Str(s) => Some(s),
            AttributeValue::Url(url) => Some(url.as_str()),
            AttributeValue::Bool(_) => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

fn push_attribute(out: &mut String, name: &str, value: &AttributeValue) {
    if !is_valid_attribute_name(name) {
        log::debug!("skipped spread attribute with invalid name {name:?}");
        return;
    }
    let rendered = match value {
        AttributeValue::Bool(false) => return,
        AttributeValue::Bool(true) => None,
        AttributeValue::Str(s) if is_url_attribute(name) => Some(sanitize_url(s).0.into_owned()),
        AttributeValue::Str(s) => Some(s.clone()),
        AttributeValue::Url(url) => Some(url.as_str().to_string()),
    };
    out.push(' ');
    out.push_str(name);
    if let Some(value) = rendered {
        out.push_str("=\"");
        out.push_str(&escape_attr(&value));
        out.push('"');
    }
}

/// Values accepted by `{ attrs... }`.
pub trait SpreadAttributes {
    /// Append ` name="value"` pairs to `out`.
    fn write_attributes(&self, out: &mut String);
}

impl SpreadAttributes for Attributes {
    fn write_attributes(&self, out: &mut String) {
        for (name, value) in self.iter() {
            push_attribute(out, name, value);
        }
    }
}

impl<K: AsRef<str>> SpreadAttributes for BTreeMap<K, AttributeValue> {
    fn write_attributes(&self, out: &mut String) {
        for (name, value) in self {
            push_attribute(out, name.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>> SpreadAttributes for [(K, AttributeValue)] {
    fn write_attributes(&self, out: &mut String) {
        for (name, value) in self {
            push_attribute(out, name.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>> SpreadAttributes for Vec<(K, AttributeValue)> {
    fn write_attributes(&self, out: &mut String) {
        self.as_slice().write_attributes(out)
    }
}

impl<T: SpreadAttributes> SpreadAttributes for Option<T> {
    fn write_attributes(&self, out: &mut String) {
        if let Some(attrs) = self {
            attrs.write_attributes(out);
        }
    }
}

impl<T: SpreadAttributes + ?Sized> SpreadAttributes for &T {
    fn write_attributes(&self, out: &mut String) {
        (**self).write_attributes(out)
    }
}
