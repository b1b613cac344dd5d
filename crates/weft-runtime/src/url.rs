//! URL scheme sanitization.

use std::borrow::Cow;
use std::fmt;

/// Replacement written for URLs with a disallowed scheme.
pub const FAILED_SANITIZATION_URL: &str = "about:invalid#WeftFailedSanitizationURL";

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "ftp", "ftps"];

/// Sanitize a URL, returning the value to render and whether it was rejected.
///
/// Only URLs with an explicit scheme are checked: a `:` that appears before
/// any `/`. Relative URLs pass through untouched.
pub fn sanitize_url(url: &str) -> (Cow<'_, str>, bool) {
    let Some(colon) = url.find(':') else {
        return (Cow::Borrowed(url), false);
    };
    let scheme = &url[..colon];
    if scheme.contains('/') {
        return (Cow::Borrowed(url), false);
    }
    if ALLOWED_SCHEMES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
    {
        return (Cow::Borrowed(url), false);
    }
    log::debug!("rejected URL with scheme {scheme:?}");
    (Cow::Borrowed(FAILED_SANITIZATION_URL), true)
}

/// A URL the author vouches for. Skips scheme checks; still entity-escaped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SafeUrl(String);

impl SafeUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Values accepted by URL attributes.
pub trait UrlValue {
    fn to_url(&self) -> Cow<'_, str>;
}

impl UrlValue for str {
    fn to_url(&self) -> Cow<'_, str> {
        sanitize_url(self).0
    }
}

impl UrlValue for String {
    fn to_url(&self) -> Cow<'_, str> {
        sanitize_url(self).0
    }
}

impl UrlValue for Cow<'_, str> {
    fn to_url(&self) -> Cow<'_, str> {
        sanitize_url(self).0
    }
}

impl UrlValue for SafeUrl {
    fn to_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

impl<T: UrlValue + ?Sized> UrlValue for &T {
    fn to_url(&self) -> Cow<'_, str> {
        (**self).to_url()
    }
}
