use std::borrow::Cow;

use crate::url::FAILED_SANITIZATION_URL;
use crate::{SafeUrl, UrlValue, sanitize_url};

#[test]
fn allowed_schemes_pass() {
    for url in [
        "http://example.com",
        "HTTPS://example.com/a?b=c",
        "mailto:someone@example.com",
        "tel:+1-555-0100",
        "ftp://files.example.com",
        "ftps://files.example.com",
    ] {
        let (out, rejected) = sanitize_url(url);
        assert_eq!(out, url);
        assert!(!rejected, "{url}");
    }
}

#[test]
fn relative_urls_pass() {
    for url in ["/a/b", "page.html", "?q=1", "#top", "/search?q=a:b", ""] {
        let (out, rejected) = sanitize_url(url);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, url);
        assert!(!rejected, "{url}");
    }
}

#[test]
fn other_schemes_are_replaced() {
    for url in [
        "javascript:alert(1)",
        "JavaScript:alert(1)",
        "data:text/html;base64,PHNjcmlwdD4=",
        "vbscript:msgbox",
    ] {
        let (out, rejected) = sanitize_url(url);
        assert_eq!(out, FAILED_SANITIZATION_URL);
        assert!(rejected, "{url}");
    }
}

#[test]
fn safe_url_skips_checks() {
    let url = SafeUrl::new("javascript:void(0)");
    assert_eq!(url.to_url(), "javascript:void(0)");
    assert_eq!(url.to_string(), "javascript:void(0)");
    assert_eq!("javascript:void(0)".to_url(), FAILED_SANITIZATION_URL);
    assert_eq!(String::from("/ok").to_url(), "/ok");
}
