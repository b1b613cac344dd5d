#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Text utilities shared by the weft compiler and runtime.
//!
//! The compiler escapes constant markup at generation time and the runtime
//! escapes dynamic values at render time; both must agree byte for byte, so
//! the escaping tables live here.

pub mod colors;
pub mod html;
pub mod utils;

pub use colors::Colors;
pub use html::{
    escape_attr, escape_html, is_url_attribute, is_valid_attribute_name, unescape_html,
};

#[cfg(test)]
mod html_tests;
