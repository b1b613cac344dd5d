/// Convert PascalCase or camelCase to snake_case.
///
/// Tag-form components are written `<UserCard>` and resolve to the Rust
/// function `user_card`. Runs of capitals are treated as one word.
///
/// # Examples
/// ```
/// use weft_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("UserCard"), "user_card");
/// assert_eq!(to_snake_case("HTMLPage"), "html_page");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev_lower =
                i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_ascii_uppercase();
            if i > 0 && !result.ends_with('_') && (prev_lower || (prev_upper && next_lower)) {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else if c == '-' {
            result.push('_');
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert a `::`-separated component path to its function path, converting
/// only the last segment: `ui::UserCard` becomes `ui::user_card`.
pub fn component_fn_path(path: &str) -> String {
    match path.rsplit_once("::") {
        Some((prefix, name)) => format!("{prefix}::{}", to_snake_case(name)),
        None => to_snake_case(path),
    }
}

/// Whether `s` is a plain Rust identifier (ASCII subset).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
