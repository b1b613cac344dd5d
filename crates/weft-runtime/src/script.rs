//! Script templates and event handler values.

use std::borrow::Cow;

use serde::Serialize;

use crate::{Error, Result};

/// A call to a function generated from a `script` template.
///
/// The function definition is written once per render in a `<script>`
/// element; the handler attribute receives the call expression with JSON
/// encoded arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptCall {
    function_name: String,
    definition: String,
    args: Vec<String>,
    error: Option<String>,
}

impl ScriptCall {
    pub fn new(prefix: &str, params: &[&str], body: &str) -> Self {
        let params = params.join(", ");
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(params.as_bytes());
        hasher.update(body.as_bytes());
        let function_name = format!("__weft_{prefix}_{:08x}", hasher.finalize());
        let definition = format!("function {function_name}({params}) {{{body}}}");
        Self {
            function_name,
            definition,
            args: Vec::new(),
            error: None,
        }
    }

    /// Append a JSON encoded argument. An encoding failure is reported when
    /// the call is rendered.
    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(json) => self.args.push(json),
            Err(err) => {
                log::warn!("cannot encode argument for {}: {err}", self.function_name);
                self.error.get_or_insert_with(|| err.to_string());
                self.args.push("null".to_string());
            }
        }
        self
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// The function definition, without the surrounding `<script>` element.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// The call expression, e.g. `__weft_notify_0badf00d("hi")`.
    pub fn call_expression(&self) -> Result<String> {
        if let Some(err) = &self.error {
            return Err(Error::Render(format!(
                "script {}: {err}",
                self.function_name
            )));
        }
        Ok(format!("{}({})", self.function_name, self.args.join(",")))
    }
}

/// Values accepted by `on*` event handler attributes.
pub trait ScriptValue {
    /// Script templates whose definitions must precede the element.
    fn scripts(&self) -> Vec<&ScriptCall> {
        Vec::new()
    }

    fn call(&self) -> Result<Cow<'_, str>>;
}

impl ScriptValue for ScriptCall {
    fn scripts(&self) -> Vec<&ScriptCall> {
        vec![self]
    }

    fn call(&self) -> Result<Cow<'_, str>> {
        self.call_expression().map(Cow::Owned)
    }
}

/// Inline JavaScript written by the template author.
impl ScriptValue for str {
    fn call(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl ScriptValue for String {
    fn call(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self.as_str()))
    }
}

impl<T: ScriptValue + ?Sized> ScriptValue for &T {
    fn scripts(&self) -> Vec<&ScriptCall> {
        (**self).scripts()
    }

    fn call(&self) -> Result<Cow<'_, str>> {
        (**self).call()
    }
}

/// Encode a value for a `{{ expr }}` island in a `<script>` element.
///
/// The value is written as JSON with `<`, `>` and `&` escaped, so a string
/// cannot close the element. Inside a JavaScript string literal the
/// surrounding quotes of a string are dropped and every quote character is
/// escaped instead.
pub fn script_content<T: Serialize + ?Sized>(value: &T, inside_string: bool) -> Result<String> {
    let json = serde_json::to_string(value).map_err(Error::custom)?;
    let json = if inside_string {
        let inner = json
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(&json);
        escape_quotes(inner)
    } else {
        json
    };
    Ok(escape_markup(&json))
}

fn escape_markup(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_quotes(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut chars = json.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('"') => out.push_str("\\u0022"),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\u0022"),
            '\'' => out.push_str("\\u0027"),
            '`' => out.push_str("\\u0060"),
            _ => out.push(c),
        }
    }
    out
}
