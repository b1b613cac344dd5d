use std::fmt;

use crate::cursor::Range;

/// What a diagnostic is about. Structural checks come first, then checks that
/// need component signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Markup structure
    VoidElementWithChildren,
    SelfClosingNonVoid,
    DuplicateAttribute,
    IllegalNesting,

    // Component symbols
    UnknownComponent,
    MissingComponentAttribute,
    UnknownComponentAttribute,
    ArgumentCountMismatch,

    // Code generation
    UnresolvedSymbols,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::VoidElementWithChildren
            | Self::SelfClosingNonVoid
            | Self::UnknownComponentAttribute
            | Self::UnresolvedSymbols => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Base message, used when the call site gives no detail.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::VoidElementWithChildren => "void element cannot have children",
            Self::SelfClosingNonVoid => "non-void element is self-closed",
            Self::DuplicateAttribute => "duplicate attribute",
            Self::IllegalNesting => "illegal element nesting",
            Self::UnknownComponent => "unknown component",
            Self::MissingComponentAttribute => "missing component attribute",
            Self::UnknownComponentAttribute => "unknown component attribute",
            Self::ArgumentCountMismatch => "wrong number of arguments",
            Self::UnresolvedSymbols => "component signature not found",
        }
    }

    /// Template for detailed messages; `{}` is replaced by the detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::VoidElementWithChildren => "`<{}>` is a void element and cannot have children".to_string(),
            Self::SelfClosingNonVoid => "`<{}>` is not a void element and should not self-close".to_string(),
            Self::DuplicateAttribute => "attribute `{}` is set more than once".to_string(),
            Self::UnknownComponent => "component `{}` is not defined".to_string(),
            Self::UnresolvedSymbols => {
                "signature of `{}` not found; attributes are passed as a props object".to_string()
            }
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// `None` gives [`Self::fallback_message`]; `Some(detail)` fills the custom template.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A secondary location shown next to the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub range: Range,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub range: Range,
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, range: Range, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
            range,
            related: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.range.from, self.message)?;
        for related in &self.related {
            write!(f, " (related: {} at {})", related.message, related.range.from)?;
        }
        Ok(())
    }
}
