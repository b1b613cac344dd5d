//! Template syntax tree.
//!
//! Built once per file by [`crate::parser::parse`] and never mutated
//! afterwards. Nodes own their children; there are no parent links.

use crate::cursor::{LineIndex, Range};
use crate::parser::scan::{Lang, is_ident_char, matching_close, split_top_level};

/// A parsed `.weft` file.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateFile {
    pub package: Package,
    pub nodes: Vec<TopLevelNode>,
    /// Line table of the source, used to build source maps.
    pub line_index: LineIndex,
}

impl TemplateFile {
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.nodes.iter().filter_map(|node| match node {
            TopLevelNode::Template(t) => Some(t),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub range: Range,
}

/// Host-language text copied through verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    pub value: String,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TopLevelNode {
    /// A `use` declaration.
    Import(Expression),
    /// Any other Rust item, or a comment.
    HostCode(Expression),
    Template(Template),
    Css(CssTemplate),
    Script(ScriptTemplate),
}

/// `name: Type` in a declaration's parameter list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    /// Whether this parameter collects attributes not matched by name.
    pub fn is_rest(&self) -> bool {
        let ty = self.ty.trim_start_matches('&').trim();
        ty == "Attributes" || ty.ends_with("::Attributes")
    }
}

/// `[pub] template name(params) { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub visibility: Option<String>,
    pub name: String,
    pub name_range: Range,
    /// Parameter list text, without the parentheses.
    pub params_expr: Expression,
    pub params: Vec<Param>,
    pub children: Vec<Node>,
    pub range: Range,
}

/// `[pub] css name(params) { prop: value; ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct CssTemplate {
    pub visibility: Option<String>,
    pub name: String,
    pub name_range: Range,
    pub params_expr: Expression,
    pub properties: Vec<CssProperty>,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CssProperty {
    Constant {
        name: String,
        value: String,
        range: Range,
    },
    Expression {
        name: String,
        expr: Expression,
        range: Range,
    },
}

/// `[pub] script name(params) { javascript }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptTemplate {
    pub visibility: Option<String>,
    pub name: String,
    pub name_range: Range,
    pub params_expr: Expression,
    pub params: Vec<Param>,
    pub body: Expression,
    pub range: Range,
}

/// Whitespace that followed a node in the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrailingSpace {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl TrailingSpace {
    pub fn from_whitespace(ws: &str) -> Self {
        if ws.is_empty() {
            Self::None
        } else if ws.contains('\n') {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
    RawElement(RawElement),
    DocType(DocType),
    Comment(Comment),
    If(IfExpression),
    Switch(SwitchExpression),
    For(ForExpression),
    Fragment(Fragment),
    /// `{{ statements }}`
    HostCode(Expression),
    StringExpression(StringExpression),
    CallTemplate(CallTemplate),
    ElementComponent(ElementComponent),
    Children(ChildrenExpression),
}

impl Node {
    pub fn range(&self) -> Range {
        match self {
            Node::Element(n) => n.range,
            Node::Text(n) => n.range,
            Node::RawElement(n) => n.range,
            Node::DocType(n) => n.range,
            Node::Comment(n) => n.range,
            Node::If(n) => n.range,
            Node::Switch(n) => n.range,
            Node::For(n) => n.range,
            Node::Fragment(n) => n.range,
            Node::HostCode(n) => n.range,
            Node::StringExpression(n) => n.range,
            Node::CallTemplate(n) => n.range,
            Node::ElementComponent(n) => n.range,
            Node::Children(n) => n.range,
        }
    }

    /// Whitespace rendered after this node. Control flow and host code
    /// never render surrounding whitespace.
    pub fn trailing_space(&self) -> TrailingSpace {
        match self {
            Node::Element(n) => n.trailing_space,
            Node::Text(n) => n.trailing_space,
            Node::RawElement(n) => n.trailing_space,
            Node::DocType(n) => n.trailing_space,
            Node::Comment(n) => n.trailing_space,
            Node::StringExpression(n) => n.trailing_space,
            Node::CallTemplate(n) => n.trailing_space,
            Node::ElementComponent(n) => n.trailing_space,
            Node::Children(n) => n.trailing_space,
            Node::If(_) | Node::Switch(_) | Node::For(_) | Node::Fragment(_) | Node::HostCode(_) => {
                TrailingSpace::None
            }
        }
    }

    pub(crate) fn set_trailing_space(&mut self, space: TrailingSpace) {
        let slot = match self {
            Node::Element(n) => &mut n.trailing_space,
            Node::Text(n) => &mut n.trailing_space,
            Node::RawElement(n) => &mut n.trailing_space,
            Node::DocType(n) => &mut n.trailing_space,
            Node::Comment(n) => &mut n.trailing_space,
            Node::StringExpression(n) => &mut n.trailing_space,
            Node::CallTemplate(n) => &mut n.trailing_space,
            Node::ElementComponent(n) => &mut n.trailing_space,
            Node::Children(n) => &mut n.trailing_space,
            _ => return,
        };
        *slot = space;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub name_range: Range,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Written as `<name/>`.
    pub self_closing: bool,
    /// Range of the explicit end tag, if any.
    pub end_tag: Option<Range>,
    pub range: Range,
    pub trailing_space: TrailingSpace,
}

impl Element {
    pub fn is_void(&self) -> bool {
        is_void_element(&self.name)
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// `<script>` or `<style>`: the body is not parsed as markup.
#[derive(Clone, Debug, PartialEq)]
pub struct RawElement {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// The whole body as written.
    pub contents: String,
    pub contents_range: Range,
    /// The body split at `{{ expr }}` islands. Only JavaScript `<script>`
    /// bodies have islands; anything else is a single text part.
    pub parts: Vec<RawPart>,
    pub range: Range,
    pub trailing_space: TrailingSpace,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RawPart {
    Text { value: String, range: Range },
    /// A value written through the script encoder. `in_string` is set when
    /// the island sits inside a JavaScript string literal.
    Expression { expr: Expression, in_string: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocType {
    pub value: String,
    pub range: Range,
    pub trailing_space: TrailingSpace,
}

/// `<!-- ... -->`, rendered verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub contents: String,
    pub range: Range,
    pub trailing_space: TrailingSpace,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    pub range: Range,
    pub trailing_space: TrailingSpace,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfExpression {
    pub cond: Expression,
    pub then: Vec<Node>,
    pub else_ifs: Vec<ElseIf>,
    pub otherwise: Option<Vec<Node>>,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElseIf {
    pub cond: Expression,
    pub then: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchExpression {
    pub expr: Expression,
    pub cases: Vec<Case>,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Case {
    /// `None` for `default:`.
    pub pattern: Option<Expression>,
    pub children: Vec<Node>,
    pub range: Range,
}

/// `for pattern in iter {`
#[derive(Clone, Debug, PartialEq)]
pub struct ForExpression {
    pub pattern: Expression,
    pub iter: Expression,
    pub children: Vec<Node>,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub id: String,
    pub id_range: Range,
    pub children: Vec<Node>,
    pub range: Range,
}

/// `{ expr }` in an element body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringExpression {
    pub expr: Expression,
    pub range: Range,
    pub trailing_space: TrailingSpace,
}

/// `@expr`, optionally with a children block.
#[derive(Clone, Debug, PartialEq)]
pub struct CallTemplate {
    pub expr: Expression,
    pub children: Option<Vec<Node>>,
    pub range: Range,
    pub trailing_space: TrailingSpace,
}

impl CallTemplate {
    /// Callee path and argument texts, when the expression is a plain call:
    /// a path followed by one argument list that ends the expression.
    pub fn call_parts(&self) -> Option<(&str, Vec<&str>)> {
        let value = self.expr.value.as_str();
        let open = value.find('(')?;
        let callee = value[..open].trim();
        let is_path = !callee.is_empty()
            && callee
                .split("::")
                .all(|segment| !segment.is_empty() && segment.chars().all(is_ident_char));
        if !is_path {
            return None;
        }
        let close = open + 1 + matching_close(&value[open + 1..], Lang::Rust)?;
        if close + 1 != value.len() {
            return None;
        }
        let inner = &value[open + 1..close];
        let args = if inner.trim().is_empty() {
            Vec::new()
        } else {
            split_top_level(inner, ',')
                .into_iter()
                .map(str::trim)
                .collect()
        };
        Some((callee, args))
    }
}

/// `<Name attr=...>`: a component invoked with tag syntax.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementComponent {
    /// As written, e.g. `UserCard` or `ui::UserCard`.
    pub name: String,
    pub name_range: Range,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    pub self_closing: bool,
    pub range: Range,
    pub trailing_space: TrailingSpace,
}

/// `{ children... }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildrenExpression {
    pub range: Range,
    pub trailing_space: TrailingSpace,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeKey {
    pub name: String,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attribute {
    /// `name="value"`; `value` is unescaped.
    Constant {
        key: AttributeKey,
        value: String,
        single_quote: bool,
        range: Range,
    },
    /// `name`
    BoolConstant { key: AttributeKey, range: Range },
    /// `name={ expr }`
    Expression {
        key: AttributeKey,
        expr: Expression,
        range: Range,
    },
    /// `name?={ expr }`
    BoolExpression {
        key: AttributeKey,
        expr: Expression,
        range: Range,
    },
    /// `if cond { attrs } else { attrs }`
    Conditional {
        cond: Expression,
        then: Vec<Attribute>,
        otherwise: Vec<Attribute>,
        range: Range,
    },
    /// `{ expr... }`
    Spread { expr: Expression, range: Range },
}

impl Attribute {
    pub fn key(&self) -> Option<&AttributeKey> {
        match self {
            Attribute::Constant { key, .. }
            | Attribute::BoolConstant { key, .. }
            | Attribute::Expression { key, .. }
            | Attribute::BoolExpression { key, .. } => Some(key),
            Attribute::Conditional { .. } | Attribute::Spread { .. } => None,
        }
    }

    pub fn range(&self) -> Range {
        match self {
            Attribute::Constant { range, .. }
            | Attribute::BoolConstant { range, .. }
            | Attribute::Expression { range, .. }
            | Attribute::BoolExpression { range, .. }
            | Attribute::Conditional { range, .. }
            | Attribute::Spread { range, .. } => *range,
        }
    }
}
