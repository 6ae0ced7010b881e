//! Abstract Syntax Tree types for the pin script language

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric + underscore, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - a complete script
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub statements: Vec<Spanned<Statement>>,
}

/// Top-level statement in a script
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// View declaration: `view name [width: 10] { ... }`
    View(ViewDecl),
    /// Direction of the pass: `direction rtl`
    Direction(Spanned<Identifier>),
    /// Pin chain: `a.below(of: b).margin_top(10)`
    Chain(PinChain),
}

/// View declaration with optional modifiers and children
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDecl {
    pub name: Spanned<Identifier>,
    pub modifiers: Vec<Spanned<Argument>>,
    pub children: Vec<Spanned<ViewDecl>>,
}

/// A subject followed by one or more calls, laid out once at the end
#[derive(Debug, Clone, PartialEq)]
pub struct PinChain {
    pub subject: Spanned<Identifier>,
    pub calls: Vec<Spanned<Call>>,
}

/// One call in a chain: `name(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Spanned<Identifier>,
    pub args: Vec<Spanned<Argument>>,
}

impl Call {
    /// Argument with the given label
    pub fn labeled(&self, label: &str) -> Option<&Spanned<Argument>> {
        self.args
            .iter()
            .find(|a| a.node.label.as_ref().is_some_and(|l| l.node.as_str() == label))
    }

    /// Unlabeled arguments in order
    pub fn positional(&self) -> impl Iterator<Item = &Spanned<Argument>> {
        self.args.iter().filter(|a| a.node.label.is_none())
    }
}

/// Argument, `label: value` or a bare value
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub label: Option<Spanned<Identifier>>,
    pub value: Spanned<Value>,
}

/// Argument value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    /// Bare word such as `center`; `.center` parses to the same value
    Word(Identifier),
    /// `[a, b]`
    List(Vec<Spanned<Value>>),
    /// `view.member`, an edge or anchor of a view
    Member {
        view: Spanned<Identifier>,
        member: Spanned<Identifier>,
    },
}

impl Value {
    /// Short description used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "a number",
            Value::Word(_) => "a word",
            Value::List(_) => "a list",
            Value::Member { .. } => "a member reference",
        }
    }
}
