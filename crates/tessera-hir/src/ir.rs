//! Bound tree for the overload passes.
//!
//! A bound syntax tree: identifiers carry the declaration they resolved to,
//! calls carry the signature the resolver picked, and declared types are kept
//! as written so later passes can reason about them syntactically.

use tessera_diagnostics::Span;
use tessera_types::TypeSyntax;

use crate::registry::DeclHandle;

/// Member visibility in the target language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Internal,
    /// Visible to derived types and to the declaring assembly
    ProtectedInternal,
    /// Visible to derived types inside the declaring assembly only
    PrivateProtected,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::ProtectedInternal => "protected internal",
            Visibility::PrivateProtected => "private protected",
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of callable a declaration is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Function,
    Method,
    Constructor,
}

/// A module (one compilation unit)
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub name: String,
    /// Free functions in declaration order (overload signatures included)
    pub functions: Vec<FunctionDecl>,
    pub classes: Vec<ClassDecl>,
}

/// A class declaration
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub handle: DeclHandle,
    pub name: String,
    /// Methods and constructors in declaration order
    pub members: Vec<FunctionDecl>,
    pub span: Span,
}

/// A function, method or constructor declaration.
///
/// Overload signatures are declarations without a body.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub handle: DeclHandle,
    pub name: String,
    pub kind: MemberKind,
    /// Generic type parameter names (e.g., T, K in function<T, K>)
    pub type_params: Vec<String>,
    /// Parameter declarations; their syntactic facts live in the registry
    pub params: Vec<DeclHandle>,
    pub return_type: Option<TypeSyntax>,
    pub body: Option<Vec<Stmt>>,
    /// Visibility as written in source, if any
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub span: Span,
}

impl FunctionDecl {
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Statements. Branch bodies are plain statement lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `let`/`const` binding of a registered local
    Let {
        decl: DeclHandle,
        name: String,
        ty: Option<TypeSyntax>,
        mutable: bool,
        init: Option<Expr>,
    },
    Expr(Expr),
    Return(Option<Expr>),
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    /// C-style for loop
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        update: Option<Expr>,
        body: Vec<Stmt>,
    },
    Break,
    Continue,
    Throw(Expr),
    /// `try`, with optional `catch` and `finally`
    Try {
        body: Vec<Stmt>,
        catch: Option<CatchClause>,
        finally: Option<Vec<Stmt>>,
    },
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    /// Nested block `{ ... }`
    Block(Vec<Stmt>),
    /// Empty statement `;`
    Empty,
}

/// One `case`/`default` arm
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// `None` for `default`
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<DeclHandle>,
    pub body: Vec<Stmt>,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Template literal: quasis.len() == exprs.len() + 1
    Template {
        quasis: Vec<String>,
        exprs: Vec<Expr>,
    },

    /// Identifier reference, bound to its declaration when resolved
    Ident {
        name: String,
        decl: Option<DeclHandle>,
    },
    This,

    Member {
        object: Box<Expr>,
        property: String,
        decl: Option<DeclHandle>,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },

    /// Function or method call
    Call {
        callee: Box<Expr>,
        /// Explicit type arguments, as in `isType<number>(x)`
        type_args: Vec<TypeSyntax>,
        args: Vec<Expr>,
        /// Signature declaration the resolver bound this call to
        signature: Option<DeclHandle>,
    },
    /// Instantiation: new C(args)
    New {
        callee: Box<Expr>,
        type_args: Vec<TypeSyntax>,
        args: Vec<Expr>,
        signature: Option<DeclHandle>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// `c ? a : b`
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },

    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },

    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    /// Spread element in an array literal or argument list
    Spread(Box<Expr>),

    /// `expr as T`
    As {
        expr: Box<Expr>,
        ty: TypeSyntax,
    },
    /// `expr!`
    NonNull(Box<Expr>),
    /// `(expr)`
    Paren(Box<Expr>),

    /// Arrow function or function expression
    Closure {
        params: Vec<DeclHandle>,
        body: Vec<Stmt>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>, decl: DeclHandle) -> Expr {
        Expr::Ident {
            name: name.into(),
            decl: Some(decl),
        }
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::String(value.into())
    }

    /// Boolean value if this is a boolean literal, looking through parentheses
    pub fn as_bool_literal(&self) -> Option<bool> {
        match self {
            Expr::Bool(b) => Some(*b),
            Expr::Paren(inner) => inner.as_bool_literal(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
    Pos,
    TypeOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `===`
    Eq,
    /// `!==`
    Ne,
    LooseEq,
    LooseNe,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Short-circuiting operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    /// `??`
    Coalesce,
}
