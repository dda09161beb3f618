//! Tree builders shared by the unit tests of this crate.

use tessera_diagnostics::Span;
use tessera_hir::{
    BinaryOp, DeclHandle, DeclKind, DeclRegistry, DeclSpec, Expr, FunctionDecl, MemberKind,
    Stmt, SymbolId, Visibility,
};
use tessera_types::{TypeKeyword, TypeSyntax};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn number() -> TypeSyntax {
    TypeSyntax::Keyword(TypeKeyword::Number)
}

pub fn string() -> TypeSyntax {
    TypeSyntax::Keyword(TypeKeyword::String)
}

pub fn char_ty() -> TypeSyntax {
    TypeSyntax::named("char")
}

pub fn boolean() -> TypeSyntax {
    TypeSyntax::Keyword(TypeKeyword::Boolean)
}

/// `isType<ty>(name)`
pub fn is_type(ty: TypeSyntax, name: &str, param: DeclHandle) -> Expr {
    Expr::Call {
        callee: Box::new(Expr::Ident {
            name: "isType".to_string(),
            decl: None,
        }),
        type_args: vec![ty],
        args: vec![Expr::ident(name, param)],
        signature: None,
    }
}

/// `callee(args)` with an unresolved callee
pub fn call(callee: &str, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: Box::new(Expr::Ident {
            name: callee.to_string(),
            decl: None,
        }),
        type_args: vec![],
        args,
        signature: None,
    }
}

pub fn add(left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op: BinaryOp::Add,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn ret(expr: Expr) -> Stmt {
    Stmt::Return(Some(expr))
}

/// Registry wrapper with shorthands for declaring parameters and overloads
pub struct Fixture {
    pub registry: DeclRegistry,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            registry: DeclRegistry::new(),
        }
    }

    pub fn param(&mut self, name: &str, ty: TypeSyntax) -> DeclHandle {
        self.registry
            .declare_unique(name, DeclSpec::new(DeclKind::Parameter).with_type(ty))
    }

    pub fn optional_param(&mut self, name: &str, ty: TypeSyntax) -> DeclHandle {
        self.registry.declare_unique(
            name,
            DeclSpec::new(DeclKind::Parameter).with_type(ty).optional(),
        )
    }

    pub fn rest_param(&mut self, name: &str, ty: TypeSyntax) -> DeclHandle {
        self.registry
            .declare_unique(name, DeclSpec::new(DeclKind::Parameter).with_type(ty).rest())
    }

    pub fn variable(&mut self, name: &str, ty: TypeSyntax) -> DeclHandle {
        self.registry
            .declare_unique(name, DeclSpec::new(DeclKind::Variable).with_type(ty))
    }

    pub fn symbol(&mut self, name: &str) -> SymbolId {
        self.registry.new_symbol(name)
    }

    pub fn callable(&mut self, symbol: SymbolId, kind: DeclKind, params: Vec<DeclHandle>) -> DeclHandle {
        self.registry
            .declare(symbol, DeclSpec::new(kind).with_params(params))
    }

    fn declaration(
        &mut self,
        symbol: SymbolId,
        kind: MemberKind,
        params: Vec<DeclHandle>,
        return_type: Option<TypeSyntax>,
        body: Option<Vec<Stmt>>,
    ) -> FunctionDecl {
        let decl_kind = match kind {
            MemberKind::Function => DeclKind::Function,
            MemberKind::Method => DeclKind::Method,
            MemberKind::Constructor => DeclKind::Constructor,
        };
        let handle = self.callable(symbol, decl_kind, params.clone());
        let name = self
            .registry
            .facts(handle)
            .map(|f| f.name.clone())
            .unwrap_or_default();
        FunctionDecl {
            handle,
            name,
            kind,
            type_params: vec![],
            params,
            return_type,
            body,
            visibility: None,
            is_static: false,
            span: Span::DUMMY,
        }
    }

    /// Declare a free function overload and return its HIR declaration
    pub fn function(
        &mut self,
        symbol: SymbolId,
        params: Vec<DeclHandle>,
        return_type: Option<TypeSyntax>,
        body: Option<Vec<Stmt>>,
    ) -> FunctionDecl {
        self.declaration(symbol, MemberKind::Function, params, return_type, body)
    }

    /// Declare a class method overload
    pub fn method(
        &mut self,
        symbol: SymbolId,
        params: Vec<DeclHandle>,
        return_type: Option<TypeSyntax>,
        body: Option<Vec<Stmt>>,
        visibility: Option<Visibility>,
    ) -> FunctionDecl {
        let mut decl = self.declaration(symbol, MemberKind::Method, params, return_type, body);
        decl.visibility = visibility;
        decl
    }
}
