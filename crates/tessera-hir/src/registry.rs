//! Declaration identity registry
//!
//! Every declaration in a compilation unit (variable, parameter, function,
//! member, ...) gets a [`DeclHandle`]: an index into an append-only arena of
//! syntactic fact records. Declarations that share one name in one scope
//! share a [`SymbolId`]; overloads of a function are the declarations of
//! its symbol.

use tessera_diagnostics::Span;
use tessera_types::TypeSyntax;

/// Opaque reference to a declaration's syntactic facts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclHandle(u32);

impl DeclHandle {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DeclHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Identity of a named symbol (all declarations sharing one name in one scope)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Kind of declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Variable,
    Parameter,
    Property,
    Function,
    Method,
    /// Call signature of an interface or type literal
    CallSignature,
    Constructor,
    /// `new (...)` signature of an interface or type literal
    ConstructSignature,
    Class,
    Interface,
}

impl DeclKind {
    /// Callable with a plain call expression
    pub fn is_function_like(self) -> bool {
        matches!(self, DeclKind::Function | DeclKind::Method | DeclKind::CallSignature)
    }

    /// Callable only through `new`
    pub fn is_construct_like(self) -> bool {
        matches!(self, DeclKind::Constructor | DeclKind::ConstructSignature)
    }
}

/// Everything the registry records about one declaration
#[derive(Debug, Clone)]
pub struct DeclFacts {
    pub name: String,
    pub symbol: SymbolId,
    pub kind: DeclKind,
    /// Declared type annotation (return type for callables)
    pub declared_type: Option<TypeSyntax>,
    pub is_optional: bool,
    pub is_rest: bool,
    /// Parameter declarations, for callables
    pub params: Vec<DeclHandle>,
    pub span: Span,
}

/// Description of a declaration about to be registered
#[derive(Debug, Clone)]
pub struct DeclSpec {
    pub kind: DeclKind,
    pub declared_type: Option<TypeSyntax>,
    pub is_optional: bool,
    pub is_rest: bool,
    pub params: Vec<DeclHandle>,
    pub span: Span,
}

impl DeclSpec {
    pub fn new(kind: DeclKind) -> Self {
        Self {
            kind,
            declared_type: None,
            is_optional: false,
            is_rest: false,
            params: Vec::new(),
            span: Span::DUMMY,
        }
    }

    pub fn with_type(mut self, ty: TypeSyntax) -> Self {
        self.declared_type = Some(ty);
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn rest(mut self) -> Self {
        self.is_rest = true;
        self
    }

    pub fn with_params(mut self, params: Vec<DeclHandle>) -> Self {
        self.params = params;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// The per-declaration facts overload heuristics are allowed to look at
#[derive(Debug, Clone, Copy)]
pub struct SyntacticFacts<'a> {
    pub declared_type: Option<&'a TypeSyntax>,
    pub is_optional: bool,
    pub is_rest: bool,
}

#[derive(Debug, Clone)]
struct SymbolEntry {
    name: String,
    decls: Vec<DeclHandle>,
}

/// Append-only arena of declarations for one compilation unit
#[derive(Debug, Clone, Default)]
pub struct DeclRegistry {
    decls: Vec<DeclFacts>,
    symbols: Vec<SymbolEntry>,
}

impl DeclRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty symbol
    pub fn new_symbol(&mut self, name: impl Into<String>) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(SymbolEntry {
            name: name.into(),
            decls: Vec::new(),
        });
        id
    }

    /// Register a declaration of `symbol`. Handles are never reused.
    pub fn declare(&mut self, symbol: SymbolId, spec: DeclSpec) -> DeclHandle {
        let handle = DeclHandle(self.decls.len() as u32);
        let entry = &mut self.symbols[symbol.0 as usize];
        entry.decls.push(handle);
        self.decls.push(DeclFacts {
            name: entry.name.clone(),
            symbol,
            kind: spec.kind,
            declared_type: spec.declared_type,
            is_optional: spec.is_optional,
            is_rest: spec.is_rest,
            params: spec.params,
            span: spec.span,
        });
        handle
    }

    /// Register a declaration under a fresh symbol of its own
    pub fn declare_unique(&mut self, name: impl Into<String>, spec: DeclSpec) -> DeclHandle {
        let symbol = self.new_symbol(name);
        self.declare(symbol, spec)
    }

    pub fn facts(&self, handle: DeclHandle) -> Option<&DeclFacts> {
        self.decls.get(handle.0 as usize)
    }

    pub fn syntactic_facts(&self, handle: DeclHandle) -> Option<SyntacticFacts<'_>> {
        self.facts(handle).map(|f| SyntacticFacts {
            declared_type: f.declared_type.as_ref(),
            is_optional: f.is_optional,
            is_rest: f.is_rest,
        })
    }

    pub fn symbol_of(&self, handle: DeclHandle) -> Option<SymbolId> {
        self.facts(handle).map(|f| f.symbol)
    }

    /// All declarations of a symbol in declaration order
    pub fn declarations(&self, symbol: SymbolId) -> &[DeclHandle] {
        self.symbols
            .get(symbol.0 as usize)
            .map(|s| s.decls.as_slice())
            .unwrap_or(&[])
    }

    /// Declarations sharing the symbol of `handle`, including `handle` itself
    pub fn siblings(&self, handle: DeclHandle) -> &[DeclHandle] {
        match self.symbol_of(handle) {
            Some(symbol) => self.declarations(symbol),
            None => &[],
        }
    }

    /// Resolve a name in the flat unit scope: the first declaration of the
    /// most recently created symbol with that name.
    pub fn resolve_identifier(&self, name: &str) -> Option<DeclHandle> {
        self.symbols
            .iter()
            .rev()
            .find(|s| s.name == name)
            .and_then(|s| s.decls.first().copied())
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_types::TypeKeyword;

    #[test]
    fn test_handles_are_monotonic() {
        let mut reg = DeclRegistry::new();
        let a = reg.declare_unique("a", DeclSpec::new(DeclKind::Variable));
        let b = reg.declare_unique("b", DeclSpec::new(DeclKind::Variable));
        assert!(a < b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_siblings_share_symbol() {
        let mut reg = DeclRegistry::new();
        let sym = reg.new_symbol("f");
        let f1 = reg.declare(sym, DeclSpec::new(DeclKind::Function));
        let f2 = reg.declare(sym, DeclSpec::new(DeclKind::Function));
        let other = reg.declare_unique("g", DeclSpec::new(DeclKind::Function));
        assert_eq!(reg.siblings(f2), &[f1, f2]);
        assert_eq!(reg.siblings(other), &[other]);
        assert_eq!(reg.facts(f1).map(|f| f.name.as_str()), Some("f"));
    }

    #[test]
    fn test_syntactic_facts() {
        let mut reg = DeclRegistry::new();
        let p = reg.declare_unique(
            "xs",
            DeclSpec::new(DeclKind::Parameter)
                .with_type(TypeSyntax::Keyword(TypeKeyword::String))
                .rest(),
        );
        let facts = reg.syntactic_facts(p).unwrap();
        assert!(facts.is_rest);
        assert!(!facts.is_optional);
        assert_eq!(
            facts.declared_type,
            Some(&TypeSyntax::Keyword(TypeKeyword::String))
        );
    }

    #[test]
    fn test_resolve_identifier_prefers_latest_symbol() {
        let mut reg = DeclRegistry::new();
        let _outer = reg.declare_unique("x", DeclSpec::new(DeclKind::Variable));
        let inner = reg.declare_unique("x", DeclSpec::new(DeclKind::Variable));
        assert_eq!(reg.resolve_identifier("x"), Some(inner));
        assert_eq!(reg.resolve_identifier("missing"), None);
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeclRegistry>();
        assert_send_sync::<DeclHandle>();
    }
}
