//! Candidate collection for call sites.
//!
//! Given a call or `new` expression whose callee the resolver has already
//! bound, collect every sibling declaration of the callee's symbol whose
//! parameter shape accepts the call's argument count.

use tessera_hir::{DeclHandle, DeclRegistry, Expr};
use tessera_types::{TypeKeyword, TypeSyntax};

use crate::options::SpecializeOptions;

/// Char/string classification of declared type syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Char,
    StringLike,
    Other,
}

/// Classify declared type syntax without resolving it
pub fn classify_type_syntax(ty: &TypeSyntax, options: &SpecializeOptions) -> TypeClass {
    match ty {
        TypeSyntax::Keyword(TypeKeyword::String) | TypeSyntax::StringLiteral(_) => {
            TypeClass::StringLike
        }
        TypeSyntax::Reference { name, type_args, .. } if type_args.is_empty() => {
            if options.is_char_type_name(name) {
                TypeClass::Char
            } else if name == "String" || name == "System.String" {
                TypeClass::StringLike
            } else {
                TypeClass::Other
            }
        }
        TypeSyntax::Union(members) if !members.is_empty() => {
            let first = classify_type_syntax(&members[0], options);
            if first != TypeClass::Other
                && members[1..]
                    .iter()
                    .all(|m| classify_type_syntax(m, options) == first)
            {
                first
            } else {
                TypeClass::Other
            }
        }
        _ => TypeClass::Other,
    }
}

/// Whether a call site is a plain call or an instantiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Call,
    New,
}

/// A call site the resolver has bound to a signature
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'a> {
    pub kind: CallKind,
    pub args: &'a [Expr],
    /// The resolver's own pick
    pub resolved: DeclHandle,
}

impl<'a> CallSite<'a> {
    /// View a bound `Call`/`New` expression as a call site
    pub fn from_expr(expr: &'a Expr) -> Option<CallSite<'a>> {
        match expr {
            Expr::Call { args, signature: Some(resolved), .. } => Some(CallSite {
                kind: CallKind::Call,
                args,
                resolved: *resolved,
            }),
            Expr::New { args, signature: Some(resolved), .. } => Some(CallSite {
                kind: CallKind::New,
                args,
                resolved: *resolved,
            }),
            _ => None,
        }
    }

    fn has_spread(&self) -> bool {
        self.args.iter().any(|a| matches!(a, Expr::Spread(_)))
    }
}

/// Shape of one declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamShape {
    /// For rest parameters, the class of the element type
    pub type_class: TypeClass,
    pub is_optional: bool,
    pub is_rest: bool,
}

/// One signature that could serve a call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCandidate {
    pub handle: DeclHandle,
    pub parameters: Vec<ParamShape>,
    pub is_construct_like: bool,
}

impl SignatureCandidate {
    /// Build the candidate for a callable declaration. Returns `None` when
    /// the handle is unknown or not callable.
    pub fn from_decl(
        registry: &DeclRegistry,
        handle: DeclHandle,
        options: &SpecializeOptions,
    ) -> Option<SignatureCandidate> {
        let facts = registry.facts(handle)?;
        if !facts.kind.is_function_like() && !facts.kind.is_construct_like() {
            return None;
        }
        let parameters = facts
            .params
            .iter()
            .map(|p| param_shape(registry, *p, options))
            .collect::<Option<Vec<_>>>()?;
        Some(SignatureCandidate {
            handle,
            parameters,
            is_construct_like: facts.kind.is_construct_like(),
        })
    }

    /// Parameters that must be supplied
    pub fn required_count(&self) -> usize {
        self.parameters
            .iter()
            .filter(|p| !p.is_optional && !p.is_rest)
            .count()
    }

    pub fn has_rest(&self) -> bool {
        self.parameters.last().map_or(false, |p| p.is_rest)
    }

    /// Whether `arg_count` arguments fit this signature
    pub fn accepts_arity(&self, arg_count: usize) -> bool {
        self.required_count() <= arg_count
            && (self.parameters.len() >= arg_count || self.has_rest())
    }

    /// Parameter receiving the argument at `index`; trailing arguments map
    /// onto a rest parameter.
    pub fn param_for_arg(&self, index: usize) -> Option<&ParamShape> {
        match self.parameters.get(index) {
            Some(param) => Some(param),
            None => self.parameters.last().filter(|p| p.is_rest),
        }
    }
}

fn param_shape(
    registry: &DeclRegistry,
    param: DeclHandle,
    options: &SpecializeOptions,
) -> Option<ParamShape> {
    let facts = registry.syntactic_facts(param)?;
    let type_class = match facts.declared_type {
        Some(ty) if facts.is_rest => ty
            .array_element()
            .map(|elem| classify_type_syntax(elem, options))
            .unwrap_or(TypeClass::Other),
        Some(ty) => classify_type_syntax(ty, options),
        None => TypeClass::Other,
    };
    Some(ParamShape {
        type_class,
        is_optional: facts.is_optional,
        is_rest: facts.is_rest,
    })
}

/// Collect the overloads that could serve `site`.
///
/// Returns `None` when fewer than two candidates remain, or when the call
/// spreads an argument list (its arity is unknown); callers then keep the
/// resolver's own pick.
pub fn collect_candidates(
    registry: &DeclRegistry,
    site: &CallSite<'_>,
    options: &SpecializeOptions,
) -> Option<Vec<SignatureCandidate>> {
    if site.has_spread() {
        return None;
    }
    let want_construct = site.kind == CallKind::New;
    let arg_count = site.args.len();

    let candidates: Vec<SignatureCandidate> = registry
        .siblings(site.resolved)
        .iter()
        .filter_map(|h| SignatureCandidate::from_decl(registry, *h, options))
        .filter(|c| c.is_construct_like == want_construct)
        .filter(|c| c.accepts_arity(arg_count))
        .collect();

    if candidates.len() < 2 {
        return None;
    }
    Some(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use tessera_hir::DeclKind;

    fn bound_call(resolved: DeclHandle, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(Expr::Ident {
                name: "f".to_string(),
                decl: Some(resolved),
            }),
            type_args: vec![],
            args,
            signature: Some(resolved),
        }
    }

    #[test]
    fn test_classify_type_syntax() {
        let opts = SpecializeOptions::default();
        assert_eq!(classify_type_syntax(&char_ty(), &opts), TypeClass::Char);
        assert_eq!(classify_type_syntax(&string(), &opts), TypeClass::StringLike);
        assert_eq!(
            classify_type_syntax(&TypeSyntax::StringLiteral("a".into()), &opts),
            TypeClass::StringLike
        );
        assert_eq!(classify_type_syntax(&number(), &opts), TypeClass::Other);
        assert_eq!(
            classify_type_syntax(&TypeSyntax::array(char_ty()), &opts),
            TypeClass::Other
        );
        let mixed = TypeSyntax::Union(vec![string(), number()]);
        assert_eq!(classify_type_syntax(&mixed, &opts), TypeClass::Other);
        let literals = TypeSyntax::Union(vec![
            TypeSyntax::StringLiteral("a".into()),
            TypeSyntax::StringLiteral("b".into()),
        ]);
        assert_eq!(classify_type_syntax(&literals, &opts), TypeClass::StringLike);
    }

    #[test]
    fn test_rest_param_classified_by_element() {
        let mut fx = Fixture::new();
        let chars = fx.rest_param("chars", TypeSyntax::array(char_ty()));
        let sym = fx.symbol("join");
        let f = fx.callable(sym, DeclKind::Function, vec![chars]);
        let cand = SignatureCandidate::from_decl(&fx.registry, f, &SpecializeOptions::default())
            .unwrap();
        assert_eq!(cand.parameters[0].type_class, TypeClass::Char);
        assert!(cand.has_rest());
        assert!(cand.accepts_arity(0));
        assert!(cand.accepts_arity(5));
        assert_eq!(cand.param_for_arg(3).map(|p| p.is_rest), Some(true));
    }

    #[test]
    fn test_arity_filter() {
        let mut fx = Fixture::new();
        let a = fx.param("a", char_ty());
        let b = fx.param("b", string());
        let c = fx.param("c", number());
        let d = fx.optional_param("d", number());
        let sym = fx.symbol("f");
        let one = fx.callable(sym, DeclKind::Function, vec![a]);
        let one_str = fx.callable(sym, DeclKind::Function, vec![b]);
        let two = fx.callable(sym, DeclKind::Function, vec![c, d]);

        let call = bound_call(one, vec![Expr::string("x")]);
        let site = CallSite::from_expr(&call).unwrap();
        let found = collect_candidates(&fx.registry, &site, &SpecializeOptions::default())
            .unwrap();
        let handles: Vec<_> = found.iter().map(|c| c.handle).collect();
        assert_eq!(handles, vec![one, one_str, two]);

        let call = bound_call(one, vec![Expr::Number(1.0), Expr::Number(2.0)]);
        let site = CallSite::from_expr(&call).unwrap();
        // only `two` accepts two arguments
        assert!(collect_candidates(&fx.registry, &site, &SpecializeOptions::default()).is_none());
    }

    #[test]
    fn test_constructors_only_for_new() {
        let mut fx = Fixture::new();
        let a = fx.param("a", char_ty());
        let b = fx.param("b", string());
        let sym = fx.symbol("Token");
        let ctor_a = fx.callable(sym, DeclKind::Constructor, vec![a]);
        let ctor_b = fx.callable(sym, DeclKind::ConstructSignature, vec![b]);
        let _call_sig = fx.callable(sym, DeclKind::CallSignature, vec![]);

        let new_expr = Expr::New {
            callee: Box::new(Expr::Ident {
                name: "Token".to_string(),
                decl: Some(ctor_a),
            }),
            type_args: vec![],
            args: vec![Expr::string("x")],
            signature: Some(ctor_a),
        };
        let site = CallSite::from_expr(&new_expr).unwrap();
        let found = collect_candidates(&fx.registry, &site, &SpecializeOptions::default())
            .unwrap();
        let handles: Vec<_> = found.iter().map(|c| c.handle).collect();
        assert_eq!(handles, vec![ctor_a, ctor_b]);
    }

    #[test]
    fn test_spread_call_is_skipped() {
        let mut fx = Fixture::new();
        let a = fx.param("a", char_ty());
        let b = fx.param("b", string());
        let xs = fx.variable("xs", TypeSyntax::array(string()));
        let sym = fx.symbol("f");
        let f1 = fx.callable(sym, DeclKind::Function, vec![a]);
        let _f2 = fx.callable(sym, DeclKind::Function, vec![b]);
        let call = bound_call(f1, vec![Expr::Spread(Box::new(Expr::ident("xs", xs)))]);
        let site = CallSite::from_expr(&call).unwrap();
        assert!(collect_candidates(&fx.registry, &site, &SpecializeOptions::default()).is_none());
    }

    #[test]
    fn test_unbound_call_is_not_a_site() {
        assert!(CallSite::from_expr(&call("f", vec![])).is_none());
    }
}
