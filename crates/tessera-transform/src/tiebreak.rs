//! Tie-break scoring between char and string overloads.
//!
//! Ordinary inference erases the single-character type to the general string
//! type, so `f("a")` may bind to `f(c: char)` just because that overload was
//! declared first. Scoring each remaining candidate against the syntax of the
//! call's arguments restores a deterministic pick:
//! +2 when an argument's preference matches its parameter's class,
//! -2 when it hits the opposite class, 0 otherwise.
//! The resolver's original pick wins every tie.

use tessera_hir::visit::walk_stmts_mut;
use tessera_hir::{DeclHandle, DeclRegistry, Expr, Stmt};

use crate::candidates::{
    classify_type_syntax, collect_candidates, CallSite, SignatureCandidate, TypeClass,
};
use crate::options::SpecializeOptions;

const MATCH_SCORE: i32 = 2;
const MISMATCH_SCORE: i32 = -2;

/// What an argument's own syntax says it wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentClass {
    /// Narrowed with `as char`, or a reference to a char-typed declaration
    ExplicitlyCharTyped,
    /// String literal, template literal, or a string-typed declaration
    StringLike,
    Other,
}

/// Classify one call argument
pub fn classify_argument(
    arg: &Expr,
    registry: &DeclRegistry,
    options: &SpecializeOptions,
) -> ArgumentClass {
    match arg {
        Expr::String(_) | Expr::Template { .. } => ArgumentClass::StringLike,
        Expr::As { ty, .. } => match classify_type_syntax(ty, options) {
            TypeClass::Char => ArgumentClass::ExplicitlyCharTyped,
            TypeClass::StringLike => ArgumentClass::StringLike,
            TypeClass::Other => ArgumentClass::Other,
        },
        Expr::Paren(inner) | Expr::NonNull(inner) => classify_argument(inner, registry, options),
        Expr::Ident { decl: Some(decl), .. } | Expr::Member { decl: Some(decl), .. } => {
            let declared = registry
                .syntactic_facts(*decl)
                .and_then(|f| f.declared_type);
            match declared.map(|ty| classify_type_syntax(ty, options)) {
                Some(TypeClass::Char) => ArgumentClass::ExplicitlyCharTyped,
                Some(TypeClass::StringLike) => ArgumentClass::StringLike,
                _ => ArgumentClass::Other,
            }
        }
        _ => ArgumentClass::Other,
    }
}

/// Score one candidate against the classified arguments
pub fn score_candidate(candidate: &SignatureCandidate, args: &[ArgumentClass]) -> i32 {
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            let param = match candidate.param_for_arg(i) {
                Some(param) => param.type_class,
                None => return 0,
            };
            match (arg, param) {
                (ArgumentClass::ExplicitlyCharTyped, TypeClass::Char)
                | (ArgumentClass::StringLike, TypeClass::StringLike) => MATCH_SCORE,
                (ArgumentClass::ExplicitlyCharTyped, TypeClass::StringLike)
                | (ArgumentClass::StringLike, TypeClass::Char) => MISMATCH_SCORE,
                _ => 0,
            }
        })
        .sum()
}

/// Pick the best-scoring candidate. `original` always competes and wins ties.
pub fn pick_best(
    candidates: &[SignatureCandidate],
    original: &SignatureCandidate,
    args: &[ArgumentClass],
) -> (DeclHandle, i32) {
    let mut best = original.handle;
    let mut best_score = score_candidate(original, args);
    for candidate in candidates {
        if candidate.handle == original.handle {
            continue;
        }
        let score = score_candidate(candidate, args);
        if score > best_score {
            best = candidate.handle;
            best_score = score;
        }
    }
    (best, best_score)
}

/// Resolve one bound call site. Returns the signature that should be used,
/// which is the resolver's pick unless scoring strictly prefers another.
pub fn resolve_call_site(
    registry: &DeclRegistry,
    site: &CallSite<'_>,
    options: &SpecializeOptions,
) -> DeclHandle {
    if !options.tie_break {
        return site.resolved;
    }
    let candidates = match collect_candidates(registry, site, options) {
        Some(candidates) => candidates,
        None => return site.resolved,
    };
    let original = match SignatureCandidate::from_decl(registry, site.resolved, options) {
        Some(original) => original,
        None => return site.resolved,
    };
    let args: Vec<ArgumentClass> = site
        .args
        .iter()
        .map(|a| classify_argument(a, registry, options))
        .collect();

    let (picked, score) = pick_best(&candidates, &original, &args);
    if picked != site.resolved {
        log::debug!(
            "tie-break: {} -> {} (score {})",
            site.resolved,
            picked,
            score
        );
    }
    picked
}

/// Re-pick the signature of every bound call and `new` expression in `body`,
/// closures included. Returns the number of call sites whose pick changed.
pub fn resolve_call_overloads(
    body: &mut [Stmt],
    registry: &DeclRegistry,
    options: &SpecializeOptions,
) -> usize {
    let mut changed = 0;
    walk_stmts_mut(body, &mut |expr| {
        let picked = match CallSite::from_expr(expr) {
            Some(site) => {
                let picked = resolve_call_site(registry, &site, options);
                (picked != site.resolved).then_some(picked)
            }
            None => None,
        };
        if let Some(picked) = picked {
            if let Expr::Call { signature, .. } | Expr::New { signature, .. } = expr {
                *signature = Some(picked);
                changed += 1;
            }
        }
    });
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::ParamShape;
    use crate::test_support::*;
    use tessera_hir::DeclKind;
    use tessera_types::TypeSyntax;

    fn shape(type_class: TypeClass) -> ParamShape {
        ParamShape {
            type_class,
            is_optional: false,
            is_rest: false,
        }
    }

    fn bound_call(callee: DeclHandle, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(Expr::Ident {
                name: "f".to_string(),
                decl: Some(callee),
            }),
            type_args: vec![],
            args,
            signature: Some(callee),
        }
    }

    /// f(c: char) declared before f(s: string)
    fn char_then_string(fx: &mut Fixture) -> (DeclHandle, DeclHandle) {
        let c = fx.param("c", char_ty());
        let s = fx.param("s", string());
        let sym = fx.symbol("f");
        let f_char = fx.callable(sym, DeclKind::Function, vec![c]);
        let f_str = fx.callable(sym, DeclKind::Function, vec![s]);
        (f_char, f_str)
    }

    #[test]
    fn test_classify_arguments() {
        init_logger();
        let mut fx = Fixture::new();
        let opts = SpecializeOptions::default();
        let ch = fx.variable("ch", char_ty());
        let s = fx.variable("s", string());
        let n = fx.variable("n", number());

        let cast = Expr::As {
            expr: Box::new(Expr::string("a")),
            ty: char_ty(),
        };
        assert_eq!(classify_argument(&cast, &fx.registry, &opts), ArgumentClass::ExplicitlyCharTyped);
        assert_eq!(
            classify_argument(&Expr::ident("ch", ch), &fx.registry, &opts),
            ArgumentClass::ExplicitlyCharTyped
        );
        assert_eq!(
            classify_argument(&Expr::string("a"), &fx.registry, &opts),
            ArgumentClass::StringLike
        );
        let template = Expr::Template {
            quasis: vec!["a".into(), "".into()],
            exprs: vec![Expr::ident("n", n)],
        };
        assert_eq!(classify_argument(&template, &fx.registry, &opts), ArgumentClass::StringLike);
        assert_eq!(
            classify_argument(&Expr::Paren(Box::new(Expr::ident("s", s))), &fx.registry, &opts),
            ArgumentClass::StringLike
        );
        assert_eq!(
            classify_argument(&Expr::ident("n", n), &fx.registry, &opts),
            ArgumentClass::Other
        );
        assert_eq!(classify_argument(&Expr::Number(1.0), &fx.registry, &opts), ArgumentClass::Other);
    }

    #[test]
    fn test_string_literal_moves_to_string_overload() {
        let mut fx = Fixture::new();
        let (f_char, f_str) = char_then_string(&mut fx);
        let call = bound_call(f_char, vec![Expr::string("a")]);
        let site = CallSite::from_expr(&call).unwrap();
        assert_eq!(
            resolve_call_site(&fx.registry, &site, &SpecializeOptions::default()),
            f_str
        );
    }

    #[test]
    fn test_char_cast_moves_to_char_overload() {
        let mut fx = Fixture::new();
        let (f_char, f_str) = char_then_string(&mut fx);
        let arg = Expr::As {
            expr: Box::new(Expr::string("a")),
            ty: char_ty(),
        };
        let call = bound_call(f_str, vec![arg]);
        let site = CallSite::from_expr(&call).unwrap();
        assert_eq!(
            resolve_call_site(&fx.registry, &site, &SpecializeOptions::default()),
            f_char
        );
    }

    #[test]
    fn test_neutral_arguments_keep_original() {
        let mut fx = Fixture::new();
        let a = fx.param("a", number());
        let b = fx.param("b", boolean());
        let sym = fx.symbol("f");
        let f_num = fx.callable(sym, DeclKind::Function, vec![a]);
        let f_bool = fx.callable(sym, DeclKind::Function, vec![b]);

        for original in [f_num, f_bool] {
            let call = bound_call(original, vec![Expr::Number(3.0)]);
            let site = CallSite::from_expr(&call).unwrap();
            assert_eq!(
                resolve_call_site(&fx.registry, &site, &SpecializeOptions::default()),
                original
            );
        }
    }

    #[test]
    fn test_tie_keeps_original() {
        let mut fx = Fixture::new();
        let s1 = fx.param("s", string());
        let s2 = fx.param("t", string());
        let sym = fx.symbol("f");
        let _first = fx.callable(sym, DeclKind::Function, vec![s1]);
        let second = fx.callable(sym, DeclKind::Function, vec![s2]);
        let call = bound_call(second, vec![Expr::string("x")]);
        let site = CallSite::from_expr(&call).unwrap();
        assert_eq!(
            resolve_call_site(&fx.registry, &site, &SpecializeOptions::default()),
            second
        );
    }

    #[test]
    fn test_disabled_tie_break_keeps_original() {
        let mut fx = Fixture::new();
        let (f_char, _) = char_then_string(&mut fx);
        let call = bound_call(f_char, vec![Expr::string("a")]);
        let site = CallSite::from_expr(&call).unwrap();
        let opts = SpecializeOptions {
            tie_break: false,
            ..SpecializeOptions::default()
        };
        assert_eq!(resolve_call_site(&fx.registry, &site, &opts), f_char);
    }

    #[test]
    fn test_score_monotonicity() {
        let candidate = SignatureCandidate {
            handle: Fixture::new().param("p", string()),
            parameters: vec![
                shape(TypeClass::StringLike),
                shape(TypeClass::StringLike),
                shape(TypeClass::Char),
            ],
            is_construct_like: false,
        };
        let other = SignatureCandidate {
            parameters: vec![shape(TypeClass::Other), shape(TypeClass::Other), shape(TypeClass::Other)],
            ..candidate.clone()
        };
        let mut args = vec![ArgumentClass::StringLike, ArgumentClass::Other];
        let before = score_candidate(&candidate, &args);
        let other_before = score_candidate(&other, &args);
        args.push(ArgumentClass::ExplicitlyCharTyped);
        assert_eq!(score_candidate(&candidate, &args), before + 2);
        assert!(score_candidate(&other, &args) >= other_before);
    }

    #[test]
    fn test_mismatch_penalty() {
        let candidate = SignatureCandidate {
            handle: Fixture::new().param("p", char_ty()),
            parameters: vec![shape(TypeClass::Char), shape(TypeClass::StringLike)],
            is_construct_like: false,
        };
        let args = [ArgumentClass::StringLike, ArgumentClass::ExplicitlyCharTyped];
        assert_eq!(score_candidate(&candidate, &args), -4);
    }

    #[test]
    fn test_extra_arguments_score_against_rest() {
        let mut fx = Fixture::new();
        let s = fx.param("sep", string());
        let chars = fx.rest_param("chars", TypeSyntax::array(char_ty()));
        let sym = fx.symbol("join");
        let f = fx.callable(sym, DeclKind::Function, vec![s, chars]);
        let cand = SignatureCandidate::from_decl(&fx.registry, f, &SpecializeOptions::default())
            .unwrap();
        let args = [
            ArgumentClass::StringLike,
            ArgumentClass::ExplicitlyCharTyped,
            ArgumentClass::ExplicitlyCharTyped,
        ];
        assert_eq!(score_candidate(&cand, &args), 6);
    }

    #[test]
    fn test_resolve_call_overloads_rewrites_nested_calls() {
        let mut fx = Fixture::new();
        let (f_char, f_str) = char_then_string(&mut fx);
        let mut body = vec![
            Stmt::Expr(bound_call(f_char, vec![Expr::string("a")])),
            Stmt::Return(Some(Expr::Closure {
                params: vec![],
                body: vec![Stmt::Expr(bound_call(f_char, vec![Expr::string("b")]))],
            })),
        ];
        let changed = resolve_call_overloads(&mut body, &fx.registry, &SpecializeOptions::default());
        assert_eq!(changed, 2);

        let mut signatures = Vec::new();
        tessera_hir::visit::walk_stmts(&body, &mut |e| {
            if let Expr::Call { signature, .. } = e {
                signatures.push(*signature);
            }
        });
        assert_eq!(signatures, vec![Some(f_str), Some(f_str)]);
    }
}
