//! Completeness checks run on every specialized body before it is accepted.

use std::collections::HashSet;

use tessera_hir::visit::walk_stmts;
use tessera_hir::{DeclHandle, DeclRegistry, Expr, Stmt};

use crate::error::SpecializeError;
use crate::intrinsic::is_intrinsic_call;

/// Fail if any call to the type-equality intrinsic survived folding
pub fn check_no_residual_intrinsics(
    body: &[Stmt],
    intrinsic_name: &str,
    member: &str,
    signature: DeclHandle,
) -> Result<(), SpecializeError> {
    let mut found = false;
    walk_stmts(body, &mut |expr| {
        if is_intrinsic_call(expr, intrinsic_name) {
            found = true;
        }
    });
    if found {
        return Err(SpecializeError::ResidualIntrinsic {
            name: member.to_string(),
            signature,
        });
    }
    Ok(())
}

/// Fail if `body` still references a parameter the signature does not declare
pub fn check_no_missing_params(
    body: &[Stmt],
    missing: &[DeclHandle],
    registry: &DeclRegistry,
    member: &str,
    signature: DeclHandle,
) -> Result<(), SpecializeError> {
    if missing.is_empty() {
        return Ok(());
    }
    let missing: HashSet<DeclHandle> = missing.iter().copied().collect();
    let mut first_hit = None;
    walk_stmts(body, &mut |expr| {
        if let Expr::Ident { decl: Some(decl), .. } = expr {
            if first_hit.is_none() && missing.contains(decl) {
                first_hit = Some(*decl);
            }
        }
    });
    match first_hit {
        Some(param) => Err(SpecializeError::MissingParameterReference {
            name: member.to_string(),
            signature,
            param: registry
                .facts(param)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| param.to_string()),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn test_residual_intrinsic_detected() {
        let mut fx = Fixture::new();
        let x = fx.param("x", number());
        let sig = fx.param("sig", number());
        let flag = fx.variable("flag", boolean());
        // `const flag = isType<number>(x)` stored in a local is unsupported
        let body = vec![Stmt::Let {
            decl: flag,
            name: "flag".to_string(),
            ty: None,
            mutable: false,
            init: Some(is_type(number(), "x", x)),
        }];
        let err = check_no_residual_intrinsics(&body, "isType", "f", sig).unwrap_err();
        assert!(matches!(err, SpecializeError::ResidualIntrinsic { .. }));
        assert!(check_no_residual_intrinsics(&[ret(Expr::Bool(true))], "isType", "f", sig).is_ok());
    }

    #[test]
    fn test_missing_param_reference_detected() {
        let mut fx = Fixture::new();
        let p1 = fx.param("p1", number());
        let p2 = fx.param("p2", number());
        let sig = fx.param("sig", number());
        let body = vec![ret(add(Expr::ident("p1", p1), Expr::ident("p2", p2)))];

        let err = check_no_missing_params(&body, &[p2], &fx.registry, "f", sig).unwrap_err();
        assert_eq!(
            err,
            SpecializeError::MissingParameterReference {
                name: "f".to_string(),
                signature: sig,
                param: "p2".to_string(),
            }
        );
        assert!(check_no_missing_params(&body, &[], &fx.registry, "f", sig).is_ok());
    }

    #[test]
    fn test_missing_param_inside_closure_detected() {
        let mut fx = Fixture::new();
        let p2 = fx.param("p2", number());
        let sig = fx.param("sig", number());
        let body = vec![ret(Expr::Closure {
            params: vec![],
            body: vec![ret(Expr::ident("p2", p2))],
        })];
        assert!(check_no_missing_params(&body, &[p2], &fx.registry, "f", sig).is_err());
    }
}
