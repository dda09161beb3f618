//! Recognizer for the type-equality intrinsic `isType<T>(param)`.

use tessera_hir::{DeclHandle, Expr};
use tessera_types::TypeSyntax;

/// Result of matching an expression against the intrinsic's shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intrinsic<'a> {
    NotIntrinsic,
    /// `isType<target>(param)` where `param` is a bound identifier
    TypeEquality {
        target: &'a TypeSyntax,
        param: DeclHandle,
    },
}

/// Match `expr` against `name<T>(identifier)`: exactly one type argument and
/// exactly one argument, which must be a bound identifier.
pub fn recognize<'a>(expr: &'a Expr, name: &str) -> Intrinsic<'a> {
    let (type_args, args) = match expr {
        Expr::Call { callee, type_args, args, .. } if is_intrinsic_callee(callee, name) => {
            (type_args, args)
        }
        _ => return Intrinsic::NotIntrinsic,
    };
    match (type_args.as_slice(), args.as_slice()) {
        ([target], [Expr::Ident { decl: Some(param), .. }]) => Intrinsic::TypeEquality {
            target,
            param: *param,
        },
        _ => Intrinsic::NotIntrinsic,
    }
}

/// Any call whose callee is the intrinsic, whatever its arguments
pub fn is_intrinsic_call(expr: &Expr, name: &str) -> bool {
    matches!(expr, Expr::Call { callee, .. } if is_intrinsic_callee(callee, name))
}

/// The intrinsic has no declaration; a bound callee is a user function that
/// shares its name.
fn is_intrinsic_callee(callee: &Expr, name: &str) -> bool {
    matches!(callee, Expr::Ident { name: n, decl: None } if n == name)
}
