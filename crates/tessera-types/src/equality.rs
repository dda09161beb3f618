//! Structural type equality used when folding type-equality tests.
//!
//! Differs from plain `PartialEq` in three ways:
//! - a primitive equals its canonical boxed reference type (`Double` == `System.Double`)
//! - nominal types compare by declaration identity when both sides have one,
//!   and by name plus type arguments only when either side lacks one
//! - union members compare as a set

use crate::{NominalType, Primitive, StaticType};

/// Check whether two static types denote the same target type
pub fn types_equal(a: &StaticType, b: &StaticType) -> bool {
    match (a, b) {
        // Absent parameters never match anything
        (StaticType::Absent, _) | (_, StaticType::Absent) => false,

        (StaticType::Primitive(p1), StaticType::Primitive(p2)) => p1 == p2,
        (StaticType::Primitive(p), StaticType::Nominal(n))
        | (StaticType::Nominal(n), StaticType::Primitive(p)) => is_boxed_form(*p, n),

        (StaticType::Array(e1), StaticType::Array(e2)) => types_equal(e1, e2),
        (StaticType::Tuple(t1), StaticType::Tuple(t2)) => {
            t1.len() == t2.len() && t1.iter().zip(t2.iter()).all(|(x, y)| types_equal(x, y))
        }
        (StaticType::Nominal(n1), StaticType::Nominal(n2)) => nominals_equal(n1, n2),
        (StaticType::Union(m1), StaticType::Union(m2)) => {
            m1.len() == m2.len()
                && m1.iter().all(|x| m2.iter().any(|y| types_equal(x, y)))
                && m2.iter().all(|y| m1.iter().any(|x| types_equal(x, y)))
        }
        (StaticType::TypeParam(a), StaticType::TypeParam(b)) => a == b,

        (StaticType::Any, StaticType::Any)
        | (StaticType::Unknown, StaticType::Unknown)
        | (StaticType::Void, StaticType::Void)
        | (StaticType::Null, StaticType::Null) => true,

        _ => false,
    }
}

/// System types are referenced by name only; a nominal with a declaration
/// id is a user type, even when it is called `String` or `Double`.
fn is_boxed_form(prim: Primitive, nominal: &NominalType) -> bool {
    nominal.id.is_none()
        && nominal.type_args.is_empty()
        && (nominal.name == prim.boxed_name() || nominal.name == prim.short_boxed_name())
}

fn nominals_equal(n1: &NominalType, n2: &NominalType) -> bool {
    if let (Some(id1), Some(id2)) = (n1.id, n2.id) {
        return id1 == id2;
    }
    n1.name == n2.name
        && n1.type_args.len() == n2.type_args.len()
        && n1
            .type_args
            .iter()
            .zip(n2.type_args.iter())
            .all(|(a, b)| types_equal(a, b))
}
