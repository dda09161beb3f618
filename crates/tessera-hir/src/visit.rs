//! Tree walkers over HIR bodies.
//!
//! Each walker visits every expression reachable from the given statements,
//! including expressions nested in closures, parent before children.

use crate::ir::{Expr, Stmt};

/// Visit every expression in `stmts`
pub fn walk_stmts<F: FnMut(&Expr)>(stmts: &[Stmt], f: &mut F) {
    for stmt in stmts {
        walk_stmt(stmt, f);
    }
}

pub fn walk_stmt<F: FnMut(&Expr)>(stmt: &Stmt, f: &mut F) {
    match stmt {
        Stmt::Let { init, .. } => {
            if let Some(init) = init {
                walk_expr(init, f);
            }
        }
        Stmt::Expr(expr) | Stmt::Throw(expr) => walk_expr(expr, f),
        Stmt::Return(value) => {
            if let Some(value) = value {
                walk_expr(value, f);
            }
        }
        Stmt::If { condition, then_branch, else_branch } => {
            walk_expr(condition, f);
            walk_stmts(then_branch, f);
            if let Some(else_branch) = else_branch {
                walk_stmts(else_branch, f);
            }
        }
        Stmt::While { condition, body } => {
            walk_expr(condition, f);
            walk_stmts(body, f);
        }
        Stmt::For { init, condition, update, body } => {
            if let Some(init) = init {
                walk_stmt(init, f);
            }
            if let Some(condition) = condition {
                walk_expr(condition, f);
            }
            if let Some(update) = update {
                walk_expr(update, f);
            }
            walk_stmts(body, f);
        }
        Stmt::Try { body, catch, finally } => {
            walk_stmts(body, f);
            if let Some(catch) = catch {
                walk_stmts(&catch.body, f);
            }
            if let Some(finally) = finally {
                walk_stmts(finally, f);
            }
        }
        Stmt::Switch { discriminant, cases } => {
            walk_expr(discriminant, f);
            for case in cases {
                if let Some(test) = &case.test {
                    walk_expr(test, f);
                }
                walk_stmts(&case.body, f);
            }
        }
        Stmt::Block(body) => walk_stmts(body, f),
        Stmt::Break | Stmt::Continue | Stmt::Empty => {}
    }
}

pub fn walk_expr<F: FnMut(&Expr)>(expr: &Expr, f: &mut F) {
    f(expr);
    match expr {
        Expr::Undefined
        | Expr::Null
        | Expr::Bool(_)
        | Expr::Number(_)
        | Expr::String(_)
        | Expr::Ident { .. }
        | Expr::This => {}
        Expr::Template { exprs, .. } | Expr::Array(exprs) => {
            for e in exprs {
                walk_expr(e, f);
            }
        }
        Expr::Member { object, .. } => walk_expr(object, f),
        Expr::Index { object, index } => {
            walk_expr(object, f);
            walk_expr(index, f);
        }
        Expr::Call { callee, args, .. } | Expr::New { callee, args, .. } => {
            walk_expr(callee, f);
            for arg in args {
                walk_expr(arg, f);
            }
        }
        Expr::Binary { left, right, .. }
        | Expr::Compare { left, right, .. }
        | Expr::Logical { left, right, .. } => {
            walk_expr(left, f);
            walk_expr(right, f);
        }
        Expr::Unary { operand, .. } => walk_expr(operand, f),
        Expr::Conditional { condition, then_expr, else_expr } => {
            walk_expr(condition, f);
            walk_expr(then_expr, f);
            walk_expr(else_expr, f);
        }
        Expr::Assign { target, value } => {
            walk_expr(target, f);
            walk_expr(value, f);
        }
        Expr::Object(props) => {
            for (_, value) in props {
                walk_expr(value, f);
            }
        }
        Expr::Spread(inner)
        | Expr::NonNull(inner)
        | Expr::Paren(inner)
        | Expr::As { expr: inner, .. } => walk_expr(inner, f),
        Expr::Closure { body, .. } => walk_stmts(body, f),
    }
}

/// Visit every expression in `stmts` mutably
pub fn walk_stmts_mut<F: FnMut(&mut Expr)>(stmts: &mut [Stmt], f: &mut F) {
    for stmt in stmts {
        walk_stmt_mut(stmt, f);
    }
}

pub fn walk_stmt_mut<F: FnMut(&mut Expr)>(stmt: &mut Stmt, f: &mut F) {
    match stmt {
        Stmt::Let { init, .. } => {
            if let Some(init) = init {
                walk_expr_mut(init, f);
            }
        }
        Stmt::Expr(expr) | Stmt::Throw(expr) => walk_expr_mut(expr, f),
        Stmt::Return(value) => {
            if let Some(value) = value {
                walk_expr_mut(value, f);
            }
        }
        Stmt::If { condition, then_branch, else_branch } => {
            walk_expr_mut(condition, f);
            walk_stmts_mut(then_branch, f);
            if let Some(else_branch) = else_branch {
                walk_stmts_mut(else_branch, f);
            }
        }
        Stmt::While { condition, body } => {
            walk_expr_mut(condition, f);
            walk_stmts_mut(body, f);
        }
        Stmt::For { init, condition, update, body } => {
            if let Some(init) = init {
                walk_stmt_mut(init, f);
            }
            if let Some(condition) = condition {
                walk_expr_mut(condition, f);
            }
            if let Some(update) = update {
                walk_expr_mut(update, f);
            }
            walk_stmts_mut(body, f);
        }
        Stmt::Try { body, catch, finally } => {
            walk_stmts_mut(body, f);
            if let Some(catch) = catch {
                walk_stmts_mut(&mut catch.body, f);
            }
            if let Some(finally) = finally {
                walk_stmts_mut(finally, f);
            }
        }
        Stmt::Switch { discriminant, cases } => {
            walk_expr_mut(discriminant, f);
            for case in cases {
                if let Some(test) = &mut case.test {
                    walk_expr_mut(test, f);
                }
                walk_stmts_mut(&mut case.body, f);
            }
        }
        Stmt::Block(body) => walk_stmts_mut(body, f),
        Stmt::Break | Stmt::Continue | Stmt::Empty => {}
    }
}

pub fn walk_expr_mut<F: FnMut(&mut Expr)>(expr: &mut Expr, f: &mut F) {
    f(expr);
    match expr {
        Expr::Undefined
        | Expr::Null
        | Expr::Bool(_)
        | Expr::Number(_)
        | Expr::String(_)
        | Expr::Ident { .. }
        | Expr::This => {}
        Expr::Template { exprs, .. } | Expr::Array(exprs) => {
            for e in exprs {
                walk_expr_mut(e, f);
            }
        }
        Expr::Member { object, .. } => walk_expr_mut(object, f),
        Expr::Index { object, index } => {
            walk_expr_mut(object, f);
            walk_expr_mut(index, f);
        }
        Expr::Call { callee, args, .. } | Expr::New { callee, args, .. } => {
            walk_expr_mut(callee, f);
            for arg in args {
                walk_expr_mut(arg, f);
            }
        }
        Expr::Binary { left, right, .. }
        | Expr::Compare { left, right, .. }
        | Expr::Logical { left, right, .. } => {
            walk_expr_mut(left, f);
            walk_expr_mut(right, f);
        }
        Expr::Unary { operand, .. } => walk_expr_mut(operand, f),
        Expr::Conditional { condition, then_expr, else_expr } => {
            walk_expr_mut(condition, f);
            walk_expr_mut(then_expr, f);
            walk_expr_mut(else_expr, f);
        }
        Expr::Assign { target, value } => {
            walk_expr_mut(target, f);
            walk_expr_mut(value, f);
        }
        Expr::Object(props) => {
            for (_, value) in props {
                walk_expr_mut(value, f);
            }
        }
        Expr::Spread(inner)
        | Expr::NonNull(inner)
        | Expr::Paren(inner)
        | Expr::As { expr: inner, .. } => walk_expr_mut(inner, f),
        Expr::Closure { body, .. } => walk_stmts_mut(body, f),
    }
}
