//! Partial evaluation of a shared implementation body under one signature.
//!
//! Every formal parameter of the implementation is bound to the static type
//! the current signature declares for it. The evaluator then:
//! - replaces `isType<T>(p)` with `true`/`false`
//! - short-circuits `&&`, `||`, `!` and `?:` over folded literals
//! - reduces `if` statements with a literal condition to the taken branch
//! - truncates each block after its first statement that always exits
//!
//! Everything else is copied structurally.

use std::collections::HashMap;

use tessera_hir::{CatchClause, DeclHandle, Expr, LogicalOp, Stmt, SwitchCase, UnaryOp};
use tessera_types::{types_equal, StaticType};

use crate::intrinsic::{recognize, Intrinsic};

/// Static type of each implementation parameter under one signature
pub type ParamTypeMap = HashMap<DeclHandle, StaticType>;

pub struct PartialEvaluator<'a> {
    types: &'a ParamTypeMap,
    intrinsic_name: &'a str,
    /// Type parameters in scope when lowering intrinsic type arguments
    type_params: &'a [String],
}

impl<'a> PartialEvaluator<'a> {
    pub fn new(types: &'a ParamTypeMap, intrinsic_name: &'a str, type_params: &'a [String]) -> Self {
        Self {
            types,
            intrinsic_name,
            type_params,
        }
    }

    /// Rewrite a function body
    pub fn evaluate_body(&self, body: &[Stmt]) -> Vec<Stmt> {
        self.fold_block(body)
    }

    /// Fold a statement list, dropping empty statements, splicing nested
    /// blocks that declare nothing, and cutting everything after the first
    /// statement that always exits.
    fn fold_block(&self, stmts: &[Stmt]) -> Vec<Stmt> {
        let mut out = Vec::with_capacity(stmts.len());
        for (i, stmt) in stmts.iter().enumerate() {
            match self.fold_stmt(stmt) {
                Stmt::Empty => {}
                Stmt::Block(inner) if !declares_locals(&inner) => out.extend(inner),
                folded => out.push(folded),
            }
            if out.last().map_or(false, always_exits) {
                let dropped = stmts.len() - i - 1;
                if dropped > 0 {
                    log::trace!("truncated {} unreachable statement(s)", dropped);
                }
                break;
            }
        }
        out
    }

    fn fold_stmt(&self, stmt: &Stmt) -> Stmt {
        match stmt {
            Stmt::Let { decl, name, ty, mutable, init } => Stmt::Let {
                decl: *decl,
                name: name.clone(),
                ty: ty.clone(),
                mutable: *mutable,
                init: init.as_ref().map(|e| self.fold_expr(e)),
            },
            Stmt::Expr(expr) => Stmt::Expr(self.fold_expr(expr)),
            Stmt::Return(value) => Stmt::Return(value.as_ref().map(|e| self.fold_expr(e))),
            Stmt::If { condition, then_branch, else_branch } => {
                let condition = self.fold_expr(condition);
                match condition.as_bool_literal() {
                    Some(true) => {
                        log::trace!("if reduced to its then-branch");
                        Stmt::Block(self.fold_block(then_branch))
                    }
                    Some(false) => {
                        log::trace!("if reduced to its else-branch");
                        match else_branch {
                            Some(else_branch) => Stmt::Block(self.fold_block(else_branch)),
                            None => Stmt::Empty,
                        }
                    }
                    None => Stmt::If {
                        condition,
                        then_branch: self.fold_block(then_branch),
                        else_branch: else_branch.as_ref().map(|b| self.fold_block(b)),
                    },
                }
            }
            Stmt::While { condition, body } => Stmt::While {
                condition: self.fold_expr(condition),
                body: self.fold_block(body),
            },
            Stmt::For { init, condition, update, body } => Stmt::For {
                init: init.as_ref().map(|s| Box::new(self.fold_stmt(s))),
                condition: condition.as_ref().map(|e| self.fold_expr(e)),
                update: update.as_ref().map(|e| self.fold_expr(e)),
                body: self.fold_block(body),
            },
            Stmt::Break => Stmt::Break,
            Stmt::Continue => Stmt::Continue,
            Stmt::Throw(expr) => Stmt::Throw(self.fold_expr(expr)),
            Stmt::Try { body, catch, finally } => Stmt::Try {
                body: self.fold_block(body),
                catch: catch.as_ref().map(|c| CatchClause {
                    param: c.param,
                    body: self.fold_block(&c.body),
                }),
                finally: finally.as_ref().map(|f| self.fold_block(f)),
            },
            Stmt::Switch { discriminant, cases } => Stmt::Switch {
                discriminant: self.fold_expr(discriminant),
                cases: cases
                    .iter()
                    .map(|c| SwitchCase {
                        test: c.test.as_ref().map(|t| self.fold_expr(t)),
                        body: self.fold_block(&c.body),
                    })
                    .collect(),
            },
            Stmt::Block(body) => Stmt::Block(self.fold_block(body)),
            Stmt::Empty => Stmt::Empty,
        }
    }

    fn fold_expr(&self, expr: &Expr) -> Expr {
        match expr {
            // Literals and leaves
            Expr::Undefined
            | Expr::Null
            | Expr::Bool(_)
            | Expr::Number(_)
            | Expr::String(_)
            | Expr::Ident { .. }
            | Expr::This => expr.clone(),

            Expr::Call { callee, type_args, args, signature } => {
                if let Some(value) = self.fold_intrinsic(expr) {
                    return Expr::Bool(value);
                }
                Expr::Call {
                    callee: Box::new(self.fold_expr(callee)),
                    type_args: type_args.clone(),
                    args: args.iter().map(|a| self.fold_expr(a)).collect(),
                    signature: *signature,
                }
            }

            Expr::Logical { op, left, right } => {
                let left = self.fold_expr(left);
                match (op, left.as_bool_literal()) {
                    (LogicalOp::And, Some(false)) => Expr::Bool(false),
                    (LogicalOp::Or, Some(true)) => Expr::Bool(true),
                    (LogicalOp::And, Some(true)) | (LogicalOp::Or, Some(false)) => {
                        self.fold_expr(right)
                    }
                    _ => Expr::Logical {
                        op: *op,
                        left: Box::new(left),
                        right: Box::new(self.fold_expr(right)),
                    },
                }
            }

            Expr::Unary { op, operand } => {
                let operand = self.fold_expr(operand);
                match (op, operand.as_bool_literal()) {
                    (UnaryOp::Not, Some(value)) => Expr::Bool(!value),
                    _ => Expr::Unary {
                        op: *op,
                        operand: Box::new(operand),
                    },
                }
            }

            Expr::Paren(inner) => match self.fold_expr(inner) {
                Expr::Bool(value) => Expr::Bool(value),
                folded => Expr::Paren(Box::new(folded)),
            },

            Expr::Conditional { condition, then_expr, else_expr } => {
                let condition = self.fold_expr(condition);
                match condition.as_bool_literal() {
                    Some(true) => self.fold_expr(then_expr),
                    Some(false) => self.fold_expr(else_expr),
                    None => Expr::Conditional {
                        condition: Box::new(condition),
                        then_expr: Box::new(self.fold_expr(then_expr)),
                        else_expr: Box::new(self.fold_expr(else_expr)),
                    },
                }
            }

            // Structural
            Expr::Template { quasis, exprs } => Expr::Template {
                quasis: quasis.clone(),
                exprs: exprs.iter().map(|e| self.fold_expr(e)).collect(),
            },
            Expr::Member { object, property, decl } => Expr::Member {
                object: Box::new(self.fold_expr(object)),
                property: property.clone(),
                decl: *decl,
            },
            Expr::Index { object, index } => Expr::Index {
                object: Box::new(self.fold_expr(object)),
                index: Box::new(self.fold_expr(index)),
            },
            Expr::New { callee, type_args, args, signature } => Expr::New {
                callee: Box::new(self.fold_expr(callee)),
                type_args: type_args.clone(),
                args: args.iter().map(|a| self.fold_expr(a)).collect(),
                signature: *signature,
            },
            Expr::Binary { op, left, right } => Expr::Binary {
                op: *op,
                left: Box::new(self.fold_expr(left)),
                right: Box::new(self.fold_expr(right)),
            },
            Expr::Compare { op, left, right } => Expr::Compare {
                op: *op,
                left: Box::new(self.fold_expr(left)),
                right: Box::new(self.fold_expr(right)),
            },
            Expr::Assign { target, value } => Expr::Assign {
                target: Box::new(self.fold_expr(target)),
                value: Box::new(self.fold_expr(value)),
            },
            Expr::Array(elems) => Expr::Array(elems.iter().map(|e| self.fold_expr(e)).collect()),
            Expr::Object(props) => Expr::Object(
                props
                    .iter()
                    .map(|(k, v)| (k.clone(), self.fold_expr(v)))
                    .collect(),
            ),
            Expr::Spread(inner) => Expr::Spread(Box::new(self.fold_expr(inner))),
            Expr::As { expr: inner, ty } => Expr::As {
                expr: Box::new(self.fold_expr(inner)),
                ty: ty.clone(),
            },
            Expr::NonNull(inner) => Expr::NonNull(Box::new(self.fold_expr(inner))),
            Expr::Closure { params, body } => Expr::Closure {
                params: params.clone(),
                body: self.fold_block(body),
            },
        }
    }

    /// Value of `isType<T>(p)` when `p` has a known type in this specialization
    fn fold_intrinsic(&self, expr: &Expr) -> Option<bool> {
        match recognize(expr, self.intrinsic_name) {
            Intrinsic::TypeEquality { target, param } => {
                let actual = self.types.get(&param)?;
                let expected = StaticType::from_syntax(target, self.type_params);
                let value = types_equal(actual, &expected);
                log::trace!("{}<{}>({}) folded to {}", self.intrinsic_name, expected, param, value);
                Some(value)
            }
            Intrinsic::NotIntrinsic => None,
        }
    }
}

/// Whether control can never fall through `stmt`: a `return`/`throw`, or a
/// block, `if` or `try` all of whose paths end in one.
pub fn always_exits(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return(_) | Stmt::Throw(_) => true,
        Stmt::Block(body) => body.iter().any(always_exits),
        Stmt::If { then_branch, else_branch: Some(else_branch), .. } => {
            then_branch.iter().any(always_exits) && else_branch.iter().any(always_exits)
        }
        Stmt::Try { body, catch, finally } => {
            let finally_exits = finally
                .as_ref()
                .map_or(false, |f| f.iter().any(always_exits));
            let body_exits = body.iter().any(always_exits)
                && catch
                    .as_ref()
                    .map_or(true, |c| c.body.iter().any(always_exits));
            finally_exits || body_exits
        }
        _ => false,
    }
}

fn declares_locals(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|s| matches!(s, Stmt::Let { .. }))
}
