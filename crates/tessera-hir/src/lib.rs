//! High-level Intermediate Representation (HIR) for Tessera
//!
//! The HIR is the bound syntax tree the overload passes operate on, together
//! with the declaration registry that gives every declaration a stable handle.

pub mod ir;
pub mod registry;
pub mod visit;

pub use ir::*;
pub use registry::{DeclFacts, DeclHandle, DeclKind, DeclRegistry, DeclSpec, SymbolId, SyntacticFacts};
