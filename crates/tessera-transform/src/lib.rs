//! Overload passes for Tessera
//!
//! This crate contains the passes that run on the HIR once declarations are
//! bound:
//! - Call-site tie-breaking between char and string overloads
//! - Overload group specialization (partial evaluation of the shared
//!   implementation once per declared signature)
//! - Override visibility reconciliation

pub mod accessibility;
pub mod candidates;
pub mod error;
pub mod intrinsic;
pub mod options;
pub mod overload_group;
pub mod partial_eval;
pub mod pass;
pub mod tiebreak;
pub mod validate;

#[cfg(test)]
mod test_support;

// Re-export main entry points
pub use accessibility::{BaseMember, BaseMemberTable, NoOverrides, OverrideDetector, OverrideInfo};
pub use error::SpecializeError;
pub use options::SpecializeOptions;
pub use overload_group::{MethodParam, OverloadGroup, OverloadGroupCompiler, SpecializedMethod};
pub use pass::{
    collect_overload_groups, resolve_module_calls, specialize_module, SpecializedClass,
    SpecializedModule,
};
pub use tiebreak::{resolve_call_overloads, resolve_call_site};
