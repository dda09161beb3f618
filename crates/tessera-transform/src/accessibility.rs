//! Override detection and visibility reconciliation.
//!
//! When a specialization overrides an inherited member, the target language
//! dictates its visibility. Source code cannot spell `protected internal`, so
//! `protected` is accepted as its approximation; any other difference is
//! reported and the required visibility is used regardless.

use std::collections::HashMap;

use tessera_diagnostics::{Diagnostic, DiagnosticCode, Span};
use tessera_hir::{MemberKind, Visibility};
use tessera_types::{types_equal, StaticType};

/// Answer from the override-detection collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverrideInfo {
    pub is_override: bool,
    /// Visibility the overridden base member forces on overrides
    pub required_visibility: Option<Visibility>,
}

/// Decides whether a member overrides something it inherits
pub trait OverrideDetector {
    fn detect_override(
        &self,
        owner: Option<&str>,
        name: &str,
        kind: MemberKind,
        declared_params: &[StaticType],
    ) -> OverrideInfo;
}

/// Detector for units without inheritance
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideDetector for NoOverrides {
    fn detect_override(
        &self,
        _owner: Option<&str>,
        _name: &str,
        _kind: MemberKind,
        _declared_params: &[StaticType],
    ) -> OverrideInfo {
        OverrideInfo::default()
    }
}

/// An overridable member inherited from a base type
#[derive(Debug, Clone)]
pub struct BaseMember {
    pub name: String,
    pub kind: MemberKind,
    pub params: Vec<StaticType>,
    pub visibility: Visibility,
}

/// Inherited members per derived type, loaded from base-type metadata
#[derive(Debug, Clone, Default)]
pub struct BaseMemberTable {
    inherited: HashMap<String, Vec<BaseMember>>,
}

impl BaseMemberTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `derived` inherits `member`
    pub fn insert(&mut self, derived: impl Into<String>, member: BaseMember) {
        self.inherited.entry(derived.into()).or_default().push(member);
    }
}

impl OverrideDetector for BaseMemberTable {
    fn detect_override(
        &self,
        owner: Option<&str>,
        name: &str,
        kind: MemberKind,
        declared_params: &[StaticType],
    ) -> OverrideInfo {
        let members = match owner.and_then(|o| self.inherited.get(o)) {
            Some(members) => members,
            None => return OverrideInfo::default(),
        };
        members
            .iter()
            .find(|m| {
                m.name == name
                    && m.kind == kind
                    && m.params.len() == declared_params.len()
                    && m.params
                        .iter()
                        .zip(declared_params.iter())
                        .all(|(a, b)| types_equal(a, b))
            })
            .map(|m| OverrideInfo {
                is_override: true,
                required_visibility: Some(m.visibility),
            })
            .unwrap_or_default()
    }
}

/// Whether source may declare `declared` for a member that must be `required`
pub fn is_compatible(declared: Visibility, required: Visibility) -> bool {
    declared == required
        || (declared == Visibility::Protected && required == Visibility::ProtectedInternal)
}

/// Visibility to emit for a member, plus a diagnostic when the declared one
/// conflicts with what the overridden base member requires.
pub fn reconcile_visibility(
    member: &str,
    declared: Option<Visibility>,
    info: &OverrideInfo,
    span: Span,
) -> (Visibility, Option<Diagnostic>) {
    let declared = declared.unwrap_or_default();
    let required = match (info.is_override, info.required_visibility) {
        (true, Some(required)) => required,
        _ => return (declared, None),
    };
    if is_compatible(declared, required) {
        return (required, None);
    }

    log::warn!(
        "override '{}' declared {} but base member requires {}",
        member,
        declared,
        required
    );
    let diag = Diagnostic::new(
        DiagnosticCode::OverrideVisibilityMismatch,
        format!(
            "'{}' overrides a member that requires '{}' visibility but is declared '{}'",
            member, required, declared
        ),
    )
    .with_span(span)
    .with_help(format!("declare '{}' as {}", member, required))
    .with_note("member", member)
    .with_note("required", required.as_str())
    .with_note("declared", declared.as_str())
    .build();
    (required, Some(diag))
}
