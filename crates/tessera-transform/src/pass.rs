//! Module-level drivers for call resolution and overload specialization.

use std::collections::HashMap;

use tessera_diagnostics::Diagnostics;
use tessera_hir::{DeclRegistry, FunctionDecl, MemberKind, Module};

use crate::accessibility::OverrideDetector;
use crate::error::SpecializeError;
use crate::options::SpecializeOptions;
use crate::overload_group::{OverloadGroup, OverloadGroupCompiler, SpecializedMethod};
use crate::tiebreak::resolve_call_overloads;

/// Specialized members of one class
#[derive(Debug, Clone, PartialEq)]
pub struct SpecializedClass {
    pub name: String,
    pub members: Vec<SpecializedMethod>,
}

#[derive(Debug, Clone)]
pub struct SpecializedModule {
    pub name: String,
    pub functions: Vec<SpecializedMethod>,
    pub classes: Vec<SpecializedClass>,
    /// User-facing, non-fatal reports (visibility mismatches)
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey<'a> {
    name: &'a str,
    is_static: bool,
    kind: MemberKind,
}

/// Group same-named declarations of one scope, keeping first-seen order.
///
/// Free functions are keyed by name alone; pass `owner` for class members,
/// which are further split by static-ness and member kind.
pub fn collect_overload_groups<'a>(
    owner: Option<&'a str>,
    decls: &'a [FunctionDecl],
) -> Result<Vec<OverloadGroup<'a>>, SpecializeError> {
    let mut order: Vec<(&'a str, Vec<&'a FunctionDecl>)> = Vec::new();
    let mut index: HashMap<GroupKey<'a>, usize> = HashMap::new();

    for decl in decls {
        let key = match owner {
            Some(_) => GroupKey {
                name: decl.name.as_str(),
                is_static: decl.is_static,
                kind: decl.kind,
            },
            None => GroupKey {
                name: decl.name.as_str(),
                is_static: false,
                kind: MemberKind::Function,
            },
        };
        match index.get(&key) {
            Some(&slot) => order[slot].1.push(decl),
            None => {
                index.insert(key, order.len());
                order.push((decl.name.as_str(), vec![decl]));
            }
        }
    }

    order
        .into_iter()
        .map(|(name, members)| OverloadGroup::from_declarations(owner, name, &members))
        .collect()
}

/// Rewrite every call site in `module` to its tie-break winner.
///
/// Returns how many call sites changed signature.
pub fn resolve_module_calls(
    module: &mut Module,
    registry: &DeclRegistry,
    options: &SpecializeOptions,
) -> usize {
    let bodies = module
        .functions
        .iter_mut()
        .chain(module.classes.iter_mut().flat_map(|c| c.members.iter_mut()))
        .filter_map(|decl| decl.body.as_mut());

    let mut changed = 0;
    for body in bodies {
        changed += resolve_call_overloads(body, registry, options);
    }
    if changed > 0 {
        log::debug!("module '{}': re-resolved {} call site(s)", module.name, changed);
    }
    changed
}

/// Specialize every overload group of `module`, in declaration order.
///
/// The first structural error aborts the whole module.
pub fn specialize_module(
    module: &Module,
    registry: &DeclRegistry,
    detector: &dyn OverrideDetector,
    options: &SpecializeOptions,
) -> Result<SpecializedModule, SpecializeError> {
    let compiler = OverloadGroupCompiler::new(registry, detector, options);
    let mut diagnostics = Diagnostics::new();

    let mut functions = Vec::new();
    for group in collect_overload_groups(None, &module.functions)? {
        functions.extend(compiler.compile(&group, &mut diagnostics)?);
    }

    let mut classes = Vec::with_capacity(module.classes.len());
    for class in &module.classes {
        let mut members = Vec::new();
        for group in collect_overload_groups(Some(class.name.as_str()), &class.members)? {
            members.extend(compiler.compile(&group, &mut diagnostics)?);
        }
        classes.push(SpecializedClass {
            name: class.name.clone(),
            members,
        });
    }

    log::debug!(
        "module '{}': {} function(s), {} class(es), {} diagnostic(s)",
        module.name,
        functions.len(),
        classes.len(),
        diagnostics.len()
    );
    Ok(SpecializedModule {
        name: module.name.clone(),
        functions,
        classes,
        diagnostics,
    })
}
