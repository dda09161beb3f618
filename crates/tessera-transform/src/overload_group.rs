//! Overload group compilation.
//!
//! A group is one implementation (the declaration with a body) plus the
//! bodiless signatures that share its name. Each signature gets its own copy
//! of the implementation body, partially evaluated against the parameter
//! types that signature declares.

use tessera_diagnostics::Diagnostics;
use tessera_hir::{DeclHandle, DeclRegistry, FunctionDecl, MemberKind, Stmt, Visibility};
use tessera_types::StaticType;

use crate::accessibility::{reconcile_visibility, OverrideDetector};
use crate::error::SpecializeError;
use crate::options::SpecializeOptions;
use crate::partial_eval::{ParamTypeMap, PartialEvaluator};
use crate::validate::{check_no_missing_params, check_no_residual_intrinsics};

/// One implementation and the signatures it serves, in declaration order
#[derive(Debug, Clone)]
pub struct OverloadGroup<'a> {
    /// Owning class, `None` for free functions
    pub owner: Option<&'a str>,
    pub name: &'a str,
    pub implementation: &'a FunctionDecl,
    pub signatures: Vec<&'a FunctionDecl>,
}

impl<'a> OverloadGroup<'a> {
    /// Split same-named declarations into implementation and signatures.
    ///
    /// Exactly one declaration must carry a body. A lone implementation
    /// serves as its own signature.
    pub fn from_declarations(
        owner: Option<&'a str>,
        name: &'a str,
        decls: &[&'a FunctionDecl],
    ) -> Result<Self, SpecializeError> {
        let mut bodies = decls.iter().filter(|d| d.has_body());
        let implementation = match bodies.next() {
            Some(decl) => *decl,
            None => {
                return Err(SpecializeError::NoImplementation {
                    name: qualified_name(owner, name),
                })
            }
        };
        let extra = bodies.count();
        if extra > 0 {
            return Err(SpecializeError::MultipleImplementations {
                name: qualified_name(owner, name),
                count: extra + 1,
            });
        }

        let mut signatures: Vec<&FunctionDecl> =
            decls.iter().copied().filter(|d| !d.has_body()).collect();
        if signatures.is_empty() {
            signatures.push(implementation);
        }
        Ok(Self {
            owner,
            name,
            implementation,
            signatures,
        })
    }

    pub fn kind(&self) -> MemberKind {
        self.implementation.kind
    }

    pub fn display_name(&self) -> String {
        qualified_name(self.owner, self.name)
    }
}

fn qualified_name(owner: Option<&str>, name: &str) -> String {
    match owner {
        Some(owner) => format!("{}.{}", owner, name),
        None => name.to_string(),
    }
}

/// A parameter of a specialized method: the implementation's identity with
/// the signature's type and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodParam {
    pub handle: DeclHandle,
    pub name: String,
    pub ty: StaticType,
    pub is_optional: bool,
    pub is_rest: bool,
}

/// One emitted member per declared signature
#[derive(Debug, Clone, PartialEq)]
pub struct SpecializedMethod {
    pub name: String,
    /// Signature this method was specialized for
    pub signature: DeclHandle,
    pub kind: MemberKind,
    pub parameters: Vec<MethodParam>,
    pub return_type: StaticType,
    pub body: Vec<Stmt>,
    pub visibility: Visibility,
    pub is_override: bool,
    pub is_static: bool,
}

/// Result of binding a signature onto the implementation's parameters
#[derive(Debug, Clone)]
pub struct SignatureBinding {
    pub types: ParamTypeMap,
    pub parameters: Vec<MethodParam>,
    /// Implementation parameters this signature does not supply
    pub missing: Vec<DeclHandle>,
}

/// Zip `signature`'s declared parameter types onto the implementation's
/// parameter handles by position. Trailing implementation parameters the
/// signature lacks are bound to [`StaticType::Absent`].
pub fn bind_signature(
    registry: &DeclRegistry,
    group: &OverloadGroup<'_>,
    signature: &FunctionDecl,
) -> Result<SignatureBinding, SpecializeError> {
    let implementation = group.implementation;
    if signature.params.len() > implementation.params.len() {
        return Err(SpecializeError::SignatureTooLong {
            name: group.display_name(),
            signature: signature.handle,
            signature_params: signature.params.len(),
            implementation_params: implementation.params.len(),
        });
    }

    let mut types = ParamTypeMap::with_capacity(implementation.params.len());
    let mut parameters = Vec::with_capacity(signature.params.len());
    for (&sig_param, &impl_param) in signature.params.iter().zip(&implementation.params) {
        let sig_facts = registry
            .facts(sig_param)
            .ok_or(SpecializeError::UnknownDeclaration(sig_param))?;
        let impl_facts = registry
            .facts(impl_param)
            .ok_or(SpecializeError::UnknownDeclaration(impl_param))?;
        let ty = sig_facts
            .declared_type
            .as_ref()
            .map(|t| StaticType::from_syntax(t, &signature.type_params))
            .unwrap_or(StaticType::Any);
        types.insert(impl_param, ty.clone());
        parameters.push(MethodParam {
            handle: impl_param,
            name: impl_facts.name.clone(),
            ty,
            is_optional: sig_facts.is_optional,
            is_rest: sig_facts.is_rest,
        });
    }

    let missing: Vec<DeclHandle> = implementation.params[signature.params.len()..].to_vec();
    for &handle in &missing {
        types.insert(handle, StaticType::Absent);
    }

    Ok(SignatureBinding {
        types,
        parameters,
        missing,
    })
}

/// Compiles overload groups into one specialized member per signature
pub struct OverloadGroupCompiler<'a> {
    registry: &'a DeclRegistry,
    detector: &'a dyn OverrideDetector,
    options: &'a SpecializeOptions,
}

impl<'a> OverloadGroupCompiler<'a> {
    pub fn new(
        registry: &'a DeclRegistry,
        detector: &'a dyn OverrideDetector,
        options: &'a SpecializeOptions,
    ) -> Self {
        Self {
            registry,
            detector,
            options,
        }
    }

    /// Specialize every signature of `group`, in declaration order.
    ///
    /// Visibility mismatches are pushed to `diagnostics`; structural
    /// violations abort with an error.
    pub fn compile(
        &self,
        group: &OverloadGroup<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<SpecializedMethod>, SpecializeError> {
        log::debug!(
            "specializing '{}' for {} signature(s)",
            group.display_name(),
            group.signatures.len()
        );
        group
            .signatures
            .iter()
            .map(|signature| self.specialize(group, signature, diagnostics))
            .collect()
    }

    fn specialize(
        &self,
        group: &OverloadGroup<'_>,
        signature: &FunctionDecl,
        diagnostics: &mut Diagnostics,
    ) -> Result<SpecializedMethod, SpecializeError> {
        let implementation = group.implementation;
        let binding = bind_signature(self.registry, group, signature)?;

        let body = match &implementation.body {
            Some(body) => {
                let evaluator = PartialEvaluator::new(
                    &binding.types,
                    &self.options.intrinsic_name,
                    &implementation.type_params,
                );
                evaluator.evaluate_body(body)
            }
            None => Vec::new(),
        };

        let display = group.display_name();
        check_no_residual_intrinsics(&body, &self.options.intrinsic_name, &display, signature.handle)?;
        check_no_missing_params(&body, &binding.missing, self.registry, &display, signature.handle)?;

        let declared_params: Vec<StaticType> =
            binding.parameters.iter().map(|p| p.ty.clone()).collect();
        let info = self
            .detector
            .detect_override(group.owner, group.name, group.kind(), &declared_params);
        let declared_visibility = signature.visibility.or(implementation.visibility);
        let (visibility, mismatch) =
            reconcile_visibility(&display, declared_visibility, &info, signature.span);
        if let Some(diag) = mismatch {
            diagnostics.push(diag);
        }

        let return_type = signature
            .return_type
            .as_ref()
            .map(|t| StaticType::from_syntax(t, &signature.type_params))
            .unwrap_or(StaticType::Any);

        log::trace!("specialized {} for {}", display, signature.handle);
        Ok(SpecializedMethod {
            name: group.name.to_string(),
            signature: signature.handle,
            kind: group.kind(),
            parameters: binding.parameters,
            return_type,
            body,
            visibility,
            is_override: info.is_override,
            is_static: implementation.is_static,
        })
    }
}
