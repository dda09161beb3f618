//! Fatal errors raised while specializing overload groups.
//!
//! Every variant is an internal invariant violation: either malformed input
//! an earlier stage should have rejected, or a bug in the evaluator. They
//! abort the compilation unit and are never downgraded to warnings.

use tessera_diagnostics::{Diagnostic, DiagnosticCode};
use tessera_hir::DeclHandle;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecializeError {
    #[error("overload group '{name}' has no implementation")]
    NoImplementation { name: String },

    #[error("overload group '{name}' has {count} implementations, expected exactly one")]
    MultipleImplementations { name: String, count: usize },

    #[error(
        "signature {signature} of '{name}' declares {signature_params} parameters \
         but the implementation only has {implementation_params}"
    )]
    SignatureTooLong {
        name: String,
        signature: DeclHandle,
        signature_params: usize,
        implementation_params: usize,
    },

    #[error("type-equality intrinsic survived specialization of '{name}' for signature {signature}")]
    ResidualIntrinsic { name: String, signature: DeclHandle },

    #[error(
        "specialization of '{name}' for signature {signature} still references \
         parameter '{param}' which that signature does not declare"
    )]
    MissingParameterReference {
        name: String,
        signature: DeclHandle,
        param: String,
    },

    #[error("declaration {0} is not registered")]
    UnknownDeclaration(DeclHandle),
}

impl SpecializeError {
    /// Report this error as an internal-error diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(DiagnosticCode::InternalError, self.to_string()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_group() {
        let err = SpecializeError::MultipleImplementations {
            name: "f".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "overload group 'f' has 2 implementations, expected exactly one"
        );
    }

    #[test]
    fn test_to_diagnostic_is_internal_error() {
        let err = SpecializeError::NoImplementation { name: "g".to_string() };
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, DiagnosticCode::InternalError);
        assert!(diag.message.contains("'g'"));
    }
}
