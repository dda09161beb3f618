//! Diagnostic infrastructure for the Tessera compiler.
//!
//! Structured, serializable diagnostics with error codes and source spans.
//!
//! # Example
//!
//! ```
//! use tessera_diagnostics::{Diagnostic, DiagnosticCode, FileId, Span};
//!
//! let diag = Diagnostic::new(
//!     DiagnosticCode::OverrideVisibilityMismatch,
//!     "'render' overrides a protected member but is declared public",
//! )
//! .with_span(Span::new(FileId(0), 10, 16))
//! .build();
//! assert!(diag.is_error());
//! ```

pub mod diagnostic;
pub mod span;

// Re-export commonly used types
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Diagnostics, Severity};
pub use span::{FileId, Span};
