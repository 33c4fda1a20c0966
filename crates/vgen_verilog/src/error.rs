//! Extraction failures.

use vgen_source::Span;

/// The reasons a module signature could not be located.
///
/// Every variant means "not found": no partial [`ModuleInfo`](crate::ModuleInfo)
/// is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The text contains no `module` keyword.
    #[error("no module declaration found")]
    NoModule,

    /// A `module` keyword was found but no `endmodule` follows it.
    #[error("module declaration is not closed by `endmodule`")]
    MissingEndmodule {
        /// The span of the `module` keyword.
        module_span: Span,
    },

    /// The `module` keyword is not followed by an identifier.
    #[error("expected a module name after `module`")]
    MissingName {
        /// The span of the token found where the name should be.
        span: Span,
    },
}

impl ExtractError {
    /// Always `true`; all extraction failures are the not-found outcome.
    pub fn is_not_found(&self) -> bool {
        true
    }

    /// Returns where scanning stopped, if known.
    pub fn span(&self) -> Option<Span> {
        match self {
            ExtractError::NoModule => None,
            ExtractError::MissingEndmodule { module_span } => Some(*module_span),
            ExtractError::MissingName { span } => Some(*span),
        }
    }
}
