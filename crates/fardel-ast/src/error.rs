use thiserror::Error;

/// Errors produced while scanning or rewriting a module.
#[derive(Debug, Error)]
pub enum AstError {
    /// The source text is not syntactically valid.
    #[error("Parse error: {message}")]
    Parse {
        /// Collected parser diagnostics, one per line.
        message: String,
    },

    /// The module uses syntax the factory rewrite cannot express.
    #[error("Unsupported module syntax: {construct}")]
    Unsupported {
        /// Human-readable name of the offending construct.
        construct: String,
    },
}

/// Result type alias for fardel-ast operations.
pub type Result<T> = std::result::Result<T, AstError>;
