//! Expression construction and resolution errors

use tabula_types::{DataType, UnitError};
use thiserror::Error;

/// Result type for expression operations
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors raised while constructing or resolving typed expressions
///
/// Every error is deterministic given its inputs and is raised synchronously
/// at construction/resolution time; a resolution either yields a well-typed
/// node or fails without producing one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// Unit conversion failure
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Operator applied to a semantically illegal operand-type pair
    #[error("invalid operation: {left} {operator} {right}")]
    InvalidOperation {
        operator: String,
        left: String,
        right: String,
    },

    /// Interval construction with zero or several magnitude arguments
    #[error("interval construction requires exactly one magnitude ({given})")]
    AmbiguousInterval { given: String },

    /// Interval-only operation applied to a non-interval expression
    #[error("expected an interval expression, found {found}")]
    NotAnInterval { found: String },

    /// Interval reinterpretation of a non-integer expression
    #[error("to_interval requires an integer operand, found {found}")]
    NotAnInteger { found: String },

    /// Unparseable temporal literal
    #[error("invalid {kind} literal '{input}': {source}")]
    InvalidLiteral {
        kind: &'static str,
        input: String,
        source: chrono::ParseError,
    },

    /// Literal magnitude does not fit a 64-bit signed value after scaling
    #[error("arithmetic overflow in {operation}")]
    Overflow { operation: String },
}

impl ExprError {
    /// Build the type error for an illegal operand combination
    pub(crate) fn invalid_operation(operator: &str, left: &DataType, right: &DataType) -> Self {
        Self::InvalidOperation {
            operator: operator.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}
