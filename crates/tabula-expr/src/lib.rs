//! Typed temporal/interval expressions
//!
//! This crate implements the temporal algebra of the tabula expression
//! system:
//! - expression nodes typed by [`tabula_types::DataType`]
//! - interval unit conversion and scalar scaling
//! - arithmetic/comparison resolution over temporal operands
//! - the literal/column construction API
//!
//! All values are immutable after construction and every resolution function
//! is referentially transparent, so expressions may be shared and combined
//! across threads without coordination.

pub mod api;
pub mod error;
pub mod expr;
pub mod resolve;

pub use api::{
    IntervalBuilder, column, date, date_value, day, hour, interval, microsecond, millisecond,
    minute, month, nanosecond, second, time, time_value, timestamp, timestamp_value, to_interval,
    week, year,
};
pub use error::{ExprError, ExprResult};
pub use expr::{ComparisonOp, Expr, LiteralValue, Op};
pub use resolve::ArithmeticOp;
