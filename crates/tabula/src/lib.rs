//! Temporal/interval type-and-expression algebra for dataframe queries
//!
//! This crate bundles the tabula member crates:
//! - typed Interval, Date, Time and Timestamp expressions
//! - exact unit conversion over the fixed-duration chain
//! - arithmetic and comparison resolution with full legality checking
//!
//! # Example
//!
//! ```
//! use tabula::DataType;
//! use tabula::api::{date, week};
//!
//! let shifted = date("2015-01-02").unwrap().sub(week(3)).unwrap();
//! assert_eq!(shifted.data_type(), &DataType::Date);
//! ```

// Re-export all public APIs from internal crates
pub use tabula_expr as expr;
pub use tabula_types as types;

// Convenience re-exports
pub use tabula_expr::api;
pub use tabula_expr::{Expr, ExprError, ExprResult, Op};
pub use tabula_types::{DataType, IntType, IntervalType, TimeUnit, UnitError};
