//! Tabula data types
//!
//! This crate defines the value types of the tabula expression algebra:
//! - Time units with conversion ratios and the calendar/fixed-duration split
//! - Interval types parametrized by unit and integer storage
//! - Date, Time and Timestamp marker types
//! - Unit promotion rules for interval arithmetic

pub mod datatype;
pub mod error;
pub mod unit;

pub use datatype::{DataType, IntType, IntervalType};
pub use error::UnitError;
pub use unit::{TimeUnit, is_coarser, is_finer, promote, scale_factor};
