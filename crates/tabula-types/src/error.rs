//! Unit conversion errors

use thiserror::Error;

use crate::unit::TimeUnit;

/// Errors raised by unit conversion and promotion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// Conversion requested across the calendar/fixed-duration boundary
    #[error("cannot convert between '{from}' and '{to}': calendar and fixed-duration units do not mix")]
    IncompatibleUnits { from: TimeUnit, to: TimeUnit },

    /// Up-conversion of a magnitude that is not a whole multiple of the target unit
    #[error("cannot convert {value} '{from}' to '{to}': {value} is not divisible by {factor}")]
    NonExactConversion {
        value: i64,
        from: TimeUnit,
        to: TimeUnit,
        factor: i64,
    },

    /// Unit code or name that is not in the registry
    #[error("unknown time unit '{0}'")]
    UnknownUnit(String),
}
