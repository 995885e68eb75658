//! Construction API for temporal literals and columns
//!
//! User-facing constructors:
//! - [`interval`] plus the per-unit helpers ([`day`], [`hour`], ...)
//! - [`IntervalBuilder`] for the named-magnitude form
//! - [`to_interval`] for reinterpreting integer columns as intervals
//! - [`date`], [`time`], [`timestamp`] literal parsers and their
//!   `*_value` counterparts for already-parsed values
//! - [`column`] for typed column references

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tabula_types::{DataType, IntervalType, TimeUnit};

use crate::error::{ExprError, ExprResult};
use crate::expr::{Expr, LiteralValue, Op};

/// Interval literal from a raw magnitude and an explicit unit
///
/// The storage type is inferred as the narrowest signed integer that holds
/// the magnitude.
pub fn interval(value: i64, unit: TimeUnit) -> Expr {
    Expr::interval_literal(value, unit)
}

/// Interval literal of `n` years
pub fn year(n: i64) -> Expr {
    interval(n, TimeUnit::Year)
}

/// Interval literal of `n` months
pub fn month(n: i64) -> Expr {
    interval(n, TimeUnit::Month)
}

/// Interval literal of `n` weeks
pub fn week(n: i64) -> Expr {
    interval(n, TimeUnit::Week)
}

/// Interval literal of `n` days
pub fn day(n: i64) -> Expr {
    interval(n, TimeUnit::Day)
}

/// Interval literal of `n` hours
pub fn hour(n: i64) -> Expr {
    interval(n, TimeUnit::Hour)
}

/// Interval literal of `n` minutes
pub fn minute(n: i64) -> Expr {
    interval(n, TimeUnit::Minute)
}

/// Interval literal of `n` seconds
pub fn second(n: i64) -> Expr {
    interval(n, TimeUnit::Second)
}

/// Interval literal of `n` milliseconds
pub fn millisecond(n: i64) -> Expr {
    interval(n, TimeUnit::Millisecond)
}

/// Interval literal of `n` microseconds
pub fn microsecond(n: i64) -> Expr {
    interval(n, TimeUnit::Microsecond)
}

/// Interval literal of `n` nanoseconds
pub fn nanosecond(n: i64) -> Expr {
    interval(n, TimeUnit::Nanosecond)
}

/// Named-magnitude interval construction
///
/// Exactly one magnitude must be supplied; supplying none, or several, is an
/// ambiguous request and fails at [`build`](IntervalBuilder::build).
#[derive(Debug, Default)]
pub struct IntervalBuilder {
    magnitudes: Vec<(TimeUnit, i64)>,
}

impl IntervalBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    fn set(mut self, unit: TimeUnit, value: i64) -> Self {
        self.magnitudes.push((unit, value));
        self
    }

    /// Set a magnitude in years
    pub fn years(self, n: i64) -> Self {
        self.set(TimeUnit::Year, n)
    }

    /// Set a magnitude in months
    pub fn months(self, n: i64) -> Self {
        self.set(TimeUnit::Month, n)
    }

    /// Set a magnitude in weeks
    pub fn weeks(self, n: i64) -> Self {
        self.set(TimeUnit::Week, n)
    }

    /// Set a magnitude in days
    pub fn days(self, n: i64) -> Self {
        self.set(TimeUnit::Day, n)
    }

    /// Set a magnitude in hours
    pub fn hours(self, n: i64) -> Self {
        self.set(TimeUnit::Hour, n)
    }

    /// Set a magnitude in minutes
    pub fn minutes(self, n: i64) -> Self {
        self.set(TimeUnit::Minute, n)
    }

    /// Set a magnitude in seconds
    pub fn seconds(self, n: i64) -> Self {
        self.set(TimeUnit::Second, n)
    }

    /// Set a magnitude in milliseconds
    pub fn milliseconds(self, n: i64) -> Self {
        self.set(TimeUnit::Millisecond, n)
    }

    /// Set a magnitude in microseconds
    pub fn microseconds(self, n: i64) -> Self {
        self.set(TimeUnit::Microsecond, n)
    }

    /// Set a magnitude in nanoseconds
    pub fn nanoseconds(self, n: i64) -> Self {
        self.set(TimeUnit::Nanosecond, n)
    }

    /// Build the interval literal
    pub fn build(self) -> ExprResult<Expr> {
        match self.magnitudes.as_slice() {
            [] => Err(ExprError::AmbiguousInterval {
                given: "none given".to_string(),
            }),
            [(unit, value)] => Ok(interval(*value, *unit)),
            several => {
                let units: Vec<&str> = several.iter().map(|(unit, _)| unit.name()).collect();
                Err(ExprError::AmbiguousInterval {
                    given: units.join(", "),
                })
            }
        }
    }
}

/// Reinterpret an integer expression as an interval of the given unit
///
/// No data transformation takes place: the interval's value type equals the
/// source integer type.
pub fn to_interval(source: Expr, unit: TimeUnit) -> ExprResult<Expr> {
    let value_type = match source.data_type() {
        DataType::Integer(value_type) => *value_type,
        other => {
            return Err(ExprError::NotAnInteger {
                found: other.to_string(),
            });
        }
    };
    let data_type = DataType::Interval(IntervalType::new(unit, value_type));
    Ok(Expr::new(
        Op::IntervalFromInteger {
            source: Box::new(source),
        },
        data_type,
    ))
}

/// Reference to a named column of the given type
pub fn column(name: impl Into<String>, data_type: DataType) -> Expr {
    Expr::new(Op::Column { name: name.into() }, data_type)
}

/// Date literal parsed from `YYYY-MM-DD`
pub fn date(input: &str) -> ExprResult<Expr> {
    let parsed = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|source| {
        ExprError::InvalidLiteral {
            kind: "date",
            input: input.to_string(),
            source,
        }
    })?;
    Ok(date_value(parsed))
}

/// Date literal from an already-parsed value
pub fn date_value(value: NaiveDate) -> Expr {
    Expr::new(Op::Literal(LiteralValue::Date(value)), DataType::Date)
}

/// Time literal parsed from `HH:MM[:SS[.fff]]`
pub fn time(input: &str) -> ExprResult<Expr> {
    let parsed = NaiveTime::parse_from_str(input, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|source| ExprError::InvalidLiteral {
            kind: "time",
            input: input.to_string(),
            source,
        })?;
    Ok(time_value(parsed))
}

/// Time literal from an already-parsed value
pub fn time_value(value: NaiveTime) -> Expr {
    Expr::new(Op::Literal(LiteralValue::Time(value)), DataType::Time)
}

/// Timestamp literal parsed from `YYYY-MM-DD HH:MM:SS[.fff]`, with either a
/// space or `T` separator
pub fn timestamp(input: &str) -> ExprResult<Expr> {
    let parsed = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|source| ExprError::InvalidLiteral {
            kind: "timestamp",
            input: input.to_string(),
            source,
        })?;
    Ok(timestamp_value(parsed))
}

/// Timestamp literal from an already-parsed value
pub fn timestamp_value(value: NaiveDateTime) -> Expr {
    Expr::new(
        Op::Literal(LiteralValue::Timestamp(value)),
        DataType::Timestamp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_exactly_one_magnitude() {
        assert!(IntervalBuilder::new().weeks(2).build().is_ok());
        assert!(matches!(
            IntervalBuilder::new().build(),
            Err(ExprError::AmbiguousInterval { .. })
        ));
        assert!(matches!(
            IntervalBuilder::new().days(1).hours(2).build(),
            Err(ExprError::AmbiguousInterval { .. })
        ));
    }

    #[test]
    fn test_temporal_literal_parsing() {
        assert!(date("2015-01-02").is_ok());
        assert!(date("2015-13-02").is_err());
        assert!(time("18:00").is_ok());
        assert!(time("18:00:30.250").is_ok());
        assert!(timestamp("2015-01-02 18:00:00").is_ok());
        assert!(timestamp("2015-01-02T18:00:00").is_ok());
        assert!(timestamp("not a timestamp").is_err());
    }
}
