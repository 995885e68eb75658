//! Typed expression nodes
//!
//! An [`Expr`] pairs an operation tree with its resolved [`DataType`]. Nodes
//! are immutable once built: every combinator returns a new node or a typed
//! error, never a partially-typed node. Operand trees are acyclic and owned
//! by their root.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tabula_types::{DataType, IntType, IntervalType, TimeUnit, UnitError, is_finer, scale_factor};

use crate::error::{ExprError, ExprResult};
use crate::resolve;

/// Concrete payload of a literal node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    /// Signed interval magnitude; the unit lives in the node's type
    Interval(i64),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Instant without timezone
    Timestamp(NaiveDateTime),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval(value) => write!(f, "{}", value),
            Self::Date(value) => write!(f, "{}", value),
            Self::Time(value) => write!(f, "{}", value),
            Self::Timestamp(value) => write!(f, "{}", value),
        }
    }
}

/// Comparison operators legal between aligned temporal operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl ComparisonOp {
    /// Operator symbol for error messages and rendering
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// The closed set of operation nodes
///
/// Only the construction API and the resolver create these; the `*Add` and
/// `*Subtract` kinds are exactly the resolver's output set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    /// Concrete typed value
    Literal(LiteralValue),
    /// Reference to a named column of the node's type
    Column { name: String },
    /// Integer column reinterpreted as an interval, no data transformation
    IntervalFromInteger { source: Box<Expr> },
    /// Symbolic unit conversion; exact-divisibility is checked at evaluation
    IntervalToUnit { source: Box<Expr> },
    /// Interval scaled by a signed integer factor
    IntervalMultiply { source: Box<Expr>, factor: i64 },
    /// Sum of two intervals, typed at the finer operand unit
    IntervalAdd { left: Box<Expr>, right: Box<Expr> },
    /// Date shifted forward by an interval
    DateAdd { left: Box<Expr>, right: Box<Expr> },
    /// Date shifted backward by an interval, or the difference of two dates
    DateSubtract { left: Box<Expr>, right: Box<Expr> },
    /// Time shifted forward by an interval
    TimeAdd { left: Box<Expr>, right: Box<Expr> },
    /// Time shifted backward by an interval, or the difference of two times
    TimeSubtract { left: Box<Expr>, right: Box<Expr> },
    /// Timestamp shifted forward by an interval
    TimestampAdd { left: Box<Expr>, right: Box<Expr> },
    /// Timestamp shifted backward by an interval, or the difference of two
    /// timestamps
    TimestampSubtract { left: Box<Expr>, right: Box<Expr> },
    /// Boolean-typed comparison of two aligned operands
    Comparison {
        op: ComparisonOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Op {
    /// Node kind name used in rendering
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "Literal",
            Self::Column { .. } => "Column",
            Self::IntervalFromInteger { .. } => "IntervalFromInteger",
            Self::IntervalToUnit { .. } => "IntervalToUnit",
            Self::IntervalMultiply { .. } => "IntervalMultiply",
            Self::IntervalAdd { .. } => "IntervalAdd",
            Self::DateAdd { .. } => "DateAdd",
            Self::DateSubtract { .. } => "DateSubtract",
            Self::TimeAdd { .. } => "TimeAdd",
            Self::TimeSubtract { .. } => "TimeSubtract",
            Self::TimestampAdd { .. } => "TimestampAdd",
            Self::TimestampSubtract { .. } => "TimestampSubtract",
            Self::Comparison { .. } => "Comparison",
        }
    }

    /// Child expressions, left to right
    fn operands(&self) -> Vec<&Expr> {
        match self {
            Self::Literal(_) | Self::Column { .. } => Vec::new(),
            Self::IntervalFromInteger { source }
            | Self::IntervalToUnit { source }
            | Self::IntervalMultiply { source, .. } => vec![source],
            Self::IntervalAdd { left, right }
            | Self::DateAdd { left, right }
            | Self::DateSubtract { left, right }
            | Self::TimeAdd { left, right }
            | Self::TimeSubtract { left, right }
            | Self::TimestampAdd { left, right }
            | Self::TimestampSubtract { left, right }
            | Self::Comparison { left, right, .. } => vec![left, right],
        }
    }
}

/// A typed expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    op: Op,
    data_type: DataType,
}

impl Expr {
    pub(crate) fn new(op: Op, data_type: DataType) -> Self {
        Self { op, data_type }
    }

    /// Interval literal with the narrowest fitting storage type
    pub(crate) fn interval_literal(value: i64, unit: TimeUnit) -> Self {
        Self::new(
            Op::Literal(LiteralValue::Interval(value)),
            DataType::interval(unit, IntType::fitting(value)),
        )
    }

    /// The operation node
    pub fn op(&self) -> &Op {
        &self.op
    }

    /// The resolved type of this expression
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// The magnitude, if this node is an interval literal
    pub fn as_interval_literal(&self) -> Option<i64> {
        match self.op {
            Op::Literal(LiteralValue::Interval(value)) => Some(value),
            _ => None,
        }
    }

    fn interval_type(&self) -> ExprResult<IntervalType> {
        match self.data_type {
            DataType::Interval(interval) => Ok(interval),
            other => Err(ExprError::NotAnInterval {
                found: other.to_string(),
            }),
        }
    }

    /// Convert an interval expression to another unit
    ///
    /// Down-conversion scales the magnitude exactly. Up-conversion of a
    /// literal requires the magnitude to be a whole multiple of the target
    /// unit; for symbolic values the check is deferred to evaluation and the
    /// conversion is recorded structurally. Conversion across the
    /// calendar/fixed-duration boundary fails.
    pub fn to_unit(self, target: TimeUnit) -> ExprResult<Expr> {
        let current = self.interval_type()?;
        if current.unit == target {
            return Ok(self);
        }
        let factor = scale_factor(current.unit, target)?;
        if let Op::Literal(LiteralValue::Interval(value)) = &self.op {
            let value = *value;
            let converted = if is_finer(target, current.unit) {
                value.checked_mul(factor).ok_or_else(|| ExprError::Overflow {
                    operation: format!("{} '{}' to '{}'", value, current.unit, target),
                })?
            } else {
                if value % factor != 0 {
                    return Err(UnitError::NonExactConversion {
                        value,
                        from: current.unit,
                        to: target,
                        factor,
                    }
                    .into());
                }
                value / factor
            };
            return Ok(Expr::interval_literal(converted, target));
        }
        let data_type = DataType::interval(target, current.value_type);
        Ok(Expr::new(
            Op::IntervalToUnit {
                source: Box::new(self),
            },
            data_type,
        ))
    }

    /// Scale an interval by a signed integer factor; the unit is unchanged
    pub fn multiply(self, factor: i64) -> ExprResult<Expr> {
        let current = self.interval_type()?;
        if let Op::Literal(LiteralValue::Interval(value)) = &self.op {
            let scaled = value.checked_mul(factor).ok_or_else(|| ExprError::Overflow {
                operation: format!("{} * {}", value, factor),
            })?;
            return Ok(Expr::interval_literal(scaled, current.unit));
        }
        Ok(Expr::new(
            Op::IntervalMultiply {
                source: Box::new(self),
                factor,
            },
            DataType::Interval(current),
        ))
    }

    /// Resolve `self + rhs` under the temporal legality rules
    pub fn add(self, rhs: Expr) -> ExprResult<Expr> {
        resolve::arithmetic(resolve::ArithmeticOp::Add, self, rhs)
    }

    /// Resolve `self - rhs` under the temporal legality rules
    pub fn sub(self, rhs: Expr) -> ExprResult<Expr> {
        resolve::arithmetic(resolve::ArithmeticOp::Subtract, self, rhs)
    }

    /// Equality comparison
    pub fn eq(self, rhs: Expr) -> ExprResult<Expr> {
        resolve::comparison(ComparisonOp::Eq, self, rhs)
    }

    /// Inequality comparison
    pub fn not_eq(self, rhs: Expr) -> ExprResult<Expr> {
        resolve::comparison(ComparisonOp::NotEq, self, rhs)
    }

    /// Less-than comparison
    pub fn lt(self, rhs: Expr) -> ExprResult<Expr> {
        resolve::comparison(ComparisonOp::Lt, self, rhs)
    }

    /// Less-than-or-equal comparison
    pub fn lt_eq(self, rhs: Expr) -> ExprResult<Expr> {
        resolve::comparison(ComparisonOp::LtEq, self, rhs)
    }

    /// Greater-than comparison
    pub fn gt(self, rhs: Expr) -> ExprResult<Expr> {
        resolve::comparison(ComparisonOp::Gt, self, rhs)
    }

    /// Greater-than-or-equal comparison
    pub fn gt_eq(self, rhs: Expr) -> ExprResult<Expr> {
        resolve::comparison(ComparisonOp::GtEq, self, rhs)
    }

    /// Alias for `to_unit(Year)`
    pub fn years(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Year)
    }

    /// Alias for `to_unit(Month)`
    pub fn months(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Month)
    }

    /// Alias for `to_unit(Week)`
    pub fn weeks(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Week)
    }

    /// Alias for `to_unit(Day)`
    pub fn days(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Day)
    }

    /// Alias for `to_unit(Hour)`
    pub fn hours(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Hour)
    }

    /// Alias for `to_unit(Minute)`
    pub fn minutes(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Minute)
    }

    /// Alias for `to_unit(Second)`
    pub fn seconds(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Second)
    }

    /// Alias for `to_unit(Millisecond)`
    pub fn milliseconds(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Millisecond)
    }

    /// Alias for `to_unit(Microsecond)`
    pub fn microseconds(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Microsecond)
    }

    /// Alias for `to_unit(Nanosecond)`
    pub fn nanoseconds(self) -> ExprResult<Expr> {
        self.to_unit(TimeUnit::Nanosecond)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.op {
            Op::Literal(value) => write!(f, "Literal[{}]\n  {}", self.data_type, value),
            Op::Column { name } => write!(f, "Column[{}] '{}'", self.data_type, name),
            Op::IntervalMultiply { source, factor } => {
                write!(f, "IntervalMultiply[{}] * {}", self.data_type, factor)?;
                write_operand(f, source)
            }
            Op::Comparison { op, left, right } => {
                write!(f, "Comparison[{}] '{}'", self.data_type, op.symbol())?;
                write_operand(f, left)?;
                write_operand(f, right)
            }
            other => {
                write!(f, "{}[{}]", other.kind_name(), self.data_type)?;
                for operand in other.operands() {
                    write_operand(f, operand)?;
                }
                Ok(())
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr) -> fmt::Result {
    let rendered = operand.to_string().replace('\n', "\n  ");
    write!(f, "\n  {}", rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_literal_infers_narrowest_storage() {
        let small = Expr::interval_literal(3, TimeUnit::Week);
        assert_eq!(
            small.data_type(),
            &DataType::interval(TimeUnit::Week, IntType::Int8)
        );

        let wide = Expr::interval_literal(100_000, TimeUnit::Second);
        assert_eq!(
            wide.data_type(),
            &DataType::interval(TimeUnit::Second, IntType::Int32)
        );
    }

    #[test]
    fn test_literal_rendering() {
        let expr = Expr::interval_literal(3, TimeUnit::Week);
        assert_eq!(expr.to_string(), "Literal[interval<int8>(unit='w')]\n  3");
    }

    #[test]
    fn test_same_unit_conversion_is_identity() {
        let expr = Expr::interval_literal(2, TimeUnit::Second);
        let converted = expr.clone().to_unit(TimeUnit::Second).unwrap();
        assert_eq!(converted, expr);
    }
}
