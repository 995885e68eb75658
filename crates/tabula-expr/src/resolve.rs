//! Arithmetic and comparison resolution
//!
//! Encodes the legality rules for combining temporal operands:
//! - instants (Date, Time, Timestamp) shift by intervals and subtract within
//!   their own domain
//! - Date operands reject sub-day interval units (no time-of-day component)
//! - interval pairs add at the finer operand unit
//! - subtraction of two instants is typed at a fixed canonical unit/storage
//!
//! Resolution is an exhaustive match over the (left kind, right kind,
//! operator) triple: every combination either produces a fully typed node or
//! a typed error, never an implicitly handled case.

use tabula_types::{DataType, IntType, IntervalType, TimeUnit, promote};

use crate::error::{ExprError, ExprResult};
use crate::expr::{ComparisonOp, Expr, Op};

/// Binary arithmetic operators subject to temporal resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
}

impl ArithmeticOp {
    /// Operator symbol for error messages
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
        }
    }
}

/// Interval units a Date operand accepts
///
/// Dates carry no time-of-day, so hour and finer units are illegal.
fn date_compatible(unit: TimeUnit) -> bool {
    matches!(
        unit,
        TimeUnit::Year | TimeUnit::Month | TimeUnit::Week | TimeUnit::Day
    )
}

/// Instants carry no unit, so instant subtraction fixes a canonical result
/// type: days for dates, seconds for times and timestamps, stored as int32.
fn instant_difference_type(instant: DataType) -> DataType {
    match instant {
        DataType::Date => DataType::interval(TimeUnit::Day, IntType::Int32),
        _ => DataType::interval(TimeUnit::Second, IntType::Int32),
    }
}

fn binary(left: Expr, right: Expr) -> (Box<Expr>, Box<Expr>) {
    (Box::new(left), Box::new(right))
}

/// Resolve an arithmetic combination of two typed operands
///
/// Addition with an instant is commutative: `Interval + X` normalizes to the
/// same `*Add` node and operand order as `X + Interval`. Interval
/// subtraction lowers to addition of the negated right operand, keeping the
/// operation-node set closed.
pub fn arithmetic(op: ArithmeticOp, left: Expr, right: Expr) -> ExprResult<Expr> {
    use ArithmeticOp::{Add, Subtract};

    let (left_type, right_type) = (*left.data_type(), *right.data_type());
    match (left_type, right_type, op) {
        // timestamp <-> interval
        (DataType::Timestamp, DataType::Interval(_), Add) => {
            let (left, right) = binary(left, right);
            Ok(Expr::new(Op::TimestampAdd { left, right }, DataType::Timestamp))
        }
        (DataType::Interval(_), DataType::Timestamp, Add) => {
            let (right, left) = binary(left, right);
            Ok(Expr::new(Op::TimestampAdd { left, right }, DataType::Timestamp))
        }
        (DataType::Timestamp, DataType::Interval(_), Subtract) => {
            let (left, right) = binary(left, right);
            Ok(Expr::new(
                Op::TimestampSubtract { left, right },
                DataType::Timestamp,
            ))
        }
        (DataType::Timestamp, DataType::Timestamp, Subtract) => {
            let (left, right) = binary(left, right);
            Ok(Expr::new(
                Op::TimestampSubtract { left, right },
                instant_difference_type(DataType::Timestamp),
            ))
        }

        // date <-> interval, day granularity or coarser only
        (DataType::Date, DataType::Interval(interval), Add) if date_compatible(interval.unit) => {
            let (left, right) = binary(left, right);
            Ok(Expr::new(Op::DateAdd { left, right }, DataType::Date))
        }
        (DataType::Interval(interval), DataType::Date, Add) if date_compatible(interval.unit) => {
            let (right, left) = binary(left, right);
            Ok(Expr::new(Op::DateAdd { left, right }, DataType::Date))
        }
        (DataType::Date, DataType::Interval(interval), Subtract)
            if date_compatible(interval.unit) =>
        {
            let (left, right) = binary(left, right);
            Ok(Expr::new(Op::DateSubtract { left, right }, DataType::Date))
        }
        (DataType::Date, DataType::Date, Subtract) => {
            let (left, right) = binary(left, right);
            Ok(Expr::new(
                Op::DateSubtract { left, right },
                instant_difference_type(DataType::Date),
            ))
        }

        // time <-> interval, any unit
        (DataType::Time, DataType::Interval(_), Add) => {
            let (left, right) = binary(left, right);
            Ok(Expr::new(Op::TimeAdd { left, right }, DataType::Time))
        }
        (DataType::Interval(_), DataType::Time, Add) => {
            let (right, left) = binary(left, right);
            Ok(Expr::new(Op::TimeAdd { left, right }, DataType::Time))
        }
        (DataType::Time, DataType::Interval(_), Subtract) => {
            let (left, right) = binary(left, right);
            Ok(Expr::new(Op::TimeSubtract { left, right }, DataType::Time))
        }
        (DataType::Time, DataType::Time, Subtract) => {
            let (left, right) = binary(left, right);
            Ok(Expr::new(
                Op::TimeSubtract { left, right },
                instant_difference_type(DataType::Time),
            ))
        }

        // interval <-> interval
        (DataType::Interval(a), DataType::Interval(b), Add) => {
            let unit = promote(a.unit, b.unit)
                .map_err(|_| ExprError::invalid_operation(op.symbol(), &left_type, &right_type))?;
            let value_type = IntType::widest(a.value_type, b.value_type);
            let (left, right) = binary(left, right);
            Ok(Expr::new(
                Op::IntervalAdd { left, right },
                DataType::Interval(IntervalType::new(unit, value_type)),
            ))
        }
        (DataType::Interval(a), DataType::Interval(b), Subtract) => {
            let unit = promote(a.unit, b.unit)
                .map_err(|_| ExprError::invalid_operation(op.symbol(), &left_type, &right_type))?;
            let value_type = IntType::widest(a.value_type, b.value_type);
            let (left, right) = binary(left, right.multiply(-1)?);
            Ok(Expr::new(
                Op::IntervalAdd { left, right },
                DataType::Interval(IntervalType::new(unit, value_type)),
            ))
        }

        (left_type, right_type, op) => Err(ExprError::invalid_operation(
            op.symbol(),
            &left_type,
            &right_type,
        )),
    }
}

/// Resolve a comparison of two typed operands
///
/// Legal for interval pairs whose units align under promotion and for
/// same-domain instant pairs; the result is always Boolean. Cross-domain
/// instant comparisons are rejected.
pub fn comparison(op: ComparisonOp, left: Expr, right: Expr) -> ExprResult<Expr> {
    let (left_type, right_type) = (*left.data_type(), *right.data_type());
    let legal = match (left_type, right_type) {
        (DataType::Interval(a), DataType::Interval(b)) => promote(a.unit, b.unit).is_ok(),
        (DataType::Date, DataType::Date)
        | (DataType::Time, DataType::Time)
        | (DataType::Timestamp, DataType::Timestamp) => true,
        _ => false,
    };
    if !legal {
        return Err(ExprError::invalid_operation(
            op.symbol(),
            &left_type,
            &right_type,
        ));
    }
    let (left, right) = binary(left, right);
    Ok(Expr::new(
        Op::Comparison { op, left, right },
        DataType::Boolean,
    ))
}
