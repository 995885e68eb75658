//! Expression data types
//!
//! [`DataType`] is the closed set of types an expression node can resolve
//! to. Date, Time and Timestamp are unparametrized marker variants; the only
//! cross-domain interaction between them is the arithmetic defined by the
//! resolver. Interval is parametrized by a [`TimeUnit`] and an integer
//! storage type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::unit::TimeUnit;

/// Signed integer storage widths for interval magnitudes and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntType {
    Int8,
    Int16,
    Int32,
    Int64,
}

impl IntType {
    /// Lowercase type name as rendered in type displays
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
        }
    }

    /// Width in bits
    pub const fn bits(&self) -> u32 {
        match self {
            Self::Int8 => 8,
            Self::Int16 => 16,
            Self::Int32 => 32,
            Self::Int64 => 64,
        }
    }

    /// Narrowest signed type that holds `value`
    pub fn fitting(value: i64) -> Self {
        if i8::try_from(value).is_ok() {
            Self::Int8
        } else if i16::try_from(value).is_ok() {
            Self::Int16
        } else if i32::try_from(value).is_ok() {
            Self::Int32
        } else {
            Self::Int64
        }
    }

    /// The wider of two storage types
    pub fn widest(a: Self, b: Self) -> Self {
        a.max(b)
    }
}

impl fmt::Display for IntType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Interval value type: a signed count of `unit` stored as `value_type`
///
/// Two interval types are equal iff both fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalType {
    /// Granularity of the counted unit
    pub unit: TimeUnit,
    /// Integer representation of the magnitude
    pub value_type: IntType,
}

impl IntervalType {
    /// Create an interval type
    pub fn new(unit: TimeUnit, value_type: IntType) -> Self {
        Self { unit, value_type }
    }
}

impl fmt::Display for IntervalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interval<{}>(unit='{}')", self.value_type, self.unit.code())
    }
}

/// The complete set of expression data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Boolean, the result type of comparisons
    Boolean,
    /// Signed integer of the given width
    Integer(IntType),
    /// Days since epoch, no time-of-day component
    Date,
    /// Time of day
    Time,
    /// Instant: date and time of day
    Timestamp,
    /// Signed duration counted in a unit
    Interval(IntervalType),
}

impl DataType {
    /// Create an interval data type
    pub fn interval(unit: TimeUnit, value_type: IntType) -> Self {
        Self::Interval(IntervalType::new(unit, value_type))
    }

    /// Check if this is an integer type
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Check if this is an instant type (a point, not a duration)
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }

    /// Check if this is an interval type
    pub const fn is_interval(&self) -> bool {
        matches!(self, Self::Interval(_))
    }

    /// Get the interval type descriptor, if this is an interval
    pub const fn as_interval(&self) -> Option<&IntervalType> {
        match self {
            Self::Interval(interval) => Some(interval),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Integer(int_type) => write!(f, "{}", int_type),
            Self::Date => write!(f, "date"),
            Self::Time => write!(f, "time"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Interval(interval) => write!(f, "{}", interval),
        }
    }
}
