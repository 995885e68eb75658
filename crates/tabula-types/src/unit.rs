//! Time unit registry
//!
//! Canonical ordering and conversion ratios for interval units:
//! - calendar units (`Y`, `M`) have no fixed duration and convert only to
//!   themselves
//! - fixed-duration units (`w`, `d`, `h`, `m`, `s`, `ms`, `us`, `ns`) form a
//!   total order related by exact integer ratios

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// A named granularity of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar year
    Year,
    /// Calendar month
    Month,
    /// Week (7 days)
    Week,
    /// Day
    Day,
    /// Hour
    Hour,
    /// Minute
    Minute,
    /// Second
    Second,
    /// Millisecond
    Millisecond,
    /// Microsecond
    Microsecond,
    /// Nanosecond
    Nanosecond,
}

/// Ratios between adjacent units of the fixed-duration chain (w..ns)
const ADJACENT_RATIOS: [i64; 7] = [7, 24, 60, 60, 1000, 1000, 1000];

/// Lookup table for unit codes and full names, built once at first use
static UNIT_NAMES: Lazy<HashMap<&'static str, TimeUnit>> = Lazy::new(|| {
    let mut names = HashMap::new();
    for unit in TimeUnit::ALL {
        names.insert(unit.code(), unit);
        names.insert(unit.name(), unit);
    }
    names
});

impl TimeUnit {
    /// Every unit, coarsest first
    pub const ALL: [TimeUnit; 10] = [
        Self::Year,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
        Self::Microsecond,
        Self::Nanosecond,
    ];

    /// The short code used in type rendering (e.g. `w`, `M`, `ms`)
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Year => "Y",
            Self::Month => "M",
            Self::Week => "w",
            Self::Day => "d",
            Self::Hour => "h",
            Self::Minute => "m",
            Self::Second => "s",
            Self::Millisecond => "ms",
            Self::Microsecond => "us",
            Self::Nanosecond => "ns",
        }
    }

    /// The full lowercase name (e.g. `week`, `millisecond`)
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
            Self::Nanosecond => "nanosecond",
        }
    }

    /// Check if this is a calendar unit (variable real-world duration)
    pub const fn is_calendar(&self) -> bool {
        matches!(self, Self::Year | Self::Month)
    }

    /// Position in the fixed-duration chain, coarsest first; None for
    /// calendar units
    const fn fixed_index(&self) -> Option<usize> {
        match self {
            Self::Year | Self::Month => None,
            Self::Week => Some(0),
            Self::Day => Some(1),
            Self::Hour => Some(2),
            Self::Minute => Some(3),
            Self::Second => Some(4),
            Self::Millisecond => Some(5),
            Self::Microsecond => Some(6),
            Self::Nanosecond => Some(7),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TimeUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UNIT_NAMES
            .get(s)
            .copied()
            .ok_or_else(|| UnitError::UnknownUnit(s.to_string()))
    }
}

/// Check if `a` is strictly finer than `b`
///
/// Defined only over the fixed-duration chain; false whenever either unit is
/// a calendar unit.
pub fn is_finer(a: TimeUnit, b: TimeUnit) -> bool {
    match (a.fixed_index(), b.fixed_index()) {
        (Some(ia), Some(ib)) => ia > ib,
        _ => false,
    }
}

/// Check if `a` is strictly coarser than `b`
pub fn is_coarser(a: TimeUnit, b: TimeUnit) -> bool {
    is_finer(b, a)
}

/// Cumulative conversion ratio between two fixed-duration units
///
/// The returned factor is direction-agnostic: converting coarser to finer
/// multiplies by it, converting finer to coarser requires exact division by
/// it. Same unit yields 1. Any pair that straddles the calendar boundary
/// (or mixes the two calendar units) fails with
/// [`UnitError::IncompatibleUnits`].
pub fn scale_factor(from: TimeUnit, to: TimeUnit) -> Result<i64, UnitError> {
    if from == to {
        return Ok(1);
    }
    match (from.fixed_index(), to.fixed_index()) {
        (Some(a), Some(b)) => {
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            Ok(ADJACENT_RATIOS[lo..hi].iter().product())
        }
        _ => Err(UnitError::IncompatibleUnits { from, to }),
    }
}

/// Result unit for combining two interval operands
///
/// Equal units keep their unit (calendar included). Two distinct
/// fixed-duration units promote to the finer one, favoring precision over
/// the coarser operand. Any other pairing involving a calendar unit is
/// rejected before promotion is attempted.
pub fn promote(a: TimeUnit, b: TimeUnit) -> Result<TimeUnit, UnitError> {
    if a == b {
        return Ok(a);
    }
    if a.fixed_index().is_some() && b.fixed_index().is_some() {
        Ok(if is_finer(a, b) { a } else { b })
    } else {
        Err(UnitError::IncompatibleUnits { from: a, to: b })
    }
}
