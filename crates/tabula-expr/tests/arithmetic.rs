//! Arithmetic and comparison resolution tests
//!
//! Covers:
//! - timestamp/date/time arithmetic with intervals, including commutative
//!   addition
//! - canonical result types for instant subtraction
//! - the Date x sub-day-interval rejection
//! - interval addition unit promotion
//! - comparison legality over intervals and instants

use pretty_assertions::assert_eq;
use rstest::rstest;
use tabula_expr::api::{
    column, date, day, hour, interval, minute, month, second, time, timestamp, to_interval, week,
    year,
};
use tabula_expr::{Expr, ExprError, Op};
use tabula_types::{DataType, IntType, TimeUnit};

fn int_column(name: &str) -> Expr {
    column(name, DataType::Integer(IntType::Int32))
}

fn interval_type_of(expr: &Expr) -> (TimeUnit, IntType) {
    let interval = expr.data_type().as_interval().expect("interval type");
    (interval.unit, interval.value_type)
}

// === Timestamp arithmetic ===

#[test]
fn test_timestamp_subtraction_fixes_unit() {
    let ts1 = timestamp("2015-01-02 18:00:00").unwrap();
    let ts2 = timestamp("2017-01-01 06:30:00").unwrap();

    for diff in [
        ts2.clone().sub(ts1.clone()).unwrap(),
        ts1.clone().sub(ts2.clone()).unwrap(),
    ] {
        assert_eq!(
            interval_type_of(&diff),
            (TimeUnit::Second, IntType::Int32)
        );
        assert!(matches!(diff.op(), Op::TimestampSubtract { .. }));
    }
}

#[test]
fn test_timestamp_interval_arithmetic() {
    let ts = timestamp("2015-01-02 18:00:00").unwrap();
    let shift = minute(30);

    let back = ts.clone().sub(shift.clone()).unwrap();
    assert_eq!(back.data_type(), &DataType::Timestamp);
    assert!(matches!(back.op(), Op::TimestampSubtract { .. }));

    for forward in [
        ts.clone().add(shift.clone()).unwrap(),
        shift.clone().add(ts.clone()).unwrap(),
    ] {
        assert_eq!(forward.data_type(), &DataType::Timestamp);
        assert!(matches!(forward.op(), Op::TimestampAdd { .. }));
    }
}

#[test]
fn test_commutative_add_normalizes_operand_order() {
    let ts = timestamp("2015-01-02 18:00:00").unwrap();
    let shift = minute(30);

    let forward = shift.clone().add(ts.clone()).unwrap();
    match forward.op() {
        Op::TimestampAdd { left, right } => {
            assert_eq!(left.as_ref(), &ts);
            assert_eq!(right.as_ref(), &shift);
        }
        other => panic!("expected TimestampAdd, got {}", other.kind_name()),
    }
}

#[rstest]
#[case(minute(30))]
#[case(month(1))]
fn test_interval_minus_timestamp_is_illegal(#[case] shift: Expr) {
    let ts = timestamp("2015-01-02 18:00:00").unwrap();
    assert!(matches!(
        shift.sub(ts).unwrap_err(),
        ExprError::InvalidOperation { .. }
    ));
}

#[test]
fn test_timestamp_plus_timestamp_is_illegal() {
    let ts1 = timestamp("2015-01-02 18:00:00").unwrap();
    let ts2 = timestamp("2017-01-01 06:30:00").unwrap();
    assert!(matches!(
        ts1.add(ts2).unwrap_err(),
        ExprError::InvalidOperation { .. }
    ));
}

// === Date arithmetic ===

#[test]
fn test_date_subtraction_fixes_unit() {
    let d1 = date("2015-01-02").unwrap();
    let d2 = date("2017-01-01").unwrap();

    for diff in [
        d1.clone().sub(d2.clone()).unwrap(),
        d2.clone().sub(d1.clone()).unwrap(),
    ] {
        assert_eq!(interval_type_of(&diff), (TimeUnit::Day, IntType::Int32));
        assert!(matches!(diff.op(), Op::DateSubtract { .. }));
    }
}

#[rstest]
#[case(year(4))]
#[case(month(3))]
#[case(week(3))]
#[case(day(1))]
fn test_date_interval_arithmetic(#[case] shift: Expr) {
    let d = date("2015-01-02").unwrap();

    let back = d.clone().sub(shift.clone()).unwrap();
    assert_eq!(back.data_type(), &DataType::Date);
    assert!(matches!(back.op(), Op::DateSubtract { .. }));

    for forward in [
        d.clone().add(shift.clone()).unwrap(),
        shift.clone().add(d.clone()).unwrap(),
    ] {
        assert_eq!(forward.data_type(), &DataType::Date);
        assert!(matches!(forward.op(), Op::DateAdd { .. }));
    }
}

#[rstest]
#[case(hour(1))]
#[case(minute(15))]
#[case(second(300))]
fn test_date_rejects_subday_intervals(#[case] shift: Expr) {
    // dates have no time-of-day component
    let d = date("2015-01-02").unwrap();
    assert!(matches!(
        d.clone().sub(shift.clone()).unwrap_err(),
        ExprError::InvalidOperation { .. }
    ));
    assert!(matches!(
        d.clone().add(shift.clone()).unwrap_err(),
        ExprError::InvalidOperation { .. }
    ));
    assert!(matches!(
        shift.add(d).unwrap_err(),
        ExprError::InvalidOperation { .. }
    ));
}

// === Time arithmetic ===

#[test]
fn test_time_subtraction_fixes_unit() {
    let t1 = time("18:00").unwrap();
    let t2 = time("19:12").unwrap();

    for diff in [
        t1.clone().sub(t2.clone()).unwrap(),
        t2.clone().sub(t1.clone()).unwrap(),
    ] {
        assert_eq!(interval_type_of(&diff), (TimeUnit::Second, IntType::Int32));
        assert!(matches!(diff.op(), Op::TimeSubtract { .. }));
    }
}

#[rstest]
#[case(minute(3))]
#[case(second(90))]
#[case(tabula_expr::api::nanosecond(5))]
fn test_time_accepts_any_interval_unit(#[case] shift: Expr) {
    let t = time("18:00").unwrap();

    let back = t.clone().sub(shift.clone()).unwrap();
    assert_eq!(back.data_type(), &DataType::Time);
    assert!(matches!(back.op(), Op::TimeSubtract { .. }));

    for forward in [
        t.clone().add(shift.clone()).unwrap(),
        shift.clone().add(t.clone()).unwrap(),
    ] {
        assert_eq!(forward.data_type(), &DataType::Time);
        assert!(matches!(forward.op(), Op::TimeAdd { .. }));
    }
}

// === Interval arithmetic ===

#[rstest]
#[case(day(1), day(3), TimeUnit::Day)]
#[case(second(1), hour(10), TimeUnit::Second)]
#[case(hour(3), day(2), TimeUnit::Hour)]
fn test_combine_with_different_kinds(#[case] a: Expr, #[case] b: Expr, #[case] unit: TimeUnit) {
    let sum = a.add(b).unwrap();
    assert_eq!(interval_type_of(&sum).0, unit);
    assert!(matches!(sum.op(), Op::IntervalAdd { .. }));
}

#[test]
fn test_interval_add_widens_storage() {
    let narrow = second(2);
    let wide = to_interval(int_column("c"), TimeUnit::Hour).unwrap();
    let sum = narrow.add(wide).unwrap();
    assert_eq!(interval_type_of(&sum), (TimeUnit::Second, IntType::Int32));
}

#[test]
fn test_compound_calendar_offsets_are_rejected() {
    // 1 month + 1 hour has no defined unit
    assert!(month(1).add(hour(1)).is_err());
    assert!(year(1).sub(day(1)).is_err());
    assert!(month(2).add(month(3)).is_ok());
}

#[test]
fn test_integer_operands_are_rejected() {
    let err = int_column("c").add(day(1)).unwrap_err();
    assert!(matches!(err, ExprError::InvalidOperation { .. }));
}

// === Comparisons ===

#[rstest]
#[case(interval(3, TimeUnit::Year), interval(2, TimeUnit::Year))]
#[case(interval(3, TimeUnit::Second), interval(3, TimeUnit::Second))]
#[case(second(30), hour(1))]
#[case(week(1), day(7))]
fn test_interval_comparisons(#[case] a: Expr, #[case] b: Expr) {
    for cmp in [
        a.clone().eq(b.clone()),
        a.clone().not_eq(b.clone()),
        a.clone().lt(b.clone()),
        a.clone().lt_eq(b.clone()),
        a.clone().gt(b.clone()),
        a.clone().gt_eq(b.clone()),
    ] {
        let cmp = cmp.unwrap();
        assert_eq!(cmp.data_type(), &DataType::Boolean);
        assert!(matches!(cmp.op(), Op::Comparison { .. }));
    }
}

#[test]
fn test_interval_column_comparisons() {
    let a = to_interval(int_column("c"), TimeUnit::Minute).unwrap();
    let b = interval(2, TimeUnit::Minute);
    assert_eq!(a.clone().gt_eq(b).unwrap().data_type(), &DataType::Boolean);

    let d = to_interval(int_column("d"), TimeUnit::Minute).unwrap();
    assert_eq!(a.lt(d).unwrap().data_type(), &DataType::Boolean);
}

#[test]
fn test_calendar_fixed_interval_comparison_is_illegal() {
    let err = month(1).lt(day(31)).unwrap_err();
    assert!(matches!(err, ExprError::InvalidOperation { .. }));
}

#[test]
fn test_instant_comparisons() {
    let d1 = date("2016-01-01").unwrap();
    let d2 = date("2016-02-02").unwrap();
    assert_eq!(d1.clone().lt(d2).unwrap().data_type(), &DataType::Boolean);

    let t1 = time("06:00").unwrap();
    let t2 = time("18:00").unwrap();
    assert_eq!(t1.not_eq(t2).unwrap().data_type(), &DataType::Boolean);

    let ts = timestamp("2016-01-01 00:00:00").unwrap();
    let err = d1.eq(ts).unwrap_err();
    assert!(matches!(err, ExprError::InvalidOperation { .. }));
}

#[rstest]
#[case(year(4))]
#[case(month(3))]
#[case(week(2))]
#[case(day(1))]
fn test_complex_date_comparisons(#[case] shift: Expr) {
    // a date shifted by an interval stays a date and compares against dates
    let a = date("2016-01-01").unwrap();
    let b = date("2016-02-02").unwrap();
    let date_col = column("j", DataType::Date);

    for shifted in [
        a.clone().sub(shift.clone()).unwrap(),
        a.clone().add(shift.clone()).unwrap(),
        shift.clone().add(a.clone()).unwrap(),
    ] {
        assert_eq!(shifted.data_type(), &DataType::Date);
        for cmp in [
            shifted.clone().eq(b.clone()),
            shifted.clone().gt_eq(b.clone()),
            shifted.clone().lt(date_col.clone()),
        ] {
            assert_eq!(cmp.unwrap().data_type(), &DataType::Boolean);
        }
    }
}

#[test]
fn test_column_date_arithmetic_comparisons() {
    let date_col = column("j", DataType::Date);
    let shift = to_interval(int_column("c"), TimeUnit::Week).unwrap();

    let shifted = date_col.clone().add(shift).unwrap();
    assert_eq!(shifted.data_type(), &DataType::Date);
    let cmp = shifted.lt_eq(date_col).unwrap();
    assert_eq!(cmp.data_type(), &DataType::Boolean);
}
