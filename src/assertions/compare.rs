//! Comparison helpers behind the assertion macros
//!
//! Each helper returns `Err` with a printable failure instead of touching the
//! test context, so the macros decide between recording and aborting.

use std::fmt::Debug;

use super::{AssertionFailure, Location};

/// Render an operand, adding its value when the source text differs
fn describe(expr: &str, value: &str) -> String {
    if expr == value {
        value.to_string()
    } else {
        format!("{}\nWhich is: {}", expr, value)
    }
}

pub fn check_bool(expr: &str, actual: bool, expected: bool, location: Location) -> Result<(), AssertionFailure> {
    if actual == expected {
        return Ok(());
    }
    Err(AssertionFailure::value(
        location,
        expr,
        actual.to_string(),
        expected.to_string(),
    ))
}

pub fn check_eq<L, R>(
    lhs_expr: &str,
    rhs_expr: &str,
    lhs: &L,
    rhs: &R,
    location: Location,
) -> Result<(), AssertionFailure>
where
    L: PartialEq<R> + Debug + ?Sized,
    R: Debug + ?Sized,
{
    if lhs == rhs {
        return Ok(());
    }
    Err(AssertionFailure::value(
        location,
        lhs_expr,
        format!("{:?}", lhs),
        describe(rhs_expr, &format!("{:?}", rhs)),
    ))
}

pub fn check_ne<L, R>(
    lhs_expr: &str,
    rhs_expr: &str,
    lhs: &L,
    rhs: &R,
    location: Location,
) -> Result<(), AssertionFailure>
where
    L: PartialEq<R> + Debug + ?Sized,
    R: Debug + ?Sized,
{
    if lhs != rhs {
        return Ok(());
    }
    Err(relational_failure("!=", lhs_expr, rhs_expr, lhs, rhs, location))
}

macro_rules! relational_check {
    ($name:ident, $op:tt) => {
        pub fn $name<L, R>(
            lhs_expr: &str,
            rhs_expr: &str,
            lhs: &L,
            rhs: &R,
            location: Location,
        ) -> Result<(), AssertionFailure>
        where
            L: PartialOrd<R> + Debug + ?Sized,
            R: Debug + ?Sized,
        {
            if lhs $op rhs {
                return Ok(());
            }
            Err(relational_failure(stringify!($op), lhs_expr, rhs_expr, lhs, rhs, location))
        }
    };
}

relational_check!(check_lt, <);
relational_check!(check_le, <=);
relational_check!(check_gt, >);
relational_check!(check_ge, >=);

fn relational_failure<L, R>(
    op: &str,
    lhs_expr: &str,
    rhs_expr: &str,
    lhs: &L,
    rhs: &R,
    location: Location,
) -> AssertionFailure
where
    L: Debug + ?Sized,
    R: Debug + ?Sized,
{
    AssertionFailure::value(
        location,
        lhs_expr,
        format!("{:?}", lhs),
        format!("{} {}", op, describe(rhs_expr, &format!("{:?}", rhs))),
    )
}

/// Unconditional failure for `add_failure!` and `fail!`
pub fn explicit_failure(location: Location) -> Result<(), AssertionFailure> {
    Err(AssertionFailure::explicit(location))
}
