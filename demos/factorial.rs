//! Factorial tests, one of which is meant to fail
//!
//! Run with `cargo run --example factorial -- --xtest_color=yes`.

use xtest::{expect_eq, require_eq, suite, xtest};

/// `n!`, with `n! = 1` for every `n <= 0`
fn factorial(n: i64) -> i64 {
    (1..=n.max(1)).product()
}

suite!(TestFactorial);

xtest!(TestFactorial, WithNegativeNumbers, |ctx| {
    expect_eq!(ctx, factorial(i64::MIN), 1);
    expect_eq!(ctx, factorial(-1), 1);
});

xtest!(TestFactorial, WithPositiveNumbers, |ctx| {
    expect_eq!(ctx, factorial(0), 1);
    expect_eq!(ctx, factorial(10), 3_628_800);
});

xtest!(TestFactorial, WithInvalidExpectedResult, |ctx| {
    require_eq!(ctx, factorial(10), 36_288, "doomed to fail");
    expect_eq!(ctx, factorial(1), 1);
});

xtest::main!();
