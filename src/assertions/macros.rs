//! Assertion macros
//!
//! `expect_*!` record a failure and let the test continue; `require_*!`
//! record it and abort the test. All of them take the test context first and
//! accept an optional trailing format message.

#[doc(hidden)]
#[macro_export]
macro_rules! __xtest_message {
    () => {
        ::std::option::Option::None
    };
    ($($arg:tt)+) => {
        ::std::option::Option::Some(::std::format!($($arg)+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __xtest_location {
    () => {
        $crate::assertions::Location::new(::std::file!(), ::std::line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __xtest_conclude {
    ($ctx:expr, $severity:ident, $outcome:expr $(, $($arg:tt)+)?) => {{
        let outcome = $outcome;
        let message = if outcome.is_ok() {
            ::std::option::Option::None
        } else {
            $crate::__xtest_message!($($($arg)+)?)
        };
        $crate::assertions::conclude(
            $ctx,
            outcome,
            $crate::assertions::Severity::$severity,
            message,
        )
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __xtest_bool {
    ($severity:ident, $expected:literal, $ctx:expr, $cond:expr $(, $($arg:tt)+)?) => {
        $crate::__xtest_conclude!(
            $ctx,
            $severity,
            $crate::assertions::check_bool(
                ::std::stringify!($cond),
                $cond,
                $expected,
                $crate::__xtest_location!(),
            )
            $(, $($arg)+)?
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __xtest_binary {
    ($severity:ident, $check:ident, $ctx:expr, $lhs:expr, $rhs:expr $(, $($arg:tt)+)?) => {
        $crate::__xtest_conclude!(
            $ctx,
            $severity,
            match (&$lhs, &$rhs) {
                (lhs, rhs) => $crate::assertions::$check(
                    ::std::stringify!($lhs),
                    ::std::stringify!($rhs),
                    lhs,
                    rhs,
                    $crate::__xtest_location!(),
                ),
            }
            $(, $($arg)+)?
        )
    };
}

/// Non-fatal check that a condition holds
///
/// ```ignore
/// xtest::expect_true!(ctx, is_prime(7));
/// xtest::expect_true!(ctx, is_prime(9), "9 = 3 * 3");
/// ```
#[macro_export]
macro_rules! expect_true {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_bool!(NonFatal, true, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! expect_false {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_bool!(NonFatal, false, $ctx, $($rest)+)
    };
}

/// Non-fatal equality check; `Actual` is the left operand
#[macro_export]
macro_rules! expect_eq {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(NonFatal, check_eq, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! expect_ne {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(NonFatal, check_ne, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! expect_lt {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(NonFatal, check_lt, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! expect_le {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(NonFatal, check_le, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! expect_gt {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(NonFatal, check_gt, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! expect_ge {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(NonFatal, check_ge, $ctx, $($rest)+)
    };
}

/// Record a failure without checking anything
#[macro_export]
macro_rules! add_failure {
    ($ctx:expr $(, $($arg:tt)+)?) => {
        $crate::__xtest_conclude!(
            $ctx,
            NonFatal,
            $crate::assertions::explicit_failure($crate::__xtest_location!())
            $(, $($arg)+)?
        )
    };
}

/// Fatal check that a condition holds
///
/// On failure the rest of the test body is skipped.
#[macro_export]
macro_rules! require_true {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_bool!(Fatal, true, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! require_false {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_bool!(Fatal, false, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! require_eq {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(Fatal, check_eq, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! require_ne {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(Fatal, check_ne, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! require_lt {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(Fatal, check_lt, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! require_le {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(Fatal, check_le, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! require_gt {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(Fatal, check_gt, $ctx, $($rest)+)
    };
}

#[macro_export]
macro_rules! require_ge {
    ($ctx:expr, $($rest:tt)+) => {
        $crate::__xtest_binary!(Fatal, check_ge, $ctx, $($rest)+)
    };
}

/// Abort the test unconditionally
#[macro_export]
macro_rules! fail {
    ($ctx:expr $(, $($arg:tt)+)?) => {
        $crate::__xtest_conclude!(
            $ctx,
            Fatal,
            $crate::assertions::explicit_failure($crate::__xtest_location!())
            $(, $($arg)+)?
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::{TestContext, TestResult};
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn test_expect_macros_continue_after_failure() {
        let mut ctx = TestContext::new("Macros", "expect");
        let ctx = &mut ctx;

        assert!(crate::expect_true!(ctx, 1 + 1 == 2));
        assert!(!crate::expect_false!(ctx, 1 + 1 == 2));
        assert!(!crate::expect_eq!(ctx, 2 + 2, 5, "math is {}", "hard"));
        assert!(crate::expect_ne!(ctx, 1, 2));
        assert!(crate::expect_lt!(ctx, 1, 2));
        assert!(crate::expect_le!(ctx, 2, 2));
        assert!(crate::expect_gt!(ctx, 3, 2));
        assert!(!crate::expect_ge!(ctx, 1, 2));
        assert!(!crate::add_failure!(ctx, "explicit"));

        assert_eq!(ctx.result(), TestResult::Failed);
        assert_eq!(ctx.failure_count(), 4);
    }

    #[test]
    fn test_condition_may_read_context() {
        let mut ctx = TestContext::new("Macros", "reads_ctx");
        let ctx = &mut ctx;

        crate::expect_eq!(ctx, ctx.failure_count(), 0);
        crate::expect_true!(ctx, ctx.test_name() == "reads_ctx", "in {}", ctx.suite_name());
        assert_eq!(ctx.result(), TestResult::Unknown);
    }

    #[test]
    fn test_require_macros_abort_on_failure() {
        let mut ctx = TestContext::new("Macros", "require");
        let mut reached_end = false;

        let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
            let ctx = &mut ctx;
            crate::require_eq!(ctx, 1, 1);
            crate::require_true!(ctx, false, "stop here");
            reached_end = true;
        }));

        assert!(unwound.is_err());
        assert!(!reached_end);
        assert_eq!(ctx.failure_count(), 1);
    }

    #[test]
    fn test_fail_aborts() {
        let mut ctx = TestContext::new("Macros", "fail");
        let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
            let ctx = &mut ctx;
            crate::fail!(ctx);
        }));

        assert!(unwound.is_err());
        assert!(ctx.has_failed());
    }
}
