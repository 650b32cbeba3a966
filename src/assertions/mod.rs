//! Assertions and the per-test execution context
//!
//! Every test body receives a `&mut TestContext` and every assertion macro
//! takes it as first argument. A failed assertion prints a diagnostic to
//! stderr and marks the context failed. The `expect_*!` family keeps going;
//! the `require_*!` family then unwinds with [`FatalFailure`], which the
//! runner catches at the test boundary.

mod compare;
mod macros;

use std::fmt;

use crate::registry::TestResult;

pub use compare::{check_bool, check_eq, check_ge, check_gt, check_le, check_lt, check_ne, explicit_failure};

/// Whether a failed assertion stops the current test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Record the failure and continue
    NonFatal,
    /// Record the failure and abort the test
    Fatal,
}

/// Unwind payload of a fatal assertion
///
/// Carries no data: the diagnostic has already been printed when this is
/// raised.
#[derive(Debug, Clone, Copy)]
pub struct FatalFailure;

/// Source position of an assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

/// What went wrong in a failed assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureDetail {
    /// A checked value did not match
    Value {
        /// Source text of the checked expression
        expr: String,
        actual: String,
        expected: String,
    },
    /// `add_failure!` or `fail!`
    Explicit,
}

/// A failed assertion, ready to be printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    pub location: Location,
    pub detail: FailureDetail,
    /// Extra text supplied by the test author
    pub message: Option<String>,
}

impl AssertionFailure {
    pub fn value(location: Location, expr: impl Into<String>, actual: String, expected: String) -> Self {
        Self {
            location,
            detail: FailureDetail::Value {
                expr: expr.into(),
                actual,
                expected,
            },
            message: None,
        }
    }

    pub fn explicit(location: Location) -> Self {
        Self {
            location,
            detail: FailureDetail::Explicit,
            message: None,
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): error: ", self.location.file, self.location.line)?;
        match &self.detail {
            FailureDetail::Value {
                expr,
                actual,
                expected,
            } => write!(f, "Value of: {}\n  Actual: {}\nExpected: {}", expr, actual, expected)?,
            FailureDetail::Explicit => write!(f, "Failed")?,
        }
        if let Some(message) = &self.message {
            write!(f, "\n{}", message)?;
        }
        Ok(())
    }
}

/// State of the test currently being executed
#[derive(Debug)]
pub struct TestContext {
    suite: &'static str,
    name: &'static str,
    result: TestResult,
    failures: u64,
}

impl TestContext {
    pub fn new(suite: &'static str, name: &'static str) -> Self {
        Self {
            suite,
            name,
            result: TestResult::Unknown,
            failures: 0,
        }
    }

    pub fn suite_name(&self) -> &'static str {
        self.suite
    }

    pub fn test_name(&self) -> &'static str {
        self.name
    }

    /// `Failed` once any assertion failed, `Unknown` otherwise
    pub fn result(&self) -> TestResult {
        self.result
    }

    pub fn has_failed(&self) -> bool {
        self.result == TestResult::Failed
    }

    /// Number of assertions that failed so far
    pub fn failure_count(&self) -> u64 {
        self.failures
    }

    /// Print a failure and mark the test failed
    pub fn record_failure(&mut self, failure: &AssertionFailure) {
        eprintln!("{}", failure);
        tracing::debug!(
            suite = self.suite,
            test = self.name,
            file = failure.location.file,
            line = failure.location.line,
            "assertion failed"
        );
        self.mark_failed();
    }

    /// Print a failure, mark the test failed and abort it
    pub fn abort_test(&mut self, failure: &AssertionFailure) -> ! {
        self.record_failure(failure);
        std::panic::panic_any(FatalFailure)
    }

    pub(crate) fn mark_failed(&mut self) {
        self.result = TestResult::Failed;
        self.failures += 1;
    }

    pub(crate) fn into_parts(self) -> (TestResult, u64) {
        (self.result, self.failures)
    }
}

/// Apply the outcome of a check to the running test
///
/// Returns `true` when the check passed. A fatal failure does not return.
pub fn conclude(
    ctx: &mut TestContext,
    outcome: Result<(), AssertionFailure>,
    severity: Severity,
    message: Option<String>,
) -> bool {
    let Err(mut failure) = outcome else {
        return true;
    };
    failure.message = message;
    match severity {
        Severity::NonFatal => {
            ctx.record_failure(&failure);
            false
        }
        Severity::Fatal => ctx.abort_test(&failure),
    }
}
