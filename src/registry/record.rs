//! Test case records and their link-time descriptors

use std::fmt;
use std::time::Duration;

use crate::assertions::TestContext;

/// Entry point of a declared test
pub type TestFn = fn(&mut TestContext);

/// Outcome of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestResult {
    /// Not run yet
    #[default]
    Unknown,
    Passed,
    Failed,
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Unknown => write!(f, "UNKNOWN"),
            TestResult::Passed => write!(f, "PASSED"),
            TestResult::Failed => write!(f, "FAILED"),
        }
    }
}

/// A test declaration as submitted by the `xtest!` macro
///
/// Descriptors are plain constants collected at link time; the registry
/// turns each one into a [`TestCase`] during the registration phase.
#[derive(Debug, Clone, Copy)]
pub struct TestDescriptor {
    pub suite: &'static str,
    pub name: &'static str,
    pub entry: TestFn,
    pub file: &'static str,
    pub line: u32,
}

impl TestDescriptor {
    pub const fn new(
        suite: &'static str,
        name: &'static str,
        entry: TestFn,
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            suite,
            name,
            entry,
            file,
            line,
        }
    }
}

inventory::collect!(TestDescriptor);

/// Position of a record inside a [`Registry`](super::Registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestId {
    pub(crate) suite: usize,
    pub(crate) test: usize,
}

/// One registered test and its last known outcome
#[derive(Debug)]
pub struct TestCase {
    pub(crate) descriptor: TestDescriptor,
    pub(crate) result: TestResult,
    pub(crate) elapsed: Duration,
    pub(crate) assertion_failures: u64,
}

impl TestCase {
    pub(crate) fn new(descriptor: TestDescriptor) -> Self {
        Self {
            descriptor,
            result: TestResult::Unknown,
            elapsed: Duration::ZERO,
            assertion_failures: 0,
        }
    }

    pub fn suite_name(&self) -> &'static str {
        self.descriptor.suite
    }

    pub fn test_name(&self) -> &'static str {
        self.descriptor.name
    }

    /// The entry point this record was declared with
    pub fn entry(&self) -> TestFn {
        self.descriptor.entry
    }

    /// Source file of the declaration
    pub fn file(&self) -> &'static str {
        self.descriptor.file
    }

    /// Source line of the declaration
    pub fn line(&self) -> u32 {
        self.descriptor.line
    }

    pub fn result(&self) -> TestResult {
        self.result
    }

    /// Wall time the last run of this test took
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of failed assertions observed while running this test
    pub fn assertion_failures(&self) -> u64 {
        self.assertion_failures
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.descriptor.suite, self.descriptor.name)
    }
}
