//! Result aggregation over a registry
//!
//! Counts are computed on first use and memoized. Structural counts (tests,
//! suites) are cached once the registry is frozen. Outcome counts are only
//! available after the run finished: asking earlier yields
//! [`Error::NotYetRun`] rather than a partial number.

use std::cell::OnceCell;

use crate::common::{Error, Result};
use crate::registry::{Phase, Registry, TestCase, TestResult};

/// Memoized counters, owned by the registry
#[derive(Debug, Default)]
pub(crate) struct Tally {
    tests: OnceCell<usize>,
    suites: OnceCell<usize>,
    failed: OnceCell<usize>,
}

/// Failed tests of one suite, in run order
#[derive(Debug)]
pub struct FailedSuite<'a> {
    pub name: &'static str,
    pub tests: Vec<&'a TestCase>,
}

impl Registry {
    /// Total number of registered tests
    pub fn test_count(&self) -> usize {
        let count = || self.suites.iter().map(|s| s.tests.len()).sum::<usize>();
        if self.phase == Phase::Registration {
            return count();
        }
        *self.tally.tests.get_or_init(count)
    }

    /// Number of distinct suites
    pub fn suite_count(&self) -> usize {
        if self.phase == Phase::Registration {
            return self.suites.len();
        }
        *self.tally.suites.get_or_init(|| self.suites.len())
    }

    /// Failed tests grouped by suite; suites without failures are left out
    pub fn failed_tests(&self) -> Result<Vec<FailedSuite<'_>>> {
        self.ensure_finished()?;
        Ok(self
            .suites
            .iter()
            .filter_map(|suite| {
                let tests: Vec<&TestCase> = suite
                    .tests
                    .iter()
                    .filter(|t| t.result == TestResult::Failed)
                    .collect();
                (!tests.is_empty()).then_some(FailedSuite {
                    name: suite.name,
                    tests,
                })
            })
            .collect())
    }

    /// Number of failed tests
    pub fn failed_count(&self) -> Result<usize> {
        self.ensure_finished()?;
        Ok(*self.tally.failed.get_or_init(|| {
            self.tests().filter(|t| t.result == TestResult::Failed).count()
        }))
    }

    /// Number of tests that ran and passed
    pub fn passed_count(&self) -> Result<usize> {
        Ok(self.test_count() - self.failed_count()?)
    }

    /// Sum of failed assertions over every test
    pub fn assertion_failures(&self) -> Result<u64> {
        self.ensure_finished()?;
        Ok(self.tests().map(TestCase::assertion_failures).sum())
    }

    fn ensure_finished(&self) -> Result<()> {
        match self.phase {
            Phase::Finished => Ok(()),
            _ => Err(Error::NotYetRun),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestContext;

    fn noop(_ctx: &mut TestContext) {}

    fn finished(results: &[(&'static str, &'static str, TestResult)]) -> Registry {
        let mut registry = Registry::new();
        for (suite, name, result) in results {
            let id = registry.register(suite, name, noop).unwrap();
            registry.suites[id.suite].tests[id.test].result = *result;
        }
        registry.phase = Phase::Finished;
        registry
    }

    #[test]
    fn test_structural_counts() {
        let registry = finished(&[
            ("A", "one", TestResult::Passed),
            ("A", "two", TestResult::Passed),
            ("B", "one", TestResult::Failed),
        ]);
        assert_eq!(registry.test_count(), 3);
        assert_eq!(registry.suite_count(), 2);
    }

    #[test]
    fn test_counts_track_registration_until_frozen() {
        let mut registry = Registry::new();
        registry.register("A", "one", noop).unwrap();
        assert_eq!(registry.test_count(), 1);
        registry.register("B", "one", noop).unwrap();
        assert_eq!(registry.test_count(), 2);
        assert_eq!(registry.suite_count(), 2);
    }

    #[test]
    fn test_outcomes_unavailable_before_run() {
        let mut registry = Registry::new();
        registry.register("A", "one", noop).unwrap();
        registry.freeze();

        assert!(matches!(registry.failed_count(), Err(Error::NotYetRun)));
        assert!(matches!(registry.failed_tests(), Err(Error::NotYetRun)));
        assert!(matches!(registry.passed_count(), Err(Error::NotYetRun)));
    }

    #[test]
    fn test_failed_listing_groups_by_suite() {
        let registry = finished(&[
            ("A", "one", TestResult::Passed),
            ("B", "one", TestResult::Failed),
            ("C", "one", TestResult::Failed),
            ("B", "two", TestResult::Failed),
        ]);

        let failed = registry.failed_tests().unwrap();
        let listing: Vec<(&str, Vec<&str>)> = failed
            .iter()
            .map(|s| (s.name, s.tests.iter().map(|t| t.test_name()).collect()))
            .collect();
        assert_eq!(listing, [("B", vec!["one", "two"]), ("C", vec!["one"])]);
        assert_eq!(registry.failed_count().unwrap(), 3);
        assert_eq!(registry.passed_count().unwrap(), 1);
    }

    #[test]
    fn test_failed_count_is_memoized() {
        let mut registry = finished(&[("A", "one", TestResult::Failed)]);
        assert_eq!(registry.failed_count().unwrap(), 1);
        assert_eq!(registry.failed_count().unwrap(), 1);

        // Cached value survives later mutation
        registry.suites[0].tests[0].result = TestResult::Passed;
        assert_eq!(registry.failed_count().unwrap(), 1);
    }
}
