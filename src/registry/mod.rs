//! Suite registry
//!
//! Every `xtest!` declaration submits a [`TestDescriptor`] at link time. The
//! first access to [`Registry::global`] is the registration phase: it reads
//! all submissions, groups them by suite and freezes the result. Nothing can
//! be registered into a frozen registry, so the set of tests is fully known
//! before the first one executes.

mod macros;
mod record;

use std::sync::{Mutex, OnceLock};

use crate::aggregate::Tally;
use crate::common::{Error, Result};

pub use record::{TestCase, TestDescriptor, TestFn, TestId, TestResult};

/// Lifecycle of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Open for `register`
    Registration,
    /// Frozen, waiting for a run
    Ready,
    Running,
    Finished,
}

/// A named group of tests, in declaration order
#[derive(Debug)]
pub struct Suite {
    pub(crate) name: &'static str,
    pub(crate) tests: Vec<TestCase>,
}

impl Suite {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    /// Sum of the elapsed time of every test in the suite
    pub fn elapsed(&self) -> std::time::Duration {
        self.tests.iter().map(TestCase::elapsed).sum()
    }
}

/// Ordered mapping of suite name to the tests declared under it
#[derive(Debug)]
pub struct Registry {
    pub(crate) suites: Vec<Suite>,
    pub(crate) phase: Phase,
    pub(crate) tally: Tally,
}

static GLOBAL: OnceLock<Mutex<Registry>> = OnceLock::new();

impl Registry {
    /// Create an empty registry in the registration phase
    pub fn new() -> Self {
        Self {
            suites: Vec::new(),
            phase: Phase::Registration,
            tally: Tally::default(),
        }
    }

    /// Build a frozen registry from declarations
    ///
    /// Declarations are ordered by source file, then line, which is the order
    /// they appear in within one file.
    pub fn from_descriptors<'a, I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = &'a TestDescriptor>,
    {
        let mut descriptors: Vec<TestDescriptor> = descriptors.into_iter().copied().collect();
        descriptors.sort_by(|a, b| a.file.cmp(b.file).then(a.line.cmp(&b.line)));

        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.insert(descriptor);
        }
        registry.freeze();
        registry
    }

    /// The process-wide registry, built from every `xtest!` declaration
    ///
    /// The first call performs the registration phase. Test bodies must not
    /// lock it while a run is in progress.
    pub fn global() -> &'static Mutex<Registry> {
        GLOBAL.get_or_init(|| {
            let registry = Self::from_descriptors(inventory::iter::<TestDescriptor>);
            tracing::debug!(
                tests = registry.test_count(),
                suites = registry.suite_count(),
                "registration phase complete"
            );
            Mutex::new(registry)
        })
    }

    /// Register a test, creating its suite if needed
    ///
    /// The caller's source location is recorded as the declaration site.
    #[track_caller]
    pub fn register(&mut self, suite: &'static str, name: &'static str, entry: TestFn) -> Result<TestId> {
        let caller = std::panic::Location::caller();
        self.register_descriptor(TestDescriptor::new(
            suite,
            name,
            entry,
            caller.file(),
            caller.line(),
        ))
    }

    /// Register a fully described test
    pub fn register_descriptor(&mut self, descriptor: TestDescriptor) -> Result<TestId> {
        if self.phase != Phase::Registration {
            return Err(Error::RegistrationClosed);
        }
        Ok(self.insert(descriptor))
    }

    fn insert(&mut self, descriptor: TestDescriptor) -> TestId {
        let suite = match self.suites.iter().position(|s| s.name == descriptor.suite) {
            Some(index) => index,
            None => {
                self.suites.push(Suite {
                    name: descriptor.suite,
                    tests: Vec::new(),
                });
                self.suites.len() - 1
            }
        };

        tracing::debug!(
            suite = descriptor.suite,
            test = descriptor.name,
            file = descriptor.file,
            line = descriptor.line,
            "registered test"
        );

        let tests = &mut self.suites[suite].tests;
        tests.push(TestCase::new(descriptor));
        TestId {
            suite,
            test: tests.len() - 1,
        }
    }

    /// End the registration phase
    pub fn freeze(&mut self) {
        if self.phase == Phase::Registration {
            self.phase = Phase::Ready;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// All suites in order of first declaration
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    pub fn suite(&self, name: &str) -> Option<&Suite> {
        self.suites.iter().find(|s| s.name == name)
    }

    pub fn test(&self, id: TestId) -> Option<&TestCase> {
        self.suites.get(id.suite)?.tests.get(id.test)
    }

    /// Iterate over every test in run order
    pub fn tests(&self) -> impl Iterator<Item = &TestCase> {
        self.suites.iter().flat_map(|s| s.tests.iter())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_ctx: &mut crate::TestContext) {}
    fn other(_ctx: &mut crate::TestContext) {}

    #[test]
    fn test_register_groups_by_suite_in_declaration_order() {
        let mut registry = Registry::new();
        registry.register("Math", "adds", noop).unwrap();
        registry.register("Strings", "concat", noop).unwrap();
        registry.register("Math", "subtracts", other).unwrap();

        let names: Vec<_> = registry.suites().iter().map(Suite::name).collect();
        assert_eq!(names, ["Math", "Strings"]);

        let math: Vec<_> = registry.suite("Math").unwrap().tests().iter().map(TestCase::test_name).collect();
        assert_eq!(math, ["adds", "subtracts"]);
    }

    #[test]
    fn test_register_returns_handle_to_record() {
        let mut registry = Registry::new();
        let id = registry.register("Math", "adds", noop).unwrap();

        let test = registry.test(id).unwrap();
        assert_eq!(test.suite_name(), "Math");
        assert_eq!(test.test_name(), "adds");
        assert_eq!(test.entry() as usize, noop as TestFn as usize);
        assert_eq!(test.result(), TestResult::Unknown);
        assert!(test.file().ends_with("mod.rs"));
    }

    #[test]
    fn test_same_pair_registers_twice() {
        let mut registry = Registry::new();
        let first = registry.register("Math", "adds", noop).unwrap();
        let second = registry.register("Math", "adds", other).unwrap();

        assert_ne!(first, second);
        assert_eq!(registry.suite_count(), 1);
        assert_eq!(registry.suite("Math").unwrap().tests().len(), 2);
    }

    #[test]
    fn test_no_suite_is_ever_empty() {
        let mut registry = Registry::new();
        assert!(registry.suites().is_empty());

        registry.register("A", "one", noop).unwrap();
        registry.register("B", "one", noop).unwrap();
        assert!(registry.suites().iter().all(|s| !s.tests().is_empty()));
    }

    #[test]
    fn test_frozen_registry_rejects_registration() {
        let mut registry = Registry::new();
        registry.register("Math", "adds", noop).unwrap();
        registry.freeze();

        assert_eq!(registry.phase(), Phase::Ready);
        let err = registry.register("Math", "late", noop).unwrap_err();
        assert!(matches!(err, Error::RegistrationClosed));
        assert_eq!(registry.test_count(), 1);
    }

    #[test]
    fn test_from_descriptors_orders_by_declaration_site() {
        let descriptors = [
            TestDescriptor::new("B", "late", noop, "tests/b.rs", 40),
            TestDescriptor::new("A", "second", noop, "tests/a.rs", 20),
            TestDescriptor::new("B", "early", noop, "tests/b.rs", 10),
            TestDescriptor::new("A", "first", noop, "tests/a.rs", 5),
        ];
        let registry = Registry::from_descriptors(&descriptors);

        assert_eq!(registry.phase(), Phase::Ready);
        let order: Vec<_> = registry.tests().map(|t| t.to_string()).collect();
        assert_eq!(order, ["A.first", "A.second", "B.early", "B.late"]);
    }

    #[test]
    fn test_suites_merge_across_files() {
        let descriptors = [
            TestDescriptor::new("Shared", "x", noop, "tests/one.rs", 1),
            TestDescriptor::new("Shared", "x", other, "tests/two.rs", 1),
        ];
        let registry = Registry::from_descriptors(&descriptors);

        let shared = registry.suite("Shared").unwrap();
        assert_eq!(shared.tests().len(), 2);
        assert_eq!(shared.tests()[0].file(), "tests/one.rs");
        assert_eq!(shared.tests()[1].file(), "tests/two.rs");
    }
}
