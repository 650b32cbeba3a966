//! Execution loop
//!
//! Runs every test of a registry exactly once, suite by suite, in
//! declaration order. Each body runs inside its own unwind boundary: a fatal
//! assertion (or any other panic) ends that test as failed and the loop moves
//! on to the next one.

mod trap;

use std::time::{Duration, Instant};

use crate::assertions::TestContext;
use crate::common::{Error, Result};
use crate::registry::{Phase, Registry, TestCase, TestResult};
use crate::report::Reporter;

pub use trap::{install as install_hook, Abort, HookGuard};

/// Totals of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub tests: usize,
    pub suites: usize,
    pub failed_tests: usize,
    /// Failed assertions over the whole run, fatal ones included
    pub assertion_failures: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failed_tests == 0
    }
}

/// Marks the registry finished when dropped, unwinding included
struct FinishOnDrop<'a>(&'a mut Registry);

impl Drop for FinishOnDrop<'_> {
    fn drop(&mut self) {
        self.0.phase = Phase::Finished;
    }
}

/// Run every test in `registry`, reporting progress to `reporter`
///
/// A registry still in its registration phase is frozen first. A registry can
/// only be run once. If the reporter fails part way, the registry still ends
/// up finished and the tests that never ran keep the `Unknown` result.
pub fn run(registry: &mut Registry, reporter: &mut dyn Reporter) -> Result<RunSummary> {
    match registry.phase {
        Phase::Registration => registry.freeze(),
        Phase::Ready => {}
        Phase::Running => return Err(Error::RunInProgress),
        Phase::Finished => return Err(Error::AlreadyRun),
    }

    let started = Instant::now();
    registry.phase = Phase::Running;
    let finishing = FinishOnDrop(registry);
    let outcome = run_suites(&mut *finishing.0, reporter);
    drop(finishing);
    outcome?;

    reporter.on_run_end(registry)?;

    let summary = RunSummary {
        tests: registry.test_count(),
        suites: registry.suite_count(),
        failed_tests: registry.failed_count()?,
        assertion_failures: registry.assertion_failures()?,
        elapsed: started.elapsed(),
    };
    tracing::debug!(
        tests = summary.tests,
        failed = summary.failed_tests,
        assertion_failures = summary.assertion_failures,
        "run finished"
    );
    Ok(summary)
}

fn run_suites(registry: &mut Registry, reporter: &mut dyn Reporter) -> Result<()> {
    let _hook = trap::install();

    reporter.on_run_start(registry)?;
    for suite in registry.suites.iter_mut() {
        reporter.on_suite_start(suite)?;
        for test in suite.tests.iter_mut() {
            reporter.on_test_start(test)?;
            execute(test);
            reporter.on_test_end(test)?;
        }
        reporter.on_suite_end(suite)?;
    }
    Ok(())
}

/// Run one test body and fold its outcome into the record
fn execute(test: &mut TestCase) {
    let started = Instant::now();
    let entry = test.entry();
    let mut ctx = TestContext::new(test.suite_name(), test.test_name());

    match trap::run_guarded(|| entry(&mut ctx)) {
        Ok(()) => {}
        Err(Abort::Fatal) => {
            tracing::debug!(test = %test, "test aborted by fatal assertion");
            // Raised without going through an assertion
            if !ctx.has_failed() {
                ctx.mark_failed();
            }
        }
        Err(Abort::Panic(message)) => {
            tracing::debug!(test = %test, panic = ?message, "test panicked");
            ctx.mark_failed();
        }
    }

    let (result, failures) = ctx.into_parts();
    test.result = match result {
        TestResult::Unknown => TestResult::Passed,
        other => other,
    };
    test.assertion_failures = failures;
    test.elapsed = started.elapsed();
}
