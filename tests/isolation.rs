//! A full run of the process-wide registry through `run_all_tests`

use xtest::{add_failure, expect_eq, expect_lt, expect_true, fail, require_eq, suite, xtest};
use xtest::{Error, Phase, Registry, TestResult};

suite!(Isolation);
suite!(Accumulation);

xtest!(Isolation, FatalFirst, |ctx| {
    require_eq!(ctx, 1, 2, "stops here");
    add_failure!(ctx, "unreachable");
});

xtest!(Isolation, RunsAfterFatal, |ctx| {
    expect_true!(ctx, true);
});

xtest!(Isolation, Panics, |_ctx| {
    let _port: u16 = "not a port".parse().unwrap();
});

xtest!(Isolation, ExplicitFail, |ctx| {
    fail!(ctx, "given up");
});

xtest!(Accumulation, ThreeNonFatal, |ctx| {
    expect_eq!(ctx, "left", "right");
    expect_lt!(ctx, 10, 1);
    add_failure!(ctx);
});

fn result_of(registry: &Registry, suite: &str, name: &str) -> TestResult {
    registry
        .suite(suite)
        .and_then(|s| s.tests().iter().find(|t| t.test_name() == name))
        .map(|t| t.result())
        .unwrap()
}

#[test]
fn test_failures_stay_inside_their_test() {
    let failures = xtest::run_all_tests();
    // 1 fatal, 1 panic, 1 fail!, 3 non-fatal
    assert_eq!(failures, 6);
    assert_eq!(xtest::exit_code(failures), 6);

    {
        let registry = Registry::global().lock().unwrap();
        assert_eq!(registry.phase(), Phase::Finished);
        assert_eq!(result_of(&registry, "Isolation", "FatalFirst"), TestResult::Failed);
        assert_eq!(result_of(&registry, "Isolation", "RunsAfterFatal"), TestResult::Passed);
        assert_eq!(result_of(&registry, "Isolation", "Panics"), TestResult::Failed);
        assert_eq!(result_of(&registry, "Isolation", "ExplicitFail"), TestResult::Failed);
        assert_eq!(result_of(&registry, "Accumulation", "ThreeNonFatal"), TestResult::Failed);

        assert_eq!(registry.failed_count().unwrap(), 4);
        assert_eq!(registry.failed_count().unwrap(), 4);
        assert_eq!(registry.passed_count().unwrap(), 1);

        let failed = registry.failed_tests().unwrap();
        let suites: Vec<&str> = failed.iter().map(|s| s.name).collect();
        assert_eq!(suites, ["Isolation", "Accumulation"]);
    }

    // Running twice is a harness error, reported as one failure
    assert_eq!(xtest::run_all_tests(), 1);
    let mut registry = Registry::global().lock().unwrap();
    let again = xtest::runner::run(&mut registry, &mut xtest::report::SilentReporter);
    assert!(matches!(again, Err(Error::AlreadyRun)));
}
