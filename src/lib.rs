//! xtest - a self-registering unit-test runtime
//!
//! Tests are declared anywhere in a binary with [`xtest!`] and collected at
//! link time into a process-wide [`Registry`]. [`run_all_tests`] runs them
//! suite by suite; a failing `require_*!` assertion ends only the test it is
//! in, and the run carries on with the next one.
//!
//! ```ignore
//! use xtest::{expect_eq, require_true, suite, xtest};
//!
//! suite!(Math);
//!
//! xtest!(Math, adds, |ctx| {
//!     expect_eq!(ctx, 2 + 2, 4);
//!     require_true!(ctx, 1 < 2, "ordering is broken");
//! });
//!
//! xtest::main!();
//! ```

pub mod aggregate;
pub mod assertions;
pub mod cli;
pub mod common;
pub mod registry;
pub mod report;
pub mod runner;

pub use assertions::TestContext;
pub use cli::{exit_code, init, run_all_tests};
pub use common::{Error, Result};
pub use registry::{Phase, Registry, Suite, TestCase, TestDescriptor, TestFn, TestId, TestResult};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}

/// Define `main` for a test binary
///
/// Initializes xtest, runs every registered test and exits with the failure
/// count, capped at 255.
#[macro_export]
macro_rules! main {
    () => {
        fn main() {
            if let ::std::result::Result::Err(e) = $crate::init() {
                ::std::eprintln!("Error: {}", e);
                ::std::process::exit(1);
            }
            ::std::process::exit($crate::exit_code($crate::run_all_tests()));
        }
    };
}
