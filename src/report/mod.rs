//! Console report
//!
//! The runner drives a [`Reporter`] through the run. [`PrettyReporter`]
//! prints the familiar bracketed progress lines and the final summary.

mod color;
mod format;

use std::io::{self, Write};

use crate::common::Result;
use crate::registry::{Registry, Suite, TestCase, TestResult};

pub use color::{paint, print_color_encoded, should_use_color, Color, ColorMode};
pub use format::{align, fill, Align, STATUS_WIDTH};

/// Receives run progress, one event at a time
///
/// Every method defaults to doing nothing.
pub trait Reporter {
    fn on_run_start(&mut self, _registry: &Registry) -> Result<()> {
        Ok(())
    }

    fn on_suite_start(&mut self, _suite: &Suite) -> Result<()> {
        Ok(())
    }

    fn on_test_start(&mut self, _test: &TestCase) -> Result<()> {
        Ok(())
    }

    fn on_test_end(&mut self, _test: &TestCase) -> Result<()> {
        Ok(())
    }

    fn on_suite_end(&mut self, _suite: &Suite) -> Result<()> {
        Ok(())
    }

    /// Called once the registry holds every outcome
    fn on_run_end(&mut self, _registry: &Registry) -> Result<()> {
        Ok(())
    }
}

/// Reporter that prints nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Progress and summary in the bracketed console layout
pub struct PrettyReporter<W: Write> {
    out: W,
    color: bool,
}

impl PrettyReporter<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> PrettyReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn status(&mut self, text: &str, color: Color) -> Result<()> {
        let boxed = format!("[{}]", text);
        write!(self.out, "{} ", paint(&boxed, color, self.color))?;
        Ok(())
    }

    fn rule(&mut self, fill_char: char) -> Result<()> {
        self.status(&fill(fill_char, STATUS_WIDTH), Color::Green)
    }

    fn print_failed_tests(&mut self, registry: &Registry) -> Result<()> {
        let failed = registry.failed_tests()?;
        let count = registry.failed_count()?;
        let failed_box = align("FAILED", STATUS_WIDTH, Align::Center);

        self.status(&failed_box, Color::Red)?;
        writeln!(self.out, "{} {}, listed below:", count, plural(count, "test", "tests"))?;
        for suite in &failed {
            for test in &suite.tests {
                self.status(&failed_box, Color::Red)?;
                writeln!(self.out, "{}", test)?;
            }
        }
        writeln!(self.out)?;
        writeln!(self.out, "{} FAILED {}", count, plural(count, "TEST", "TESTS"))?;
        Ok(())
    }
}

impl<W: Write> Reporter for PrettyReporter<W> {
    fn on_run_start(&mut self, registry: &Registry) -> Result<()> {
        self.rule('=')?;
        writeln!(
            self.out,
            "Running {} tests from {} test suites.",
            registry.test_count(),
            registry.suite_count()
        )?;
        self.rule('-')?;
        write!(self.out, "Global test environment set-up.")?;
        self.out.flush()?;
        Ok(())
    }

    fn on_suite_start(&mut self, suite: &Suite) -> Result<()> {
        writeln!(self.out)?;
        self.rule('-')?;
        writeln!(self.out, "{} tests from {}", suite.tests().len(), suite.name())?;
        self.out.flush()?;
        Ok(())
    }

    fn on_test_start(&mut self, test: &TestCase) -> Result<()> {
        self.status(&align("RUN", STATUS_WIDTH, Align::Left), Color::Green)?;
        writeln!(self.out, "{}", test)?;
        self.out.flush()?;
        Ok(())
    }

    fn on_test_end(&mut self, test: &TestCase) -> Result<()> {
        match test.result() {
            TestResult::Failed => self.status(&align("FAILED", STATUS_WIDTH, Align::Center), Color::Red)?,
            _ => self.status(&align("OK", STATUS_WIDTH, Align::Right), Color::Green)?,
        }
        writeln!(self.out, "{} ({} ms)", test, test.elapsed().as_millis())?;
        self.out.flush()?;
        Ok(())
    }

    fn on_suite_end(&mut self, suite: &Suite) -> Result<()> {
        self.rule('-')?;
        writeln!(
            self.out,
            "{} tests from {} ({} ms total)",
            suite.tests().len(),
            suite.name(),
            suite.elapsed().as_millis()
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn on_run_end(&mut self, registry: &Registry) -> Result<()> {
        writeln!(self.out)?;
        self.rule('-')?;
        writeln!(self.out, "Global test environment tear-down.")?;

        self.rule('=')?;
        writeln!(
            self.out,
            "Ran {} tests from {} test suites.",
            registry.test_count(),
            registry.suite_count()
        )?;

        let passed = registry.passed_count()?;
        self.status(&align("PASSED", STATUS_WIDTH, Align::Center), Color::Green)?;
        writeln!(self.out, "{} {}.", passed, plural(passed, "test", "tests"))?;

        if registry.failed_count()? > 0 {
            self.print_failed_tests(registry)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Print every test as `Suite.` followed by indented test names
pub fn list_tests<W: Write>(out: &mut W, registry: &Registry) -> Result<()> {
    for suite in registry.suites() {
        writeln!(out, "{}.", suite.name())?;
        for test in suite.tests() {
            writeln!(out, "  {}", test.test_name())?;
        }
    }
    out.flush()?;
    Ok(())
}
