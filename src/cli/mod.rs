//! Process-wide entry points
//!
//! `init` reads flags, config and logging settings once per process, then
//! closes the registration phase. `run_all_tests` runs the process-wide
//! registry with the console report and returns the failure count.

mod flags;

use std::io::{self, IsTerminal};
use std::sync::{OnceLock, TryLockError};

use crate::common::config::Config;
use crate::common::{logging, Error, Result};
use crate::registry::Registry;
use crate::report::{self, should_use_color, ColorMode, PrettyReporter};
use crate::runner;

pub use flags::{Flags, HELP};

/// Settings in effect for this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// List tests instead of running them
    pub list_tests: bool,
    /// Colour the console report
    pub color: bool,
}

impl Settings {
    /// Merge flags over config; flags win
    pub fn resolve(flags: &Flags, config: &Config, stdout_is_tty: bool, term: Option<&str>) -> Self {
        let mode: ColorMode = flags.color.unwrap_or(config.output.color);
        Self {
            list_tests: flags.list_tests.unwrap_or(false),
            color: should_use_color(mode, stdout_is_tty, term),
        }
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Initialize xtest from the process arguments
///
/// Must run before [`run_all_tests`]; later calls have no effect. With
/// `--xtest_help` the help text is printed and the process exits.
pub fn init() -> Result<()> {
    init_from(std::env::args())
}

/// Initialize xtest from an explicit argument list, program name first
pub fn init_from<I>(args: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    if SETTINGS.get().is_some() {
        return Ok(());
    }

    let flags = flags::parse(args)?;

    let loaded = Config::load();
    let filter = match &loaded {
        Ok(config) => config.log.filter.as_str(),
        Err(_) => "xtest=warn",
    };
    logging::init(filter);
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring config file");
        Config::default()
    });

    let term = std::env::var("TERM").ok();
    let settings = Settings::resolve(&flags, &config, io::stdout().is_terminal(), term.as_deref());
    colored::control::set_override(settings.color);

    if flags.help {
        report::print_color_encoded(&mut io::stdout(), HELP, settings.color)?;
        std::process::exit(0);
    }

    // Closes the registration phase.
    Registry::global();

    if SETTINGS.set(settings).is_err() {
        tracing::debug!("xtest initialized concurrently, keeping first settings");
    }
    tracing::debug!(?settings, "xtest initialized");
    Ok(())
}

/// Run every registered test and print the report
///
/// Returns the number of failed assertions, counting a test that panicked as
/// one failure. Zero means every test passed. Listing tests with
/// `--xtest_list_tests` returns zero.
pub fn run_all_tests() -> u64 {
    if SETTINGS.get().is_none() {
        if let Err(e) = init() {
            tracing::error!(error = %e, "xtest initialization failed");
            eprintln!("Error: {}", e);
            return 1;
        }
    }
    let settings = SETTINGS.get().copied().unwrap_or(Settings {
        list_tests: false,
        color: false,
    });

    match run_global(settings) {
        Ok(failures) => failures,
        Err(e) => {
            tracing::error!(error = %e, "test run failed");
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn run_global(settings: Settings) -> Result<u64> {
    let mut registry = match Registry::global().try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::WouldBlock) => return Err(Error::RunInProgress),
        // A poisoned lock only means an earlier holder panicked; the data is intact.
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
    };

    if settings.list_tests {
        report::list_tests(&mut io::stdout(), &registry)?;
        return Ok(0);
    }

    let mut reporter = PrettyReporter::stdout(settings.color);
    let summary = runner::run(&mut registry, &mut reporter)?;
    Ok(summary.assertion_failures)
}

/// Turn a failure count into a process exit status
pub fn exit_code(failures: u64) -> i32 {
    failures.min(255) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_saturates() {
        assert_eq!(exit_code(0), 0);
        assert_eq!(exit_code(3), 3);
        assert_eq!(exit_code(255), 255);
        assert_eq!(exit_code(256), 255);
        assert_eq!(exit_code(u64::MAX), 255);
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::parse("[output]\ncolor = \"no\"\n").unwrap();
        let flags = flags::parse(["prog", "--xtest_color=yes"]).unwrap();
        let settings = Settings::resolve(&flags, &config, false, None);
        assert!(settings.color);
        assert!(!settings.list_tests);
    }

    #[test]
    fn test_config_applies_without_flags() {
        let config = Config::parse("[output]\ncolor = \"yes\"\n").unwrap();
        let flags = flags::parse(["prog"]).unwrap();
        assert!(Settings::resolve(&flags, &config, false, None).color);
    }

    #[test]
    fn test_auto_color_follows_terminal() {
        let config = Config::default();
        let flags = flags::parse(["prog", "--xtest_list_tests"]).unwrap();

        let settings = Settings::resolve(&flags, &config, true, Some("xterm"));
        assert!(settings.color);
        assert!(settings.list_tests);
        assert!(!Settings::resolve(&flags, &config, false, Some("xterm")).color);
    }
}
