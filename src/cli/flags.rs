//! `--xtest_*` command-line flags
//!
//! A test binary shares its command line with the program under test, so
//! only arguments carrying the `xtest_` prefix are looked at. Both `-xtest_x`
//! and `--xtest_x` are accepted.

use clap::builder::BoolishValueParser;
use clap::Parser;

use crate::common::{Error, Result};
use crate::report::ColorMode;

const FLAG_PREFIX: &str = "xtest_";

/// Help text with inline colour codes (see `print_color_encoded`)
pub const HELP: &str = "\
This program contains tests written using xtest. You can use the
following command line flags to control its behaviour:

Test Selection:
  @G--xtest_list_tests@D
      List the names of all tests instead of running them. The name
      of xtest!(Foo, Bar, ..) is \"Foo.Bar\".

Test Output:
  @G--xtest_color=@Y(@Gyes@Y|@Gno@Y|@Gauto@Y)@D
      Enable/disable colored output. The default is @Gauto@D.

Others:
  @G--xtest_help@D
      Print this message.
";

/// Flags understood by every test binary
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(
    name = "xtest",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Flags {
    /// Print the help text and exit
    #[arg(long = "xtest_help")]
    pub help: bool,

    /// List tests instead of running them
    #[arg(
        long = "xtest_list_tests",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub list_tests: Option<bool>,

    /// Colour the report: yes, no or auto
    #[arg(long = "xtest_color", require_equals = true)]
    pub color: Option<ColorMode>,
}

/// Parse flags out of a full argument list, program name first
pub fn parse<I>(args: I) -> Result<Flags>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let ours = select(args);
    if !ours.is_empty() {
        tracing::debug!(flags = ?ours, "parsing xtest flags");
    }
    Flags::try_parse_from(ours).map_err(|e| Error::InvalidFlag(e.to_string().trim_end().to_string()))
}

/// Keep the `xtest_` flags, spelled with a double dash
fn select<I>(args: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    args.into_iter()
        .skip(1)
        .map(Into::into)
        .filter_map(|arg| {
            if arg.strip_prefix("--").is_some_and(|rest| rest.starts_with(FLAG_PREFIX)) {
                Some(arg)
            } else if arg.strip_prefix('-').is_some_and(|rest| rest.starts_with(FLAG_PREFIX)) {
                Some(format!("-{}", arg))
            } else {
                None
            }
        })
        .collect()
}
