//! Colour selection and colour-encoded text

use std::convert::Infallible;
use std::io::Write;
use std::str::FromStr;

use colored::Colorize;
use serde::Deserialize;

use crate::common::Result;

/// Terminal types known to understand ANSI colours
const COLOR_TERMS: &[&str] = &[
    "xterm",
    "xterm-color",
    "xterm-256color",
    "screen",
    "screen-256color",
    "tmux",
    "tmux-256color",
    "rxvt-unicode",
    "rxvt-unicode-256color",
    "linux",
    "cygwin",
];

/// Value of `--xtest_color` and of `output.color` in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum ColorMode {
    Yes,
    No,
    /// Colour only when stdout is a colour-capable terminal
    #[default]
    Auto,
}

impl FromStr for ColorMode {
    type Err = Infallible;

    /// Never fails: anything not recognised as yes or auto means no.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mode = if s.eq_ignore_ascii_case("auto") {
            ColorMode::Auto
        } else if ["yes", "true", "t"].iter().any(|y| s.eq_ignore_ascii_case(y)) || s == "1" {
            ColorMode::Yes
        } else {
            ColorMode::No
        };
        Ok(mode)
    }
}

impl From<String> for ColorMode {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(mode) => mode,
            Err(never) => match never {},
        }
    }
}

/// Decide whether to colour the report
pub fn should_use_color(mode: ColorMode, stdout_is_tty: bool, term: Option<&str>) -> bool {
    match mode {
        ColorMode::Yes => true,
        ColorMode::No => false,
        ColorMode::Auto => stdout_is_tty && term.is_some_and(|t| COLOR_TERMS.contains(&t)),
    }
}

/// Foreground colours used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Default,
    Red,
    Green,
    Yellow,
}

/// Render `text` in `color`, or as-is when colouring is off
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    match color {
        Color::Default => text.to_string(),
        Color::Red => text.red().to_string(),
        Color::Green => text.green().to_string(),
        Color::Yellow => text.yellow().to_string(),
    }
}

/// Write text carrying inline colour codes
///
/// `@R`, `@G` and `@Y` switch to red, green and yellow, `@D` back to the
/// default colour, and `@@` writes a literal `@`. An unknown code is dropped.
pub fn print_color_encoded<W: Write>(out: &mut W, text: &str, enabled: bool) -> Result<()> {
    let mut color = Color::Default;
    let mut rest = text;
    while let Some(at) = rest.find('@') {
        write!(out, "{}", paint(&rest[..at], color, enabled))?;
        let mut after = rest[at + 1..].chars();
        match after.next() {
            Some('@') => write!(out, "{}", paint("@", color, enabled))?,
            Some('D') => color = Color::Default,
            Some('R') => color = Color::Red,
            Some('G') => color = Color::Green,
            Some('Y') => color = Color::Yellow,
            _ => {}
        }
        rest = after.as_str();
    }
    write!(out, "{}", paint(rest, color, enabled))?;
    out.flush()?;
    Ok(())
}
