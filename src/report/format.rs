//! Fixed-width status boxes of the console report

/// Width of the text inside a status box such as `[  PASSED  ]`
pub const STATUS_WIDTH: usize = 10;

/// Where text sits inside a status box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A rule made of `width` copies of `fill`
pub fn fill(fill: char, width: usize) -> String {
    std::iter::repeat(fill).take(width).collect()
}

/// Pad `text` with spaces to `width`
///
/// Left and right alignment keep a fifth of the padding on the near side, so
/// `RUN` reads `" RUN      "` and `OK` reads `"       OK "`. Text that is
/// already wide enough is returned unchanged.
pub fn align(text: &str, width: usize, side: Align) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let padding = width - len;
    let leading = match side {
        Align::Left => padding / 5,
        Align::Center => padding / 2,
        Align::Right => padding - padding / 5,
    };
    format!("{}{}{}", fill(' ', leading), text, fill(' ', padding - leading))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill() {
        assert_eq!(fill('=', STATUS_WIDTH), "==========");
        assert_eq!(fill('-', 0), "");
    }

    #[test]
    fn test_status_words() {
        assert_eq!(align("RUN", STATUS_WIDTH, Align::Left), " RUN      ");
        assert_eq!(align("OK", STATUS_WIDTH, Align::Right), "       OK ");
        assert_eq!(align("PASSED", STATUS_WIDTH, Align::Center), "  PASSED  ");
        assert_eq!(align("FAILED", STATUS_WIDTH, Align::Center), "  FAILED  ");
    }

    #[test]
    fn test_odd_padding_leans_right_when_centred() {
        assert_eq!(align("ABC", 6, Align::Center), " ABC  ");
    }

    #[test]
    fn test_wide_text_is_untouched() {
        assert_eq!(align("OVERFLOWING", STATUS_WIDTH, Align::Center), "OVERFLOWING");
    }
}
