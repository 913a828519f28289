// ANSI SGR codes used across help text and command output.
pub const CMD: &str = "36";
pub const OPT: &str = "33";
pub const ARG: &str = "2";
pub const HEADING: &str = "1";
pub const DIM: &str = "2";
pub const SUCCESS: &str = "32";
pub const WARN: &str = "33";
pub const URL: &str = "4;36";
pub const LABEL: &str = "1;35";

/// Returns a wrapper that colors text when `enabled`, and passes it through
/// untouched otherwise.
pub fn color_func(enabled: bool) -> impl Fn(&str, &str) -> String {
    move |code: &str, text: &str| {
        if enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_passes_through() {
        let c = color_func(false);
        assert_eq!(c(CMD, "emolink"), "emolink");
    }

    #[test]
    fn enabled_wraps() {
        let c = color_func(true);
        assert_eq!(c(SUCCESS, "ok"), "\x1b[32mok\x1b[0m");
    }
}
