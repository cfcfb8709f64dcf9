//! Terminal presentation: ANSI colours, rules and status lines.

use std::io::{self, Write};

pub const BLUE: &str = "\x1b[94m";
pub const CYAN: &str = "\x1b[96m";
pub const GREEN: &str = "\x1b[92m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
pub const BOLD: &str = "\x1b[1m";
pub const END: &str = "\x1b[0m";

/// Width of rules and banners.
pub const WIDTH: usize = 70;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Horizontal line of `ch` in `color`.
pub fn rule(w: &mut impl Write, ch: char, color: &str) -> io::Result<()> {
    writeln!(w, "{color}{}{END}", ch.to_string().repeat(WIDTH))
}

/// Clear the screen and print a boxed title.
pub fn header(w: &mut impl Write, title: &str) -> io::Result<()> {
    write!(w, "{CLEAR_SCREEN}")?;
    writeln!(w)?;
    rule(w, '═', CYAN)?;
    writeln!(w, "{BOLD}{BLUE}{title:^WIDTH$}{END}")?;
    rule(w, '═', CYAN)?;
    writeln!(w)
}

pub fn success(w: &mut impl Write, msg: &str) -> io::Result<()> {
    writeln!(w, "{GREEN}✓ {msg}{END}")
}

pub fn error(w: &mut impl Write, msg: &str) -> io::Result<()> {
    writeln!(w, "{RED}✗ {msg}{END}")
}

pub fn info(w: &mut impl Write, msg: &str) -> io::Result<()> {
    writeln!(w, "{CYAN}ℹ {msg}{END}")
}

pub fn warning(w: &mut impl Write, msg: &str) -> io::Result<()> {
    writeln!(w, "{YELLOW}⚠ {msg}{END}")
}

/// Print `text` without a newline and flush so it shows before input is read.
pub fn prompt(w: &mut impl Write, text: &str) -> io::Result<()> {
    write!(w, "{text}")?;
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn rule_has_fixed_width() {
        let out = capture(|w| rule(w, '─', CYAN));
        assert_eq!(out.matches('─').count(), WIDTH);
        assert!(out.ends_with(&format!("{END}\n")));
    }

    #[test]
    fn status_lines_carry_symbol_and_colour() {
        assert_eq!(
            capture(|w| success(w, "done")),
            format!("{GREEN}✓ done{END}\n")
        );
        assert_eq!(
            capture(|w| error(w, "boom")),
            format!("{RED}✗ boom{END}\n")
        );
        assert!(capture(|w| warning(w, "careful")).contains("⚠ careful"));
        assert!(capture(|w| info(w, "fyi")).contains("ℹ fyi"));
    }

    #[test]
    fn header_centres_title() {
        let out = capture(|w| header(w, "TITLE"));
        assert!(out.starts_with(CLEAR_SCREEN));
        assert!(out.contains("TITLE"));
        assert_eq!(out.matches('═').count(), WIDTH * 2);
    }
}
