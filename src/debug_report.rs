use interpolator::{ParseResultVerbose, Substitution, ValueSource};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    /// Wraps text in escape codes, or passes it through when color is off.
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        fn wrap(&self, code: &str, s: impl AsRef<str>) -> String {
            if !self.enabled {
                return s.as_ref().to_owned();
            }
            format!("{code}{}{RESET}", s.as_ref())
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            self.wrap(color, s)
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.wrap(BOLD, s)
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.wrap(DIM, s)
        }
    }
}

pub fn print_run(res: &ParseResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Template: \"{}\"", res.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Placeholders ━━━", ansi::GRAY));
    if res.details.substitutions.is_empty() {
        println!("{}", palette.dim("  No placeholders found"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • The template uses different delimiters (see --open/--close)");
        println!("  • A placeholder is empty or never closed");
    } else {
        for (idx, sub) in res.details.substitutions.iter().enumerate() {
            print_substitution(idx, sub, &palette);
        }
    }

    println!("\n{}", palette.paint("━━━ Output ━━━", ansi::GRAY));
    println!("  {}", palette.bold(palette.paint(&res.output, ansi::GREEN)));

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Extract: {}  │  Substitute: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.details.extract), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.substitute)),
    );
    println!();
}

fn print_substitution(idx: usize, sub: &Substitution, palette: &ansi::Palette) {
    let replacement = if sub.replacement.is_empty() {
        palette.dim("(removed)")
    } else {
        palette.bold(palette.paint(format!("\"{}\"", sub.replacement), ansi::GREEN))
    };
    println!(
        "  {} {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        palette.paint(&sub.span, ansi::CYAN),
        palette.dim("→"),
        replacement,
        palette.paint(format!("span {}..{}", sub.start, sub.end), ansi::YELLOW),
    );
    println!(
        "      {} {}  {} {}",
        palette.dim("key:"),
        palette.paint(format!("\"{}\"", sub.key), ansi::BLUE),
        palette.dim("│ source:"),
        palette.paint(source_name(sub.source), ansi::CYAN)
    );
    if !sub.unknown_modifiers.is_empty() {
        println!(
            "      {} {}",
            palette.paint("unknown modifiers:", ansi::YELLOW),
            sub.unknown_modifiers.join(", ")
        );
    }
    if sub.modifier_failed {
        println!("      {}", palette.paint("modifier failed; untransformed value used", ansi::RED));
    }
}

fn source_name(source: ValueSource) -> &'static str {
    match source {
        ValueSource::Alias => "alias",
        ValueSource::Data => "data",
        ValueSource::Alternative => "alternative",
        ValueSource::Key => "key",
        ValueSource::Removed => "removed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_only_emits_codes_when_enabled() {
        assert_eq!(ansi::Palette::new(false).paint("x", ansi::RED), "x");
        assert_eq!(ansi::Palette::new(true).dim("x"), "\x1b[2mx\x1b[0m");
    }

    #[test]
    fn sources_have_report_names() {
        assert_eq!(source_name(ValueSource::Removed), "removed");
        assert_eq!(source_name(ValueSource::Alias), "alias");
    }
}
