/// Compile a literal pattern once and hand out a `&'static Regex`.
///
/// Used for the fixed patterns of the engine (bracket index suffixes, the
/// default `{`/`}` markers). Patterns built from user options are compiled in
/// `Delimiters::new` instead.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect("static pattern compiles"));
        &*RE
    }};
}
