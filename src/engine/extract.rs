//! Rule extraction: placeholder spans to `Rule`s.
//!
//! Inner placeholder syntax:
//!
//! ```text
//! key[:alternative][|modifier,modifier,...]
//!
//! "name:Anonymous|title,uppercase"
//!  ^^^^                            key
//!       ^^^^^^^^^                  alternative (stops at the next `|`)
//!                 ^^^^^^^^^^^^^^^  modifier names, split on `,`
//! ```
//!
//! The alternative starts at the first `:` wherever it sits, so
//! `{date|format:short}` has the alternative `short` and the modifier name
//! `format:short`. Separators at the very start of the inner content count,
//! leaving an empty key (`{:fallback}`).

use super::delimiters::Delimiters;
use crate::modifiers::ModifierRegistry;
use crate::{ModifierSlot, Range, Rule, RuleFlags};

/// Extract every placeholder of `template` in scan order.
pub fn extract_rules<'r>(template: &str, delimiters: &Delimiters, modifiers: &'r ModifierRegistry) -> Vec<Rule<'r>> {
    let rules: Vec<Rule<'r>> = delimiters
        .find_spans(template)
        .into_iter()
        .map(|found| {
            let span = &template[found.outer.start..found.outer.end];
            let inner = &template[found.inner.start..found.inner.end];
            build_rule(span, inner, found.outer, delimiters, modifiers)
        })
        .collect();

    tracing::trace!(count = rules.len(), "extracted placeholder rules");
    rules
}

fn build_rule<'r>(
    span: &str,
    inner: &str,
    range: Range,
    delimiters: &Delimiters,
    registry: &'r ModifierRegistry,
) -> Rule<'r> {
    let key_end = inner.find(|c: char| c == ':' || c == '|').unwrap_or(inner.len());
    let key = &inner[..key_end];
    let alternative = match inner.split_once(':') {
        Some((_, rest)) => rest.split_once('|').map_or(rest, |(alternative, _)| alternative),
        None => "",
    };
    let chain = inner.split_once('|').map(|(_, chain)| chain);

    let key = delimiters.strip(key);
    let alternative = delimiters.strip(alternative);
    let modifiers: Vec<ModifierSlot<'r>> = chain
        .map(|chain| {
            delimiters
                .strip(chain)
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| ModifierSlot { name: name.to_string(), modifier: registry.lookup(name) })
                .collect()
        })
        .unwrap_or_default();

    let mut flags = RuleFlags::empty();
    if !alternative.is_empty() {
        flags |= RuleFlags::ALTERNATIVE;
    }
    if !modifiers.is_empty() {
        flags |= RuleFlags::MODIFIERS;
    }
    if key.contains('.') || key.contains('[') {
        flags |= RuleFlags::PATH;
    }

    Rule { key, span: span.to_string(), range, alternative, modifiers, flags }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(template: &str) -> Vec<Rule<'static>> {
        static REGISTRY: once_cell::sync::Lazy<ModifierRegistry> =
            once_cell::sync::Lazy::new(ModifierRegistry::with_builtins);
        extract_rules(template, &Delimiters::default(), &REGISTRY)
    }

    fn names<'a>(rule: &'a Rule<'_>) -> Vec<&'a str> {
        rule.modifiers.iter().map(|slot| slot.name.as_str()).collect()
    }

    #[test]
    fn plain_key() {
        let rules = extract("Hi my name is {name}");
        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.key, "name");
        assert_eq!(rule.span, "{name}");
        assert_eq!((rule.range.start, rule.range.end), (14, 20));
        assert_eq!(rule.alternative, "");
        assert!(rule.modifiers.is_empty());
        assert_eq!(rule.flags, RuleFlags::empty());
    }

    #[test]
    fn key_alternative_and_modifiers() {
        let rules = extract("{name:Anonymous Person|title, UPPERCASE}");
        let rule = &rules[0];
        assert_eq!(rule.key, "name");
        assert_eq!(rule.alternative, "Anonymous Person");
        assert_eq!(names(rule), vec!["title", "UPPERCASE"]);
        assert!(rule.modifiers.iter().all(|slot| slot.modifier.is_some()));
        assert_eq!(rule.flags, RuleFlags::ALTERNATIVE | RuleFlags::MODIFIERS);
    }

    #[test]
    fn unknown_modifiers_are_kept_as_empty_slots() {
        let rules = extract("{name|noSuchMod,lowercase}");
        let rule = &rules[0];
        assert_eq!(names(rule), vec!["noSuchMod", "lowercase"]);
        assert!(rule.modifiers[0].modifier.is_none());
        assert_eq!(rule.unknown_modifiers(), vec!["noSuchMod".to_string()]);
    }

    #[test]
    fn colon_after_pipe_still_starts_alternative() {
        let rules = extract("{date|format:short} {when:soon|title:x}");
        let rule = &rules[0];
        assert_eq!(rule.key, "date");
        assert_eq!(rule.alternative, "short");
        assert_eq!(names(rule), vec!["format:short"]);
        assert_eq!(rule.flags, RuleFlags::ALTERNATIVE | RuleFlags::MODIFIERS);

        let rule = &rules[1];
        assert_eq!(rule.key, "when");
        assert_eq!(rule.alternative, "soon");
        assert_eq!(names(rule), vec!["title:x"]);
    }

    #[test]
    fn leading_separators_leave_empty_key() {
        let rules = extract("{:fallback} {|uppercase}");
        assert_eq!(rules[0].key, "");
        assert_eq!(rules[0].alternative, "fallback");
        assert_eq!(rules[1].key, "");
        assert_eq!(names(&rules[1]), vec!["uppercase"]);
    }

    #[test]
    fn empty_modifier_names_are_dropped() {
        let rules = extract("{name|}{other|,title,}");
        assert!(rules[0].modifiers.is_empty());
        assert!(!rules[0].flags.contains(RuleFlags::MODIFIERS));
        assert_eq!(names(&rules[1]), vec!["title"]);
    }

    #[test]
    fn path_keys_are_flagged() {
        let rules = extract("{user.name} {locations[0]} {plain}");
        assert!(rules[0].flags.contains(RuleFlags::PATH));
        assert!(rules[1].flags.contains(RuleFlags::PATH));
        assert!(!rules[2].flags.contains(RuleFlags::PATH));
    }

    #[test]
    fn nested_open_marker_is_stripped_from_key() {
        let rules = extract("{{name}");
        assert_eq!(rules[0].span, "{{name}");
        assert_eq!(rules[0].key, "name");
    }

    #[test]
    fn no_placeholders_yields_no_rules() {
        assert!(extract("nothing to see here").is_empty());
        assert!(extract("").is_empty());
    }
}
