//! Key and path resolution against the data object.
//!
//! Paths are dot-separated segments; each segment is a member name optionally
//! followed by bracket indexes:
//!
//! ```text
//! "user.addresses[1].city"
//!   user        -> data["user"]
//!   addresses[1]-> ["addresses"] then [1]
//!   city        -> ["city"]
//! ```
//!
//! Resolution never fails loudly: any step that cannot be taken (missing
//! member, scalar in the middle of the path, index out of range) yields `None`.

use serde_json::Value;

/// Walk `path` through `data`.
///
/// Bracket indexes select array elements by position or object members by
/// name, so `a[0]` and `a["0"]`-style objects both resolve. A segment that is
/// not of the `name[..]` shape is used as a literal member name.
pub fn resolve_path<'d>(path: &str, data: &'d Value) -> Option<&'d Value> {
    let mut current = data;
    for segment in path.split('.') {
        current = resolve_segment(segment, current)?;
    }
    Some(current)
}

/// Direct member lookup for keys without `.` or `[`.
pub fn lookup_key<'d>(key: &str, data: &'d Value) -> Option<&'d Value> {
    step(data, key)
}

fn resolve_segment<'d>(segment: &str, current: &'d Value) -> Option<&'d Value> {
    let Some(caps) = regex!(r"^([^\[\]]*)((?:\[[^\[\]]*\])+)$").captures(segment) else {
        return step(current, segment);
    };

    let name = caps.get(1).map_or("", |m| m.as_str());
    let mut value = if name.is_empty() { current } else { step(current, name)? };

    let indexes = caps.get(2).map_or("", |m| m.as_str());
    for index in regex!(r"\[([^\[\]]*)\]").captures_iter(indexes) {
        let index = index.get(1).map_or("", |m| m.as_str());
        value = step(value, index)?;
    }
    Some(value)
}

fn step<'d>(value: &'d Value, key: &str) -> Option<&'d Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.trim().parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Whether a resolved value counts as present.
///
/// `null`, `false`, numeric zero and the empty string are treated as missing.
/// Arrays and objects are always present, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text used when a value replaces a placeholder.
///
/// Strings are inserted as is, `null` becomes empty and everything else is
/// written as compact JSON. Floats with no fractional part drop the `.0`
/// (`2.0` renders as `2`).
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64().filter(|f| n.is_f64() && is_safe_integer(*f)) {
            Some(f) => (f as i64).to_string(),
            None => n.to_string(),
        },
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Integral and within the range where every integer is an exact `f64`.
fn is_safe_integer(f: f64) -> bool {
    f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> Value {
        json!({
            "name": "dan",
            "locations": ["NY", "LA"],
            "user": { "addresses": [{ "city": "Oslo" }, { "city": "Bergen" }] },
            "grid": [[1, 2], [3, 4]],
            "lookup": { "0": "zero-key" },
            "dotted.key": "literal"
        })
    }

    #[test]
    fn resolves_nested_paths() {
        let data = data();
        assert_eq!(resolve_path("name", &data), Some(&json!("dan")));
        assert_eq!(resolve_path("locations[1]", &data), Some(&json!("LA")));
        assert_eq!(resolve_path("user.addresses[1].city", &data), Some(&json!("Bergen")));
        assert_eq!(resolve_path("grid[1][0]", &data), Some(&json!(3)));
        assert_eq!(resolve_path("lookup[0]", &data), Some(&json!("zero-key")));
    }

    #[test]
    fn bare_index_segment_indexes_current_value() {
        let data = json!(["first", "second"]);
        assert_eq!(resolve_path("[1]", &data), Some(&json!("second")));
    }

    #[test]
    fn invalid_access_yields_none() {
        let data = data();
        assert_eq!(resolve_path("missing", &data), None);
        assert_eq!(resolve_path("name.first", &data), None);
        assert_eq!(resolve_path("locations[9]", &data), None);
        assert_eq!(resolve_path("locations[x]", &data), None);
        assert_eq!(resolve_path("name[0]", &data), None);
        assert_eq!(resolve_path("user..addresses", &data), None);
        assert_eq!(resolve_path("locations[0", &data), None);
    }

    #[test]
    fn direct_lookup_does_not_split_on_dots() {
        let data = data();
        assert_eq!(lookup_key("dotted.key", &data), Some(&json!("literal")));
        assert_eq!(lookup_key("name", &json!("scalar")), None);
    }

    #[test]
    fn truthiness_matches_fallback_rules() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn renders_values_as_text() {
        assert_eq!(render_value(&json!("a b")), "a b");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!(2.0)), "2");
        assert_eq!(render_value(&json!(-3.0)), "-3");
        assert_eq!(render_value(&json!(1.5)), "1.5");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(null)), "");
        assert_eq!(render_value(&json!(["NY", 1])), r#"["NY",1]"#);
    }
}
