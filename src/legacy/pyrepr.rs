// src/legacy/pyrepr.rs

//! Python literal rendering
//!
//! Renders strings, lists and dicts the way Python's `repr()` and
//! `pprint.pformat()` print them, so generated `setup.py` files look like
//! hand-written ones and stay byte-stable across builds.

use std::collections::BTreeMap;

/// Line width used by `pformat`
const WIDTH: usize = 80;

/// A Python literal built from strings, lists and string-keyed dicts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PyValue {
    Str(String),
    List(Vec<PyValue>),
    /// Keys are kept sorted, matching `pformat`'s dict ordering
    Dict(BTreeMap<String, PyValue>),
}

impl PyValue {
    /// List of strings
    pub fn str_list<S: AsRef<str>>(items: &[S]) -> Self {
        Self::List(items.iter().map(|s| Self::Str(s.as_ref().to_string())).collect())
    }

    /// Dict mapping strings to lists of strings
    pub fn str_list_dict(map: &BTreeMap<String, Vec<String>>) -> Self {
        Self::Dict(
            map.iter()
                .map(|(k, v)| (k.clone(), Self::str_list(v)))
                .collect(),
        )
    }

    /// Single-line `repr()` of the value
    pub fn repr(&self) -> String {
        match self {
            Self::Str(s) => repr_str(s),
            Self::List(items) => {
                let inner: Vec<String> = items.iter().map(Self::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            Self::Dict(entries) => {
                let inner: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", repr_str(k), v.repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }

    /// Pretty-printed form, wrapping at 80 columns like `pprint.pformat()`
    pub fn pformat(&self) -> String {
        let mut out = String::new();
        format_value(self, &mut out, 0, 0);
        out
    }
}

/// `repr()` of a Python 3 string
///
/// Single quotes unless the text contains a single quote and no double
/// quote. Control characters are escaped; other characters pass through.
pub fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || (0x7f..0xa0).contains(&(c as u32)) => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Write `value` starting at column `indent`, reserving `allowance` columns
/// for whatever the caller appends after it on the last line
fn format_value(value: &PyValue, out: &mut String, indent: usize, allowance: usize) {
    let rep = value.repr();
    let max_width = WIDTH.saturating_sub(indent + allowance);
    if rep.chars().count() <= max_width {
        out.push_str(&rep);
        return;
    }

    match value {
        PyValue::Str(_) => out.push_str(&rep),
        PyValue::List(items) => {
            out.push('[');
            let indent = indent + 1;
            let last_index = items.len().saturating_sub(1);
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                    out.push_str(&" ".repeat(indent));
                }
                let item_allowance = if i == last_index { allowance + 1 } else { 1 };
                format_value(item, out, indent, item_allowance);
            }
            out.push(']');
        }
        PyValue::Dict(entries) => {
            out.push('{');
            let indent = indent + 1;
            let last_index = entries.len().saturating_sub(1);
            for (i, (key, item)) in entries.iter().enumerate() {
                let key_rep = repr_str(key);
                out.push_str(&key_rep);
                out.push_str(": ");
                let item_allowance = if i == last_index { allowance + 1 } else { 1 };
                format_value(item, out, indent + key_rep.chars().count() + 2, item_allowance);
                if i != last_index {
                    out.push_str(",\n");
                    out.push_str(&" ".repeat(indent));
                }
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repr_str_quoting() {
        assert_eq!(repr_str("foo"), "'foo'");
        assert_eq!(repr_str("it's"), "\"it's\"");
        assert_eq!(repr_str("both ' and \""), "'both \\' and \"'");
        assert_eq!(repr_str("a\\b\nc\td"), "'a\\\\b\\nc\\td'");
        assert_eq!(repr_str("\u{1}"), "'\\x01'");
        assert_eq!(repr_str("caf\u{e9}"), "'caf\u{e9}'");
        assert_eq!(repr_str(""), "''");
    }

    #[test]
    fn test_short_values_single_line() {
        assert_eq!(PyValue::str_list(&["foo"]).pformat(), "['foo']");
        assert_eq!(PyValue::str_list::<&str>(&[]).pformat(), "[]");

        let mut map = BTreeMap::new();
        map.insert("b".to_string(), vec!["y".to_string()]);
        map.insert("".to_string(), vec!["*".to_string()]);
        assert_eq!(PyValue::str_list_dict(&map).pformat(), "{'': ['*'], 'b': ['y']}");
    }

    #[test]
    fn test_long_list_one_item_per_line() {
        let items: Vec<String> = (0..8).map(|i| format!("package.module{}", i)).collect();
        let out = PyValue::str_list(&items).pformat();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "['package.module0',");
        assert_eq!(lines[1], " 'package.module1',");
        assert_eq!(lines[7], " 'package.module7']");
    }

    #[test]
    fn test_long_dict_aligns_values() {
        let mut map = BTreeMap::new();
        map.insert("".to_string(), vec!["*".to_string()]);
        map.insert(
            "mypackage.templates".to_string(),
            vec!["html/*".to_string(), "html/partials/*".to_string()],
        );
        map.insert(
            "mypackage".to_string(),
            vec!["data/*".to_string(), "data/fixtures/*".to_string()],
        );
        let out = PyValue::str_list_dict(&map).pformat();
        assert_eq!(
            out,
            "{'': ['*'],\n 'mypackage': ['data/*', 'data/fixtures/*'],\n 'mypackage.templates': ['html/*', 'html/partials/*']}"
        );
    }

    #[test]
    fn test_nested_value_wraps_when_too_long() {
        let mut map = BTreeMap::new();
        let reqs: Vec<String> = (0..6).map(|i| format!("requirement-number-{}>=1.0", i)).collect();
        map.insert("test".to_string(), reqs);
        let out = PyValue::str_list_dict(&map).pformat();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "{'test': ['requirement-number-0>=1.0',");
        assert_eq!(lines[1], "          'requirement-number-1>=1.0',");
        assert_eq!(lines[5], "          'requirement-number-5>=1.0']}");
    }
}
