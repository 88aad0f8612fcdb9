//! Lowering of module syntax into the factory convention.
//!
//! The scanner records one [`Splice`] per module-syntax statement; applying
//! them in offset order turns the original source into a body that only uses
//! `require(specifier)` and `module.exports`. Export assignments are appended
//! after the body so declarations exist by the time they run.

/// A single source replacement, in byte offsets of the original text.
#[derive(Debug, Clone)]
pub(crate) struct Splice {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

impl Splice {
    /// Replace the given range with nothing.
    pub fn cut(start: u32, end: u32) -> Self {
        Self {
            start,
            end,
            text: String::new(),
        }
    }
}

/// Apply splices to `source` and append the export assignments.
///
/// Splices must not overlap; the scanner produces at most one replacement per
/// statement plus point insertions at statement boundaries.
pub(crate) fn apply(source: &str, mut splices: Vec<Splice>, appends: &[String]) -> String {
    splices.sort_by_key(|splice| splice.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for splice in &splices {
        out.push_str(&source[cursor..splice.start as usize]);
        out.push_str(&splice.text);
        cursor = splice.end as usize;
    }
    out.push_str(&source[cursor..]);

    if !appends.is_empty() {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        for append in appends {
            out.push_str(append);
            out.push('\n');
        }
    }

    out
}

/// Encode a specifier or property name as a JavaScript string literal.
pub(crate) fn js_string(value: &str) -> String {
    serde_json::to_string(value).expect("encoding a str as a JSON string")
}

/// Conservative check for names that can appear bare in member access and
/// destructuring shorthand. Anything else goes through bracket/string form.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `object.property`, falling back to `object["property"]` for names that are
/// not plain identifiers.
pub(crate) fn member(object: &str, property: &str) -> String {
    if is_identifier(property) {
        format!("{object}.{property}")
    } else {
        format!("{object}[{}]", js_string(property))
    }
}

/// The assignment target for an exported name.
pub(crate) fn export_target(name: &str) -> String {
    member("module.exports", name)
}

/// One field of a destructuring import: shorthand where possible, renamed or
/// string-keyed otherwise.
pub(crate) fn destructure_entry(imported: &str, local: &str) -> String {
    if imported == local && is_identifier(imported) {
        local.to_string()
    } else if is_identifier(imported) {
        format!("{imported}: {local}")
    } else {
        format!("{}: {local}", js_string(imported))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_replaces_ranges_in_order() {
        let source = "aaa bbb ccc";
        let splices = vec![Splice::cut(4, 8), Splice {
            start: 0,
            end: 3,
            text: "xxx".to_string(),
        }];
        assert_eq!(apply(source, splices, &[]), "xxx ccc");
    }

    #[test]
    fn apply_appends_on_fresh_line() {
        let source = "let a = 1;";
        let appends = vec!["module.exports.a = a;".to_string()];
        assert_eq!(
            apply(source, Vec::new(), &appends),
            "let a = 1;\nmodule.exports.a = a;\n"
        );
    }

    #[test]
    fn js_string_escapes_quotes() {
        assert_eq!(js_string(r#"a"b"#), r#""a\"b""#);
    }

    #[test]
    fn member_uses_bracket_form_for_odd_names() {
        assert_eq!(member("ns", "foo"), "ns.foo");
        assert_eq!(member("ns", "foo-bar"), r#"ns["foo-bar"]"#);
    }

    #[test]
    fn destructure_entry_forms() {
        assert_eq!(destructure_entry("a", "a"), "a");
        assert_eq!(destructure_entry("a", "b"), "a: b");
        assert_eq!(destructure_entry("x-y", "z"), r#""x-y": z"#);
    }
}
