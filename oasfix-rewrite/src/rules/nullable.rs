use crate::context::RewriteContext;
use crate::error::RewriteError;
use crate::rules::{Rewrite, RewriteMeta};
use crate::scan::{self, Line};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static MAPPING_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*([A-Za-z_$][\w$.-]*):(.*)$").expect("valid mapping key regex")
});

/// Gives an `allOf:` composition that is marked `nullable: true` an explicit
/// `type: object`.
pub struct NullableAllOf;

impl NullableAllOf {
    fn key_and_value<'a>(line: &Line<'a>) -> Option<(&'a str, &'a str)> {
        let caps = MAPPING_KEY.captures(line.code())?;
        let key = caps.get(1)?.as_str();
        let value = caps.get(2)?.as_str().trim();
        Some((key, value))
    }

    /// Keys at exactly `indent` in the mapping that contains line `at`.
    fn sibling_keys<'a>(lines: &[Line<'a>], at: usize, indent: usize) -> Vec<(&'a str, &'a str)> {
        let mut out = Vec::new();
        let mut visit = |line: &Line<'a>| -> bool {
            if line.is_blank() {
                return true;
            }
            let width = line.indent().len();
            if width < indent {
                return false;
            }
            if width == indent
                && let Some(kv) = Self::key_and_value(line)
            {
                out.push(kv);
            }
            true
        };

        for line in lines[..at].iter().rev() {
            if !visit(line) {
                break;
            }
        }
        for line in &lines[at + 1..] {
            if !visit(line) {
                break;
            }
        }
        out
    }
}

impl Rewrite for NullableAllOf {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: "nullable-allof",
            title: "Type nullable allOf compositions",
            description: "Inserts `type: object` ahead of an `allOf:` block whose mapping also sets `nullable: true` but has no `type:`.",
        }
    }

    fn apply<'a>(
        &self,
        _ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        if !content.contains("nullable:") || !content.contains("allOf:") {
            return Ok(Cow::Borrowed(content));
        }

        let lines = scan::lines(content);
        let mut insertions = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if !matches!(Self::key_and_value(line), Some(("allOf", _))) {
                continue;
            }

            let indent = line.indent();
            let siblings = Self::sibling_keys(&lines, i, indent.len());
            let nullable = siblings
                .iter()
                .any(|(k, v)| *k == "nullable" && *v == "true");
            let typed = siblings.iter().any(|(k, _)| *k == "type");
            if nullable && !typed {
                insertions.push((line.start, format!("{indent}type: object\n")));
            }
        }

        if insertions.is_empty() {
            return Ok(Cow::Borrowed(content));
        }
        Ok(Cow::Owned(scan::splice(content, &insertions)))
    }
}
