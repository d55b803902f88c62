use crate::context::RewriteContext;
use crate::error::RewriteError;
use crate::rules::{Rewrite, RewriteMeta};
use crate::scan;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

const COMPONENTS: &str = "components:";
const EMPTY_COMPONENTS: &str = "components: {}";

static BARE_COMPONENTS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*components:[ \t]*(\{\})?[ \t]*$").expect("valid components line regex")
});

static EMPTY_COMPONENTS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*components:[ \t]*\{\}[ \t]*(\r?\n|$)")
        .expect("valid empty components regex")
});

/// Keeps the first `components:` key and drops every later one.
pub struct DuplicateComponents;

impl Rewrite for DuplicateComponents {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: "duplicate-components",
            title: "Collapse duplicated components sections",
            description: "Removes every `components:` key after the first; the content below a removed key stays where it is.",
        }
    }

    fn apply<'a>(
        &self,
        _ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        let mut hits = content.match_indices(COMPONENTS).map(|(at, _)| at);
        if hits.next().is_none() {
            return Ok(Cow::Borrowed(content));
        }
        let later: Vec<usize> = hits.collect();
        if later.is_empty() {
            return Ok(Cow::Borrowed(content));
        }

        let lines = scan::lines(content);
        let mut removals: Vec<(usize, usize)> = Vec::with_capacity(later.len());
        for at in later {
            let span = lines
                .iter()
                .find(|l| l.start <= at && at < l.end())
                .filter(|l| BARE_COMPONENTS_LINE.is_match(l.body()))
                .map(|l| (l.start, l.end()))
                .unwrap_or((at, at + COMPONENTS.len()));
            removals.push(span);
        }

        let mut out = String::with_capacity(content.len());
        let mut cursor = 0;
        for (start, end) in removals {
            out.push_str(&content[cursor..start]);
            cursor = end;
        }
        out.push_str(&content[cursor..]);
        Ok(Cow::Owned(out))
    }
}

/// Drops `components: {}`.
pub struct EmptyComponents;

impl Rewrite for EmptyComponents {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: "empty-components",
            title: "Remove empty components section",
            description: "Removes `components: {}`, including its line when nothing else is on it.",
        }
    }

    fn apply<'a>(
        &self,
        _ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        if !content.contains(EMPTY_COMPONENTS) {
            return Ok(Cow::Borrowed(content));
        }
        let without_lines = EMPTY_COMPONENTS_LINE.replace_all(content, "");
        Ok(Cow::Owned(without_lines.replace(EMPTY_COMPONENTS, "")))
    }
}
