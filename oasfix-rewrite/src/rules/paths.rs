//! Rewrites that give a document a usable `paths:` section.

use crate::context::RewriteContext;
use crate::error::RewriteError;
use crate::rules::{Rewrite, RewriteMeta};
use crate::scan::{self, Line};
use crate::template::{default_paths_section, responses_block};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

static COMPONENTS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"components:\s*\n").expect("valid components regex"));

static TOP_LEVEL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\w+:").expect("valid top-level key regex"));

static COMPONENTS_CHILD_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n  \w+:").expect("valid child key regex"));

static SECTION_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"components:|schemas:").expect("valid anchor regex"));

static SCHEMAS_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)schemas:").expect("valid schemas regex"));

static POST_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*post:[ \t]*$").expect("valid post regex"));

static RESPONSES_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*responses:").expect("valid responses regex"));

/// Content following `securitySchemes:` and `schemas:` inside `components:`.
#[derive(Debug, Default, PartialEq, Eq)]
struct ComponentSections<'a> {
    security_schemes: &'a str,
    schemas: Cow<'a, str>,
}

fn component_sections(content: &str) -> ComponentSections<'_> {
    let mut out = ComponentSections::default();
    let Some(header) = COMPONENTS_HEADER.find(content) else {
        return out;
    };
    let body_end = scan::section_end(content, header.end(), &TOP_LEVEL_KEY);
    let body = &content[header.end()..body_end];

    const SECURITY: &str = "securitySchemes:";
    if let Some(at) = body.find(SECURITY) {
        let start = at + SECURITY.len();
        let end = scan::section_end(body, start, &COMPONENTS_CHILD_KEY);
        out.security_schemes = &body[start..end];
    }

    const SCHEMAS: &str = "schemas:";
    if let Some(at) = body.find(SCHEMAS) {
        let start = at + SCHEMAS.len();
        let end = scan::section_end(body, start, &TOP_LEVEL_KEY);
        out.schemas = Cow::Borrowed(&body[start..end]);
    }

    out
}

/// A `schemas:` key outside any `components:`; its body is shifted so it
/// nests under `  schemas:`.
fn loose_schemas(content: &str) -> Cow<'_, str> {
    let Some(caps) = SCHEMAS_KEY.captures(content) else {
        return Cow::Borrowed("");
    };
    let (Some(key), Some(indent)) = (caps.get(0), caps.get(1)) else {
        return Cow::Borrowed("");
    };
    let body = &content[key.end()..scan::section_end(content, key.end(), &TOP_LEVEL_KEY)];

    let shift = 2usize.saturating_sub(indent.as_str().len());
    if shift == 0 {
        return Cow::Borrowed(body);
    }

    let pad = " ".repeat(shift);
    let mut shifted = String::with_capacity(body.len() + body.lines().count() * shift);
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            shifted.push('\n');
            if !line.trim().is_empty() {
                shifted.push_str(&pad);
            }
        }
        shifted.push_str(line);
    }
    Cow::Owned(shifted)
}

fn push_section(out: &mut String, key: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    out.push_str(key);
    out.push_str(body);
    if !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Rebuilds a document without `paths:` as head + default `paths:` +
/// `components:` holding the extracted `securitySchemes` and `schemas`.
pub struct SynthesizePaths;

impl Rewrite for SynthesizePaths {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: "synthesize-paths",
            title: "Synthesize missing paths section",
            description: "For a document with no `paths:`, adds a single `/` path item with a default `post` operation and canned 200/400/429 responses, then rebuilds `components:` from the existing securitySchemes and schemas.",
        }
    }

    fn apply<'a>(
        &self,
        ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        if content.contains("paths:") {
            return Ok(Cow::Borrowed(content));
        }

        let sections = if content.contains("components:") {
            component_sections(content)
        } else {
            ComponentSections {
                security_schemes: "",
                schemas: loose_schemas(content),
            }
        };

        let anchor = SECTION_ANCHOR
            .find(content)
            .ok_or(RewriteError::MissingSectionAnchor)?;

        let head = content[..anchor.start()].trim_end_matches([' ', '\t']);
        let mut out = String::with_capacity(content.len() + 2048);
        out.push_str(head);
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }

        out.push_str(&default_paths_section(&ctx.method_name));
        out.push_str("components:\n");
        push_section(&mut out, "  securitySchemes:", sections.security_schemes);
        push_section(&mut out, "  schemas:", &sections.schemas);

        debug!(
            method = %ctx.method_name,
            security_schemes = !sections.security_schemes.is_empty(),
            schemas = !sections.schemas.is_empty(),
            "synthesized paths section"
        );
        Ok(Cow::Owned(out))
    }
}

/// Adds the canned responses to every `post:` operation that has none.
pub struct PostResponses;

impl PostResponses {
    /// Index of the nearest line above `at` that is indented less, i.e. the
    /// key owning line `at`.
    fn parent(lines: &[Line<'_>], at: usize) -> Option<usize> {
        let indent = lines[at].indent().len();
        (0..at)
            .rev()
            .find(|&i| !lines[i].is_blank() && lines[i].indent().len() < indent)
    }

    /// True when `lines[at]` is an operation key of a path item, meaning its
    /// grandparent is `paths:`. Keys named `post` deeper in a document
    /// (schema properties, examples) are not operations.
    fn is_operation(lines: &[Line<'_>], at: usize) -> bool {
        Self::parent(lines, at)
            .and_then(|item| Self::parent(lines, item))
            .is_some_and(|paths| lines[paths].code().trim_start() == "paths:")
    }

    /// Offset just past the last non-blank line of the block opened at
    /// `lines[at]`, or `None` when the block already has `responses:`.
    fn block_insert_offset(lines: &[Line<'_>], at: usize) -> Option<usize> {
        let indent = lines[at].indent().len();
        let mut last = &lines[at];
        for line in &lines[at + 1..] {
            if line.is_blank() {
                continue;
            }
            if line.indent().len() <= indent {
                break;
            }
            if RESPONSES_KEY.is_match(line.code()) {
                return None;
            }
            last = line;
        }
        Some(last.end())
    }
}

impl Rewrite for PostResponses {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: "post-responses",
            title: "Add missing post responses",
            description: "Appends canned 200/400/429 responses to each `post:` operation that lacks a `responses:` block, indented under the operation.",
        }
    }

    fn apply<'a>(
        &self,
        ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        if !content.contains("paths:") || !content.contains("post:") {
            return Ok(Cow::Borrowed(content));
        }

        let lines = scan::lines(content);
        let mut insertions = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if !POST_KEY.is_match(line.code()) || !Self::is_operation(&lines, i) {
                continue;
            }
            let Some(offset) = Self::block_insert_offset(&lines, i) else {
                continue;
            };

            let indent = format!("{}  ", line.indent());
            let mut block = String::new();
            if !content[..offset].ends_with('\n') {
                block.push('\n');
            }
            block.push_str(&responses_block(&ctx.method_name, &indent));
            insertions.push((offset, block));
        }

        if insertions.is_empty() {
            return Ok(Cow::Borrowed(content));
        }
        debug!(
            method = %ctx.method_name,
            operations = insertions.len(),
            "added responses to post operations"
        );
        Ok(Cow::Owned(scan::splice(content, &insertions)))
    }
}
