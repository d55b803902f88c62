//! Rewrites for a `schemas:` key that ended up glued to a `description:`
//! value, plus the duplicated `schemas:` key that the split can leave behind.

use crate::context::RewriteContext;
use crate::error::RewriteError;
use crate::rules::{Rewrite, RewriteMeta};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

const SPLIT_REPLACEMENT: &str = "${1}\n  schemas:";

static DESCRIPTION_SCHEMAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(description:.*?)schemas:").expect("valid description regex")
});

static DASHBOARD_DESCRIPTION_SCHEMAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(description:.*?\[dashboard.*?\]).*?schemas:")
        .expect("valid dashboard description regex")
});

static DUPLICATE_SCHEMAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"schemas:(?:\s*\n\s*schemas:)+").expect("valid schemas regex")
});

/// `description: ... schemas:` on one line.
pub struct DescriptionSchemas;

impl Rewrite for DescriptionSchemas {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: "description-schemas",
            title: "Split schemas key off description",
            description: "Moves a `schemas:` key appended to a `description:` value onto its own line.",
        }
    }

    fn apply<'a>(
        &self,
        _ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        Ok(DESCRIPTION_SCHEMAS.replace_all(content, SPLIT_REPLACEMENT))
    }
}

/// `description: ... [dashboard...] ... schemas:` on one line; anything between
/// the bracketed reference and `schemas:` is dropped.
pub struct DashboardDescriptionSchemas;

impl Rewrite for DashboardDescriptionSchemas {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: "dashboard-description-schemas",
            title: "Split schemas key off dashboard description",
            description: "Ends a description at its bracketed `[dashboard...]` reference and moves the trailing `schemas:` key onto its own line.",
        }
    }

    fn apply<'a>(
        &self,
        _ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        Ok(DASHBOARD_DESCRIPTION_SCHEMAS.replace_all(content, SPLIT_REPLACEMENT))
    }
}

/// A description ending in the vendor API-key URL, followed (possibly across
/// line breaks) by `schemas:`.
pub struct VendorUrlDescriptionSchemas;

impl VendorUrlDescriptionSchemas {
    const ID: &'static str = "vendor-url-description-schemas";

    fn pattern(vendor_url: &str) -> Result<Regex, RewriteError> {
        let pattern = format!(
            r"(description:.*\({}\)\.?)\s*schemas:",
            regex::escape(vendor_url)
        );
        Regex::new(&pattern).map_err(|source| RewriteError::Pattern {
            rewrite: Self::ID,
            source,
        })
    }
}

impl Rewrite for VendorUrlDescriptionSchemas {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: Self::ID,
            title: "Split schemas key off vendor URL description",
            description: "Puts a `schemas:` key that follows a description ending in the API-key dashboard URL onto its own indented line.",
        }
    }

    fn apply<'a>(
        &self,
        ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        if !content.contains(ctx.vendor_url.as_str()) {
            return Ok(Cow::Borrowed(content));
        }
        let re = Self::pattern(&ctx.vendor_url)?;
        Ok(re.replace_all(content, SPLIT_REPLACEMENT))
    }
}

/// `schemas:` immediately followed by one or more further `schemas:` keys.
pub struct DuplicateSchemas;

impl Rewrite for DuplicateSchemas {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: "duplicate-schemas",
            title: "Collapse duplicated schemas key",
            description: "Collapses `schemas:` directly followed by a second `schemas:` into a single key.",
        }
    }

    fn apply<'a>(
        &self,
        _ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        Ok(DUPLICATE_SCHEMAS.replace_all(content, "schemas:"))
    }
}
