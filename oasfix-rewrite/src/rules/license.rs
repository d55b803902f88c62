use crate::context::RewriteContext;
use crate::error::RewriteError;
use crate::rules::{Rewrite, RewriteMeta};
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static BARE_APACHE_LICENSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"license:\s*\n\s*name:\s*Apache-2\.0").expect("valid license regex")
});

pub struct LicenseUrl;

impl Rewrite for LicenseUrl {
    fn meta(&self) -> RewriteMeta {
        RewriteMeta {
            id: "license-url",
            title: "Add missing license URL",
            description: "Inserts a `url:` line after a bare `name: Apache-2.0` license when the document has no `url:` at all.",
        }
    }

    fn apply<'a>(
        &self,
        ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError> {
        // Any `url:` in the document counts as already present.
        if !content.contains("license:") || content.contains("url:") {
            return Ok(Cow::Borrowed(content));
        }

        let replacement = format!(
            "license:\n    name: Apache-2.0\n    url: {}",
            ctx.license_url
        );
        Ok(BARE_APACHE_LICENSE.replace_all(content, NoExpand(&replacement)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(doc: &str) -> String {
        LicenseUrl
            .apply(&RewriteContext::new("getSlot"), doc)
            .unwrap()
            .into_owned()
    }

    #[test]
    fn adds_url_after_bare_name() {
        let doc = "info:\n  title: RPC\n  license:\n    name: Apache-2.0\nservers: []\n";
        assert_eq!(
            run(doc),
            "info:\n  title: RPC\n  license:\n    name: Apache-2.0\n    url: https://www.apache.org/licenses/LICENSE-2.0.html\nservers: []\n"
        );
    }

    #[test]
    fn leaves_document_with_url_alone() {
        let doc = "info:\n  license:\n    name: Apache-2.0\n  contact:\n    url: https://example.com\n";
        assert_eq!(run(doc), doc);
    }

    #[test]
    fn leaves_other_licenses_alone() {
        let doc = "info:\n  license:\n    name: MIT\n";
        assert_eq!(run(doc), doc);
    }

    #[test]
    fn uses_configured_url() {
        let ctx = RewriteContext::new("getSlot").with_license_url("https://example.com/license");
        let out = LicenseUrl
            .apply(&ctx, "license:\n  name: Apache-2.0\n")
            .unwrap();
        assert!(out.contains("    url: https://example.com/license\n"));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let once = run("info:\n  license:\n    name: Apache-2.0\n");
        assert_eq!(run(&once), once);
    }
}
