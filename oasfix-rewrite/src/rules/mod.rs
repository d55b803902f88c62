use crate::context::RewriteContext;
use crate::error::RewriteError;
use std::borrow::Cow;

mod components;
mod license;
mod misplaced_schemas;
mod nullable;
mod paths;

/// Static description of a rewrite, for listings and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteMeta {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub trait Rewrite {
    fn meta(&self) -> RewriteMeta;

    /// Rewrite the full document text. Returns the input unchanged (borrowed)
    /// when the rewrite does not apply.
    fn apply<'a>(
        &self,
        ctx: &RewriteContext,
        content: &'a str,
    ) -> Result<Cow<'a, str>, RewriteError>;
}

/// The rewrite chain, in the order it must run.
pub fn builtin_rewrites() -> Vec<Box<dyn Rewrite>> {
    vec![
        Box::new(license::LicenseUrl),
        Box::new(nullable::NullableAllOf),
        Box::new(misplaced_schemas::DescriptionSchemas),
        Box::new(misplaced_schemas::DashboardDescriptionSchemas),
        Box::new(misplaced_schemas::VendorUrlDescriptionSchemas),
        Box::new(misplaced_schemas::DuplicateSchemas),
        Box::new(paths::SynthesizePaths),
        Box::new(paths::PostResponses),
        Box::new(components::DuplicateComponents),
        Box::new(components::EmptyComponents),
    ]
}

pub fn rewrite_metas() -> Vec<RewriteMeta> {
    builtin_rewrites().iter().map(|r| r.meta()).collect()
}
