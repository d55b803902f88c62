//! Clap-free settings for the batch pipeline.

use camino::Utf8PathBuf;
use oasfix_rewrite::{DEFAULT_LICENSE_URL, DEFAULT_VENDOR_URL, RewriteContext};

/// Directory scanned when nothing else is configured.
pub const DEFAULT_DIR: &str = "openapi/zk-compression";

/// File-name suffix selecting documents to fix.
pub const DEFAULT_EXTENSION: &str = ".yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixSettings {
    pub dir: Utf8PathBuf,
    pub extension: String,
    pub license_url: String,
    pub vendor_url: String,

    /// Compute rewrites and patches without writing anything.
    pub dry_run: bool,
}

impl Default for FixSettings {
    fn default() -> Self {
        Self {
            dir: Utf8PathBuf::from(DEFAULT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            license_url: DEFAULT_LICENSE_URL.to_string(),
            vendor_url: DEFAULT_VENDOR_URL.to_string(),
            dry_run: false,
        }
    }
}

impl FixSettings {
    pub fn rewrite_context(&self, file_name: &str) -> RewriteContext {
        RewriteContext::for_file(file_name, &self.extension)
            .with_license_url(self.license_url.clone())
            .with_vendor_url(self.vendor_url.clone())
    }
}
