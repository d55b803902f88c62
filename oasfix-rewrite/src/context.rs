/// License URL inserted under a bare `name: Apache-2.0` license.
pub const DEFAULT_LICENSE_URL: &str = "https://www.apache.org/licenses/LICENSE-2.0.html";

/// API-key dashboard link that malformed descriptions end with.
pub const DEFAULT_VENDOR_URL: &str = "https://dashboard.helius.dev/api-keys";

/// Per-document inputs shared by every rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteContext {
    /// RPC method the document describes; the file name without its extension.
    pub method_name: String,
    pub license_url: String,
    pub vendor_url: String,
}

impl RewriteContext {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            license_url: DEFAULT_LICENSE_URL.to_string(),
            vendor_url: DEFAULT_VENDOR_URL.to_string(),
        }
    }

    /// Build a context from a file name, stripping `extension` (e.g. `.yaml`).
    pub fn for_file(file_name: &str, extension: &str) -> Self {
        let method = file_name.strip_suffix(extension).unwrap_or(file_name);
        Self::new(method)
    }

    pub fn with_license_url(mut self, url: impl Into<String>) -> Self {
        self.license_url = url.into();
        self
    }

    pub fn with_vendor_url(mut self, url: impl Into<String>) -> Self {
        self.vendor_url = url.into();
        self
    }
}
