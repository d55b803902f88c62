#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use oasfix_rewrite::{RewriteContext, rewrite_document};

#[derive(Debug, Arbitrary)]
struct Input {
    method_name: String,
    license_url: String,
    vendor_url: String,
    document: String,
}

fuzz_target!(|input: Input| {
    let ctx = RewriteContext::new(input.method_name)
        .with_license_url(input.license_url)
        .with_vendor_url(input.vendor_url);

    if let Ok(first) = rewrite_document(&ctx, &input.document) {
        // Feed the output back through the chain.
        let _ = rewrite_document(&ctx, &first.content);
    }
});
