#![no_main]

use libfuzzer_sys::fuzz_target;
use oasfix_rewrite::{RewriteContext, rewrite_document};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };

    let ctx = RewriteContext::new("getCompressedBalance");
    // Errors are fine; panics are not.
    let _ = rewrite_document(&ctx, s);
});
