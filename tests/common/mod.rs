//! Shared fixtures for integration tests.

use std::path::PathBuf;

use body_charset::{Charset, CharsetStrategy, MetaCharsetStrategy, Resolution};

/// Resolve `bytes` with the default markup strategy and ISO-8859-1 fallback.
#[allow(dead_code)]
pub fn resolve(bytes: &[u8]) -> Resolution {
    MetaCharsetStrategy::new().resolve(bytes, Charset::ISO_8859_1)
}

/// Build an HTML page declaring `charset`, with `body` encoded by the caller.
#[allow(dead_code)]
pub fn html_page(charset: &str, body: &[u8]) -> Vec<u8> {
    let mut page = format!(
        "<!DOCTYPE html>\n<html><head>\n<meta charset=\"{charset}\">\n<title>t</title>\n</head><body>"
    )
    .into_bytes();
    page.extend_from_slice(body);
    page.extend_from_slice(b"</body></html>\n");
    page
}

/// Write `content` to a per-test file under the system temp directory.
#[allow(dead_code)]
pub fn write_temp_file(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("body-charset-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
