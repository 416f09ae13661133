//! Common test utilities and helpers

#![allow(dead_code)]

use cloudsim_common::ResourceMetadata;
use std::io::Write;
use tempfile::NamedTempFile;

/// Names from a listing, in listing order
pub fn names(listing: &[ResourceMetadata]) -> Vec<String> {
    listing.iter().map(|m| m.name.clone()).collect()
}

/// Write `content` to a temporary file with the given extension
pub fn temp_file(extension: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{}", extension))
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}
