//! Build script for storefront crate.
//!
//! Hashes the stylesheet so templates can cache-bust it with `?v=<hash>`,
//! and warns when the htmx bundle has not been copied into `static/js/`.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    hash_css();
    check_htmx();
}

/// Warns when `static/js/htmx.min.js` is missing; cart forms then run without HTMX.
fn check_htmx() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let htmx_path = Path::new(&manifest_dir).join("static/js/htmx.min.js");

    println!("cargo:rerun-if-changed={}", htmx_path.display());

    if !htmx_path.exists() {
        println!(
            "cargo:warning=static/js/htmx.min.js is missing; copy htmx 2.x there before deploying"
        );
    }
}

/// Sets `CSS_HASH` (first 8 hex chars of the SHA-256 of main.css) for `env!("CSS_HASH")`.
fn hash_css() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or(&digest);

    println!("cargo:rustc-env=CSS_HASH={short_hash}");
}
