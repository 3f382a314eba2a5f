// Captures the release of the toolchain building this binary so the fixture
// can report it from `/node/version`.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let release = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .and_then(|text| parse_release(&text));

    // Empty means unknown; the crate falls back to its own package version.
    println!(
        "cargo:rustc-env=FIXTURE_RUSTC_RELEASE={}",
        release.unwrap_or_default()
    );
}

/// `rustc 1.87.0 (17067e9ac 2025-05-09)` -> `1.87.0`
fn parse_release(text: &str) -> Option<String> {
    text.split_whitespace()
        .nth(1)
        .map(|v| v.split('-').next().unwrap_or(v).to_string())
        .filter(|v| !v.is_empty())
}
