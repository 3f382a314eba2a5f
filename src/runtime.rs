//! Runtime version identifier reported by `/node/version`

/// Toolchain release captured by the build script, empty when unknown
const RUSTC_RELEASE: &str = env!("FIXTURE_RUSTC_RELEASE");

/// Node-style version string, e.g. `v1.87.0`
///
/// Falls back to the package version when the toolchain could not be queried
/// at build time.
pub fn version() -> String {
    if RUSTC_RELEASE.is_empty() {
        format!("v{}", env!("CARGO_PKG_VERSION"))
    } else {
        format!("v{RUSTC_RELEASE}")
    }
}
