//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `mouthflap <version> (<date> <commit>)`
pub fn version_string() -> String {
    format!(
        "mouthflap {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
