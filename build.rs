//! Build script for alive.
//!
//! Generates the long version string shown by `alive --version`:
//! MAJOR.MINOR.PATCH+YYYYMMDDHHmmss

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    let timestamp = Command::new("date")
        .arg("+%Y%m%d%H%M%S")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "00000000000000".to_string());

    let out_dir = env::var("OUT_DIR").expect("cargo always sets OUT_DIR");
    let dest_path = Path::new(&out_dir).join("version.rs");
    fs::write(
        &dest_path,
        format!(
            r#"/// Version string with build timestamp, used by the CLI.
pub const BUILD_VERSION: &str = "{version}+{timestamp}";
"#
        ),
    )
    .expect("OUT_DIR is writable");

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
