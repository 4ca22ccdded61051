use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    // Short git hash when building from a checkout, omitted otherwise (tarballs, Docker)
    let hash = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();

    let pkg = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let version = if hash.is_empty() {
        pkg
    } else {
        format!("{} ({})", pkg, hash)
    };
    println!("cargo:rustc-env=CHECK_REDIS_VERSION={}", version);
}
