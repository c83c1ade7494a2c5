use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let git_hash = capture("git", &["rev-parse", "--short", "HEAD"]);
    let git_status = capture("git", &["status", "--porcelain"])
        .map(|changes| if changes.is_empty() { "clean" } else { "dirty" }.to_string());
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    let metadata = [
        ("HASH", git_hash.filter(|hash| !hash.is_empty())),
        ("STATUS", git_status),
        ("TIMESTAMP", Some(timestamp)),
        ("TARGET", env::var("TARGET").ok()),
        ("PROFILE", env::var("PROFILE").ok()),
        ("RUSTC", capture("rustc", &["--version"])),
    ];
    for (key, value) in metadata {
        let value = value.unwrap_or_else(|| "unknown".to_string());
        println!("cargo:rustc-env=WALLET_BUILD_{key}={value}");
    }
}

/// Trimmed stdout of a successful command.
fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
