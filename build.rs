//! Stamps `taskgate::build_info` with the build time, commit and compiler.

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let built_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default();
    stamp("TASKGATE_BUILD_TIME", Some(built_at));

    // Release tarballs have no .git, so packagers may pass the hash in
    let commit = env::var("TASKGATE_GIT_HASH")
        .ok()
        .or_else(|| first_line("git", &["rev-parse", "--short=10", "HEAD"]));
    stamp("TASKGATE_GIT_HASH", commit);

    // Cargo hands build scripts the compiler it will use
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    stamp("TASKGATE_RUSTC", first_line(&rustc, &["--version"]));

    println!("cargo:rerun-if-env-changed=TASKGATE_GIT_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}

fn stamp(key: &str, value: Option<String>) {
    let value = value.filter(|v| !v.is_empty());
    println!(
        "cargo:rustc-env={}={}",
        key,
        value.as_deref().unwrap_or("unknown")
    );
}

fn first_line(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()?
        .lines()
        .next()
        .map(|line| line.trim().to_string())
}
