//! Build script: embeds the devsync version string at compile time.

use std::process::Command;

fn main() {
    // Prefer DEVSYNC_VERSION env var if set (e.g., by CI release workflow),
    // otherwise fall back to git describe for local development builds.
    // Without a reachable tag, describe fails and the crate version is used.
    if let Ok(version) = std::env::var("DEVSYNC_VERSION") {
        println!("cargo:rustc-env=DEVSYNC_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=DEVSYNC_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=DEVSYNC_VERSION");
}
