// Copyright (c) 2022 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    built::write_built_file().expect("Failed to acquire build-time information");

    // GIT_VERSION & GIT_DIRTY without a git2 dependency
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let git_info = format!(
        "// Git information generated at build time\n\
         pub const GIT_VERSION: Option<&'static str> = {};\n\
         pub const GIT_DIRTY: Option<bool> = {};\n",
        match git_version() {
            Some(v) => format!("Some({v:?})"),
            None => "None".to_string(),
        },
        if is_git_dirty() { "Some(true)" } else { "None" }
    );
    fs::write(Path::new(&out_dir).join("git_built.rs"), git_info)
        .expect("Failed to write git_built.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
}

/// Version from the last `v*` tag, or the short commit hash if there's no tag.
fn git_version() -> Option<String> {
    git(&["describe", "--match", "v[0-9]*", "--tags", "HEAD"])
        .map(|v| v.trim_start_matches('v').to_string())
        .or_else(|| git(&["rev-parse", "--short", "HEAD"]))
}

fn is_git_dirty() -> bool {
    git(&["diff-index", "--name-only", "HEAD", "--"])
        .map(|changes| !changes.is_empty())
        .unwrap_or_default()
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
