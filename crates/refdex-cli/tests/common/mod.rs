#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a configured `refdex` command suitable for integration tests.
/// Config discovery is pinned to a caller-supplied directory so tests never
/// read a developer's real configuration.
#[allow(dead_code)]
pub fn refdex_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("refdex"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("REFDEX_CONFIG_DIR", config_dir);
    cmd.env_remove("REFDEX_REPOSITORY");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write a one-package manifest and return its path.
#[allow(dead_code)]
pub fn write_manifest(dir: &Path, entries: &[(&str, &str)]) -> std::path::PathBuf {
    let mut contents = String::new();
    for (id, docs_url) in entries {
        contents.push_str(&format!(
            "[[package]]\nid = \"{id}\"\ndocs_url = \"{docs_url}\"\n\n"
        ));
    }
    let path = dir.join("packages.toml");
    std::fs::write(&path, contents).expect("write manifest");
    path
}
