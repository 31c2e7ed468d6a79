//! Resolving files on disk against a config file in the project root.

use configstack::scan::{self, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONFIG: &str = r#"
[[lint]]
ignores = ["dist", "src/generated"]

[[lint]]
preset = "js/recommended"

[[lint]]
files = ["src/**"]
rules = { no-var = "error" }
"#;

fn project() -> TempDir {
    let dir = tempfile::Builder::new().prefix("configstack").tempdir().unwrap();
    for rel in ["index.html", "src/main.ts", "src/generated/api.ts", "dist/assets/index.js"] {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
    }
    fs::write(dir.path().join("configstack.toml"), CONFIG).unwrap();
    dir
}

fn resolve(dir: &TempDir, target: &str) -> Result<scan::ResolveResult, ScanError> {
    scan::resolve_files(&dir.path().join("configstack.toml"), &[dir.path().join(target)])
}

#[test]
fn subdirectory_target_matches_like_the_root() {
    let dir = project();
    let from_root = resolve(&dir, ".").unwrap();
    let from_src = resolve(&dir, "src").unwrap();

    let main_root = from_root
        .files
        .iter()
        .find(|r| r.path == Path::new("src/main.ts"))
        .unwrap();
    assert_eq!(from_src.files, [main_root.clone()]);
    assert_eq!(from_src.files[0].scopes, [0]);
    assert_eq!(from_src.ignored, [PathBuf::from("src/generated/api.ts")]);
}

#[test]
fn ignored_directory_target_stays_ignored() {
    let dir = project();
    let result = resolve(&dir, "dist").unwrap();
    assert!(result.files.is_empty());
    assert_eq!(result.ignored, [PathBuf::from("dist/assets/index.js")]);
}

#[test]
fn absolute_file_target_is_made_relative() {
    let dir = project();
    let result = resolve(&dir, "src/generated/api.ts").unwrap();
    assert!(result.files.is_empty());
    assert_eq!(result.ignored, [PathBuf::from("src/generated/api.ts")]);
}
