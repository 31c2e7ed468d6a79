use crate::lint::EffectiveLintConfig;
use crate::loader::{self, LoadError};
use crate::paths::{self, PatternError};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum ScanError {
    Load(LoadError),
    Walk(ignore::Error),
    GlobParse(PatternError),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Load(e) => write!(f, "{}", e),
            ScanError::Walk(e) => write!(f, "failed to walk files: {}", e),
            ScanError::GlobParse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScanError {}

impl From<LoadError> for ScanError {
    fn from(e: LoadError) -> Self {
        ScanError::Load(e)
    }
}

/// How one file resolved against the lint configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub enabled_rules: usize,
    /// Indices of the scoped overrides that apply, in declaration order.
    pub scopes: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct ResolveResult {
    pub files: Vec<FileReport>,
    pub ignored: Vec<PathBuf>,
}

/// Load the config and resolve every file under the target paths. Paths are
/// reported relative to the directory holding the config file.
pub fn resolve_files(config_path: &Path, targets: &[PathBuf]) -> Result<ResolveResult, ScanError> {
    let loaded = loader::load(config_path)?;
    resolve_with(&loaded.lint, &project_root(config_path), targets)
}

/// Resolve every file under the target paths against an already composed
/// config. Every path is made relative to `root` before it is resolved.
pub fn resolve_with(
    lint: &EffectiveLintConfig,
    root: &Path,
    targets: &[PathBuf],
) -> Result<ResolveResult, ScanError> {
    let mut files = Vec::new();
    for target in targets {
        files.extend(walk(root, target)?);
    }
    files.sort();
    files.dedup();

    let resolved: Vec<(PathBuf, Option<FileReport>)> = files
        .into_par_iter()
        .map(|path| {
            let report = lint.config_for_file(&path).map(|config| FileReport {
                path: path.clone(),
                enabled_rules: config.enabled_rules(),
                scopes: config.scopes,
            });
            (path, report)
        })
        .collect();

    let mut result = ResolveResult::default();
    for (path, report) in resolved {
        match report {
            Some(report) => result.files.push(report),
            None => result.ignored.push(path),
        }
    }
    debug!(
        root = %root.display(),
        files = result.files.len(),
        ignored = result.ignored.len(),
        "resolved files"
    );
    Ok(result)
}

/// Files under `root` matched by the theme's content globs, sorted.
pub fn content_files(config_path: &Path, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let loaded = loader::load(config_path)?;
    match_content(&loaded.content, root)
}

pub fn match_content(patterns: &[String], root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if patterns.is_empty() {
        warn!("no content globs configured");
        return Ok(Vec::new());
    }
    let set = paths::build_glob_set(patterns).map_err(ScanError::GlobParse)?;
    let mut files: Vec<PathBuf> = walk(root, root)?
        .into_iter()
        .filter(|rel| set.is_match(rel))
        .collect();
    files.sort();
    Ok(files)
}

/// The directory a config file's globs are written against.
pub fn project_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `path` relative to `root`. Both sides are canonicalized when they exist,
/// so `src`, `./src` and an absolute spelling agree. A path outside the root
/// comes back unchanged.
pub fn relative_to_root(root: &Path, path: &Path) -> PathBuf {
    let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let full = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    match full.strip_prefix(&root) {
        Ok(rel) => paths::normalize(rel),
        Err(_) => paths::normalize(path),
    }
}

/// Walk a target and return its file paths relative to `root`.
fn walk(root: &Path, target: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let canonical_root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let target = fs::canonicalize(target).unwrap_or_else(|_| target.to_path_buf());

    if target.is_file() {
        return Ok(vec![relative(&canonical_root, &target)]);
    }

    let mut files = Vec::new();
    for entry in WalkBuilder::new(&target).build() {
        let entry = entry.map_err(ScanError::Walk)?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        files.push(relative(&canonical_root, entry.path()));
    }
    Ok(files)
}

fn relative(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) => paths::normalize(rel),
        Err(_) => {
            debug!(path = %path.display(), "file outside the project root");
            paths::normalize(path)
        }
    }
}
