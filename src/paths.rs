use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A glob pattern that failed to compile.
#[derive(Debug)]
pub struct PatternError {
    pub pattern: String,
    pub source: globset::Error,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid glob pattern '{}': {}", self.pattern, self.source)
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Compile patterns into one set. A leading `./` is dropped so patterns
/// written relative to the project root match relative paths.
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet, PatternError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let trimmed = pattern.strip_prefix("./").unwrap_or(pattern);
        let glob = Glob::new(trimmed).map_err(|source| PatternError {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| PatternError {
        pattern: patterns.join(", "),
        source,
    })
}

/// Drop `.` components so `./src/App.vue` and `src/App.vue` match alike.
pub fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// True if the set matches the path itself or its bare file name.
pub fn matches_path_or_name(set: &GlobSet, path: &Path) -> bool {
    if set.is_match(path) {
        return true;
    }
    path.file_name().is_some_and(|name| set.is_match(name))
}

/// True if the set matches the path or any of its leading directories, so an
/// ignore of `dist` covers everything below `dist/`.
pub fn matches_path_or_ancestor(set: &GlobSet, path: &Path) -> bool {
    if matches_path_or_name(set, path) {
        return true;
    }
    path.ancestors()
        .skip(1)
        .filter(|p| !p.as_os_str().is_empty())
        .any(|p| set.is_match(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> GlobSet {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        build_glob_set(&owned).unwrap()
    }

    #[test]
    fn leading_dot_slash_is_ignored() {
        let gs = set(&["./src/**/*.{js,ts,vue}"]);
        assert!(gs.is_match("src/components/App.vue"));
        assert!(gs.is_match("src/main.ts"));
        assert!(!gs.is_match("src/style.css"));
    }

    #[test]
    fn file_name_fallback() {
        let gs = set(&["*.vue"]);
        assert!(matches_path_or_name(&gs, Path::new("src/App.vue")));
        assert!(!matches_path_or_name(&gs, Path::new("src/main.ts")));
    }

    #[test]
    fn ancestor_match() {
        let gs = set(&["dist"]);
        assert!(matches_path_or_ancestor(&gs, Path::new("dist/assets/app.js")));
        assert!(matches_path_or_ancestor(&gs, Path::new("dist")));
        assert!(!matches_path_or_ancestor(&gs, Path::new("src/dist.ts")));
    }

    #[test]
    fn normalize_strips_cur_dir() {
        assert_eq!(normalize(Path::new("./src/./App.vue")), PathBuf::from("src/App.vue"));
    }

    #[test]
    fn malformed_pattern_reports_original_text() {
        let err = build_glob_set(&["src/[".to_string()]).unwrap_err();
        assert_eq!(err.pattern, "src/[");
        assert!(err.to_string().contains("src/["));
    }
}
