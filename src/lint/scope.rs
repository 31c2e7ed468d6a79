use crate::config::{RuleSet, ScopedOverride};
use crate::lint::{fold, LintError, PresetRegistry};
use crate::paths;
use globset::GlobSet;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// A scoped override with its own folded rule table and compiled globs.
#[derive(Debug, Clone)]
pub struct ResolvedOverride {
    pub files: Vec<String>,
    pub ignores: Vec<String>,
    pub rules: RuleSet,
    pub language_options: Option<Value>,
    matcher: GlobSet,
    ignore_matcher: GlobSet,
}

impl ResolvedOverride {
    /// Fold the entries declared inside `scope`. Nothing from outside the
    /// scope takes part.
    pub fn resolve(scope: &ScopedOverride, registry: &PresetRegistry) -> Result<Self, LintError> {
        if scope.files.is_empty() {
            return Err(LintError::EmptyScope);
        }
        let matcher = paths::build_glob_set(&scope.files)?;
        let ignore_matcher = paths::build_glob_set(&scope.ignores)?;

        let sets = registry.expand(&scope.sources)?;
        let rules = fold(sets);
        debug!(files = ?scope.files, rules = rules.len(), "resolved scoped override");

        Ok(Self {
            files: scope.files.clone(),
            ignores: scope.ignores.clone(),
            rules,
            language_options: scope.language_options.clone(),
            matcher,
            ignore_matcher,
        })
    }

    /// True if `path` (relative to the project root) falls inside this scope.
    pub fn matches(&self, path: &Path) -> bool {
        let path = paths::normalize(path);
        paths::matches_path_or_name(&self.matcher, &path)
            && !paths::matches_path_or_ancestor(&self.ignore_matcher, &path)
    }
}

/// Merge `overlay` into `target`: objects merge key by key, recursively;
/// any other value replaces what was there.
pub fn merge_value(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        existing.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}
