//! Lint configuration composition.
//!
//! A configuration sequence is folded left to right into one global rule
//! table: presets are expanded in place, and for every rule the right-most
//! setting wins outright (options included). Scoped overrides are folded on
//! their own and kept in declaration order; they only come into play when a
//! concrete file is resolved with [`EffectiveLintConfig::config_for_file`].

pub mod preset;
pub mod scope;

pub use preset::PresetRegistry;
pub use scope::ResolvedOverride;

use crate::config::{ConfigEntry, RuleSet, RuleSetting};
use crate::paths::{self, PatternError};
use globset::GlobSet;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::{debug, trace};

/// Why a configuration sequence could not be composed.
#[derive(Debug)]
pub enum LintError {
    UnresolvedPreset(String),
    InvalidScopePattern(PatternError),
    EmptyScope,
    PresetCycle(Vec<String>),
    InvalidRuleSetting { rule: String, reason: String },
    InvalidEntry { index: usize, reason: String },
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintError::UnresolvedPreset(name) => write!(f, "unresolved preset '{}'", name),
            LintError::InvalidScopePattern(e) => write!(f, "invalid scope pattern: {}", e),
            LintError::EmptyScope => write!(f, "scoped override has no file patterns"),
            LintError::PresetCycle(chain) => {
                write!(f, "preset cycle: {}", chain.join(" -> "))
            }
            LintError::InvalidRuleSetting { rule, reason } => {
                write!(f, "invalid setting for rule '{}': {}", rule, reason)
            }
            LintError::InvalidEntry { index, reason } => {
                write!(f, "invalid lint entry #{}: {}", index + 1, reason)
            }
        }
    }
}

impl std::error::Error for LintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LintError::InvalidScopePattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PatternError> for LintError {
    fn from(e: PatternError) -> Self {
        LintError::InvalidScopePattern(e)
    }
}

/// The composed lint configuration handed to the linting engine.
#[derive(Debug, Clone)]
pub struct EffectiveLintConfig {
    pub rules: RuleSet,
    pub overrides: Vec<ResolvedOverride>,
    ignores: Vec<String>,
    ignore_set: GlobSet,
    layers: Vec<Layer>,
}

/// One step of the per-file fold, kept in declaration order.
#[derive(Debug, Clone)]
enum Layer {
    /// A contiguous run of global entries, already folded.
    Global(RuleSet),
    /// Index into `overrides`.
    Scope(usize),
}

/// Configuration that applies to one concrete file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileConfig {
    pub rules: RuleSet,
    pub language_options: Option<Value>,
    /// Indices into [`EffectiveLintConfig::overrides`] that matched, in order.
    pub scopes: Vec<usize>,
}

impl FileConfig {
    pub fn enabled_rules(&self) -> usize {
        self.rules.values().filter(|s| s.severity.is_enabled()).count()
    }
}

impl EffectiveLintConfig {
    pub fn ignores(&self) -> &[String] {
        &self.ignores
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        paths::matches_path_or_ancestor(&self.ignore_set, &paths::normalize(path))
    }

    /// Resolve the configuration for a path relative to the project root.
    ///
    /// Returns `None` for globally ignored paths. Otherwise global entries
    /// and matching scopes are folded in declaration order, so a global entry
    /// declared after a scope overrides it.
    pub fn config_for_file(&self, path: &Path) -> Option<FileConfig> {
        if self.is_ignored(path) {
            return None;
        }

        let mut rules = RuleSet::new();
        let mut language_options: Option<Value> = None;
        let mut scopes = Vec::new();

        for layer in &self.layers {
            match layer {
                Layer::Global(set) => overlay(&mut rules, set),
                Layer::Scope(idx) => {
                    let resolved = &self.overrides[*idx];
                    if !resolved.matches(path) {
                        continue;
                    }
                    scopes.push(*idx);
                    overlay(&mut rules, &resolved.rules);
                    if let Some(ref opts) = resolved.language_options {
                        let merged =
                            language_options.get_or_insert_with(|| Value::Object(Default::default()));
                        scope::merge_value(merged, opts);
                    }
                }
            }
        }

        Some(FileConfig {
            rules,
            language_options,
            scopes,
        })
    }
}

/// Compose a configuration sequence. Any error aborts the whole composition.
pub fn compose(
    sequence: &[ConfigEntry],
    registry: &PresetRegistry,
) -> Result<EffectiveLintConfig, LintError> {
    let mut run: Vec<&RuleSet> = Vec::new();
    let mut layers = Vec::new();
    let mut overrides = Vec::new();
    let mut ignores = Vec::new();

    for entry in sequence {
        match entry {
            ConfigEntry::Global(source) => {
                run.extend(registry.expand(std::slice::from_ref(source))?);
            }
            ConfigEntry::Scoped(scope) => {
                if !run.is_empty() {
                    layers.push(Layer::Global(fold(run.drain(..))));
                }
                layers.push(Layer::Scope(overrides.len()));
                overrides.push(ResolvedOverride::resolve(scope, registry)?);
            }
            ConfigEntry::Ignores(patterns) => ignores.extend(patterns.iter().cloned()),
        }
    }
    if !run.is_empty() {
        layers.push(Layer::Global(fold(run)));
    }

    let ignore_set = paths::build_glob_set(&ignores)?;
    let rules = fold(layers.iter().filter_map(|layer| match layer {
        Layer::Global(set) => Some(set),
        Layer::Scope(_) => None,
    }));
    debug!(
        rules = rules.len(),
        overrides = overrides.len(),
        ignores = ignores.len(),
        "composed lint configuration"
    );

    Ok(EffectiveLintConfig {
        rules,
        overrides,
        ignores,
        ignore_set,
        layers,
    })
}

/// Fold rule sets left to right; the last setting seen for a rule wins.
pub fn fold<'a, I>(sets: I) -> RuleSet
where
    I: IntoIterator<Item = &'a RuleSet>,
{
    let mut table = RuleSet::new();
    for set in sets {
        overlay(&mut table, set);
    }
    table
}

fn overlay(table: &mut RuleSet, set: &RuleSet) {
    for (name, setting) in set {
        if let Some(previous) = table.insert(name.clone(), setting.clone()) {
            if previous != *setting {
                trace!(rule = %name, from = %previous.severity, to = %setting.severity, "rule overridden");
            }
        }
    }
}

/// Parse raw `name -> value` pairs as written in a config document.
pub fn parse_rule_set(raw: &IndexMap<String, Value>) -> Result<RuleSet, LintError> {
    raw.iter()
        .map(|(name, value)| {
            RuleSetting::from_value(value)
                .map(|setting| (name.clone(), setting))
                .map_err(|reason| LintError::InvalidRuleSetting {
                    rule: name.clone(),
                    reason,
                })
        })
        .collect()
}
