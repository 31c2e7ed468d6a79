use crate::config::{ConfigEntry, RuleSource, ScopedOverride};
use crate::lint::{parse_rule_set, LintError};
use crate::theme::{ThemeError, TokenTable};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Top-level config document structure (`configstack.toml` or `.json`).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    #[serde(default)]
    pub configstack: ProjectSection,
    #[serde(default)]
    pub preset: Vec<DocPreset>,
    #[serde(default)]
    pub lint: Vec<DocLintEntry>,
    #[serde(default)]
    pub theme: DocTheme,
}

/// The `[configstack]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    pub name: Option<String>,
    /// Start from the built-in presets and theme tokens.
    #[serde(default = "default_true")]
    pub defaults: bool,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: None,
            defaults: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A `[[preset]]` declared by the project itself.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocPreset {
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub rules: IndexMap<String, Value>,
}

impl DocPreset {
    pub fn to_sources(&self) -> Result<Vec<RuleSource>, LintError> {
        let mut sources: Vec<RuleSource> = self
            .extends
            .iter()
            .map(|name| RuleSource::Preset(name.clone()))
            .collect();
        if !self.rules.is_empty() {
            sources.push(RuleSource::Rules(parse_rule_set(&self.rules)?));
        }
        Ok(sources)
    }
}

/// A single `[[lint]]` entry.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocLintEntry {
    pub files: Option<Vec<String>>,
    pub ignores: Option<Vec<String>>,
    pub preset: Option<String>,
    #[serde(default)]
    pub extends: Vec<String>,
    pub rules: Option<IndexMap<String, Value>>,
    #[serde(alias = "languageOptions")]
    pub language_options: Option<Value>,
}

impl DocLintEntry {
    fn sources(&self) -> Result<Vec<RuleSource>, LintError> {
        let mut sources = Vec::new();
        if let Some(ref name) = self.preset {
            sources.push(RuleSource::Preset(name.clone()));
        }
        sources.extend(self.extends.iter().map(|name| RuleSource::Preset(name.clone())));
        if let Some(ref rules) = self.rules {
            sources.push(RuleSource::Rules(parse_rule_set(rules)?));
        }
        Ok(sources)
    }

    /// Convert to core entries. `index` is the entry's position, for errors.
    pub fn to_entries(&self, index: usize) -> Result<Vec<ConfigEntry>, LintError> {
        let invalid = |reason: &str| LintError::InvalidEntry {
            index,
            reason: reason.to_string(),
        };

        if let Some(ref files) = self.files {
            return Ok(vec![ConfigEntry::Scoped(ScopedOverride {
                files: files.clone(),
                ignores: self.ignores.clone().unwrap_or_default(),
                sources: self.sources()?,
                language_options: self.language_options.clone(),
            })]);
        }

        if self.language_options.is_some() {
            return Err(invalid("language_options needs a files list"));
        }

        let sources = self.sources()?;
        match self.ignores {
            Some(ref patterns) if sources.is_empty() => {
                Ok(vec![ConfigEntry::Ignores(patterns.clone())])
            }
            Some(_) => Err(invalid("global ignores cannot be combined with rules")),
            None if sources.is_empty() => Err(invalid("entry has no rules, preset, files or ignores")),
            None => Ok(sources.into_iter().map(ConfigEntry::Global).collect()),
        }
    }
}

/// The `[theme]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocTheme {
    /// Source files the utility generator scans for class names.
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub extend: Value,
    #[serde(default)]
    pub replace: Value,
}

impl DocTheme {
    pub fn extend_layer(&self) -> Result<TokenTable, ThemeError> {
        TokenTable::from_value(&self.extend)
    }

    pub fn replace_layer(&self) -> Result<TokenTable, ThemeError> {
        TokenTable::from_value(&self.replace)
    }
}

impl ConfigDocument {
    /// The lint entries as one flat configuration sequence.
    pub fn lint_sequence(&self) -> Result<Vec<ConfigEntry>, LintError> {
        let mut sequence = Vec::new();
        for (index, entry) in self.lint.iter().enumerate() {
            sequence.extend(entry.to_entries(index)?);
        }
        Ok(sequence)
    }
}
