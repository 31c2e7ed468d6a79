use crate::cli::toml_config::ConfigDocument;
use crate::lint::{self, EffectiveLintConfig, LintError, PresetRegistry};
use crate::theme::{self, defaults, ThemeError, TokenTable};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Why a config document could not be read, parsed or composed.
#[derive(Debug)]
pub enum LoadError {
    Read(std::io::Error),
    ParseToml(toml::de::Error),
    ParseJson(serde_json::Error),
    UnsupportedFormat(PathBuf),
    Lint(LintError),
    Theme(ThemeError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Read(e) => write!(f, "failed to read config: {}", e),
            LoadError::ParseToml(e) => write!(f, "failed to parse config: {}", e),
            LoadError::ParseJson(e) => write!(f, "failed to parse config: {}", e),
            LoadError::UnsupportedFormat(p) => {
                write!(f, "unsupported config format: {} (expected .toml or .json)", p.display())
            }
            LoadError::Lint(e) => write!(f, "lint config: {}", e),
            LoadError::Theme(e) => write!(f, "theme config: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<LintError> for LoadError {
    fn from(e: LintError) -> Self {
        LoadError::Lint(e)
    }
}

impl From<ThemeError> for LoadError {
    fn from(e: ThemeError) -> Self {
        LoadError::Theme(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(DocumentFormat::Toml),
            Some("json") => Ok(DocumentFormat::Json),
            _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Everything a project's config document composes to.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub name: Option<String>,
    pub registry: PresetRegistry,
    pub lint: EffectiveLintConfig,
    pub theme: TokenTable,
    pub content: Vec<String>,
}

/// Read, parse and compose a config document.
pub fn load(path: &Path) -> Result<LoadedConfig, LoadError> {
    let format = DocumentFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(LoadError::Read)?;
    let document = parse_document(&text, format)?;
    let loaded = build(&document)?;
    info!(
        config = %path.display(),
        rules = loaded.lint.rules.len(),
        overrides = loaded.lint.overrides.len(),
        categories = loaded.theme.len(),
        "loaded configuration"
    );
    Ok(loaded)
}

pub fn parse_document(text: &str, format: DocumentFormat) -> Result<ConfigDocument, LoadError> {
    match format {
        DocumentFormat::Toml => toml::from_str(text).map_err(LoadError::ParseToml),
        DocumentFormat::Json => serde_json::from_str(text).map_err(LoadError::ParseJson),
    }
}

/// Compose a parsed document. Fails as a whole on the first error.
pub fn build(document: &ConfigDocument) -> Result<LoadedConfig, LoadError> {
    let use_defaults = document.configstack.defaults;

    let mut registry = if use_defaults {
        PresetRegistry::builtin()
    } else {
        PresetRegistry::new()
    };
    for preset in &document.preset {
        registry.register(preset.name.clone(), preset.to_sources()?);
    }

    let sequence = document.lint_sequence()?;
    let lint = lint::compose(&sequence, &registry)?;

    let base = if use_defaults {
        defaults::builtin()
    } else {
        TokenTable::new()
    };
    let extend = document.theme.extend_layer()?;
    let replace = document.theme.replace_layer()?;
    let theme = theme::compose(&base, &extend, &replace)?;

    Ok(LoadedConfig {
        name: document.configstack.name.clone(),
        registry,
        lint,
        theme,
        content: document.theme.content.clone(),
    })
}
