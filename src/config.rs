use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Severity a lint rule is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Off,
    Warn,
    Error,
}

impl Severity {
    /// Parse a severity from its string (`"off"`, `"warn"`, `"error"`) or
    /// numeric (`0`, `1`, `2`) spelling.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => match s.to_lowercase().as_str() {
                "off" => Some(Severity::Off),
                "warn" | "warning" => Some(Severity::Warn),
                "error" => Some(Severity::Error),
                _ => None,
            },
            Value::Number(n) => match n.as_u64() {
                Some(0) => Some(Severity::Off),
                Some(1) => Some(Severity::Warn),
                Some(2) => Some(Severity::Error),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    pub fn is_enabled(self) -> bool {
        self != Severity::Off
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule's severity plus the options payload handed to the rule verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    pub severity: Severity,
    pub options: Vec<Value>,
}

impl RuleSetting {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    pub fn with_options(severity: Severity, options: Vec<Value>) -> Self {
        Self { severity, options }
    }

    /// Parse a setting written as `"error"`, `2`, or `["error", ...options]`.
    ///
    /// On failure the returned string describes what was wrong with the value.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Array(items) => {
                let (first, rest) = items
                    .split_first()
                    .ok_or_else(|| "empty setting array".to_string())?;
                let severity = Severity::from_value(first)
                    .ok_or_else(|| format!("unknown severity {}", first))?;
                Ok(Self::with_options(severity, rest.to_vec()))
            }
            other => Severity::from_value(other)
                .map(Self::new)
                .ok_or_else(|| format!("unknown severity {}", other)),
        }
    }

    /// Render in the shape linters accept: a bare severity, or an array when
    /// options are present.
    pub fn to_value(&self) -> Value {
        if self.options.is_empty() {
            return Value::String(self.severity.as_str().into());
        }
        let mut items = Vec::with_capacity(self.options.len() + 1);
        items.push(Value::String(self.severity.as_str().into()));
        items.extend(self.options.iter().cloned());
        Value::Array(items)
    }
}

impl From<Severity> for RuleSetting {
    fn from(severity: Severity) -> Self {
        Self::new(severity)
    }
}

/// Ordered mapping from rule name to its setting.
pub type RuleSet = IndexMap<String, RuleSetting>;

/// Build a [`RuleSet`] from `(name, setting)` pairs, keeping their order.
pub fn rule_set<I, K, S>(pairs: I) -> RuleSet
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<RuleSetting>,
{
    pairs
        .into_iter()
        .map(|(name, setting)| (name.into(), setting.into()))
        .collect()
}

/// One item of a preset or a scope: literal rules, or a reference to a preset.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSource {
    Rules(RuleSet),
    Preset(String),
}

/// Rules restricted to files matching `files` and not matching `ignores`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScopedOverride {
    pub files: Vec<String>,
    pub ignores: Vec<String>,
    pub sources: Vec<RuleSource>,
    /// Nested parser configuration passed through to the linter.
    pub language_options: Option<Value>,
}

/// One entry of a configuration sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEntry {
    /// Applies to every file that is not globally ignored.
    Global(RuleSource),
    Scoped(ScopedOverride),
    /// Paths that get no configuration at all.
    Ignores(Vec<String>),
}

impl ConfigEntry {
    pub fn rules(rules: RuleSet) -> Self {
        ConfigEntry::Global(RuleSource::Rules(rules))
    }

    pub fn preset(name: impl Into<String>) -> Self {
        ConfigEntry::Global(RuleSource::Preset(name.into()))
    }
}
