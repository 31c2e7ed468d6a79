//! Theme token composition.
//!
//! For every category: a non-empty replace layer wins outright; otherwise the
//! extend layer is overlaid on the base key by key. Nested groups (a color
//! family, say) are overlaid recursively by the same rule.

pub mod defaults;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// A token is a nested group in one layer and a plain value in another.
    /// A literal against a list is not a conflict: both are leaves, and the
    /// later layer replaces the earlier one.
    TokenTypeConflict { path: String },
    InvalidToken { path: String, reason: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::TokenTypeConflict { path } => write!(
                f,
                "token '{}' is a group in one layer and a value in another",
                path
            ),
            ThemeError::InvalidToken { path, reason } => {
                write!(f, "invalid token '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for ThemeError {}

/// A single design token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Literal(String),
    /// An ordered stack of values, e.g. a font family fallback list.
    List(Vec<String>),
    Group(TokenGroup),
}

pub type TokenGroup = IndexMap<String, TokenValue>;

impl TokenValue {
    pub fn literal(value: impl Into<String>) -> Self {
        TokenValue::Literal(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenValue::List(values.into_iter().map(Into::into).collect())
    }

    pub fn group<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, TokenValue)>,
        K: Into<String>,
    {
        TokenValue::Group(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_group(&self) -> bool {
        matches!(self, TokenValue::Group(_))
    }

    /// Parse a token from a config value. `path` is only used in errors.
    pub fn from_value(path: &str, value: &Value) -> Result<Self, ThemeError> {
        match value {
            Value::String(s) => Ok(TokenValue::Literal(s.clone())),
            Value::Number(n) => Ok(TokenValue::Literal(n.to_string())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    other => Err(ThemeError::InvalidToken {
                        path: path.to_string(),
                        reason: format!("list entries must be strings or numbers, got {}", other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(TokenValue::List),
            Value::Object(map) => map
                .iter()
                .map(|(key, v)| {
                    TokenValue::from_value(&format!("{}.{}", path, key), v).map(|t| (key.clone(), t))
                })
                .collect::<Result<TokenGroup, _>>()
                .map(TokenValue::Group),
            other => Err(ThemeError::InvalidToken {
                path: path.to_string(),
                reason: format!("unsupported value {}", other),
            }),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            TokenValue::Literal(s) => Value::String(s.clone()),
            TokenValue::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
            TokenValue::Group(group) => group_to_value(group),
        }
    }
}

fn group_to_value(group: &TokenGroup) -> Value {
    Value::Object(group.iter().map(|(k, v)| (k.clone(), v.to_value())).collect())
}

/// Mapping from category (`colors`, `fontFamily`, ...) to its tokens.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenTable {
    categories: IndexMap<String, TokenGroup>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{ category: { token: value, ... }, ... }`.
    pub fn from_value(value: &Value) -> Result<Self, ThemeError> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(ThemeError::InvalidToken {
                    path: String::new(),
                    reason: format!("expected a table of categories, got {}", other),
                })
            }
        };

        let mut table = Self::new();
        for (category, tokens) in map {
            match TokenValue::from_value(category, tokens)? {
                TokenValue::Group(group) => table.insert_category(category.clone(), group),
                _ => {
                    return Err(ThemeError::InvalidToken {
                        path: category.clone(),
                        reason: "a category must be a table of tokens".into(),
                    })
                }
            }
        }
        Ok(table)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.categories
                .iter()
                .map(|(name, group)| (name.clone(), group_to_value(group)))
                .collect(),
        )
    }

    pub fn insert_category(&mut self, name: impl Into<String>, group: TokenGroup) {
        self.categories.insert(name.into(), group);
    }

    pub fn with_category(mut self, name: impl Into<String>, group: TokenGroup) -> Self {
        self.insert_category(name, group);
        self
    }

    pub fn category(&self, name: &str) -> Option<&TokenGroup> {
        self.categories.get(name)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &TokenGroup)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look a token up by dotted path, e.g. `colors.gray.100`.
    pub fn lookup(&self, path: &str) -> Option<&TokenValue> {
        let mut parts = path.split('.');
        let mut group = self.categories.get(parts.next()?)?;
        let mut current = group.get(parts.next()?)?;
        for part in parts {
            group = match current {
                TokenValue::Group(g) => g,
                _ => return None,
            };
            current = group.get(part)?;
        }
        Some(current)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Compose base, extend and replace layers into the effective token table.
///
/// Categories appear in first-seen order across base, extend, replace.
pub fn compose(
    base: &TokenTable,
    extend: &TokenTable,
    replace: &TokenTable,
) -> Result<TokenTable, ThemeError> {
    let mut names: Vec<&str> = Vec::new();
    for (name, _) in base.categories().chain(extend.categories()).chain(replace.categories()) {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    let mut result = TokenTable::new();
    for name in names {
        // An explicitly empty replace category is a placeholder, not a wipe.
        if let Some(group) = replace.category(name).filter(|g| !g.is_empty()) {
            debug!(category = name, tokens = group.len(), "category replaced");
            result.insert_category(name, group.clone());
            continue;
        }

        let mut merged = base.category(name).cloned().unwrap_or_default();
        if let Some(layer) = extend.category(name) {
            overlay(&mut merged, layer, name)?;
            debug!(category = name, tokens = layer.len(), "category extended");
        }
        result.insert_category(name, merged);
    }

    Ok(result)
}

fn overlay(target: &mut TokenGroup, layer: &TokenGroup, path: &str) -> Result<(), ThemeError> {
    for (key, value) in layer {
        let key_path = format!("{}.{}", path, key);
        match target.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(value.clone());
            }
            Entry::Occupied(mut slot) => match (slot.get_mut(), value) {
                (TokenValue::Group(existing), TokenValue::Group(incoming)) => {
                    overlay(existing, incoming, &key_path)?;
                }
                (existing, incoming) if existing.is_group() || incoming.is_group() => {
                    return Err(ThemeError::TokenTypeConflict { path: key_path });
                }
                (existing, incoming) => {
                    trace!(token = %key_path, "token overridden");
                    *existing = incoming.clone();
                }
            },
        }
    }
    Ok(())
}
