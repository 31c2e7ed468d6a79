use crate::config::{rule_set, RuleSet, RuleSetting, RuleSource, Severity};
use crate::lint::LintError;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;
use tracing::debug;

/// Named presets, each an ordered list of rule sets and nested preset references.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: IndexMap<String, Vec<RuleSource>>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the presets shipped by the js, typescript and vue plugins.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(
            "js/recommended",
            vec![RuleSource::Rules(rule_set([
                ("no-debugger", Severity::Error),
                ("no-dupe-keys", Severity::Error),
                ("no-empty", Severity::Error),
                ("no-undef", Severity::Error),
                ("no-unreachable", Severity::Error),
                ("no-unused-vars", Severity::Error),
            ]))],
        );

        // Core rules the type checker already covers.
        registry.register(
            "ts/eslint-recommended",
            vec![RuleSource::Rules(rule_set([
                ("no-dupe-class-members", Severity::Off),
                ("no-redeclare", Severity::Off),
                ("no-undef", Severity::Off),
                ("no-var", Severity::Error),
                ("prefer-const", Severity::Error),
            ]))],
        );
        registry.register(
            "ts/recommended",
            vec![
                RuleSource::Preset("ts/eslint-recommended".into()),
                RuleSource::Rules(rule_set([
                    ("@typescript-eslint/ban-ts-comment", Severity::Error),
                    ("@typescript-eslint/no-explicit-any", Severity::Error),
                    ("@typescript-eslint/no-unused-vars", Severity::Error),
                    ("no-unused-vars", Severity::Off),
                ])),
            ],
        );

        registry.register(
            "vue/flat/base",
            vec![RuleSource::Rules(rule_set([
                ("vue/comment-directive", Severity::Error),
                ("vue/jsx-uses-vars", Severity::Error),
            ]))],
        );
        registry.register(
            "vue/flat/essential",
            vec![
                RuleSource::Preset("vue/flat/base".into()),
                RuleSource::Rules(rule_set([
                    ("vue/multi-word-component-names", Severity::Error),
                    ("vue/no-mutating-props", Severity::Error),
                    ("vue/no-unused-vars", Severity::Error),
                    ("vue/valid-template-root", Severity::Error),
                ])),
            ],
        );
        registry.register(
            "vue/flat/strongly-recommended",
            vec![
                RuleSource::Preset("vue/flat/essential".into()),
                RuleSource::Rules(rule_set([
                    ("vue/attribute-hyphenation", RuleSetting::new(Severity::Warn)),
                    (
                        "vue/html-indent",
                        RuleSetting::with_options(Severity::Warn, vec![json!(2)]),
                    ),
                    (
                        "vue/max-attributes-per-line",
                        RuleSetting::new(Severity::Warn),
                    ),
                ])),
            ],
        );
        registry.register(
            "vue/flat/recommended",
            vec![
                RuleSource::Preset("vue/flat/strongly-recommended".into()),
                RuleSource::Rules(rule_set([
                    ("vue/attributes-order", Severity::Warn),
                    ("vue/order-in-components", Severity::Warn),
                ])),
            ],
        );

        registry
    }

    /// Add or replace a preset. Later registrations win.
    pub fn register(&mut self, name: impl Into<String>, items: Vec<RuleSource>) {
        let name = name.into();
        let key = normalize_preset_name(&name).unwrap_or(name);
        self.presets.insert(key, items);
    }

    pub fn get(&self, name: &str) -> Option<&[RuleSource]> {
        let name = normalize_preset_name(name)?;
        self.presets.get(name.as_str()).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Expand sources depth-first, left-to-right into the flat list of rule
    /// sets they stand for.
    pub fn expand<'a>(&'a self, sources: &'a [RuleSource]) -> Result<Vec<&'a RuleSet>, LintError> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        self.expand_into(sources, &mut stack, &mut out)?;
        Ok(out)
    }

    fn expand_into<'a>(
        &'a self,
        sources: &'a [RuleSource],
        stack: &mut Vec<String>,
        out: &mut Vec<&'a RuleSet>,
    ) -> Result<(), LintError> {
        for source in sources {
            match source {
                RuleSource::Rules(rules) => out.push(rules),
                RuleSource::Preset(raw) => {
                    let name = normalize_preset_name(raw)
                        .ok_or_else(|| LintError::UnresolvedPreset(raw.clone()))?;
                    if stack.contains(&name) {
                        let mut chain = stack.clone();
                        chain.push(name);
                        return Err(LintError::PresetCycle(chain));
                    }
                    let items = self
                        .presets
                        .get(name.as_str())
                        .ok_or_else(|| LintError::UnresolvedPreset(raw.clone()))?;
                    debug!(preset = %name, items = items.len(), "expanding preset");
                    stack.push(name);
                    self.expand_into(items, stack, out)?;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

fn preset_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:plugin:)?(?P<name>@?[\w.-]+(?:/[\w.-]+)*)$")
            .expect("preset name pattern compiles")
    })
}

/// Canonical form of a preset reference. The legacy `plugin:vue/recommended`
/// spelling maps to `vue/recommended`. Returns `None` for malformed names.
pub fn normalize_preset_name(raw: &str) -> Option<String> {
    preset_name_re()
        .captures(raw.trim())
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sets: &[&RuleSet]) -> Vec<String> {
        sets.iter().flat_map(|s| s.keys().cloned()).collect()
    }

    #[test]
    fn normalizes_legacy_spelling() {
        assert_eq!(
            normalize_preset_name("plugin:vue/flat/recommended").as_deref(),
            Some("vue/flat/recommended")
        );
        assert_eq!(
            normalize_preset_name("js/recommended").as_deref(),
            Some("js/recommended")
        );
        assert_eq!(
            normalize_preset_name("@scope/plugin/base").as_deref(),
            Some("@scope/plugin/base")
        );
        assert_eq!(normalize_preset_name("has space"), None);
        assert_eq!(normalize_preset_name("trailing/"), None);
    }

    #[test]
    fn nested_presets_expand_depth_first() {
        let registry = PresetRegistry::builtin();
        let sources = [RuleSource::Preset("vue/flat/recommended".into())];
        let sets = registry.expand(&sources).unwrap();
        assert_eq!(sets.len(), 4);
        let flat = names(&sets);
        assert_eq!(flat.first().map(String::as_str), Some("vue/comment-directive"));
        assert_eq!(flat.last().map(String::as_str), Some("vue/order-in-components"));
    }

    #[test]
    fn legacy_spelling_resolves() {
        let registry = PresetRegistry::builtin();
        assert!(registry.contains("plugin:ts/recommended"));
        assert!(!registry.contains("plugin:nonexistent/recommended"));
    }

    #[test]
    fn unknown_preset() {
        let registry = PresetRegistry::builtin();
        let sources = [RuleSource::Preset("nonexistent-preset".into())];
        let err = registry.expand(&sources).unwrap_err();
        assert!(matches!(err, LintError::UnresolvedPreset(ref n) if n == "nonexistent-preset"));
    }

    #[test]
    fn malformed_name_is_unresolved() {
        let registry = PresetRegistry::builtin();
        let sources = [RuleSource::Preset("not a preset!".into())];
        assert!(matches!(
            registry.expand(&sources),
            Err(LintError::UnresolvedPreset(_))
        ));
    }

    #[test]
    fn cycle_detected() {
        let mut registry = PresetRegistry::new();
        registry.register("a", vec![RuleSource::Preset("b".into())]);
        registry.register("b", vec![RuleSource::Preset("a".into())]);
        let sources = [RuleSource::Preset("a".into())];
        let err = registry.expand(&sources).unwrap_err();
        match err {
            LintError::PresetCycle(chain) => assert_eq!(chain, ["a", "b", "a"]),
            other => panic!("expected PresetCycle, got {:?}", other),
        }
    }

    #[test]
    fn same_preset_twice_is_not_a_cycle() {
        let mut registry = PresetRegistry::new();
        registry.register("base", vec![RuleSource::Rules(rule_set([("semi", Severity::Error)]))]);
        registry.register(
            "both",
            vec![
                RuleSource::Preset("base".into()),
                RuleSource::Preset("base".into()),
            ],
        );
        let sources = [RuleSource::Preset("both".into())];
        assert_eq!(registry.expand(&sources).unwrap().len(), 2);
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = PresetRegistry::new();
        registry.register("p", vec![]);
        registry.register("p", vec![RuleSource::Rules(RuleSet::new())]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("p").map(<[RuleSource]>::len), Some(1));
    }
}
