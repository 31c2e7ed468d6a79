//! Properties that must hold for any configuration sequence or token table.

use configstack::config::{ConfigEntry, RuleSet, RuleSetting, RuleSource, ScopedOverride, Severity};
use configstack::lint::{compose, LintError, PresetRegistry};
use configstack::theme::{self, TokenGroup, TokenTable, TokenValue};
use proptest::prelude::*;
use std::collections::HashMap;
use std::path::Path;

const RULES: [&str; 6] = ["semi", "quotes", "eol-last", "no-var", "prefer-const", "vue/html-indent"];

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Off), Just(Severity::Warn), Just(Severity::Error)]
}

fn setting() -> impl Strategy<Value = RuleSetting> {
    (severity(), proptest::option::of(0u8..4)).prop_map(|(sev, opt)| match opt {
        Some(n) => RuleSetting::with_options(sev, vec![serde_json::json!(n)]),
        None => RuleSetting::new(sev),
    })
}

fn rule_set() -> impl Strategy<Value = RuleSet> {
    proptest::collection::vec((0..RULES.len(), setting()), 0..6)
        .prop_map(|pairs| pairs.into_iter().map(|(i, s)| (RULES[i].to_string(), s)).collect())
}

fn token_group() -> impl Strategy<Value = TokenGroup> {
    proptest::collection::vec(("[a-z0-9]{1,4}", "#[0-9a-f]{6}"), 0..5).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(k, v)| (k, TokenValue::Literal(v)))
            .collect()
    })
}

fn token_table() -> impl Strategy<Value = TokenTable> {
    proptest::collection::vec(("[a-zA-Z]{1,8}", token_group()), 0..4).prop_map(|cats| {
        let mut table = TokenTable::new();
        for (name, group) in cats {
            table.insert_category(name, group);
        }
        table
    })
}

proptest! {
    #[test]
    fn right_most_setting_wins(sets in proptest::collection::vec(rule_set(), 0..8)) {
        let sequence: Vec<_> = sets.iter().cloned().map(ConfigEntry::rules).collect();
        let config = compose(&sequence, &PresetRegistry::new()).unwrap();

        let mut expected: HashMap<&str, &RuleSetting> = HashMap::new();
        for set in &sets {
            for (name, setting) in set {
                expected.insert(name.as_str(), setting);
            }
        }

        prop_assert_eq!(config.rules.len(), expected.len());
        for (name, setting) in &config.rules {
            prop_assert_eq!(Some(&setting), expected.get(name.as_str()));
        }
    }

    #[test]
    fn preset_matches_manual_inlining(
        parts in proptest::collection::vec(rule_set(), 1..5),
        extra in rule_set(),
    ) {
        let mut registry = PresetRegistry::new();
        registry.register("local/a", parts.iter().cloned().map(RuleSource::Rules).collect());

        let with_preset = [ConfigEntry::preset("local/a"), ConfigEntry::rules(extra.clone())];
        let mut inlined: Vec<_> = parts.iter().cloned().map(ConfigEntry::rules).collect();
        inlined.push(ConfigEntry::rules(extra));

        let a = compose(&with_preset, &registry).unwrap();
        let b = compose(&inlined, &registry).unwrap();
        prop_assert_eq!(a.rules, b.rules);
    }

    #[test]
    fn scopes_never_touch_global_table(
        global in proptest::collection::vec(rule_set(), 0..4),
        scoped in proptest::collection::vec(rule_set(), 0..4),
    ) {
        let plain: Vec<_> = global.iter().cloned().map(ConfigEntry::rules).collect();
        let mut with_scope = plain.clone();
        with_scope.insert(0, ConfigEntry::Scoped(ScopedOverride {
            files: vec!["**/*.vue".into()],
            sources: scoped.iter().cloned().map(RuleSource::Rules).collect(),
            ..Default::default()
        }));

        let registry = PresetRegistry::new();
        let a = compose(&plain, &registry).unwrap();
        let b = compose(&with_scope, &registry).unwrap();
        prop_assert_eq!(&a.rules, &b.rules);

        let scope_keys: std::collections::HashSet<&String> =
            scoped.iter().flat_map(|s| s.keys()).collect();
        for key in b.overrides[0].rules.keys() {
            prop_assert!(scope_keys.contains(key));
        }
    }

    #[test]
    fn trailing_global_entry_wins_inside_scopes(
        before in proptest::collection::vec(rule_set(), 0..3),
        scoped in proptest::collection::vec(rule_set(), 0..4),
        last in rule_set(),
    ) {
        let mut sequence: Vec<_> = before.iter().cloned().map(ConfigEntry::rules).collect();
        sequence.push(ConfigEntry::Scoped(ScopedOverride {
            files: vec!["**/*.vue".into()],
            sources: scoped.iter().cloned().map(RuleSource::Rules).collect(),
            ..Default::default()
        }));
        sequence.push(ConfigEntry::rules(last.clone()));

        let config = compose(&sequence, &PresetRegistry::new()).unwrap();
        let file = config.config_for_file(Path::new("src/App.vue")).unwrap();
        prop_assert_eq!(&file.scopes, &vec![0usize]);
        for (name, setting) in &last {
            prop_assert_eq!(&file.rules[name], setting);
        }
    }

    #[test]
    fn empty_layers_leave_base_untouched(base in token_table()) {
        let out = theme::compose(&base, &TokenTable::new(), &TokenTable::new()).unwrap();
        prop_assert_eq!(out, base);
    }

    #[test]
    fn replace_category_is_verbatim(
        base in token_table(),
        extend in token_table(),
        group in token_group(),
    ) {
        prop_assume!(!group.is_empty());
        let replace = TokenTable::new().with_category("colors", group.clone());
        let out = theme::compose(&base, &extend, &replace).unwrap();
        prop_assert_eq!(out.category("colors"), Some(&group));
    }
}

#[test]
fn unknown_preset_fails_whole_sequence() {
    let sequence = [
        ConfigEntry::rules([("semi".to_string(), RuleSetting::new(Severity::Error))].into_iter().collect()),
        ConfigEntry::preset("nonexistent-preset"),
    ];
    let result = compose(&sequence, &PresetRegistry::builtin());
    assert!(matches!(result, Err(LintError::UnresolvedPreset(ref n)) if n == "nonexistent-preset"));
}

#[test]
fn global_off_after_scope_is_final() {
    let sequence = [
        ConfigEntry::preset("vue/flat/recommended"),
        ConfigEntry::Scoped(ScopedOverride {
            files: vec!["*.vue".into(), "**/*.vue".into()],
            sources: vec![RuleSource::Rules(
                [("vue/multi-word-component-names".to_string(), RuleSetting::new(Severity::Error))]
                    .into_iter()
                    .collect(),
            )],
            ..Default::default()
        }),
        ConfigEntry::rules(
            [("vue/multi-word-component-names".to_string(), RuleSetting::new(Severity::Off))]
                .into_iter()
                .collect(),
        ),
    ];
    let config = compose(&sequence, &PresetRegistry::builtin()).unwrap();
    let file = config
        .config_for_file(Path::new("src/components/Kaleidoscope.vue"))
        .unwrap();
    assert_eq!(file.scopes, [0]);
    assert_eq!(file.rules["vue/multi-word-component-names"].severity, Severity::Off);
    assert_eq!(config.rules["vue/multi-word-component-names"].severity, Severity::Off);
}
