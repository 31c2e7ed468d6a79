use crate::config::{RuleSet, Severity};
use crate::lint::{EffectiveLintConfig, FileConfig};
use crate::scan::ResolveResult;
use crate::theme::{TokenGroup, TokenTable, TokenValue};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warn => "\x1b[33mwarn \x1b[0m",
        Severity::Off => "\x1b[90moff  \x1b[0m",
    }
}

fn print_rules(rules: &RuleSet, indent: &str) {
    if rules.is_empty() {
        println!("{}\x1b[90m(no rules)\x1b[0m", indent);
        return;
    }
    for (name, setting) in rules {
        if setting.options.is_empty() {
            println!("{}{} {}", indent, severity_label(setting.severity), name);
        } else {
            let options = Value::Array(setting.options.clone());
            println!(
                "{}{} {:<36} \x1b[90m{}\x1b[0m",
                indent,
                severity_label(setting.severity),
                name,
                options
            );
        }
    }
}

fn summary_counts(rules: &RuleSet) -> (usize, usize, usize) {
    rules.values().fold((0, 0, 0), |(e, w, o), s| match s.severity {
        Severity::Error => (e + 1, w, o),
        Severity::Warn => (e, w + 1, o),
        Severity::Off => (e, w, o + 1),
    })
}

/// Print the composed lint configuration with ANSI colors.
pub fn print_lint_pretty(config: &EffectiveLintConfig) {
    if !config.ignores().is_empty() {
        println!("\x1b[1mIgnores:\x1b[0m {}", config.ignores().join(", "));
    }

    println!("\n\x1b[4mGlobal rules\x1b[0m");
    print_rules(&config.rules, "  ");

    for (idx, scope) in config.overrides.iter().enumerate() {
        println!("\n\x1b[4mScope #{}\x1b[0m {}", idx + 1, scope.files.join(", "));
        if !scope.ignores.is_empty() {
            println!("  \x1b[90mexcept {}\x1b[0m", scope.ignores.join(", "));
        }
        print_rules(&scope.rules, "  ");
        if let Some(ref opts) = scope.language_options {
            println!("  \x1b[90mlanguage options:\x1b[0m {}", opts);
        }
    }

    let (errors, warnings, off) = summary_counts(&config.rules);
    println!(
        "\n\x1b[1m{} rules\x1b[0m ({} error, {} warn, {} off), {} scoped override{}",
        config.rules.len(),
        errors,
        warnings,
        off,
        config.overrides.len(),
        if config.overrides.len() == 1 { "" } else { "s" }
    );
}

fn rules_json(rules: &RuleSet) -> Value {
    Value::Object(
        rules
            .iter()
            .map(|(name, setting)| (name.clone(), setting.to_value()))
            .collect(),
    )
}

/// The composed lint configuration as a flat list of config objects, in the
/// shape the linting engine consumes.
pub fn lint_json(config: &EffectiveLintConfig) -> Value {
    let mut entries = Vec::new();
    if !config.ignores().is_empty() {
        entries.push(json!({ "ignores": config.ignores() }));
    }
    entries.push(json!({ "rules": rules_json(&config.rules) }));
    for scope in &config.overrides {
        let mut entry = json!({
            "files": scope.files,
            "rules": rules_json(&scope.rules),
        });
        if !scope.ignores.is_empty() {
            entry["ignores"] = json!(scope.ignores);
        }
        if let Some(ref opts) = scope.language_options {
            entry["languageOptions"] = opts.clone();
        }
        entries.push(entry);
    }
    Value::Array(entries)
}

pub fn print_lint_json(config: &EffectiveLintConfig) {
    println!("{}", serde_json::to_string_pretty(&lint_json(config)).unwrap());
}

pub fn print_file_pretty(path: &Path, file: &FileConfig) {
    println!("\x1b[4m{}\x1b[0m", path.display());
    if file.scopes.is_empty() {
        println!("  \x1b[90mno scoped overrides apply\x1b[0m");
    } else {
        let scopes: Vec<String> = file.scopes.iter().map(|i| format!("#{}", i + 1)).collect();
        println!("  \x1b[90mscopes:\x1b[0m {}", scopes.join(", "));
    }
    print_rules(&file.rules, "  ");
    if let Some(ref opts) = file.language_options {
        println!("  \x1b[90mlanguage options:\x1b[0m {}", opts);
    }
    println!(
        "\n\x1b[1m{} of {} rules enabled\x1b[0m",
        file.enabled_rules(),
        file.rules.len()
    );
}

pub fn file_json(path: &Path, file: &FileConfig) -> Value {
    json!({
        "file": path.display().to_string(),
        "scopes": file.scopes,
        "rules": rules_json(&file.rules),
        "languageOptions": file.language_options,
    })
}

pub fn print_file_json(path: &Path, file: &FileConfig) {
    println!("{}", serde_json::to_string_pretty(&file_json(path, file)).unwrap());
}

fn token_display(value: &TokenValue) -> String {
    match value {
        TokenValue::Literal(s) => s.clone(),
        TokenValue::List(items) => items.join(", "),
        TokenValue::Group(_) => String::new(),
    }
}

fn print_group(group: &TokenGroup, depth: usize) {
    let indent = "  ".repeat(depth);
    for (name, value) in group {
        match value {
            TokenValue::Group(inner) => {
                println!("{}{}", indent, name);
                print_group(inner, depth + 1);
            }
            other => println!("{}{:<12} \x1b[36m{}\x1b[0m", indent, name, token_display(other)),
        }
    }
}

/// Print the composed token table, one category per block.
pub fn print_theme_pretty(theme: &TokenTable) {
    if theme.is_empty() {
        println!("\x1b[90m(empty theme)\x1b[0m");
        return;
    }
    for (category, group) in theme.categories() {
        println!("\n\x1b[4m{}\x1b[0m", category);
        print_group(group, 1);
    }
}

pub fn print_theme_json(theme: &TokenTable) {
    println!("{}", serde_json::to_string_pretty(&theme.to_value()).unwrap());
}

pub fn print_files_pretty(result: &ResolveResult) {
    for report in &result.files {
        let scopes = if report.scopes.is_empty() {
            String::new()
        } else {
            let ids: Vec<String> = report.scopes.iter().map(|i| format!("#{}", i + 1)).collect();
            format!(" \x1b[90mscopes {}\x1b[0m", ids.join(", "))
        };
        println!(
            "  {:<48} {:>3} rules{}",
            report.path.display(),
            report.enabled_rules,
            scopes
        );
    }
    for path in &result.ignored {
        println!("  \x1b[90m{:<48} ignored\x1b[0m", path.display());
    }
    println!(
        "\n\x1b[1m{} file{} resolved, {} ignored\x1b[0m",
        result.files.len(),
        if result.files.len() == 1 { "" } else { "s" },
        result.ignored.len()
    );
}

pub fn files_json(result: &ResolveResult) -> Value {
    let files: Vec<_> = result
        .files
        .iter()
        .map(|r| {
            json!({
                "file": r.path.display().to_string(),
                "enabled_rules": r.enabled_rules,
                "scopes": r.scopes,
            })
        })
        .collect();
    let ignored: Vec<_> = result.ignored.iter().map(|p| p.display().to_string()).collect();
    json!({
        "files": files,
        "ignored": ignored,
        "summary": {
            "resolved": result.files.len(),
            "ignored": result.ignored.len(),
        },
    })
}

pub fn print_files_json(result: &ResolveResult) {
    println!("{}", serde_json::to_string_pretty(&files_json(result)).unwrap());
}

pub fn print_content(files: &[PathBuf]) {
    for file in files {
        println!("{}", file.display());
    }
}
