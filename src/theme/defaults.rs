use crate::theme::{TokenGroup, TokenTable, TokenValue};

fn literals(pairs: &[(&str, &str)]) -> TokenGroup {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), TokenValue::literal(*v)))
        .collect()
}

/// Base tokens used when a project does not opt out of defaults.
pub fn builtin() -> TokenTable {
    let mut colors = literals(&[
        ("inherit", "inherit"),
        ("current", "currentColor"),
        ("transparent", "transparent"),
        ("black", "#000"),
        ("white", "#fff"),
    ]);
    colors.insert(
        "gray".into(),
        TokenValue::Group(literals(&[
            ("50", "#f9fafb"),
            ("100", "#f3f4f6"),
            ("200", "#e5e7eb"),
            ("300", "#d1d5db"),
            ("400", "#9ca3af"),
            ("500", "#6b7280"),
            ("600", "#4b5563"),
            ("700", "#374151"),
            ("800", "#1f2937"),
            ("900", "#111827"),
            ("950", "#030712"),
        ])),
    );

    let font_family: TokenGroup = [
        (
            "sans",
            TokenValue::list(["ui-sans-serif", "system-ui", "sans-serif"]),
        ),
        (
            "serif",
            TokenValue::list(["ui-serif", "Georgia", "Cambria", "serif"]),
        ),
        (
            "mono",
            TokenValue::list(["ui-monospace", "SFMono-Regular", "Menlo", "monospace"]),
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    TokenTable::new()
        .with_category("colors", colors)
        .with_category("fontFamily", font_family)
        .with_category(
            "spacing",
            literals(&[
                ("px", "1px"),
                ("0", "0px"),
                ("0.5", "0.125rem"),
                ("1", "0.25rem"),
                ("2", "0.5rem"),
                ("4", "1rem"),
                ("8", "2rem"),
                ("16", "4rem"),
            ]),
        )
        .with_category(
            "borderRadius",
            literals(&[
                ("none", "0px"),
                ("sm", "0.125rem"),
                ("DEFAULT", "0.25rem"),
                ("md", "0.375rem"),
                ("lg", "0.5rem"),
                ("full", "9999px"),
            ]),
        )
}
