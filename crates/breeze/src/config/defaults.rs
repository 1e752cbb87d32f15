//! The stock preset: breakpoints, a compact palette, spacing and default variants.

use serde_json::json;

use super::fragment::ConfigFragment;
use super::theme::ThemeUtils;
use super::value::{ConfigMap, ConfigValue};

/// Order in which variants are emitted when `variants.extend` adds to a list.
pub const DEFAULT_VARIANT_ORDER: &[&str] = &[
    "dark",
    "motion-safe",
    "motion-reduce",
    "first",
    "last",
    "odd",
    "even",
    "visited",
    "checked",
    "group-hover",
    "group-focus",
    "focus-within",
    "hover",
    "focus",
    "focus-visible",
    "active",
    "disabled",
];

/// The preset most projects start from.
///
/// Add it to [`ConfigFragment::preset`] to inherit it:
///
/// ```rust
/// use breeze::config::{ConfigFragment, default_config, resolve_config};
///
/// let config = resolve_config(&[ConfigFragment::new().preset(default_config())]).unwrap();
/// assert_eq!(config.theme_string("screens.md").as_deref(), Some("768px"));
/// assert_eq!(config.theme_string("margin.-4").as_deref(), Some("-1rem"));
/// ```
pub fn default_config() -> ConfigFragment {
    let mut fragment = ConfigFragment::new()
        .theme(
            "screens",
            json!({
                "sm": "640px",
                "md": "768px",
                "lg": "1024px",
                "xl": "1280px",
                "2xl": "1536px",
            }),
        )
        .theme("colors", palette())
        .theme("spacing", spacing())
        .theme(
            "fontFamily",
            json!({
                "sans": ["ui-sans-serif", "system-ui", "sans-serif"],
                "serif": ["ui-serif", "Georgia", "serif"],
                "mono": ["ui-monospace", "Menlo", "monospace"],
            }),
        )
        .theme(
            "borderRadius",
            json!({
                "none": "0px",
                "sm": "0.125rem",
                "DEFAULT": "0.25rem",
                "md": "0.375rem",
                "lg": "0.5rem",
                "full": "9999px",
            }),
        )
        .theme(
            "opacity",
            json!({"0": "0", "25": "0.25", "50": "0.5", "75": "0.75", "100": "1"}),
        )
        .theme("backgroundColor", ConfigValue::lazy(|utils| utils.colors()))
        .theme("textColor", ConfigValue::lazy(|utils| utils.colors()))
        .theme(
            "borderColor",
            ConfigValue::lazy(|utils| {
                let mut colors = match utils.colors() {
                    ConfigValue::Object(map) => map,
                    _ => ConfigMap::new(),
                };
                colors.insert(
                    "DEFAULT".to_string(),
                    utils.theme_or("colors.gray.200", "currentColor"),
                );
                ConfigValue::Object(colors)
            }),
        )
        .theme(
            "margin",
            ConfigValue::lazy(|utils| with_negatives(utils, &utils.theme("spacing"))),
        )
        .theme(
            "inset",
            ConfigValue::lazy(|utils| with_negatives(utils, &utils.theme("spacing"))),
        )
        .theme(
            "maxWidth",
            ConfigValue::lazy(|utils| {
                let mut widths = ConfigMap::new();
                widths.insert("none".into(), "none".into());
                widths.insert("full".into(), "100%".into());
                widths.insert("prose".into(), "65ch".into());
                if let ConfigValue::Object(screens) = utils.breakpoints(&utils.theme("screens")) {
                    widths.extend(screens);
                }
                ConfigValue::Object(widths)
            }),
        );

    for key in ["backgroundColor", "borderColor", "textColor"] {
        fragment = fragment.variants(
            key,
            ["responsive", "dark", "group-hover", "focus-within", "hover", "focus"],
        );
    }
    fragment = fragment
        .variants("opacity", ["responsive", "group-hover", "focus-within", "hover", "focus"])
        .variants("margin", ["responsive"])
        .variants("inset", ["responsive"])
        .variants("maxWidth", ["responsive"])
        .variant_order(DEFAULT_VARIANT_ORDER.iter().copied());
    fragment
}

/// `{auto, ...scale, ...negative(scale)}`.
fn with_negatives(utils: &ThemeUtils<'_>, scale: &ConfigValue) -> ConfigValue {
    let mut values = ConfigMap::new();
    values.insert("auto".into(), "auto".into());
    if let ConfigValue::Object(scale_values) = scale {
        values.extend(scale_values.clone());
    }
    if let ConfigValue::Object(negative) = utils.negative(scale) {
        values.extend(negative);
    }
    ConfigValue::Object(values)
}

fn spacing() -> serde_json::Value {
    json!({
        "px": "1px",
        "0": "0px",
        "0.5": "0.125rem",
        "1": "0.25rem",
        "1.5": "0.375rem",
        "2": "0.5rem",
        "2.5": "0.625rem",
        "3": "0.75rem",
        "4": "1rem",
        "5": "1.25rem",
        "6": "1.5rem",
        "8": "2rem",
        "10": "2.5rem",
        "12": "3rem",
        "16": "4rem",
        "20": "5rem",
        "24": "6rem",
        "32": "8rem",
        "48": "12rem",
        "64": "16rem",
    })
}

fn palette() -> serde_json::Value {
    json!({
        "transparent": "transparent",
        "current": "currentColor",
        "black": "#000",
        "white": "#fff",
        "gray": {
            "100": "#f3f4f6",
            "200": "#e5e7eb",
            "300": "#d1d5db",
            "500": "#6b7280",
            "700": "#374151",
            "900": "#111827",
        },
        "red": {
            "100": "#fee2e2",
            "500": "#ef4444",
            "900": "#7f1d1d",
        },
        "green": {
            "100": "#d1fae5",
            "500": "#10b981",
            "900": "#064e3b",
        },
        "blue": {
            "100": "#dbeafe",
            "500": "#3b82f6",
            "900": "#1e3a8a",
        },
    })
}
