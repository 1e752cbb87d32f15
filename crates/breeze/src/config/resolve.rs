//! Folding an ordered list of fragments into one [`ResolvedConfig`].

use indexmap::IndexMap;

use super::core_plugins::resolve_core_plugins;
use super::defaults::DEFAULT_VARIANT_ORDER;
use super::fragment::ConfigFragment;
use super::theme::{ThemeResolver, merge_themes};
use super::value::{ConfigMap, ConfigValue};
use super::{ConfigError, DarkMode, Important, ResolvedConfig};

/// Merges `fragments` into a single configuration. Later fragments win.
///
/// Presets are expanded in front of the fragment that lists them, and configs
/// contributed by plugins form a tier weaker than every user fragment and preset.
/// Inputs are only read; each call merges into fresh state.
///
/// # Errors
///
/// [`ConfigError::InvalidDarkMode`] for an unrecognized `darkMode`,
/// [`ConfigError::CircularThemeReference`] when lazy theme values form a cycle, and
/// [`ConfigError::InvalidFragment`] for a malformed `important` value.
///
/// ```rust
/// use breeze::config::{ConfigFragment, resolve_config};
/// use serde_json::json;
///
/// let config = resolve_config(&[
///     ConfigFragment::new().theme("colors", json!({"grey": {"light": "#ccc"}})),
///     ConfigFragment::new().extend("colors", json!({"grey": {"darker": "#222"}})),
/// ])
/// .unwrap();
/// assert_eq!(config.theme_string("colors.grey.light").as_deref(), Some("#ccc"));
/// assert_eq!(config.theme_string("colors.grey.darker").as_deref(), Some("#222"));
/// ```
pub fn resolve_config(fragments: &[ConfigFragment]) -> Result<ResolvedConfig, ConfigError> {
    let baseline = baseline();
    let mut plugin_tier = Vec::new();
    let mut user_tier = Vec::new();
    for fragment in fragments {
        let (plugins, users) = expand(fragment);
        plugin_tier.extend(plugins);
        user_tier.extend(users);
    }

    let ordered: Vec<&ConfigFragment> = std::iter::once(&baseline)
        .chain(plugin_tier)
        .chain(user_tier.iter().copied())
        .collect();
    log::debug!(
        "resolving {} config fragments ({} from plugins)",
        ordered.len() - 1,
        ordered.len() - 1 - user_tier.len()
    );

    let variant_order = last_set(&ordered, |f| f.variant_order.as_ref())
        .cloned()
        .unwrap_or_default();

    let theme = ThemeResolver::new(merge_themes(ordered.iter().map(|f| &f.theme))).resolve_all()?;

    Ok(ResolvedConfig {
        theme,
        variants: resolve_variants(&ordered, &variant_order),
        core_plugins: resolve_core_plugins(ordered.iter().filter_map(|f| f.core_plugins.as_ref())),
        plugins: user_tier
            .iter()
            .flat_map(|f| f.plugins.iter().cloned())
            .collect(),
        prefix: last_set(&ordered, |f| f.prefix.as_ref())
            .cloned()
            .unwrap_or_default(),
        important: parse_important(last_set(&ordered, |f| f.important.as_ref()))?,
        separator: last_set(&ordered, |f| f.separator.as_ref())
            .cloned()
            .unwrap_or_else(|| ":".to_string()),
        dark_mode: parse_dark_mode(last_set(&ordered, |f| f.dark_mode.as_ref()))?,
        variant_order,
        extra: ordered.iter().fold(ConfigMap::new(), |mut extra, f| {
            extra.extend(f.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
            extra
        }),
    })
}

/// The weakest fragment, supplying the documented defaults.
fn baseline() -> ConfigFragment {
    ConfigFragment::new()
        .prefix("")
        .important(false)
        .separator(":")
        .dark_mode(false)
        .variant_order(DEFAULT_VARIANT_ORDER.iter().copied())
}

/// Splits a fragment's expansion into `(plugin configs, fragment + presets)`,
/// each list ordered weakest first.
fn expand(fragment: &ConfigFragment) -> (Vec<&ConfigFragment>, Vec<&ConfigFragment>) {
    let mut plugin_tier = Vec::new();
    let mut user_tier = Vec::new();

    for preset in &fragment.presets {
        let (plugins, users) = expand(preset);
        plugin_tier.extend(plugins);
        user_tier.extend(users);
    }

    for plugin in &fragment.plugins {
        if let Some(config) = plugin.config() {
            let (nested_plugins, plugin_configs) = expand(config);
            plugin_tier.extend(nested_plugins);
            plugin_tier.extend(plugin_configs);
        }
    }

    user_tier.push(fragment);
    (plugin_tier, user_tier)
}

fn last_set<'a, T>(
    ordered: &[&'a ConfigFragment],
    field: impl Fn(&'a ConfigFragment) -> Option<&'a T>,
) -> Option<&'a T> {
    ordered.iter().rev().find_map(|f| field(*f))
}

/// Per-key replacement; `extend` entries append and are re-sorted by `order`.
fn resolve_variants(
    ordered: &[&ConfigFragment],
    order: &[String],
) -> IndexMap<String, Vec<String>> {
    let mut variants: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut extended: IndexMap<String, Vec<String>> = IndexMap::new();

    for fragment in ordered {
        for (key, value) in &fragment.variants {
            if key == "extend" {
                for (key, more) in value.as_object().into_iter().flatten() {
                    extended.entry(key.clone()).or_default().extend(strings(more));
                }
                continue;
            }
            variants.insert(key.clone(), strings(value));
        }
    }

    let rank = |name: &str| order.iter().position(|o| o == name).unwrap_or(order.len());
    for (key, more) in extended {
        let list = variants.entry(key).or_default();
        for name in more {
            if !list.contains(&name) {
                list.push(name);
            }
        }
        // `responsive` and anything unordered keep their place relative to each other.
        list.sort_by_key(|name| if name == "responsive" { 0 } else { rank(name) + 1 });
    }
    variants
}

fn strings(value: &ConfigValue) -> Vec<String> {
    value
        .as_array()
        .unwrap_or_default()
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn parse_important(value: Option<&ConfigValue>) -> Result<Important, ConfigError> {
    match value {
        None | Some(ConfigValue::Bool(false)) | Some(ConfigValue::Null) => Ok(Important::Off),
        Some(ConfigValue::Bool(true)) => Ok(Important::On),
        Some(ConfigValue::String(selector)) => Ok(Important::Selector(selector.clone())),
        Some(other) => Err(ConfigError::InvalidFragment(format!(
            "`important` must be a boolean or a selector, got {other:?}"
        ))),
    }
}

fn parse_dark_mode(value: Option<&ConfigValue>) -> Result<DarkMode, ConfigError> {
    match value {
        None | Some(ConfigValue::Bool(false)) => Ok(DarkMode::Disabled),
        Some(ConfigValue::String(mode)) if mode == "media" => Ok(DarkMode::Media),
        Some(ConfigValue::String(mode)) if mode == "class" => Ok(DarkMode::Class(".dark".into())),
        Some(ConfigValue::Array(items)) => match items.as_slice() {
            [ConfigValue::String(mode)] if mode == "class" => Ok(DarkMode::Class(".dark".into())),
            [ConfigValue::String(mode), ConfigValue::String(selector)] if mode == "class" => {
                Ok(DarkMode::Class(selector.clone()))
            }
            _ => Err(ConfigError::InvalidDarkMode(format!("{items:?}"))),
        },
        Some(other) => Err(ConfigError::InvalidDarkMode(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_precede_their_fragment() {
        let inner = ConfigFragment::new().prefix("inner-");
        let outer = ConfigFragment::new().prefix("outer-").preset(inner);
        let (plugins, users) = expand(&outer);
        assert!(plugins.is_empty());
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].prefix.as_deref(), Some("outer-"));
    }

    #[test]
    fn extended_variants_follow_order() {
        let fragments = [
            ConfigFragment::new().variants("opacity", ["responsive", "hover"]),
            ConfigFragment::new().extend_variants("opacity", ["focus", "group-hover"]),
        ];
        let refs: Vec<&ConfigFragment> = fragments.iter().collect();
        let order: Vec<String> = DEFAULT_VARIANT_ORDER.iter().map(|s| s.to_string()).collect();
        let variants = resolve_variants(&refs, &order);
        assert_eq!(
            variants["opacity"],
            vec!["responsive", "group-hover", "hover", "focus"]
        );
    }

    #[test]
    fn dark_mode_forms() {
        assert_eq!(parse_dark_mode(None).unwrap(), DarkMode::Disabled);
        assert_eq!(
            parse_dark_mode(Some(&"media".into())).unwrap(),
            DarkMode::Media
        );
        let custom = ConfigValue::Array(vec!["class".into(), "[data-theme=dark]".into()]);
        assert_eq!(
            parse_dark_mode(Some(&custom)).unwrap(),
            DarkMode::Class("[data-theme=dark]".into())
        );
        assert!(parse_dark_mode(Some(&"sometimes".into())).is_err());
    }
}
