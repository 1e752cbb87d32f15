use std::fmt;

use super::value::{ConfigMap, ConfigValue};
use super::ConfigError;
use crate::plugin::Plugin;

/// One partial configuration, as written by a user, a preset or a plugin.
///
/// Every field is optional; [`resolve_config`](super::resolve_config) decides which
/// fragment wins for each key. `theme` and `variants` may carry an `extend` key.
///
/// ```rust
/// use breeze::config::ConfigFragment;
/// use serde_json::json;
///
/// let fragment = ConfigFragment::new()
///     .theme("screens", json!({"sm": "500px"}))
///     .extend("colors", json!({"brand": "#0af"}))
///     .variants("backgroundColor", ["hover", "focus"])
///     .separator("_");
/// assert_eq!(fragment.separator.as_deref(), Some("_"));
/// ```
#[derive(Clone, Default)]
pub struct ConfigFragment {
    pub theme: ConfigMap,
    pub variants: ConfigMap,
    pub variant_order: Option<Vec<String>>,
    pub core_plugins: Option<ConfigValue>,
    pub prefix: Option<String>,
    pub important: Option<ConfigValue>,
    pub separator: Option<String>,
    pub dark_mode: Option<ConfigValue>,
    pub presets: Vec<ConfigFragment>,
    pub plugins: Vec<Plugin>,
    /// Top-level keys with no special meaning (`content`, `purge`, ...).
    pub extra: ConfigMap,
}

impl ConfigFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.theme.insert(key.into(), value.into());
        self
    }

    /// Adds a `theme.extend` entry.
    pub fn extend(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        let extend = self
            .theme
            .entry("extend".to_string())
            .or_insert_with(|| ConfigValue::Object(ConfigMap::new()));
        if let Some(extend) = extend.as_object_mut() {
            extend.insert(key.into(), value.into());
        }
        self
    }

    pub fn variants<I, S>(mut self, key: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants.insert(key.into(), variant_list(variants));
        self
    }

    /// Adds a `variants.extend` entry.
    pub fn extend_variants<I, S>(mut self, key: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extend = self
            .variants
            .entry("extend".to_string())
            .or_insert_with(|| ConfigValue::Object(ConfigMap::new()));
        if let Some(extend) = extend.as_object_mut() {
            extend.insert(key.into(), variant_list(variants));
        }
        self
    }

    pub fn variant_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variant_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn core_plugins(mut self, value: impl Into<ConfigValue>) -> Self {
        self.core_plugins = Some(value.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn important(mut self, value: impl Into<ConfigValue>) -> Self {
        self.important = Some(value.into());
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn dark_mode(mut self, value: impl Into<ConfigValue>) -> Self {
        self.dark_mode = Some(value.into());
        self
    }

    pub fn preset(mut self, preset: ConfigFragment) -> Self {
        self.presets.push(preset);
        self
    }

    pub fn plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Reads a fragment from its JSON form (`{"theme": ..., "darkMode": ...}`).
    ///
    /// Plugins are code and cannot be expressed in JSON; attach them with
    /// [`plugin`](Self::plugin) afterwards.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidFragment`] when the value or one of the known keys has
    /// the wrong shape.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ConfigError> {
        let object = value
            .as_object()
            .ok_or_else(|| invalid("a config fragment must be an object"))?;

        let mut fragment = ConfigFragment::new();
        for (key, value) in object {
            match key.as_str() {
                "theme" => fragment.theme = json_object(key, value)?,
                "variants" => fragment.variants = json_object(key, value)?,
                "variantOrder" => fragment.variant_order = Some(json_strings(key, value)?),
                "corePlugins" => fragment.core_plugins = Some(value.clone().into()),
                "prefix" => fragment.prefix = Some(json_string(key, value)?),
                "important" => fragment.important = Some(value.clone().into()),
                "separator" => fragment.separator = Some(json_string(key, value)?),
                "darkMode" => fragment.dark_mode = Some(value.clone().into()),
                "presets" => {
                    let presets = value
                        .as_array()
                        .ok_or_else(|| invalid("`presets` must be an array"))?;
                    fragment.presets = presets
                        .iter()
                        .map(ConfigFragment::from_json)
                        .collect::<Result<_, _>>()?;
                }
                "plugins" => {
                    return Err(invalid("`plugins` cannot be loaded from JSON"));
                }
                _ => {
                    fragment.extra.insert(key.clone(), value.clone().into());
                }
            }
        }
        Ok(fragment)
    }
}

impl fmt::Debug for ConfigFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFragment")
            .field("theme", &self.theme)
            .field("variants", &self.variants)
            .field("core_plugins", &self.core_plugins)
            .field("prefix", &self.prefix)
            .field("important", &self.important)
            .field("separator", &self.separator)
            .field("dark_mode", &self.dark_mode)
            .field("presets", &self.presets.len())
            .field("plugins", &self.plugins.len())
            .finish_non_exhaustive()
    }
}

fn variant_list<I, S>(variants: I) -> ConfigValue
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ConfigValue::Array(
        variants
            .into_iter()
            .map(|v| ConfigValue::String(v.into()))
            .collect(),
    )
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidFragment(message.to_string())
}

fn json_object(key: &str, value: &serde_json::Value) -> Result<ConfigMap, ConfigError> {
    match ConfigValue::from(value.clone()) {
        ConfigValue::Object(map) => Ok(map),
        _ => Err(invalid(&format!("`{key}` must be an object"))),
    }
}

fn json_string(key: &str, value: &serde_json::Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(&format!("`{key}` must be a string")))
}

fn json_strings(key: &str, value: &serde_json::Value) -> Result<Vec<String>, ConfigError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid(&format!("`{key}` must be an array of strings")))?;
    items.iter().map(|item| json_string(key, item)).collect()
}
