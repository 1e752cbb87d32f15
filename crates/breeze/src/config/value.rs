//! Dynamically typed configuration values.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::ThemeUtils;

/// Insertion-ordered map used for every object in a configuration tree.
pub type ConfigMap = IndexMap<String, ConfigValue>;

type LazyFn = dyn Fn(&ThemeUtils<'_>) -> ConfigValue + Send + Sync;

/// A theme value computed on demand from the rest of the theme.
#[derive(Clone)]
pub struct LazyValue(Arc<LazyFn>);

impl LazyValue {
    pub fn evaluate(&self, utils: &ThemeUtils<'_>) -> ConfigValue {
        (self.0)(utils)
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyValue(..)")
    }
}

/// One node of a configuration tree.
///
/// Mirrors JSON with one addition, [`ConfigValue::Lazy`], which is only meaningful
/// under `theme` and disappears during resolution.
#[derive(Clone, Debug, Default)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ConfigValue>),
    Object(ConfigMap),
    Lazy(LazyValue),
}

impl ConfigValue {
    /// Wraps a closure evaluated against the resolving theme.
    ///
    /// ```rust
    /// use breeze::config::ConfigValue;
    ///
    /// let background = ConfigValue::lazy(|utils| utils.theme("colors"));
    /// assert!(background.is_lazy());
    /// ```
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn(&ThemeUtils<'_>) -> ConfigValue + Send + Sync + 'static,
    {
        ConfigValue::Lazy(LazyValue(Arc::new(f)))
    }

    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        ConfigValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, ConfigValue::Lazy(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ConfigValue::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Child of an object by key, or of an array by index.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Object(map) => map.get(key),
            ConfigValue::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Follows a path such as `colors.gray[200]` without evaluating lazy values.
    pub fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        parse_path(path)
            .iter()
            .try_fold(self, |value, key| value.get(key))
    }

    /// Whether any lazy value remains anywhere in this tree.
    pub fn contains_lazy(&self) -> bool {
        match self {
            ConfigValue::Lazy(_) => true,
            ConfigValue::Array(items) => items.iter().any(ConfigValue::contains_lazy),
            ConfigValue::Object(map) => map.values().any(ConfigValue::contains_lazy),
            _ => false,
        }
    }

    /// Renders the value as it would appear in a declaration.
    ///
    /// Arrays are joined with `, ` (font stacks, shadows) and objects stand for
    /// their `DEFAULT` key. Returns `None` for values with no CSS spelling.
    pub fn to_css_string(&self) -> Option<String> {
        match self {
            ConfigValue::String(s) => Some(s.clone()),
            ConfigValue::Number(n) => Some(format_number(*n)),
            ConfigValue::Array(items) => items
                .iter()
                .map(ConfigValue::to_css_string)
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join(", ")),
            ConfigValue::Object(map) => map.get("DEFAULT").and_then(ConfigValue::to_css_string),
            ConfigValue::Bool(_) | ConfigValue::Null | ConfigValue::Lazy(_) => None,
        }
    }
}

/// Formats a number the way JavaScript prints it: `4`, not `4.0`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Splits `a.b[c]['d.e']` into `["a", "b", "c", "d.e"]`.
///
/// Bracketed keys are taken literally, so `spacing[2.5]` addresses the key `2.5`.
pub fn parse_path(path: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    keys.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    keys.push(std::mem::take(&mut current));
                }
                let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                let inner = inner.trim().trim_matches(|c| c == '\'' || c == '"');
                keys.push(inner.to_string());
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        keys.push(current);
    }
    keys
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConfigValue::Null, ConfigValue::Null) => true,
            (ConfigValue::Bool(a), ConfigValue::Bool(b)) => a == b,
            (ConfigValue::Number(a), ConfigValue::Number(b)) => a == b,
            (ConfigValue::String(a), ConfigValue::String(b)) => a == b,
            (ConfigValue::Array(a), ConfigValue::Array(b)) => a == b,
            (ConfigValue::Object(a), ConfigValue::Object(b)) => a == b,
            (ConfigValue::Lazy(a), ConfigValue::Lazy(b)) => Arc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Number(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Number(f64::from(n))
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::Array(items)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Object(map)
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => ConfigValue::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::Array(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(map) => ConfigValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}
