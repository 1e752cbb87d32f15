//! Theme merging and call-by-need resolution of lazy theme values.
//!
//! Merging happens first and is purely structural: fragments are folded into one
//! map whose entries may still be [`ConfigValue::Lazy`]. Resolution then evaluates
//! each top-level key on demand. A lazy value that asks for another key forces that
//! key (and only that key), so a fragment may reference theme keys that a later
//! fragment defines.

use std::cell::RefCell;

use indexmap::IndexMap;
use once_cell::unsync::OnceCell;

use super::value::{ConfigMap, ConfigValue, format_number, parse_path};
use super::ConfigError;

/// Nested lazies returning lazies are unwrapped at most this many times.
const MAX_LAZY_DEPTH: usize = 32;

// ============================================================================
// MERGING
// ============================================================================

/// Folds the `theme` sections of already ordered fragments (weakest first).
///
/// Plain keys are replaced wholesale by later fragments. Keys under `extend` are
/// collected and deep-merged on top of the final plain value, in fragment order.
pub(crate) fn merge_themes<'a>(themes: impl IntoIterator<Item = &'a ConfigMap>) -> ConfigMap {
    let mut merged = ConfigMap::new();
    let mut extensions: IndexMap<String, Vec<ConfigValue>> = IndexMap::new();

    for theme in themes {
        for (key, value) in theme {
            if key == "extend" {
                if let Some(extend) = value.as_object() {
                    for (key, value) in extend {
                        extensions.entry(key.clone()).or_default().push(value.clone());
                    }
                }
                continue;
            }
            merged.insert(key.clone(), value.clone());
        }
    }

    for (key, extensions) in extensions {
        let base = merged.get(&key).cloned().unwrap_or_default();
        let combined = merge_extensions(base, extensions);
        merged.insert(key, combined);
    }
    merged
}

fn merge_extensions(base: ConfigValue, extensions: Vec<ConfigValue>) -> ConfigValue {
    if !base.is_lazy() && !extensions.iter().any(ConfigValue::is_lazy) {
        return extensions.into_iter().fold(base, |mut merged, extension| {
            merge_into(&mut merged, extension);
            merged
        });
    }

    ConfigValue::lazy(move |utils| {
        let mut merged = utils.evaluate(&base);
        for extension in &extensions {
            merge_into(&mut merged, utils.evaluate(extension));
        }
        merged
    })
}

/// Deep-merges `source` into `target`, the way `theme.extend` composes.
pub(crate) fn merge_into(target: &mut ConfigValue, source: ConfigValue) {
    match (target, source) {
        (ConfigValue::Object(target), ConfigValue::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge_entry(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

fn merge_entry(merged: &mut ConfigValue, value: ConfigValue) {
    let is_object_list =
        |v: &ConfigValue| matches!(v.as_array(), Some([ConfigValue::Object(_), ..]));

    if is_object_list(&*merged) {
        if let ConfigValue::Array(items) = merged {
            match value {
                ConfigValue::Array(more) => items.extend(more),
                other => items.push(other),
            }
        }
        return;
    }

    if is_object_list(&value) && merged.is_object() {
        if let ConfigValue::Array(more) = value {
            let first = std::mem::take(merged);
            *merged = ConfigValue::Array(std::iter::once(first).chain(more).collect());
        }
        return;
    }

    match value {
        ConfigValue::Array(_) => *merged = value,
        ConfigValue::Object(_) if merged.is_object() => merge_into(merged, value),
        other => *merged = other,
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Evaluates a merged theme one key at a time, memoizing each key.
pub struct ThemeResolver {
    raw: ConfigMap,
    resolved: IndexMap<String, OnceCell<ConfigValue>>,
    stack: RefCell<Vec<String>>,
    error: RefCell<Option<ConfigError>>,
}

impl ThemeResolver {
    pub fn new(raw: ConfigMap) -> Self {
        let resolved = raw.keys().map(|k| (k.clone(), OnceCell::new())).collect();
        Self {
            raw,
            resolved,
            stack: RefCell::new(Vec::new()),
            error: RefCell::new(None),
        }
    }

    /// Resolves every key and every lazy nested inside the results.
    ///
    /// # Errors
    ///
    /// [`ConfigError::CircularThemeReference`] when a key depends on itself.
    pub fn resolve_all(self) -> Result<ConfigMap, ConfigError> {
        let utils = ThemeUtils { resolver: &self };
        let mut theme = ConfigMap::with_capacity(self.raw.len());
        for key in self.raw.keys() {
            let value = self.resolve_key(key);
            theme.insert(key.clone(), utils.resolve_nested(value));
        }

        if let Some(err) = self.error.borrow_mut().take() {
            return Err(err);
        }
        log::debug!("resolved {} theme keys", theme.len());
        Ok(theme)
    }

    fn resolve_key(&self, key: &str) -> ConfigValue {
        let Some(cell) = self.resolved.get(key) else {
            return ConfigValue::Null;
        };
        if let Some(value) = cell.get() {
            return value.clone();
        }

        if self.stack.borrow().iter().any(|k| k == key) {
            self.record_cycle(key);
            return ConfigValue::Null;
        }

        self.stack.borrow_mut().push(key.to_string());
        let raw = self.raw.get(key).cloned().unwrap_or_default();
        let value = ThemeUtils { resolver: self }.evaluate(&raw);
        self.stack.borrow_mut().pop();

        log::trace!("theme key `{key}` resolved");
        let _ = cell.set(value.clone());
        value
    }

    fn record_cycle(&self, key: &str) {
        let mut error = self.error.borrow_mut();
        if error.is_none() {
            let mut chain = self.stack.borrow().clone();
            chain.push(key.to_string());
            *error = Some(ConfigError::CircularThemeReference {
                path: chain.join(" -> "),
            });
        }
    }
}

/// Helpers handed to lazy theme values.
///
/// ```rust
/// use breeze::config::{ConfigFragment, ConfigValue, resolve_config};
/// use serde_json::json;
///
/// let config = resolve_config(&[ConfigFragment::new()
///     .theme("colors", json!({"red": "#f00"}))
///     .theme("fill", ConfigValue::lazy(|utils| utils.theme("colors")))])
/// .unwrap();
/// assert_eq!(config.theme_string("fill.red").as_deref(), Some("#f00"));
/// ```
#[derive(Clone, Copy)]
pub struct ThemeUtils<'a> {
    resolver: &'a ThemeResolver,
}

impl ThemeUtils<'_> {
    /// Looks up a theme path, forcing any lazy value met on the way. Missing
    /// paths give [`ConfigValue::Null`].
    pub fn theme(&self, path: &str) -> ConfigValue {
        let keys = parse_path(path);
        let Some((first, rest)) = keys.split_first() else {
            return ConfigValue::Null;
        };

        let mut value = self.resolver.resolve_key(first);
        for key in rest {
            value = match value.get(key) {
                Some(child) => self.evaluate(child),
                None => return ConfigValue::Null,
            };
        }
        value
    }

    pub fn theme_or(&self, path: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        match self.theme(path) {
            ConfigValue::Null => default.into(),
            value => value,
        }
    }

    pub fn colors(&self) -> ConfigValue {
        self.theme("colors")
    }

    /// `{sm: "640px"}` becomes `{"screen-sm": "640px"}`; non-string screens are skipped.
    pub fn breakpoints(&self, screens: &ConfigValue) -> ConfigValue {
        let Some(screens) = screens.as_object() else {
            return ConfigValue::Object(ConfigMap::new());
        };
        ConfigValue::Object(
            screens
                .iter()
                .filter(|(_, value)| value.as_str().is_some())
                .map(|(name, value)| (format!("screen-{name}"), value.clone()))
                .collect(),
        )
    }

    /// Negated copy of a scale with `-` prefixed keys: `{4: "1rem"}` → `{-4: "-1rem"}`.
    pub fn negative(&self, scale: &ConfigValue) -> ConfigValue {
        let Some(scale) = scale.as_object() else {
            return ConfigValue::Object(ConfigMap::new());
        };
        ConfigValue::Object(
            scale
                .iter()
                .filter_map(|(key, value)| {
                    let negated = negate_value(value)?;
                    Some((format!("-{key}"), ConfigValue::String(negated)))
                })
                .collect(),
        )
    }

    /// The value itself, or the result of calling it if it is lazy.
    pub fn evaluate(&self, value: &ConfigValue) -> ConfigValue {
        let mut value = value.clone();
        for _ in 0..MAX_LAZY_DEPTH {
            match value {
                ConfigValue::Lazy(lazy) => value = lazy.evaluate(self),
                other => return other,
            }
        }
        value
    }

    fn resolve_nested(&self, value: ConfigValue) -> ConfigValue {
        match self.evaluate(&value) {
            ConfigValue::Array(items) => ConfigValue::Array(
                items
                    .into_iter()
                    .map(|item| self.resolve_nested(item))
                    .collect(),
            ),
            ConfigValue::Object(map) => ConfigValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, self.resolve_nested(v)))
                    .collect(),
            ),
            other => other,
        }
    }
}

fn negate_value(value: &ConfigValue) -> Option<String> {
    let value = match value {
        ConfigValue::Number(n) => format_number(*n),
        ConfigValue::String(s) => s.clone(),
        _ => return None,
    };
    if value == "0" {
        return None;
    }

    if is_numeric_length(&value) {
        return Some(match value.strip_prefix('-') {
            Some(positive) => positive.to_string(),
            None => format!("-{}", value.trim_start_matches('+')),
        });
    }
    if value.contains("var(") || value.contains("calc(") {
        return Some(format!("calc({value} * -1)"));
    }
    None
}

/// `1.5rem`, `-2px`, `.5`, `50%`: an optionally signed number with an optional unit.
fn is_numeric_length(value: &str) -> bool {
    let unsigned = value.trim_start_matches(['+', '-']);
    let digits_end = unsigned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(unsigned.len());
    let (number, unit) = unsigned.split_at(digits_end);

    let valid_number = !number.is_empty()
        && number != "."
        && number.matches('.').count() <= 1
        && !number.ends_with('.');
    valid_number && (unit.is_empty() || unit == "%" || unit.chars().all(|c| c.is_ascii_alphabetic()))
}
