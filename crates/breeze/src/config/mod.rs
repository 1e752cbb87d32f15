//! Configuration fragments and their resolution.
//!
//! A project's configuration is an ordered list of [`ConfigFragment`]s: the user's
//! own config, the presets it pulls in and configs shipped with plugins.
//! [`resolve_config`] folds them into one [`ResolvedConfig`]:
//!
//! ```text
//! baseline → plugin configs → presets → user fragments      (later wins)
//!
//! theme.<key>          replaced wholesale by a later fragment
//! theme.extend.<key>   deep-merged on top, in fragment order
//! ConfigValue::Lazy    evaluated on demand against the merged theme
//! ```
//!
//! Resolution never touches its inputs, so the same fragments can be resolved any
//! number of times.

mod core_plugins;
mod defaults;
mod fragment;
mod resolve;
mod theme;
mod value;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

pub use core_plugins::CORE_PLUGINS;
pub use defaults::{DEFAULT_VARIANT_ORDER, default_config};
pub use fragment::ConfigFragment;
pub use resolve::resolve_config;
pub use theme::{ThemeResolver, ThemeUtils};
pub use value::{ConfigMap, ConfigValue, LazyValue, format_number, parse_path};

use crate::plugin::Plugin;
use crate::screens::{Screen, normalize_screens};

/// Errors raised while resolving configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error(
        "The `darkMode` config option must be either false, 'media', 'class' or ['class', '<selector>'], got {0}."
    )]
    InvalidDarkMode(String),

    /// Lazy theme values that (transitively) depend on themselves.
    #[error("Circular theme reference: {path}")]
    CircularThemeReference { path: String },

    #[error("Invalid config fragment: {0}")]
    InvalidFragment(String),

    #[error("Invalid screen `{name}`: {reason}")]
    InvalidScreen { name: String, reason: String },
}

/// How dark-mode variants are generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DarkMode {
    /// `dark:` variants produce nothing.
    Disabled,
    /// Wrapped in `@media (prefers-color-scheme: dark)`.
    Media,
    /// Scoped under an ancestor selector, `.dark` by default.
    Class(String),
}

/// The `important` option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Important {
    Off,
    /// Every utility declaration gets `!important`.
    On,
    /// Utilities are scoped under this selector instead (`#app .p-4`).
    Selector(String),
}

/// The outcome of [`resolve_config`]: read-only input to every pass.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    /// Fully evaluated theme; contains no lazy values.
    pub theme: ConfigMap,
    pub variants: IndexMap<String, Vec<String>>,
    pub variant_order: Vec<String>,
    pub core_plugins: IndexSet<String>,
    pub plugins: Vec<Plugin>,
    pub prefix: String,
    pub important: Important,
    pub separator: String,
    pub dark_mode: DarkMode,
    pub extra: ConfigMap,
}

impl ResolvedConfig {
    /// Looks up a theme path such as `colors.gray.200` or `spacing[2.5]`.
    pub fn theme(&self, path: &str) -> Option<&ConfigValue> {
        let keys = parse_path(path);
        let (first, rest) = keys.split_first()?;
        rest.iter()
            .try_fold(self.theme.get(first)?, |value, key| value.get(key))
    }

    /// A theme value rendered for CSS (see [`ConfigValue::to_css_string`]).
    pub fn theme_string(&self, path: &str) -> Option<String> {
        self.theme(path).and_then(ConfigValue::to_css_string)
    }

    /// Looks up any configuration path, `theme.*` included, as a plain value.
    ///
    /// ```rust
    /// use breeze::config::{ConfigFragment, ConfigValue, resolve_config};
    ///
    /// let config = resolve_config(&[ConfigFragment::new().prefix("tw-")]).unwrap();
    /// assert_eq!(config.get("prefix"), Some(ConfigValue::from("tw-")));
    /// assert_eq!(config.get("separator"), Some(ConfigValue::from(":")));
    /// ```
    pub fn get(&self, path: &str) -> Option<ConfigValue> {
        let keys = parse_path(path);
        let (first, rest) = keys.split_first()?;

        let root = match first.as_str() {
            "theme" => ConfigValue::Object(self.theme.clone()),
            "prefix" => self.prefix.clone().into(),
            "separator" => self.separator.clone().into(),
            "important" => match &self.important {
                Important::Off => false.into(),
                Important::On => true.into(),
                Important::Selector(selector) => selector.clone().into(),
            },
            "darkMode" => match &self.dark_mode {
                DarkMode::Disabled => false.into(),
                DarkMode::Media => "media".into(),
                DarkMode::Class(selector) if selector == ".dark" => "class".into(),
                DarkMode::Class(selector) => {
                    ConfigValue::Array(vec!["class".into(), selector.clone().into()])
                }
            },
            "variants" => ConfigValue::object(self.variants.iter().map(|(key, list)| {
                let list: Vec<ConfigValue> = list.iter().map(|v| v.clone().into()).collect();
                (key.clone(), ConfigValue::Array(list))
            })),
            "variantOrder" => strings(&self.variant_order),
            "corePlugins" => strings(self.core_plugins.iter()),
            other => self.extra.get(other)?.clone(),
        };

        rest.iter()
            .try_fold(&root, |value, key| value.get(key))
            .cloned()
    }

    /// Breakpoints from `theme.screens`, in configured order.
    pub fn screens(&self) -> Result<Vec<Screen>, ConfigError> {
        match self.theme.get("screens") {
            Some(screens) => normalize_screens(screens),
            None => Ok(Vec::new()),
        }
    }

    pub fn core_plugin_enabled(&self, name: &str) -> bool {
        self.core_plugins.contains(name)
    }

    /// The variants configured for a utility family, e.g. `backgroundColor`.
    pub fn variants_for(&self, key: &str) -> Vec<String> {
        self.variants.get(key).cloned().unwrap_or_default()
    }
}

fn strings<'a>(items: impl IntoIterator<Item = &'a String>) -> ConfigValue {
    ConfigValue::Array(items.into_iter().map(|s| s.clone().into()).collect())
}
