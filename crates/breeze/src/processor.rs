//! Runs plugins once and the passes for every stylesheet.

use bcss::{Root, SelectorCache};

use crate::BreezeError;
use crate::config::ResolvedConfig;
use crate::passes;
use crate::plugin::{PluginApi, PluginOutput};
use crate::screens::Screen;
use crate::variants::VariantRegistry;

/// A compilation context built from a resolved configuration.
///
/// Construction runs every plugin: variants they add shadow built-ins of the same
/// name, and the rules they contribute wait for `@tailwind` directives.
///
/// ```rust
/// use bcss::{AtRule, Declaration, Node, Root, Rule};
/// use breeze::Processor;
/// use breeze::config::{ConfigFragment, resolve_config};
/// use serde_json::json;
///
/// let config = resolve_config(&[ConfigFragment::new().theme("screens", json!({"sm": "500px"}))]).unwrap();
/// let processor = Processor::new(config).unwrap();
///
/// let rule = Rule::from_selector(".foo", vec![Declaration::new("color", "red").into()]);
/// let mut root = Root::new(vec![AtRule::block("responsive", "", vec![rule.into()]).into()]);
/// processor.process(&mut root).unwrap();
/// assert_eq!(root.nodes.len(), 2);
/// ```
pub struct Processor {
    config: ResolvedConfig,
    registry: VariantRegistry,
    output: PluginOutput,
    screens: Vec<Screen>,
    cache: SelectorCache,
}

impl Processor {
    /// # Errors
    ///
    /// Whatever a plugin returns, or [`ConfigError::InvalidScreen`](crate::config::ConfigError)
    /// for a malformed `theme.screens`.
    pub fn new(config: ResolvedConfig) -> Result<Self, BreezeError> {
        let mut registry = VariantRegistry::with_builtins();
        let mut output = PluginOutput::default();

        for plugin in &config.plugins {
            let mut api = PluginApi::new(&config, &mut registry, &mut output);
            plugin.run(&mut api)?;
        }
        log::debug!(
            "ran {} plugins, {} variants registered",
            config.plugins.len(),
            registry.len()
        );

        let screens = config.screens()?;
        Ok(Self {
            config,
            registry,
            output,
            screens,
            cache: SelectorCache::new(),
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn cache(&self) -> &SelectorCache {
        &self.cache
    }

    /// Runs every pass over `root`. The selector cache is cleared first, so
    /// nothing carries over from a previous stylesheet.
    ///
    /// The passes work on a copy; `root` is only replaced once all of them
    /// succeed, so an error leaves it exactly as it was.
    pub fn process(&self, root: &mut Root) -> Result<(), BreezeError> {
        self.cache.reset();

        let mut working = root.clone();
        self.run_passes(&mut working)?;
        *root = working;

        log::debug!("processed stylesheet ({} cached selectors)", self.cache.len());
        Ok(())
    }

    fn run_passes(&self, root: &mut Root) -> Result<(), BreezeError> {
        passes::substitute_tailwind_at_rules(root, &self.output);
        passes::evaluate_theme_functions(root, &self.config)?;
        passes::substitute_variants_at_rules(root, &self.registry, &self.config, &self.cache)?;
        passes::substitute_responsive_at_rules(
            root,
            &self.screens,
            &self.config.separator,
            &self.cache,
        )?;
        passes::unwrap_variant_targets(root)?;
        passes::substitute_screen_at_rules(root, &self.screens)
    }
}
