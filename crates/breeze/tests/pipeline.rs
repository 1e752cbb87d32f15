use bcss::{AtRule, Declaration, Node, Root, Rule};
use breeze::config::{ConfigFragment, resolve_config};
use breeze::{BreezeError, Plugin, Processor, UtilityOptions, compile};
use pretty_assertions::assert_eq;
use serde_json::json;

fn rule(selector: &str, property: &str, value: &str) -> Node {
    Rule::from_selector(selector, vec![Declaration::new(property, value).into()]).into()
}

fn tailwind(layer: &str) -> Node {
    AtRule::statement("tailwind", layer).into()
}

fn screens() -> ConfigFragment {
    ConfigFragment::new().theme("screens", json!({"sm": "640px", "md": "768px"}))
}

// ============================================================================
// @screen
// ============================================================================

#[test]
fn test_screen_at_rule() {
    let mut root = Root::new(vec![
        AtRule::block("screen", "md", vec![rule(".a", "float", "left")]).into(),
    ]);
    compile(&mut root, &[screens()]).unwrap();

    assert_eq!(
        root.to_string(),
        "@media (min-width: 768px) {\n  .a {\n    float: left;\n  }\n}\n"
    );
}

#[test]
fn test_unknown_screen() {
    let mut root = Root::new(vec![
        AtRule::block("screen", "xl", vec![rule(".a", "float", "left")]).into(),
    ]);
    let err = compile(&mut root, &[screens()]).unwrap_err();

    assert!(matches!(&err, BreezeError::UnknownScreen(name) if name == "xl"));
    assert_eq!(err.to_string(), "No `xl` screen found.");
}

// ============================================================================
// theme()
// ============================================================================

#[test]
fn test_theme_function_in_values_and_params() {
    let config = screens().theme("colors", json!({"gray": {"200": "#eee"}}));
    let mut root = Root::new(vec![
        AtRule::block(
            "media",
            "(min-width: theme('screens.md'))",
            vec![rule(".a", "border", "1px solid theme('colors.gray.200')")],
        )
        .into(),
        rule(".b", "color", "theme('colors.teal', #0ff)"),
    ]);
    compile(&mut root, &[config]).unwrap();

    assert_eq!(
        root.to_string(),
        r"@media (min-width: 768px) {
  .a {
    border: 1px solid #eee;
  }
}
.b {
  color: #0ff;
}
"
    );
}

#[test]
fn test_theme_function_missing_value() {
    let mut root = Root::new(vec![rule(".a", "color", "theme('colors.nope')")]);
    let err = compile(&mut root, &[ConfigFragment::new()]).unwrap_err();

    assert_eq!(
        err.to_string(),
        "'colors.nope' does not exist in your theme config."
    );
}

// ============================================================================
// @tailwind AND PLUGINS
// ============================================================================

fn layered_plugin() -> Plugin {
    Plugin::new(|api| {
        api.add_base(vec![rule("h1", "font-size", "2rem")]);
        api.add_components(vec![rule(".btn", "padding", "1rem")], UtilityOptions::components())?;
        api.add_utilities(
            vec![rule(".rotate-90", "transform", "rotate(90deg)")],
            UtilityOptions::default().with_variants(["responsive", "hover"]),
        )
    })
}

#[test]
fn test_tailwind_layers_with_prefix_and_important() {
    let mut root = Root::new(vec![
        tailwind("base"),
        tailwind("components"),
        tailwind("utilities"),
        tailwind("screens"),
    ]);
    let config = ConfigFragment::new()
        .theme("screens", json!({"sm": "640px"}))
        .prefix("tw-")
        .important(true)
        .plugin(layered_plugin());
    compile(&mut root, &[config]).unwrap();

    assert_eq!(
        root.to_string(),
        r"h1 {
  font-size: 2rem;
}
.tw-btn {
  padding: 1rem;
}
.tw-rotate-90 {
  transform: rotate(90deg) !important;
}
.hover\:tw-rotate-90:hover {
  transform: rotate(90deg) !important;
}
@media (min-width: 640px) {
  .sm\:tw-rotate-90 {
    transform: rotate(90deg) !important;
  }
  .sm\:hover\:tw-rotate-90:hover {
    transform: rotate(90deg) !important;
  }
}
"
    );
}

#[test]
fn test_important_selector_scopes_utilities() {
    let plugin = Plugin::new(|api| {
        api.add_utilities(
            vec![rule(".a", "color", "red")],
            UtilityOptions::default().with_variants(["hover"]),
        )
    });
    let mut root = Root::new(vec![tailwind("utilities")]);
    compile(
        &mut root,
        &[ConfigFragment::new().important("#app").plugin(plugin)],
    )
    .unwrap();

    assert_eq!(
        root.to_string(),
        "#app .a {\n  color: red;\n}\n#app .hover\\:a:hover {\n  color: red;\n}\n"
    );
}

#[test]
fn test_utilities_can_opt_out_of_prefix() {
    let plugin = Plugin::new(|api| {
        let options = UtilityOptions {
            respect_prefix: false,
            ..UtilityOptions::default()
        };
        api.add_utilities(vec![rule(".raw", "color", "red")], options)
    });
    let mut root = Root::new(vec![tailwind("utilities")]);
    compile(&mut root, &[ConfigFragment::new().prefix("tw-").plugin(plugin)]).unwrap();

    assert_eq!(root.to_string(), ".raw {\n  color: red;\n}\n");
}

fn text_color_plugin() -> Plugin {
    Plugin::new(|api| {
        if !api.core_plugin_enabled("textColor") {
            return Ok(());
        }
        let colors = api
            .theme("colors")
            .and_then(|colors| colors.as_object().cloned())
            .unwrap_or_default();
        let nodes: Vec<Node> = colors
            .iter()
            .filter_map(|(name, value)| {
                let selector = format!(".{}", api.e(&format!("text-{name}")));
                Some(rule(&selector, "color", &value.to_css_string()?))
            })
            .collect();
        let variants = api.variants("textColor");
        api.add_utilities(nodes, UtilityOptions::default().with_variants(variants))
    })
}

#[test]
fn test_plugin_reads_theme_and_variants() {
    let config = ConfigFragment::new()
        .theme("colors", json!({"red": "#f00", "1/2": "#888"}))
        .variants("textColor", ["focus"])
        .plugin(text_color_plugin());
    let mut root = Root::new(vec![tailwind("utilities")]);
    compile(&mut root, &[config]).unwrap();

    assert_eq!(
        root.to_string(),
        r".text-red {
  color: #f00;
}
.text-1\/2 {
  color: #888;
}
.focus\:text-red:focus {
  color: #f00;
}
.focus\:text-1\/2:focus {
  color: #888;
}
"
    );
}

#[test]
fn test_plugin_respects_disabled_core_plugin() {
    let config = ConfigFragment::new()
        .theme("colors", json!({"red": "#f00"}))
        .core_plugins(json!({"textColor": false}))
        .plugin(text_color_plugin());
    let mut root = Root::new(vec![tailwind("utilities")]);
    compile(&mut root, &[config]).unwrap();

    assert_eq!(root.to_string(), "");
}

#[test]
fn test_plugin_error_aborts() {
    let plugin = Plugin::new(|_| Err(BreezeError::Plugin("boom".into())));
    let mut root = Root::new(vec![tailwind("utilities")]);
    let err = compile(&mut root, &[ConfigFragment::new().plugin(plugin)]).unwrap_err();

    assert_eq!(err.to_string(), "Plugin error: boom");
}

#[test]
fn test_unknown_tailwind_directive_is_kept() {
    let mut root = Root::new(vec![tailwind("variants")]);
    compile(&mut root, &[ConfigFragment::new()]).unwrap();

    assert_eq!(root.to_string(), "@tailwind variants;\n");
}

// ============================================================================
// VARIANT TARGETS
// ============================================================================

#[test]
fn test_anchors_are_unwrapped() {
    let mut root = Root::new(vec![
        AtRule::block("variants", "hover", vec![rule("[.banana] .peel", "color", "yellow")])
            .into(),
    ]);
    compile(&mut root, &[ConfigFragment::new()]).unwrap();

    assert_eq!(
        root.to_string(),
        r".banana .peel {
  color: yellow;
}
.hover\:banana:hover .peel {
  color: yellow;
}
"
    );
}

// ============================================================================
// PROCESSOR
// ============================================================================

#[test]
fn test_processor_is_reusable() {
    let config = resolve_config(&[screens()]).unwrap();
    let processor = Processor::new(config).unwrap();
    let stylesheet = || {
        Root::new(vec![
            AtRule::block("responsive", "", vec![rule(".a", "float", "left")]).into(),
            AtRule::block("variants", "hover", vec![rule(".b", "color", "red")]).into(),
        ])
    };

    let mut first = stylesheet();
    let mut second = stylesheet();
    processor.process(&mut first).unwrap();
    processor.process(&mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(processor.screens().len(), 2);
    assert!(!processor.cache().is_empty());
}

#[test]
fn test_failed_compilation_reports_first_error() {
    let mut root = Root::new(vec![
        AtRule::block("screen", "xl", vec![]).into(),
        AtRule::block("variants", "wiggle", vec![rule(".a", "color", "red")]).into(),
    ]);
    let err = compile(&mut root, &[screens()]).unwrap_err();

    // @variants runs before @screen.
    assert!(matches!(err, BreezeError::UnknownVariant { .. }));
}
