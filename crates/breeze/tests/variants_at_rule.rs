use bcss::{AtRule, BcssError, Declaration, Node, Root, Rule, SourceLocation, escape_class_name};
use breeze::config::ConfigFragment;
use breeze::variants::variant_handler;
use breeze::{BreezeError, Plugin, VariantOptions, compile};
use pretty_assertions::assert_eq;
use serde_json::json;

fn rule(selector: &str) -> Node {
    Rule::from_selector(selector, vec![Declaration::new("color", "red").into()]).into()
}

fn variants(params: &str, nodes: Vec<Node>) -> Root {
    Root::new(vec![AtRule::block("variants", params, nodes).into()])
}

fn run(mut root: Root, fragments: &[ConfigFragment]) -> String {
    compile(&mut root, fragments).unwrap();
    root.to_string()
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn test_variants_follow_listed_order() {
    let output = run(
        variants("focus, active, hover", vec![rule(".banana")]),
        &[ConfigFragment::new()],
    );

    assert_eq!(
        output,
        r".banana {
  color: red;
}
.focus\:banana:focus {
  color: red;
}
.active\:banana:active {
  color: red;
}
.hover\:banana:hover {
  color: red;
}
"
    );
}

#[test]
fn test_explicit_default_position() {
    let output = run(
        variants("hover, default", vec![rule(".banana")]),
        &[ConfigFragment::new()],
    );

    assert_eq!(
        output,
        r".hover\:banana:hover {
  color: red;
}
.banana {
  color: red;
}
"
    );
}

#[test]
fn test_pseudo_class_variants() {
    let output = run(
        variants("first, odd, focus-within", vec![rule(".chocolate .bar")]),
        &[ConfigFragment::new()],
    );

    assert_eq!(
        output,
        r".chocolate .bar {
  color: red;
}
.first\:chocolate:first-child .first\:bar:first-child {
  color: red;
}
.odd\:chocolate:nth-child(odd) .odd\:bar:nth-child(odd) {
  color: red;
}
.focus-within\:chocolate:focus-within .focus-within\:bar:focus-within {
  color: red;
}
"
    );
}

#[test]
fn test_custom_separator() {
    let output = run(
        variants("hover", vec![rule(".banana")]),
        &[ConfigFragment::new().separator("_")],
    );

    assert_eq!(
        output,
        r".banana {
  color: red;
}
.hover_banana:hover {
  color: red;
}
"
    );
}

// ============================================================================
// GROUP VARIANTS
// ============================================================================

#[test]
fn test_group_hover_and_focus() {
    let output = run(
        variants("group-hover, group-focus", vec![rule(".banana")]),
        &[ConfigFragment::new()],
    );

    assert_eq!(
        output,
        r".banana {
  color: red;
}
.group:hover .group-hover\:banana {
  color: red;
}
.group:focus .group-focus\:banana {
  color: red;
}
"
    );
}

#[test]
fn test_group_hover_multiple_classes() {
    let output = run(
        variants("group-hover", vec![rule(".a .b"), rule(".c.d")]),
        &[ConfigFragment::new()],
    );

    assert_eq!(
        output,
        r".a .b {
  color: red;
}
.c.d {
  color: red;
}
.group:hover .group-hover\:a .group-hover\:b {
  color: red;
}
.group:hover .group-hover\:c.group-hover\:d {
  color: red;
}
"
    );
}

#[test]
fn test_group_class_is_prefixed() {
    let output = run(
        variants("group-hover", vec![rule(".tw-banana")]),
        &[ConfigFragment::new().prefix("tw-")],
    );

    assert!(output.contains(r".tw-group:hover .group-hover\:tw-banana {"));
}

// ============================================================================
// STACKABLE VARIANTS
// ============================================================================

#[test]
fn test_motion_safe_wraps_pseudo_class_variants() {
    let output = run(
        variants("motion-safe, hover", vec![rule(".x")]),
        &[ConfigFragment::new()],
    );

    assert_eq!(
        output,
        r".x {
  color: red;
}
.hover\:x:hover {
  color: red;
}
@media (prefers-reduced-motion: no-preference) {
  .motion-safe\:x {
    color: red;
  }
  .motion-safe\:hover\:x:hover {
    color: red;
  }
}
"
    );
}

#[test]
fn test_motion_reduce_alone() {
    let output = run(
        variants("motion-reduce", vec![rule(".x")]),
        &[ConfigFragment::new()],
    );

    assert_eq!(
        output,
        r".x {
  color: red;
}
@media (prefers-reduced-motion: reduce) {
  .motion-reduce\:x {
    color: red;
  }
}
"
    );
}

// ============================================================================
// DARK MODE
// ============================================================================

#[test]
fn test_dark_disabled_emits_nothing() {
    let output = run(
        variants("dark", vec![rule(".x")]),
        &[ConfigFragment::new()],
    );

    assert_eq!(output, ".x {\n  color: red;\n}\n");
}

#[test]
fn test_dark_media() {
    let output = run(
        variants("dark", vec![rule(".x")]),
        &[ConfigFragment::new().dark_mode("media")],
    );

    assert_eq!(
        output,
        r".x {
  color: red;
}
@media (prefers-color-scheme: dark) {
  .dark\:x {
    color: red;
  }
}
"
    );
}

#[test]
fn test_dark_class() {
    let output = run(
        variants("dark", vec![rule(".x")]),
        &[ConfigFragment::new().dark_mode("class")],
    );

    assert_eq!(
        output,
        r".x {
  color: red;
}
.dark .dark\:x {
  color: red;
}
"
    );
}

#[test]
fn test_dark_class_with_custom_selector_and_prefix() {
    let output = run(
        variants("dark", vec![rule(".tw-x")]),
        &[ConfigFragment::new()
            .dark_mode(json!(["class", ".night"]))
            .prefix("tw-")],
    );

    assert!(output.contains(r".tw-night .dark\:tw-x {"));
}

#[test]
fn test_dark_stacks_outside_hover() {
    let output = run(
        variants("hover, dark", vec![rule(".x")]),
        &[ConfigFragment::new().dark_mode("class")],
    );

    assert!(output.contains(r".dark .dark\:hover\:x:hover {"));
}

// ============================================================================
// NESTING AND PASS-THROUGH
// ============================================================================

#[test]
fn test_nested_variants_are_expanded_first() {
    let root = variants(
        "focus",
        vec![AtRule::block("variants", "hover", vec![rule(".a")]).into()],
    );
    let output = run(root, &[ConfigFragment::new()]);

    assert_eq!(
        output,
        r".a {
  color: red;
}
.hover\:a:hover {
  color: red;
}
.focus\:a:focus {
  color: red;
}
.focus\:hover\:a:hover:focus {
  color: red;
}
"
    );
}

#[test]
fn test_responsive_inside_variants() {
    let output = run(
        variants("responsive, hover", vec![rule(".x")]),
        &[ConfigFragment::new().theme("screens", json!({"sm": "500px"}))],
    );

    assert_eq!(
        output,
        r".x {
  color: red;
}
.hover\:x:hover {
  color: red;
}
@media (min-width: 500px) {
  .sm\:x {
    color: red;
  }
  .sm\:hover\:x:hover {
    color: red;
  }
}
"
    );
}

#[test]
fn test_keyframes_are_left_alone() {
    let keyframes = AtRule::block(
        "keyframes",
        "spin",
        vec![
            Rule::from_selector("to", vec![Declaration::new("transform", "rotate(360deg)").into()])
                .into(),
        ],
    );
    let mut root = variants("hover", vec![keyframes.into(), rule(".spin")]);
    compile(&mut root, &[ConfigFragment::new()]).unwrap();

    let selectors: Vec<String> = root.rules().iter().map(|r| r.selector()).collect();
    assert_eq!(selectors, vec!["to", ".spin", "to", r".hover\:spin:hover"]);
}

#[test]
fn test_non_variant_rules_untouched() {
    let mut root = Root::new(vec![rule(".plain"), AtRule::statement("import", "'x.css'").into()]);
    let before = root.clone();
    compile(&mut root, &[ConfigFragment::new()]).unwrap();
    assert_eq!(root, before);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_unknown_variant() {
    let mut root = variants("hover, wiggle", vec![rule(".x")]);
    let err = compile(&mut root, &[ConfigFragment::new()]).unwrap_err();

    assert!(matches!(&err, BreezeError::UnknownVariant { name, location: None } if name == "wiggle"));
    assert_eq!(
        err.to_string(),
        "Your config mentions the \"wiggle\" variant, but \"wiggle\" doesn't appear to be a variant. Did you forget or misconfigure a plugin that supplies that variant?"
    );
}

#[test]
fn test_unknown_variant_reports_location() {
    let at_rule = AtRule::block("variants", "wiggle", vec![rule(".x")]).at(SourceLocation::new(7, 5));
    let mut root = Root::new(vec![at_rule.into()]);
    let err = compile(&mut root, &[ConfigFragment::new()]).unwrap_err();

    assert!(matches!(
        &err,
        BreezeError::UnknownVariant { location: Some(location), .. } if *location == SourceLocation::new(7, 5)
    ));
    assert!(err.to_string().ends_with("supplies that variant? (at 7:5)"));
}

#[test]
fn test_selector_without_class_reports_location() {
    let at_rule = AtRule::block("variants", "hover", vec![rule("div")]).at(SourceLocation::new(3, 1));
    let mut root = Root::new(vec![at_rule.into()]);
    let err = compile(&mut root, &[ConfigFragment::new()]).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Variant cannot be generated because selector contains no classes. (at 3:1)"
    );
}

// ============================================================================
// PLUGIN VARIANTS
// ============================================================================

#[test]
fn test_plugin_variant_shadows_builtin() {
    let plugin = Plugin::new(|api| {
        api.add_variant(
            "hover",
            variant_handler(|ctx| {
                ctx.modify_selectors(|args| Ok(format!(".custom {}", args.selector)))
            }),
            VariantOptions::empty(),
        );
        Ok(())
    });
    let output = run(
        variants("hover", vec![rule(".x")]),
        &[ConfigFragment::new().plugin(plugin)],
    );

    assert_eq!(output, ".x {\n  color: red;\n}\n.custom .x {\n  color: red;\n}\n");
}

#[test]
fn test_plugin_stackable_variant() {
    let plugin = Plugin::new(|api| {
        api.add_variant(
            "print",
            variant_handler(|ctx| {
                let nodes =
                    ctx.modify_selectors(|args| ctx.build_selector_variant(args.selector))?;
                Ok(breeze::VariantContext::wrap(nodes, "media", "print"))
            }),
            VariantOptions::STACKABLE,
        );
        Ok(())
    });
    let output = run(
        variants("print, focus", vec![rule(".x")]),
        &[ConfigFragment::new().plugin(plugin)],
    );

    assert_eq!(
        output,
        r".x {
  color: red;
}
.focus\:x:focus {
  color: red;
}
@media print {
  .print\:x {
    color: red;
  }
  .print\:focus\:x:focus {
    color: red;
  }
}
"
    );
}

fn peer_checked_plugin() -> Plugin {
    Plugin::new(|api| {
        api.add_variant(
            "peer-checked",
            variant_handler(|ctx| {
                ctx.modify_selectors(|args| {
                    let name = args.class_name().ok_or_else(|| {
                        ctx.error(BcssError::NoClassInSelector {
                            selector: args.selector.to_string(),
                        })
                    })?;
                    let class = escape_class_name(&format!("peer-checked:{name}"));
                    Ok(format!(".peer:checked ~ .{class}"))
                })
            }),
            VariantOptions::empty(),
        );
        Ok(())
    })
}

#[test]
fn test_plugin_variant_reads_class_name() {
    let output = run(
        variants("peer-checked", vec![rule(".toggle")]),
        &[ConfigFragment::new().plugin(peer_checked_plugin())],
    );

    assert_eq!(
        output,
        r".toggle {
  color: red;
}
.peer:checked ~ .peer-checked\:toggle {
  color: red;
}
"
    );
}

#[test]
fn test_plugin_variant_without_class_name() {
    let at_rule =
        AtRule::block("variants", "peer-checked", vec![rule("input")]).at(SourceLocation::new(2, 1));
    let mut root = Root::new(vec![at_rule.into()]);
    let err = compile(&mut root, &[ConfigFragment::new().plugin(peer_checked_plugin())]).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Variant cannot be generated because selector contains no classes. (at 2:1)"
    );
}
