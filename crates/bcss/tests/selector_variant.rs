//! Integration tests for selector variant rewrites.

use bcss::BcssError;
use bcss::selector::{
    SelectorCache, build_selector_variant, class_name_of, group_variant, prefix_selector,
    pseudo_class_variant, unwrap_variant_targets,
};

// ============================================================================
// BUILD SELECTOR VARIANT
// ============================================================================

#[test]
fn test_prefixes_last_class_by_default() {
    assert_eq!(
        build_selector_variant(".banana .peel", "hover", ":").unwrap(),
        r".banana .hover\:peel"
    );
}

#[test]
fn test_prefixes_explicit_anchor() {
    assert_eq!(
        build_selector_variant("[.banana] .peel", "hover", ":").unwrap(),
        r"[.hover\:banana] .peel"
    );
}

#[test]
fn test_no_class_is_error() {
    assert_eq!(
        build_selector_variant("div", "sm", ":"),
        Err(BcssError::NoClassInSelector {
            selector: "div".into()
        })
    );
    assert!(build_selector_variant("#main > a:hover", "sm", ":").is_err());
}

#[test]
fn test_last_class_of_compound() {
    assert_eq!(
        build_selector_variant("div.card.active:hover", "md", ":").unwrap(),
        r"div.card.md\:active:hover"
    );
}

#[test]
fn test_stacks_on_escaped_class() {
    assert_eq!(
        build_selector_variant(r".hover\:foo:hover", "sm", ":").unwrap(),
        r".sm\:hover\:foo:hover"
    );
}

#[test]
fn test_custom_separator() {
    assert_eq!(
        build_selector_variant(".foo", "sm", "__").unwrap(),
        ".sm__foo"
    );
}

#[test]
fn test_digit_leading_variant_is_escaped() {
    assert_eq!(
        build_selector_variant(".flex", "2xl", ":").unwrap(),
        r".\32 xl\:flex"
    );
}

#[test]
fn test_only_first_selector_of_list() {
    assert_eq!(
        build_selector_variant(".a, .b", "sm", ":").unwrap(),
        r".sm\:a, .b"
    );
}

// ============================================================================
// PSEUDO-CLASS AND GROUP VARIANTS
// ============================================================================

#[test]
fn test_pseudo_class_variant_appends_pseudo() {
    assert_eq!(
        pseudo_class_variant(".banana", "focus", ":", "focus").unwrap(),
        r".focus\:banana:focus"
    );
}

#[test]
fn test_pseudo_class_variant_rewrites_every_class() {
    assert_eq!(
        pseudo_class_variant(".a .b", "hover", ":", "hover").unwrap(),
        r".hover\:a:hover .hover\:b:hover"
    );
}

#[test]
fn test_pseudo_class_variant_targets_anchor_only() {
    assert_eq!(
        pseudo_class_variant("[.a] .b", "first", ":", "first-child").unwrap(),
        r"[.first\:a]:first-child .b"
    );
}

#[test]
fn test_pseudo_class_variant_keeps_pseudo_element_last() {
    assert_eq!(
        pseudo_class_variant(".a::before", "hover", ":", "hover").unwrap(),
        r".hover\:a:hover::before"
    );
}

#[test]
fn test_group_variant_inserts_ancestor() {
    assert_eq!(
        group_variant(".banana", "group-hover", ":", "group", "hover").unwrap(),
        r".group:hover .group-hover\:banana"
    );
}

#[test]
fn test_group_variant_with_prefix() {
    assert_eq!(
        group_variant(".tw-banana", "group-focus", ":", "tw-group", "focus").unwrap(),
        r".tw-group:focus .group-focus\:tw-banana"
    );
}

#[test]
fn test_group_variant_compound_classes() {
    assert_eq!(
        group_variant(".a.b", "group-hover", ":", "group", "hover").unwrap(),
        r".group:hover .group-hover\:a.group-hover\:b"
    );
}

#[test]
fn test_group_variant_descendant_classes() {
    assert_eq!(
        group_variant(".a .b", "group-hover", ":", "group", "hover").unwrap(),
        r".group:hover .group-hover\:a .group-hover\:b"
    );
    assert_eq!(
        group_variant(".a > .b:focus, .c", "group-hover", ":", "group", "hover").unwrap(),
        r".group:hover .group-hover\:a > .group-hover\:b:focus, .group:hover .group-hover\:c"
    );
}

#[test]
fn test_group_variant_targets_anchor_only() {
    assert_eq!(
        group_variant("[.card] .title", "group-hover", ":", "group", "hover").unwrap(),
        r".group:hover [.group-hover\:card] .title"
    );
}

// ============================================================================
// PREFIX, UNWRAP, CLASS NAME
// ============================================================================

#[test]
fn test_prefix_selector() {
    assert_eq!(
        prefix_selector("tw-", ".group:hover .a").unwrap(),
        ".tw-group:hover .tw-a"
    );
    assert_eq!(prefix_selector("", "not parsed {").unwrap(), "not parsed {");
}

#[test]
fn test_unwrap_variant_targets() {
    assert_eq!(
        unwrap_variant_targets(r"[.sm\:banana] .peel").unwrap(),
        r".sm\:banana .peel"
    );
    assert_eq!(unwrap_variant_targets(".plain").unwrap(), ".plain");
}

#[test]
fn test_class_name_of() {
    assert_eq!(class_name_of(r".a .sm\:b").as_deref(), Some("sm:b"));
    assert_eq!(class_name_of("div"), None);
}

// ============================================================================
// CACHE
// ============================================================================

#[test]
fn test_cache_memoizes_and_resets() {
    let cache = SelectorCache::new();
    let first = cache.build_selector_variant(".foo", "sm", ":").unwrap();
    let second = cache.build_selector_variant(".foo", "sm", ":").unwrap();
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);

    cache.build_selector_variant(".foo", "md", ":").unwrap();
    assert_eq!(cache.len(), 2);

    cache.reset();
    assert!(cache.is_empty());
}

#[test]
fn test_cache_does_not_store_failures() {
    let cache = SelectorCache::new();
    assert!(cache.build_selector_variant("div", "sm", ":").is_err());
    assert!(cache.is_empty());
}
