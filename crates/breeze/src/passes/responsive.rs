//! `@responsive { ... }` substitution.
//!
//! Every `@responsive` block is replaced by its own contents, and a copy of those
//! contents is collected. The collected rules are then re-emitted once per screen,
//! in configured order, with each selector prefixed by the screen name:
//!
//! ```text
//! @responsive { .foo, .bar { color: yellow; } }     .foo, .bar { color: yellow; }
//! @tailwind screens;                           →    @media (min-width: 500px) {
//!                                                     .sm\:foo, .sm\:bar { color: yellow; }
//!                                                   }
//! ```
//!
//! The media queries replace the first `@tailwind screens;` marker (or are appended
//! to the stylesheet when there is none).

use bcss::ast::walk_style_rules_mut;
use bcss::{AtRule, Node, Root, SelectorCache};

use crate::BreezeError;
use crate::screens::{Screen, build_media_query};

pub fn substitute_responsive_at_rules(
    root: &mut Root,
    screens: &[Screen],
    separator: &str,
    cache: &SelectorCache,
) -> Result<(), BreezeError> {
    let mut collected = Vec::new();
    unwrap_responsive(&mut root.nodes, Some(&mut collected));

    let mut media_queries = Vec::new();
    if !collected.is_empty() {
        for screen in screens {
            let mut nodes = collected.clone();
            walk_style_rules_mut(&mut nodes, &mut |rule| {
                for selector in &mut rule.selectors {
                    *selector = cache
                        .build_selector_variant(selector, &screen.name, separator)
                        .map_err(|err| BreezeError::at_node(err, rule.location))?;
                }
                Ok::<(), BreezeError>(())
            })?;
            media_queries.push(Node::from(AtRule::block(
                "media",
                build_media_query(screen),
                nodes,
            )));
        }
    }
    log::debug!(
        "collected {} responsive nodes into {} media queries",
        collected.len(),
        media_queries.len()
    );

    let mut pending = (!media_queries.is_empty()).then_some(media_queries);
    replace_screens_marker(&mut root.nodes, &mut pending);
    if let Some(media_queries) = pending {
        root.nodes.extend(media_queries);
    }
    Ok(())
}

/// Replaces each `@responsive` block with its children, copying them into
/// `collected`. Blocks nested inside another `@responsive` are flattened without
/// being collected twice.
fn unwrap_responsive(nodes: &mut Vec<Node>, mut collected: Option<&mut Vec<Node>>) {
    let mut index = 0;
    while index < nodes.len() {
        match &mut nodes[index] {
            Node::AtRule(at_rule) if at_rule.is_named("responsive") => {
                let mut children = at_rule.take_nodes();
                unwrap_responsive(&mut children, None);
                if let Some(collected) = collected.as_deref_mut() {
                    collected.extend(children.iter().cloned());
                }
                let count = children.len();
                nodes.splice(index..=index, children);
                index += count;
            }
            node => {
                if let Some(children) = node.children_mut() {
                    unwrap_responsive(children, collected.as_deref_mut());
                }
                index += 1;
            }
        }
    }
}

fn is_screens_marker(node: &Node) -> bool {
    matches!(node, Node::AtRule(at_rule)
        if at_rule.is_named("tailwind") && at_rule.params.trim() == "screens")
}

/// Removes every `@tailwind screens` marker, inserting `pending` at the first.
fn replace_screens_marker(nodes: &mut Vec<Node>, pending: &mut Option<Vec<Node>>) {
    let mut index = 0;
    while index < nodes.len() {
        if is_screens_marker(&nodes[index]) {
            let replacement = pending.take().unwrap_or_default();
            let count = replacement.len();
            nodes.splice(index..=index, replacement);
            index += count;
            continue;
        }
        if let Some(children) = nodes[index].children_mut() {
            replace_screens_marker(children, pending);
        }
        index += 1;
    }
}
