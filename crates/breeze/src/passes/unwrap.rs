//! Turns anchor markers (`[.banana] .peel`) back into plain classes once every
//! variant has been applied.

use bcss::Root;
use bcss::ast::walk_style_rules_mut;
use bcss::selector::unwrap_variant_targets as unwrap_selector;

use crate::BreezeError;

pub fn unwrap_variant_targets(root: &mut Root) -> Result<(), BreezeError> {
    let mut unwrapped = 0usize;
    walk_style_rules_mut(&mut root.nodes, &mut |rule| {
        for selector in &mut rule.selectors {
            if !selector.contains("[.") {
                continue;
            }
            *selector = unwrap_selector(selector)
                .map_err(|err| BreezeError::at_node(err, rule.location))?;
            unwrapped += 1;
        }
        Ok::<(), BreezeError>(())
    })?;
    log::debug!("unwrapped {unwrapped} variant targets");
    Ok(())
}
