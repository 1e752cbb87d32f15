//! `@screen <name> { ... }` → `@media <query> { ... }`.

use bcss::Root;
use bcss::ast::walk_at_rules_mut;

use crate::BreezeError;
use crate::screens::{Screen, build_media_query};

pub fn substitute_screen_at_rules(root: &mut Root, screens: &[Screen]) -> Result<(), BreezeError> {
    walk_at_rules_mut(&mut root.nodes, &mut |at_rule| {
        if !at_rule.is_named("screen") {
            return Ok(());
        }
        let name = at_rule.params.trim();
        let screen = screens
            .iter()
            .find(|screen| screen.name == name)
            .ok_or_else(|| BreezeError::UnknownScreen(name.to_string()))?;

        log::trace!("@screen {name}");
        at_rule.name = "media".to_string();
        at_rule.params = build_media_query(screen);
        Ok(())
    })
}
