//! `theme('path', default)` evaluation in declaration values and at-rule params.

use bcss::Root;
use bcss::ast::{walk_at_rules_mut, walk_declarations_mut};
use bcss::segment;

use crate::BreezeError;
use crate::config::ResolvedConfig;

const FUNCTION: &str = "theme(";

pub fn evaluate_theme_functions(root: &mut Root, config: &ResolvedConfig) -> Result<(), BreezeError> {
    walk_declarations_mut(&mut root.nodes, &mut |decl| {
        if decl.value.contains(FUNCTION) {
            decl.value = replace_theme_calls(&decl.value, config)?;
        }
        Ok::<(), BreezeError>(())
    })?;
    walk_at_rules_mut(&mut root.nodes, &mut |at_rule| {
        if at_rule.params.contains(FUNCTION) {
            at_rule.params = replace_theme_calls(&at_rule.params, config)?;
        }
        Ok(())
    })
}

/// Replaces every `theme(...)` call in `input`.
///
/// ```rust
/// use breeze::config::{ConfigFragment, resolve_config};
/// use breeze::passes::functions::replace_theme_calls;
/// use serde_json::json;
///
/// let config = resolve_config(&[ConfigFragment::new()
///     .theme("spacing", json!({"2.5": "0.625rem"}))])
/// .unwrap();
/// assert_eq!(
///     replace_theme_calls("calc(theme('spacing[2.5]') * 2)", &config).unwrap(),
///     "calc(0.625rem * 2)"
/// );
/// ```
///
/// # Errors
///
/// [`BreezeError::MissingThemeValue`] when a path resolves to nothing and no
/// default is given.
pub fn replace_theme_calls(input: &str, config: &ResolvedConfig) -> Result<String, BreezeError> {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = find_call(rest) {
        output.push_str(&rest[..start]);
        let after = &rest[start + FUNCTION.len()..];

        // The first `)` at depth zero closes the call.
        let parts = segment(after, ')');
        if parts.len() < 2 {
            return Err(BreezeError::syntax(
                format!("Unclosed theme() call in `{input}`"),
                None,
            ));
        }
        let args = parts[0];
        output.push_str(&evaluate_call(args, config)?);
        rest = &after[args.len() + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Byte offset of the next `theme(` that is not part of a longer identifier.
fn find_call(input: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(found) = input[offset..].find(FUNCTION) {
        let start = offset + found;
        let preceded_by_ident = input[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_');
        if !preceded_by_ident {
            return Some(start);
        }
        offset = start + FUNCTION.len();
    }
    None
}

fn evaluate_call(args: &str, config: &ResolvedConfig) -> Result<String, BreezeError> {
    let args = segment(args, ',');
    let path = unquote(args[0]);
    let default = (args.len() > 1).then(|| {
        args[1..]
            .iter()
            .map(|arg| unquote(arg))
            .collect::<Vec<_>>()
            .join(", ")
    });

    match (config.theme_string(path), default) {
        (Some(value), _) => Ok(value),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(BreezeError::MissingThemeValue {
            path: path.to_string(),
        }),
    }
}

fn unquote(arg: &str) -> &str {
    let arg = arg.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = arg
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    arg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigFragment, resolve_config};
    use serde_json::json;

    fn config() -> ResolvedConfig {
        resolve_config(&[ConfigFragment::new()
            .theme("colors", json!({"gray": {"DEFAULT": "#888", "200": "#eee"}}))
            .theme("fontFamily", json!({"sans": ["Inter", "sans-serif"]}))])
        .unwrap()
    }

    #[test]
    fn replaces_calls() {
        let config = config();
        assert_eq!(
            replace_theme_calls("1px solid theme('colors.gray.200')", &config).unwrap(),
            "1px solid #eee"
        );
        assert_eq!(
            replace_theme_calls("theme(\"colors.gray\")", &config).unwrap(),
            "#888"
        );
        assert_eq!(
            replace_theme_calls("theme(fontFamily.sans)", &config).unwrap(),
            "Inter, sans-serif"
        );
    }

    #[test]
    fn defaults_and_missing() {
        let config = config();
        assert_eq!(
            replace_theme_calls("theme('colors.teal', 'red')", &config).unwrap(),
            "red"
        );
        assert!(matches!(
            replace_theme_calls("theme('colors.teal')", &config),
            Err(BreezeError::MissingThemeValue { .. })
        ));
    }

    #[test]
    fn ignores_longer_identifiers() {
        let config = config();
        assert_eq!(
            replace_theme_calls("my-theme(x)", &config).unwrap(),
            "my-theme(x)"
        );
    }
}
