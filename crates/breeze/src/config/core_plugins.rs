//! Names of the built-in utility families and `corePlugins` merging.

use indexmap::IndexSet;

use super::value::ConfigValue;

/// Every core plugin name, in generation order.
pub const CORE_PLUGINS: &[&str] = &[
    "preflight",
    "container",
    "space",
    "divideWidth",
    "divideColor",
    "divideStyle",
    "divideOpacity",
    "accessibility",
    "appearance",
    "backgroundAttachment",
    "backgroundClip",
    "backgroundColor",
    "backgroundImage",
    "gradientColorStops",
    "backgroundOpacity",
    "backgroundPosition",
    "backgroundRepeat",
    "backgroundSize",
    "borderCollapse",
    "borderColor",
    "borderOpacity",
    "borderRadius",
    "borderStyle",
    "borderWidth",
    "boxSizing",
    "cursor",
    "display",
    "flexDirection",
    "flexWrap",
    "placeItems",
    "placeContent",
    "placeSelf",
    "alignItems",
    "alignContent",
    "alignSelf",
    "justifyItems",
    "justifyContent",
    "justifySelf",
    "flex",
    "flexGrow",
    "flexShrink",
    "order",
    "float",
    "clear",
    "fontFamily",
    "fontWeight",
    "height",
    "fontSize",
    "lineHeight",
    "listStylePosition",
    "listStyleType",
    "margin",
    "maxHeight",
    "maxWidth",
    "minHeight",
    "minWidth",
    "objectFit",
    "objectPosition",
    "opacity",
    "outline",
    "overflow",
    "overscrollBehavior",
    "padding",
    "placeholderColor",
    "placeholderOpacity",
    "pointerEvents",
    "position",
    "inset",
    "resize",
    "boxShadow",
    "ringWidth",
    "ringOffsetColor",
    "ringOffsetWidth",
    "ringColor",
    "ringOpacity",
    "fill",
    "stroke",
    "strokeWidth",
    "tableLayout",
    "textAlign",
    "textColor",
    "textOpacity",
    "textOverflow",
    "fontStyle",
    "textTransform",
    "textDecoration",
    "fontSmoothing",
    "fontVariantNumeric",
    "letterSpacing",
    "userSelect",
    "verticalAlign",
    "visibility",
    "whitespace",
    "wordBreak",
    "width",
    "zIndex",
    "gap",
    "gridAutoFlow",
    "gridTemplateColumns",
    "gridAutoColumns",
    "gridColumn",
    "gridColumnStart",
    "gridColumnEnd",
    "gridTemplateRows",
    "gridAutoRows",
    "gridRow",
    "gridRowStart",
    "gridRowEnd",
    "transform",
    "transformOrigin",
    "scale",
    "rotate",
    "translate",
    "skew",
    "transitionProperty",
    "transitionTimingFunction",
    "transitionDuration",
    "transitionDelay",
    "animation",
];

/// Applies `corePlugins` settings, weakest first, starting from every plugin enabled.
///
/// - `false` disables everything, `true` enables everything
/// - an array enables exactly the names listed
/// - an object switches individual names on or off
pub(crate) fn resolve_core_plugins<'a>(
    settings: impl IntoIterator<Item = &'a ConfigValue>,
) -> IndexSet<String> {
    let all = || CORE_PLUGINS.iter().map(|name| name.to_string()).collect();
    let mut enabled: IndexSet<String> = all();

    for setting in settings {
        match setting {
            ConfigValue::Bool(false) => enabled.clear(),
            ConfigValue::Bool(true) => enabled = all(),
            ConfigValue::Array(names) => {
                enabled = names
                    .iter()
                    .filter_map(ConfigValue::as_str)
                    .inspect(|name| warn_unknown(name))
                    .map(str::to_string)
                    .collect();
            }
            ConfigValue::Object(patch) => {
                for (name, value) in patch {
                    warn_unknown(name);
                    if value.as_bool() == Some(false) {
                        enabled.shift_remove(name);
                    } else {
                        enabled.insert(name.clone());
                    }
                }
            }
            other => log::warn!("ignoring corePlugins value {other:?}"),
        }
    }
    enabled
}

fn warn_unknown(name: &str) {
    if !CORE_PLUGINS.contains(&name) {
        log::warn!("corePlugins mentions unknown core plugin `{name}`");
    }
}
