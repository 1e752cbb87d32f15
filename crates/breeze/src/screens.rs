//! Breakpoints and the media queries built from them.
//!
//! `theme.screens` accepts three shapes per name:
//!
//! ```text
//! "sm": "640px"                                  (min-width: 640px)
//! "md": {"min": "768px", "max": "1023px"}        (min-width: 768px) and (max-width: 1023px)
//! "tall": {"raw": "(min-height: 800px)"}         (min-height: 800px)
//! "print": [{"max": "639px"}, {"min": "1280px"}] (max-width: 639px), (min-width: 1280px)
//! ```

use crate::config::{ConfigError, ConfigValue, format_number};

/// A named breakpoint, normalized to a union of ranges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub name: String,
    pub values: Vec<ScreenValue>,
}

/// One range of a screen: either a raw query or a list of `(feature, value)` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScreenValue {
    pub raw: Option<String>,
    pub features: Vec<(String, String)>,
}

impl ScreenValue {
    pub fn min(value: impl Into<String>) -> Self {
        Self {
            raw: None,
            features: vec![("min-width".to_string(), value.into())],
        }
    }

    fn feature(&self, name: &str) -> Option<&str> {
        self.features
            .iter()
            .find(|(feature, _)| feature == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn min_width(&self) -> Option<&str> {
        self.feature("min-width")
    }

    pub fn max_width(&self) -> Option<&str> {
        self.feature("max-width")
    }
}

/// Normalizes `theme.screens`, keeping configured order.
///
/// # Errors
///
/// [`ConfigError::InvalidScreen`] when a screen is neither a string, an object nor
/// an array of objects.
pub fn normalize_screens(screens: &ConfigValue) -> Result<Vec<Screen>, ConfigError> {
    let screens = match screens {
        ConfigValue::Object(map) => map,
        ConfigValue::Null => return Ok(Vec::new()),
        other => {
            return Err(ConfigError::InvalidScreen {
                name: "screens".into(),
                reason: format!("expected an object, got {other:?}"),
            });
        }
    };

    screens
        .iter()
        .map(|(name, value)| {
            let values = match value {
                ConfigValue::Array(ranges) => ranges
                    .iter()
                    .map(|range| normalize_range(name, range))
                    .collect::<Result<_, _>>()?,
                single => vec![normalize_range(name, single)?],
            };
            Ok(Screen {
                name: name.clone(),
                values,
            })
        })
        .collect()
}

fn normalize_range(name: &str, value: &ConfigValue) -> Result<ScreenValue, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidScreen {
        name: name.to_string(),
        reason,
    };

    match value {
        ConfigValue::String(min) => Ok(ScreenValue::min(min.clone())),
        ConfigValue::Number(min) => Ok(ScreenValue::min(format_number(*min))),
        ConfigValue::Object(map) => {
            if let Some(raw) = map.get("raw") {
                let raw = raw
                    .as_str()
                    .ok_or_else(|| invalid("`raw` must be a string".into()))?;
                return Ok(ScreenValue {
                    raw: Some(raw.to_string()),
                    features: Vec::new(),
                });
            }

            let features = map
                .iter()
                .map(|(feature, value)| {
                    let feature = match feature.as_str() {
                        "min" => "min-width",
                        "max" => "max-width",
                        other => other,
                    };
                    let value = value
                        .to_css_string()
                        .ok_or_else(|| invalid(format!("`{feature}` has no CSS value")))?;
                    Ok((feature.to_string(), value))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if features.is_empty() {
                return Err(invalid("a range needs at least one feature".into()));
            }
            Ok(ScreenValue {
                raw: None,
                features,
            })
        }
        other => Err(invalid(format!("unsupported value {other:?}"))),
    }
}

/// `(min-width: 640px) and (max-width: 767px)`, ranges joined with `, `.
pub fn build_media_query(screen: &Screen) -> String {
    screen
        .values
        .iter()
        .map(|value| match &value.raw {
            Some(raw) => raw.clone(),
            None => value
                .features
                .iter()
                .map(|(feature, value)| format!("({feature}: {value})"))
                .collect::<Vec<_>>()
                .join(" and "),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn screens(value: serde_json::Value) -> Vec<Screen> {
        normalize_screens(&value.into()).unwrap()
    }

    #[test]
    fn string_is_min_width() {
        let screens = screens(json!({"sm": "500px"}));
        assert_eq!(screens[0].values[0].min_width(), Some("500px"));
        assert_eq!(build_media_query(&screens[0]), "(min-width: 500px)");
    }

    #[test]
    fn min_and_max() {
        let screens = screens(json!({"md": {"min": "768px", "max": "1023px"}}));
        assert_eq!(
            build_media_query(&screens[0]),
            "(min-width: 768px) and (max-width: 1023px)"
        );
    }

    #[test]
    fn raw_and_ranges() {
        let screens = screens(json!({
            "tall": {"raw": "(min-height: 800px)"},
            "edges": [{"max": "639px"}, {"min-width": "1280px"}],
        }));
        assert_eq!(build_media_query(&screens[0]), "(min-height: 800px)");
        assert_eq!(
            build_media_query(&screens[1]),
            "(max-width: 639px), (min-width: 1280px)"
        );
    }

    #[test]
    fn order_is_preserved() {
        let names: Vec<String> = screens(json!({"sm": "500px", "lg": "1000px", "md": "750px"}))
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["sm", "lg", "md"]);
    }

    #[test]
    fn booleans_are_rejected() {
        assert!(normalize_screens(&json!({"sm": true}).into()).is_err());
    }
}
