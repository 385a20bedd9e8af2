//! Declarative attribute sets.
//!
//! A progress view can be described by name→value string pairs, the way a
//! layout file would declare it. Names follow the widget's property names
//! (`labelColorInner`, `highlightWidth`, ...), optionally prefixed with
//! `progressView_`; snake_case spellings are accepted too. Values are plain
//! strings: numbers, `true`/`false`, `#RRGGBB` colors, or the lowercase name
//! or index of an enumerated option.
//!
//! Parsing comes in two flavours. The lenient parser, used by
//! [`Config::from_attributes`], logs and skips anything it cannot read so the
//! affected property keeps its default. The strict parser, used by
//! [`Config::try_from_attributes`], stops at the first problem.

use crate::animation::ProgressAnimation;
use crate::config::Config;
use crate::error::{AttributeError, Result};
use crate::geometry::Orientation;
use crate::label::{LabelConstraints, LabelGravity, Typeface};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

const PREFIX: &str = "progressView_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attr {
    Width,
    Height,
    Orientation,
    Padding,
    Min,
    Max,
    Progress,
    ProgressFromPrevious,
    AutoAnimate,
    Duration,
    Animation,
    ColorBackground,
    BorderColor,
    BorderWidth,
    Radius,
    ColorProgress,
    ColorGradientStart,
    ColorGradientCenter,
    ColorGradientEnd,
    ProgressAlpha,
    LabelText,
    LabelSize,
    LabelSpace,
    LabelColorInner,
    LabelColorOuter,
    LabelTypeface,
    LabelConstraints,
    LabelGravity,
    Highlighting,
    HighlightWidth,
    HighlightColor,
    HighlightAlpha,
}

static ATTRIBUTES: Lazy<HashMap<&'static str, Attr>> = Lazy::new(|| {
    let names: &[(&str, &str, Attr)] = &[
        ("width", "width", Attr::Width),
        ("height", "height", Attr::Height),
        ("orientation", "orientation", Attr::Orientation),
        ("padding", "padding", Attr::Padding),
        ("min", "min", Attr::Min),
        ("max", "max", Attr::Max),
        ("progress", "progress", Attr::Progress),
        (
            "progressFromPrevious",
            "progress_from_previous",
            Attr::ProgressFromPrevious,
        ),
        ("autoAnimate", "auto_animate", Attr::AutoAnimate),
        ("duration", "duration", Attr::Duration),
        ("animation", "animation", Attr::Animation),
        ("colorBackground", "color_background", Attr::ColorBackground),
        ("borderColor", "border_color", Attr::BorderColor),
        ("borderWidth", "border_width", Attr::BorderWidth),
        ("radius", "radius", Attr::Radius),
        ("colorProgress", "color_progress", Attr::ColorProgress),
        (
            "colorGradientStart",
            "color_gradient_start",
            Attr::ColorGradientStart,
        ),
        (
            "colorGradientCenter",
            "color_gradient_center",
            Attr::ColorGradientCenter,
        ),
        (
            "colorGradientEnd",
            "color_gradient_end",
            Attr::ColorGradientEnd,
        ),
        ("progressAlpha", "progress_alpha", Attr::ProgressAlpha),
        ("labelText", "label_text", Attr::LabelText),
        ("labelSize", "label_size", Attr::LabelSize),
        ("labelSpace", "label_space", Attr::LabelSpace),
        ("labelColorInner", "label_color_inner", Attr::LabelColorInner),
        ("labelColorOuter", "label_color_outer", Attr::LabelColorOuter),
        ("labelTypeface", "label_typeface", Attr::LabelTypeface),
        (
            "labelConstraints",
            "label_constraints",
            Attr::LabelConstraints,
        ),
        ("labelGravity", "label_gravity", Attr::LabelGravity),
        ("highlighting", "highlighting", Attr::Highlighting),
        ("highlightWidth", "highlight_width", Attr::HighlightWidth),
        ("highlightColor", "highlight_color", Attr::HighlightColor),
        ("highlightAlpha", "highlight_alpha", Attr::HighlightAlpha),
    ];

    let mut map = HashMap::with_capacity(names.len() * 2);
    for (camel, snake, attr) in names {
        map.insert(*camel, *attr);
        map.insert(*snake, *attr);
    }
    map
});

pub(crate) fn parse_lenient(attributes: &[(&str, &str)]) -> Config {
    let mut config = Config::default();
    for (name, value) in attributes {
        if let Err(err) = apply(&mut config, name, value) {
            warn!(%err, "ignoring progress view attribute");
        }
    }
    if let Err(err) = check_range(&config) {
        warn!(%err, "falling back to the default progress range");
        config.min = None;
        config.max = None;
    }
    config
}

pub(crate) fn parse_strict(attributes: &[(&str, &str)]) -> Result<Config> {
    let mut config = Config::default();
    for (name, value) in attributes {
        apply(&mut config, name, value)?;
    }
    check_range(&config)?;
    Ok(config)
}

fn lookup(name: &str) -> Option<Attr> {
    let name = name.trim();
    let name = name.strip_prefix(PREFIX).unwrap_or(name);
    ATTRIBUTES.get(name).copied()
}

fn apply(config: &mut Config, name: &str, value: &str) -> Result<()> {
    let attr = lookup(name).ok_or_else(|| AttributeError::UnknownAttribute(name.to_string()))?;
    let value = value.trim();

    match attr {
        Attr::Width => config.width = Some(parse_dimension(name, value)? as usize),
        Attr::Height => config.height = Some(parse_dimension(name, value)? as usize),
        Attr::Orientation => config.orientation = Some(parse_orientation(name, value)?),
        Attr::Padding => config.padding = Some(parse_dimension(name, value)? as usize),
        Attr::Min => config.min = Some(parse_number(name, value)?),
        Attr::Max => config.max = Some(parse_number(name, value)?),
        Attr::Progress => config.progress = Some(parse_number(name, value)?),
        Attr::ProgressFromPrevious => {
            config.progress_from_previous = Some(parse_bool(name, value)?)
        }
        Attr::AutoAnimate => config.auto_animate = Some(parse_bool(name, value)?),
        Attr::Duration => {
            let millis = parse_dimension(name, value.trim_end_matches("ms"))?;
            config.duration = Some(Duration::from_millis(millis))
        }
        Attr::Animation => config.animation = Some(parse_animation(name, value)?),
        Attr::ColorBackground => config.color_background = Some(parse_color(name, value)?),
        Attr::BorderColor => config.border_color = Some(parse_color(name, value)?),
        Attr::BorderWidth => config.border_width = Some(parse_u16(name, value)?),
        Attr::Radius => config.radius = Some(parse_number(name, strip_unit(value))? as f32),
        Attr::ColorProgress => config.color_progress = Some(parse_color(name, value)?),
        Attr::ColorGradientStart => config.color_gradient_start = Some(parse_color(name, value)?),
        Attr::ColorGradientCenter => {
            config.color_gradient_center = Some(parse_color(name, value)?)
        }
        Attr::ColorGradientEnd => config.color_gradient_end = Some(parse_color(name, value)?),
        Attr::ProgressAlpha => config.progress_alpha = Some(parse_alpha(name, value)?),
        Attr::LabelText => config.label_text = Some(value.to_string()),
        Attr::LabelSize => config.label_size = Some(parse_number(name, strip_unit(value))? as f32),
        Attr::LabelSpace => config.label_space = Some(parse_number(name, strip_unit(value))?),
        Attr::LabelColorInner => config.label_color_inner = Some(parse_color(name, value)?),
        Attr::LabelColorOuter => config.label_color_outer = Some(parse_color(name, value)?),
        Attr::LabelTypeface => config.label_typeface = Some(parse_typeface(name, value)?),
        Attr::LabelConstraints => {
            config.label_constraints = Some(parse_constraints(name, value)?)
        }
        Attr::LabelGravity => config.label_gravity = Some(parse_gravity(name, value)?),
        Attr::Highlighting => config.highlight_enabled = Some(parse_bool(name, value)?),
        Attr::HighlightWidth => config.highlight_width = Some(parse_u16(name, value)?),
        Attr::HighlightColor => config.highlight_color = Some(parse_color(name, value)?),
        Attr::HighlightAlpha => config.highlight_alpha = Some(parse_alpha(name, value)?),
    }
    Ok(())
}

fn check_range(config: &Config) -> Result<()> {
    let min = config.min.unwrap_or(crate::progress::DEFAULT_MIN);
    let max = config.max.unwrap_or(crate::progress::DEFAULT_MAX);
    if min < max {
        Ok(())
    } else {
        Err(AttributeError::InvalidRange { min, max })
    }
}

// Dimension units are accepted and ignored; everything is measured in cells.
fn strip_unit(value: &str) -> &str {
    ["dp", "px", "sp"]
        .iter()
        .find_map(|unit| value.strip_suffix(unit))
        .unwrap_or(value)
        .trim()
}

fn parse_number(name: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| AttributeError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
}

fn parse_dimension(name: &str, value: &str) -> Result<u64> {
    strip_unit(value)
        .parse::<u64>()
        .map_err(|_| AttributeError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
}

fn parse_u16(name: &str, value: &str) -> Result<u16> {
    strip_unit(value)
        .parse::<u16>()
        .map_err(|_| AttributeError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
}

fn parse_alpha(name: &str, value: &str) -> Result<f32> {
    let alpha = parse_number(name, value)?;
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha as f32)
    } else {
        Err(AttributeError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AttributeError::InvalidBool {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Normalizes `#RGB`, `#RRGGBB` and `#AARRGGBB` to uppercase `#RRGGBB`.
/// The alpha channel of 8-digit colors is dropped.
pub fn parse_color(name: &str, value: &str) -> Result<String> {
    let invalid = || AttributeError::InvalidColor {
        name: name.to_string(),
        value: value.to_string(),
    };

    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let rgb = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        8 => hex[2..].to_string(),
        _ => return Err(invalid()),
    };
    Ok(format!("#{}", rgb.to_ascii_uppercase()))
}

fn invalid_option(name: &str, value: &str) -> AttributeError {
    AttributeError::InvalidOption {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn parse_orientation(name: &str, value: &str) -> Result<Orientation> {
    match value.to_ascii_lowercase().as_str() {
        "horizontal" | "0" => Ok(Orientation::Horizontal),
        "vertical" | "1" => Ok(Orientation::Vertical),
        _ => Err(invalid_option(name, value)),
    }
}

fn parse_animation(name: &str, value: &str) -> Result<ProgressAnimation> {
    if let Ok(index) = value.parse::<u8>() {
        return ProgressAnimation::from_value(index).ok_or_else(|| invalid_option(name, value));
    }
    match value.to_ascii_lowercase().replace('_', "").as_str() {
        "normal" => Ok(ProgressAnimation::Normal),
        "bounce" => Ok(ProgressAnimation::Bounce),
        "decelerate" => Ok(ProgressAnimation::Decelerate),
        "acceleratedecelerate" => Ok(ProgressAnimation::AccelerateDecelerate),
        _ => Err(invalid_option(name, value)),
    }
}

fn parse_typeface(name: &str, value: &str) -> Result<Typeface> {
    match value.to_ascii_lowercase().replace(['_', '|'], "").as_str() {
        "normal" | "0" => Ok(Typeface::Normal),
        "bold" | "1" => Ok(Typeface::Bold),
        "italic" | "2" => Ok(Typeface::Italic),
        "bolditalic" | "3" => Ok(Typeface::BoldItalic),
        _ => Err(invalid_option(name, value)),
    }
}

fn parse_constraints(name: &str, value: &str) -> Result<LabelConstraints> {
    match value.to_ascii_lowercase().replace('_', "").as_str() {
        "alignprogress" | "0" => Ok(LabelConstraints::AlignProgress),
        "aligncontainer" | "1" => Ok(LabelConstraints::AlignContainer),
        _ => Err(invalid_option(name, value)),
    }
}

fn parse_gravity(name: &str, value: &str) -> Result<LabelGravity> {
    match value.to_ascii_lowercase().as_str() {
        "start" | "left" | "bottom" => Ok(LabelGravity::Start),
        "center" => Ok(LabelGravity::Center),
        "end" | "right" | "top" => Ok(LabelGravity::End),
        _ => Err(invalid_option(name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_attribute_set() {
        let config = parse_strict(&[
            ("progressView_width", "40"),
            ("progressView_height", "3"),
            ("progressView_orientation", "vertical"),
            ("progressView_min", "0"),
            ("progressView_max", "200"),
            ("progressView_progress", "120.5"),
            ("progressView_progressFromPrevious", "true"),
            ("progressView_autoAnimate", "false"),
            ("progressView_duration", "1500"),
            ("progressView_animation", "bounce"),
            ("progressView_colorBackground", "#fff"),
            ("progressView_borderColor", "#FF123456"),
            ("progressView_borderWidth", "1dp"),
            ("progressView_radius", "12dp"),
            ("progressView_colorProgress", "#7571f9"),
            ("progressView_colorGradientStart", "#000000"),
            ("progressView_colorGradientCenter", "#888888"),
            ("progressView_colorGradientEnd", "#ffffff"),
            ("progressView_progressAlpha", "0.5"),
            ("progressView_labelText", "  60%"),
            ("progressView_labelSize", "13sp"),
            ("progressView_labelSpace", "2"),
            ("progressView_labelColorInner", "#ffffff"),
            ("progressView_labelColorOuter", "#000000"),
            ("progressView_labelTypeface", "bold"),
            ("progressView_labelConstraints", "align_container"),
            ("progressView_labelGravity", "end"),
            ("progressView_highlighting", "true"),
            ("progressView_highlightWidth", "1"),
            ("progressView_highlightColor", "#00ff00"),
            ("progressView_highlightAlpha", "0.8"),
        ])
        .unwrap();

        assert_eq!(config.width, Some(40));
        assert_eq!(config.height, Some(3));
        assert_eq!(config.orientation, Some(Orientation::Vertical));
        assert_eq!(config.max, Some(200.0));
        assert_eq!(config.progress, Some(120.5));
        assert_eq!(config.progress_from_previous, Some(true));
        assert_eq!(config.auto_animate, Some(false));
        assert_eq!(config.duration, Some(Duration::from_millis(1500)));
        assert_eq!(config.animation, Some(ProgressAnimation::Bounce));
        assert_eq!(config.color_background.as_deref(), Some("#FFFFFF"));
        assert_eq!(config.border_color.as_deref(), Some("#123456"));
        assert_eq!(config.border_width, Some(1));
        assert_eq!(config.radius, Some(12.0));
        assert_eq!(config.color_progress.as_deref(), Some("#7571F9"));
        assert_eq!(config.color_gradient_center.as_deref(), Some("#888888"));
        assert_eq!(config.progress_alpha, Some(0.5));
        // Label text is taken verbatim apart from surrounding whitespace.
        assert_eq!(config.label_text.as_deref(), Some("60%"));
        assert_eq!(config.label_size, Some(13.0));
        assert_eq!(config.label_space, Some(2.0));
        assert_eq!(config.label_typeface, Some(Typeface::Bold));
        assert_eq!(
            config.label_constraints,
            Some(LabelConstraints::AlignContainer)
        );
        assert_eq!(config.label_gravity, Some(LabelGravity::End));
        assert_eq!(config.highlight_enabled, Some(true));
        assert_eq!(config.highlight_width, Some(1));
        assert_eq!(config.highlight_color.as_deref(), Some("#00FF00"));
        assert_eq!(config.highlight_alpha, Some(0.8));
    }

    #[test]
    fn test_names_without_prefix_and_snake_case() {
        let config = parse_strict(&[
            ("labelColorInner", "#abcdef"),
            ("label_color_outer", "#123"),
            ("auto_animate", "0"),
        ])
        .unwrap();
        assert_eq!(config.label_color_inner.as_deref(), Some("#ABCDEF"));
        assert_eq!(config.label_color_outer.as_deref(), Some("#112233"));
        assert_eq!(config.auto_animate, Some(false));
    }

    #[test]
    fn test_enum_indices() {
        let config = parse_strict(&[
            ("orientation", "1"),
            ("animation", "3"),
            ("labelTypeface", "2"),
            ("labelConstraints", "1"),
        ])
        .unwrap();
        assert_eq!(config.orientation, Some(Orientation::Vertical));
        assert_eq!(config.animation, Some(ProgressAnimation::AccelerateDecelerate));
        assert_eq!(config.label_typeface, Some(Typeface::Italic));
        assert_eq!(
            config.label_constraints,
            Some(LabelConstraints::AlignContainer)
        );
    }

    #[test]
    fn test_strict_errors() {
        assert_eq!(
            parse_strict(&[("sparkles", "1")]).unwrap_err(),
            AttributeError::UnknownAttribute("sparkles".to_string())
        );
        assert!(matches!(
            parse_strict(&[("max", "many")]).unwrap_err(),
            AttributeError::InvalidNumber { .. }
        ));
        assert!(matches!(
            parse_strict(&[("autoAnimate", "maybe")]).unwrap_err(),
            AttributeError::InvalidBool { .. }
        ));
        assert!(matches!(
            parse_strict(&[("colorProgress", "purple")]).unwrap_err(),
            AttributeError::InvalidColor { .. }
        ));
        assert!(matches!(
            parse_strict(&[("animation", "9")]).unwrap_err(),
            AttributeError::InvalidOption { .. }
        ));
        assert!(matches!(
            parse_strict(&[("highlightAlpha", "1.5")]).unwrap_err(),
            AttributeError::InvalidNumber { .. }
        ));
        assert_eq!(
            parse_strict(&[("min", "10"), ("max", "10")]).unwrap_err(),
            AttributeError::InvalidRange {
                min: 10.0,
                max: 10.0
            }
        );
    }

    #[test]
    fn test_lenient_falls_back_to_defaults() {
        let config = parse_lenient(&[
            ("max", "lots"),
            ("progress", "40"),
            ("colorProgress", "#12"),
            ("glitter", "true"),
            ("duration", "-5"),
        ]);
        assert_eq!(config.max, None);
        assert_eq!(config.progress, Some(40.0));
        assert_eq!(config.color_progress, None);
        assert_eq!(config.duration, None);
    }

    #[test]
    fn test_lenient_drops_inverted_range() {
        let config = parse_lenient(&[("min", "50"), ("max", "20"), ("progress", "30")]);
        assert_eq!(config.min, None);
        assert_eq!(config.max, None);
        assert_eq!(config.progress, Some(30.0));
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("c", "#abc").unwrap(), "#AABBCC");
        assert_eq!(parse_color("c", "#a1b2c3").unwrap(), "#A1B2C3");
        assert_eq!(parse_color("c", "#80a1b2c3").unwrap(), "#A1B2C3");
        assert!(parse_color("c", "a1b2c3").is_err());
        assert!(parse_color("c", "#a1b2c").is_err());
        assert!(parse_color("c", "#gggggg").is_err());
    }

    #[test]
    fn test_padding_attribute() {
        let config = parse_strict(&[("progressView_padding", "2")]).unwrap();
        assert_eq!(config.padding, Some(2));
        assert!(parse_strict(&[("padding", "-1")]).is_err());
    }

    #[test]
    fn test_duration_accepts_ms_suffix() {
        let config = parse_strict(&[("duration", "250ms")]).unwrap();
        assert_eq!(config.duration, Some(Duration::from_millis(250)));
    }
}
