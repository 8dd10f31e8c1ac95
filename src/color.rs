//! Color fragment parsing and color declaration output.
//!
//! A color fragment has the form `<name>[-<shade>][/<alpha>]` (`red-500/50`),
//! or is a literal (`#fff`, `hex-fff`, `$brand`, `[rgb(0_0_0)]`), or one of
//! the special keywords in [`SpecialColor`].
//!
//! Non-special colors are written with an alpha channel that defaults to an
//! opacity custom property. For a side-qualified property the side variable
//! (`--un-border-left-opacity`) is declared as falling back to the shared one
//! (`--un-border-opacity`), so a separately matched opacity utility can
//! change the alpha without repeating the color.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::css::{CssObject, Resolution};
use crate::rules::RuleContext;
use crate::theme::{theme_variable_name, Theme, ThemeNode};
use crate::value::{
    bracket, bracket_of_color, cssvar, number_with_unit, percent, percentage_to_fraction, round,
};

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#[\da-f]+$").expect("hex color pattern is valid"));

static HEX_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^hex-[\da-f]+$").expect("hex keyword pattern is valid"));

/// Colors that are written verbatim and never carry an opacity variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialColor {
    Transparent,
    CurrentColor,
    Inherit,
}

impl SpecialColor {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "transparent" => Some(SpecialColor::Transparent),
            "current" | "currentColor" => Some(SpecialColor::CurrentColor),
            "inherit" => Some(SpecialColor::Inherit),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            SpecialColor::Transparent => "transparent",
            SpecialColor::CurrentColor => "currentColor",
            SpecialColor::Inherit => "inherit",
        }
    }
}

/// Where a parsed color came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorKind {
    /// A theme entry; `keys` is the path used for its custom property.
    Theme { keys: Vec<String>, value: String },
    /// A literal CSS color: hex, bracket value or custom property.
    Literal(String),
    Special(SpecialColor),
}

/// A successfully parsed color fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedColor {
    /// First segment of the color name (`red` in `red-500`).
    pub name: String,
    /// Shade used for the theme lookup, if any.
    pub shade: Option<String>,
    pub kind: ColorKind,
    /// Resolved alpha from a `/alpha` suffix (`0.5` for `/50`).
    pub alpha: Option<String>,
}

impl ParsedColor {
    pub fn is_special(&self) -> bool {
        matches!(self.kind, ColorKind::Special(_))
    }
}

/// Parses a color fragment against the theme.
///
/// Returns `None` for fragments that are numbers (`2`, `3px`) or that name
/// no theme color.
///
/// # Example
///
/// ```rust
/// use windrules::color::{parse_color, ColorKind};
/// use windrules::Theme;
///
/// let theme = Theme::preset();
/// let parsed = parse_color("red-500/50", &theme).unwrap();
/// assert_eq!(parsed.shade.as_deref(), Some("500"));
/// assert_eq!(parsed.alpha.as_deref(), Some("0.5"));
/// assert!(matches!(parsed.kind, ColorKind::Theme { .. }));
/// ```
pub fn parse_color(body: &str, theme: &Theme) -> Option<ParsedColor> {
    let (main, opacity) = split_alpha(body)?;
    let alpha = match opacity {
        Some(opacity) => Some(
            bracket(opacity)
                .map(percentage_to_fraction)
                .or_else(|| cssvar(opacity))
                .or_else(|| percent(opacity))?,
        ),
        None => None,
    };

    if let Some(special) = SpecialColor::parse(main) {
        return Some(ParsedColor {
            name: main.to_string(),
            shade: None,
            kind: ColorKind::Special(special),
            alpha: None,
        });
    }

    let bracketed = bracket_of_color(main);
    let candidate = bracketed.as_deref().unwrap_or(main);
    if number_with_unit(candidate).is_some() {
        return None;
    }

    let literal = if HEX_RE.is_match(candidate) {
        Some(candidate.to_string())
    } else if HEX_KEYWORD_RE.is_match(candidate) {
        Some(format!("#{}", &candidate[4..]))
    } else if main.starts_with('$') {
        cssvar(main)
    } else {
        bracketed.clone()
    };
    if let Some(color) = literal {
        return Some(ParsedColor {
            name: main.to_string(),
            shade: None,
            kind: ColorKind::Literal(color),
            alpha,
        });
    }

    let (keys, value, shade) = theme_color(main, theme)?;
    let segments = split_segments(main);
    Some(ParsedColor {
        name: segments.first().cloned().unwrap_or_default(),
        shade,
        kind: ColorKind::Theme { keys, value },
        alpha,
    })
}

/// Returns true if `body` parses to a concrete color.
pub fn has_parseable_color(body: &str, theme: &Theme) -> bool {
    parse_color(body, theme).is_some()
}

/// Writes a color declaration for `<base><direction>-color`.
///
/// Special colors produce the bare declaration. Other colors produce a
/// `color-mix` value whose alpha is the explicit `/alpha` or the
/// side-qualified opacity variable, declare that variable as falling back to
/// the shared `--un-<base>-opacity` when `direction` is not empty, and add an
/// `@property` prelude registering the shared variable. Theme colors are
/// written as `var(--colors-…)` and recorded in the usage accumulator.
pub fn color_css(
    parsed: &ParsedColor,
    base: &str,
    direction: &str,
    ctx: &mut RuleContext<'_>,
) -> Resolution {
    let property = format!("{}{}-color", base, direction);

    let value = match &parsed.kind {
        ColorKind::Special(special) => {
            return Resolution::new(CssObject::new().with(property, special.as_css()));
        }
        ColorKind::Literal(color) => color.clone(),
        ColorKind::Theme { keys, .. } => {
            ctx.usage.record("colors", keys.as_slice());
            format!("var({})", theme_variable_name("colors", keys.as_slice()))
        }
    };

    let shared = opacity_variable(base, "");
    let own = opacity_variable(base, direction);
    let alpha = match &parsed.alpha {
        Some(alpha) => alpha_percentage(alpha),
        None => format!("calc(var({}) * 100%)", own),
    };

    let mut css = CssObject::new().with(
        property,
        format!("color-mix(in oklch, {} {}, transparent)", value, alpha),
    );
    if !direction.is_empty() {
        css.set(own, format!("var({})", shared));
    }

    Resolution::new(css).with_prelude(opacity_property_rule(&shared))
}

/// `--un-<base><direction>-opacity`.
pub fn opacity_variable(base: &str, direction: &str) -> String {
    format!("--un-{}{}-opacity", base, direction)
}

/// The `@property` registration giving an opacity variable its initial value.
pub fn opacity_property_rule(variable: &str) -> String {
    format!(
        "@property {}{{syntax:\"<number>\";inherits:false;initial-value:1;}}",
        variable
    )
}

fn alpha_percentage(alpha: &str) -> String {
    match alpha.parse::<f64>() {
        Ok(fraction) => format!("{}%", round(fraction * 100.0)),
        Err(_) => format!("calc({} * 100%)", alpha),
    }
}

/// Splits `main/alpha` at the first `/` outside brackets.
///
/// `None` means the fragment is malformed (empty color or empty alpha).
fn split_alpha(body: &str) -> Option<(&str, Option<&str>)> {
    let mut depth = 0i32;
    for (i, ch) in body.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth -= 1,
            '/' if depth == 0 => {
                let (main, alpha) = (&body[..i], &body[i + 1..]);
                if main.is_empty() || alpha.is_empty() {
                    return None;
                }
                return Some((main, Some(alpha)));
            }
            _ => {}
        }
    }
    if body.is_empty() {
        return None;
    }
    Some((body, None))
}

/// Splits a color name on `-`, first separating letters from a trailing
/// number (`red500` -> `red`, `500`).
fn split_segments(main: &str) -> Vec<String> {
    let mut normalized = String::with_capacity(main.len() + 2);
    let mut prev: Option<char> = None;
    for ch in main.chars() {
        if ch.is_ascii_digit() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            normalized.push('-');
        }
        normalized.push(ch);
        prev = Some(ch);
    }
    normalized.split('-').map(str::to_string).collect()
}

/// Looks a color name up in the theme, returning the custom property key
/// path, the concrete value and the shade used.
fn theme_color(main: &str, theme: &Theme) -> Option<(Vec<String>, String, Option<String>)> {
    let segments = split_segments(main);
    if segments.first().map_or(true, |name| name.is_empty()) {
        return None;
    }

    if let Some(hit) = theme.color(&[main]) {
        if let ThemeNode::Value(value) = hit.node {
            return Some((hit.keys, value.clone(), None));
        }
    }

    let last = segments.last()?;
    if segments.len() > 1 && last.chars().all(|c| c.is_ascii_digit()) {
        let hit = theme.color(&segments[..segments.len() - 1])?;
        let value = hit.node.get(last)?.as_value()?;
        let mut keys = hit.keys;
        keys.push(last.clone());
        return Some((keys, value.to_string(), Some(last.clone())));
    }

    let (hit, shade) = match theme.color(&segments) {
        Some(hit) => (hit, None),
        None if segments.len() <= 2 => {
            let hit = theme.color(&segments[..1])?;
            (hit, segments.get(1).cloned())
        }
        None => return None,
    };

    match hit.node {
        ThemeNode::Value(value) if shade.is_none() => Some((hit.keys, value.clone(), None)),
        ThemeNode::Value(_) => None,
        scale => {
            let key = shade.clone().unwrap_or_else(|| "DEFAULT".to_string());
            let value = scale.get(&key)?.as_value()?.to_string();
            let mut keys = hit.keys;
            if key != "DEFAULT" {
                keys.push(key);
            }
            Some((keys, value, shade))
        }
    }
}
