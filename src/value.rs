//! Value resolution for raw utility fragments.
//!
//! A raw fragment (the `2` in `border-x-2`, the `[calc(100%-1px)]` in
//! `b-[calc(100%-1px)]`) is turned into a CSS value by trying, in order:
//!
//! 1. bracket escapes: `[...]`, unwrapped verbatim apart from `_` to space
//! 2. custom properties: `$name` becomes `var(--name)`
//! 3. CSS-wide keywords: `inherit`, `initial`, ...
//! 4. math functions: `calc(...)`, `clamp(...)`, `min(...)`, `max(...)`
//! 5. theme scale keys, then unit conversion per [`UnitMode`]
//!
//! The individual steps are public so handlers can compose their own chains.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::mappings::is_global_keyword;
use crate::rules::RuleContext;
use crate::theme::theme_variable_name;

/// Theme keys whose raw value is emitted instead of a `var(--…)` reference.
pub const PASS_THEME_KEYS: &[&str] = &["DEFAULT", "none"];

static NUMBER_WITH_UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(-?\d*(?:\.\d+)?)(px|pt|pc|%|r?(?:em|ex|lh|cap|ch|ic)|(?:[sld]?v|cq)(?:[whib]|min|max)|in|cm|mm|rpx)?$",
    )
    .expect("number-with-unit pattern is valid")
});

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d*(?:\.\d+)?$").expect("number pattern is valid"));

static BRACKET_HINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[(color|length|size|position|quoted|string|number|percentage):")
        .expect("bracket hint pattern is valid")
});

static CSS_MATH_FN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:calc|clamp|min|max)\s*\(.*\)$").expect("math function pattern is valid")
});

static CSSVAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\$[^\s'"`;{}]"#).expect("css variable pattern is valid"));

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb(", "rgba(", "hsl(", "hsla(", "hwb(", "lab(", "lch(", "oklab(", "oklch(", "color(",
    "color-mix(",
];

/// How a bare numeric fragment is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitMode {
    /// `2` -> `2px`; values with a unit keep it.
    Px,
    /// Fractions become percentages (`1/2` -> `50%`), `n` -> `n/4 rem`.
    Rem,
    /// `50` or `50%` -> `0.5`.
    Percent,
    /// Numbers with or without a unit pass through unchanged.
    Plain,
}

/// A theme namespace consulted before unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeScale {
    Radius,
}

impl ThemeScale {
    pub fn namespace(self) -> &'static str {
        match self {
            ThemeScale::Radius => "radius",
        }
    }
}

/// Type hint carried by a bracket value, as in `[color:red]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketHint {
    Color,
    Length,
    Size,
    Position,
    Quoted,
    String,
    Number,
    Percentage,
}

impl BracketHint {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "color" => Some(BracketHint::Color),
            "length" => Some(BracketHint::Length),
            "size" => Some(BracketHint::Size),
            "position" => Some(BracketHint::Position),
            "quoted" => Some(BracketHint::Quoted),
            "string" => Some(BracketHint::String),
            "number" => Some(BracketHint::Number),
            "percentage" => Some(BracketHint::Percentage),
            _ => None,
        }
    }
}

/// Resolves a raw fragment through the full chain described in the module
/// docs. Returns `None` when no step accepts the fragment.
///
/// With `UnitMode::Px`, bracket values that are color literals are refused so
/// the token can fall through to a color rule.
pub fn resolve_value(
    raw: &str,
    mode: UnitMode,
    scale: Option<ThemeScale>,
    ctx: &mut RuleContext<'_>,
) -> Option<String> {
    if let Some((hint, value)) = bracket_with_hint(raw) {
        if mode == UnitMode::Px && is_color_like(hint, &value) {
            return None;
        }
        if mode == UnitMode::Percent {
            return Some(percentage_to_fraction(value));
        }
        return Some(value);
    }
    if let Some(value) = cssvar(raw) {
        return Some(value);
    }
    if let Some(value) = global(raw) {
        return Some(value);
    }
    if is_css_math_fn(raw) {
        return Some(raw.to_string());
    }
    if let Some(scale) = scale {
        if let Some(value) = theme_scale_value(raw, scale, ctx) {
            return Some(value);
        }
    }
    convert_unit(raw, mode)
}

/// Looks `key` up in a theme scale. Non pass-through keys are recorded as
/// used and returned as `var(--<namespace>-<key>)`.
pub fn theme_scale_value(key: &str, scale: ThemeScale, ctx: &mut RuleContext<'_>) -> Option<String> {
    let value = match scale {
        ThemeScale::Radius => ctx.theme.radius(key)?,
    };
    if PASS_THEME_KEYS.contains(&key) {
        return Some(value.to_string());
    }
    ctx.usage.record(scale.namespace(), &[key]);
    Some(format!("var({})", theme_variable_name(scale.namespace(), &[key])))
}

/// Applies only the unit conversion step for `mode`.
pub fn convert_unit(raw: &str, mode: UnitMode) -> Option<String> {
    match mode {
        UnitMode::Px => px(raw),
        UnitMode::Rem => fraction(raw).or_else(|| rem(raw)),
        UnitMode::Percent => percent(raw),
        UnitMode::Plain => number_with_unit(raw).map(|_| raw.to_string()),
    }
}

/// Unwraps a bracket escape, discarding any type hint.
pub fn bracket(s: &str) -> Option<String> {
    bracket_with_hint(s).map(|(_, value)| value)
}

/// Unwraps a bracket escape that is either unhinted or hinted as a color.
pub fn bracket_of_color(s: &str) -> Option<String> {
    match bracket_with_hint(s)? {
        (None, value) | (Some(BracketHint::Color), value) => Some(value),
        _ => None,
    }
}

/// Unwraps `[...]`, returning the optional type hint and the CSS value.
///
/// Rejects empty content and unbalanced inner brackets. `_` becomes a space
/// unless escaped as `\_`; underscores inside `url(...)` are preserved.
/// Operators inside math functions get surrounding spaces so
/// `[calc(100%-1px)]` yields `calc(100% - 1px)`.
pub fn bracket_with_hint(s: &str) -> Option<(Option<BracketHint>, String)> {
    if s.len() < 2 || !s.starts_with('[') || !s.ends_with(']') {
        return None;
    }

    let (hint, base) = match BRACKET_HINT_RE.captures(s) {
        Some(caps) => {
            let prefix_len = caps.get(0)?.end();
            let hint = BracketHint::parse(caps.get(1)?.as_str());
            (hint, &s[prefix_len..s.len() - 1])
        }
        None => (None, &s[1..s.len() - 1]),
    };

    if base.is_empty() || base == "=\"\"" || !brackets_balanced(base) {
        return None;
    }

    if base.starts_with("--") {
        return Some((hint, format!("var({})", base)));
    }

    let value = match hint {
        Some(BracketHint::String) => underscores_to_spaces(base),
        Some(BracketHint::Quoted) => {
            let text = underscores_to_spaces(base);
            let mut quoted = String::with_capacity(text.len() + 2);
            quoted.push('"');
            for ch in text.chars() {
                if ch == '"' || ch == '\\' {
                    quoted.push('\\');
                }
                quoted.push(ch);
            }
            quoted.push('"');
            quoted
        }
        _ => space_math_operators(&underscores_to_spaces_outside_urls(base)),
    };
    Some((hint, value))
}

fn brackets_balanced(s: &str) -> bool {
    let mut depth: i32 = 0;
    for ch in s.chars() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn underscores_to_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'_') => {
                out.push('_');
                chars.next();
            }
            '_' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

fn underscores_to_spaces_outside_urls(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("url(") {
        out.push_str(&underscores_to_spaces(&rest[..start]));
        let after = &rest[start..];
        let end = after.find(')').map(|i| i + 1).unwrap_or(after.len());
        out.push_str(&after[..end]);
        rest = &after[end..];
    }
    out.push_str(&underscores_to_spaces(rest));
    out
}

/// Inserts spaces around binary operators inside math functions.
///
/// Only operators that follow a numeric token or a closing parenthesis are
/// touched; `var(...)` arguments are copied unchanged.
fn space_math_operators(s: &str) -> String {
    if !["calc(", "clamp(", "min(", "max("].iter().any(|f| s.contains(f)) {
        return s.to_string();
    }

    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);
    let mut var_depth = 0usize;
    let mut paren_depth = 0usize;
    let mut numeric = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if var_depth == 0 && s[char_offset(&chars, i)..].starts_with("var(") {
            var_depth = paren_depth + 1;
            out.push_str("var(");
            paren_depth += 1;
            numeric = false;
            i += 4;
            continue;
        }

        match ch {
            '(' => {
                paren_depth += 1;
                numeric = false;
                out.push(ch);
            }
            ')' => {
                if var_depth == paren_depth {
                    var_depth = 0;
                }
                paren_depth = paren_depth.saturating_sub(1);
                numeric = false;
                out.push(ch);
                if var_depth == 0 {
                    if let Some(&next) = chars.get(i + 1) {
                        if is_math_operator(next) {
                            out.push(' ');
                            out.push(next);
                            out.push(' ');
                            i += 2;
                            continue;
                        }
                    }
                }
            }
            '+' | '-' | '*' | '/' if var_depth == 0 && numeric => {
                out.push(' ');
                out.push(ch);
                out.push(' ');
                numeric = false;
            }
            c if c.is_ascii_digit() || c == '.' => {
                if !numeric {
                    let prev = out.chars().last();
                    numeric = var_depth == 0
                        && prev.map_or(true, |p| {
                            p == '(' || p == ',' || p == ' ' || is_math_operator(p)
                        });
                }
                out.push(c);
            }
            c if c.is_ascii_alphabetic() || c == '%' => {
                out.push(c);
            }
            c => {
                numeric = false;
                out.push(c);
            }
        }
        i += 1;
    }
    out
}

fn char_offset(chars: &[char], index: usize) -> usize {
    chars[..index].iter().map(|c| c.len_utf8()).sum()
}

fn is_math_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

fn is_color_like(hint: Option<BracketHint>, value: &str) -> bool {
    match hint {
        Some(BracketHint::Color) => true,
        Some(_) => false,
        None => {
            let lower = value.to_ascii_lowercase();
            lower.starts_with('#') || COLOR_FUNCTIONS.iter().any(|f| lower.starts_with(f))
        }
    }
}

/// `$name` -> `var(--name)`, `$name,fallback` -> `var(--name, fallback)`.
pub fn cssvar(s: &str) -> Option<String> {
    if !CSSVAR_RE.is_match(s) {
        return None;
    }
    let body = &s[1..];
    match body.split_once(',') {
        Some((name, fallback)) if !fallback.is_empty() => {
            Some(format!("var(--{}, {})", name, fallback))
        }
        Some((name, _)) => Some(format!("var(--{})", name)),
        None => Some(format!("var(--{})", body)),
    }
}

/// CSS-wide keywords pass through unchanged.
pub fn global(s: &str) -> Option<String> {
    is_global_keyword(s).then(|| s.to_string())
}

/// Returns true for `calc(...)`, `clamp(...)`, `min(...)` and `max(...)`.
pub fn is_css_math_fn(s: &str) -> bool {
    CSS_MATH_FN_RE.is_match(s)
}

/// Splits a numeric fragment into its number and optional unit.
pub fn number_with_unit(s: &str) -> Option<(f64, Option<&str>)> {
    let caps = NUMBER_WITH_UNIT_RE.captures(s)?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    Some((number, caps.get(2).map(|m| m.as_str())))
}

/// `2` -> `2px`, `0.5rem` -> `0.5rem`.
pub fn px(s: &str) -> Option<String> {
    let (number, unit) = number_with_unit(s)?;
    Some(format!("{}{}", round(number), unit.unwrap_or("px")))
}

/// `4` -> `1rem`, `3px` -> `3px`.
pub fn rem(s: &str) -> Option<String> {
    let (number, unit) = number_with_unit(s)?;
    match unit {
        Some(unit) => Some(format!("{}{}", round(number), unit)),
        None => Some(format!("{}rem", round(number / 4.0))),
    }
}

/// `1/2` -> `50%`, `full` -> `100%`.
pub fn fraction(s: &str) -> Option<String> {
    if s == "full" {
        return Some("100%".to_string());
    }
    let (left, right) = s.split_once('/')?;
    let left: f64 = left.parse().ok()?;
    let right: f64 = right.parse().ok()?;
    let ratio = left / right;
    if !ratio.is_finite() {
        return None;
    }
    if ratio == 0.0 {
        return Some("0".to_string());
    }
    Some(format!("{}%", round(ratio * 100.0)))
}

/// `50` -> `0.5`, `12.5%` -> `0.125`.
pub fn percent(s: &str) -> Option<String> {
    let s = s.strip_suffix('%').unwrap_or(s);
    if !NUMBER_RE.is_match(s) {
        return None;
    }
    let number: f64 = s.parse().ok()?;
    let fraction = number / 100.0;
    if !fraction.is_finite() {
        return None;
    }
    Some(round(fraction))
}

/// Rewrites a literal percentage (`50%`) as a fraction (`0.5`). Any other
/// value is returned unchanged.
pub fn percentage_to_fraction(value: String) -> String {
    if !value.ends_with('%') {
        return value;
    }
    percent(&value).unwrap_or(value)
}

/// Formats a number with at most ten decimals and no trailing zeros.
pub fn round(n: f64) -> String {
    let fixed = format!("{:.10}", n);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
