//! Border utilities: width, color, opacity, radius and style.
//!
//! Each category is declared from the least qualified side grammar to the
//! most qualified one, and the categories themselves run compound, explicit
//! width, color, opacity, radius, style. A compound rule such as `b-(.+)`
//! sees `b-x-2` first; its handler declines (`x-2` is no width) and the
//! axis-aware rule picks the token up.

use once_cell::sync::Lazy;

use super::{Captures, Rule, RuleContext, RuleSet};
use crate::color::{color_css, parse_color};
use crate::css::{CssObject, Resolution};
use crate::mappings::{corners, directions, is_border_style};
use crate::value::{bracket, is_css_math_fn, resolve_value, ThemeScale, UnitMode};

/// Radius used for `rounded-full`.
pub const INFINITE_RADIUS: &str = "calc(infinity * 1px)";

static BORDER_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        // compound
        rule(r"^(?:border|b)()(?:-(.+))?$", handle_size)
            .with_autocomplete(&["(border|b)-<directions>"]),
        rule(r"^(?:border|b)-([xy])(?:-(.+))?$", handle_size),
        rule(r"^(?:border|b)-([rltbse])(?:-(.+))?$", handle_size),
        rule(r"^(?:border|b)-(block|inline)(?:-(.+))?$", handle_size),
        rule(r"^(?:border|b)-([bi][se])(?:-(.+))?$", handle_size),
        // size
        rule(r"^(?:border|b)-()(?:width|size)-(.+)$", handle_size)
            .with_autocomplete(&["(border|b)-<num>", "(border|b)-<directions>-<num>"]),
        rule(r"^(?:border|b)-([xy])-(?:width|size)-(.+)$", handle_size),
        rule(r"^(?:border|b)-([rltbse])-(?:width|size)-(.+)$", handle_size),
        rule(r"^(?:border|b)-(block|inline)-(?:width|size)-(.+)$", handle_size),
        rule(r"^(?:border|b)-([bi][se])-(?:width|size)-(.+)$", handle_size),
        // colors
        rule(r"^(?:border|b)-()(?:color-)?(.+)$", handle_color_or_size)
            .with_autocomplete(&["(border|b)-$colors", "(border|b)-<directions>-$colors"]),
        rule(r"^(?:border|b)-([xy])-(?:color-)?(.+)$", handle_color_or_size),
        rule(r"^(?:border|b)-([rltbse])-(?:color-)?(.+)$", handle_color_or_size),
        rule(r"^(?:border|b)-(block|inline)-(?:color-)?(.+)$", handle_color_or_size),
        rule(r"^(?:border|b)-([bi][se])-(?:color-)?(.+)$", handle_color_or_size),
        // opacity
        rule(r"^(?:border|b)-()op(?:acity)?-?(.+)$", handle_opacity)
            .with_autocomplete(&["(border|b)-(op|opacity)-<percent>"]),
        rule(r"^(?:border|b)-([xy])-op(?:acity)?-?(.+)$", handle_opacity),
        rule(r"^(?:border|b)-([rltbse])-op(?:acity)?-?(.+)$", handle_opacity),
        rule(r"^(?:border|b)-(block|inline)-op(?:acity)?-?(.+)$", handle_opacity),
        rule(r"^(?:border|b)-([bi][se])-op(?:acity)?-?(.+)$", handle_opacity),
        // radius
        rule(r"^(?:border-|b-)?(?:rounded|rd)()(?:-(.+))?$", handle_rounded).with_autocomplete(&[
            "(border|b)-(rounded|rd)",
            "(border|b)-(rounded|rd)-$radius",
            "(rounded|rd)",
            "(rounded|rd)-$radius",
        ]),
        rule(r"^(?:border-|b-)?(?:rounded|rd)-([rltbse])(?:-(.+))?$", handle_rounded),
        rule(r"^(?:border-|b-)?(?:rounded|rd)-([rltb]{2})(?:-(.+))?$", handle_rounded),
        rule(r"^(?:border-|b-)?(?:rounded|rd)-([bise][se])(?:-(.+))?$", handle_rounded),
        rule(r"^(?:border-|b-)?(?:rounded|rd)-([bi][se]-[bi][se])(?:-(.+))?$", handle_rounded),
        // style
        rule(r"^(?:border|b)-(?:style-)?()(.+)$", handle_style).with_autocomplete(&[
            "(border|b)-style",
            "(border|b)-(solid|dashed|dotted|double|hidden|none|groove|ridge|inset|outset|inherit|initial|revert|revert-layer|unset)",
            "(border|b)-<directions>-style",
            "(border|b)-<directions>-(solid|dashed|dotted|double|hidden|none|groove|ridge|inset|outset|inherit|initial|revert|revert-layer|unset)",
            "(border|b)-<directions>-style-(solid|dashed|dotted|double|hidden|none|groove|ridge|inset|outset|inherit|initial|revert|revert-layer|unset)",
            "(border|b)-style-(solid|dashed|dotted|double|hidden|none|groove|ridge|inset|outset|inherit|initial|revert|revert-layer|unset)",
        ]),
        rule(r"^(?:border|b)-([xy])-(?:style-)?(.+)$", handle_style),
        rule(r"^(?:border|b)-([rltbse])-(?:style-)?(.+)$", handle_style),
        rule(r"^(?:border|b)-(block|inline)-(?:style-)?(.+)$", handle_style),
        rule(r"^(?:border|b)-([bi][se])-(?:style-)?(.+)$", handle_style),
    ])
});

/// The ordered border rule table.
pub fn border_rules() -> &'static RuleSet {
    &BORDER_RULES
}

fn rule(pattern: &str, handler: super::Handler) -> Rule {
    Rule::new(pattern, handler).expect("border rule pattern is valid")
}

fn handle_size(caps: &Captures<'_>, ctx: &mut RuleContext<'_>) -> Option<Resolution> {
    border_size(caps.get_or(1, ""), caps.get_or(2, "1"), ctx)
}

fn border_size(side: &str, raw: &str, ctx: &mut RuleContext<'_>) -> Option<Resolution> {
    let suffixes = directions(side)?;
    let value = resolve_value(raw, UnitMode::Px, None, ctx)?;
    let css: CssObject = suffixes
        .iter()
        .map(|suffix| (format!("border{}-width", suffix), value.as_str()))
        .collect();
    Some(css.into())
}

/// Math expressions are widths; anything else must parse as a color.
fn handle_color_or_size(caps: &Captures<'_>, ctx: &mut RuleContext<'_>) -> Option<Resolution> {
    let side = caps.get_or(1, "");
    let body = caps.get(2)?;
    let suffixes = directions(side)?;

    let math = bracket(body).is_some_and(|inner| is_css_math_fn(&inner)) || is_css_math_fn(body);
    if math {
        return border_size(side, body, ctx);
    }

    let parsed = parse_color(body, ctx.theme)?;
    suffixes
        .iter()
        .map(|suffix| color_css(&parsed, "border", suffix, ctx))
        .reduce(Resolution::merge)
}

fn handle_opacity(caps: &Captures<'_>, ctx: &mut RuleContext<'_>) -> Option<Resolution> {
    let suffixes = directions(caps.get_or(1, ""))?;
    let value = resolve_value(caps.get(2)?, UnitMode::Percent, None, ctx)?;
    let css: CssObject = suffixes
        .iter()
        .map(|suffix| (format!("--un-border{}-opacity", suffix), value.as_str()))
        .collect();
    Some(css.into())
}

fn handle_rounded(caps: &Captures<'_>, ctx: &mut RuleContext<'_>) -> Option<Resolution> {
    let suffixes = corners(caps.get_or(1, ""))?;
    let scale = caps.get_or(2, "DEFAULT");
    let value = if scale == "full" {
        INFINITE_RADIUS.to_string()
    } else {
        resolve_value(scale, UnitMode::Rem, Some(ThemeScale::Radius), ctx)?
    };
    let css: CssObject = suffixes
        .iter()
        .map(|suffix| (format!("border{}-radius", suffix), value.as_str()))
        .collect();
    Some(css.into())
}

fn handle_style(caps: &Captures<'_>, _ctx: &mut RuleContext<'_>) -> Option<Resolution> {
    let style = caps.get(2)?;
    if !is_border_style(style) {
        return None;
    }
    let suffixes = directions(caps.get_or(1, ""))?;

    let mut css = CssObject::new().with("--un-border-style", style);
    for suffix in suffixes {
        css.set(format!("border{}-style", suffix), style);
    }
    Some(css.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::opacity_property_rule;
    use crate::mappings::{BORDER_STYLES, CORNER_MAP, DIRECTION_MAP};
    use crate::theme::{Theme, ThemeUsage};
    use proptest::prelude::*;

    fn resolve_with(theme: &Theme, token: &str) -> (Option<Resolution>, ThemeUsage) {
        let mut usage = ThemeUsage::new();
        let resolved = {
            let mut ctx = RuleContext::new(theme, &mut usage);
            border_rules().resolve(token, &mut ctx)
        };
        (resolved, usage)
    }

    fn declarations(token: &str) -> Option<Vec<(String, String)>> {
        let (resolved, _) = resolve_with(&Theme::preset(), token);
        resolved.map(|r| {
            r.declarations()
                .map(|(p, v)| (p.to_string(), v.to_string()))
                .collect()
        })
    }

    fn decls(pairs: &[(&str, &str)]) -> Option<Vec<(String, String)>> {
        Some(
            pairs
                .iter()
                .map(|(p, v)| (p.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn side_token(prefix: &str, side: &str, value: &str) -> String {
        if side.is_empty() {
            format!("{}-{}", prefix, value)
        } else {
            format!("{}-{}-{}", prefix, side, value)
        }
    }

    #[test]
    fn test_rule_table_shape() {
        assert_eq!(border_rules().len(), 30);
        assert!(border_rules()
            .autocomplete()
            .any(|hint| hint == "(border|b)-(op|opacity)-<percent>"));
    }

    #[test]
    fn test_axis_width() {
        assert_eq!(
            declarations("border-x-2"),
            decls(&[("border-left-width", "2px"), ("border-right-width", "2px")])
        );
    }

    #[test]
    fn test_bare_prefix_defaults_to_one_pixel() {
        assert_eq!(declarations("border"), decls(&[("border-width", "1px")]));
        assert_eq!(
            declarations("b-y"),
            decls(&[("border-top-width", "1px"), ("border-bottom-width", "1px")])
        );
    }

    #[test]
    fn test_width_infix_and_logical_sides() {
        assert_eq!(declarations("b-width-3"), decls(&[("border-width", "3px")]));
        assert_eq!(declarations("b-t-size-0.5"), decls(&[("border-top-width", "0.5px")]));
        assert_eq!(declarations("b-bs-2"), decls(&[("border-block-start-width", "2px")]));
        assert_eq!(
            declarations("b-block"),
            decls(&[
                ("border-block-start-width", "1px"),
                ("border-block-end-width", "1px")
            ])
        );
    }

    #[test]
    fn test_width_value_forms() {
        assert_eq!(declarations("b-[3px]"), decls(&[("border-width", "3px")]));
        assert_eq!(declarations("b-$w"), decls(&[("border-width", "var(--w)")]));
        assert_eq!(declarations("b-unset"), decls(&[("border-width", "unset")]));
        assert_eq!(
            declarations("b-l-[calc(1px+1px)]"),
            decls(&[("border-left-width", "calc(1px + 1px)")])
        );
    }

    #[test]
    fn test_opacity_all_sides() {
        assert_eq!(declarations("b-op-50"), decls(&[("--un-border-opacity", "0.5")]));
        assert_eq!(declarations("border-opacity-25%"), decls(&[("--un-border-opacity", "0.25")]));
    }

    #[test]
    fn test_opacity_bracket_percentage_is_a_fraction() {
        assert_eq!(declarations("b-op-[50%]"), decls(&[("--un-border-opacity", "0.5")]));
        assert_eq!(
            declarations("b-t-op-[12.5%]"),
            decls(&[("--un-border-top-opacity", "0.125")])
        );
    }

    #[test]
    fn test_opacity_overflow_is_unmatched() {
        let token = format!("b-op-1{}", "0".repeat(400));
        assert_eq!(declarations(&token), None);
    }

    #[test]
    fn test_opacity_sides() {
        assert_eq!(
            declarations("b-x-op-50"),
            decls(&[("--un-border-left-opacity", "0.5"), ("--un-border-right-opacity", "0.5")])
        );
        assert_eq!(
            declarations("b-inline-opacity-[0.3]"),
            decls(&[
                ("--un-border-inline-start-opacity", "0.3"),
                ("--un-border-inline-end-opacity", "0.3")
            ])
        );
    }

    #[test]
    fn test_theme_color() {
        let (resolved, usage) = resolve_with(&Theme::preset(), "b-red-500");
        let resolved = resolved.unwrap();
        assert_eq!(
            resolved.declarations().collect::<Vec<_>>(),
            vec![(
                "border-color",
                "color-mix(in oklch, var(--colors-red-500) calc(var(--un-border-opacity) * 100%), transparent)"
            )]
        );
        assert_eq!(resolved.preludes, vec![opacity_property_rule("--un-border-opacity")]);
        assert!(usage.contains("colors", "red-500"));
    }

    #[test]
    fn test_axis_color_merges_sides() {
        let (resolved, _) = resolve_with(&Theme::preset(), "b-x-color-black");
        let resolved = resolved.unwrap();
        assert_eq!(
            resolved.css.properties().collect::<Vec<_>>(),
            vec![
                "border-left-color",
                "--un-border-left-opacity",
                "border-right-color",
                "--un-border-right-opacity"
            ]
        );
        assert_eq!(
            resolved.css.get("--un-border-right-opacity"),
            Some("var(--un-border-opacity)")
        );
        assert_eq!(resolved.preludes.len(), 1);
    }

    #[test]
    fn test_side_color_is_not_a_compound_width() {
        let out = declarations("b-b-red-500").unwrap();
        assert_eq!(out[0].0, "border-bottom-color");
        assert_eq!(out[1], ("--un-border-bottom-opacity".into(), "var(--un-border-opacity)".into()));
    }

    #[test]
    fn test_bracket_color_skips_width() {
        let out = declarations("b-[#fff]").unwrap();
        assert_eq!(
            out,
            vec![(
                "border-color".to_string(),
                "color-mix(in oklch, #fff calc(var(--un-border-opacity) * 100%), transparent)".to_string()
            )]
        );
    }

    #[test]
    fn test_special_colors() {
        assert_eq!(declarations("b-transparent"), decls(&[("border-color", "transparent")]));
        assert_eq!(
            declarations("b-l-current"),
            decls(&[("border-left-color", "currentColor")])
        );
        let (resolved, _) = resolve_with(&Theme::preset(), "b-current");
        assert!(resolved.unwrap().preludes.is_empty());
    }

    #[test]
    fn test_rounded() {
        assert_eq!(
            declarations("rounded-tl-full"),
            decls(&[("border-top-left-radius", INFINITE_RADIUS)])
        );
        assert_eq!(declarations("rounded"), decls(&[("border-radius", "0.25rem")]));
        assert_eq!(declarations("rd-none"), decls(&[("border-radius", "0")]));
        assert_eq!(
            declarations("b-rounded-t-2"),
            decls(&[("border-top-left-radius", "0.5rem"), ("border-top-right-radius", "0.5rem")])
        );
        assert_eq!(declarations("rounded-1/2"), decls(&[("border-radius", "50%")]));
        assert_eq!(
            declarations("rounded-bs-is-[4px]"),
            decls(&[("border-start-start-radius", "4px")])
        );
    }

    #[test]
    fn test_rounded_theme_key_is_tracked() {
        let (resolved, usage) = resolve_with(&Theme::preset(), "rounded-md");
        assert_eq!(
            resolved.unwrap().css.get("border-radius"),
            Some("var(--radius-md)")
        );
        assert_eq!(usage.keys("radius"), vec!["md"]);

        let (_, usage) = resolve_with(&Theme::preset(), "rounded");
        assert!(usage.is_empty());
    }

    #[test]
    fn test_rounded_full_ignores_theme() {
        let theme = Theme::new().with_radius("full", "9999px");
        let (resolved, usage) = resolve_with(&theme, "rounded-full");
        assert_eq!(resolved.unwrap().css.get("border-radius"), Some(INFINITE_RADIUS));
        assert!(usage.is_empty());
    }

    #[test]
    fn test_rounded_unknown_scale() {
        assert_eq!(declarations("rounded-huge"), None);
        let (resolved, _) = resolve_with(&Theme::new(), "rounded");
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_style() {
        assert_eq!(
            declarations("b-x-dashed"),
            decls(&[
                ("--un-border-style", "dashed"),
                ("border-left-style", "dashed"),
                ("border-right-style", "dashed")
            ])
        );
        assert_eq!(
            declarations("b-style-dotted"),
            decls(&[("--un-border-style", "dotted"), ("border-style", "dotted")])
        );
        assert_eq!(declarations("b-wavy"), None);
    }

    #[test]
    fn test_unmatched_tokens() {
        for token in ["bx-2", "border-q-2", "b-", "rounded-xx-2", "b-x-op-", "outline-2"] {
            assert_eq!(declarations(token), None, "{}", token);
        }
    }

    proptest! {
        #[test]
        fn prop_width_fans_out_per_side(
            side in prop::sample::select(DIRECTION_MAP.keys().copied().collect::<Vec<_>>()),
            n in 0u32..1000,
        ) {
            let token = side_token("b", side, &n.to_string());
            let out = declarations(&token).unwrap();
            let expected: Vec<(String, String)> = DIRECTION_MAP[side]
                .iter()
                .map(|suffix| (format!("border{}-width", suffix), format!("{}px", n)))
                .collect();
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn prop_radius_fans_out_per_corner(
            corner in prop::sample::select(CORNER_MAP.keys().copied().collect::<Vec<_>>()),
        ) {
            let token = side_token("rounded", corner, "full");
            let out = declarations(&token).unwrap();
            prop_assert_eq!(out.len(), CORNER_MAP[corner].len());
            for ((property, value), suffix) in out.iter().zip(CORNER_MAP[corner].iter()) {
                prop_assert_eq!(property, &format!("border{}-radius", suffix));
                prop_assert_eq!(value, INFINITE_RADIUS);
            }
        }

        #[test]
        fn prop_style_accepts_every_keyword(
            style in prop::sample::select(BORDER_STYLES.to_vec()),
        ) {
            let out = declarations(&format!("b-style-{}", style)).unwrap();
            prop_assert_eq!(out[0].clone(), ("--un-border-style".to_string(), style.to_string()));
            prop_assert_eq!(out[1].clone(), ("border-style".to_string(), style.to_string()));
        }

        #[test]
        fn prop_style_rejects_unknown_keywords(style in "[a-z]{1,10}") {
            prop_assume!(!BORDER_STYLES.contains(&style.as_str()));
            let theme = Theme::new();
            let mut usage = ThemeUsage::new();
            let mut ctx = RuleContext::new(&theme, &mut usage);
            let caps = Captures::new(vec![Some(""), Some(style.as_str())]);
            prop_assert!(handle_style(&caps, &mut ctx).is_none());
        }
    }
}
