//! Static side, axis and corner expansion tables.
//!
//! A side token such as `x` expands to the physical property suffixes it
//! governs (`-left`, `-right`). The empty token means "all sides" and maps to
//! a single empty suffix, so `border` + `""` + `-width` is `border-width`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Side/axis token to border property suffixes.
pub static DIRECTION_MAP: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        HashMap::from([
            ("", &[""] as &[&str]),
            ("l", &["-left"] as &[&str]),
            ("r", &["-right"] as &[&str]),
            ("t", &["-top"] as &[&str]),
            ("b", &["-bottom"] as &[&str]),
            ("s", &["-inline-start"] as &[&str]),
            ("e", &["-inline-end"] as &[&str]),
            ("x", &["-left", "-right"] as &[&str]),
            ("y", &["-top", "-bottom"] as &[&str]),
            ("bs", &["-block-start"] as &[&str]),
            ("be", &["-block-end"] as &[&str]),
            ("is", &["-inline-start"] as &[&str]),
            ("ie", &["-inline-end"] as &[&str]),
            ("block", &["-block-start", "-block-end"] as &[&str]),
            ("inline", &["-inline-start", "-inline-end"] as &[&str]),
        ])
    });

/// Corner token to radius property suffixes.
pub static CORNER_MAP: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("", &[""] as &[&str]),
        ("l", &["-top-left", "-bottom-left"] as &[&str]),
        ("r", &["-top-right", "-bottom-right"] as &[&str]),
        ("t", &["-top-left", "-top-right"] as &[&str]),
        ("b", &["-bottom-left", "-bottom-right"] as &[&str]),
        ("tl", &["-top-left"] as &[&str]),
        ("lt", &["-top-left"] as &[&str]),
        ("tr", &["-top-right"] as &[&str]),
        ("rt", &["-top-right"] as &[&str]),
        ("bl", &["-bottom-left"] as &[&str]),
        ("lb", &["-bottom-left"] as &[&str]),
        ("br", &["-bottom-right"] as &[&str]),
        ("rb", &["-bottom-right"] as &[&str]),
        ("bs", &["-start-start", "-start-end"] as &[&str]),
        ("be", &["-end-start", "-end-end"] as &[&str]),
        ("s", &["-end-start", "-start-start"] as &[&str]),
        ("is", &["-end-start", "-start-start"] as &[&str]),
        ("e", &["-start-end", "-end-end"] as &[&str]),
        ("ie", &["-start-end", "-end-end"] as &[&str]),
        ("ss", &["-start-start"] as &[&str]),
        ("bs-is", &["-start-start"] as &[&str]),
        ("is-bs", &["-start-start"] as &[&str]),
        ("se", &["-start-end"] as &[&str]),
        ("bs-ie", &["-start-end"] as &[&str]),
        ("ie-bs", &["-start-end"] as &[&str]),
        ("es", &["-end-start"] as &[&str]),
        ("be-is", &["-end-start"] as &[&str]),
        ("is-be", &["-end-start"] as &[&str]),
        ("ee", &["-end-end"] as &[&str]),
        ("be-ie", &["-end-end"] as &[&str]),
        ("ie-be", &["-end-end"] as &[&str]),
    ])
});

/// CSS-wide keywords accepted by every value chain that allows them.
pub const GLOBAL_KEYWORDS: &[&str] = &["inherit", "initial", "revert", "revert-layer", "unset"];

/// Accepted `border-style` keywords, global keywords included.
pub const BORDER_STYLES: &[&str] = &[
    "solid",
    "dashed",
    "dotted",
    "double",
    "hidden",
    "none",
    "groove",
    "ridge",
    "inset",
    "outset",
    "inherit",
    "initial",
    "revert",
    "revert-layer",
    "unset",
];

/// Looks up the suffixes for a side token. Unknown tokens yield `None`.
pub fn directions(side: &str) -> Option<&'static [&'static str]> {
    DIRECTION_MAP.get(side).copied()
}

/// Looks up the suffixes for a corner token. Unknown tokens yield `None`.
pub fn corners(corner: &str) -> Option<&'static [&'static str]> {
    CORNER_MAP.get(corner).copied()
}

pub fn is_global_keyword(s: &str) -> bool {
    GLOBAL_KEYWORDS.contains(&s)
}

pub fn is_border_style(s: &str) -> bool {
    BORDER_STYLES.contains(&s)
}
