//! # windrules
//!
//! Resolves border utility tokens (`border-x-2`, `rounded-tl-full`,
//! `b-red-500/50`, `b-op-50`) into ordered CSS declarations.
//!
//! A token is matched against an ordered table of regular-expression rules.
//! The first rule whose handler accepts the captured groups wins; a handler
//! that rejects its value lets matching continue with the next rule. Handlers
//! expand side and corner tokens into physical properties, resolve raw
//! values (bracket escapes, `$var` references, global keywords, math
//! functions, theme keys, unit conversion) and wire colors to opacity custom
//! properties so independently matched color and opacity utilities compose.
//!
//! ## Quick start
//!
//! ```rust
//! use windrules::{Theme, ThemeUsage};
//!
//! let theme = Theme::preset();
//! let mut usage = ThemeUsage::new();
//!
//! let resolved = windrules::resolve("rounded-tl-full", &theme, &mut usage).unwrap();
//! assert_eq!(
//!     resolved.to_css(".x"),
//!     ".x{border-top-left-radius:calc(infinity * 1px);}"
//! );
//!
//! assert!(windrules::resolve("b-wavy", &theme, &mut usage).is_none());
//! ```
//!
//! ## Modules
//!
//! - [`rules`]: the matcher and the border rule table
//! - [`value`]: raw value resolution
//! - [`color`]: color parsing and opacity wiring
//! - [`mappings`]: side and corner expansion tables
//! - [`theme`]: theme loading and usage tracking
//! - [`css`]: declaration sets and CSS text output
//! - [`engine`]: multi-token generation passes

pub mod color;
pub mod css;
pub mod engine;
pub mod mappings;
pub mod rules;
pub mod theme;
pub mod value;

pub use css::{escape_class_selector, CssDeclaration, CssObject, Resolution};
pub use engine::{GenerationPass, Stylesheet};
pub use rules::{border_rules, Rule, RuleContext, RuleSet};
pub use theme::{Theme, ThemeError, ThemeNode, ThemeUsage};

/// Resolves one token with the border rule table.
///
/// Theme keys the resolution references are recorded in `usage`.
pub fn resolve(token: &str, theme: &Theme, usage: &mut ThemeUsage) -> Option<Resolution> {
    let mut ctx = RuleContext::new(theme, usage);
    border_rules().resolve(token, &mut ctx)
}
