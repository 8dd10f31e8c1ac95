//! Theme data and theme-key usage tracking.
//!
//! This module provides:
//!
//! - [`Theme`]: read-only design tokens (colors, radius scale) loaded from JSON or YAML
//! - [`ThemeNode`]: a theme entry, either a value or a nested scale
//! - [`ThemeUsage`]: per-pass accumulator of the theme keys resolved tokens referenced
//! - [`ThemeError`]: configuration errors raised while loading a theme

mod error;
#[allow(clippy::module_inception)]
mod theme;
mod usage;

pub use error::ThemeError;
pub use theme::{Theme, ThemeHit, ThemeNode};
pub use usage::{theme_variable_name, ThemeUsage};
