//! Accumulator for theme keys consulted during one generation pass.

use std::collections::{BTreeMap, BTreeSet};

use super::theme::Theme;

/// Records which theme keys resolved tokens referenced.
///
/// Downstream tooling uses this to emit only the theme variables a
/// stylesheet needs. The caller owns the accumulator and must
/// [`clear`](ThemeUsage::clear) it (or use a fresh one) between passes.
///
/// # Example
///
/// ```rust
/// use windrules::{Theme, ThemeUsage};
///
/// let theme = Theme::new().with_radius("md", "0.375rem");
/// let mut usage = ThemeUsage::new();
/// usage.record("radius", &["md"]);
///
/// assert!(usage.contains("radius", "md"));
/// assert_eq!(usage.to_css_variables(&theme), ":root{--radius-md:0.375rem;}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeUsage {
    used: BTreeMap<String, BTreeSet<Vec<String>>>,
}

impl ThemeUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key path under a namespace (`"radius"`, `"colors"`).
    pub fn record<S: AsRef<str>>(&mut self, namespace: &str, path: &[S]) {
        let path: Vec<String> = path.iter().map(|s| s.as_ref().to_string()).collect();
        tracing::trace!(namespace, key = %path.join("-"), "theme key used");
        self.used
            .entry(namespace.to_string())
            .or_default()
            .insert(path);
    }

    /// Returns true if `key` (path segments joined by `-`) was recorded.
    pub fn contains(&self, namespace: &str, key: &str) -> bool {
        self.used
            .get(namespace)
            .is_some_and(|paths| paths.iter().any(|path| path.join("-") == key))
    }

    /// Recorded keys of a namespace, joined by `-`, in sorted order.
    pub fn keys(&self, namespace: &str) -> Vec<String> {
        self.used
            .get(namespace)
            .map(|paths| paths.iter().map(|path| path.join("-")).collect())
            .unwrap_or_default()
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.used.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn clear(&mut self) {
        self.used.clear();
    }

    /// Folds another accumulator into this one.
    pub fn absorb(&mut self, other: ThemeUsage) {
        for (namespace, paths) in other.used {
            self.used.entry(namespace).or_default().extend(paths);
        }
    }

    /// Renders a `:root` block defining a custom property for every recorded
    /// key that the theme can supply a value for.
    ///
    /// Returns an empty string when nothing resolvable was recorded.
    pub fn to_css_variables(&self, theme: &Theme) -> String {
        let mut body = String::new();
        for (namespace, paths) in &self.used {
            for path in paths {
                let Some(value) = theme.value(namespace, path.as_slice()) else {
                    continue;
                };
                body.push_str(&theme_variable_name(namespace, path.as_slice()));
                body.push(':');
                body.push_str(value);
                body.push(';');
            }
        }

        if body.is_empty() {
            return body;
        }
        format!(":root{{{}}}", body)
    }
}

/// The custom property name a theme key is exposed as, e.g. `--radius-md`
/// or `--colors-red-500`.
pub fn theme_variable_name<S: AsRef<str>>(namespace: &str, path: &[S]) -> String {
    let mut name = format!("--{}", namespace);
    for segment in path {
        name.push('-');
        name.push_str(segment.as_ref());
    }
    name
}
