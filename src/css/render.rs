//! CSS text output for resolved tokens.

use super::object::Resolution;

impl Resolution {
    /// Renders this resolution as a compact CSS rule for `selector`.
    ///
    /// Preludes are emitted first, one per line, followed by the rule itself.
    ///
    /// # Example
    ///
    /// ```rust
    /// use windrules::{CssObject, Resolution};
    ///
    /// let resolution = Resolution::new(CssObject::new().with("border-width", "1px"));
    /// assert_eq!(resolution.to_css(".b"), ".b{border-width:1px;}");
    /// ```
    pub fn to_css(&self, selector: &str) -> String {
        let mut out = String::new();
        for prelude in &self.preludes {
            out.push_str(prelude);
            out.push('\n');
        }
        out.push_str(selector);
        out.push('{');
        for (property, value) in self.css.iter() {
            out.push_str(property);
            out.push(':');
            out.push_str(value);
            out.push(';');
        }
        out.push('}');
        out
    }

    /// Renders the rule for a utility token, using the token itself as the
    /// class selector.
    pub fn to_class_css(&self, token: &str) -> String {
        self.to_css(&format!(".{}", escape_class_selector(token)))
    }
}

/// Escapes a utility token into a valid CSS class selector fragment.
///
/// - `b-x-2` -> `b-x-2`
/// - `b-red/50` -> `b-red\/50`
/// - `b-[3px]` -> `b-\[3px\]`
pub fn escape_class_selector(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for (i, ch) in token.chars().enumerate() {
        if i == 0 && ch.is_ascii_digit() {
            out.push_str(&format!("\\3{} ", ch));
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else if ch == '\\' {
            out.push_str("\\\\");
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}
