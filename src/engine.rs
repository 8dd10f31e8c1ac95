//! One generation pass over a batch of tokens.
//!
//! [`GenerationPass`] owns the [`ThemeUsage`] accumulator for the pass, so
//! theme keys referenced by one batch never leak into the next. Call
//! [`GenerationPass::reset`] or start a new pass between batches.
//!
//! ```rust
//! use windrules::{GenerationPass, Theme};
//!
//! let theme = Theme::preset();
//! let mut pass = GenerationPass::new(&theme);
//!
//! let sheet = pass.generate(["b-x-2", "rounded-md", "not-a-utility"]);
//! assert_eq!(sheet.matched, ["b-x-2", "rounded-md"]);
//! assert_eq!(sheet.unmatched, ["not-a-utility"]);
//! assert!(sheet.css.contains(".rounded-md{border-radius:var(--radius-md);}"));
//! assert_eq!(pass.theme_variables(), ":root{--radius-md:0.375rem;}");
//! ```

use crate::css::Resolution;
use crate::rules::{border_rules, RuleContext, RuleSet};
use crate::theme::{Theme, ThemeUsage};

/// Output of [`GenerationPass::generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Deduplicated preludes followed by one rule per matched token.
    pub css: String,
    /// Tokens that produced declarations, in input order.
    pub matched: Vec<String>,
    /// Tokens no rule accepted, in input order.
    pub unmatched: Vec<String>,
}

impl Stylesheet {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Resolves tokens against a rule set while tracking theme usage.
#[derive(Debug)]
pub struct GenerationPass<'t> {
    theme: &'t Theme,
    rules: &'t RuleSet,
    usage: ThemeUsage,
}

impl<'t> GenerationPass<'t> {
    /// A pass over the border rule table.
    pub fn new(theme: &'t Theme) -> Self {
        Self::with_rules(theme, border_rules())
    }

    pub fn with_rules(theme: &'t Theme, rules: &'t RuleSet) -> Self {
        Self {
            theme,
            rules,
            usage: ThemeUsage::new(),
        }
    }

    pub fn theme(&self) -> &'t Theme {
        self.theme
    }

    /// Resolves a single token, recording any theme keys it uses.
    pub fn resolve(&mut self, token: &str) -> Option<Resolution> {
        let mut ctx = RuleContext::new(self.theme, &mut self.usage);
        self.rules.resolve(token, &mut ctx)
    }

    /// Resolves every token and renders the matched ones as class rules.
    ///
    /// Duplicate tokens are rendered once. Preludes shared by several tokens
    /// appear once, ahead of all rules.
    pub fn generate<I, S>(&mut self, tokens: I) -> Stylesheet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sheet = Stylesheet::default();
        let mut preludes: Vec<String> = Vec::new();
        let mut rules: Vec<String> = Vec::new();

        for token in tokens {
            let token = token.as_ref();
            if sheet.matched.iter().any(|t| t == token) || sheet.unmatched.iter().any(|t| t == token) {
                continue;
            }
            match self.resolve(token) {
                Some(resolution) => {
                    for prelude in &resolution.preludes {
                        if !preludes.contains(prelude) {
                            preludes.push(prelude.clone());
                        }
                    }
                    let body = Resolution::new(resolution.css);
                    rules.push(body.to_class_css(token));
                    sheet.matched.push(token.to_string());
                }
                None => sheet.unmatched.push(token.to_string()),
            }
        }

        tracing::debug!(
            matched = sheet.matched.len(),
            unmatched = sheet.unmatched.len(),
            "generation finished"
        );

        let mut lines = preludes;
        lines.extend(rules);
        sheet.css = lines.join("\n");
        sheet
    }

    /// Theme keys recorded so far in this pass.
    pub fn usage(&self) -> &ThemeUsage {
        &self.usage
    }

    /// `:root` custom properties for every theme key used so far.
    pub fn theme_variables(&self) -> String {
        self.usage.to_css_variables(self.theme)
    }

    /// Forgets recorded usage so the pass can be reused for a new batch.
    pub fn reset(&mut self) {
        tracing::trace!("generation pass reset");
        self.usage.clear();
    }

    /// Ends the pass, handing the recorded usage to the caller.
    pub fn finish(self) -> ThemeUsage {
        self.usage
    }
}
