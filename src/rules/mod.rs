//! Ordered rule tables and the token matcher.
//!
//! A [`Rule`] pairs a regular expression with a handler. [`RuleSet::resolve`]
//! tries rules in declaration order:
//!
//! - no match: try the next rule
//! - match, handler returns `None`: the token was syntactically plausible but
//!   semantically invalid (an unparseable value), so try the next rule
//! - match, handler returns `Some`: that resolution is final
//!
//! Running out of rules is not an error; the token simply resolves to `None`.
//!
//! Order therefore matters: more specific grammars must be declared before
//! more general ones that would otherwise shadow them.

mod border;

use std::fmt;

use regex::Regex;

use crate::css::Resolution;
use crate::theme::{Theme, ThemeUsage};

pub use border::{border_rules, INFINITE_RADIUS};

/// State threaded through every handler call.
///
/// The theme is read-only. `usage` is the caller-owned accumulator of theme
/// keys referenced during the current generation pass.
#[derive(Debug)]
pub struct RuleContext<'a> {
    pub theme: &'a Theme,
    pub usage: &'a mut ThemeUsage,
}

impl<'a> RuleContext<'a> {
    pub fn new(theme: &'a Theme, usage: &'a mut ThemeUsage) -> Self {
        Self { theme, usage }
    }
}

/// Capture groups of a matched rule, indexed from 1 like regex groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures<'t> {
    groups: Vec<Option<&'t str>>,
}

impl<'t> Captures<'t> {
    pub fn new(groups: Vec<Option<&'t str>>) -> Self {
        Self { groups }
    }

    fn from_regex(caps: &regex::Captures<'t>) -> Self {
        Self {
            groups: caps.iter().skip(1).map(|m| m.map(|m| m.as_str())).collect(),
        }
    }

    /// Group `index`, or `None` if it did not participate in the match.
    pub fn get(&self, index: usize) -> Option<&'t str> {
        index
            .checked_sub(1)
            .and_then(|i| self.groups.get(i).copied().flatten())
    }

    /// Group `index`, or `default` if it did not participate or is empty.
    pub fn get_or(&self, index: usize, default: &'t str) -> &'t str {
        match self.get(index) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }
}

/// A rule handler. Returning `None` lets the matcher fall through.
pub type Handler = fn(&Captures<'_>, &mut RuleContext<'_>) -> Option<Resolution>;

/// A pattern, its handler and editor-facing autocomplete hints.
#[derive(Clone)]
pub struct Rule {
    pattern: Regex,
    handler: Handler,
    autocomplete: &'static [&'static str],
}

impl Rule {
    pub fn new(pattern: &str, handler: Handler) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            handler,
            autocomplete: &[],
        })
    }

    /// Attaches autocomplete hints. They have no effect on matching.
    pub fn with_autocomplete(mut self, hints: &'static [&'static str]) -> Self {
        self.autocomplete = hints;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn autocomplete(&self) -> &'static [&'static str] {
        self.autocomplete
    }

    pub fn is_match(&self, token: &str) -> bool {
        self.pattern.is_match(token)
    }

    /// Matches `token` and runs the handler.
    ///
    /// `None` covers both "pattern did not match" and "handler declined".
    pub fn apply(&self, token: &str, ctx: &mut RuleContext<'_>) -> Option<Resolution> {
        let caps = self.pattern.captures(token)?;
        let captures = Captures::from_regex(&caps);
        (self.handler)(&captures, ctx)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern.as_str())
            .field("autocomplete", &self.autocomplete)
            .finish_non_exhaustive()
    }
}

/// An ordered, immutable list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Resolves a token with the first rule whose handler accepts it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use windrules::rules::{border_rules, RuleContext};
    /// use windrules::{Theme, ThemeUsage};
    ///
    /// let theme = Theme::preset();
    /// let mut usage = ThemeUsage::new();
    /// let mut ctx = RuleContext::new(&theme, &mut usage);
    ///
    /// let resolved = border_rules().resolve("border-x-2", &mut ctx).unwrap();
    /// let declarations: Vec<_> = resolved.declarations().collect();
    /// assert_eq!(
    ///     declarations,
    ///     [("border-left-width", "2px"), ("border-right-width", "2px")]
    /// );
    /// ```
    pub fn resolve(&self, token: &str, ctx: &mut RuleContext<'_>) -> Option<Resolution> {
        for (index, rule) in self.rules.iter().enumerate() {
            let Some(caps) = rule.pattern.captures(token) else {
                continue;
            };
            let captures = Captures::from_regex(&caps);
            match (rule.handler)(&captures, ctx) {
                Some(resolution) => {
                    tracing::trace!(token, rule = index, "token resolved");
                    return Some(resolution);
                }
                None => {
                    tracing::trace!(token, rule = index, pattern = rule.pattern(), "handler declined");
                }
            }
        }
        tracing::debug!(token, "no rule matched");
        None
    }

    /// All autocomplete hints, in rule order.
    pub fn autocomplete(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules
            .iter()
            .flat_map(|rule| rule.autocomplete.iter().copied())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
