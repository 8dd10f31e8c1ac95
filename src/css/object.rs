//! Ordered CSS declaration maps and rule resolutions.

/// A single `property: value` pair.
pub type CssDeclaration = (String, String);

/// An insertion-ordered mapping from CSS property name to value.
///
/// Setting a property that already exists replaces its value in place, so
/// the first insertion decides the position and the last write decides the
/// value. This is the conflict rule used when per-side results are merged.
///
/// # Example
///
/// ```rust
/// use windrules::CssObject;
///
/// let mut css = CssObject::new();
/// css.set("border-left-width", "1px");
/// css.set("border-right-width", "1px");
/// css.set("border-left-width", "2px");
///
/// assert_eq!(css.get("border-left-width"), Some("2px"));
/// assert_eq!(css.properties().collect::<Vec<_>>(), ["border-left-width", "border-right-width"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssObject {
    entries: Vec<CssDeclaration>,
}

impl CssObject {
    /// Creates an empty declaration map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `property` to `value`, keeping the original position if the
    /// property is already present.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Builder form of [`CssObject::set`].
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Property names in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Copies every declaration of `other` into `self` (last write wins).
    pub fn extend_from(&mut self, other: CssObject) {
        for (property, value) in other.entries {
            self.set(property, value);
        }
    }

    pub fn into_declarations(self) -> Vec<CssDeclaration> {
        self.entries
    }
}

impl<P: Into<String>, V: Into<String>> FromIterator<(P, V)> for CssObject {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut css = CssObject::new();
        for (property, value) in iter {
            css.set(property, value);
        }
        css
    }
}

/// The outcome of resolving one token: its declarations plus any prelude
/// text (such as `@property` registrations) that must appear once in the
/// stylesheet ahead of the rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub css: CssObject,
    pub preludes: Vec<String>,
}

impl Resolution {
    pub fn new(css: CssObject) -> Self {
        Self {
            css,
            preludes: Vec::new(),
        }
    }

    /// Adds a prelude unless an identical one is already present.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.add_prelude(prelude);
        self
    }

    pub fn add_prelude(&mut self, prelude: impl Into<String>) {
        let prelude = prelude.into();
        if !self.preludes.contains(&prelude) {
            self.preludes.push(prelude);
        }
    }

    /// Merges `other` into `self`.
    ///
    /// Declarations follow [`CssObject::set`] (last write wins per property,
    /// earlier properties are never removed). Preludes are a set union in
    /// first-seen order, deduplicated by value.
    pub fn merge(mut self, other: Resolution) -> Self {
        self.css.extend_from(other.css);
        for prelude in other.preludes {
            self.add_prelude(prelude);
        }
        self
    }

    /// Ordered declarations of this resolution.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.css.iter()
    }
}

impl From<CssObject> for Resolution {
    fn from(css: CssObject) -> Self {
        Resolution::new(css)
    }
}
