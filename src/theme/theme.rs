//! Read-only design token store consulted during value resolution.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::ThemeError;

const PRESET_YAML: &str = include_str!("../../themes/preset.yaml");

/// A theme entry: either a concrete value or a nested scale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ThemeNode {
    Value(String),
    Scale(HashMap<String, ThemeNode>),
}

impl ThemeNode {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            ThemeNode::Value(value) => Some(value.as_str()),
            ThemeNode::Scale(_) => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ThemeNode> {
        match self {
            ThemeNode::Value(_) => None,
            ThemeNode::Scale(scale) => scale.get(key),
        }
    }
}

/// A theme match: the node found and the keys that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeHit<'a> {
    pub node: &'a ThemeNode,
    pub keys: Vec<String>,
}

/// Design tokens read by the rule engine.
///
/// Only the `colors` and `radius` namespaces are consulted. Any other
/// top-level key in a theme file is ignored; a namespace with the wrong
/// shape is a [`ThemeError`] at load time.
///
/// # Example
///
/// ```rust
/// use windrules::Theme;
///
/// let theme = Theme::from_yaml_str(r##"
/// radius:
///   md: "0.375rem"
/// colors:
///   brand:
///     "500": "#0af"
/// "##).unwrap();
///
/// assert_eq!(theme.radius("md"), Some("0.375rem"));
/// assert!(theme.color(&["brand", "500"]).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Theme {
    #[serde(default)]
    colors: HashMap<String, ThemeNode>,
    #[serde(default)]
    radius: HashMap<String, String>,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in theme with a default radius scale and a small palette.
    pub fn preset() -> Self {
        // Parsing of the embedded file is covered by `test_preset_loads`.
        Self::from_yaml_str(PRESET_YAML).unwrap_or_default()
    }

    pub fn from_json_str(source: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ThemeError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Loads a theme file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let parse: fn(&str) -> Result<Self, ThemeError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            _ => {
                return Err(ThemeError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let source = fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&source)
    }

    /// Adds a radius scale entry, returning the updated theme for chaining.
    pub fn with_radius(mut self, key: &str, value: &str) -> Self {
        self.radius.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a color entry, returning the updated theme for chaining.
    pub fn with_color(mut self, name: &str, node: ThemeNode) -> Self {
        self.colors.insert(name.to_string(), node);
        self
    }

    pub fn radius(&self, key: &str) -> Option<&str> {
        self.radius.get(key).map(String::as_str)
    }

    pub fn has_radius(&self, key: &str) -> bool {
        self.radius.contains_key(key)
    }

    /// Walks the color tree along `path`.
    ///
    /// At every level the remaining segments are first tried as a single
    /// camel-cased key (`light-blue` finds `lightBlue`), then
    /// the current segment alone.
    pub fn color<S: AsRef<str>>(&self, path: &[S]) -> Option<ThemeHit<'_>> {
        let mut keys = Vec::with_capacity(path.len());
        let mut scale = &self.colors;
        let mut index = 0;

        while index < path.len() {
            let camel = camel_join(&path[index..]);
            if index + 1 < path.len() {
                if let Some(node) = scale.get(&camel) {
                    keys.push(camel);
                    return Some(ThemeHit { node, keys });
                }
            }

            let segment = path[index].as_ref();
            let node = scale.get(segment)?;
            keys.push(segment.to_string());
            index += 1;

            if index == path.len() {
                return Some(ThemeHit { node, keys });
            }
            match node {
                ThemeNode::Scale(next) => scale = next,
                ThemeNode::Value(_) => return None,
            }
        }

        None
    }

    /// Looks up a concrete value by namespace and key path, as recorded in
    /// a [`ThemeUsage`](super::ThemeUsage).
    pub fn value<S: AsRef<str>>(&self, namespace: &str, path: &[S]) -> Option<&str> {
        match namespace {
            "radius" => match path {
                [key] => self.radius(key.as_ref()),
                _ => None,
            },
            "colors" => {
                let hit = self.color(path)?;
                match hit.node {
                    ThemeNode::Value(value) => Some(value.as_str()),
                    scale => scale.get("DEFAULT").and_then(ThemeNode::as_value),
                }
            }
            _ => None,
        }
    }
}

fn camel_join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let segment = segment.as_ref();
        if i == 0 {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
