//! Module for style tags and the style registry
//!
//! Style tags are the closed set of lexical categories the engine can
//! assign; the registry maps each tag to a caller-supplied visual
//! attribute. The engine itself never paints anything — a renderer
//! resolves tags through the registry.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Lexical category assigned to a styled span
///
/// Serialized names match the style table of the classic Python
/// highlighter palette, so existing palette files keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleTag {
    #[serde(rename = "keyword")]
    Keyword,
    #[serde(rename = "operator")]
    Operator,
    #[serde(rename = "brace")]
    Brace,
    #[serde(rename = "defclass")]
    DefClass,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "string2")]
    String2,
    #[serde(rename = "comment")]
    Comment,
    #[serde(rename = "self")]
    SelfRef,
    #[serde(rename = "numbers")]
    Number,
}

/// Visual attribute for one style tag: a named color plus weight/slant flags
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub color: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl TextStyle {
    /// Creates a plain (non-bold, non-italic) style with the given color
    pub fn color(color: &str) -> Self {
        Self {
            color: color.to_string(),
            bold: false,
            italic: false,
        }
    }

    /// Creates a bold style with the given color
    pub fn bold(color: &str) -> Self {
        Self {
            bold: true,
            ..Self::color(color)
        }
    }

    /// Creates an italic style with the given color
    pub fn italic(color: &str) -> Self {
        Self {
            italic: true,
            ..Self::color(color)
        }
    }
}

/// Mapping from style tag to visual attribute
///
/// Read-only once the highlighter is constructed; swapping in a new
/// registry (for a different palette or language) goes through
/// [`crate::highlighter::Highlighter::swap_config`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    styles: HashMap<StyleTag, TextStyle>,
}

impl StyleRegistry {
    /// Builds a registry from `(tag, style)` pairs
    ///
    /// Registering the same tag twice is a configuration error.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (StyleTag, TextStyle)>,
    ) -> Result<Self, ConfigError> {
        let mut styles = HashMap::new();
        for (tag, style) in pairs {
            if styles.insert(tag, style).is_some() {
                return Err(ConfigError::DuplicateStyle(tag));
            }
        }
        Ok(Self { styles })
    }

    /// The default Python palette
    pub fn python_default() -> Self {
        let styles = HashMap::from([
            (StyleTag::Keyword, TextStyle::color("blue")),
            (StyleTag::Operator, TextStyle::color("red")),
            (StyleTag::Brace, TextStyle::color("darkGray")),
            (StyleTag::DefClass, TextStyle::bold("black")),
            (StyleTag::String, TextStyle::color("magenta")),
            (StyleTag::String2, TextStyle::color("darkMagenta")),
            (StyleTag::Comment, TextStyle::italic("darkGreen")),
            (StyleTag::SelfRef, TextStyle::italic("black")),
            (StyleTag::Number, TextStyle::color("brown")),
        ]);
        Self { styles }
    }

    /// Looks up the visual attribute for a tag
    pub fn resolve(&self, tag: StyleTag) -> Option<&TextStyle> {
        self.styles.get(&tag)
    }

    /// Returns true if the registry has an entry for `tag`
    pub fn contains(&self, tag: StyleTag) -> bool {
        self.styles.contains_key(&tag)
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::python_default()
    }
}

pub fn get_palette_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("linelight");
    fs::create_dir_all(&path).ok()?;
    path.push("palette.json");
    Some(path)
}

pub fn save_palette(registry: &StyleRegistry) {
    if let Some(path) = get_palette_path() {
        if let Ok(json) = serde_json::to_string_pretty(registry) {
            fs::write(path, json).ok();
        }
    }
}

pub fn load_palette() -> StyleRegistry {
    if let Some(path) = get_palette_path() {
        if let Ok(json) = fs::read_to_string(path) {
            if let Ok(registry) = serde_json::from_str(&json) {
                return registry;
            }
        }
    }
    StyleRegistry::default()
}
