//! Novel descriptor - the project manifest entry for a novel
//!
//! Descriptors are what the project manifest lists. They carry only the
//! fields needed to show a library of novels without loading any of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black, is_zero};
use crate::ids::NovelId;

/// Language settings used for spell checking and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSettings {
    pub lang: String,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
        }
    }
}

/// Where an imported novel came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOriginType {
    Scrivener,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOrigin {
    #[serde(rename = "type")]
    pub origin_type: ImportOriginType,
    /// Path of the imported project on disk
    pub source: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryType {
    #[default]
    Novel,
    ShortStory,
}

/// Manifest entry for a novel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelDescriptor {
    pub title: String,
    pub id: NovelId,
    #[serde(default)]
    pub lang_settings: LanguageSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_origin: Option<ImportOrigin>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub story_type: StoryType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_synopsis: String,
    /// Series parent, when this novel is part of a series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NovelId>,
    /// Position within the parent series
    #[serde(default, skip_serializing_if = "is_zero")]
    pub sequence: u32,
}

impl NovelDescriptor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: NovelId::new(),
            lang_settings: LanguageSettings::default(),
            import_origin: None,
            subtitle: String::new(),
            icon: String::new(),
            icon_color: default_icon_color(),
            creation_date: None,
            story_type: StoryType::default(),
            short_synopsis: String::new(),
            parent: None,
            sequence: 0,
        }
    }

    pub fn with_creation_date(mut self, creation_date: DateTime<Utc>) -> Self {
        self.creation_date = Some(creation_date);
        self
    }

    pub fn with_import_origin(mut self, origin: ImportOrigin) -> Self {
        self.import_origin = Some(origin);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_omitted_from_json() {
        let descriptor = NovelDescriptor::new("My First Novel");
        let json = serde_json::to_value(&descriptor).unwrap();
        let object = json.as_object().unwrap();

        assert!(object.contains_key("title"));
        assert!(object.contains_key("id"));
        assert!(!object.contains_key("icon_color"));
        assert!(!object.contains_key("subtitle"));
        assert!(!object.contains_key("sequence"));
        assert!(!object.contains_key("parent"));
    }

    #[test]
    fn omitted_fields_read_back_as_defaults() {
        let descriptor = NovelDescriptor::new("Draft");
        let json = serde_json::to_string(&descriptor).unwrap();
        let back: NovelDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
        assert_eq!(back.icon_color, "black");
        assert_eq!(back.lang_settings.lang, "en-US");
    }

    #[test]
    fn import_origin_uses_type_key() {
        let descriptor = NovelDescriptor::new("Imported").with_import_origin(ImportOrigin {
            origin_type: ImportOriginType::Scrivener,
            source: "/tmp/book.scriv".to_string(),
        });
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["import_origin"]["type"], "scrivener");
    }
}
