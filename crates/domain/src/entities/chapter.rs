//! Chapters - embedded in the novel aggregate record

use serde::{Deserialize, Serialize};

use crate::ids::ChapterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterType {
    Prologue,
    Epilogue,
    Interlude,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub id: ChapterId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub chapter_type: Option<ChapterType>,
}

impl Chapter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: ChapterId::new(),
            chapter_type: None,
        }
    }

    pub fn with_type(mut self, chapter_type: ChapterType) -> Self {
        self.chapter_type = Some(chapter_type);
        self
    }
}
