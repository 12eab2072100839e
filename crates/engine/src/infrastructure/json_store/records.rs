//! On-disk record shapes
//!
//! Relations between entities are plain ids at rest. Records are written
//! with serde's declaration order and ordered collections only, so writing an
//! unchanged novel twice produces identical bytes.

use serde::{Deserialize, Serialize};

use plotlyst_domain::common::is_zero;
use plotlyst_domain::entities::{
    default_character_networks, default_documents, default_stages, default_tag_types, Chapter,
    Character, Diagram, Document, Goal, NovelDescriptor, NovelPreferences, Plot, SceneStage,
    StoryStructure, Tag, TagType,
};
use plotlyst_domain::{CharacterId, ImageId, Novel, NovelId, SceneId};

/// Format version written into every aggregate record.
pub const LATEST_VERSION: u32 = 1;

/// Contents of `project.plotlyst`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(default)]
    pub novels: Vec<NovelDescriptor>,
}

impl ProjectManifest {
    pub fn find(&self, id: NovelId) -> Option<&NovelDescriptor> {
        self.novels.iter().find(|n| n.id == id)
    }

    pub fn find_mut(&mut self, id: NovelId) -> Option<&mut NovelDescriptor> {
        self.novels.iter_mut().find(|n| n.id == id)
    }
}

/// Contents of `novels/<id>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelRecord {
    pub id: NovelId,
    #[serde(default)]
    pub story_structures: Vec<StoryStructure>,
    #[serde(default)]
    pub scenes: Vec<SceneId>,
    #[serde(default)]
    pub characters: Vec<CharacterId>,
    #[serde(default)]
    pub plots: Vec<Plot>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub custom_chapters: u32,
    #[serde(default = "default_stages")]
    pub stages: Vec<SceneStage>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// User tags only; built-in tags are merged back in on load
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default = "default_tag_types", skip_serializing_if = "Vec::is_empty")]
    pub tag_types: Vec<TagType>,
    #[serde(default = "default_documents")]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub premise: String,
    #[serde(default)]
    pub synopsis: Option<Document>,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub prefs: NovelPreferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_map: Option<Diagram>,
    #[serde(default = "default_character_networks")]
    pub character_networks: Vec<Diagram>,
}

impl NovelRecord {
    pub fn from_novel(novel: &Novel) -> Self {
        Self {
            id: novel.id(),
            story_structures: novel.story_structures().to_vec(),
            scenes: novel.scenes().iter().map(|s| s.id).collect(),
            characters: novel.characters().iter().map(|c| c.id).collect(),
            plots: novel.plots().to_vec(),
            chapters: novel.chapters().to_vec(),
            custom_chapters: novel.custom_chapters(),
            stages: novel.stages().to_vec(),
            goals: novel.goals().to_vec(),
            tags: novel
                .tags()
                .iter()
                .flat_map(|group| group.tags.iter())
                .filter(|tag| !tag.builtin)
                .cloned()
                .collect(),
            tag_types: novel.tags().iter().map(|g| g.tag_type.clone()).collect(),
            documents: novel.documents().to_vec(),
            premise: novel.premise().to_string(),
            synopsis: novel.synopsis().cloned(),
            version: LATEST_VERSION,
            prefs: novel.prefs().clone(),
            events_map: novel.events_map().cloned(),
            character_networks: novel.character_networks().to_vec(),
        }
    }
}

/// Character file as written: the character plus the id of its avatar blob.
#[derive(Debug, Serialize)]
pub struct CharacterRecordRef<'a> {
    #[serde(flatten)]
    pub character: &'a Character,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<ImageId>,
}

/// Character file as read.
#[derive(Debug, Deserialize)]
pub struct CharacterRecord {
    #[serde(flatten)]
    pub character: Character,
    #[serde(default)]
    pub avatar_id: Option<ImageId>,
}

/// Just the avatar id of a character file, for avatar bookkeeping.
#[derive(Debug, Default, Deserialize)]
pub struct StoredAvatar {
    #[serde(default)]
    pub avatar_id: Option<ImageId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tags_are_not_recorded() {
        let mut novel = Novel::new("Tags");
        novel.add_tag(Tag::new("Raven", "Symbols")).unwrap();

        let record = NovelRecord::from_novel(&novel);

        assert_eq!(record.tags.len(), 1);
        assert_eq!(record.tags[0].text, "Raven");
        assert_eq!(record.tag_types.len(), novel.tags().len());
    }

    #[test]
    fn character_record_flattens_avatar_id() {
        let character = Character::new("Jane");
        let avatar_id = ImageId::new();
        let json = serde_json::to_value(CharacterRecordRef {
            character: &character,
            avatar_id: Some(avatar_id),
        })
        .unwrap();

        assert_eq!(json["name"], "Jane");
        assert_eq!(json["avatar_id"], avatar_id.to_string());

        let back: CharacterRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.character, character);
        assert_eq!(back.avatar_id, Some(avatar_id));
    }

    #[test]
    fn minimal_record_gets_defaults() {
        let id = NovelId::new();
        let record: NovelRecord = serde_json::from_str(&format!(r#"{{"id":"{id}"}}"#)).unwrap();

        assert_eq!(record.stages.len(), default_stages().len());
        assert_eq!(record.tag_types, default_tag_types());
        assert_eq!(record.documents.len(), 4);
        assert!(record.story_structures.is_empty());
    }
}
