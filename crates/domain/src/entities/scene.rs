//! Scenes
//!
//! A scene refers to characters, plots, its chapter and its stage by id. The
//! ids are checked against the novel's collections when the novel is loaded;
//! ids that point nowhere are dropped from the scene at that point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{is_default, is_false, is_zero};
use crate::entities::Document;
use crate::ids::{
    BeatId, ChapterId, CharacterId, PlotId, PlotValueId, SceneId, StageId, StoryStructureId, TagId,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneType {
    #[default]
    Default,
    Action,
    Reaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenePurpose {
    Story,
    Reaction,
    Character,
    Emotion,
    Setup,
    Exposition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneOutcome {
    Disaster,
    Resolution,
    TradeOff,
    Motion,
}

/// How far a scene moves one value of a plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePlotValueCharge {
    pub plot_value_id: PlotValueId,
    pub charge: i8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePlotReferenceData {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default)]
    pub values: Vec<ScenePlotValueCharge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePlotReference {
    pub plot_id: PlotId,
    #[serde(default)]
    pub data: ScenePlotReferenceData,
}

impl ScenePlotReference {
    pub fn new(plot_id: PlotId) -> Self {
        Self {
            plot_id,
            data: ScenePlotReferenceData::default(),
        }
    }
}

/// Placement of a scene on a beat of a story structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStoryBeat {
    pub structure_id: StoryStructureId,
    pub beat_id: BeatId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub major: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagReference {
    pub tag_id: TagId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

fn day_default() -> u16 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    pub id: SceneId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub synopsis: String,
    #[serde(rename = "type", default, skip_serializing_if = "is_default")]
    pub scene_type: SceneType,
    #[serde(default)]
    pub pov: Option<CharacterId>,
    #[serde(default)]
    pub characters: Vec<CharacterId>,
    #[serde(default)]
    pub wip: bool,
    #[serde(rename = "plots", default)]
    pub plot_values: Vec<ScenePlotReference>,
    #[serde(default = "day_default")]
    pub day: u16,
    #[serde(default)]
    pub chapter: Option<ChapterId>,
    #[serde(default)]
    pub stage: Option<StageId>,
    #[serde(default)]
    pub beats: Vec<SceneStoryBeat>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub tag_references: Vec<TagReference>,
    /// Outline notes
    #[serde(default)]
    pub document: Option<Document>,
    /// Prose of the scene
    #[serde(default)]
    pub manuscript: Option<Document>,
    #[serde(default)]
    pub purpose: Option<ScenePurpose>,
    #[serde(default)]
    pub outcome: Option<SceneOutcome>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub progress: u8,
}

impl Scene {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: SceneId::new(),
            synopsis: String::new(),
            scene_type: SceneType::Default,
            pov: None,
            characters: Vec::new(),
            wip: false,
            plot_values: Vec::new(),
            day: 1,
            chapter: None,
            stage: None,
            beats: Vec::new(),
            comments: Vec::new(),
            tag_references: Vec::new(),
            document: None,
            manuscript: None,
            purpose: None,
            outcome: None,
            progress: 0,
        }
    }

    pub fn with_pov(mut self, pov: CharacterId) -> Self {
        self.pov = Some(pov);
        self
    }

    pub fn with_character(mut self, character: CharacterId) -> Self {
        if !self.characters.contains(&character) {
            self.characters.push(character);
        }
        self
    }

    pub fn with_plot(mut self, plot: PlotId) -> Self {
        self.plot_values.push(ScenePlotReference::new(plot));
        self
    }

    pub fn plot_ids(&self) -> impl Iterator<Item = PlotId> + '_ {
        self.plot_values.iter().map(|p| p.plot_id)
    }

    /// Pov first, then the remaining characters, without duplicates.
    pub fn involved_characters(&self) -> Vec<CharacterId> {
        let mut ids: Vec<CharacterId> = self.pov.into_iter().collect();
        for id in &self.characters {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }

    /// Documents owned by this scene: outline notes and manuscript.
    pub fn owned_documents(&self) -> impl Iterator<Item = &Document> {
        self.document.iter().chain(self.manuscript.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_day_defaults_to_one() {
        let id = SceneId::new();
        let scene: Scene =
            serde_json::from_str(&format!(r#"{{"title":"Opening","id":"{id}"}}"#)).unwrap();
        assert_eq!(scene.day, 1);
        assert!(scene.pov.is_none());
    }

    #[test]
    fn plot_references_are_stored_under_plots() {
        let scene = Scene::new("Opening").with_plot(PlotId::new());
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["plots"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn involved_characters_put_pov_first() {
        let pov = CharacterId::new();
        let other = CharacterId::new();
        let scene = Scene::new("Duel")
            .with_character(other)
            .with_character(pov)
            .with_pov(pov);
        assert_eq!(scene.involved_characters(), vec![pov, other]);
    }
}
