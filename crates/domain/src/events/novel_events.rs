//! Novel mutation outcomes.

use crate::entities::{Character, Scene};
use crate::{ChapterId, CharacterId, DocumentId, GoalId, PlotId, SceneId, StoryStructureId, TagId};

/// Outcome of a structural change to a novel.
#[derive(Debug, Clone, PartialEq)]
pub enum NovelUpdate {
    Renamed { from: String, to: String },
    PremiseChanged,
    CharacterAdded { character_id: CharacterId },
    CharacterAlreadyPresent { character_id: CharacterId },
    CharacterRemoved { character: Box<Character> },
    SceneAdded { scene_id: SceneId, position: usize },
    SceneAlreadyPresent { scene_id: SceneId },
    SceneRemoved { scene: Box<Scene> },
    SceneChapterChanged {
        scene_id: SceneId,
        from: Option<ChapterId>,
        to: Option<ChapterId>,
    },
    ChapterAdded { chapter_id: ChapterId },
    ChapterAlreadyPresent { chapter_id: ChapterId },
    PlotAdded { plot_id: PlotId },
    PlotAlreadyPresent { plot_id: PlotId },
    GoalAdded { goal_id: GoalId },
    TagAdded { tag_id: TagId, tag_type: String },
    DocumentAdded { document_id: DocumentId },
    StoryStructureAdded { structure_id: StoryStructureId },
    StoryStructureActivated {
        from: Option<StoryStructureId>,
        to: StoryStructureId,
    },
}

impl NovelUpdate {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            NovelUpdate::Renamed { .. } => "renamed",
            NovelUpdate::PremiseChanged => "premise_changed",
            NovelUpdate::CharacterAdded { .. } => "character_added",
            NovelUpdate::CharacterAlreadyPresent { .. } => "character_already_present",
            NovelUpdate::CharacterRemoved { .. } => "character_removed",
            NovelUpdate::SceneAdded { .. } => "scene_added",
            NovelUpdate::SceneAlreadyPresent { .. } => "scene_already_present",
            NovelUpdate::SceneRemoved { .. } => "scene_removed",
            NovelUpdate::SceneChapterChanged { .. } => "scene_chapter_changed",
            NovelUpdate::ChapterAdded { .. } => "chapter_added",
            NovelUpdate::ChapterAlreadyPresent { .. } => "chapter_already_present",
            NovelUpdate::PlotAdded { .. } => "plot_added",
            NovelUpdate::PlotAlreadyPresent { .. } => "plot_already_present",
            NovelUpdate::GoalAdded { .. } => "goal_added",
            NovelUpdate::TagAdded { .. } => "tag_added",
            NovelUpdate::DocumentAdded { .. } => "document_added",
            NovelUpdate::StoryStructureAdded { .. } => "story_structure_added",
            NovelUpdate::StoryStructureActivated { .. } => "story_structure_activated",
        }
    }

    /// Whether the aggregate record changed and needs to be written.
    pub fn is_change(&self) -> bool {
        !matches!(
            self,
            NovelUpdate::CharacterAlreadyPresent { .. }
                | NovelUpdate::SceneAlreadyPresent { .. }
                | NovelUpdate::ChapterAlreadyPresent { .. }
                | NovelUpdate::PlotAlreadyPresent { .. }
        )
    }
}
