//! Domain entities
//!
//! Plain records with public fields. Anything persisted is `Serialize` +
//! `Deserialize` and omits fields that hold their default value.

mod board;
mod chapter;
mod character;
mod descriptor;
mod diagram;
mod document;
mod goal;
mod image;
mod plot;
mod preferences;
mod scene;
mod stage;
mod story_structure;
mod tag;
mod world;

pub use board::{default_task_statuses, Board, Task, TaskStatus};
pub use chapter::{Chapter, ChapterType};
pub use character::{
    AvatarPreferences, BackstoryEvent, BackstoryEventType, Character, CharacterBased,
    CharacterPreferences, Role, RoleImportance, TemplateValue,
};
pub use descriptor::{
    ImportOrigin, ImportOriginType, LanguageSettings, NovelDescriptor, StoryType,
};
pub use diagram::{
    default_character_networks, Connector, Diagram, DiagramData, DiagramKind, DiagramNode,
    DiagramNodeType, DiagramSettings,
};
pub use document::{
    default_documents, Causality, CausalityItem, DataKind, Document, DocumentContent,
    DocumentKind, DocumentStatistics, DocumentStorage, MiceQuotient, MiceThread, MiceType,
    PremiseBuilder, PremiseIdea,
};
pub use goal::{CharacterGoal, CharacterPlan, Goal};
pub use image::ImageRef;
pub use plot::{Plot, PlotType, PlotValue};
pub use preferences::{
    DocsPreferences, NovelPanel, NovelPreferences, PanelPreferences, ScenesView,
};
pub use scene::{
    Comment, Scene, SceneOutcome, ScenePlotReference, ScenePlotReferenceData,
    ScenePlotValueCharge, ScenePurpose, SceneStoryBeat, SceneType, TagReference,
};
pub use stage::{default_stages, SceneStage};
pub use story_structure::{
    three_act_structure, StoryBeat, StoryBeatType, StoryStructure,
};
pub use tag::{
    default_general_tags, default_tag_groups, default_tag_types, group_tags, Tag, TagGroup,
    TagType, GENERAL_TAG_TYPE,
};
pub use world::{GlossaryItem, WorldBuilding, WorldBuildingEntity};
