//! Plotlyst domain
//!
//! Story entities, the [`Novel`] aggregate and the built-in defaults a new
//! novel starts with. Nothing in this crate touches the filesystem.

pub mod aggregates;
pub mod common;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;

pub use aggregates::{Novel, NovelIndex, NovelParts};
pub use entities::{
    Board, Chapter, Character, CharacterBased, Diagram, DiagramData, Document, DocumentContent,
    DocumentKind, DocumentStorage, Goal, ImageRef, NovelDescriptor, Plot, Scene, SceneStage,
    StoryStructure, Tag, TagGroup, TagType, WorldBuilding,
};
pub use error::DomainError;
pub use events::NovelUpdate;

pub use ids::{
    BeatId, ChapterId, CharacterGoalId, CharacterId, CharacterPlanId, ConnectorId, DiagramId,
    DiagramNodeId, DocumentDataId, DocumentId, GoalId, ImageId, NovelId, PlotId, PlotValueId,
    SceneId, StageId, StoryStructureId, TagId, TaskId, TaskStatusId, TemplateFieldId,
    WorldEntityId,
};
