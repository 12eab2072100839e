//! Novel aggregate - the root of a story project
//!
//! # Arena + index
//!
//! Characters, scenes, plots, chapters and stages are kept in ordered vectors
//! (display order is significant). Relations between them are stored as typed
//! ids and resolved through [`NovelIndex`], an id→position map that is rebuilt
//! whenever a collection changes shape.
//!
//! # Invariants
//!
//! - Every id in the index points at an element with that id
//! - Ids are unique within each collection

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::entities::{
    default_character_networks, default_documents, default_stages, default_tag_groups,
    three_act_structure, Board, Chapter, Character, CharacterBased, Diagram, Document, Goal,
    NovelDescriptor, NovelPreferences, Plot, Scene, SceneStage, StoryStructure, Tag, TagGroup,
    WorldBuilding,
};
use crate::events::NovelUpdate;
use crate::{
    ChapterId, CharacterId, DomainError, NovelId, PlotId, SceneId, StageId, StoryStructureId,
    TagId,
};

/// Id→position lookup for the novel's ordered collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NovelIndex {
    characters: HashMap<CharacterId, usize>,
    scenes: HashMap<SceneId, usize>,
    plots: HashMap<PlotId, usize>,
    chapters: HashMap<ChapterId, usize>,
    stages: HashMap<StageId, usize>,
}

fn positions<K, T>(items: &[T], key: impl Fn(&T) -> K) -> HashMap<K, usize>
where
    K: Eq + Hash,
{
    items
        .iter()
        .enumerate()
        .map(|(position, item)| (key(item), position))
        .collect()
}

impl NovelIndex {
    fn build(
        characters: &[Character],
        scenes: &[Scene],
        plots: &[Plot],
        chapters: &[Chapter],
        stages: &[SceneStage],
    ) -> Self {
        Self {
            characters: positions(characters, |c| c.id),
            scenes: positions(scenes, |s| s.id),
            plots: positions(plots, |p| p.id),
            chapters: positions(chapters, |c| c.id),
            stages: positions(stages, |s| s.id),
        }
    }

    pub fn has_character(&self, id: CharacterId) -> bool {
        self.characters.contains_key(&id)
    }

    pub fn has_scene(&self, id: SceneId) -> bool {
        self.scenes.contains_key(&id)
    }

    pub fn has_plot(&self, id: PlotId) -> bool {
        self.plots.contains_key(&id)
    }

    pub fn has_chapter(&self, id: ChapterId) -> bool {
        self.chapters.contains_key(&id)
    }

    pub fn has_stage(&self, id: StageId) -> bool {
        self.stages.contains_key(&id)
    }
}

/// Everything a novel is made of, in the shape the store assembles it.
///
/// [`Novel::from_parts`] builds the index; no other checks are applied.
#[derive(Debug, Clone)]
pub struct NovelParts {
    pub descriptor: NovelDescriptor,
    pub story_structures: Vec<StoryStructure>,
    pub characters: Vec<Character>,
    pub scenes: Vec<Scene>,
    pub plots: Vec<Plot>,
    pub chapters: Vec<Chapter>,
    pub custom_chapters: u32,
    pub stages: Vec<SceneStage>,
    pub goals: Vec<Goal>,
    pub tags: Vec<TagGroup>,
    pub documents: Vec<Document>,
    pub premise: String,
    pub synopsis: Option<Document>,
    pub prefs: NovelPreferences,
    pub events_map: Option<Diagram>,
    pub character_networks: Vec<Diagram>,
    pub world: WorldBuilding,
    pub board: Board,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Novel {
    descriptor: NovelDescriptor,
    story_structures: Vec<StoryStructure>,
    characters: Vec<Character>,
    scenes: Vec<Scene>,
    plots: Vec<Plot>,
    chapters: Vec<Chapter>,
    custom_chapters: u32,
    stages: Vec<SceneStage>,
    goals: Vec<Goal>,
    tags: Vec<TagGroup>,
    documents: Vec<Document>,
    premise: String,
    synopsis: Option<Document>,
    prefs: NovelPreferences,
    events_map: Option<Diagram>,
    character_networks: Vec<Diagram>,
    world: WorldBuilding,
    board: Board,

    index: NovelIndex,
}

impl Novel {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// A fresh novel with the built-in defaults and the three act structure active.
    pub fn new(title: impl Into<String>) -> Self {
        let mut structure = three_act_structure();
        structure.active = true;
        Self::from_parts(NovelParts {
            descriptor: NovelDescriptor::new(title),
            story_structures: vec![structure],
            characters: Vec::new(),
            scenes: Vec::new(),
            plots: Vec::new(),
            chapters: Vec::new(),
            custom_chapters: 0,
            stages: default_stages(),
            goals: Vec::new(),
            tags: default_tag_groups(),
            documents: default_documents(),
            premise: String::new(),
            synopsis: None,
            prefs: NovelPreferences::default(),
            events_map: None,
            character_networks: default_character_networks(),
            world: WorldBuilding::default(),
            board: Board::default(),
        })
    }

    pub fn with_creation_date(mut self, creation_date: DateTime<Utc>) -> Self {
        self.descriptor.creation_date = Some(creation_date);
        self
    }

    pub fn from_parts(parts: NovelParts) -> Self {
        let index = NovelIndex::build(
            &parts.characters,
            &parts.scenes,
            &parts.plots,
            &parts.chapters,
            &parts.stages,
        );
        Self {
            descriptor: parts.descriptor,
            story_structures: parts.story_structures,
            characters: parts.characters,
            scenes: parts.scenes,
            plots: parts.plots,
            chapters: parts.chapters,
            custom_chapters: parts.custom_chapters,
            stages: parts.stages,
            goals: parts.goals,
            tags: parts.tags,
            documents: parts.documents,
            premise: parts.premise,
            synopsis: parts.synopsis,
            prefs: parts.prefs,
            events_map: parts.events_map,
            character_networks: parts.character_networks,
            world: parts.world,
            board: parts.board,
            index,
        }
    }

    fn reindex(&mut self) {
        self.index = NovelIndex::build(
            &self.characters,
            &self.scenes,
            &self.plots,
            &self.chapters,
            &self.stages,
        );
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> NovelId {
        self.descriptor.id
    }

    pub fn title(&self) -> &str {
        &self.descriptor.title
    }

    pub fn descriptor(&self) -> &NovelDescriptor {
        &self.descriptor
    }

    pub fn index(&self) -> &NovelIndex {
        &self.index
    }

    pub fn story_structures(&self) -> &[StoryStructure] {
        &self.story_structures
    }

    /// The active structure, or the first one when none is marked active.
    pub fn active_story_structure(&self) -> Option<&StoryStructure> {
        self.story_structures
            .iter()
            .find(|s| s.active)
            .or_else(|| self.story_structures.first())
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.index
            .characters
            .get(&id)
            .and_then(|&position| self.characters.get(position))
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.index
            .characters
            .get(&id)
            .and_then(|&position| self.characters.get_mut(position))
    }

    /// The character an item belongs to, if it belongs to one still in the novel.
    pub fn character_of(&self, item: &impl CharacterBased) -> Option<&Character> {
        item.character_id().and_then(|id| self.character(id))
    }

    pub fn major_characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(|c| c.is_major())
    }

    /// Distinct pov characters in scene order.
    pub fn pov_characters(&self) -> Vec<&Character> {
        let mut seen = Vec::new();
        for scene in &self.scenes {
            if let Some(pov) = scene.pov {
                if !seen.contains(&pov) {
                    seen.push(pov);
                }
            }
        }
        seen.into_iter().filter_map(|id| self.character(id)).collect()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.index
            .scenes
            .get(&id)
            .and_then(|&position| self.scenes.get(position))
    }

    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.index
            .scenes
            .get(&id)
            .and_then(|&position| self.scenes.get_mut(position))
    }

    pub fn scenes_in_chapter(&self, chapter: ChapterId) -> impl Iterator<Item = &Scene> {
        self.scenes
            .iter()
            .filter(move |s| s.chapter == Some(chapter))
    }

    /// Manuscript documents of every scene that has one, in scene order.
    pub fn manuscripts_mut(&mut self) -> impl Iterator<Item = &mut Document> {
        self.scenes
            .iter_mut()
            .filter_map(|s| s.manuscript.as_mut())
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn plot(&self, id: PlotId) -> Option<&Plot> {
        self.index
            .plots
            .get(&id)
            .and_then(|&position| self.plots.get(position))
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter(&self, id: ChapterId) -> Option<&Chapter> {
        self.index
            .chapters
            .get(&id)
            .and_then(|&position| self.chapters.get(position))
    }

    pub fn custom_chapters(&self) -> u32 {
        self.custom_chapters
    }

    pub fn stages(&self) -> &[SceneStage] {
        &self.stages
    }

    pub fn stage(&self, id: StageId) -> Option<&SceneStage> {
        self.index
            .stages
            .get(&id)
            .and_then(|&position| self.stages.get(position))
    }

    pub fn active_stage(&self) -> Option<&SceneStage> {
        self.prefs.active_stage_id.and_then(|id| self.stage(id))
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn tags(&self) -> &[TagGroup] {
        &self.tags
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags
            .iter()
            .flat_map(|group| group.tags.iter())
            .find(|t| t.id == id)
    }

    /// Tags a scene refers to that still exist.
    pub fn scene_tags(&self, scene: &Scene) -> Vec<&Tag> {
        scene
            .tag_references
            .iter()
            .filter_map(|reference| self.tag(reference.tag_id))
            .collect()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut [Document] {
        &mut self.documents
    }

    pub fn premise(&self) -> &str {
        &self.premise
    }

    pub fn synopsis(&self) -> Option<&Document> {
        self.synopsis.as_ref()
    }

    pub fn synopsis_mut(&mut self) -> Option<&mut Document> {
        self.synopsis.as_mut()
    }

    pub fn prefs(&self) -> &NovelPreferences {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut NovelPreferences {
        &mut self.prefs
    }

    pub fn events_map(&self) -> Option<&Diagram> {
        self.events_map.as_ref()
    }

    pub fn events_map_mut(&mut self) -> Option<&mut Diagram> {
        self.events_map.as_mut()
    }

    pub fn character_networks(&self) -> &[Diagram] {
        &self.character_networks
    }

    pub fn character_networks_mut(&mut self) -> &mut [Diagram] {
        &mut self.character_networks
    }

    pub fn world(&self) -> &WorldBuilding {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldBuilding {
        &mut self.world
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn rename(&mut self, title: impl Into<String>) -> Result<NovelUpdate, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("Novel title cannot be empty"));
        }
        let from = std::mem::replace(&mut self.descriptor.title, title.clone());
        Ok(NovelUpdate::Renamed { from, to: title })
    }

    pub fn set_premise(&mut self, premise: impl Into<String>) -> NovelUpdate {
        self.premise = premise.into();
        NovelUpdate::PremiseChanged
    }

    pub fn set_synopsis(&mut self, synopsis: Document) -> NovelUpdate {
        let document_id = synopsis.id;
        self.synopsis = Some(synopsis);
        NovelUpdate::DocumentAdded { document_id }
    }

    pub fn enable_events_map(&mut self, diagram: Diagram) {
        self.events_map = Some(diagram);
    }

    pub fn add_character(&mut self, character: Character) -> NovelUpdate {
        let character_id = character.id;
        if self.index.has_character(character_id) {
            return NovelUpdate::CharacterAlreadyPresent { character_id };
        }
        self.index
            .characters
            .insert(character_id, self.characters.len());
        self.characters.push(character);
        NovelUpdate::CharacterAdded { character_id }
    }

    /// Removes the character. Scenes keep their ids to it until the next load.
    pub fn remove_character(&mut self, id: CharacterId) -> Result<NovelUpdate, DomainError> {
        let position = *self
            .index
            .characters
            .get(&id)
            .ok_or_else(|| DomainError::not_found("Character", id.to_string()))?;
        let character = self.characters.remove(position);
        self.reindex();
        Ok(NovelUpdate::CharacterRemoved {
            character: Box::new(character),
        })
    }

    pub fn add_scene(&mut self, scene: Scene) -> NovelUpdate {
        let position = self.scenes.len();
        self.insert_scene(position, scene)
    }

    /// Inserts a scene after another one, inheriting its day and chapter.
    pub fn insert_scene_after(
        &mut self,
        after: SceneId,
        mut scene: Scene,
    ) -> Result<NovelUpdate, DomainError> {
        let position = *self
            .index
            .scenes
            .get(&after)
            .ok_or_else(|| DomainError::not_found("Scene", after.to_string()))?;
        if let Some(previous) = self.scenes.get(position) {
            scene.day = previous.day;
            scene.chapter = previous.chapter;
        }
        Ok(self.insert_scene(position + 1, scene))
    }

    fn insert_scene(&mut self, position: usize, scene: Scene) -> NovelUpdate {
        let scene_id = scene.id;
        if self.index.has_scene(scene_id) {
            return NovelUpdate::SceneAlreadyPresent { scene_id };
        }
        self.scenes.insert(position, scene);
        self.reindex();
        NovelUpdate::SceneAdded { scene_id, position }
    }

    pub fn remove_scene(&mut self, id: SceneId) -> Result<NovelUpdate, DomainError> {
        let position = *self
            .index
            .scenes
            .get(&id)
            .ok_or_else(|| DomainError::not_found("Scene", id.to_string()))?;
        let scene = self.scenes.remove(position);
        self.reindex();
        Ok(NovelUpdate::SceneRemoved {
            scene: Box::new(scene),
        })
    }

    pub fn add_chapter(&mut self, chapter: Chapter) -> NovelUpdate {
        let chapter_id = chapter.id;
        if self.index.has_chapter(chapter_id) {
            return NovelUpdate::ChapterAlreadyPresent { chapter_id };
        }
        self.index.chapters.insert(chapter_id, self.chapters.len());
        self.chapters.push(chapter);
        self.custom_chapters += 1;
        NovelUpdate::ChapterAdded { chapter_id }
    }

    /// Moves a scene into a chapter, or out of any chapter with `None`.
    pub fn assign_chapter(
        &mut self,
        scene_id: SceneId,
        chapter: Option<ChapterId>,
    ) -> Result<NovelUpdate, DomainError> {
        if let Some(chapter_id) = chapter {
            if !self.index.has_chapter(chapter_id) {
                return Err(DomainError::not_found("Chapter", chapter_id.to_string()));
            }
        }
        let scene = self
            .scene_mut(scene_id)
            .ok_or_else(|| DomainError::not_found("Scene", scene_id.to_string()))?;
        let from = std::mem::replace(&mut scene.chapter, chapter);
        Ok(NovelUpdate::SceneChapterChanged {
            scene_id,
            from,
            to: chapter,
        })
    }

    pub fn add_plot(&mut self, plot: Plot) -> NovelUpdate {
        let plot_id = plot.id;
        if self.index.has_plot(plot_id) {
            return NovelUpdate::PlotAlreadyPresent { plot_id };
        }
        self.index.plots.insert(plot_id, self.plots.len());
        self.plots.push(plot);
        NovelUpdate::PlotAdded { plot_id }
    }

    /// Adds a goal. Goals that no character plan refers to are dropped on load.
    pub fn add_goal(&mut self, goal: Goal) -> NovelUpdate {
        let goal_id = goal.id;
        self.goals.push(goal);
        NovelUpdate::GoalAdded { goal_id }
    }

    pub fn add_tag(&mut self, tag: Tag) -> Result<NovelUpdate, DomainError> {
        let group = self
            .tags
            .iter_mut()
            .find(|g| g.tag_type.text == tag.tag_type)
            .ok_or_else(|| DomainError::not_found("TagType", tag.tag_type.clone()))?;
        let update = NovelUpdate::TagAdded {
            tag_id: tag.id,
            tag_type: tag.tag_type.clone(),
        };
        group.tags.push(tag);
        Ok(update)
    }

    pub fn add_document(&mut self, document: Document) -> NovelUpdate {
        let document_id = document.id;
        self.documents.push(document);
        NovelUpdate::DocumentAdded { document_id }
    }

    pub fn add_story_structure(&mut self, structure: StoryStructure) -> NovelUpdate {
        let structure_id = structure.id;
        self.story_structures.push(structure);
        NovelUpdate::StoryStructureAdded { structure_id }
    }

    /// Makes exactly one structure active.
    pub fn activate_story_structure(
        &mut self,
        id: StoryStructureId,
    ) -> Result<NovelUpdate, DomainError> {
        if !self.story_structures.iter().any(|s| s.id == id) {
            return Err(DomainError::not_found("StoryStructure", id.to_string()));
        }
        let from = self.story_structures.iter().find(|s| s.active).map(|s| s.id);
        for structure in &mut self.story_structures {
            structure.active = structure.id == id;
        }
        Ok(NovelUpdate::StoryStructureActivated { from, to: id })
    }
}
