//! Reference resolution on load
//!
//! Records store relations as ids. Once the referenced collections are
//! loaded, every id is checked against them; ids that point nowhere are
//! dropped from the referring field. Nothing is rewritten on disk until the
//! next save.

use std::collections::HashSet;

use plotlyst_domain::entities::{
    group_tags, three_act_structure, Board, Character, Goal, NovelDescriptor, Plot, Scene,
    StoryStructure, WorldBuilding,
};
use plotlyst_domain::{ChapterId, CharacterId, GoalId, Novel, NovelParts, PlotId, StageId};

use super::records::NovelRecord;

/// Id sets of the collections a scene can refer to.
pub struct ReferenceResolver {
    characters: HashSet<CharacterId>,
    plots: HashSet<PlotId>,
    chapters: HashSet<ChapterId>,
    stages: HashSet<StageId>,
}

impl ReferenceResolver {
    pub fn new(characters: &[Character], record: &NovelRecord) -> Self {
        Self {
            characters: characters.iter().map(|c| c.id).collect(),
            plots: record.plots.iter().map(|p| p.id).collect(),
            chapters: record.chapters.iter().map(|c| c.id).collect(),
            stages: record.stages.iter().map(|s| s.id).collect(),
        }
    }

    /// Clears a character reference that points at no loaded character.
    /// Returns whether the reference was dropped.
    pub fn resolve_character(&self, reference: &mut Option<CharacterId>) -> bool {
        if reference.is_some_and(|id| !self.characters.contains(&id)) {
            *reference = None;
            return true;
        }
        false
    }

    /// Drops the scene's dangling references. Returns how many were dropped.
    pub fn resolve_scene(&self, scene: &mut Scene) -> usize {
        let mut dropped = 0;

        if self.resolve_character(&mut scene.pov) {
            dropped += 1;
        }

        let before = scene.characters.len();
        scene.characters.retain(|id| self.characters.contains(id));
        dropped += before - scene.characters.len();

        let before = scene.plot_values.len();
        scene
            .plot_values
            .retain(|reference| self.plots.contains(&reference.plot_id));
        dropped += before - scene.plot_values.len();

        if scene.chapter.is_some_and(|id| !self.chapters.contains(&id)) {
            scene.chapter = None;
            dropped += 1;
        }
        if scene.stage.is_some_and(|id| !self.stages.contains(&id)) {
            scene.stage = None;
            dropped += 1;
        }

        if dropped > 0 {
            tracing::warn!(
                scene_id = %scene.id,
                dropped,
                "Dropped dangling references from scene"
            );
        }
        dropped
    }

    fn resolve_plot(&self, plot: &mut Plot) {
        if self.resolve_character(&mut plot.character_id) {
            tracing::warn!(plot_id = %plot.id, "Dropped dangling character from plot");
        }
    }

    fn resolve_structure(&self, structure: &mut StoryStructure) {
        if self.resolve_character(&mut structure.character_id) {
            tracing::warn!(
                structure_id = %structure.id,
                "Dropped dangling character from story structure"
            );
        }
    }
}

/// Falls back to the three act structure when there is none and makes sure
/// exactly one structure is active.
pub fn apply_structure_defaults(structures: &mut Vec<StoryStructure>) {
    if structures.is_empty() {
        structures.push(three_act_structure());
    }
    let active = structures.iter().position(|s| s.active).unwrap_or(0);
    for (position, structure) in structures.iter_mut().enumerate() {
        structure.active = position == active;
    }
}

/// Keeps only the goals some character plan refers to.
pub fn referenced_goals(goals: Vec<Goal>, characters: &[Character]) -> Vec<Goal> {
    let referenced: HashSet<GoalId> = characters
        .iter()
        .flat_map(|c| c.plans.iter())
        .flat_map(|plan| plan.goal_ids())
        .collect();
    goals
        .into_iter()
        .filter(|goal| referenced.contains(&goal.id))
        .collect()
}

/// Builds the in-memory novel from its record and loaded entity files.
pub fn assemble(
    descriptor: NovelDescriptor,
    record: NovelRecord,
    characters: Vec<Character>,
    mut scenes: Vec<Scene>,
    world: Option<WorldBuilding>,
    board: Option<Board>,
) -> Novel {
    let resolver = ReferenceResolver::new(&characters, &record);

    let mut story_structures = record.story_structures;
    apply_structure_defaults(&mut story_structures);
    for structure in &mut story_structures {
        resolver.resolve_structure(structure);
    }

    for scene in &mut scenes {
        resolver.resolve_scene(scene);
    }

    let mut plots = record.plots;
    for plot in &mut plots {
        resolver.resolve_plot(plot);
    }

    let goals = referenced_goals(record.goals, &characters);
    let tags = group_tags(record.tag_types, record.tags);

    Novel::from_parts(NovelParts {
        descriptor,
        story_structures,
        characters,
        scenes,
        plots,
        chapters: record.chapters,
        custom_chapters: record.custom_chapters,
        stages: record.stages,
        goals,
        tags,
        documents: record.documents,
        premise: record.premise,
        synopsis: record.synopsis,
        prefs: record.prefs,
        events_map: record.events_map,
        character_networks: record.character_networks,
        world: world.unwrap_or_default(),
        board: board.unwrap_or_default(),
    })
}
