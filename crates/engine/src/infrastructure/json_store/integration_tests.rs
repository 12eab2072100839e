use std::fs;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tempfile::{tempdir, TempDir};

use plotlyst_domain::entities::{
    default_general_tags, Chapter, Character, CharacterGoal, CharacterPlan, Document, Goal, Plot,
    PlotType, Role, Scene, Tag, GENERAL_TAG_TYPE,
};
use plotlyst_domain::{Novel, NovelId, NovelUpdate};

use super::{JsonClient, WorkspaceLayout};
use crate::infrastructure::ports::{
    CharacterRepo, DocumentRepo, NovelRepo, ProjectRepo, RepoError, SceneRepo,
};
use crate::use_cases::Manuscript;

const AVATAR: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];

fn workspace() -> (TempDir, WorkspaceLayout, JsonClient) {
    let dir = tempdir().unwrap();
    let layout = WorkspaceLayout::new(dir.path());
    let client = JsonClient::init(dir.path()).unwrap();
    (dir, layout, client)
}

fn new_novel(title: &str) -> Novel {
    Novel::new(title).with_creation_date(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
}

fn image_count(layout: &WorkspaceLayout) -> usize {
    fs::read_dir(layout.images_dir()).unwrap().count()
}

/// Inserts a character the way the application does: mutate, then persist.
fn add_character(client: &JsonClient, novel: &mut Novel, character: Character) -> Character {
    novel.add_character(character.clone());
    client.insert_character(novel, &character).unwrap();
    character
}

fn add_scene(client: &JsonClient, novel: &mut Novel, scene: Scene) -> Scene {
    novel.add_scene(scene.clone());
    client.insert_scene(novel, &scene).unwrap();
    scene
}

#[test]
fn my_first_novel_scenario() {
    let (_dir, _layout, client) = workspace();
    let mut novel = new_novel("My First Novel");
    client.insert_novel(&novel).unwrap();

    let jane = add_character(&client, &mut novel, Character::new("Jane"));
    let tom = add_character(&client, &mut novel, Character::new("Tom"));
    let scene = add_scene(
        &client,
        &mut novel,
        Scene::new("Meeting")
            .with_character(jane.id)
            .with_character(tom.id),
    );

    let fetched = client.fetch_novel(novel.id()).unwrap();

    assert_eq!(fetched.title(), "My First Novel");
    let fetched_scene = fetched.scene(scene.id).unwrap();
    assert_eq!(fetched_scene.characters, vec![jane.id, tom.id]);
    assert!(fetched_scene.pov.is_none());
    assert_eq!(client.list_novels().unwrap().len(), 1);
}

#[test]
fn fetch_reconstructs_inserted_graph() {
    let (_dir, _layout, client) = workspace();
    let mut novel = new_novel("Round Trip");
    client.insert_novel(&novel).unwrap();

    let goal = Goal::new("Reclaim the throne");
    novel.add_goal(goal.clone());
    let mut queen = Character::new("Queen")
        .with_role(Role::protagonist())
        .with_plan(CharacterPlan::new().with_goal(CharacterGoal::new(goal.id)));
    queen.avatar = Some(AVATAR.to_vec());
    let queen = add_character(&client, &mut novel, queen);
    let knight = add_character(&client, &mut novel, Character::new("Knight"));

    let chapter = Chapter::new("Chapter 1");
    novel.add_chapter(chapter.clone());
    let plot = Plot::new("Succession", PlotType::Main);
    novel.add_plot(plot.clone());
    novel.add_tag(Tag::new("Crown", "Symbols")).unwrap();
    novel.set_premise("A queen in exile returns");

    let mut scene = Scene::new("Return")
        .with_pov(queen.id)
        .with_character(knight.id)
        .with_plot(plot.id);
    scene.chapter = Some(chapter.id);
    scene.stage = Some(novel.stages()[1].id);
    add_scene(&client, &mut novel, scene);
    client.update_novel(&novel).unwrap();

    let fetched = client.fetch_novel(novel.id()).unwrap();

    assert_eq!(fetched, novel);
    assert_eq!(fetched.character(queen.id).unwrap().avatar.as_deref(), Some(AVATAR));
    assert_eq!(fetched.goals(), &[goal]);
}

#[test]
fn unchanged_novel_writes_identical_bytes() {
    let (_dir, layout, client) = workspace();
    let mut novel = new_novel("Stable");
    client.insert_novel(&novel).unwrap();
    add_character(&client, &mut novel, Character::new("Ada"));
    novel.add_chapter(Chapter::new("One"));

    client.update_novel(&novel).unwrap();
    let record = fs::read(layout.novel_file(novel.id())).unwrap();
    let board = fs::read(layout.board_file(novel.id())).unwrap();

    client.update_novel(&novel).unwrap();
    assert_eq!(fs::read(layout.novel_file(novel.id())).unwrap(), record);
    assert_eq!(fs::read(layout.board_file(novel.id())).unwrap(), board);

    // Fetching rewrites the record in the same canonical form
    client.fetch_novel(novel.id()).unwrap();
    assert_eq!(fs::read(layout.novel_file(novel.id())).unwrap(), record);
}

#[test]
fn deleted_pov_character_reads_back_as_no_pov() {
    let (_dir, layout, client) = workspace();
    let mut novel = new_novel("Dangling");
    client.insert_novel(&novel).unwrap();
    let narrator = add_character(&client, &mut novel, Character::new("Narrator"));
    let scene = add_scene(
        &client,
        &mut novel,
        Scene::new("Prologue")
            .with_pov(narrator.id)
            .with_character(narrator.id),
    );

    let NovelUpdate::CharacterRemoved { character } =
        novel.remove_character(narrator.id).unwrap()
    else {
        panic!("expected CharacterRemoved");
    };
    client.delete_character(&novel, &character).unwrap();

    // The scene file still holds the stale id
    let stored = fs::read_to_string(layout.scene_file(novel.id(), scene.id)).unwrap();
    assert!(stored.contains(&narrator.id.to_string()));

    let fetched = client.fetch_novel(novel.id()).unwrap();
    let fetched_scene = fetched.scene(scene.id).unwrap();
    assert!(fetched_scene.pov.is_none());
    assert!(fetched_scene.characters.is_empty());
}

#[test]
fn builtin_tags_are_merged_into_general() {
    let (_dir, layout, client) = workspace();
    let novel = new_novel("Tagged");
    client.insert_novel(&novel).unwrap();

    let path = layout.novel_file(novel.id());
    let mut record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let fields = record.as_object_mut().unwrap();
    fields.remove("tags");
    fields.remove("tag_types");
    fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();

    let fetched = client.fetch_novel(novel.id()).unwrap();

    let general = &fetched.tags()[0];
    assert_eq!(general.tag_type.text, GENERAL_TAG_TYPE);
    let ids: Vec<_> = general.tags.iter().map(|t| t.id).collect();
    let builtin: Vec<_> = default_general_tags().iter().map(|t| t.id).collect();
    assert_eq!(ids, builtin);
}

#[test]
fn fetched_documents_load_lazily() {
    let (_dir, layout, client) = workspace();
    let mut novel = new_novel("Lazy");
    let mut notes = Document::prose("Research");
    notes.set_html("<p>Harbor towns</p>");
    novel.add_document(notes.clone());
    client.insert_novel(&novel).unwrap();
    client.update_document(novel.id(), &notes).unwrap();

    let mut fetched = client.fetch_novel(novel.id()).unwrap();
    let novel_id = fetched.id();
    let document = fetched
        .documents_mut()
        .iter_mut()
        .find(|d| d.id == notes.id)
        .unwrap();
    assert!(!document.is_loaded());
    assert!(document.content().as_html().is_none());

    client.load_document(novel_id, document).unwrap();
    assert_eq!(document.content().as_html(), Some("<p>Harbor towns</p>"));

    // Already loaded: the file is not read again
    fs::remove_file(layout.html_file(novel_id, notes.id)).unwrap();
    client.load_document(novel_id, document).unwrap();
    assert_eq!(document.content().as_html(), Some("<p>Harbor towns</p>"));
}

#[test]
fn manuscripts_load_for_every_scene() {
    let (_dir, _layout, client) = workspace();
    let mut novel = new_novel("Drafted");
    client.insert_novel(&novel).unwrap();
    let mut scene = Scene::new("Opening");
    let mut manuscript = Document::prose("Opening");
    manuscript.set_html("<p>It was raining.</p>");
    scene.manuscript = Some(manuscript.clone());
    add_scene(&client, &mut novel, scene);
    client.update_document(novel.id(), &manuscript).unwrap();

    let mut fetched = client.fetch_novel(novel.id()).unwrap();
    let client = Arc::new(client);
    Manuscript::new(client.clone(), client)
        .load_manuscript(&mut fetched)
        .unwrap();

    let loaded = fetched.scenes()[0].manuscript.as_ref().unwrap();
    assert!(loaded.is_loaded());
    assert_eq!(loaded.content().as_html(), Some("<p>It was raining.</p>"));
}

#[test]
fn avatar_is_replaced_only_on_request() {
    let (_dir, layout, client) = workspace();
    let mut novel = new_novel("Portraits");
    client.insert_novel(&novel).unwrap();
    let mut hero = Character::new("Hero");
    hero.avatar = Some(AVATAR.to_vec());
    let mut hero = add_character(&client, &mut novel, hero);
    assert_eq!(image_count(&layout), 1);

    hero.name = "Renamed Hero".to_string();
    hero.avatar = None;
    client.update_character(novel.id(), &hero, false).unwrap();
    let fetched = client.fetch_novel(novel.id()).unwrap();
    assert_eq!(fetched.character(hero.id).unwrap().name, "Renamed Hero");
    assert_eq!(fetched.character(hero.id).unwrap().avatar.as_deref(), Some(AVATAR));

    hero.avatar = Some(vec![0x89, 0x50, 0x4e, 0x47]);
    client.update_character(novel.id(), &hero, true).unwrap();
    assert_eq!(image_count(&layout), 1);

    hero.avatar = None;
    client.update_character(novel.id(), &hero, true).unwrap();
    assert_eq!(image_count(&layout), 0);
    let fetched = client.fetch_novel(novel.id()).unwrap();
    assert!(fetched.character(hero.id).unwrap().avatar.is_none());
}

#[test]
fn deleting_a_character_removes_its_files() {
    let (_dir, layout, client) = workspace();
    let mut novel = new_novel("Cascade");
    client.insert_novel(&novel).unwrap();

    let mut backstory = Document::prose("Backstory");
    backstory.set_html("<p>Born at sea</p>");
    let mut journal = Document::prose("Journal");
    journal.set_html("<p>Day one</p>");
    let mut sailor = Character::new("Sailor");
    sailor.avatar = Some(AVATAR.to_vec());
    sailor.document = Some(backstory.clone());
    sailor.journals.push(journal.clone());
    let sailor = add_character(&client, &mut novel, sailor);
    client.update_document(novel.id(), &backstory).unwrap();
    client.update_document(novel.id(), &journal).unwrap();

    let NovelUpdate::CharacterRemoved { character } = novel.remove_character(sailor.id).unwrap()
    else {
        panic!("expected CharacterRemoved");
    };
    client.delete_character(&novel, &character).unwrap();

    assert!(!layout.character_file(novel.id(), sailor.id).exists());
    assert!(!layout.html_file(novel.id(), backstory.id).exists());
    assert!(!layout.html_file(novel.id(), journal.id).exists());
    assert_eq!(image_count(&layout), 0);
    assert!(client.fetch_novel(novel.id()).unwrap().characters().is_empty());
}

#[test]
fn deleting_a_scene_removes_its_documents() {
    let (_dir, layout, client) = workspace();
    let mut novel = new_novel("Cut");
    client.insert_novel(&novel).unwrap();
    let mut outline = Document::prose("Outline");
    outline.set_html("<p>beats</p>");
    let mut manuscript = Document::prose("Prose");
    manuscript.set_html("<p>words</p>");
    let mut scene = Scene::new("Cut scene");
    scene.document = Some(outline.clone());
    scene.manuscript = Some(manuscript.clone());
    let scene = add_scene(&client, &mut novel, scene);
    client.update_document(novel.id(), &outline).unwrap();
    client.update_document(novel.id(), &manuscript).unwrap();

    let NovelUpdate::SceneRemoved { scene: removed } = novel.remove_scene(scene.id).unwrap() else {
        panic!("expected SceneRemoved");
    };
    client.delete_scene(&novel, &removed).unwrap();

    assert!(!layout.scene_file(novel.id(), scene.id).exists());
    assert!(!layout.html_file(novel.id(), outline.id).exists());
    assert!(!layout.html_file(novel.id(), manuscript.id).exists());
    assert!(client.fetch_novel(novel.id()).unwrap().scenes().is_empty());
}

#[test]
fn missing_entity_files_are_skipped() {
    let (_dir, layout, client) = workspace();
    let mut novel = new_novel("Partial");
    client.insert_novel(&novel).unwrap();
    let lost = add_character(&client, &mut novel, Character::new("Lost"));
    let kept = add_character(&client, &mut novel, Character::new("Kept"));
    fs::remove_file(layout.character_file(novel.id(), lost.id)).unwrap();

    let fetched = client.fetch_novel(novel.id()).unwrap();

    assert_eq!(fetched.characters().len(), 1);
    assert_eq!(fetched.characters()[0].id, kept.id);
}

#[test]
fn delete_novel_removes_everything() {
    let (_dir, layout, client) = workspace();
    let mut novel = new_novel("Gone");
    client.insert_novel(&novel).unwrap();
    let mut character = Character::new("Ghost");
    character.avatar = Some(AVATAR.to_vec());
    add_character(&client, &mut novel, character);
    assert_eq!(image_count(&layout), 1);

    client.delete_novel(novel.id()).unwrap();

    assert!(!client.has_novel(novel.id()).unwrap());
    assert!(!layout.novel_file(novel.id()).exists());
    assert!(!layout.novel_dir(novel.id()).exists());
    assert_eq!(image_count(&layout), 0);
    assert!(client.delete_novel(novel.id()).unwrap_err().is_not_found());
}

#[test]
fn delete_novel_survives_malformed_character_file() {
    let (_dir, layout, client) = workspace();
    let mut novel = new_novel("Corrupted");
    client.insert_novel(&novel).unwrap();
    let broken = add_character(&client, &mut novel, Character::new("Broken"));
    let mut portrait = Character::new("Portrait");
    portrait.avatar = Some(AVATAR.to_vec());
    add_character(&client, &mut novel, portrait);
    fs::write(layout.character_file(novel.id(), broken.id), "{oops").unwrap();

    client.delete_novel(novel.id()).unwrap();

    assert!(!client.has_novel(novel.id()).unwrap());
    assert!(!layout.novel_file(novel.id()).exists());
    assert!(!layout.novel_dir(novel.id()).exists());
    assert_eq!(image_count(&layout), 0);
}

#[test]
fn unknown_novel_is_not_found() {
    let (_dir, layout, client) = workspace();
    assert!(client.fetch_novel(NovelId::new()).unwrap_err().is_not_found());

    // Listed in the manifest but the record is gone
    let novel = new_novel("Orphan");
    client.insert_novel(&novel).unwrap();
    fs::remove_file(layout.novel_file(novel.id())).unwrap();
    assert!(matches!(
        client.fetch_novel(novel.id()),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn descriptor_changes_reach_the_manifest() {
    let (dir, _layout, client) = workspace();
    let mut novel = new_novel("Draft Title");
    client.insert_novel(&novel).unwrap();

    novel.rename("Final Title").unwrap();
    client.update_project_novel(&novel).unwrap();

    let reopened = JsonClient::init(dir.path()).unwrap();
    assert_eq!(reopened.list_novels().unwrap()[0].title, "Final Title");
    assert_eq!(reopened.fetch_novel(novel.id()).unwrap().title(), "Final Title");
}
