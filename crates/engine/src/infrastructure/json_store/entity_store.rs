//! Per-entity files for characters and scenes.

use plotlyst_domain::entities::{Character, Scene};
use plotlyst_domain::{CharacterId, ImageId, NovelId, SceneId};

use super::files;
use super::layout::WorkspaceLayout;
use super::records::{CharacterRecord, CharacterRecordRef, StoredAvatar};
use crate::infrastructure::ports::RepoError;

#[derive(Debug, Clone)]
pub struct EntityStore {
    layout: WorkspaceLayout,
}

impl EntityStore {
    pub fn new(layout: WorkspaceLayout) -> Self {
        Self { layout }
    }

    /// Reads a character file. Returns `None` if the file is missing.
    pub fn read_character(
        &self,
        novel_id: NovelId,
        id: CharacterId,
    ) -> Result<Option<CharacterRecord>, RepoError> {
        files::read_json(&self.layout.character_file(novel_id, id))
    }

    pub fn write_character(
        &self,
        novel_id: NovelId,
        character: &Character,
        avatar_id: Option<ImageId>,
    ) -> Result<(), RepoError> {
        let record = CharacterRecordRef {
            character,
            avatar_id,
        };
        files::write_json(&self.layout.character_file(novel_id, character.id), &record)
    }

    pub fn delete_character(&self, novel_id: NovelId, id: CharacterId) -> Result<bool, RepoError> {
        files::remove_file(&self.layout.character_file(novel_id, id))
    }

    /// Avatar id recorded in the character's current file, if any.
    pub fn stored_avatar_id(
        &self,
        novel_id: NovelId,
        id: CharacterId,
    ) -> Result<Option<ImageId>, RepoError> {
        let stored: Option<StoredAvatar> =
            files::read_json(&self.layout.character_file(novel_id, id))?;
        Ok(stored.and_then(|s| s.avatar_id))
    }

    pub fn read_scene(&self, novel_id: NovelId, id: SceneId) -> Result<Option<Scene>, RepoError> {
        files::read_json(&self.layout.scene_file(novel_id, id))
    }

    pub fn write_scene(&self, novel_id: NovelId, scene: &Scene) -> Result<(), RepoError> {
        files::write_json(&self.layout.scene_file(novel_id, scene.id), scene)
    }

    pub fn delete_scene(&self, novel_id: NovelId, id: SceneId) -> Result<bool, RepoError> {
        files::remove_file(&self.layout.scene_file(novel_id, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotlyst_domain::entities::Role;
    use tempfile::tempdir;

    #[test]
    fn character_file_keeps_avatar_id() {
        let dir = tempdir().unwrap();
        let store = EntityStore::new(WorkspaceLayout::new(dir.path()));
        let novel_id = NovelId::new();
        let character = Character::new("Mira").with_role(Role::protagonist());
        let avatar_id = ImageId::new();

        store
            .write_character(novel_id, &character, Some(avatar_id))
            .unwrap();

        let record = store.read_character(novel_id, character.id).unwrap().unwrap();
        assert_eq!(record.character, character);
        assert_eq!(record.avatar_id, Some(avatar_id));
        assert_eq!(
            store.stored_avatar_id(novel_id, character.id).unwrap(),
            Some(avatar_id)
        );
    }

    #[test]
    fn missing_entity_files_read_as_none() {
        let dir = tempdir().unwrap();
        let store = EntityStore::new(WorkspaceLayout::new(dir.path()));
        let novel_id = NovelId::new();

        assert!(store
            .read_character(novel_id, CharacterId::new())
            .unwrap()
            .is_none());
        assert!(store.read_scene(novel_id, SceneId::new()).unwrap().is_none());
        assert!(store
            .stored_avatar_id(novel_id, CharacterId::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn scene_round_trips_and_deletes() {
        let dir = tempdir().unwrap();
        let store = EntityStore::new(WorkspaceLayout::new(dir.path()));
        let novel_id = NovelId::new();
        let scene = Scene::new("Arrival").with_character(CharacterId::new());

        store.write_scene(novel_id, &scene).unwrap();
        assert_eq!(store.read_scene(novel_id, scene.id).unwrap(), Some(scene.clone()));

        assert!(store.delete_scene(novel_id, scene.id).unwrap());
        assert!(!store.delete_scene(novel_id, scene.id).unwrap());
    }
}
