//! JSON workspace client.
//!
//! # Write order
//!
//! Inserting an entity writes its own file before the aggregate record, so
//! the record never lists an id whose file was not written. Deleting writes
//! the record first and removes files afterwards; a crash in between leaves
//! orphan files that nothing refers to.

use std::path::{Path, PathBuf};

use plotlyst_domain::entities::{Character, ImageRef, NovelDescriptor, Scene};
use plotlyst_domain::{CharacterId, Diagram, Document, ImageId, Novel, NovelId, SceneId};

use super::document_loader::DocumentLoader;
use super::entity_store::EntityStore;
use super::image_store::ImageStore;
use super::layout::WorkspaceLayout;
use super::novel_store::NovelStore;
use super::project_store::ProjectStore;
use super::records::LATEST_VERSION;
use super::resolver;
use crate::infrastructure::ports::{
    CharacterRepo, DocumentRepo, ImageRepo, NovelRepo, ProjectRepo, RepoError, SceneRepo,
};

/// File-backed implementation of every repository port.
pub struct JsonClient {
    layout: WorkspaceLayout,
    project: ProjectStore,
    novels: NovelStore,
    entities: EntityStore,
    documents: DocumentLoader,
    images: ImageStore,
}

impl JsonClient {
    /// Opens the workspace at `workspace`, creating it if needed.
    pub fn init(workspace: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let layout = WorkspaceLayout::new(workspace);
        let project = ProjectStore::init(layout.clone())?;
        tracing::info!(workspace = %layout.root().display(), "Workspace opened");

        Ok(Self {
            novels: NovelStore::new(layout.clone()),
            entities: EntityStore::new(layout.clone()),
            documents: DocumentLoader::new(layout.clone()),
            images: ImageStore::new(layout.clone()),
            project,
            layout,
        })
    }

    pub fn workspace(&self) -> &Path {
        self.layout.root()
    }

    fn load_characters(
        &self,
        novel_id: NovelId,
        ids: &[CharacterId],
    ) -> Result<Vec<Character>, RepoError> {
        let mut characters = Vec::with_capacity(ids.len());
        for &id in ids {
            let Some(record) = self.entities.read_character(novel_id, id)? else {
                tracing::warn!(%novel_id, character_id = %id, "Skipping missing character file");
                continue;
            };
            let mut character = record.character;
            if let Some(avatar_id) = record.avatar_id {
                character.avatar = self.images.load_avatar(avatar_id)?;
            }
            characters.push(character);
        }
        Ok(characters)
    }

    fn load_scenes(&self, novel_id: NovelId, ids: &[SceneId]) -> Result<Vec<Scene>, RepoError> {
        let mut scenes = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.entities.read_scene(novel_id, id)? {
                Some(scene) => scenes.push(scene),
                None => {
                    tracing::warn!(%novel_id, scene_id = %id, "Skipping missing scene file");
                }
            }
        }
        Ok(scenes)
    }

    /// Avatar ids of the novel's characters. Unreadable files are skipped.
    fn avatar_ids(&self, novel_id: NovelId) -> Vec<ImageId> {
        let record = match self.novels.read_record(novel_id) {
            Ok(record) => record,
            Err(e) => {
                if !e.is_not_found() {
                    tracing::warn!(
                        %novel_id,
                        error = %e,
                        "Unreadable novel record, skipping avatars"
                    );
                }
                return Vec::new();
            }
        };
        record
            .characters
            .into_iter()
            .filter_map(
                |character_id| match self.entities.stored_avatar_id(novel_id, character_id) {
                    Ok(avatar_id) => avatar_id,
                    Err(e) => {
                        tracing::warn!(
                            %novel_id,
                            %character_id,
                            error = %e,
                            "Unreadable character file, skipping avatar"
                        );
                        None
                    }
                },
            )
            .collect()
    }

    fn delete_owned_documents<'a>(
        &self,
        novel_id: NovelId,
        documents: impl Iterator<Item = &'a Document>,
    ) -> Result<(), RepoError> {
        for document in documents {
            self.documents.delete_document(novel_id, document)?;
        }
        Ok(())
    }
}

impl ProjectRepo for JsonClient {
    fn list_novels(&self) -> Result<Vec<NovelDescriptor>, RepoError> {
        self.project.list()
    }

    fn has_novel(&self, id: NovelId) -> Result<bool, RepoError> {
        self.project.contains(id)
    }

    /// Also writes the files of any characters and scenes the novel already holds.
    fn insert_novel(&self, novel: &Novel) -> Result<(), RepoError> {
        let novel_id = novel.id();
        self.project.insert(novel.descriptor())?;
        self.novels.create_novel_dir(novel_id)?;
        for character in novel.characters() {
            self.update_character(novel_id, character, true)?;
        }
        for scene in novel.scenes() {
            self.entities.write_scene(novel_id, scene)?;
        }
        self.novels.write_novel(novel)?;
        self.novels.write_world(novel_id, novel.world())?;

        tracing::info!(%novel_id, title = %novel.title(), "Inserted novel");
        Ok(())
    }

    fn update_project_novel(&self, novel: &Novel) -> Result<(), RepoError> {
        self.project.update(novel.descriptor())
    }

    fn delete_novel(&self, id: NovelId) -> Result<(), RepoError> {
        // Avatars live outside the novel directory
        let avatars = self.avatar_ids(id);
        let descriptor = self.project.remove(id)?;
        self.novels.delete_novel_files(id)?;
        for avatar_id in avatars {
            if let Err(e) = self.images.delete_avatar(avatar_id) {
                tracing::warn!(novel_id = %id, %avatar_id, error = %e, "Could not delete avatar");
            }
        }

        tracing::info!(novel_id = %id, title = %descriptor.title, "Deleted novel");
        Ok(())
    }
}

impl NovelRepo for JsonClient {
    fn fetch_novel(&self, id: NovelId) -> Result<Novel, RepoError> {
        let descriptor = self.project.descriptor(id)?;
        let mut record = self.novels.read_record(id)?;
        if record.version != LATEST_VERSION {
            tracing::debug!(novel_id = %id, from = record.version, "Upgrading record version");
            record.version = LATEST_VERSION;
        }
        self.novels.write_record(&record)?;

        let characters = self.load_characters(id, &record.characters)?;
        let scenes = self.load_scenes(id, &record.scenes)?;
        let world = self.novels.read_world(id)?;
        let board = self.novels.read_board(id)?;

        let novel = resolver::assemble(descriptor, record, characters, scenes, world, board);
        tracing::info!(
            novel_id = %id,
            characters = novel.characters().len(),
            scenes = novel.scenes().len(),
            "Fetched novel"
        );
        Ok(novel)
    }

    fn update_novel(&self, novel: &Novel) -> Result<(), RepoError> {
        self.novels.write_novel(novel)
    }

    fn update_world(&self, novel: &Novel) -> Result<(), RepoError> {
        self.novels.write_world(novel.id(), novel.world())
    }
}

impl CharacterRepo for JsonClient {
    fn insert_character(&self, novel: &Novel, character: &Character) -> Result<(), RepoError> {
        self.update_character(novel.id(), character, true)?;
        self.novels.write_novel(novel)?;
        tracing::info!(novel_id = %novel.id(), character_id = %character.id, "Inserted character");
        Ok(())
    }

    fn update_character(
        &self,
        novel_id: NovelId,
        character: &Character,
        update_avatar: bool,
    ) -> Result<(), RepoError> {
        let stored = self.entities.stored_avatar_id(novel_id, character.id)?;
        if !update_avatar {
            return self.entities.write_character(novel_id, character, stored);
        }

        let avatar_id = character
            .avatar
            .as_deref()
            .map(|bytes| self.images.save_avatar(bytes))
            .transpose()?;
        self.entities.write_character(novel_id, character, avatar_id)?;
        if let Some(old) = stored {
            self.images.delete_avatar(old)?;
        }
        Ok(())
    }

    fn delete_character(&self, novel: &Novel, character: &Character) -> Result<(), RepoError> {
        let novel_id = novel.id();
        self.novels.write_novel(novel)?;

        let avatar_id = self.entities.stored_avatar_id(novel_id, character.id)?;
        self.entities.delete_character(novel_id, character.id)?;
        self.delete_owned_documents(novel_id, character.owned_documents())?;
        if let Some(avatar_id) = avatar_id {
            self.images.delete_avatar(avatar_id)?;
        }

        tracing::info!(%novel_id, character_id = %character.id, "Deleted character");
        Ok(())
    }
}

impl SceneRepo for JsonClient {
    fn insert_scene(&self, novel: &Novel, scene: &Scene) -> Result<(), RepoError> {
        self.entities.write_scene(novel.id(), scene)?;
        self.novels.write_novel(novel)?;
        tracing::info!(novel_id = %novel.id(), scene_id = %scene.id, "Inserted scene");
        Ok(())
    }

    fn update_scene(&self, novel_id: NovelId, scene: &Scene) -> Result<(), RepoError> {
        self.entities.write_scene(novel_id, scene)
    }

    fn delete_scene(&self, novel: &Novel, scene: &Scene) -> Result<(), RepoError> {
        let novel_id = novel.id();
        self.novels.write_novel(novel)?;
        self.entities.delete_scene(novel_id, scene.id)?;
        self.delete_owned_documents(novel_id, scene.owned_documents())?;

        tracing::info!(%novel_id, scene_id = %scene.id, "Deleted scene");
        Ok(())
    }
}

impl DocumentRepo for JsonClient {
    fn load_document(&self, novel_id: NovelId, document: &mut Document) -> Result<(), RepoError> {
        self.documents.load_document(novel_id, document)
    }

    fn update_document(&self, novel_id: NovelId, document: &Document) -> Result<(), RepoError> {
        self.documents.update_document(novel_id, document)
    }

    fn delete_document(&self, novel_id: NovelId, document: &Document) -> Result<(), RepoError> {
        self.documents.delete_document(novel_id, document)
    }

    fn load_diagram(&self, novel_id: NovelId, diagram: &mut Diagram) -> Result<(), RepoError> {
        self.documents.load_diagram(novel_id, diagram)
    }

    fn update_diagram(&self, novel_id: NovelId, diagram: &Diagram) -> Result<(), RepoError> {
        self.documents.update_diagram(novel_id, diagram)
    }
}

impl ImageRepo for JsonClient {
    fn load_image(&self, novel_id: NovelId, image: &ImageRef) -> Result<Option<Vec<u8>>, RepoError> {
        self.images.load_novel_image(novel_id, image)
    }

    fn save_image(&self, novel_id: NovelId, image: &ImageRef, bytes: &[u8]) -> Result<(), RepoError> {
        self.images.save_novel_image(novel_id, image, bytes)
    }
}
