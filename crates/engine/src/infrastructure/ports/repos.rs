//! Repository port traits for workspace access.
//!
//! Calls are synchronous and run on the caller's thread. Every write replaces
//! whole files; there are no transactions spanning several files.

use plotlyst_domain::entities::{Character, Diagram, Document, ImageRef, NovelDescriptor, Scene};
use plotlyst_domain::{Novel, NovelId};

use super::error::RepoError;

// =============================================================================
// Project manifest
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ProjectRepo: Send + Sync {
    fn list_novels(&self) -> Result<Vec<NovelDescriptor>, RepoError>;
    fn has_novel(&self, id: NovelId) -> Result<bool, RepoError>;

    /// Adds the novel to the manifest and writes its aggregate record.
    fn insert_novel(&self, novel: &Novel) -> Result<(), RepoError>;

    /// Copies the novel's descriptor fields into its manifest entry.
    fn update_project_novel(&self, novel: &Novel) -> Result<(), RepoError>;

    /// Removes the manifest entry, the aggregate record and the novel directory.
    fn delete_novel(&self, id: NovelId) -> Result<(), RepoError>;
}

// =============================================================================
// Novel aggregate
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait NovelRepo: Send + Sync {
    /// Loads a novel with all references resolved. Document bodies stay unloaded.
    fn fetch_novel(&self, id: NovelId) -> Result<Novel, RepoError>;

    /// Rewrites the aggregate record and the task board.
    fn update_novel(&self, novel: &Novel) -> Result<(), RepoError>;

    fn update_world(&self, novel: &Novel) -> Result<(), RepoError>;
}

// =============================================================================
// Per-entity files
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait CharacterRepo: Send + Sync {
    /// Writes the character (with its avatar) and then the aggregate record.
    fn insert_character(&self, novel: &Novel, character: &Character) -> Result<(), RepoError>;

    /// Writes the character. With `update_avatar` the character's current bytes
    /// are saved under a new avatar id, the character file is written, and only
    /// then is the previous avatar deleted. Otherwise the stored one is kept.
    fn update_character(
        &self,
        novel_id: NovelId,
        character: &Character,
        update_avatar: bool,
    ) -> Result<(), RepoError>;

    /// Writes the aggregate record, then removes the character's file,
    /// documents and avatar.
    fn delete_character(&self, novel: &Novel, character: &Character) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait SceneRepo: Send + Sync {
    /// Writes the scene and then the aggregate record.
    fn insert_scene(&self, novel: &Novel, scene: &Scene) -> Result<(), RepoError>;

    fn update_scene(&self, novel_id: NovelId, scene: &Scene) -> Result<(), RepoError>;

    /// Writes the aggregate record, then removes the scene's file and documents.
    fn delete_scene(&self, novel: &Novel, scene: &Scene) -> Result<(), RepoError>;
}

// =============================================================================
// Lazy bodies
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait DocumentRepo: Send + Sync {
    /// Reads the document body unless it is already loaded.
    fn load_document(&self, novel_id: NovelId, document: &mut Document) -> Result<(), RepoError>;

    fn update_document(&self, novel_id: NovelId, document: &Document) -> Result<(), RepoError>;

    /// Removes the document body, its diagram payload and those of its children.
    fn delete_document(&self, novel_id: NovelId, document: &Document) -> Result<(), RepoError>;

    /// Reads the diagram payload unless it is already loaded.
    fn load_diagram(&self, novel_id: NovelId, diagram: &mut Diagram) -> Result<(), RepoError>;

    fn update_diagram(&self, novel_id: NovelId, diagram: &Diagram) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ImageRepo: Send + Sync {
    /// Returns `None` when the image file does not exist.
    fn load_image(&self, novel_id: NovelId, image: &ImageRef) -> Result<Option<Vec<u8>>, RepoError>;

    fn save_image(&self, novel_id: NovelId, image: &ImageRef, bytes: &[u8]) -> Result<(), RepoError>;
}
