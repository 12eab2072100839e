//! Image blobs
//!
//! Bytes are stored exactly as given. Avatars sit at project level and are
//! keyed by a fresh id on every change; novel images sit under the novel
//! directory and are keyed by their [`ImageRef`].

use plotlyst_domain::entities::ImageRef;
use plotlyst_domain::{ImageId, NovelId};

use super::files;
use super::layout::WorkspaceLayout;
use crate::infrastructure::ports::RepoError;

#[derive(Debug, Clone)]
pub struct ImageStore {
    layout: WorkspaceLayout,
}

impl ImageStore {
    pub fn new(layout: WorkspaceLayout) -> Self {
        Self { layout }
    }

    pub fn load_avatar(&self, id: ImageId) -> Result<Option<Vec<u8>>, RepoError> {
        files::read_bytes(&self.layout.avatar_file(id))
    }

    /// Writes the bytes under a new id and returns it.
    pub fn save_avatar(&self, bytes: &[u8]) -> Result<ImageId, RepoError> {
        let id = ImageId::new();
        files::write_atomic(&self.layout.avatar_file(id), bytes)?;
        Ok(id)
    }

    pub fn delete_avatar(&self, id: ImageId) -> Result<bool, RepoError> {
        files::remove_file(&self.layout.avatar_file(id))
    }

    pub fn load_novel_image(
        &self,
        novel_id: NovelId,
        image: &ImageRef,
    ) -> Result<Option<Vec<u8>>, RepoError> {
        files::read_bytes(&self.layout.novel_image_file(novel_id, image))
    }

    pub fn save_novel_image(
        &self,
        novel_id: NovelId,
        image: &ImageRef,
        bytes: &[u8],
    ) -> Result<(), RepoError> {
        files::write_atomic(&self.layout.novel_image_file(novel_id, image), bytes)
    }
}
