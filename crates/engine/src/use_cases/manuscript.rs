//! Document, diagram and image bodies.
//!
//! Bodies are loaded on demand. Saving writes only the body file; the
//! document's metadata is written with its owner.

use std::sync::Arc;

use plotlyst_domain::{Diagram, Document, ImageRef, Novel, NovelId};

use crate::infrastructure::ports::{DocumentRepo, ImageRepo, RepoError};

pub struct Manuscript {
    documents: Arc<dyn DocumentRepo>,
    images: Arc<dyn ImageRepo>,
}

impl Manuscript {
    pub fn new(documents: Arc<dyn DocumentRepo>, images: Arc<dyn ImageRepo>) -> Self {
        Self { documents, images }
    }

    pub fn load_document(&self, novel_id: NovelId, document: &mut Document) -> Result<(), RepoError> {
        self.documents.load_document(novel_id, document)
    }

    pub fn save_document(&self, novel_id: NovelId, document: &Document) -> Result<(), RepoError> {
        self.documents.update_document(novel_id, document)?;
        tracing::debug!(%novel_id, document_id = %document.id, "Saved document");
        Ok(())
    }

    pub fn delete_document(&self, novel_id: NovelId, document: &Document) -> Result<(), RepoError> {
        self.documents.delete_document(novel_id, document)
    }

    /// Loads the prose of every scene.
    pub fn load_manuscript(&self, novel: &mut Novel) -> Result<(), RepoError> {
        let novel_id = novel.id();
        for manuscript in novel.manuscripts_mut() {
            self.documents.load_document(novel_id, manuscript)?;
        }
        tracing::info!(novel_id = %novel.id(), scenes = novel.scenes().len(), "Loaded manuscript");
        Ok(())
    }

    pub fn load_diagram(&self, novel_id: NovelId, diagram: &mut Diagram) -> Result<(), RepoError> {
        self.documents.load_diagram(novel_id, diagram)
    }

    pub fn save_diagram(&self, novel_id: NovelId, diagram: &Diagram) -> Result<(), RepoError> {
        self.documents.update_diagram(novel_id, diagram)
    }

    pub fn load_image(
        &self,
        novel_id: NovelId,
        image: &ImageRef,
    ) -> Result<Option<Vec<u8>>, RepoError> {
        self.images.load_image(novel_id, image)
    }

    /// Stores an image for the novel under a new reference.
    pub fn add_image(
        &self,
        novel_id: NovelId,
        extension: &str,
        bytes: &[u8],
    ) -> Result<ImageRef, RepoError> {
        let image = ImageRef::new(extension);
        self.images.save_image(novel_id, &image, bytes)?;
        Ok(image)
    }
}
