//! Novel lifecycle: create, open, rename, delete.

use std::sync::Arc;

use plotlyst_domain::entities::NovelDescriptor;
use plotlyst_domain::{Novel, NovelId, NovelUpdate};

use crate::infrastructure::ports::{ClockPort, NovelRepo, ProjectRepo};

use super::{log_update, ManagementError};

pub struct NovelManagement {
    project: Arc<dyn ProjectRepo>,
    novels: Arc<dyn NovelRepo>,
    clock: Arc<dyn ClockPort>,
}

impl NovelManagement {
    pub fn new(
        project: Arc<dyn ProjectRepo>,
        novels: Arc<dyn NovelRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            project,
            novels,
            clock,
        }
    }

    pub fn list_novels(&self) -> Result<Vec<NovelDescriptor>, ManagementError> {
        Ok(self.project.list_novels()?)
    }

    /// Creates a novel with the default structure, stages, tags and documents.
    pub fn create_novel(&self, title: &str) -> Result<Novel, ManagementError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ManagementError::InvalidInput(
                "Novel title cannot be empty".to_string(),
            ));
        }

        let novel = Novel::new(title).with_creation_date(self.clock.now());
        self.project.insert_novel(&novel)?;
        tracing::info!(novel_id = %novel.id(), title, "Created novel");
        Ok(novel)
    }

    pub fn open_novel(&self, id: NovelId) -> Result<Novel, ManagementError> {
        Ok(self.novels.fetch_novel(id)?)
    }

    pub fn rename_novel(
        &self,
        novel: &mut Novel,
        title: &str,
    ) -> Result<NovelUpdate, ManagementError> {
        let update = novel.rename(title.trim())?;
        self.project.update_project_novel(novel)?;
        log_update(novel.id(), &update);
        Ok(update)
    }

    pub fn set_premise(
        &self,
        novel: &mut Novel,
        premise: &str,
    ) -> Result<NovelUpdate, ManagementError> {
        let update = novel.set_premise(premise);
        self.novels.update_novel(novel)?;
        log_update(novel.id(), &update);
        Ok(update)
    }

    pub fn save_world(&self, novel: &Novel) -> Result<(), ManagementError> {
        Ok(self.novels.update_world(novel)?)
    }

    pub fn delete_novel(&self, id: NovelId) -> Result<(), ManagementError> {
        self.project.delete_novel(id)?;
        Ok(())
    }
}
