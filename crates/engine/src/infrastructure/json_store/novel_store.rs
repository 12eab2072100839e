//! Aggregate record and novel side files
//!
//! The aggregate record holds a novel's structure with relations stored as
//! ids. World building and the task board live in their own files under the
//! novel directory.

use plotlyst_domain::entities::{Board, WorldBuilding};
use plotlyst_domain::{Novel, NovelId};

use super::files;
use super::layout::WorkspaceLayout;
use super::records::NovelRecord;
use crate::infrastructure::ports::RepoError;

#[derive(Debug, Clone)]
pub struct NovelStore {
    layout: WorkspaceLayout,
}

impl NovelStore {
    pub fn new(layout: WorkspaceLayout) -> Self {
        Self { layout }
    }

    /// Reads the aggregate record. A missing file is a not-found error.
    pub fn read_record(&self, id: NovelId) -> Result<NovelRecord, RepoError> {
        files::read_json(&self.layout.novel_file(id))?
            .ok_or_else(|| RepoError::not_found("Novel", id))
    }

    pub fn write_record(&self, record: &NovelRecord) -> Result<(), RepoError> {
        files::write_json(&self.layout.novel_file(record.id), record)
    }

    /// Writes the aggregate record and the task board.
    pub fn write_novel(&self, novel: &Novel) -> Result<(), RepoError> {
        self.write_record(&NovelRecord::from_novel(novel))?;
        self.write_board(novel.id(), novel.board())
    }

    pub fn read_world(&self, id: NovelId) -> Result<Option<WorldBuilding>, RepoError> {
        files::read_json(&self.layout.world_file(id))
    }

    pub fn write_world(&self, id: NovelId, world: &WorldBuilding) -> Result<(), RepoError> {
        files::write_json(&self.layout.world_file(id), world)
    }

    pub fn read_board(&self, id: NovelId) -> Result<Option<Board>, RepoError> {
        files::read_json(&self.layout.board_file(id))
    }

    pub fn write_board(&self, id: NovelId, board: &Board) -> Result<(), RepoError> {
        files::write_json(&self.layout.board_file(id), board)
    }

    pub fn create_novel_dir(&self, id: NovelId) -> Result<(), RepoError> {
        files::ensure_dir(&self.layout.novel_dir(id))
    }

    /// Removes the aggregate record and the whole novel directory.
    pub fn delete_novel_files(&self, id: NovelId) -> Result<(), RepoError> {
        files::remove_file(&self.layout.novel_file(id))?;
        files::remove_dir_all(&self.layout.novel_dir(id))?;
        Ok(())
    }
}
