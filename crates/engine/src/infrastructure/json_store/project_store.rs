//! Project manifest store
//!
//! Keeps the parsed `project.plotlyst` in memory and rewrites the whole file
//! after every change.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use plotlyst_domain::entities::NovelDescriptor;
use plotlyst_domain::NovelId;

use super::files;
use super::layout::WorkspaceLayout;
use super::records::ProjectManifest;
use crate::infrastructure::ports::RepoError;

pub struct ProjectStore {
    layout: WorkspaceLayout,
    manifest: RwLock<ProjectManifest>,
}

impl ProjectStore {
    /// Opens the workspace, creating an empty manifest if there is none.
    ///
    /// The manifest is always rewritten in canonical form and the `novels/`
    /// and `images/` directories are created if missing.
    pub fn init(layout: WorkspaceLayout) -> Result<Self, RepoError> {
        files::ensure_dir(layout.root())?;

        let path = layout.project_file();
        let manifest = match files::read_string(&path)? {
            Some(json) if !json.trim().is_empty() => files::decode(&path, &json)?,
            _ => {
                tracing::info!(path = %path.display(), "Creating project manifest");
                ProjectManifest::default()
            }
        };
        files::write_json(&path, &manifest)?;
        files::ensure_dir(&layout.novels_dir())?;
        files::ensure_dir(&layout.images_dir())?;

        tracing::debug!(novels = manifest.novels.len(), "Project manifest loaded");
        Ok(Self {
            layout,
            manifest: RwLock::new(manifest),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ProjectManifest>, RepoError> {
        self.manifest
            .read()
            .map_err(|e| RepoError::storage("read_manifest", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ProjectManifest>, RepoError> {
        self.manifest
            .write()
            .map_err(|e| RepoError::storage("write_manifest", e))
    }

    fn persist(&self, manifest: &ProjectManifest) -> Result<(), RepoError> {
        files::write_json(&self.layout.project_file(), manifest)
    }

    pub fn list(&self) -> Result<Vec<NovelDescriptor>, RepoError> {
        Ok(self.read()?.novels.clone())
    }

    pub fn contains(&self, id: NovelId) -> Result<bool, RepoError> {
        Ok(self.read()?.find(id).is_some())
    }

    pub fn descriptor(&self, id: NovelId) -> Result<NovelDescriptor, RepoError> {
        self.read()?
            .find(id)
            .cloned()
            .ok_or_else(|| RepoError::not_found("Novel", id))
    }

    pub fn insert(&self, descriptor: &NovelDescriptor) -> Result<(), RepoError> {
        let mut manifest = self.write()?;
        if manifest.find(descriptor.id).is_some() {
            return Err(RepoError::constraint(format!(
                "Novel {} is already in the project",
                descriptor.id
            )));
        }
        manifest.novels.push(descriptor.clone());
        self.persist(&manifest)
    }

    pub fn update(&self, descriptor: &NovelDescriptor) -> Result<(), RepoError> {
        let mut manifest = self.write()?;
        let entry = manifest
            .find_mut(descriptor.id)
            .ok_or_else(|| RepoError::not_found("Novel", descriptor.id))?;
        if entry == descriptor {
            return Ok(());
        }
        *entry = descriptor.clone();
        self.persist(&manifest)
    }

    pub fn remove(&self, id: NovelId) -> Result<NovelDescriptor, RepoError> {
        let mut manifest = self.write()?;
        let position = manifest
            .novels
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| RepoError::not_found("Novel", id))?;
        let removed = manifest.novels.remove(position);
        self.persist(&manifest)?;
        Ok(removed)
    }
}
