//! Management use cases for novels, their cast and their scenes.
//!
//! Each operation applies a mutation to the in-memory [`Novel`] and then
//! persists the files it touched through the repository ports.
//!
//! [`Novel`]: plotlyst_domain::Novel

use plotlyst_domain::{DomainError, NovelId, NovelUpdate};

use crate::infrastructure::ports::RepoError;

mod cast;
mod novel;
mod scene;

pub use cast::CastManagement;
pub use novel::NovelManagement;
pub use scene::SceneManagement;

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub novel: NovelManagement,
    pub cast: CastManagement,
    pub scene: SceneManagement,
}

impl ManagementUseCases {
    pub fn new(novel: NovelManagement, cast: CastManagement, scene: SceneManagement) -> Self {
        Self { novel, cast, scene }
    }
}

fn log_update(novel_id: NovelId, update: &NovelUpdate) {
    if update.is_change() {
        tracing::info!(%novel_id, update = update.kind(), "Novel updated");
    } else {
        tracing::debug!(%novel_id, update = update.kind(), "Novel unchanged");
    }
}
