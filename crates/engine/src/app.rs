//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    config::AppConfig,
    json_store::JsonClient,
    ports::{
        CharacterRepo, ClockPort, DocumentRepo, ImageRepo, NovelRepo, ProjectRepo, RepoError,
        SceneRepo,
    },
};
use crate::use_cases;

/// Main application state.
///
/// Holds the repository ports and the use cases built on them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Repository ports, all backed by the same workspace store.
pub struct Repositories {
    pub project: Arc<dyn ProjectRepo>,
    pub novel: Arc<dyn NovelRepo>,
    pub character: Arc<dyn CharacterRepo>,
    pub scene: Arc<dyn SceneRepo>,
    pub document: Arc<dyn DocumentRepo>,
    pub image: Arc<dyn ImageRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub management: use_cases::ManagementUseCases,
    pub manuscript: use_cases::Manuscript,
}

impl App {
    /// Opens the configured workspace, creating its layout if needed.
    pub fn open(config: &AppConfig) -> Result<Self, RepoError> {
        let client = Arc::new(JsonClient::init(&config.workspace)?);
        Ok(Self::new(client, Arc::new(SystemClock::new())))
    }

    /// Wires every port to the given store.
    pub fn new(client: Arc<JsonClient>, clock: Arc<dyn ClockPort>) -> Self {
        let repositories = Repositories {
            project: client.clone(),
            novel: client.clone(),
            character: client.clone(),
            scene: client.clone(),
            document: client.clone(),
            image: client,
        };

        let management = use_cases::ManagementUseCases::new(
            use_cases::NovelManagement::new(
                repositories.project.clone(),
                repositories.novel.clone(),
                clock,
            ),
            use_cases::CastManagement::new(repositories.character.clone()),
            use_cases::SceneManagement::new(
                repositories.scene.clone(),
                repositories.novel.clone(),
            ),
        );
        let manuscript =
            use_cases::Manuscript::new(repositories.document.clone(), repositories.image.clone());

        Self {
            repositories,
            use_cases: UseCases {
                management,
                manuscript,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn created_novel_is_listed_and_opens() {
        let dir = tempdir().unwrap();
        let app = App::open(&AppConfig::with_workspace(dir.path())).unwrap();
        let management = &app.use_cases.management;

        let novel = management.novel.create_novel("My First Novel").unwrap();
        let listed = management.novel.list_novels().unwrap();
        let opened = management.novel.open_novel(novel.id()).unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, novel.id());
        assert_eq!(opened.title(), "My First Novel");
    }

    #[test]
    fn reopening_the_workspace_sees_existing_novels() {
        let dir = tempdir().unwrap();
        let config = AppConfig::with_workspace(dir.path());
        let id = App::open(&config)
            .unwrap()
            .use_cases
            .management
            .novel
            .create_novel("Persisted")
            .unwrap()
            .id();

        let reopened = App::open(&config).unwrap();

        assert!(reopened.repositories.project.has_novel(id).unwrap());
    }
}
