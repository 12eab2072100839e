//! Workspace directory layout
//!
//! ```text
//! <root>/project.plotlyst
//! <root>/images/<uuid>.jpeg
//! <root>/novels/<novel-id>.json
//! <root>/novels/<novel-id>/characters/<id>.json
//! <root>/novels/<novel-id>/scenes/<id>.json
//! <root>/novels/<novel-id>/docs/<novel-id>/<doc-id>.html | <data-id>.json
//! <root>/novels/<novel-id>/diagrams/<id>.json
//! <root>/novels/<novel-id>/images/<id>.<ext>
//! <root>/novels/<novel-id>/world.json
//! <root>/novels/<novel-id>/board.json
//! ```

use std::path::{Path, PathBuf};

use plotlyst_domain::entities::ImageRef;
use plotlyst_domain::{
    CharacterId, DiagramId, DocumentDataId, DocumentId, ImageId, NovelId, SceneId,
};

pub const PROJECT_FILE: &str = "project.plotlyst";

#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_file(&self) -> PathBuf {
        self.root.join(PROJECT_FILE)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn avatar_file(&self, id: ImageId) -> PathBuf {
        self.images_dir().join(format!("{id}.jpeg"))
    }

    pub fn novels_dir(&self) -> PathBuf {
        self.root.join("novels")
    }

    pub fn novel_file(&self, novel: NovelId) -> PathBuf {
        self.novels_dir().join(format!("{novel}.json"))
    }

    pub fn novel_dir(&self, novel: NovelId) -> PathBuf {
        self.novels_dir().join(novel.to_string())
    }

    pub fn world_file(&self, novel: NovelId) -> PathBuf {
        self.novel_dir(novel).join("world.json")
    }

    pub fn board_file(&self, novel: NovelId) -> PathBuf {
        self.novel_dir(novel).join("board.json")
    }

    pub fn character_file(&self, novel: NovelId, character: CharacterId) -> PathBuf {
        self.novel_dir(novel)
            .join("characters")
            .join(format!("{character}.json"))
    }

    pub fn scene_file(&self, novel: NovelId, scene: SceneId) -> PathBuf {
        self.novel_dir(novel)
            .join("scenes")
            .join(format!("{scene}.json"))
    }

    /// Document bodies are nested one more level under the novel id.
    pub fn docs_dir(&self, novel: NovelId) -> PathBuf {
        self.novel_dir(novel).join("docs").join(novel.to_string())
    }

    pub fn html_file(&self, novel: NovelId, document: DocumentId) -> PathBuf {
        self.docs_dir(novel).join(format!("{document}.html"))
    }

    pub fn data_file(&self, novel: NovelId, data: DocumentDataId) -> PathBuf {
        self.docs_dir(novel).join(format!("{data}.json"))
    }

    pub fn diagram_file(&self, novel: NovelId, diagram: DiagramId) -> PathBuf {
        self.novel_dir(novel)
            .join("diagrams")
            .join(format!("{diagram}.json"))
    }

    pub fn novel_image_file(&self, novel: NovelId, image: &ImageRef) -> PathBuf {
        self.novel_dir(novel).join("images").join(image.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_are_nested_under_novel_id_twice() {
        let layout = WorkspaceLayout::new("/w");
        let novel = NovelId::new();
        let doc = DocumentId::new();

        assert_eq!(
            layout.html_file(novel, doc),
            PathBuf::from(format!("/w/novels/{novel}/docs/{novel}/{doc}.html"))
        );
    }

    #[test]
    fn avatars_live_at_project_level() {
        let layout = WorkspaceLayout::new("/w");
        let image = ImageId::new();
        assert_eq!(
            layout.avatar_file(image),
            PathBuf::from(format!("/w/images/{image}.jpeg"))
        );
    }
}
