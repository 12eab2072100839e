//! Scene and chapter operations.

use std::sync::Arc;

use plotlyst_domain::{Chapter, ChapterId, DomainError, Novel, NovelUpdate, Scene, SceneId};

use crate::infrastructure::ports::{NovelRepo, SceneRepo};

use super::{log_update, ManagementError};

pub struct SceneManagement {
    scenes: Arc<dyn SceneRepo>,
    novels: Arc<dyn NovelRepo>,
}

impl SceneManagement {
    pub fn new(scenes: Arc<dyn SceneRepo>, novels: Arc<dyn NovelRepo>) -> Self {
        Self { scenes, novels }
    }

    /// Appends the scene, or inserts it right after `after` (taking over that
    /// scene's day and chapter).
    pub fn add_scene(
        &self,
        novel: &mut Novel,
        scene: Scene,
        after: Option<SceneId>,
    ) -> Result<NovelUpdate, ManagementError> {
        let scene_id = scene.id;
        let update = match after {
            Some(after) => novel.insert_scene_after(after, scene)?,
            None => novel.add_scene(scene),
        };
        if update.is_change() {
            let scene = novel
                .scene(scene_id)
                .ok_or_else(|| DomainError::not_found("Scene", scene_id.to_string()))?;
            self.scenes.insert_scene(novel, scene)?;
        }
        log_update(novel.id(), &update);
        Ok(update)
    }

    pub fn update_scene(&self, novel: &Novel, id: SceneId) -> Result<(), ManagementError> {
        let scene = novel
            .scene(id)
            .ok_or_else(|| DomainError::not_found("Scene", id.to_string()))?;
        self.scenes.update_scene(novel.id(), scene)?;
        Ok(())
    }

    pub fn remove_scene(
        &self,
        novel: &mut Novel,
        id: SceneId,
    ) -> Result<NovelUpdate, ManagementError> {
        let update = novel.remove_scene(id)?;
        if let NovelUpdate::SceneRemoved { scene } = &update {
            self.scenes.delete_scene(novel, scene)?;
        }
        log_update(novel.id(), &update);
        Ok(update)
    }

    pub fn add_chapter(
        &self,
        novel: &mut Novel,
        chapter: Chapter,
    ) -> Result<NovelUpdate, ManagementError> {
        let update = novel.add_chapter(chapter);
        if update.is_change() {
            self.novels.update_novel(novel)?;
        }
        log_update(novel.id(), &update);
        Ok(update)
    }

    /// Moves a scene into a chapter (or out of any with `None`). Only the
    /// scene file changes.
    pub fn assign_chapter(
        &self,
        novel: &mut Novel,
        scene_id: SceneId,
        chapter: Option<ChapterId>,
    ) -> Result<NovelUpdate, ManagementError> {
        let update = novel.assign_chapter(scene_id, chapter)?;
        self.update_scene(novel, scene_id)?;
        log_update(novel.id(), &update);
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockNovelRepo, MockSceneRepo};

    fn management(scenes: MockSceneRepo, novels: MockNovelRepo) -> SceneManagement {
        SceneManagement::new(Arc::new(scenes), Arc::new(novels))
    }

    #[test]
    fn inserted_scene_inherits_day_and_chapter() {
        let mut novel = Novel::new("Ordered");
        let chapter = Chapter::new("One");
        let chapter_id = chapter.id;
        novel.add_chapter(chapter);
        let mut first = Scene::new("First");
        first.day = 3;
        first.chapter = Some(chapter_id);
        let first_id = first.id;
        novel.add_scene(first);
        novel.add_scene(Scene::new("Last"));

        let mut scenes = MockSceneRepo::new();
        scenes
            .expect_insert_scene()
            .withf(move |_, scene| scene.day == 3 && scene.chapter == Some(chapter_id))
            .times(1)
            .returning(|_, _| Ok(()));

        let second = Scene::new("Second");
        let second_id = second.id;
        let update = management(scenes, MockNovelRepo::new())
            .add_scene(&mut novel, second, Some(first_id))
            .unwrap();

        assert_eq!(
            update,
            NovelUpdate::SceneAdded {
                scene_id: second_id,
                position: 1
            }
        );
        assert_eq!(novel.scenes()[1].id, second_id);
    }

    #[test]
    fn assign_chapter_rewrites_only_the_scene() {
        let mut novel = Novel::new("Chapters");
        let chapter = Chapter::new("Two");
        let chapter_id = chapter.id;
        novel.add_chapter(chapter);
        let scene = Scene::new("Moved");
        let scene_id = scene.id;
        novel.add_scene(scene);
        let novel_id = novel.id();

        let mut scenes = MockSceneRepo::new();
        scenes
            .expect_update_scene()
            .withf(move |id, scene| *id == novel_id && scene.chapter == Some(chapter_id))
            .times(1)
            .returning(|_, _| Ok(()));

        management(scenes, MockNovelRepo::new())
            .assign_chapter(&mut novel, scene_id, Some(chapter_id))
            .unwrap();

        assert_eq!(novel.scenes_in_chapter(chapter_id).count(), 1);
    }

    #[test]
    fn assign_to_unknown_chapter_fails_without_writing() {
        let mut novel = Novel::new("Chapters");
        let scene = Scene::new("Stays");
        let scene_id = scene.id;
        novel.add_scene(scene);

        let result = management(MockSceneRepo::new(), MockNovelRepo::new()).assign_chapter(
            &mut novel,
            scene_id,
            Some(ChapterId::new()),
        );

        assert!(matches!(result, Err(ManagementError::Domain(_))));
        assert!(novel.scenes()[0].chapter.is_none());
    }

    #[test]
    fn remove_scene_deletes_its_files() {
        let mut novel = Novel::new("Cut");
        let scene = Scene::new("Gone");
        let scene_id = scene.id;
        novel.add_scene(scene);

        let mut scenes = MockSceneRepo::new();
        scenes
            .expect_delete_scene()
            .withf(move |novel, scene| scene.id == scene_id && novel.scenes().is_empty())
            .times(1)
            .returning(|_, _| Ok(()));

        let update = management(scenes, MockNovelRepo::new())
            .remove_scene(&mut novel, scene_id)
            .unwrap();

        assert!(matches!(update, NovelUpdate::SceneRemoved { .. }));
    }

    #[test]
    fn add_chapter_rewrites_the_record() {
        let mut novel = Novel::new("Chapters");
        let mut novels = MockNovelRepo::new();
        novels
            .expect_update_novel()
            .withf(|novel| novel.custom_chapters() == 1)
            .times(1)
            .returning(|_| Ok(()));

        management(MockSceneRepo::new(), novels)
            .add_chapter(&mut novel, Chapter::new("Interlude"))
            .unwrap();
    }

    #[test]
    fn re_adding_a_chapter_skips_the_write() {
        let mut novel = Novel::new("Chapters");
        let chapter = Chapter::new("Interlude");
        let chapter_id = chapter.id;
        novel.add_chapter(chapter.clone());

        let update = management(MockSceneRepo::new(), MockNovelRepo::new())
            .add_chapter(&mut novel, chapter)
            .unwrap();

        assert_eq!(update, NovelUpdate::ChapterAlreadyPresent { chapter_id });
    }
}
