//! Character operations.

use std::sync::Arc;

use plotlyst_domain::{Character, CharacterId, DomainError, Novel, NovelUpdate};

use crate::infrastructure::ports::CharacterRepo;

use super::{log_update, ManagementError};

pub struct CastManagement {
    characters: Arc<dyn CharacterRepo>,
}

impl CastManagement {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    pub fn add_character(
        &self,
        novel: &mut Novel,
        character: Character,
    ) -> Result<NovelUpdate, ManagementError> {
        if character.name.trim().is_empty() {
            return Err(ManagementError::InvalidInput(
                "Character name cannot be empty".to_string(),
            ));
        }

        let update = novel.add_character(character.clone());
        if update.is_change() {
            self.characters.insert_character(novel, &character)?;
        }
        log_update(novel.id(), &update);
        Ok(update)
    }

    /// Writes the character's current state, keeping its stored avatar.
    pub fn update_character(&self, novel: &Novel, id: CharacterId) -> Result<(), ManagementError> {
        let character = novel
            .character(id)
            .ok_or_else(|| DomainError::not_found("Character", id.to_string()))?;
        self.characters.update_character(novel.id(), character, false)?;
        Ok(())
    }

    /// Replaces the avatar, or removes it with `None`.
    pub fn set_avatar(
        &self,
        novel: &mut Novel,
        id: CharacterId,
        avatar: Option<Vec<u8>>,
    ) -> Result<(), ManagementError> {
        let novel_id = novel.id();
        let character = novel
            .character_mut(id)
            .ok_or_else(|| DomainError::not_found("Character", id.to_string()))?;
        if avatar.is_some() {
            character.prefs.avatar.allow_image();
        }
        character.avatar = avatar;
        self.characters.update_character(novel_id, character, true)?;
        tracing::info!(%novel_id, character_id = %id, "Avatar updated");
        Ok(())
    }

    pub fn remove_character(
        &self,
        novel: &mut Novel,
        id: CharacterId,
    ) -> Result<NovelUpdate, ManagementError> {
        let update = novel.remove_character(id)?;
        if let NovelUpdate::CharacterRemoved { character } = &update {
            self.characters.delete_character(novel, character)?;
        }
        log_update(novel.id(), &update);
        Ok(update)
    }
}
