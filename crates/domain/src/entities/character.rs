//! Characters
//!
//! A character is stored in its own file. The avatar is kept in memory as raw
//! image bytes; at rest the character record only carries the id of the blob
//! in the project's image directory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black, is_default, is_false};
use crate::entities::{CharacterPlan, Document};
use crate::ids::{CharacterId, TemplateFieldId};

/// Anything that may belong to a single character.
pub trait CharacterBased {
    fn character_id(&self) -> Option<CharacterId>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleImportance {
    Major,
    #[default]
    Secondary,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
    #[serde(default)]
    pub importance: RoleImportance,
    #[serde(default, skip_serializing_if = "is_false")]
    pub can_be_promoted: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub promoted: bool,
}

impl Role {
    fn builtin(text: &str, icon: &str, icon_color: &str, importance: RoleImportance) -> Self {
        Self {
            text: text.to_string(),
            icon: icon.to_string(),
            icon_color: icon_color.to_string(),
            importance,
            can_be_promoted: false,
            promoted: false,
        }
    }

    pub fn protagonist() -> Self {
        Self::builtin("Protagonist", "fa5s.chess-king", "#00798c", RoleImportance::Major)
    }

    pub fn antagonist() -> Self {
        Self::builtin("Antagonist", "mdi.guy-fawkes-mask", "#bc412b", RoleImportance::Major)
    }

    pub fn supporter() -> Self {
        Self::builtin("Supporter", "fa5s.thumbs-up", "#266dd3", RoleImportance::Secondary)
    }

    pub fn secondary() -> Self {
        let mut role = Self::builtin(
            "Secondary",
            "fa5s.chess-knight",
            "#619b8a",
            RoleImportance::Secondary,
        );
        role.can_be_promoted = true;
        role
    }

    pub fn is_major(&self) -> bool {
        self.importance == RoleImportance::Major || self.promoted
    }

    pub fn is_minor(&self) -> bool {
        self.importance == RoleImportance::Minor
    }
}

/// Answer to one profile template field. Values are free-form JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateValue {
    pub id: TemplateFieldId,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackstoryEventType {
    #[default]
    Event,
    #[serde(rename = "birth")]
    Birthday,
    Education,
    Job,
    Love,
    Family,
    Home,
    Friendship,
    Fortune,
    Promotion,
    Award,
    Death,
    Violence,
    Accident,
    Crime,
    Loss,
    Medical,
    Breakup,
    Travel,
}

fn default_backstory_icon() -> String {
    "ri.calendar-event-fill".to_string()
}

fn default_backstory_color() -> String {
    "darkBlue".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackstoryEvent {
    pub keyphrase: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(rename = "type", default)]
    pub event_type: BackstoryEventType,
    #[serde(default = "default_backstory_icon")]
    pub type_icon: String,
    #[serde(default = "default_backstory_color")]
    pub type_color: String,
    /// -5 (traumatic) to 5 (joyful)
    #[serde(default)]
    pub emotion: i8,
    #[serde(default, skip_serializing_if = "is_false")]
    pub follow_up: bool,
}

impl BackstoryEvent {
    pub fn new(keyphrase: impl Into<String>, event_type: BackstoryEventType) -> Self {
        Self {
            keyphrase: keyphrase.into(),
            synopsis: String::new(),
            event_type,
            type_icon: default_backstory_icon(),
            type_color: default_backstory_color(),
            emotion: 0,
            follow_up: false,
        }
    }
}

fn use_image_default() -> bool {
    true
}

/// Which visual stands in for the character. Exactly one option is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarPreferences {
    #[serde(default = "use_image_default")]
    pub use_image: bool,
    #[serde(default)]
    pub use_initial: bool,
    #[serde(default)]
    pub use_role: bool,
    #[serde(default)]
    pub use_custom_icon: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
}

impl AvatarPreferences {
    pub fn allow_image(&mut self) {
        self.allow(true, false, false, false);
    }

    pub fn allow_initial(&mut self) {
        self.allow(false, true, false, false);
    }

    pub fn allow_role(&mut self) {
        self.allow(false, false, true, false);
    }

    pub fn allow_custom_icon(&mut self) {
        self.allow(false, false, false, true);
    }

    fn allow(&mut self, image: bool, initial: bool, role: bool, custom: bool) {
        self.use_image = image;
        self.use_initial = initial;
        self.use_role = role;
        self.use_custom_icon = custom;
    }
}

impl Default for AvatarPreferences {
    fn default() -> Self {
        Self {
            use_image: true,
            use_initial: false,
            use_role: false,
            use_custom_icon: false,
            icon: String::new(),
            icon_color: default_icon_color(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterPreferences {
    #[serde(default)]
    pub avatar: AvatarPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub id: CharacterId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u16>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub age_infinite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub template_values: Vec<TemplateValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub disabled_template_headers: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backstory: Vec<BackstoryEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<CharacterPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub journals: Vec<Document>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub prefs: CharacterPreferences,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traits: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alias: String,
    /// Character this one was derived from, in a parent novel of a series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<CharacterId>,

    /// Raw image bytes; persisted separately in the image directory
    #[serde(skip)]
    pub avatar: Option<Vec<u8>>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: CharacterId::new(),
            gender: String::new(),
            role: None,
            age: None,
            age_infinite: false,
            occupation: None,
            template_values: Vec::new(),
            disabled_template_headers: BTreeMap::new(),
            backstory: Vec::new(),
            plans: Vec::new(),
            document: None,
            journals: Vec::new(),
            prefs: CharacterPreferences::default(),
            summary: String::new(),
            traits: Vec::new(),
            values: Vec::new(),
            alias: String::new(),
            origin_id: None,
            avatar: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_plan(mut self, plan: CharacterPlan) -> Self {
        self.plans.push(plan);
        self
    }

    pub fn is_major(&self) -> bool {
        self.role.as_ref().is_some_and(Role::is_major)
    }

    /// Documents owned by this character: the backstory document and journals.
    pub fn owned_documents(&self) -> impl Iterator<Item = &Document> {
        self.document.iter().chain(self.journals.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_bytes_are_not_serialized() {
        let mut character = Character::new("Jane");
        character.avatar = Some(vec![0xff, 0xd8, 0xff]);

        let json = serde_json::to_string(&character).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert!(back.avatar.is_none());
        assert_eq!(back.name, "Jane");
    }

    #[test]
    fn empty_fields_are_omitted() {
        let json = serde_json::to_value(Character::new("Jane")).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("name"));
        assert!(object.contains_key("id"));
    }

    #[test]
    fn promoted_secondary_counts_as_major() {
        let mut role = Role::secondary();
        assert!(!role.is_major());
        role.promoted = true;
        assert!(Character::new("Tom").with_role(role).is_major());
    }

    #[test]
    fn avatar_preferences_are_exclusive() {
        let mut prefs = AvatarPreferences::default();
        prefs.allow_role();
        assert!(prefs.use_role);
        assert!(!prefs.use_image);
    }
}
