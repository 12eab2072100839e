//! World building - entity tree and glossary kept in `world.json`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black};
use crate::ids::WorldEntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldBuildingEntity {
    pub name: String,
    pub id: WorldEntityId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub emoji: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WorldBuildingEntity>,
}

impl WorldBuildingEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: WorldEntityId::new(),
            icon: String::new(),
            icon_color: default_icon_color(),
            emoji: String::new(),
            summary: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: WorldBuildingEntity) -> Self {
        self.children.push(child);
        self
    }

    fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    /// Depth-first lookup through the subtree rooted at this entity.
    pub fn find(&self, id: WorldEntityId) -> Option<&WorldBuildingEntity> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryItem {
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldBuilding {
    #[serde(default = "default_root_entity")]
    pub root_entity: WorldBuildingEntity,
    /// Keyed by the glossary term
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub glossary: BTreeMap<String, GlossaryItem>,
}

fn default_root_entity() -> WorldBuildingEntity {
    WorldBuildingEntity::new("My world").with_icon("mdi.globe-model")
}

impl Default for WorldBuilding {
    fn default() -> Self {
        Self {
            root_entity: default_root_entity(),
            glossary: BTreeMap::new(),
        }
    }
}
