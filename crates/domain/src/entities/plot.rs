//! Plots - storylines scenes can be attached to

use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black};
use crate::entities::CharacterBased;
use crate::ids::{CharacterId, PlotId, PlotValueId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotType {
    #[default]
    Main,
    Internal,
    Subplot,
}

/// A value at stake in a plot (e.g. "Love" vs. "Hate").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotValue {
    pub text: String,
    pub id: PlotValueId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub negative: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
}

impl PlotValue {
    pub fn new(text: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: PlotValueId::new(),
            negative: negative.into(),
            icon: String::new(),
            icon_color: default_icon_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub text: String,
    pub id: PlotId,
    #[serde(default)]
    pub plot_type: PlotType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<PlotValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub question: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
}

impl Plot {
    pub fn new(text: impl Into<String>, plot_type: PlotType) -> Self {
        Self {
            text: text.into(),
            id: PlotId::new(),
            plot_type,
            values: Vec::new(),
            character_id: None,
            question: String::new(),
            icon: String::new(),
            icon_color: default_icon_color(),
        }
    }

    pub fn with_value(mut self, value: PlotValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn value(&self, id: PlotValueId) -> Option<&PlotValue> {
        self.values.iter().find(|v| v.id == id)
    }
}

impl CharacterBased for Plot {
    fn character_id(&self) -> Option<CharacterId> {
        self.character_id
    }
}
