//! Scene stages - the drafting pipeline a scene moves through

use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black};
use crate::ids::StageId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneStage {
    pub text: String,
    pub id: StageId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
}

impl SceneStage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: StageId::new(),
            icon: String::new(),
            icon_color: default_icon_color(),
        }
    }
}

/// The stage list a fresh novel starts with.
///
/// Ids are generated per call; a novel keeps its own stage ids once written.
pub fn default_stages() -> Vec<SceneStage> {
    [
        "Outlined",
        "1st Draft",
        "2nd Draft",
        "3rd Draft",
        "4th Draft",
        "Edited",
        "Proofread",
        "Final",
    ]
    .into_iter()
    .map(SceneStage::new)
    .collect()
}
