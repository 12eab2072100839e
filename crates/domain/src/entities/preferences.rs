//! Per-novel preferences stored in the aggregate record

use serde::{Deserialize, Serialize};

use crate::ids::StageId;

fn grammar_check_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsPreferences {
    #[serde(default = "grammar_check_default")]
    pub grammar_check: bool,
}

impl Default for DocsPreferences {
    fn default() -> Self {
        Self {
            grammar_check: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NovelPanel {
    #[default]
    Outline,
    Manuscript,
    Reports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenesView {
    Novel,
    Characters,
    Scenes,
    Locations,
    Docs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPreferences {
    #[serde(default)]
    pub panel: NovelPanel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenes_view: Option<ScenesView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovelPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_stage_id: Option<StageId>,
    #[serde(default)]
    pub docs: DocsPreferences,
    #[serde(default)]
    pub panels: PanelPreferences,
}
