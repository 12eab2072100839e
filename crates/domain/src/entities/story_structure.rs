//! Story structures and their beats

use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black, is_false, is_zero};
use crate::entities::CharacterBased;
use crate::ids::{BeatId, CharacterId, StoryStructureId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryBeatType {
    #[default]
    Beat,
    Container,
}

fn is_beat(value: &StoryBeatType) -> bool {
    *value == StoryBeatType::Beat
}

fn enabled_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryBeat {
    pub text: String,
    pub id: BeatId,
    pub act: u8,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type", default, skip_serializing_if = "is_beat")]
    pub beat_type: StoryBeatType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ends_act: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
    #[serde(default)]
    pub percentage: u8,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub percentage_end: u8,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

impl StoryBeat {
    pub fn new(text: impl Into<String>, act: u8, percentage: u8) -> Self {
        Self {
            text: text.into(),
            id: BeatId::new(),
            act,
            description: String::new(),
            beat_type: StoryBeatType::Beat,
            ends_act: false,
            icon: String::new(),
            icon_color: default_icon_color(),
            percentage,
            percentage_end: 0,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryStructure {
    pub title: String,
    pub id: StoryStructureId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
    #[serde(default)]
    pub beats: Vec<StoryBeat>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub custom: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub active: bool,
    /// Set when the structure follows a single character's arc
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
}

impl StoryStructure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: StoryStructureId::new(),
            icon: String::new(),
            icon_color: default_icon_color(),
            beats: Vec::new(),
            custom: true,
            active: false,
            character_id: None,
        }
    }

    /// Beats that close an act.
    pub fn act_beats(&self) -> impl Iterator<Item = &StoryBeat> {
        self.beats.iter().filter(|b| b.ends_act)
    }

    pub fn beat(&self, id: BeatId) -> Option<&StoryBeat> {
        self.beats.iter().find(|b| b.id == id)
    }
}

impl CharacterBased for StoryStructure {
    fn character_id(&self) -> Option<CharacterId> {
        self.character_id
    }
}

struct BeatDef {
    text: &'static str,
    id: u128,
    icon: &'static str,
    icon_color: &'static str,
    description: &'static str,
    act: u8,
    percentage: u8,
    ends_act: bool,
    enabled: bool,
}

const THREE_ACT_BEATS: &[BeatDef] = &[
    BeatDef {
        text: "Hook",
        id: 0x40365047_e7df_4543_8816_f9f8dcce12da,
        icon: "mdi.hook",
        icon_color: "#829399",
        description: "Raises curiosity and hooks the reader's attention.",
        act: 1,
        percentage: 1,
        ends_act: false,
        enabled: true,
    },
    BeatDef {
        text: "Inciting Incident",
        id: 0xa0c2d94a_b53c_485e_a279_f2548bdb38ec,
        icon: "mdi.bell-alert-outline",
        icon_color: "#a2ad59",
        description: "The first event that truly changes the protagonist's status quo.",
        act: 1,
        percentage: 10,
        ends_act: false,
        enabled: true,
    },
    BeatDef {
        text: "First Plot Point",
        id: 0x8d85c960_1c63_44d4_812d_545d3ba4d153,
        icon: "mdi.dice-1",
        icon_color: "#2a4494",
        description: "First 'Point of No Return' beat. It propels the protagonist into the central conflict.",
        act: 1,
        percentage: 20,
        ends_act: true,
        enabled: true,
    },
    BeatDef {
        text: "First Pinch Point",
        id: 0xaf024374_12e6_44dc_80e6_28f2bc0e59ed,
        icon: "fa5s.thermometer-three-quarters",
        icon_color: "#b81365",
        description: "A reminder of the power of antagonistic forces.",
        act: 2,
        percentage: 35,
        ends_act: false,
        enabled: true,
    },
    BeatDef {
        text: "Midpoint",
        id: 0x3f817e10_85d1_46af_91c6_70f1ad5c0542,
        icon: "mdi.middleware-outline",
        icon_color: "#2e86ab",
        description: "Another Point of No Return beat that raises the stakes.",
        act: 2,
        percentage: 50,
        ends_act: false,
        enabled: true,
    },
    BeatDef {
        text: "Second Pinch Point",
        id: 0x74087e28_b37a_4797_95bc_41d96f6a9393,
        icon: "fa5s.biohazard",
        icon_color: "#cd533b",
        description: "A showcase of the full strength of antagonistic forces.",
        act: 2,
        percentage: 62,
        ends_act: false,
        enabled: true,
    },
    BeatDef {
        text: "Dark Moment",
        id: 0x4ded5006_c90a_4825_9de7_e16bf62017a3,
        icon: "mdi.weather-night",
        icon_color: "#494368",
        description: "All-time low moment for the protagonist.",
        act: 2,
        percentage: 75,
        ends_act: false,
        enabled: true,
    },
    BeatDef {
        text: "Second Plot Point",
        id: 0x95705e5e_a6b8_4abe_b2ea_426f2ae8d020,
        icon: "mdi.dice-2",
        icon_color: "#6a0136",
        description: "Second 'Point of No Return' beat that launches the protagonist towards the climax.",
        act: 2,
        percentage: 80,
        ends_act: true,
        enabled: true,
    },
    BeatDef {
        text: "Crisis",
        id: 0x466688f7_ebee_4d36_a655_83ff40e1c46d,
        icon: "mdi.arrow-decision-outline",
        icon_color: "#ce2d4f",
        description: "The protagonist must decide between two equally bad or irreconcilable good choices.",
        act: 3,
        percentage: 95,
        ends_act: false,
        enabled: false,
    },
    BeatDef {
        text: "Climax",
        id: 0x342eb27c_52ff_40c2_8c5e_cf563d4e38bc,
        icon: "fa5s.chevron-up",
        icon_color: "#ce2d4f",
        description: "The highest point of tension. The story's main dramatic question is resolved.",
        act: 3,
        percentage: 97,
        ends_act: false,
        enabled: true,
    },
    BeatDef {
        text: "Resolution",
        id: 0x996695b1_8db6_4c68_8dc4_51bbfe720e8b,
        icon: "fa5s.water",
        icon_color: "#7192be",
        description: "An 'after' snapshot to tie up loose ends and release tension.",
        act: 3,
        percentage: 99,
        ends_act: false,
        enabled: true,
    },
];

/// The built-in three act structure. Returns a fresh copy on every call.
pub fn three_act_structure() -> StoryStructure {
    StoryStructure {
        title: "Three Act Structure".to_string(),
        id: StoryStructureId::from_u128(0x58013be5_1efb_4de4_9dd2_1433ce6edf90),
        icon: "mdi.numeric-3-circle-outline".to_string(),
        icon_color: "#ff7800".to_string(),
        beats: THREE_ACT_BEATS
            .iter()
            .map(|def| StoryBeat {
                text: def.text.to_string(),
                id: BeatId::from_u128(def.id),
                act: def.act,
                description: def.description.to_string(),
                beat_type: StoryBeatType::Beat,
                ends_act: def.ends_act,
                icon: def.icon.to_string(),
                icon_color: def.icon_color.to_string(),
                percentage: def.percentage,
                percentage_end: 0,
                enabled: def.enabled,
            })
            .collect(),
        custom: false,
        active: false,
        character_id: None,
    }
}
