//! Tags and tag types
//!
//! Tags are grouped by tag type in memory. On disk the novel record keeps a
//! flat list of user tags plus the list of tag types; built-in tags are never
//! written and are merged back into the "General" bucket on load.

use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black, is_false};
use crate::ids::TagId;

/// Name of the tag type that receives the built-in tags.
pub const GENERAL_TAG_TYPE: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagType {
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl TagType {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: String::new(),
            icon_color: default_icon_color(),
            description: String::new(),
        }
    }

    fn builtin(text: &str, icon: &str, icon_color: &str, description: &str) -> Self {
        Self {
            text: text.to_string(),
            icon: icon.to_string(),
            icon_color: icon_color.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
    pub id: TagId,
    /// Text of the tag type this tag belongs to
    #[serde(default = "general_tag_type")]
    pub tag_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color_hexa: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub builtin: bool,
}

fn general_tag_type() -> String {
    GENERAL_TAG_TYPE.to_string()
}

impl Tag {
    pub fn new(text: impl Into<String>, tag_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: TagId::new(),
            tag_type: tag_type.into(),
            icon: String::new(),
            icon_color: default_icon_color(),
            color_hexa: String::new(),
            builtin: false,
        }
    }

    fn builtin(text: &str, id: u128, icon: &str, icon_color: &str, color_hexa: &str) -> Self {
        Self {
            text: text.to_string(),
            id: TagId::from_u128(id),
            tag_type: general_tag_type(),
            icon: icon.to_string(),
            icon_color: icon_color.to_string(),
            color_hexa: color_hexa.to_string(),
            builtin: true,
        }
    }
}

/// Tags of one tag type, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct TagGroup {
    pub tag_type: TagType,
    pub tags: Vec<Tag>,
}

pub fn default_general_tags() -> Vec<Tag> {
    vec![
        Tag::builtin(
            "Flashback",
            0x1daadfcf_dc6a_4b9d_b708_f9577cbb9e83,
            "fa5s.backward",
            "white",
            "#1b263b",
        ),
        Tag::builtin(
            "Flashforward",
            0xa5db2d5f_099d_4d01_83e8_31c726f04100,
            "fa5s.forward",
            "white",
            "#1b998b",
        ),
        Tag::builtin(
            "Ticking clock",
            0x88ab7b73_6934_4f63_8022_0b8732caa8bd,
            "mdi.clock-alert-outline",
            "#f7cb15",
            "",
        ),
        Tag::builtin(
            "Foreshadowing",
            0x2ba0c868_da0f_44fc_9142_fef0bfa6e1c6,
            "mdi.crystal-ball",
            "#76bed0",
            "",
        ),
        Tag::builtin(
            "Cliffhanger",
            0x51e0bcc5_396e_4602_b195_fc8efe985f13,
            "mdi.target-account",
            "#f7cb15",
            "",
        ),
        Tag::builtin(
            "Backstory",
            0x72d155da_df20_4b64_84d3_acfbbc7f87c7,
            "mdi.archive",
            "#9a6d38",
            "",
        ),
        Tag::builtin(
            "Red herring",
            0x96ff9491_cdd3_4c85_8086_ee47144828cb,
            "fa5s.fish",
            "#d33f49",
            "",
        ),
    ]
}

pub fn default_tag_types() -> Vec<TagType> {
    vec![
        TagType::builtin(
            GENERAL_TAG_TYPE,
            "ei.tags",
            "#2a2a72",
            "General tags that can be tracked for each scenes.",
        ),
        TagType::builtin(
            "Symbols",
            "fa5s.dove",
            "#5995ed",
            "A symbol can be anything that represents something beyond their literal meaning.",
        ),
        TagType::builtin(
            "Motifs",
            "mdi6.glass-fragile",
            "#8ac6d0",
            "A motif is a recurring object, sound, situation, phrase, or idea throughout the story. \
             A motif might remind the reader to the theme.",
        ),
        TagType::builtin(
            "Items",
            "mdi.ring",
            "#b6a6ca",
            "Relevant items that reappear throughout the story. \
             They do not have symbolic meaning unlike Symbols or Motifs.",
        ),
        TagType::builtin(
            "Themes",
            "ei.idea-alt",
            "#f72585",
            "The main ideas or lessons that the story explores.",
        ),
    ]
}

/// Tag groups of a fresh novel: every default type, built-ins under "General".
pub fn default_tag_groups() -> Vec<TagGroup> {
    group_tags(default_tag_types(), Vec::new())
}

/// Groups a flat tag list by tag type and merges the built-in general tags.
///
/// - An empty type list falls back to [`default_tag_types`].
/// - Tags whose type is not in the list are dropped.
/// - Built-in tags missing from the "General" bucket (the first bucket if no
///   type is named "General") are placed ahead of the user's tags, in their
///   default order.
pub fn group_tags(tag_types: Vec<TagType>, tags: Vec<Tag>) -> Vec<TagGroup> {
    let tag_types = if tag_types.is_empty() {
        default_tag_types()
    } else {
        tag_types
    };

    let mut groups: Vec<TagGroup> = tag_types
        .into_iter()
        .map(|tag_type| TagGroup {
            tag_type,
            tags: Vec::new(),
        })
        .collect();

    for tag in tags {
        if let Some(group) = groups
            .iter_mut()
            .find(|g| g.tag_type.text == tag.tag_type)
        {
            group.tags.push(tag);
        }
    }

    let general = groups
        .iter()
        .position(|g| g.tag_type.text == GENERAL_TAG_TYPE)
        .unwrap_or(0);
    if let Some(group) = groups.get_mut(general) {
        let missing: Vec<Tag> = default_general_tags()
            .into_iter()
            .filter(|builtin| !group.tags.iter().any(|t| t.id == builtin.id))
            .collect();
        group.tags.splice(0..0, missing);
    }

    groups
}
