//! Diagrams - node/connector canvases (events map, character networks)
//!
//! The diagram header (id, kind, title, settings) is stored with its owner.
//! The node and connector payload is stored separately and loaded on demand.

use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black, is_false, is_zero};
use crate::ids::{CharacterId, ConnectorId, DiagramId, DiagramNodeId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    #[default]
    EventsMap,
    CharacterNetwork,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub font_size: u16,
    #[serde(default, skip_serializing_if = "is_false")]
    pub relax_colors: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramNodeType {
    #[default]
    Event,
    Character,
    Comment,
    Setup,
    Goal,
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: DiagramNodeId,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type", default)]
    pub node_type: DiagramNodeType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub color: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: u16,
}

impl DiagramNode {
    pub fn new(node_type: DiagramNodeType, x: f64, y: f64) -> Self {
        Self {
            id: DiagramNodeId::new(),
            x,
            y,
            node_type,
            text: String::new(),
            character_id: None,
            icon: String::new(),
            color: default_icon_color(),
            size: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: ConnectorId,
    pub source_id: DiagramNodeId,
    pub target_id: DiagramNodeId,
    #[serde(default)]
    pub source_angle: f64,
    #[serde(default)]
    pub target_angle: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub pen_width: u8,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
}

impl Connector {
    pub fn between(source: &DiagramNode, target: &DiagramNode) -> Self {
        Self {
            id: ConnectorId::new(),
            source_id: source.id,
            target_id: target.id,
            source_angle: 0.0,
            target_angle: 0.0,
            pen_width: 0,
            color: default_icon_color(),
            text: String::new(),
            icon: String::new(),
        }
    }
}

/// Lazily loaded payload of a diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramData {
    #[serde(default)]
    pub nodes: Vec<DiagramNode>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub title: String,
    pub id: DiagramId,
    #[serde(rename = "type", default)]
    pub kind: DiagramKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
    #[serde(default, skip_serializing_if = "crate::common::is_default")]
    pub settings: DiagramSettings,

    #[serde(skip)]
    loaded: bool,
    #[serde(skip)]
    data: DiagramData,
}

impl Diagram {
    pub fn new(title: impl Into<String>, kind: DiagramKind) -> Self {
        Self {
            title: title.into(),
            id: DiagramId::new(),
            kind,
            icon: String::new(),
            icon_color: default_icon_color(),
            settings: DiagramSettings::default(),
            loaded: false,
            data: DiagramData::default(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn data(&self) -> &DiagramData {
        &self.data
    }

    /// Replaces the payload and marks the diagram as loaded.
    pub fn set_data(&mut self, data: DiagramData) {
        self.data = data;
        self.loaded = true;
    }
}

impl DiagramData {
    /// Whether every coordinate and angle is finite. JSON cannot hold NaN or
    /// infinity.
    pub fn is_finite(&self) -> bool {
        self.nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite())
            && self
                .connectors
                .iter()
                .all(|c| c.source_angle.is_finite() && c.target_angle.is_finite())
    }
}

/// Character networks of a fresh novel.
pub fn default_character_networks() -> Vec<Diagram> {
    vec![Diagram::new("Main", DiagramKind::CharacterNetwork)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_not_part_of_the_header() {
        let mut diagram = Diagram::new("Events", DiagramKind::EventsMap);
        let node = DiagramNode::new(DiagramNodeType::Event, 10.0, 20.0);
        diagram.set_data(DiagramData {
            nodes: vec![node],
            connectors: Vec::new(),
        });

        let json = serde_json::to_string(&diagram).unwrap();
        assert!(!json.contains("nodes"));

        let back: Diagram = serde_json::from_str(&json).unwrap();
        assert!(!back.is_loaded());
        assert!(back.data().nodes.is_empty());
    }

    #[test]
    fn non_finite_positions_are_detected() {
        let source = DiagramNode::new(DiagramNodeType::Event, 0.0, 0.0);
        let target = DiagramNode::new(DiagramNodeType::Goal, 40.0, 12.5);
        let mut data = DiagramData {
            connectors: vec![Connector::between(&source, &target)],
            nodes: vec![source, target],
        };
        assert!(data.is_finite());

        data.connectors[0].target_angle = f64::INFINITY;
        assert!(!data.is_finite());

        data.connectors[0].target_angle = 90.0;
        data.nodes[1].y = f64::NAN;
        assert!(!data.is_finite());
    }

    #[test]
    fn default_settings_are_omitted() {
        let json = serde_json::to_string(&Diagram::new("Main", DiagramKind::CharacterNetwork)).unwrap();
        assert!(!json.contains("settings"));
        assert!(json.contains(r#""type":"character_network""#));
    }
}
