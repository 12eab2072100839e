//! Documents - lazily loaded prose and structured notes
//!
//! A document's metadata lives inside its owner's record (the novel, a
//! character, or a scene). Its body lives in a sibling file and is only read
//! when someone asks for it. The document kind decides where that body is:
//!
//! | Kind                                   | Body on disk                 |
//! |----------------------------------------|------------------------------|
//! | `Document`, `StoryStructure`           | `<doc-id>.html`              |
//! | `CauseAndEffect`, `ReversedCauseAndEffect`, `Mice`, `Premise` | `<data-id>.json` |
//! | everything else                        | none                         |

use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black};
use crate::entities::{CharacterBased, Diagram};
use crate::ids::{CharacterId, DocumentDataId, DocumentId, SceneId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    #[default]
    Document,
    CharacterBackstory,
    CauseAndEffect,
    ReversedCauseAndEffect,
    Snowflake,
    CharacterArc,
    StoryStructure,
    Mice,
    Premise,
}

/// Where a document kind keeps its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStorage {
    /// Prose stored as an HTML sibling file keyed by the document id
    Html,
    /// Typed JSON payload stored under the document's data id
    Data(DataKind),
    /// The record itself is all there is
    MetadataOnly,
}

/// Typed payloads a structured document can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Causality,
    Mice,
    Premise,
}

impl DataKind {
    /// Decodes a payload file into the content variant of this kind.
    pub fn decode(self, json: &str) -> Result<DocumentContent, serde_json::Error> {
        Ok(match self {
            DataKind::Causality => DocumentContent::Causality(serde_json::from_str(json)?),
            DataKind::Mice => DocumentContent::Mice(serde_json::from_str(json)?),
            DataKind::Premise => DocumentContent::Premise(serde_json::from_str(json)?),
        })
    }

    /// Content of a structured document whose payload was never written.
    pub fn empty(self) -> DocumentContent {
        match self {
            DataKind::Causality => DocumentContent::Causality(Causality::default()),
            DataKind::Mice => DocumentContent::Mice(MiceQuotient::default()),
            DataKind::Premise => DocumentContent::Premise(PremiseBuilder::default()),
        }
    }
}

impl DocumentKind {
    pub fn storage(self) -> DocumentStorage {
        match self {
            DocumentKind::Document | DocumentKind::StoryStructure => DocumentStorage::Html,
            DocumentKind::CauseAndEffect | DocumentKind::ReversedCauseAndEffect => {
                DocumentStorage::Data(DataKind::Causality)
            }
            DocumentKind::Mice => DocumentStorage::Data(DataKind::Mice),
            DocumentKind::Premise => DocumentStorage::Data(DataKind::Premise),
            DocumentKind::CharacterBackstory
            | DocumentKind::Snowflake
            | DocumentKind::CharacterArc => DocumentStorage::MetadataOnly,
        }
    }
}

/// A loaded document body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DocumentContent {
    #[default]
    Empty,
    Html(String),
    Causality(Causality),
    Mice(MiceQuotient),
    Premise(PremiseBuilder),
}

impl DocumentContent {
    /// Encodes a structured payload. Prose and empty content have no JSON form.
    pub fn to_json(&self) -> Option<Result<String, serde_json::Error>> {
        match self {
            DocumentContent::Causality(data) => Some(serde_json::to_string(data)),
            DocumentContent::Mice(data) => Some(serde_json::to_string(data)),
            DocumentContent::Premise(data) => Some(serde_json::to_string(data)),
            DocumentContent::Empty | DocumentContent::Html(_) => None,
        }
    }

    pub fn as_html(&self) -> Option<&str> {
        match self {
            DocumentContent::Html(html) => Some(html),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatistics {
    /// Word count
    pub wc: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub id: DocumentId,
    #[serde(rename = "type", default)]
    pub kind: DocumentKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<SceneId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_id: Option<DocumentDataId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DocumentStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<Diagram>,

    #[serde(skip)]
    loaded: bool,
    #[serde(skip)]
    content: DocumentContent,
}

impl Document {
    /// Creates a document of the given kind. Structured kinds get a data id.
    pub fn new(title: impl Into<String>, kind: DocumentKind) -> Self {
        let data_id = match kind.storage() {
            DocumentStorage::Data(_) => Some(DocumentDataId::new()),
            DocumentStorage::Html | DocumentStorage::MetadataOnly => None,
        };
        Self {
            title: title.into(),
            id: DocumentId::new(),
            kind,
            children: Vec::new(),
            character_id: None,
            scene_id: None,
            data_id,
            icon: String::new(),
            icon_color: default_icon_color(),
            statistics: None,
            diagram: None,
            loaded: false,
            content: DocumentContent::Empty,
        }
    }

    /// A plain prose document.
    pub fn prose(title: impl Into<String>) -> Self {
        Self::new(title, DocumentKind::Document)
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_child(mut self, child: Document) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    /// Replaces the body and marks the document as loaded.
    pub fn set_content(&mut self, content: DocumentContent) {
        self.content = content;
        self.loaded = true;
    }

    /// Replaces the body with prose.
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.set_content(DocumentContent::Html(html.into()));
    }

    fn with_fixed_id(mut self, id: u128) -> Self {
        self.id = DocumentId::from_u128(id);
        self
    }
}

impl CharacterBased for Document {
    fn character_id(&self) -> Option<CharacterId> {
        self.character_id
    }
}

// ============================================================================
// Structured payloads
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CausalityItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<CausalityItem>,
}

/// Cause and effect chains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Causality {
    #[serde(default)]
    pub items: Vec<CausalityItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiceType {
    Milieu,
    Idea,
    Character,
    Event,
}

/// An open story thread, opened in one scene and closed in another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiceThread {
    pub text: String,
    #[serde(rename = "type")]
    pub thread_type: MiceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beginning_scene_id: Option<SceneId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending_scene_id: Option<SceneId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiceQuotient {
    #[serde(default)]
    pub threads: Vec<MiceThread>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiseIdea {
    pub text: String,
    #[serde(default)]
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PremiseBuilder {
    #[serde(default)]
    pub ideas: Vec<PremiseIdea>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub premises: Vec<String>,
}

/// The root documents every novel starts with.
pub fn default_documents() -> Vec<Document> {
    vec![
        Document::prose("Story")
            .with_fixed_id(0xec2a62d9_fc00_41dd_8a6c_b121156b6cf4)
            .with_icon("fa5s.book-open"),
        Document::prose("Characters")
            .with_fixed_id(0x8fa16650_bed0_489b_baa1_d239e5198d47)
            .with_icon("fa5s.user"),
        Document::prose("Scenes")
            .with_fixed_id(0x75a552f4_037d_4179_860f_dd8400a7545b)
            .with_icon("mdi.movie-open"),
        Document::prose("Locations")
            .with_fixed_id(0x5faf7c16_f970_465d_bbcb_1bad56f3313c)
            .with_icon("fa5s.map-pin"),
    ]
}
