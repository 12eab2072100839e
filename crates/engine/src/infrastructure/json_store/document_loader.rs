//! Lazy document and diagram bodies
//!
//! Records only carry document metadata. Bodies are read here on first
//! access. Saving a document or diagram that was never loaded writes nothing.

use plotlyst_domain::entities::{DataKind, DiagramData};
use plotlyst_domain::{Diagram, Document, DocumentContent, DocumentStorage, NovelId};

use super::files;
use super::layout::WorkspaceLayout;
use crate::infrastructure::ports::RepoError;

fn payload_kind(content: &DocumentContent) -> Option<DataKind> {
    match content {
        DocumentContent::Causality(_) => Some(DataKind::Causality),
        DocumentContent::Mice(_) => Some(DataKind::Mice),
        DocumentContent::Premise(_) => Some(DataKind::Premise),
        DocumentContent::Empty | DocumentContent::Html(_) => None,
    }
}

#[derive(Debug, Clone)]
pub struct DocumentLoader {
    layout: WorkspaceLayout,
}

impl DocumentLoader {
    pub fn new(layout: WorkspaceLayout) -> Self {
        Self { layout }
    }

    pub fn load_document(&self, novel_id: NovelId, doc: &mut Document) -> Result<(), RepoError> {
        if doc.is_loaded() {
            return Ok(());
        }

        let content = match doc.kind.storage() {
            DocumentStorage::Html => {
                let path = self.layout.html_file(novel_id, doc.id);
                DocumentContent::Html(files::read_string(&path)?.unwrap_or_default())
            }
            DocumentStorage::Data(kind) => match doc.data_id {
                Some(data_id) => {
                    let path = self.layout.data_file(novel_id, data_id);
                    match files::read_string(&path)? {
                        Some(json) => kind
                            .decode(&json)
                            .map_err(|e| RepoError::serialization(&path, e))?,
                        None => kind.empty(),
                    }
                }
                None => kind.empty(),
            },
            DocumentStorage::MetadataOnly => DocumentContent::Empty,
        };
        doc.set_content(content);

        if let Some(diagram) = doc.diagram.as_mut() {
            self.load_diagram(novel_id, diagram)?;
        }

        tracing::debug!(document_id = %doc.id, kind = ?doc.kind, "Loaded document");
        Ok(())
    }

    /// Writes the body of a loaded document. Unloaded documents are skipped.
    pub fn update_document(&self, novel_id: NovelId, doc: &Document) -> Result<(), RepoError> {
        if !doc.is_loaded() {
            tracing::debug!(document_id = %doc.id, "Skipping update of unloaded document");
            return Ok(());
        }

        match doc.kind.storage() {
            DocumentStorage::Html => {
                let html = doc.content().as_html().unwrap_or_default();
                files::write_atomic(&self.layout.html_file(novel_id, doc.id), html.as_bytes())?;
            }
            DocumentStorage::Data(kind) => {
                let data_id = doc.data_id.ok_or_else(|| {
                    RepoError::constraint(format!("Document {} has no data id", doc.id))
                })?;
                let path = self.layout.data_file(novel_id, data_id);
                let payload = match doc.content() {
                    DocumentContent::Empty => kind.empty(),
                    content => content.clone(),
                };
                if payload_kind(&payload) != Some(kind) {
                    return Err(RepoError::constraint(format!(
                        "Document {} content does not match its {:?} kind",
                        doc.id, doc.kind
                    )));
                }
                if let Some(json) = payload.to_json() {
                    let json = json.map_err(|e| RepoError::serialization(&path, e))?;
                    files::write_atomic(&path, json.as_bytes())?;
                }
            }
            DocumentStorage::MetadataOnly => {}
        }

        if let Some(diagram) = &doc.diagram {
            self.update_diagram(novel_id, diagram)?;
        }
        Ok(())
    }

    /// Removes the body files of the document and of all its children.
    pub fn delete_document(&self, novel_id: NovelId, doc: &Document) -> Result<(), RepoError> {
        files::remove_file(&self.layout.html_file(novel_id, doc.id))?;
        if let Some(data_id) = doc.data_id {
            files::remove_file(&self.layout.data_file(novel_id, data_id))?;
        }
        if let Some(diagram) = &doc.diagram {
            self.delete_diagram(novel_id, diagram)?;
        }
        for child in &doc.children {
            self.delete_document(novel_id, child)?;
        }
        Ok(())
    }

    pub fn load_diagram(&self, novel_id: NovelId, diagram: &mut Diagram) -> Result<(), RepoError> {
        if diagram.is_loaded() {
            return Ok(());
        }
        let data: Option<DiagramData> =
            files::read_json(&self.layout.diagram_file(novel_id, diagram.id))?;
        diagram.set_data(data.unwrap_or_default());
        tracing::debug!(diagram_id = %diagram.id, "Loaded diagram");
        Ok(())
    }

    /// Writes the payload of a loaded diagram. Unloaded diagrams are skipped.
    pub fn update_diagram(&self, novel_id: NovelId, diagram: &Diagram) -> Result<(), RepoError> {
        if !diagram.is_loaded() {
            tracing::debug!(diagram_id = %diagram.id, "Skipping update of unloaded diagram");
            return Ok(());
        }
        if !diagram.data().is_finite() {
            return Err(RepoError::constraint(format!(
                "Diagram {} has a non-finite position or angle",
                diagram.id
            )));
        }
        files::write_json(&self.layout.diagram_file(novel_id, diagram.id), diagram.data())
    }

    fn delete_diagram(&self, novel_id: NovelId, diagram: &Diagram) -> Result<(), RepoError> {
        files::remove_file(&self.layout.diagram_file(novel_id, diagram.id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotlyst_domain::entities::{
        Causality, CausalityItem, DiagramKind, DiagramNode, DiagramNodeType, DocumentKind,
        MiceQuotient,
    };
    use std::fs;
    use tempfile::tempdir;

    fn loader() -> (tempfile::TempDir, WorkspaceLayout, DocumentLoader) {
        let dir = tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());
        let loader = DocumentLoader::new(layout.clone());
        (dir, layout, loader)
    }

    #[test]
    fn html_body_is_read_once() {
        let (_dir, layout, loader) = loader();
        let novel_id = NovelId::new();
        let mut doc = Document::prose("Notes");
        files::write_atomic(&layout.html_file(novel_id, doc.id), b"<p>first</p>").unwrap();

        assert!(!doc.is_loaded());
        assert_eq!(doc.content(), &DocumentContent::Empty);

        loader.load_document(novel_id, &mut doc).unwrap();
        assert!(doc.is_loaded());
        assert_eq!(doc.content().as_html(), Some("<p>first</p>"));

        // A second load does not touch the file again
        fs::write(layout.html_file(novel_id, doc.id), "<p>second</p>").unwrap();
        loader.load_document(novel_id, &mut doc).unwrap();
        assert_eq!(doc.content().as_html(), Some("<p>first</p>"));
    }

    #[test]
    fn missing_bodies_load_as_empty() {
        let (_dir, _layout, loader) = loader();
        let novel_id = NovelId::new();

        let mut prose = Document::prose("Blank");
        loader.load_document(novel_id, &mut prose).unwrap();
        assert_eq!(prose.content().as_html(), Some(""));

        let mut mice = Document::new("Threads", DocumentKind::Mice);
        loader.load_document(novel_id, &mut mice).unwrap();
        assert_eq!(
            mice.content(),
            &DocumentContent::Mice(MiceQuotient::default())
        );

        let mut arc = Document::new("Arc", DocumentKind::CharacterArc);
        loader.load_document(novel_id, &mut arc).unwrap();
        assert!(arc.is_loaded());
        assert_eq!(arc.content(), &DocumentContent::Empty);
    }

    #[test]
    fn structured_payload_round_trips() {
        let (_dir, _layout, loader) = loader();
        let novel_id = NovelId::new();
        let mut doc = Document::new("Causes", DocumentKind::CauseAndEffect);
        let causality = Causality {
            items: vec![CausalityItem {
                text: "The bridge falls".to_string(),
                links: Vec::new(),
            }],
        };
        doc.set_content(DocumentContent::Causality(causality.clone()));

        loader.update_document(novel_id, &doc).unwrap();

        // Metadata as it comes back from the owner's record
        let mut fresh: Document =
            serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
        assert!(!fresh.is_loaded());
        loader.load_document(novel_id, &mut fresh).unwrap();
        assert_eq!(fresh.content(), &DocumentContent::Causality(causality));
    }

    #[test]
    fn data_document_without_data_id_cannot_be_saved() {
        let (_dir, _layout, loader) = loader();
        let mut doc = Document::new("Premise", DocumentKind::Premise);
        doc.data_id = None;
        doc.set_content(DataKind::Premise.empty());

        let err = loader.update_document(NovelId::new(), &doc).unwrap_err();
        assert!(matches!(err, RepoError::ConstraintViolation(_)));
    }

    #[test]
    fn unloaded_document_is_not_written() {
        let (_dir, layout, loader) = loader();
        let novel_id = NovelId::new();
        let doc = Document::prose("Untouched");
        files::write_atomic(&layout.html_file(novel_id, doc.id), b"<p>keep</p>").unwrap();

        loader.update_document(novel_id, &doc).unwrap();

        assert_eq!(
            fs::read_to_string(layout.html_file(novel_id, doc.id)).unwrap(),
            "<p>keep</p>"
        );
    }

    #[test]
    fn delete_recurses_into_children_and_diagram() {
        let (_dir, layout, loader) = loader();
        let novel_id = NovelId::new();
        let mut child = Document::prose("Child");
        child.set_html("<p>child</p>");
        let mut parent = Document::prose("Parent").with_child(child.clone());
        parent.set_html("<p>parent</p>");
        let mut diagram = Diagram::new("Map", DiagramKind::EventsMap);
        diagram.set_data(DiagramData {
            nodes: vec![DiagramNode::new(DiagramNodeType::Event, 0.0, 0.0)],
            connectors: Vec::new(),
        });
        parent.diagram = Some(diagram.clone());

        loader.update_document(novel_id, &parent).unwrap();
        loader.update_document(novel_id, &child).unwrap();
        assert!(layout.diagram_file(novel_id, diagram.id).is_file());

        loader.delete_document(novel_id, &parent).unwrap();

        assert!(!layout.html_file(novel_id, parent.id).exists());
        assert!(!layout.html_file(novel_id, child.id).exists());
        assert!(!layout.diagram_file(novel_id, diagram.id).exists());
    }

    #[test]
    fn missing_diagram_loads_empty() {
        let (_dir, _layout, loader) = loader();
        let mut diagram = Diagram::new("Network", DiagramKind::CharacterNetwork);

        loader.load_diagram(NovelId::new(), &mut diagram).unwrap();

        assert!(diagram.is_loaded());
        assert_eq!(diagram.data(), &DiagramData::default());
    }

    #[test]
    fn non_finite_diagram_is_rejected_and_previous_payload_kept() {
        let (_dir, layout, loader) = loader();
        let novel_id = NovelId::new();
        let mut diagram = Diagram::new("Map", DiagramKind::EventsMap);
        let saved = DiagramData {
            nodes: vec![DiagramNode::new(DiagramNodeType::Event, 4.0, 8.0)],
            connectors: Vec::new(),
        };
        diagram.set_data(saved.clone());
        loader.update_diagram(novel_id, &diagram).unwrap();

        diagram.set_data(DiagramData {
            nodes: vec![DiagramNode::new(DiagramNodeType::Event, f64::NAN, 8.0)],
            connectors: Vec::new(),
        });
        let err = loader.update_diagram(novel_id, &diagram).unwrap_err();
        assert!(matches!(err, RepoError::ConstraintViolation(_)));

        let mut reloaded = Diagram::new("Map", DiagramKind::EventsMap);
        reloaded.id = diagram.id;
        loader.load_diagram(novel_id, &mut reloaded).unwrap();
        assert_eq!(reloaded.data(), &saved);
        assert!(layout.diagram_file(novel_id, diagram.id).is_file());
    }
}
