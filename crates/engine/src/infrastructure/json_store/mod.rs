//! JSON file workspace.
//!
//! One manifest lists the novels. Each novel has an aggregate record, one file
//! per character and scene, and lazily read document bodies. See
//! [`layout`] for the directory structure.

mod client;
mod document_loader;
mod entity_store;
mod files;
mod image_store;
mod layout;
mod novel_store;
mod project_store;
mod records;
mod resolver;

#[cfg(test)]
mod integration_tests;

pub use client::JsonClient;
pub use layout::{WorkspaceLayout, PROJECT_FILE};
pub use records::LATEST_VERSION;
