//! Use cases - User story orchestration.
//!
//! Each use case mutates the in-memory novel and persists what changed
//! through the repository ports.

pub mod management;
pub mod manuscript;

pub use management::{
    CastManagement, ManagementError, ManagementUseCases, NovelManagement, SceneManagement,
};
pub use manuscript::Manuscript;
