//! Plotlyst Engine library.
//!
//! Persistence and orchestration for Plotlyst novels.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the novel aggregate
//! - `infrastructure/` - Port traits and the JSON workspace store
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
