//! Aggregates
//!
//! Aggregates keep their fields private and expose mutations that return
//! outcome events from [`crate::events`].

pub mod novel;

pub use novel::{Novel, NovelIndex, NovelParts};
