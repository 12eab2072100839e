//! Domain events
//!
//! Return types of aggregate mutations, communicating what happened when
//! state was modified. Callers log them and decide whether to persist.

pub mod novel_events;

pub use novel_events::*;
