//! Common serde helpers shared across domain records.
//!
//! Records omit fields that hold their "empty" sentinel to keep files small.
//! The predicates here pair with `#[serde(default)]` so an omitted field reads
//! back as the same value it was written from.

pub mod skip;

pub use skip::{default_icon_color, is_black, is_default, is_false, is_zero, DEFAULT_ICON_COLOR};
