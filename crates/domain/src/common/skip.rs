//! `skip_serializing_if` predicates and matching defaults.

/// Icon color every selectable item falls back to.
pub const DEFAULT_ICON_COLOR: &str = "black";

/// Default for `icon_color` fields omitted on disk.
pub fn default_icon_color() -> String {
    DEFAULT_ICON_COLOR.to_string()
}

/// Skip icon colors equal to the default black.
///
/// ```
/// use plotlyst_domain::common::is_black;
///
/// assert!(is_black(&"black".to_string()));
/// assert!(!is_black(&"#ff7800".to_string()));
/// ```
#[allow(clippy::ptr_arg)]
pub fn is_black(value: &String) -> bool {
    value == DEFAULT_ICON_COLOR
}

pub fn is_false(value: &bool) -> bool {
    !*value
}

pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Skip values equal to their `Default`. Used for nested preference structs.
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}
