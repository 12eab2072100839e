use serde::{Deserialize, Serialize};

use crate::ids::ImageId;

/// Reference to a novel-scoped image blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: ImageId,
    pub extension: String,
}

impl ImageRef {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            id: ImageId::new(),
            extension: extension.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.id, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_extension() {
        let image = ImageRef::new("png");
        assert_eq!(image.file_name(), format!("{}.png", image.id));
    }
}
