use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Builds an id from a compile-time constant. Used for built-in
            /// defaults whose ids must stay stable across releases.
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| crate::error::DomainError::invalid_id(format!("{s}: {e}")))
            }
        }
    };
}

// Project-level IDs
define_id!(NovelId);

// Aggregate member IDs
define_id!(CharacterId);
define_id!(SceneId);
define_id!(ChapterId);
define_id!(PlotId);
define_id!(PlotValueId);
define_id!(StageId);

// Story structure IDs
define_id!(StoryStructureId);
define_id!(BeatId);

// Goal IDs
define_id!(GoalId);
define_id!(CharacterPlanId);
define_id!(CharacterGoalId);

// Tag IDs
define_id!(TagId);

// Template field IDs (character profile answers)
define_id!(TemplateFieldId);

// Document and payload IDs
define_id!(DocumentId);
define_id!(DocumentDataId);
define_id!(DiagramId);
define_id!(DiagramNodeId);
define_id!(ConnectorId);

// Blob IDs
define_id!(ImageId);

// World building and board IDs
define_id!(WorldEntityId);
define_id!(TaskId);
define_id!(TaskStatusId);
