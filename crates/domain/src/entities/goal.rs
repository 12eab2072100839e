//! Goals and character plans
//!
//! Goals are stored once per novel. Characters refer to them from their plans;
//! a novel goal nobody refers to is dropped on load.

use serde::{Deserialize, Serialize};

use crate::common::{default_icon_color, is_black};
use crate::ids::{CharacterGoalId, CharacterPlanId, GoalId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub text: String,
    pub id: GoalId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default = "default_icon_color", skip_serializing_if = "is_black")]
    pub icon_color: String,
}

impl Goal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: GoalId::new(),
            description: String::new(),
            icon: String::new(),
            icon_color: default_icon_color(),
        }
    }
}

/// A character's reference to a novel goal, possibly with sub-goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterGoal {
    pub id: CharacterGoalId,
    pub goal_id: GoalId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CharacterGoal>,
}

impl CharacterGoal {
    pub fn new(goal_id: GoalId) -> Self {
        Self {
            id: CharacterGoalId::new(),
            goal_id,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: CharacterGoal) -> Self {
        self.children.push(child);
        self
    }

    fn collect_goal_ids(&self, out: &mut Vec<GoalId>) {
        out.push(self.goal_id);
        for child in &self.children {
            child.collect_goal_ids(out);
        }
    }
}

fn external_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPlan {
    pub id: CharacterPlanId,
    /// External plans are visible to other characters; internal ones are not
    #[serde(default = "external_default")]
    pub external: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<CharacterGoal>,
}

impl CharacterPlan {
    pub fn new() -> Self {
        Self {
            id: CharacterPlanId::new(),
            external: true,
            summary: String::new(),
            goals: Vec::new(),
        }
    }

    pub fn with_goal(mut self, goal: CharacterGoal) -> Self {
        self.goals.push(goal);
        self
    }

    /// Every novel goal this plan refers to, including nested sub-goals.
    pub fn goal_ids(&self) -> Vec<GoalId> {
        let mut ids = Vec::new();
        for goal in &self.goals {
            goal.collect_goal_ids(&mut ids);
        }
        ids
    }
}

impl Default for CharacterPlan {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_ids_include_nested_children() {
        let root = GoalId::new();
        let child = GoalId::new();
        let grandchild = GoalId::new();
        let plan = CharacterPlan::new().with_goal(
            CharacterGoal::new(root)
                .with_child(CharacterGoal::new(child).with_child(CharacterGoal::new(grandchild))),
        );

        assert_eq!(plan.goal_ids(), vec![root, child, grandchild]);
    }
}
