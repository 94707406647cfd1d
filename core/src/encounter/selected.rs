use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::condition::Condition;
use crate::types::Creature;

/// A creature taking part in an encounter, with its runtime state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCreature {
    /// `creature.id` is unique per encounter entry, `creature.name` carries the
    /// duplicate number if there is one.
    #[serde(flatten)]
    pub creature: Creature,
    /// Catalog id of the creature this entry was created from.
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub base_name: String,
    /// 0 while the entry is the only one of its kind.
    #[serde(default)]
    pub ordinal: u32,
    pub current_hit_points: i32,
    pub initiative: i32,
    #[serde(default)]
    pub conditions: BTreeSet<Condition>,
}

impl SelectedCreature {
    pub fn new(creature: Creature, id: String, initiative: i32) -> Self {
        let source_id = creature.id.clone();
        let base_name = creature.name.clone();
        let current_hit_points = creature.hit_points;
        Self {
            creature: Creature { id, ..creature },
            source_id,
            base_name,
            ordinal: 0,
            current_hit_points,
            initiative,
            conditions: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.creature.id
    }

    pub fn name(&self) -> &str {
        &self.creature.name
    }

    pub fn max_hit_points(&self) -> i32 {
        self.creature.hit_points
    }

    pub fn set_ordinal(&mut self, ordinal: u32) {
        self.ordinal = ordinal;
        self.creature.name = if ordinal == 0 {
            self.base_name.clone()
        } else {
            format!("{} {}", self.base_name, ordinal)
        };
    }

    pub fn set_hit_points(&mut self, hit_points: i32) {
        self.current_hit_points = hit_points.clamp(0, self.max_hit_points().max(0));
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.set_hit_points(self.current_hit_points - damage);
    }

    pub fn heal(&mut self, amount: i32) {
        self.set_hit_points(self.current_hit_points + amount);
    }

    /// Returns whether the condition is active afterwards.
    pub fn toggle_condition(&mut self, condition: Condition) -> bool {
        if self.conditions.remove(&condition) {
            false
        } else {
            self.conditions.insert(condition);
            true
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hit_points > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> SelectedCreature {
        let creature = crate::fixtures::creatures().remove(0);
        SelectedCreature::new(creature, "entry-1".into(), 12)
    }

    #[test]
    fn test_new_keeps_catalog_identity() {
        let entry = goblin();
        assert_eq!(entry.id(), "entry-1");
        assert_eq!(entry.source_id, "1");
        assert_eq!(entry.base_name, "Goblin");
        assert_eq!(entry.current_hit_points, 7);
        assert!(entry.conditions.is_empty());
    }

    #[test]
    fn test_hit_points_are_clamped() {
        let mut entry = goblin();
        entry.take_damage(100);
        assert_eq!(entry.current_hit_points, 0);
        assert!(!entry.is_alive());
        entry.heal(3);
        assert_eq!(entry.current_hit_points, 3);
        entry.heal(100);
        assert_eq!(entry.current_hit_points, 7);
        entry.set_hit_points(-4);
        assert_eq!(entry.current_hit_points, 0);
    }

    #[test]
    fn test_toggle_condition() {
        let mut entry = goblin();
        assert!(entry.toggle_condition(Condition::Prone));
        assert!(entry.conditions.contains(&Condition::Prone));
        assert!(!entry.toggle_condition(Condition::Prone));
        assert!(entry.conditions.is_empty());
    }

    #[test]
    fn test_ordinal_renames() {
        let mut entry = goblin();
        entry.set_ordinal(3);
        assert_eq!(entry.name(), "Goblin 3");
        entry.set_ordinal(0);
        assert_eq!(entry.name(), "Goblin");
    }

    #[test]
    fn test_json_is_flat() {
        let mut entry = goblin();
        entry.toggle_condition(Condition::Poisoned);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "entry-1");
        assert_eq!(json["armorClass"], 15);
        assert_eq!(json["currentHitPoints"], 7);
        assert_eq!(json["conditions"], serde_json::json!(["poisoned"]));
    }
}
