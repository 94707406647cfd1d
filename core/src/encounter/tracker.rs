use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use super::{
    condition::Condition,
    dice::{roll_dice, roll_initiative},
    selected::SelectedCreature,
    storage::Format,
};
use crate::{
    error::{Error, Result},
    types::Creature,
};

/// Partial update merged into an encounter entry. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterUpdate {
    pub current_hit_points: Option<i32>,
    pub initiative: Option<i32>,
    pub conditions: Option<BTreeSet<Condition>>,
}

/// The creatures of an encounter, stored in the order they were added.
#[derive(Debug, Clone)]
pub struct Encounter {
    creatures: Vec<SelectedCreature>,
    rng: StdRng,
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Encounter {
    pub fn new() -> Self {
        Self {
            creatures: Vec::new(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            creatures: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_creatures(creatures: Vec<SelectedCreature>) -> Self {
        Self {
            creatures,
            ..Self::new()
        }
    }

    /// Entries in the order they were added.
    pub fn creatures(&self) -> &[SelectedCreature] {
        &self.creatures
    }

    /// Entries by descending initiative; ties keep the order they were added in.
    pub fn by_initiative(&self) -> Vec<&SelectedCreature> {
        let mut sorted: Vec<&SelectedCreature> = self.creatures.iter().collect();
        // sort_by is stable
        sorted.sort_by(|a, b| b.initiative.cmp(&a.initiative));
        sorted
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SelectedCreature> {
        self.creatures.iter().find(|c| c.id() == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut SelectedCreature> {
        self.creatures
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Adds a fresh entry for `creature` with rolled initiative and full hit points
    /// and returns its id. With `dedupe`, entries sharing a name get numbered.
    pub fn add(&mut self, creature: Creature, dedupe: bool) -> String {
        let initiative = roll_initiative(&mut self.rng, &creature.stats);
        let id = Uuid::new_v4().to_string();
        let mut entry = SelectedCreature::new(creature, id.clone(), initiative);

        if dedupe {
            let mut namesakes: Vec<&mut SelectedCreature> = self
                .creatures
                .iter_mut()
                .filter(|c| c.base_name == entry.base_name)
                .collect();
            if !namesakes.is_empty() {
                let mut next = namesakes.iter().map(|c| c.ordinal).max().unwrap_or(0);
                // unnumbered namesakes each take the next free number, in insertion order
                for existing in namesakes.iter_mut().filter(|c| c.ordinal == 0) {
                    next += 1;
                    existing.set_ordinal(next);
                }
                entry.set_ordinal(next + 1);
            }
        }

        info!("Adding {} with initiative {}", entry.name(), initiative);
        self.creatures.push(entry);
        id
    }

    pub fn remove(&mut self, id: &str) -> Option<SelectedCreature> {
        let index = self.creatures.iter().position(|c| c.id() == id)?;
        let removed = self.creatures.remove(index);
        info!("Removed {}", removed.name());
        Some(removed)
    }

    pub fn remove_by_name(&mut self, name: &str) -> Option<SelectedCreature> {
        let id = self
            .creatures
            .iter()
            .find(|c| c.name() == name)?
            .id()
            .to_string();
        self.remove(&id)
    }

    pub fn update(&mut self, id: &str, update: EncounterUpdate) -> Result<()> {
        let entry = self.get_mut(id)?;
        debug!("Updating {}: {:?}", entry.name(), update);
        if let Some(hit_points) = update.current_hit_points {
            entry.set_hit_points(hit_points);
        }
        if let Some(conditions) = update.conditions {
            entry.conditions = conditions;
        }
        if let Some(initiative) = update.initiative {
            entry.initiative = initiative;
        }
        Ok(())
    }

    pub fn damage(&mut self, id: &str, amount: i32) -> Result<()> {
        self.get_mut(id)?.take_damage(amount);
        Ok(())
    }

    pub fn heal(&mut self, id: &str, amount: i32) -> Result<()> {
        self.get_mut(id)?.heal(amount);
        Ok(())
    }

    pub fn toggle_condition(&mut self, id: &str, condition: Condition) -> Result<bool> {
        Ok(self.get_mut(id)?.toggle_condition(condition))
    }

    /// Rolls initiative again for everyone. With `group_by_name`, all entries
    /// sharing a base name act on the same roll.
    pub fn reroll_initiative(&mut self, group_by_name: bool) {
        info!("Re-rolling initiative");
        let mut initiative_map = HashMap::new();
        for entry in self.creatures.iter_mut() {
            let modifier = entry.creature.stats.dexterity.modifier;
            entry.initiative = if group_by_name {
                *initiative_map
                    .entry(entry.base_name.clone())
                    .or_insert_with(|| roll_dice(&mut self.rng, 20, modifier))
            } else {
                roll_dice(&mut self.rng, 20, modifier)
            };
        }
    }

    /// Restores hit points and clears conditions, keeping initiative.
    pub fn reset(&mut self) {
        info!("Resetting encounter");
        for entry in self.creatures.iter_mut() {
            entry.current_hit_points = entry.max_hit_points();
            entry.conditions.clear();
        }
    }

    pub fn clear(&mut self) {
        self.creatures.clear();
    }

    pub fn to_json(&self) -> Result<String> {
        Format::Json.serialize(&self.creatures)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Format::Yaml.serialize(&self.creatures)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_creatures(Format::Json.deserialize(json)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn goblin() -> Creature {
        fixtures::creatures().remove(0)
    }

    fn owlbear() -> Creature {
        fixtures::creatures().remove(1)
    }

    #[test]
    fn test_add_rolls_initiative_and_fills_hit_points() {
        let mut encounter = Encounter::with_seed(1);
        let id = encounter.add(goblin(), true);
        let entry = encounter.get(&id).unwrap();
        // goblin dexterity 14 -> +2
        assert!((3..=22).contains(&entry.initiative));
        assert_eq!(entry.current_hit_points, 7);
        assert_eq!(entry.source_id, "1");
        assert_ne!(entry.id(), "1");
    }

    #[test]
    fn test_add_numbers_duplicates() {
        let mut encounter = Encounter::with_seed(42);
        let first = encounter.add(goblin(), true);
        assert_eq!(encounter.get(&first).unwrap().name(), "Goblin");

        let second = encounter.add(goblin(), true);
        let third = encounter.add(goblin(), true);
        encounter.add(owlbear(), true);

        assert_eq!(encounter.get(&first).unwrap().name(), "Goblin 1");
        assert_eq!(encounter.get(&second).unwrap().name(), "Goblin 2");
        assert_eq!(encounter.get(&third).unwrap().name(), "Goblin 3");
        assert!(encounter.creatures().iter().any(|c| c.name() == "Owlbear"));
    }

    #[test]
    fn test_numbering_continues_after_removal() {
        let mut encounter = Encounter::with_seed(3);
        encounter.add(goblin(), true);
        let second = encounter.add(goblin(), true);
        encounter.remove(&second);
        let next = encounter.add(goblin(), true);
        assert_eq!(encounter.get(&next).unwrap().name(), "Goblin 2");
    }

    #[test]
    fn test_dedupe_numbers_every_unnumbered_namesake() {
        let mut encounter = Encounter::with_seed(8);
        encounter.add(goblin(), false);
        encounter.add(goblin(), false);
        encounter.add(goblin(), true);
        let names: Vec<&str> = encounter.creatures().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Goblin 1", "Goblin 2", "Goblin 3"]);

        encounter.add(goblin(), false);
        encounter.add(goblin(), true);
        let names: Vec<&str> = encounter.creatures().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec!["Goblin 1", "Goblin 2", "Goblin 3", "Goblin 4", "Goblin 5"]
        );
        assert_eq!(encounter.remove_by_name("Goblin 2").unwrap().ordinal, 2);
    }

    #[test]
    fn test_add_without_dedupe_keeps_names() {
        let mut encounter = Encounter::with_seed(5);
        encounter.add(goblin(), false);
        encounter.add(goblin(), false);
        assert!(encounter.creatures().iter().all(|c| c.name() == "Goblin"));
        let ids: BTreeSet<_> = encounter.creatures().iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_sorted_by_descending_initiative_with_stable_ties() {
        let mut encounter = Encounter::with_seed(9);
        let a = encounter.add(goblin(), true);
        let b = encounter.add(owlbear(), true);
        let c = encounter.add(goblin(), true);
        for id in [&a, &b, &c] {
            encounter
                .update(
                    id,
                    EncounterUpdate {
                        initiative: Some(10),
                        ..Default::default()
                    },
                )
                .unwrap();
        }
        encounter
            .update(
                &c,
                EncounterUpdate {
                    initiative: Some(15),
                    ..Default::default()
                },
            )
            .unwrap();

        let order: Vec<&str> = encounter.by_initiative().into_iter().map(|c| c.id()).collect();
        assert_eq!(order, vec![c.as_str(), a.as_str(), b.as_str()]);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut encounter = Encounter::with_seed(11);
        let id = encounter.add(owlbear(), true);
        let conditions: BTreeSet<_> = [Condition::Grappled, Condition::Prone].into();
        encounter
            .update(
                &id,
                EncounterUpdate {
                    current_hit_points: Some(500),
                    conditions: Some(conditions.clone()),
                    ..Default::default()
                },
            )
            .unwrap();
        let entry = encounter.get(&id).unwrap();
        assert_eq!(entry.current_hit_points, 59);
        assert_eq!(entry.conditions, conditions);

        let err = encounter
            .update("missing", EncounterUpdate::default())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id == "missing"));
    }

    #[test]
    fn test_readding_starts_fresh() {
        let mut encounter = Encounter::with_seed(13);
        let id = encounter.add(goblin(), true);
        encounter.toggle_condition(&id, Condition::Stunned).unwrap();
        encounter.damage(&id, 5).unwrap();

        let removed = encounter.remove_by_name("Goblin").unwrap();
        assert_eq!(removed.id(), id);
        assert!(encounter.is_empty());

        let fresh = encounter.add(goblin(), true);
        let entry = encounter.get(&fresh).unwrap();
        assert_ne!(fresh, id);
        assert!(entry.conditions.is_empty());
        assert_eq!(entry.current_hit_points, 7);
        assert_eq!(entry.name(), "Goblin");
    }

    #[test]
    fn test_reroll_groups_same_named_creatures() {
        let mut encounter = Encounter::with_seed(42);
        encounter.add(goblin(), true);
        encounter.add(goblin(), true);
        encounter.add(owlbear(), true);
        encounter.reroll_initiative(true);

        let goblins: Vec<i32> = encounter
            .creatures()
            .iter()
            .filter(|c| c.base_name == "Goblin")
            .map(|c| c.initiative)
            .collect();
        assert_eq!(goblins[0], goblins[1]);
        let initiatives: Vec<i32> = encounter.by_initiative().into_iter().map(|c| c.initiative).collect();
        assert!(initiatives.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_reset_restores_hit_points_and_clears_conditions() {
        let mut encounter = Encounter::with_seed(17);
        let id = encounter.add(owlbear(), true);
        encounter.damage(&id, 20).unwrap();
        encounter.toggle_condition(&id, Condition::Frightened).unwrap();
        encounter.reset();
        let entry = encounter.get(&id).unwrap();
        assert_eq!(entry.current_hit_points, 59);
        assert!(entry.conditions.is_empty());

        encounter.clear();
        assert!(encounter.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let mut encounter = Encounter::with_seed(21);
        let id = encounter.add(goblin(), true);
        encounter.add(fixtures::creatures().remove(2), true);
        encounter.toggle_condition(&id, Condition::Charmed).unwrap();
        encounter.heal(&id, 0).unwrap();

        let json = encounter.to_json().unwrap();
        let restored = Encounter::from_json(&json).unwrap();
        assert_eq!(restored.creatures(), encounter.creatures());
    }
}
