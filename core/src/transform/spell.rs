use super::schema::SpellApiResponse;
use crate::types::{Spell, SpellDamage};

pub fn transform_spell(spell: &SpellApiResponse) -> Spell {
    Spell {
        id: spell.index.clone(),
        name: spell.name.clone(),
        description: spell.desc.as_ref().map(|d| d.joined()).unwrap_or_default(),
        higher_level: spell
            .higher_level
            .as_ref()
            .map(|h| h.joined())
            .filter(|h| !h.is_empty()),
        range: spell.range.clone().unwrap_or_default(),
        components: spell.components.clone(),
        material: spell.material.clone(),
        ritual: spell.ritual,
        duration: spell.duration.clone().unwrap_or_default(),
        concentration: spell.concentration,
        casting_time: spell.casting_time.clone().unwrap_or_default(),
        level: spell.level,
        attack_type: spell.attack_type.clone(),
        damage: spell.damage.as_ref().map(|damage| SpellDamage {
            damage_type: damage.damage_type.as_ref().map(|t| t.name.clone()),
            at_slot_level: damage.damage_at_slot_level.clone(),
        }),
        school: spell
            .school
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        classes: spell.classes.iter().map(|c| c.name.clone()).collect(),
        subclasses: spell.subclasses.iter().map(|c| c.name.clone()).collect(),
    }
}
