//! In-memory catalog served when the API runs without the upstream service.

use std::collections::BTreeMap;

use crate::types::{
    ChallengeRating, Creature, CreatureActions, CreatureType, Example, NamedText, SavingThrows,
    Senses, Size, Spell, SpellDamage, Stats,
};

pub fn creatures() -> Vec<Creature> {
    vec![
        Creature {
            id: "1".into(),
            name: "Goblin".into(),
            description: "Small, green-skinned creatures known for their cunning and stealth. \
                          They favor ambush tactics and rarely fight fair."
                .into(),
            actions: CreatureActions {
                special_abilities: vec![NamedText {
                    name: "Nimble Escape".into(),
                    desc: "The goblin can take the Disengage or Hide action as a bonus action \
                           on each of its turns."
                        .into(),
                }],
                actions: vec![NamedText {
                    name: "Scimitar".into(),
                    desc: "Melee Weapon Attack: +4 to hit, reach 5 ft., one target. \
                           Hit: 5 (1d6 + 2) slashing damage."
                        .into(),
                }],
                legendary_actions: vec![],
            },
            stats: Stats::from_values([8, 14, 10, 10, 8, 8]),
            armor_class: 15,
            hit_points: 7,
            speed: 30,
            skills: vec!["Stealth +6".into()],
            saving_throws: SavingThrows {
                dexterity: 2,
                ..Default::default()
            },
            senses: Senses {
                darkvision: Some(60),
                passive_perception: 9,
                ..Default::default()
            },
            languages: vec!["Common".into(), "Goblin".into()],
            challenge_rating: ChallengeRating {
                rating: 0.25,
                xp: 50,
            },
            creature_type: CreatureType {
                size: Size::Small,
                kind: "humanoid".into(),
                subtype: Some("goblinoid".into()),
                alignment: "neutral evil".into(),
            },
        },
        Creature {
            id: "2".into(),
            name: "Owlbear".into(),
            description: "A terrifying combination of owl and bear, these creatures are known \
                          for their ferocity and territorial nature."
                .into(),
            actions: CreatureActions {
                special_abilities: vec![NamedText {
                    name: "Keen Sight and Smell".into(),
                    desc: "The owlbear has advantage on Wisdom (Perception) checks that rely \
                           on sight or smell."
                        .into(),
                }],
                actions: vec![NamedText {
                    name: "Multiattack".into(),
                    desc: "The owlbear makes two attacks: one with its beak and one with its \
                           claws."
                        .into(),
                }],
                legendary_actions: vec![],
            },
            stats: Stats::from_values([20, 12, 17, 3, 12, 7]),
            armor_class: 13,
            hit_points: 59,
            speed: 40,
            skills: vec!["Perception +3".into()],
            saving_throws: SavingThrows::default(),
            senses: Senses {
                darkvision: Some(60),
                passive_perception: 13,
                ..Default::default()
            },
            languages: vec![],
            challenge_rating: ChallengeRating {
                rating: 3.0,
                xp: 700,
            },
            creature_type: CreatureType {
                size: Size::Large,
                kind: "monstrosity".into(),
                subtype: None,
                alignment: "unaligned".into(),
            },
        },
        Creature {
            id: "3".into(),
            name: "Young Green Dragon".into(),
            description: "A cunning and manipulative predator with forest-green scales and \
                          acidic breath."
                .into(),
            actions: CreatureActions {
                special_abilities: vec![NamedText {
                    name: "Amphibious".into(),
                    desc: "The dragon can breathe air and water.".into(),
                }],
                actions: vec![NamedText {
                    name: "Poison Breath (Recharge 5-6)".into(),
                    desc: "The dragon exhales poisonous gas in a 30-foot cone.".into(),
                }],
                legendary_actions: vec![],
            },
            stats: Stats::from_values([19, 12, 17, 16, 13, 15]),
            armor_class: 18,
            hit_points: 136,
            speed: 40,
            skills: vec![
                "Deception +5".into(),
                "Perception +7".into(),
                "Stealth +4".into(),
            ],
            saving_throws: SavingThrows {
                dexterity: 3,
                constitution: 6,
                wisdom: 4,
                charisma: 5,
                ..Default::default()
            },
            senses: Senses {
                blindsight: Some(30),
                darkvision: Some(120),
                passive_perception: 17,
                ..Default::default()
            },
            languages: vec!["Common".into(), "Draconic".into()],
            challenge_rating: ChallengeRating {
                rating: 8.0,
                xp: 3900,
            },
            creature_type: CreatureType {
                size: Size::Large,
                kind: "dragon".into(),
                subtype: None,
                alignment: "lawful evil".into(),
            },
        },
    ]
}

pub fn spells() -> Vec<Spell> {
    let fireball_slots: BTreeMap<String, String> = (3..=9)
        .map(|slot| (slot.to_string(), format!("{}d6", slot + 5)))
        .collect();
    let missile_slots: BTreeMap<String, String> = (1..=9)
        .map(|slot| (slot.to_string(), format!("{}d4 + {}", slot + 2, slot + 2)))
        .collect();

    vec![
        Spell {
            id: "fireball".into(),
            name: "Fireball".into(),
            description: "A bright streak flashes from your pointing finger to a point you \
                          choose within range and then blossoms with a low roar into an \
                          explosion of flame."
                .into(),
            higher_level: Some(
                "When you cast this spell using a spell slot of 4th level or higher, the \
                 damage increases by 1d6 for each slot level above 3rd."
                    .into(),
            ),
            range: "150 feet".into(),
            components: vec!["V".into(), "S".into(), "M".into()],
            material: Some("A tiny ball of bat guano and sulfur.".into()),
            ritual: false,
            duration: "Instantaneous".into(),
            concentration: false,
            casting_time: "1 action".into(),
            level: 3,
            attack_type: None,
            damage: Some(SpellDamage {
                damage_type: Some("Fire".into()),
                at_slot_level: Some(fireball_slots),
            }),
            school: "Evocation".into(),
            classes: vec!["Sorcerer".into(), "Wizard".into()],
            subclasses: vec!["Lore".into(), "Fiend".into()],
        },
        Spell {
            id: "magic-missile".into(),
            name: "Magic Missile".into(),
            description: "You create three glowing darts of magical force. Each dart hits a \
                          creature of your choice that you can see within range."
                .into(),
            higher_level: Some(
                "When you cast this spell using a spell slot of 2nd level or higher, the \
                 spell creates one more dart for each slot level above 1st."
                    .into(),
            ),
            range: "120 feet".into(),
            components: vec!["V".into(), "S".into()],
            material: None,
            ritual: false,
            duration: "Instantaneous".into(),
            concentration: false,
            casting_time: "1 action".into(),
            level: 1,
            attack_type: None,
            damage: Some(SpellDamage {
                damage_type: Some("Force".into()),
                at_slot_level: Some(missile_slots),
            }),
            school: "Evocation".into(),
            classes: vec!["Sorcerer".into(), "Wizard".into()],
            subclasses: vec![],
        },
        Spell {
            id: "cure-wounds".into(),
            name: "Cure Wounds".into(),
            description: "A creature you touch regains a number of hit points equal to 1d8 + \
                          your spellcasting ability modifier."
                .into(),
            higher_level: None,
            range: "Touch".into(),
            components: vec!["V".into(), "S".into()],
            material: None,
            ritual: false,
            duration: "Instantaneous".into(),
            concentration: false,
            casting_time: "1 action".into(),
            level: 1,
            attack_type: None,
            damage: None,
            school: "Evocation".into(),
            classes: vec![
                "Bard".into(),
                "Cleric".into(),
                "Druid".into(),
                "Paladin".into(),
                "Ranger".into(),
            ],
            subclasses: vec![],
        },
    ]
}

pub fn examples() -> Vec<Example> {
    vec![
        Example {
            id: "1".into(),
            name: "Ambush at the ford".into(),
            description: "Four goblins wait in the reeds for travellers crossing the river."
                .into(),
        },
        Example {
            id: "2".into(),
            name: "The owlbear's den".into(),
            description: "A hungry owlbear defends its cave high in the pine forest.".into(),
        },
    ]
}
