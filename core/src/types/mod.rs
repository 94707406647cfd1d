pub mod creature;
pub mod example;
pub mod spell;

pub use creature::{
    ability_modifier, Ability, Attribute, ChallengeRating, Creature, CreatureActions,
    CreatureType, NamedText, SavingThrows, Senses, Size, Stats,
};
pub use example::Example;
pub use spell::{Spell, SpellDamage};
