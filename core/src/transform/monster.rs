use log::debug;
use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::schema::{Distance, Languages, MonsterApiResponse, SensesField, StructuredSenses};
use crate::types::{
    creature::signed, Ability, ChallengeRating, Creature, CreatureActions, CreatureType,
    NamedText, SavingThrows, Senses, Size, Stats,
};

static SENSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(darkvision|blindsight|tremorsense|truesight|passive perception)\s+(\d+)")
        .expect("sense pattern is valid")
});

const SKILL_PREFIX: &str = "Skill: ";
const SAVING_THROW_PREFIX: &str = "Saving Throw: ";

/// Extracts the range of `sense` from free text such as
/// `"darkvision 60 ft., passive Perception 12"`.
pub fn parse_sense(text: &str, sense: &str) -> Option<u32> {
    SENSE_RE
        .captures_iter(text)
        .find(|caps| caps[1].eq_ignore_ascii_case(sense))
        .and_then(|caps| caps[2].parse().ok())
}

/// Ranges the monster lacks come out as 0, never missing.
fn senses_from_text(text: &str) -> Senses {
    Senses {
        darkvision: parse_sense(text, "darkvision").or(Some(0)),
        blindsight: parse_sense(text, "blindsight").or(Some(0)),
        tremorsense: parse_sense(text, "tremorsense").or(Some(0)),
        truesight: parse_sense(text, "truesight").or(Some(0)),
        passive_perception: parse_sense(text, "passive perception").unwrap_or(0),
    }
}

fn feet_or_zero(distance: Option<&Distance>) -> Option<u32> {
    Some(distance.and_then(|d| d.feet()).unwrap_or(0))
}

fn senses_from_structured(senses: &StructuredSenses) -> Senses {
    Senses {
        darkvision: feet_or_zero(senses.darkvision.as_ref()),
        blindsight: feet_or_zero(senses.blindsight.as_ref()),
        tremorsense: feet_or_zero(senses.tremorsense.as_ref()),
        truesight: feet_or_zero(senses.truesight.as_ref()),
        passive_perception: senses.passive_perception.unwrap_or(0),
    }
}

pub fn transform_senses(senses: Option<&SensesField>) -> Senses {
    match senses {
        Some(SensesField::Text(text)) => senses_from_text(text),
        Some(SensesField::List(entries)) => senses_from_text(&entries.join(", ")),
        Some(SensesField::Structured(structured)) => senses_from_structured(structured),
        None => senses_from_text(""),
    }
}

fn transform_languages(languages: Option<&Languages>) -> Vec<String> {
    match languages {
        Some(Languages::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Languages::List(entries)) => entries.iter().map(|l| l.name.clone()).collect(),
        None => Vec::new(),
    }
}

/// Splits proficiencies into skill lines (`"Athletics +2"`) and saving throw bonuses.
fn transform_proficiencies(monster: &MonsterApiResponse) -> (Vec<String>, SavingThrows) {
    let mut skills = Vec::new();
    let mut saving_throws = SavingThrows::default();
    for entry in &monster.proficiencies {
        let name = entry.proficiency.name.as_str();
        if let Some(skill) = name.strip_prefix(SKILL_PREFIX) {
            skills.push(format!("{} {}", skill, signed(entry.value)));
        } else if let Some(ability) = name
            .strip_prefix(SAVING_THROW_PREFIX)
            .and_then(Ability::from_abbreviation)
        {
            saving_throws.set(ability, entry.value);
        } else {
            debug!("Ignoring proficiency '{}' on {}", name, monster.index);
        }
    }
    (skills, saving_throws)
}

fn transform_size(monster: &MonsterApiResponse) -> Size {
    match monster.size.as_deref().map(str::parse::<Size>) {
        Some(Ok(size)) => size,
        Some(Err(e)) => {
            debug!("{e} on {}, using Medium", monster.index);
            Size::default()
        }
        None => Size::default(),
    }
}

fn named(actions: &[super::schema::ApiAction]) -> Vec<NamedText> {
    actions
        .iter()
        .map(|a| NamedText {
            name: a.name.clone(),
            desc: a.desc.clone(),
        })
        .collect()
}

/// Maps an upstream monster into a [`Creature`]. Missing ability scores count as 10,
/// every other missing number as 0.
pub fn transform_monster(monster: &MonsterApiResponse) -> Creature {
    let (skills, saving_throws) = transform_proficiencies(monster);
    let score = |value: Option<i32>| value.unwrap_or(10);

    Creature {
        id: monster.index.clone(),
        name: monster.name.clone(),
        description: monster
            .desc
            .as_ref()
            .map(|d| d.joined())
            .unwrap_or_default(),
        actions: CreatureActions {
            special_abilities: named(&monster.special_abilities),
            actions: named(&monster.actions),
            legendary_actions: named(&monster.legendary_actions),
        },
        stats: Stats::from_values([
            score(monster.strength),
            score(monster.dexterity),
            score(monster.constitution),
            score(monster.intelligence),
            score(monster.wisdom),
            score(monster.charisma),
        ]),
        armor_class: monster.armor_class.as_ref().map(|ac| ac.value()).unwrap_or(0),
        hit_points: monster.hit_points.unwrap_or(0),
        speed: monster
            .speed
            .as_ref()
            .and_then(|s| s.walk.as_ref())
            .and_then(|w| w.feet())
            .unwrap_or(0) as i32,
        skills,
        saving_throws,
        senses: transform_senses(monster.senses.as_ref()),
        languages: transform_languages(monster.languages.as_ref()),
        challenge_rating: ChallengeRating {
            rating: monster
                .challenge_rating
                .as_ref()
                .map(|r| r.value())
                .unwrap_or(0.0),
            xp: monster.xp.unwrap_or(0),
        },
        creature_type: CreatureType {
            size: transform_size(monster),
            kind: monster.kind.clone().unwrap_or_default(),
            subtype: monster.subtype.clone().filter(|s| !s.is_empty()),
            alignment: monster.alignment.clone().unwrap_or_default(),
        },
    }
}
