use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single ability score together with its derived modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub value: i32,
    pub modifier: i32,
}

impl Attribute {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            modifier: ability_modifier(value),
        }
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new(10)
    }
}

/// floor((value - 10) / 2)
pub fn ability_modifier(value: i32) -> i32 {
    (value - 10).div_euclid(2)
}

/// Formats a modifier with an explicit sign, e.g. `+2` or `-1`.
pub fn signed(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{modifier}")
    } else {
        modifier.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    /// Looks up an ability by its three letter abbreviation (case insensitive).
    pub fn from_abbreviation(abbr: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.abbreviation().eq_ignore_ascii_case(abbr.trim()))
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub strength: Attribute,
    pub dexterity: Attribute,
    pub constitution: Attribute,
    pub intelligence: Attribute,
    pub wisdom: Attribute,
    pub charisma: Attribute,
}

impl Stats {
    pub fn from_values(values: [i32; 6]) -> Self {
        let [strength, dexterity, constitution, intelligence, wisdom, charisma] =
            values.map(Attribute::new);
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    pub fn get(&self, ability: Ability) -> Attribute {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavingThrows {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl SavingThrows {
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: i32) {
        let slot = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        Ability::ALL.iter().all(|a| self.get(*a) == 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Senses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub darkvision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blindsight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tremorsense: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truesight: Option<u32>,
    #[serde(default)]
    pub passive_perception: u32,
}

impl fmt::Display for Senses {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ranged = [
            ("darkvision", self.darkvision),
            ("blindsight", self.blindsight),
            ("tremorsense", self.tremorsense),
            ("truesight", self.truesight),
        ]
        .into_iter()
        .filter_map(|(name, range)| match range {
            Some(r) if r > 0 => Some(format!("{name} {r} ft.")),
            _ => None,
        });
        let all = ranged
            .chain(std::iter::once(format!(
                "passive Perception {}",
                self.passive_perception
            )))
            .join(", ");
        write!(f, "{all}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChallengeRating {
    pub rating: f64,
    pub xp: u32,
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rating = match self.rating {
            r if r == 0.125 => "1/8".to_string(),
            r if r == 0.25 => "1/4".to_string(),
            r if r == 0.5 => "1/2".to_string(),
            r => r.to_string(),
        };
        write!(f, "{} ({} XP)", rating, self.xp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Size {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiny" => Ok(Size::Tiny),
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            "huge" => Ok(Size::Huge),
            "gargantuan" => Ok(Size::Gargantuan),
            other => Err(format!("unknown creature size '{other}'")),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatureType {
    pub size: Size,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub alignment: String,
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.size, self.kind)?;
        if let Some(subtype) = self.subtype.as_deref().filter(|s| !s.is_empty()) {
            write!(f, " ({subtype})")?;
        }
        write!(f, ", {}", self.alignment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedText {
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureActions {
    #[serde(default)]
    pub special_abilities: Vec<NamedText>,
    #[serde(default)]
    pub actions: Vec<NamedText>,
    #[serde(default)]
    pub legendary_actions: Vec<NamedText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    /// Empty on creatures submitted to the API, which assigns one.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actions: CreatureActions,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub armor_class: i32,
    #[serde(default)]
    pub hit_points: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub saving_throws: SavingThrows,
    #[serde(default)]
    pub senses: Senses,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub challenge_rating: ChallengeRating,
    #[serde(default)]
    pub creature_type: CreatureType,
}

impl Creature {
    /// Saving throws with a non-zero bonus, e.g. `Dexterity +2, Wisdom +4`.
    pub fn saving_throws_line(&self) -> String {
        if self.saving_throws.is_empty() {
            return "none".to_string();
        }
        Ability::ALL
            .iter()
            .filter(|a| self.saving_throws.get(**a) != 0)
            .map(|a| format!("{} {}", a, signed(self.saving_throws.get(*a))))
            .join(", ")
    }

    pub fn skills_line(&self) -> String {
        if self.skills.is_empty() {
            "none".to_string()
        } else {
            self.skills.join(", ")
        }
    }

    pub fn languages_line(&self) -> String {
        if self.languages.is_empty() {
            "none".to_string()
        } else {
            self.languages.join(", ")
        }
    }

    /// Renders the creature as a multi-line stat block.
    pub fn stat_block(&self) -> Vec<String> {
        let mut lines = vec![
            self.creature_type.to_string(),
            String::new(),
            format!("Armor Class {}", self.armor_class),
            format!("Hit Points {}", self.hit_points),
            format!("Speed {} ft.", self.speed),
            String::new(),
            Ability::ALL
                .iter()
                .map(|a| {
                    let attr = self.stats.get(*a);
                    format!("{} {} ({})", a.abbreviation(), attr.value, signed(attr.modifier))
                })
                .join("  "),
            String::new(),
        ];
        if !self.saving_throws.is_empty() {
            lines.push(format!("Saving Throws {}", self.saving_throws_line()));
        }
        lines.push(format!("Skills {}", self.skills_line()));
        lines.push(format!("Senses {}", self.senses));
        lines.push(format!("Languages {}", self.languages_line()));
        lines.push(format!("Challenge {}", self.challenge_rating));

        for (title, entries) in [
            ("Special Abilities", &self.actions.special_abilities),
            ("Actions", &self.actions.actions),
            ("Legendary Actions", &self.actions.legendary_actions),
        ] {
            if entries.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(title.to_string());
            lines.extend(entries.iter().map(|e| format!("• {}. {}", e.name, e.desc)));
        }
        if !self.description.is_empty() {
            lines.push(String::new());
            lines.push(self.description.clone());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, -5)]
    #[case(3, -4)]
    #[case(8, -1)]
    #[case(9, -1)]
    #[case(10, 0)]
    #[case(11, 0)]
    #[case(12, 1)]
    #[case(20, 5)]
    #[case(30, 10)]
    fn test_ability_modifier(#[case] value: i32, #[case] expected: i32) {
        assert_eq!(ability_modifier(value), expected);
        assert_eq!(Attribute::new(value).modifier, expected);
    }

    #[test]
    fn test_senses_display_skips_missing_ranges() {
        let senses = Senses {
            darkvision: Some(60),
            blindsight: Some(0),
            passive_perception: 9,
            ..Default::default()
        };
        assert_eq!(senses.to_string(), "darkvision 60 ft., passive Perception 9");
    }

    #[test]
    fn test_creature_type_display() {
        let with_subtype = CreatureType {
            size: Size::Small,
            kind: "humanoid".into(),
            subtype: Some("goblinoid".into()),
            alignment: "neutral evil".into(),
        };
        assert_eq!(with_subtype.to_string(), "Small humanoid (goblinoid), neutral evil");

        let without = CreatureType {
            subtype: None,
            ..with_subtype
        };
        assert_eq!(without.to_string(), "Small humanoid, neutral evil");
    }

    #[test]
    fn test_challenge_rating_fractions() {
        let cr = ChallengeRating {
            rating: 0.25,
            xp: 50,
        };
        assert_eq!(cr.to_string(), "1/4 (50 XP)");
        let cr = ChallengeRating { rating: 8.0, xp: 3900 };
        assert_eq!(cr.to_string(), "8 (3900 XP)");
    }

    #[test]
    fn test_saving_throws_line() {
        let mut saves = SavingThrows::default();
        saves.set(Ability::Dexterity, 3);
        saves.set(Ability::Wisdom, 4);
        let creature = Creature {
            saving_throws: saves,
            ..crate::fixtures::creatures().remove(0)
        };
        assert_eq!(creature.saving_throws_line(), "Dexterity +3, Wisdom +4");
    }

    #[test]
    fn test_size_parsing() {
        assert_eq!("Gargantuan".parse::<Size>(), Ok(Size::Gargantuan));
        assert_eq!(" tiny ".parse::<Size>(), Ok(Size::Tiny));
        assert!("colossal".parse::<Size>().is_err());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let goblin = crate::fixtures::creatures().remove(0);
        let json = serde_json::to_value(&goblin).unwrap();
        assert!(json.get("armorClass").is_some());
        assert!(json.get("challengeRating").is_some());
        assert_eq!(json["creatureType"]["type"], "humanoid");
        assert_eq!(json["senses"]["passivePerception"], 9);
        assert!(json["senses"].get("truesight").is_none());
    }
}
