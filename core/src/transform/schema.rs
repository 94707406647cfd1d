//! Shapes of the public D&D 5e API payloads.
//!
//! The upstream service is loosely typed and has changed the shape of several
//! fields over time, so most of them are optional or accept more than one form.
//! Nothing here fails on a missing field; the transforms decide the defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiReference {
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiListResponse {
    #[serde(default)]
    pub count: Option<usize>,
    pub results: Vec<ApiReference>,
}

/// Either a bare number or a string such as `"30 ft."`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Distance {
    Number(f64),
    Text(String),
}

impl Distance {
    /// The leading integer of the value, if there is one.
    pub fn feet(&self) -> Option<u32> {
        match self {
            Distance::Number(n) if *n >= 0.0 => Some(*n as u32),
            Distance::Number(_) => None,
            Distance::Text(text) => leading_integer(text),
        }
    }
}

pub(crate) fn leading_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorClassEntry {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArmorClass {
    Single(i32),
    List(Vec<ArmorClassEntry>),
}

impl ArmorClass {
    pub fn value(&self) -> i32 {
        match self {
            ArmorClass::Single(value) => *value,
            ArmorClass::List(entries) => entries.first().map(|e| e.value).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Speed {
    pub walk: Option<Distance>,
    pub fly: Option<Distance>,
    pub swim: Option<Distance>,
    pub burrow: Option<Distance>,
    pub climb: Option<Distance>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuredSenses {
    pub passive_perception: Option<u32>,
    pub blindsight: Option<Distance>,
    pub darkvision: Option<Distance>,
    pub tremorsense: Option<Distance>,
    pub truesight: Option<Distance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensesField {
    Text(String),
    List(Vec<String>),
    Structured(StructuredSenses),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Languages {
    Text(String),
    List(Vec<LanguageEntry>),
}

/// A single string or a list of paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextBlock {
    Single(String),
    Paragraphs(Vec<String>),
}

impl TextBlock {
    pub fn joined(&self) -> String {
        match self {
            TextBlock::Single(text) => text.clone(),
            TextBlock::Paragraphs(paragraphs) => paragraphs.join("\n\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(f64),
    Text(String),
}

impl Rating {
    pub fn value(&self) -> f64 {
        match self {
            Rating::Number(n) => *n,
            Rating::Text(text) => parse_rating(text),
        }
    }
}

/// Accepts plain numbers as well as fractions like `"1/4"`.
fn parse_rating(text: &str) -> f64 {
    let text = text.trim();
    if let Some((num, den)) = text.split_once('/') {
        match (num.trim().parse::<f64>(), den.trim().parse::<f64>()) {
            (Ok(n), Ok(d)) if d != 0.0 => n / d,
            _ => 0.0,
        }
    } else {
        text.parse().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proficiency {
    #[serde(default)]
    pub value: i32,
    pub proficiency: ApiReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonsterApiResponse {
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub name: String,
    pub size: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub subtype: Option<String>,
    pub alignment: Option<String>,
    pub armor_class: Option<ArmorClass>,
    pub hit_points: Option<i32>,
    pub hit_dice: Option<String>,
    pub speed: Option<Speed>,
    pub strength: Option<i32>,
    pub dexterity: Option<i32>,
    pub constitution: Option<i32>,
    pub intelligence: Option<i32>,
    pub wisdom: Option<i32>,
    pub charisma: Option<i32>,
    #[serde(default)]
    pub proficiencies: Vec<Proficiency>,
    pub senses: Option<SensesField>,
    pub languages: Option<Languages>,
    pub challenge_rating: Option<Rating>,
    pub xp: Option<u32>,
    pub desc: Option<TextBlock>,
    #[serde(default)]
    pub special_abilities: Vec<ApiAction>,
    #[serde(default)]
    pub actions: Vec<ApiAction>,
    #[serde(default)]
    pub legendary_actions: Vec<ApiAction>,
    pub image: Option<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiSpellDamage {
    pub damage_type: Option<ApiReference>,
    pub damage_at_slot_level: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpellApiResponse {
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub name: String,
    pub desc: Option<TextBlock>,
    pub higher_level: Option<TextBlock>,
    pub range: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
    pub material: Option<String>,
    #[serde(default)]
    pub ritual: bool,
    pub duration: Option<String>,
    #[serde(default)]
    pub concentration: bool,
    pub casting_time: Option<String>,
    #[serde(default)]
    pub level: u8,
    pub attack_type: Option<String>,
    pub damage: Option<ApiSpellDamage>,
    pub school: Option<ApiReference>,
    #[serde(default)]
    pub classes: Vec<ApiReference>,
    #[serde(default)]
    pub subclasses: Vec<ApiReference>,
    #[serde(default)]
    pub url: String,
}
