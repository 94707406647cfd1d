use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellDamage {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<String>,
    /// Dice per spell slot level, keyed by the slot level as the upstream API sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_slot_level: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub higher_level: Option<String>,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default)]
    pub ritual: bool,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub casting_time: String,
    #[serde(default)]
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<SpellDamage>,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub subclasses: Vec<String>,
}

impl Spell {
    /// "Cantrip" for level 0, otherwise e.g. "3rd-level".
    pub fn level_label(&self) -> String {
        let suffix = match self.level {
            0 => return "Cantrip".to_string(),
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        format!("{}{}-level", self.level, suffix)
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut tags = Vec::new();
        if self.ritual {
            tags.push("ritual");
        }
        if self.concentration {
            tags.push("concentration");
        }
        let mut lines = vec![
            format!("{} {}", self.level_label(), self.school.to_lowercase()),
            format!("Casting Time: {}", self.casting_time),
            format!("Range: {}", self.range),
        ];
        let mut components = self.components.join(", ");
        if let Some(material) = &self.material {
            components = format!("{components} ({material})");
        }
        lines.push(format!("Components: {components}"));
        lines.push(format!("Duration: {}", self.duration));
        if !tags.is_empty() {
            lines.push(format!("Tags: {}", tags.join(", ")));
        }
        if let Some(attack) = &self.attack_type {
            lines.push(format!("Attack: {attack}"));
        }
        lines.push(String::new());
        lines.extend(self.description.lines().map(str::to_string));
        if let Some(higher) = &self.higher_level {
            lines.push(String::new());
            lines.push(format!("At Higher Levels. {higher}"));
        }
        if let Some(damage) = &self.damage {
            lines.push(String::new());
            lines.push(format!(
                "Damage ({})",
                damage.damage_type.as_deref().unwrap_or("untyped")
            ));
            if let Some(slots) = &damage.at_slot_level {
                lines.extend(
                    slots
                        .iter()
                        .sorted_by_key(|(slot, _)| slot.parse::<u8>().unwrap_or(u8::MAX))
                        .map(|(slot, dice)| format!("  slot {slot}: {dice}")),
                );
            }
        }
        if !self.classes.is_empty() {
            lines.push(String::new());
            lines.push(format!("Classes: {}", self.classes.join(", ")));
        }
        lines
    }
}
