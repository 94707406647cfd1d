use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Frightened,
    Grappled,
    Incapacitated,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

impl Condition {
    pub const ALL: [Condition; 13] = [
        Condition::Blinded,
        Condition::Charmed,
        Condition::Deafened,
        Condition::Frightened,
        Condition::Grappled,
        Condition::Incapacitated,
        Condition::Paralyzed,
        Condition::Petrified,
        Condition::Poisoned,
        Condition::Prone,
        Condition::Restrained,
        Condition::Stunned,
        Condition::Unconscious,
    ];

    /// Three letter label used where space is tight.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Condition::Blinded => "BLD",
            Condition::Charmed => "CHM",
            Condition::Deafened => "DEF",
            Condition::Frightened => "FRT",
            Condition::Grappled => "GRP",
            Condition::Incapacitated => "INC",
            Condition::Paralyzed => "PAR",
            Condition::Petrified => "PET",
            Condition::Poisoned => "PSN",
            Condition::Prone => "PRN",
            Condition::Restrained => "RST",
            Condition::Stunned => "STN",
            Condition::Unconscious => "UNC",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
