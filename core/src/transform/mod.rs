//! Conversion of D&D 5e API payloads into the catalog types served to clients.

pub mod monster;
pub mod schema;
pub mod spell;

pub use monster::{parse_sense, transform_monster};
pub use schema::{ApiListResponse, ApiReference, MonsterApiResponse, SpellApiResponse};
pub use spell::transform_spell;
