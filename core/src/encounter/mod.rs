pub mod condition;
pub mod dice;
pub mod selected;
pub mod storage;
pub mod tracker;

pub use condition::Condition;
pub use selected::SelectedCreature;
pub use storage::{EncounterStore, FileStore, Format, MemoryStore};
pub use tracker::{Encounter, EncounterUpdate};
