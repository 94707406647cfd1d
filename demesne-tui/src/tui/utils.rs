use color_eyre::eyre::{Context, Result};
use demesne_core::encounter::{Encounter, EncounterStore, FileStore};
use env_logger::{Builder, Target};
use log::info;
use std::{fs::File, io::Write, path::Path};

/// Routes the log into `path`, since the terminal belongs to the UI.
pub fn init_logging(path: &Path) -> Result<()> {
    let log_file = File::create(path)
        .wrap_err_with(|| format!("Failed to create log file '{}'.", path.display()))?;
    Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:L{} [{}] - {}",
                record.file().unwrap_or("Unknown File"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

/// Opens the encounter file and loads whatever was saved there last time.
pub fn open_encounter(path: &Path) -> Result<(FileStore, Encounter)> {
    let store = FileStore::new(path)
        .wrap_err_with(|| format!("Can't keep an encounter in '{}'.", path.display()))?;
    let creatures = store
        .load()
        .wrap_err_with(|| format!("Failed to load encounter from '{}'.", path.display()))?;
    info!("Loaded {} creatures", creatures.len());
    Ok((store, Encounter::from_creatures(creatures)))
}
