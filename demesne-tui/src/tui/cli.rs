use std::path::PathBuf;

use clap::Parser;

use crate::api::DEFAULT_API_URL;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the Demesne API
    #[arg(long, env = "DEMESNE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// The file the encounter is kept in (.json, .yaml or .yml)
    #[arg(short, long, default_value = "encounter.json")]
    pub encounter_file: PathBuf,

    /// Don't number creatures that share a name
    #[arg(long)]
    pub no_dedupe: bool,

    /// Print the encounter to stdout on exit
    #[arg(long)]
    pub stdout: bool,

    /// Where to write the log
    #[arg(long, default_value = "demesne_tui.log")]
    pub log_file: PathBuf,
}
