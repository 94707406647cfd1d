use clap::Parser;
use color_eyre::Result;
use log::info;

use demesne_tui::tui::{app, cli, terminal, utils};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = cli::Args::parse();
    utils::init_logging(&args.log_file)?;
    info!("Application started");

    let (store, encounter) = utils::open_encounter(&args.encounter_file)?;
    let mut app = app::App::new(&args, Box::new(store), encounter)?;

    let mut terminal = terminal::init()?;
    let result = app.run(&mut terminal);
    if let Err(err) = terminal::restore() {
        eprintln!(
            "failed to restore terminal. Run `reset` or restart your terminal to recover: {}",
            err
        );
    }
    let encounter = result?;

    // print to stdout if --stdout flag is given
    if args.stdout {
        println!("{}", encounter.to_yaml()?);
    }
    Ok(())
}
