pub mod app;
pub mod cli;
pub mod terminal;
pub mod ui;
pub mod utils;
