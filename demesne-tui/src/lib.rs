//! Terminal encounter builder and the client for the Demesne API.

pub mod api;
pub mod tui;
