pub mod commands;
pub mod core;
pub mod formatters;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_ENV};
