mod args;
mod commands;
pub mod config;
mod logging;
pub mod output;

pub use args::{Cli, LogLevel, SourceType, TimeZoneSetting};
pub use commands::run;
pub use logging::init_logging;
